use kelime_types::{DeckCommand, Focus, Key};

/// What a key press does on the flashcard view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub command: DeckCommand,
    /// The key's default page action (scrolling) must not run
    pub prevent_default: bool,
}

/// Map a key press to a deck command. Nothing is bound while a text field
/// has focus so typing is never hijacked.
pub fn bind(key: Key, focus: Focus) -> Option<KeyBinding> {
    if focus == Focus::TextEntry {
        return None;
    }

    match key {
        Key::ArrowLeft => Some(KeyBinding {
            command: DeckCommand::Previous,
            prevent_default: false,
        }),
        Key::ArrowRight => Some(KeyBinding {
            command: DeckCommand::Next,
            prevent_default: false,
        }),
        Key::Space => Some(KeyBinding {
            command: DeckCommand::Flip,
            prevent_default: true,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_navigate() {
        assert_eq!(
            bind(Key::ArrowLeft, Focus::Page).map(|b| b.command),
            Some(DeckCommand::Previous)
        );
        assert_eq!(
            bind(Key::ArrowRight, Focus::Page).map(|b| b.command),
            Some(DeckCommand::Next)
        );
    }

    #[test]
    fn space_flips_and_prevents_scrolling() {
        let binding = bind(Key::Space, Focus::Page).unwrap();
        assert_eq!(binding.command, DeckCommand::Flip);
        assert!(binding.prevent_default);
    }

    #[test]
    fn text_entry_disables_bindings() {
        for key in [Key::ArrowLeft, Key::ArrowRight, Key::Space] {
            assert_eq!(bind(key, Focus::TextEntry), None);
        }
    }

    #[test]
    fn other_keys_are_unbound() {
        assert_eq!(bind(Key::Char('x'), Focus::Page), None);
        assert_eq!(bind(Key::Enter, Focus::Page), None);
        assert_eq!(bind(Key::Other, Focus::Page), None);
    }
}
