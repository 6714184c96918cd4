use std::collections::HashSet;

use kelime_types::{CardFace, DeckCommand, SavedWordSet, VocabularyWord};
use rand::Rng;

use crate::card::{CardCommand, Flashcard};
use crate::speech::SpeechCue;

/// Result of applying a deck command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckEffect {
    Unchanged,
    Moved,
    Flipped,
    /// The word left the saved set, which must now be persisted
    Removed(VocabularyWord),
}

/// Flashcard deck mirroring the saved words in its own, possibly shuffled,
/// order.
///
/// The deck never owns the saved set. Whenever the saved set changes the
/// host calls [`FlashcardDeck::reconcile`], which keeps the relative order
/// of words already in the deck and appends new ones at the end.
#[derive(Debug, Clone, Default)]
pub struct FlashcardDeck {
    order: Vec<VocabularyWord>,
    current: usize,
    card: Flashcard,
}

impl FlashcardDeck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_saved(saved: &SavedWordSet) -> Self {
        let mut deck = Self::new();
        deck.reconcile(saved);
        deck
    }

    pub fn words(&self) -> &[VocabularyWord] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_word(&self) -> Option<&VocabularyWord> {
        self.order.get(self.current)
    }

    pub fn face(&self) -> CardFace {
        self.card.face()
    }

    /// 1-based position and total, `(0, 0)` for an empty deck
    pub fn position(&self) -> (usize, usize) {
        if self.order.is_empty() {
            (0, 0)
        } else {
            (self.current_index() + 1, self.len())
        }
    }

    /// Bring the deck in line with the latest saved words
    pub fn reconcile(&mut self, saved: &SavedWordSet) {
        let saved_keys: HashSet<String> = saved.words().iter().map(VocabularyWord::key).collect();
        self.order.retain(|w| saved_keys.contains(&w.key()));

        let present: HashSet<String> = self.order.iter().map(VocabularyWord::key).collect();
        let added: Vec<VocabularyWord> = saved
            .words()
            .iter()
            .filter(|w| !present.contains(&w.key()))
            .cloned()
            .collect();

        if !added.is_empty() {
            tracing::debug!("Deck picked up {} new words", added.len());
        }
        self.order.extend(added);

        if self.order.is_empty() {
            self.current = 0;
        } else if self.current >= self.order.len() {
            self.current = self.order.len() - 1;
        }

        self.sync_card();
    }

    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::rng());
    }

    /// Fisher-Yates shuffle, then back to the first card
    pub fn shuffle_with<R: Rng>(&mut self, rng: &mut R) {
        for i in (1..self.order.len()).rev() {
            let j = rng.random_range(0..=i);
            self.order.swap(i, j);
        }
        self.current = 0;
        self.sync_card();
    }

    pub fn next(&mut self) {
        if self.order.is_empty() {
            return;
        }
        self.current = if self.current + 1 >= self.order.len() {
            0
        } else {
            self.current + 1
        };
        self.sync_card();
    }

    pub fn previous(&mut self) {
        if self.order.is_empty() {
            return;
        }
        self.current = if self.current == 0 {
            self.order.len() - 1
        } else {
            self.current - 1
        };
        self.sync_card();
    }

    /// Remove the visible word from the deck and from `saved`.
    ///
    /// The caller is responsible for persisting `saved` afterwards.
    pub fn remove_current(&mut self, saved: &mut SavedWordSet) -> Option<VocabularyWord> {
        if self.current >= self.order.len() {
            return None;
        }

        let word = self.order.remove(self.current);
        saved.remove(&word);
        self.reconcile(saved);

        Some(word)
    }

    /// Forward a flip to the visible card. Returns whether it flipped.
    pub fn flip(&mut self, speech: &dyn SpeechCue) -> bool {
        if self.order.is_empty() {
            return false;
        }
        self.card.handle(CardCommand::Flip, speech.is_speaking())
    }

    pub fn apply(
        &mut self,
        command: DeckCommand,
        saved: &mut SavedWordSet,
        speech: &dyn SpeechCue,
    ) -> DeckEffect {
        if self.order.is_empty() {
            return DeckEffect::Unchanged;
        }

        match command {
            DeckCommand::Next => {
                self.next();
                DeckEffect::Moved
            }
            DeckCommand::Previous => {
                self.previous();
                DeckEffect::Moved
            }
            DeckCommand::Shuffle => {
                self.shuffle();
                DeckEffect::Moved
            }
            DeckCommand::Flip => {
                if self.flip(speech) {
                    DeckEffect::Flipped
                } else {
                    DeckEffect::Unchanged
                }
            }
            DeckCommand::RemoveCurrent => match self.remove_current(saved) {
                Some(word) => DeckEffect::Removed(word),
                None => DeckEffect::Unchanged,
            },
        }
    }

    /// Deck in a given order, as if the user had shuffled into it
    #[cfg(test)]
    fn with_order(order: Vec<VocabularyWord>) -> Self {
        let mut deck = Self {
            order,
            ..Self::default()
        };
        deck.sync_card();
        deck
    }

    /// A different visible word gets a fresh card
    fn sync_card(&mut self) {
        let word = self.order.get(self.current);
        if !self.card.is_for(word) {
            self.card = Flashcard::new(word);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn word(w: &str) -> VocabularyWord {
        VocabularyWord::new(w, format!("{w}-tr"), format!("A sentence with {w}."))
    }

    fn saved(words: &[&str]) -> SavedWordSet {
        words.iter().map(|w| word(w)).collect()
    }

    fn keys(deck: &FlashcardDeck) -> Vec<String> {
        deck.words().iter().map(|w| w.word.clone()).collect()
    }

    #[derive(Default)]
    struct FakeSpeech {
        speaking: AtomicBool,
    }

    impl SpeechCue for FakeSpeech {
        fn speak(&self, _text: &str) {
            self.speaking.store(true, Ordering::SeqCst);
        }

        fn is_speaking(&self) -> bool {
            self.speaking.load(Ordering::SeqCst)
        }

        fn is_supported(&self) -> bool {
            true
        }
    }

    #[test]
    fn reconcile_mirrors_saved_order_initially() {
        let deck = FlashcardDeck::from_saved(&saved(&["a", "b", "c"]));
        assert_eq!(keys(&deck), vec!["a", "b", "c"]);
        assert_eq!(deck.current_index(), 0);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let set = saved(&["a", "b", "c", "d"]);
        let mut deck = FlashcardDeck::from_saved(&set);
        deck.shuffle_with(&mut StdRng::seed_from_u64(7));
        deck.reconcile(&set);
        let once = keys(&deck);
        deck.reconcile(&set);
        assert_eq!(keys(&deck), once);
    }

    #[test]
    fn reconcile_keeps_retained_order_and_appends_new() {
        let mut deck =
            FlashcardDeck::with_order(vec![word("d"), word("b"), word("a"), word("c")]);

        deck.reconcile(&saved(&["a", "c", "e", "d", "f"]));
        assert_eq!(keys(&deck), vec!["d", "a", "c", "e", "f"]);
    }

    #[test]
    fn reconcile_matches_membership_case_insensitively() {
        let mut deck = FlashcardDeck::from_saved(&saved(&["Audit", "Budget"]));
        deck.reconcile(&saved(&["audit", "BUDGET", "Cash"]));
        assert_eq!(keys(&deck), vec!["Audit", "Budget", "Cash"]);
    }

    #[test]
    fn reconcile_membership_equals_saved_for_any_start() {
        let starts = [vec![], vec!["x", "a"], vec!["c", "b", "a", "z"]];
        let set = saved(&["a", "b", "c"]);
        for start in starts {
            let mut deck = FlashcardDeck::with_order(start.iter().map(|w| word(w)).collect());
            deck.reconcile(&set);

            let mut got = keys(&deck);
            got.sort();
            assert_eq!(got, vec!["a", "b", "c"]);
        }
    }

    #[test]
    fn reconcile_clamps_index() {
        let mut deck = FlashcardDeck::from_saved(&saved(&["a", "b", "c"]));
        deck.next();
        deck.next();
        deck.reconcile(&saved(&["a"]));
        assert_eq!(deck.current_index(), 0);
        assert_eq!(deck.current_word().map(|w| w.word.as_str()), Some("a"));

        deck.reconcile(&SavedWordSet::new());
        assert!(deck.is_empty());
        assert_eq!(deck.current_index(), 0);
        assert_eq!(deck.current_word(), None);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let set = saved(&["a", "b", "c", "d", "e", "f"]);
        let mut deck = FlashcardDeck::from_saved(&set);
        deck.next();
        deck.shuffle_with(&mut StdRng::seed_from_u64(42));

        assert_eq!(deck.len(), 6);
        assert_eq!(deck.current_index(), 0);
        let mut got = keys(&deck);
        got.sort();
        assert_eq!(got, vec!["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn shuffle_on_empty_deck_is_harmless() {
        let mut deck = FlashcardDeck::new();
        deck.shuffle();
        assert!(deck.is_empty());
        assert_eq!(deck.current_index(), 0);
    }

    #[test]
    fn navigation_wraps_around() {
        let mut deck = FlashcardDeck::from_saved(&saved(&["a", "b", "c"]));
        deck.next();
        deck.next();
        assert_eq!(deck.current_index(), 2);
        deck.next();
        assert_eq!(deck.current_index(), 0);
        deck.previous();
        assert_eq!(deck.current_index(), 2);
    }

    #[test]
    fn navigation_on_empty_deck_is_a_no_op() {
        let mut deck = FlashcardDeck::new();
        deck.next();
        deck.previous();
        assert_eq!(deck.current_index(), 0);
        assert_eq!(deck.position(), (0, 0));
    }

    #[test]
    fn removing_last_entry_repairs_index() {
        let mut set = saved(&["a", "b", "c", "d", "e"]);
        let mut deck = FlashcardDeck::from_saved(&set);
        deck.previous();
        assert_eq!(deck.current_index(), 4);

        let removed = deck.remove_current(&mut set);
        assert_eq!(removed.map(|w| w.word), Some("e".to_string()));
        assert_eq!(deck.current_index(), 3);
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn removing_only_entry_empties_deck() {
        let mut set = saved(&["solo"]);
        let mut deck = FlashcardDeck::from_saved(&set);
        assert!(deck.remove_current(&mut set).is_some());
        assert!(deck.is_empty());
        assert!(set.is_empty());
        assert_eq!(deck.current_index(), 0);
        assert_eq!(deck.remove_current(&mut set), None);
    }

    #[test]
    fn flip_is_suppressed_while_speaking() {
        let speech = FakeSpeech::default();
        let mut deck = FlashcardDeck::from_saved(&saved(&["a"]));

        assert!(deck.flip(&speech));
        assert_eq!(deck.face(), CardFace::Back);

        speech.speak("a");
        assert!(!deck.flip(&speech));
        assert_eq!(deck.face(), CardFace::Back);
    }

    #[test]
    fn moving_to_another_word_shows_its_front() {
        let speech = FakeSpeech::default();
        let mut deck = FlashcardDeck::from_saved(&saved(&["a", "b"]));
        deck.flip(&speech);
        deck.next();
        assert_eq!(deck.face(), CardFace::Front);
    }

    #[test]
    fn reconcile_keeps_flip_state_of_unchanged_card() {
        let speech = FakeSpeech::default();
        let mut deck = FlashcardDeck::from_saved(&saved(&["a", "b"]));
        deck.flip(&speech);
        deck.reconcile(&saved(&["a", "b", "c"]));
        assert_eq!(deck.face(), CardFace::Back);
    }

    #[test]
    fn apply_reports_removals() {
        let speech = FakeSpeech::default();
        let mut set = saved(&["a", "b"]);
        let mut deck = FlashcardDeck::from_saved(&set);

        assert_eq!(
            deck.apply(DeckCommand::Next, &mut set, &speech),
            DeckEffect::Moved
        );
        assert_eq!(
            deck.apply(DeckCommand::RemoveCurrent, &mut set, &speech),
            DeckEffect::Removed(word("b"))
        );
        assert_eq!(keys(&deck), vec!["a"]);

        let mut empty = SavedWordSet::new();
        let mut deck = FlashcardDeck::new();
        assert_eq!(
            deck.apply(DeckCommand::Flip, &mut empty, &speech),
            DeckEffect::Unchanged
        );
    }

    #[test]
    fn end_to_end_remove_then_add() {
        let mut set = saved(&["A", "B", "C"]);
        let mut deck = FlashcardDeck::from_saved(&set);
        assert_eq!(keys(&deck), vec!["A", "B", "C"]);
        assert_eq!(deck.current_index(), 0);

        deck.next();
        deck.remove_current(&mut set);
        assert_eq!(keys(&deck), vec!["A", "C"]);
        assert_eq!(deck.current_index(), 1);
        assert_eq!(deck.current_word().map(|w| w.word.as_str()), Some("C"));

        set.insert(word("D"));
        deck.reconcile(&set);
        assert_eq!(keys(&deck), vec!["A", "C", "D"]);
    }
}
