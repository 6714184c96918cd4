use kelime_core::{DeckEffect, bind};
use kelime_types::{AppEvent, DeckCommand, Focus, Key, SpeakTarget, View};

use crate::events::EventContext;
use crate::session::Session;

pub async fn handle_deck_command(
    ctx: &EventContext,
    session: &mut Session,
    command: DeckCommand,
) -> anyhow::Result<()> {
    let effect = session
        .deck
        .apply(command, &mut session.saved, ctx.state.speech.as_ref());

    match effect {
        DeckEffect::Removed(word) => {
            tracing::info!("Removed '{}' from saved words", word.word);
            ctx.persist(session).await?;
            ctx.send(AppEvent::Status(format!("Removed '{}'.", word.word)))
                .await?;
        }
        DeckEffect::Unchanged if command == DeckCommand::Flip => {
            tracing::debug!("Flip ignored");
        }
        _ => {}
    }

    if session.view == View::MyWords {
        ctx.send(session.deck_view()).await?;
    }
    Ok(())
}

/// Keyboard input on the flashcard view
pub async fn handle_key(
    ctx: &EventContext,
    session: &mut Session,
    key: Key,
    focus: Focus,
) -> anyhow::Result<()> {
    if session.view != View::MyWords {
        return Ok(());
    }

    match bind(key, focus) {
        Some(binding) => handle_deck_command(ctx, session, binding.command).await,
        None => Ok(()),
    }
}

pub async fn handle_speak(
    ctx: &EventContext,
    session: &mut Session,
    target: SpeakTarget,
) -> anyhow::Result<()> {
    let Some(word) = session.deck.current_word() else {
        return Ok(());
    };

    let speech = ctx.state.speech.as_ref();
    if !speech.is_supported() {
        ctx.send(AppEvent::Status("Speech is not available.".to_string()))
            .await?;
        return Ok(());
    }

    let text = match target {
        SpeakTarget::Word => &word.word,
        SpeakTarget::Sentence => &word.sentence,
    };
    speech.speak(text);
    Ok(())
}
