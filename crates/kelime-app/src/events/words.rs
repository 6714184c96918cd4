use kelime_types::{AppEvent, View};

use crate::events::EventContext;
use crate::session::Session;

/// Save or unsave a word of the current batch
pub async fn handle_toggle_save(
    ctx: &EventContext,
    session: &mut Session,
    index: usize,
) -> anyhow::Result<()> {
    let Some(word) = session.vocabulary.get(index).cloned() else {
        ctx.send(AppEvent::Error("There is no such word.".to_string()))
            .await?;
        return Ok(());
    };

    let saved = session.saved.toggle(&word);
    ctx.persist(session).await?;
    session.deck.reconcile(&session.saved);

    tracing::info!(
        "{} '{}' ({} saved)",
        if saved { "Saved" } else { "Unsaved" },
        word.word,
        session.saved.len()
    );

    ctx.send(session.current_view()).await?;
    Ok(())
}

pub async fn handle_switch_view(
    ctx: &EventContext,
    session: &mut Session,
    view: View,
) -> anyhow::Result<()> {
    session.view = view;
    if view == View::MyWords {
        session.deck.reconcile(&session.saved);
    }

    ctx.send(session.current_view()).await?;
    Ok(())
}
