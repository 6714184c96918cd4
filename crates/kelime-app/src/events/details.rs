use kelime_gateway::DetailFetchError;
use kelime_types::{AppEvent, DetailTarget, WordDetails};
use uuid::Uuid;

use crate::events::{Completion, EventContext};
use crate::session::{DetailSession, Session};

pub async fn handle_show_details(
    ctx: &EventContext,
    session: &mut Session,
    target: DetailTarget,
) -> anyhow::Result<()> {
    let word = match target {
        DetailTarget::Batch(index) => session.vocabulary.get(index).cloned(),
        DetailTarget::CurrentCard => session.deck.current_word().cloned(),
    };

    let Some(word) = word else {
        tracing::debug!("No word for {:?}", target);
        ctx.send(AppEvent::Error("There is no such word.".to_string()))
            .await?;
        return Ok(());
    };

    // Opening a new session abandons any request still in flight
    let id = Uuid::new_v4();
    session.detail = Some(DetailSession {
        id,
        word: word.clone(),
        details: None,
        error: None,
    });
    ctx.send(AppEvent::Status(format!(
        "Preparing details for '{}'...",
        word.word
    )))
    .await?;

    let gateway = ctx.state.gateway.clone();
    let tx = ctx.completion_tx.clone();
    let profession = session.profession.clone();
    tokio::spawn(async move {
        let result = gateway.word_details(&word, &profession).await;
        if let Err(e) = tx.send(Completion::Details { session: id, result }).await {
            tracing::error!("Failed to deliver word details: {}", e);
        }
    });

    Ok(())
}

pub async fn handle_close_details(
    _ctx: &EventContext,
    session: &mut Session,
) -> anyhow::Result<()> {
    if let Some(detail) = session.detail.take() {
        tracing::debug!("Closed details for '{}'", detail.word.word);
    }
    Ok(())
}

pub async fn handle_details_fetched(
    ctx: &EventContext,
    session: &mut Session,
    id: Uuid,
    result: Result<WordDetails, DetailFetchError>,
) -> anyhow::Result<()> {
    let Some(detail) = session.detail.as_mut().filter(|d| d.id == id) else {
        tracing::debug!("Discarding stale details for session {}", id);
        return Ok(());
    };

    match result {
        Ok(details) => {
            detail.details = Some(details.clone());
            ctx.send(AppEvent::ShowWordDetails {
                word: detail.word.clone(),
                details,
            })
            .await?;
        }
        Err(e) => {
            tracing::error!("Detail fetch for '{}' failed: {}", detail.word.word, e);
            let message = e.user_message().to_string();
            detail.error = Some(message.clone());
            ctx.send(AppEvent::Error(message)).await?;
        }
    }

    Ok(())
}
