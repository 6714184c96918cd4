use kelime_gateway::{GenerationError, GenerationOutcome};
use kelime_types::{AppEvent, Notice, View, VocabularyWord};
use uuid::Uuid;

use crate::events::{Completion, EventContext};
use crate::session::{GenerationMode, PendingGeneration, Session};

pub async fn handle_generate(
    ctx: &EventContext,
    session: &mut Session,
    profession: String,
) -> anyhow::Result<()> {
    let profession = profession.trim().to_string();
    if profession.is_empty() {
        tracing::debug!("Ignoring empty profession");
        return Ok(());
    }
    if session.is_loading() {
        tracing::debug!("Generation already running, ignoring '{}'", profession);
        return Ok(());
    }

    session.profession = profession;
    session.vocabulary.clear();
    session.error = None;
    ctx.send(session.vocabulary_view()).await?;

    start_generation(ctx, session, GenerationMode::Replace).await
}

pub async fn handle_load_more(ctx: &EventContext, session: &mut Session) -> anyhow::Result<()> {
    if session.profession.is_empty() || session.is_loading() {
        tracing::debug!("Nothing to load more for");
        return Ok(());
    }

    session.error = None;
    start_generation(ctx, session, GenerationMode::Append).await
}

async fn start_generation(
    ctx: &EventContext,
    session: &mut Session,
    mode: GenerationMode,
) -> anyhow::Result<()> {
    let request = Uuid::new_v4();
    let exclude = session.exclusions(mode);
    let profession = session.profession.clone();

    session.generation = Some(PendingGeneration { id: request, mode });
    ctx.send(AppEvent::Loading(true)).await?;

    tracing::info!(
        "Requesting vocabulary for '{}' ({:?}, {} excluded)",
        profession,
        mode,
        exclude.len()
    );

    let gateway = ctx.state.gateway.clone();
    let tx = ctx.completion_tx.clone();
    tokio::spawn(async move {
        let result = gateway.generate_vocabulary(&profession, &exclude).await;
        if let Err(e) = tx.send(Completion::Generated { request, result }).await {
            tracing::error!("Failed to deliver generated vocabulary: {}", e);
        }
    });

    Ok(())
}

pub async fn handle_generated(
    ctx: &EventContext,
    session: &mut Session,
    request: Uuid,
    result: Result<Vec<VocabularyWord>, GenerationError>,
) -> anyhow::Result<()> {
    let mode = match session.generation {
        Some(pending) if pending.id == request => pending.mode,
        _ => {
            tracing::debug!("Discarding stale generation result {}", request);
            return Ok(());
        }
    };

    session.generation = None;
    ctx.send(AppEvent::Loading(false)).await?;

    match result.map(GenerationOutcome::from) {
        Ok(GenerationOutcome::Words(words)) => {
            tracing::info!("Received {} words", words.len());
            match mode {
                GenerationMode::Replace => session.vocabulary = words,
                GenerationMode::Append => session.vocabulary.extend(words),
            }
        }
        Ok(GenerationOutcome::Empty) => {
            tracing::warn!("No new words for '{}'", session.profession);
            ctx.send(AppEvent::Notice(Notice::EmptyResult {
                profession: session.profession.clone(),
            }))
            .await?;
        }
        Err(e) => {
            tracing::error!("Vocabulary generation failed: {}", e);
            let message = e.user_message().to_string();
            session.error = Some(message.clone());
            ctx.send(AppEvent::Error(message)).await?;
        }
    }

    if session.view == View::Learn {
        ctx.send(session.vocabulary_view()).await?;
    }

    Ok(())
}
