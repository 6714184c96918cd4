use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use kelime_gateway::{DetailFetchError, GenerationError};
use kelime_types::{AppEvent, VocabularyWord, WordDetails};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::session::Session;
use crate::state::AppState;

pub mod deck;
pub mod details;
pub mod generate;
pub mod words;

use deck::{handle_deck_command, handle_key, handle_speak};
use details::{handle_close_details, handle_details_fetched, handle_show_details};
use generate::{handle_generate, handle_generated, handle_load_more};
use words::{handle_switch_view, handle_toggle_save};

/// Result of a remote call, fed back into the event loop
#[derive(Debug)]
pub enum Completion {
    Generated {
        request: Uuid,
        result: Result<Vec<VocabularyWord>, GenerationError>,
    },
    Details {
        session: Uuid,
        result: Result<WordDetails, DetailFetchError>,
    },
}

/// Bundles what every handler needs
#[derive(Clone)]
pub struct EventContext {
    pub state: Arc<AppState>,
    pub app_to_ui_tx: AsyncSender<AppEvent>,
    pub completion_tx: AsyncSender<Completion>,
}

impl EventContext {
    pub fn new(
        state: Arc<AppState>,
        app_to_ui_tx: AsyncSender<AppEvent>,
        completion_tx: AsyncSender<Completion>,
    ) -> Self {
        Self {
            state,
            app_to_ui_tx,
            completion_tx,
        }
    }

    pub async fn send(&self, event: AppEvent) -> anyhow::Result<()> {
        self.app_to_ui_tx.send(event).await?;
        Ok(())
    }

    /// Write the saved words back, reporting failures to the user
    pub async fn persist(&self, session: &Session) -> anyhow::Result<()> {
        if session.store_locked {
            tracing::warn!("Saved words not written, the slot was unreadable at startup");
            return Ok(());
        }

        if let Err(e) = self.state.store.write(&session.saved) {
            tracing::error!("Failed to persist saved words: {}", e);
            self.send(AppEvent::Error(format!("Could not save your words: {e}")))
                .await?;
        }
        Ok(())
    }
}

/// App's main loop. Owns the session, so every handler runs to completion
/// before the next event is looked at.
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let capacity = state.config.read().await.channel_capacity;
    let (completion_tx, completion_rx) = kanal::bounded_async(capacity);

    let mut session = Session::load(state.store.as_ref());
    let ctx = EventContext::new(state, app_to_ui_tx, completion_tx);

    tracing::info!(
        "[EVENT_LOOP] Starting with {} saved words",
        session.saved.len()
    );
    ctx.send(session.current_view()).await?;
    if let Some(message) = session.error.clone() {
        ctx.send(AppEvent::Error(message)).await?;
    }

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled");
                break;
            }
            event = ui_to_app_rx.recv() => {
                let event = event?;
                tracing::debug!(
                    "[EVENT_LOOP] EVENT RECEIVED: {:?}",
                    std::mem::discriminant(&event)
                );
                if matches!(event, AppEvent::Quit) {
                    tracing::info!("[EVENT_LOOP] Quit requested");
                    cancel.cancel();
                    break;
                }
                handle_events(&ctx, &mut session, event).await?;
            }
            completion = completion_rx.recv() => {
                handle_completion(&ctx, &mut session, completion?).await?;
            }
        }
    }

    Ok(())
}

async fn handle_events(
    ctx: &EventContext,
    session: &mut Session,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::Generate(profession) => handle_generate(ctx, session, profession).await?,
        AppEvent::LoadMore => handle_load_more(ctx, session).await?,
        AppEvent::ToggleSave(index) => handle_toggle_save(ctx, session, index).await?,
        AppEvent::ShowDetails(target) => handle_show_details(ctx, session, target).await?,
        AppEvent::CloseDetails => handle_close_details(ctx, session).await?,
        AppEvent::SwitchView(view) => handle_switch_view(ctx, session, view).await?,
        AppEvent::Deck(command) => handle_deck_command(ctx, session, command).await?,
        AppEvent::Key { key, focus } => handle_key(ctx, session, key, focus).await?,
        AppEvent::Speak(target) => handle_speak(ctx, session, target).await?,
        AppEvent::Quit => {}
        // UI-only events, ignore in backend
        AppEvent::ShowVocabulary { .. }
        | AppEvent::ShowCard(_)
        | AppEvent::ShowEmptyDeck
        | AppEvent::ShowWordDetails { .. }
        | AppEvent::Loading(_)
        | AppEvent::Status(_)
        | AppEvent::Notice(_)
        | AppEvent::Error(_) => {
            tracing::warn!("UI event sent to the backend, ignoring");
        }
    }

    Ok(())
}

async fn handle_completion(
    ctx: &EventContext,
    session: &mut Session,
    completion: Completion,
) -> anyhow::Result<()> {
    match completion {
        Completion::Generated { request, result } => {
            handle_generated(ctx, session, request, result).await
        }
        Completion::Details {
            session: id,
            result,
        } => handle_details_fetched(ctx, session, id, result).await,
    }
}
