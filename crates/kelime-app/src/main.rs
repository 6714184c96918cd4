use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use kelime_core::{SilentSpeech, SpeechCue};
use kelime_gateway::{GeminiGateway, VocabularyGateway};
use kelime_store::JsonWordStore;
use tokio::signal;
use tracing_subscriber::EnvFilter;

mod controller;
mod events;
mod profile;
mod session;
mod speech;
mod state;
mod ui;


use self::controller::AppController;
use self::speech::CommandSpeech;
use self::state::AppState;

#[derive(Parser)]
#[command(name = "kelime", about = "Profession based English vocabulary trainer", version)]
struct Cli {
    /// Profile to load from the config folder
    #[arg(long, default_value = "main")]
    profile: String,

    /// Config folder (default: platform config dir)
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Folder holding the saved words
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Generate words for this profession right away
    #[arg(long, short)]
    profession: Option<String>,

    /// Disable text to speech
    #[arg(long)]
    no_speech: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let root = cli.config_dir.unwrap_or_else(profile::default_root);
    profile::init_user_config(&root)?;
    let mut config = profile::load_user_profile(&root, &cli.profile)?;

    if let Some(data_dir) = cli.data_dir {
        config.storage.data_dir = data_dir;
    }
    if cli.no_speech {
        config.speech.enabled = false;
    }

    let store = Arc::new(JsonWordStore::new(config.storage.slot_path()));
    tracing::info!("Saved words at {}", store.path().display());

    let gateway: Arc<dyn VocabularyGateway> = Arc::new(GeminiGateway::new(&config.gateway));
    let provider = gateway.metadata();
    tracing::info!("Vocabulary from {} ({})", provider.name, provider.model);
    if provider.requires_api_key && config.gateway.api_key.is_empty() {
        tracing::warn!("No API key set, set GEMINI_API_KEY to generate words");
    }

    let speech: Arc<dyn SpeechCue> = if config.speech.enabled {
        Arc::new(CommandSpeech::new(&config.speech))
    } else {
        Arc::new(SilentSpeech)
    };

    let capacity = config.channel_capacity.max(1);
    let state = Arc::new(AppState::new(config, store, gateway, speech));

    // Shutdown future (Ctrl+C)
    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl+c: {e}");
            std::future::pending::<()>().await;
        }
    };

    run(state, capacity, cli.profession, shutdown).await
}

pub async fn run(
    state: Arc<AppState>,
    capacity: usize,
    initial_profession: Option<String>,
    shutdown: impl Future<Output = ()>,
) -> anyhow::Result<()> {
    let controller = AppController::new(state, capacity);
    let mut tasks = controller.spawn_tasks(initial_profession);

    tokio::select! {
        _ = shutdown => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("Task finished, shutting down"),
                Ok(Err(e)) => tracing::error!("Task exited: {e}"),
                Err(e) => tracing::error!("Task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        match result {
            Ok(Err(e)) => tracing::debug!("Task exited during shutdown: {e}"),
            Err(e) => tracing::error!("Task panicked: {e}"),
            Ok(Ok(())) => {}
        }
    }

    Ok(())
}
