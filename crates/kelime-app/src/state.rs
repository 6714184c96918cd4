use std::sync::Arc;

use kelime_config::Config;
use kelime_core::{SpeechCue, WordStore};
use kelime_gateway::VocabularyGateway;
use tokio::sync::RwLock;

/// Long-lived collaborators shared by the app's tasks
pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub store: Arc<dyn WordStore>,
    pub gateway: Arc<dyn VocabularyGateway>,
    pub speech: Arc<dyn SpeechCue>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn WordStore>,
        gateway: Arc<dyn VocabularyGateway>,
        speech: Arc<dyn SpeechCue>,
    ) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            store,
            gateway,
            speech,
        }
    }
}
