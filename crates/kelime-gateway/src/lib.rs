use kelime_types::{VocabularyWord, WordDetails};

mod gemini;
mod parse;
mod prompt;

pub use gemini::GeminiGateway;
pub use parse::{parse_details, parse_vocabulary, retain_new_words};

/// Remote vocabulary provider interface
#[async_trait::async_trait]
pub trait VocabularyGateway: Send + Sync {
    /// Generate a batch of words for a profession, skipping `exclude_words`
    async fn generate_vocabulary(
        &self,
        profession: &str,
        exclude_words: &[String],
    ) -> Result<Vec<VocabularyWord>, GenerationError>;

    /// Fetch the detail record of a word in the context of a profession
    async fn word_details(
        &self,
        word: &VocabularyWord,
        profession: &str,
    ) -> Result<WordDetails, DetailFetchError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub model: String,
    pub requires_api_key: bool,
}

/// Zero words is a valid answer, kept apart from failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Words(Vec<VocabularyWord>),
    Empty,
}

impl From<Vec<VocabularyWord>> for GenerationOutcome {
    fn from(words: Vec<VocabularyWord>) -> Self {
        if words.is_empty() {
            GenerationOutcome::Empty
        } else {
            GenerationOutcome::Words(words)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Authentication error")]
    Authentication,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl GenerationError {
    /// Message shown to the user
    pub fn user_message(&self) -> &'static str {
        "Failed to generate vocabulary. Please try again later."
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DetailFetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Authentication error")]
    Authentication,

    #[error("Empty response from the details API")]
    EmptyResponse,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl DetailFetchError {
    /// Message shown to the user
    pub fn user_message(&self) -> &'static str {
        "Kelime detayları alınamadı. Lütfen tekrar deneyin."
    }
}

/// Failure of the HTTP exchange itself, before any payload is looked at
#[derive(Debug, thiserror::Error)]
pub(crate) enum CallError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Authentication error")]
    Authentication,
}

impl From<CallError> for GenerationError {
    fn from(err: CallError) -> Self {
        match err {
            CallError::Network(e) => GenerationError::Network(e),
            CallError::Api(msg) => GenerationError::Api(msg),
            CallError::Authentication => GenerationError::Authentication,
        }
    }
}

impl From<CallError> for DetailFetchError {
    fn from(err: CallError) -> Self {
        match err {
            CallError::Network(e) => DetailFetchError::Network(e),
            CallError::Api(msg) => DetailFetchError::Api(msg),
            CallError::Authentication => DetailFetchError::Authentication,
        }
    }
}
