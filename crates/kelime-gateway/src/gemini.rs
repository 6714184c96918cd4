use std::time::Duration;

use async_trait::async_trait;
use kelime_config::gateway::GatewayConfig;
use kelime_types::{VocabularyWord, WordDetails};
use serde_json::Value;

use crate::parse::{GenerateContentResponse, parse_details, parse_vocabulary, retain_new_words};
use crate::prompt::{
    DETAILS_SYSTEM, VOCABULARY_SYSTEM, details_prompt, details_schema, request_body,
    vocabulary_prompt, vocabulary_schema,
};
use crate::{
    CallError, DetailFetchError, GenerationError, ProviderMetadata, VocabularyGateway,
};

/// Gemini `generateContent` backed gateway
#[derive(Clone)]
pub struct GeminiGateway {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
    batch_size: u32,
    example_count: u32,
    timeout: Duration,
}

impl GeminiGateway {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            batch_size: config.batch_size,
            example_count: config.example_count,
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_url, self.model)
    }

    /// Send one request and return the trimmed candidate text
    async fn generate_content(&self, body: Value) -> Result<String, CallError> {
        if self.api_key.is_empty() {
            return Err(CallError::Authentication);
        }

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == 401 || status == 403 {
            return Err(CallError::Authentication);
        }

        if !status.is_success() {
            return Err(CallError::Api(format!("HTTP {}", status)));
        }

        let json: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| CallError::Api(format!("Failed to parse response: {}", e)))?;

        Ok(json.text())
    }
}

#[async_trait]
impl VocabularyGateway for GeminiGateway {
    async fn generate_vocabulary(
        &self,
        profession: &str,
        exclude_words: &[String],
    ) -> Result<Vec<VocabularyWord>, GenerationError> {
        let prompt = vocabulary_prompt(profession, exclude_words, self.batch_size);
        let body = request_body(VOCABULARY_SYSTEM, &prompt, vocabulary_schema());

        tracing::debug!(
            "Generating vocabulary for '{}' excluding {} words",
            profession,
            exclude_words.len()
        );

        let text = self.generate_content(body).await.inspect_err(|e| {
            tracing::error!("Error generating vocabulary from Gemini API: {}", e);
        })?;

        let words = parse_vocabulary(&text).inspect_err(|e| {
            tracing::error!("Unusable vocabulary response: {}", e);
        })?;

        Ok(retain_new_words(words, exclude_words))
    }

    async fn word_details(
        &self,
        word: &VocabularyWord,
        profession: &str,
    ) -> Result<WordDetails, DetailFetchError> {
        let prompt = details_prompt(word, profession, self.example_count);
        let body = request_body(DETAILS_SYSTEM, &prompt, details_schema(self.example_count));

        tracing::debug!("Fetching details for '{}'", word.word);

        let text = self.generate_content(body).await.inspect_err(|e| {
            tracing::error!("Error fetching word details from Gemini API: {}", e);
        })?;

        parse_details(&text).inspect_err(|e| {
            tracing::error!("Unusable details response for '{}': {}", word.word, e);
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Gemini".to_string(),
            model: self.model.clone(),
            requires_api_key: true,
        }
    }
}
