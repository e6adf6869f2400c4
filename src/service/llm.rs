//! Shared LLM client for structured generation

use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::providers::openai;
use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::model::generation::{
    ExtractedOptions, ExtractedQuestion, ExtractedScore, ExtractedStatement, ExtractedSuggestions,
};

/// Environment variable for the generation model (defaults to gpt-4o-mini if not set)
const ENV_NEGOTIATION_MODEL: &str = "NEGOTIATION_MODEL";

const DEFAULT_MODEL: &str = openai::GPT_4O_MINI;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LlmError {
    #[error("LLM extraction failed: {0}")]
    ExtractionFailed(String),
}

/// Structured generation used by the negotiation services
#[async_trait]
pub trait NegotiationLlm: Send + Sync {
    async fn score_interests(&self, preamble: &str, prompt: &str)
    -> Result<ExtractedScore, LlmError>;

    async fn generate_options(
        &self,
        preamble: &str,
        prompt: &str,
    ) -> Result<ExtractedOptions, LlmError>;

    async fn suggest_responses(
        &self,
        preamble: &str,
        prompt: &str,
    ) -> Result<ExtractedSuggestions, LlmError>;

    async fn enhancement_question(
        &self,
        preamble: &str,
        prompt: &str,
    ) -> Result<ExtractedQuestion, LlmError>;

    async fn enhance_statement(
        &self,
        preamble: &str,
        prompt: &str,
    ) -> Result<ExtractedStatement, LlmError>;
}

/// Shared LLM client wrapper
#[derive(Clone)]
pub struct LlmClient {
    client: openai::Client,
    model: String,
}

impl LlmClient {
    /// Create a new LLM client with the provided API key
    /// Optionally uses NEGOTIATION_MODEL env var (defaults to gpt-4o-mini).
    pub fn new(api_key: &str) -> Result<Self, String> {
        let client = openai::Client::new(api_key)
            .map_err(|e| format!("Failed to create OpenAI client: {}", e))?;
        let model =
            std::env::var(ENV_NEGOTIATION_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        tracing::info!(model = %model, "LLM client initialized");

        Ok(Self { client, model })
    }

    /// Name of the model every extraction is sent to
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn extract<T>(&self, preamble: &str, prompt: &str, kind: &str) -> Result<T, LlmError>
    where
        T: JsonSchema + DeserializeOwned + Serialize + Send + Sync + 'static,
    {
        tracing::debug!(
            model = %self.model,
            kind = kind,
            prompt_length = prompt.len(),
            "Initiating OpenAI API call"
        );

        let start_time = std::time::Instant::now();

        let extractor = self
            .client
            .extractor::<T>(&self.model)
            .preamble(preamble)
            .additional_params(serde_json::json!({
                "temperature": 0.0,
                "seed": 42
            }))
            .build();

        match extractor.extract(prompt).await {
            Ok(result) => {
                tracing::info!(
                    model = %self.model,
                    kind = kind,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    "OpenAI API call completed successfully"
                );
                Ok(result)
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model,
                    kind = kind,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    error = %e,
                    "OpenAI API call failed"
                );
                Err(LlmError::ExtractionFailed(e.to_string()))
            }
        }
    }
}

#[async_trait]
impl NegotiationLlm for LlmClient {
    async fn score_interests(
        &self,
        preamble: &str,
        prompt: &str,
    ) -> Result<ExtractedScore, LlmError> {
        self.extract(preamble, prompt, "score").await
    }

    async fn generate_options(
        &self,
        preamble: &str,
        prompt: &str,
    ) -> Result<ExtractedOptions, LlmError> {
        self.extract(preamble, prompt, "options").await
    }

    async fn suggest_responses(
        &self,
        preamble: &str,
        prompt: &str,
    ) -> Result<ExtractedSuggestions, LlmError> {
        self.extract(preamble, prompt, "suggestions").await
    }

    async fn enhancement_question(
        &self,
        preamble: &str,
        prompt: &str,
    ) -> Result<ExtractedQuestion, LlmError> {
        self.extract(preamble, prompt, "enhancement_question").await
    }

    async fn enhance_statement(
        &self,
        preamble: &str,
        prompt: &str,
    ) -> Result<ExtractedStatement, LlmError> {
        self.extract(preamble, prompt, "enhanced_statement").await
    }
}
