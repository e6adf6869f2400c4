//! Research API client (Perplexity chat completions)
//!
//! Sends the criteria prompt with citation return enabled and validates the raw
//! response against a strict schema before anything is parsed.

use async_trait::async_trait;
use reqwest::Client;

use crate::model::ResearchConfig;
use crate::model::research::{ChatMessage, ResearchOutput, ResearchRequest, ResearchResponse};

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ResearchError {
    #[error("Research API returned {status}: {body}")]
    ExternalService { status: u16, body: String },

    #[error("Malformed research API response: {0}")]
    MalformedResponse(String),

    #[error("No content returned from research API")]
    EmptyContent,

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
}

/// Source of objective criteria research
#[async_trait]
pub trait ResearchClient: Send + Sync {
    /// Run a research query and return the answer text with its citations
    async fn research(&self, system_prompt: &str, query: &str)
    -> Result<ResearchOutput, ResearchError>;
}

/// Client for the Perplexity chat completion API
pub struct PerplexityClient {
    client: Client,
    api_key: String,
    config: ResearchConfig,
}

impl PerplexityClient {
    pub fn new(api_key: impl Into<String>, config: ResearchConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            config,
        }
    }
}

#[async_trait]
impl ResearchClient for PerplexityClient {
    async fn research(
        &self,
        system_prompt: &str,
        query: &str,
    ) -> Result<ResearchOutput, ResearchError> {
        let url = self.config.completions_url();
        let request = ResearchRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: query,
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            return_citations: true,
        };

        tracing::debug!(
            url = %url,
            model = %self.config.model,
            query_length = query.len(),
            "Sending research request"
        );

        let start_time = std::time::Instant::now();

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                elapsed_ms = start_time.elapsed().as_millis(),
                "Research API call failed"
            );
            return Err(ResearchError::ExternalService {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let output = parse_research_response(&body)?;

        tracing::info!(
            model = %self.config.model,
            elapsed_ms = start_time.elapsed().as_millis(),
            content_length = output.content.len(),
            citation_count = output.citations.len(),
            "Research API call completed successfully"
        );

        Ok(output)
    }
}

/// Validate a raw response body and pull out the first choice's content
pub fn parse_research_response(body: &str) -> Result<ResearchOutput, ResearchError> {
    let response: ResearchResponse = serde_json::from_str(body)
        .map_err(|e| ResearchError::MalformedResponse(e.to_string()))?;

    tracing::debug!(
        id = %response.id,
        model = %response.model,
        choices = response.choices.len(),
        total_tokens = response.usage.total_tokens,
        "Research response validated"
    );

    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.is_empty())
        .ok_or(ResearchError::EmptyContent)?;

    Ok(ResearchOutput {
        content,
        citations: response.citations,
    })
}
