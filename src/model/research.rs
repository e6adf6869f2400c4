//! Wire types for the research (chat completion) API

use serde::{Deserialize, Serialize};

/// Chat completion request body
#[derive(Debug, Clone, Serialize)]
pub struct ResearchRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub return_citations: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

// Strict response schema: every field below must be present for the
// response to be accepted, except `delta` (only populated when streaming)
// and `message.content` (its absence is reported separately as empty content).
#[derive(Debug, Clone, Deserialize)]
pub struct ResearchResponse {
    pub id: String,
    pub model: String,
    pub object: String,
    pub created: i64,
    pub citations: Vec<String>,
    pub choices: Vec<ResearchChoice>,
    pub usage: ResearchUsage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResearchChoice {
    pub index: u32,
    pub finish_reason: String,
    pub message: ResearchMessage,
    #[serde(default)]
    pub delta: Option<ResearchDelta>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResearchMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResearchDelta {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResearchUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// Validated research output handed to the parsing stages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchOutput {
    pub content: String,
    pub citations: Vec<String>,
}
