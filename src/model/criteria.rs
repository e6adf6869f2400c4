use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Relevance text used when a block carries no `Relevance` field
pub const DEFAULT_RELEVANCE: &str =
    "This criterion is relevant to the negotiation topic and interests of both parties.";

/// Title of the single criterion substituted when structured extraction finds nothing
pub const FALLBACK_TITLE: &str = "Objective Criterion";

// One objective standard recovered from the research output
// - title: short label
// - description: the standard itself, or the block body as prose
// - source: a citation URL, always one of ExtractionResult::citations
// - relevance: why both parties could accept it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Criterion {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub relevance: String,
}

/// Structured output of the objective criteria pipeline, persisted per project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ExtractionResult {
    pub criteria: Vec<Criterion>,
    /// The exact prompt sent to the research API
    pub search_query: String,
    /// Citation URLs in the order the research API returned them
    pub citations: Vec<String>,
    /// Sanitized research output, kept for debugging and fallback display
    pub raw_content: String,
}
