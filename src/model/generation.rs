//! LLM-extractable models for scoring, options, response suggestions and
//! interest statement coaching

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Extracted evaluation of one interest statement
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedScore {
    /// Score between 0-100 evaluating the interests based on clarity, completeness, and usefulness for negotiation
    pub score: i64,
    /// A concise explanation (within 30 words) of the score
    pub reasoning: String,
}

/// Extracted list of negotiation options
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedOptions {
    /// List of negotiation options that could benefit both parties
    pub options: Vec<String>,
}

/// One way of answering the other party
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, ToSchema)]
pub struct ExtractedSuggestion {
    /// A short title describing the approach of this response
    pub title: String,
    /// The suggested response text
    pub content: String,
    /// Brief explanation of why this response is effective
    pub reasoning: String,
}

/// Extracted set of response suggestions
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedSuggestions {
    /// Exactly three response suggestions with distinct approaches
    pub suggestions: Vec<ExtractedSuggestion>,
}

/// Extracted coaching question for an interest statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, ToSchema)]
pub struct ExtractedQuestion {
    /// A critical question that would help improve the current interest statement the most
    pub question: String,
    /// Brief explanation (within 20 words) of why this question is important for improving the statement
    pub explanation: String,
}

/// Extracted rewrite of an interest statement
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedStatement {
    /// An improved version of the interest statement that incorporates the new information
    pub enhanced_statement: String,
}
