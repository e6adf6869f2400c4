//! Response suggestion service
//!
//! Given the other party's latest message, proposes three differently pitched
//! replies grounded in both parties' interests. Nothing is stored.

use std::sync::Arc;

use crate::model::generation::ExtractedSuggestion;
use crate::service::llm::{LlmError, NegotiationLlm};
use crate::service::projects::{AccessError, ProjectAccess};

pub mod prompts;

use prompts::{SUGGESTIONS_SYSTEM_PROMPT, build_suggestions_prompt};

/// Number of suggestions every response carries
pub const SUGGESTION_COUNT: usize = 3;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SuggestionsError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("The other party's response must not be empty")]
    EmptyResponse,

    #[error(transparent)]
    Generation(#[from] LlmError),

    #[error("Expected 3 suggestions, model returned {0}")]
    WrongCount(usize),
}

/// Service suggesting replies to the other party
pub struct ResponseSuggestionService {
    access: ProjectAccess,
    llm: Arc<dyn NegotiationLlm>,
}

impl ResponseSuggestionService {
    pub fn new(access: ProjectAccess, llm: Arc<dyn NegotiationLlm>) -> Self {
        Self { access, llm }
    }

    /// Suggest three replies to `other_party_response`
    pub async fn suggest_responses(
        &self,
        token: Option<&str>,
        project_id: i64,
        other_party_response: &str,
    ) -> Result<Vec<ExtractedSuggestion>, SuggestionsError> {
        let project = self.access.load_owned(token, project_id).await?;

        let other_party_response = other_party_response.trim();
        if other_party_response.is_empty() {
            return Err(SuggestionsError::EmptyResponse);
        }

        let prompt = build_suggestions_prompt(&project, other_party_response);
        let extracted = self
            .llm
            .suggest_responses(SUGGESTIONS_SYSTEM_PROMPT, &prompt)
            .await?;

        if extracted.suggestions.len() != SUGGESTION_COUNT {
            tracing::warn!(
                project_id = project_id,
                count = extracted.suggestions.len(),
                "Unexpected number of response suggestions"
            );
            return Err(SuggestionsError::WrongCount(extracted.suggestions.len()));
        }

        tracing::info!(project_id = project_id, "Response suggestions generated");

        Ok(extracted.suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::{
        FakeAuth, FakeLlm, InMemoryStore, OTHER_TOKEN, OWNER_TOKEN, project, suggestion,
    };

    fn service(llm: Arc<FakeLlm>) -> ResponseSuggestionService {
        let store = Arc::new(InMemoryStore::with([project(1)]));
        ResponseSuggestionService::new(ProjectAccess::new(Arc::new(FakeAuth), store), llm)
    }

    #[tokio::test]
    async fn test_returns_three_suggestions() {
        let llm = Arc::new(FakeLlm::new(0, &[]));
        let service = service(llm.clone());

        let suggestions = service
            .suggest_responses(Some(OWNER_TOKEN), 1, "  Our budget is capped at $3,000.  ")
            .await
            .unwrap();

        assert_eq!(suggestions.len(), 3);
        assert_eq!(suggestions[0].title, "Collaborative Problem-Solving");
        let prompt = llm.last_prompt().unwrap();
        assert!(prompt.contains("latest response:\nOur budget is capped at $3,000.\n"));
    }

    #[tokio::test]
    async fn test_blank_response_is_rejected_before_generation() {
        let llm = Arc::new(FakeLlm::new(0, &[]));
        let service = service(llm.clone());

        let result = service.suggest_responses(Some(OWNER_TOKEN), 1, " \n ").await;

        assert!(matches!(result, Err(SuggestionsError::EmptyResponse)));
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_wrong_suggestion_count_is_an_error() {
        let llm = Arc::new(
            FakeLlm::new(0, &[]).with_suggestions(vec![suggestion("Only one approach")]),
        );
        let service = service(llm);

        let result = service
            .suggest_responses(Some(OWNER_TOKEN), 1, "Take it or leave it.")
            .await;

        assert!(matches!(result, Err(SuggestionsError::WrongCount(1))));
    }

    #[tokio::test]
    async fn test_other_owner_is_rejected() {
        let llm = Arc::new(FakeLlm::new(0, &[]));
        let service = service(llm.clone());

        let result = service
            .suggest_responses(Some(OTHER_TOKEN), 1, "Take it or leave it.")
            .await;

        assert!(matches!(
            result,
            Err(SuggestionsError::Access(AccessError::NotOwner(1)))
        ));
        assert_eq!(llm.call_count(), 0);
    }
}
