//! Interest statement scoring service
//!
//! Each party's interest statement is scored once; the score and its reasoning are
//! stored on the project.

use std::sync::Arc;

use crate::db::DbError;
use crate::model::{PartyScore, PartyType};
use crate::service::llm::{LlmError, NegotiationLlm};
use crate::service::projects::{AccessError, ProjectAccess};

pub mod prompts;

use prompts::{SCORING_SYSTEM_PROMPT, build_scoring_prompt};

const MIN_SCORE: i64 = 0;
const MAX_SCORE: i64 = 100;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ScoringError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Score already exists for this party")]
    AlreadyScored(PartyType),

    #[error(transparent)]
    Generation(#[from] LlmError),

    #[error(transparent)]
    Database(#[from] DbError),
}

/// Service scoring party interest statements
pub struct PartyScoreService {
    access: ProjectAccess,
    llm: Arc<dyn NegotiationLlm>,
}

impl PartyScoreService {
    pub fn new(access: ProjectAccess, llm: Arc<dyn NegotiationLlm>) -> Self {
        Self { access, llm }
    }

    /// Score one party's interests and store the result
    pub async fn score_party(
        &self,
        token: Option<&str>,
        project_id: i64,
        party: PartyType,
    ) -> Result<PartyScore, ScoringError> {
        let project = self.access.load_owned(token, project_id).await?;

        if project.score(party).is_some() {
            return Err(ScoringError::AlreadyScored(party));
        }

        let prompt = build_scoring_prompt(project.interests(party));
        let extracted = self
            .llm
            .score_interests(SCORING_SYSTEM_PROMPT, &prompt)
            .await?;

        let score = PartyScore {
            score: clamp_score(extracted.score),
            reasoning: extracted.reasoning,
        };

        self.access
            .store()
            .save_party_score(project_id, party, &score)
            .await?;

        tracing::info!(
            project_id = project_id,
            party = %party,
            score = score.score,
            "Party interests scored"
        );

        Ok(score)
    }
}

pub(crate) fn clamp_score(score: i64) -> i32 {
    // bounded to 0..=100, so the narrowing cannot truncate
    score.clamp(MIN_SCORE, MAX_SCORE) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::{
        FakeAuth, FakeLlm, InMemoryStore, OTHER_TOKEN, OWNER_TOKEN, project,
    };

    fn service(store: Arc<InMemoryStore>, llm: Arc<FakeLlm>) -> PartyScoreService {
        PartyScoreService::new(ProjectAccess::new(Arc::new(FakeAuth), store), llm)
    }

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(-5), 0);
        assert_eq!(clamp_score(64), 64);
        assert_eq!(clamp_score(250), 100);
    }

    #[tokio::test]
    async fn test_scores_and_stores() {
        let store = Arc::new(InMemoryStore::with([project(1)]));
        let llm = Arc::new(FakeLlm::new(82, &[]));
        let service = service(store.clone(), llm);

        let score = service
            .score_party(Some(OWNER_TOKEN), 1, PartyType::B)
            .await
            .unwrap();

        assert_eq!(score.score, 82);
        let stored = store.get(1).unwrap();
        assert_eq!(stored.party_b_score, Some(score));
        assert!(stored.party_a_score.is_none());
    }

    #[tokio::test]
    async fn test_out_of_range_score_is_clamped() {
        let store = Arc::new(InMemoryStore::with([project(1)]));
        let service = service(store, Arc::new(FakeLlm::new(140, &[])));

        let score = service
            .score_party(Some(OWNER_TOKEN), 1, PartyType::A)
            .await
            .unwrap();

        assert_eq!(score.score, 100);
    }

    #[tokio::test]
    async fn test_existing_score_is_rejected() {
        let mut scored = project(1);
        scored.party_a_score = Some(PartyScore {
            score: 40,
            reasoning: "Positions rather than interests".to_string(),
        });
        let store = Arc::new(InMemoryStore::with([scored]));
        let llm = Arc::new(FakeLlm::new(90, &[]));
        let service = service(store.clone(), llm.clone());

        let result = service.score_party(Some(OWNER_TOKEN), 1, PartyType::A).await;

        assert!(matches!(result, Err(ScoringError::AlreadyScored(PartyType::A))));
        assert_eq!(llm.call_count(), 0);
        assert_eq!(store.get(1).unwrap().party_a_score.unwrap().score, 40);
    }

    #[tokio::test]
    async fn test_other_owner_is_rejected() {
        let store = Arc::new(InMemoryStore::with([project(1)]));
        let service = service(store, Arc::new(FakeLlm::new(50, &[])));

        let result = service.score_party(Some(OTHER_TOKEN), 1, PartyType::A).await;

        assert!(matches!(
            result,
            Err(ScoringError::Access(AccessError::NotOwner(1)))
        ));
    }

    #[tokio::test]
    async fn test_store_failure_is_reported() {
        let store = Arc::new(InMemoryStore::failing([project(1)]));
        let service = service(store, Arc::new(FakeLlm::new(50, &[])));

        let result = service.score_party(Some(OWNER_TOKEN), 1, PartyType::A).await;

        assert!(matches!(result, Err(ScoringError::Database(_))));
    }
}
