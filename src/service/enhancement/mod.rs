//! Interest statement coaching service
//!
//! Two steps: ask the party one question about the interests behind their
//! statement, then rewrite the statement with their answer. The rewrite is scored
//! again and stored together with the new score.

use std::sync::Arc;

use crate::db::DbError;
use crate::model::generation::ExtractedQuestion;
use crate::model::{EnhancedInterests, PartyScore, PartyType};
use crate::service::llm::{LlmError, NegotiationLlm};
use crate::service::projects::{AccessError, ProjectAccess};
use crate::service::scoring::clamp_score;
use crate::service::scoring::prompts::{SCORING_SYSTEM_PROMPT, build_scoring_prompt};

pub mod prompts;

use prompts::{
    ENHANCE_SYSTEM_PROMPT, QUESTION_SYSTEM_PROMPT, build_enhance_prompt, build_question_prompt,
};

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EnhancementError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Field '{0}' must not be empty")]
    MissingField(&'static str),

    #[error("Model returned an empty statement")]
    EmptyStatement,

    #[error(transparent)]
    Generation(#[from] LlmError),

    #[error(transparent)]
    Database(#[from] DbError),
}

/// Answer to a coaching question, with the statement it was asked about
#[derive(Debug, Clone)]
pub struct Exchange<'a> {
    pub original_statement: &'a str,
    pub question: &'a str,
    pub answer: &'a str,
}

impl Exchange<'_> {
    fn validate(&self) -> Result<(), EnhancementError> {
        for (name, value) in [
            ("original_statement", self.original_statement),
            ("question", self.question),
            ("answer", self.answer),
        ] {
            if value.trim().is_empty() {
                return Err(EnhancementError::MissingField(name));
            }
        }
        Ok(())
    }
}

/// Service coaching parties towards interest-based statements
pub struct InterestEnhancementService {
    access: ProjectAccess,
    llm: Arc<dyn NegotiationLlm>,
}

impl InterestEnhancementService {
    pub fn new(access: ProjectAccess, llm: Arc<dyn NegotiationLlm>) -> Self {
        Self { access, llm }
    }

    /// Ask one question that would improve a party's interest statement
    pub async fn question(
        &self,
        token: Option<&str>,
        project_id: i64,
        party: PartyType,
    ) -> Result<ExtractedQuestion, EnhancementError> {
        let project = self.access.load_owned(token, project_id).await?;

        let feedback = project.score(party).map(|s| s.reasoning.as_str());
        let prompt = build_question_prompt(project.interests(party), feedback);
        let question = self
            .llm
            .enhancement_question(QUESTION_SYSTEM_PROMPT, &prompt)
            .await?;

        tracing::info!(project_id = project_id, party = %party, "Enhancement question generated");

        Ok(question)
    }

    /// Rewrite a party's statement with the answer to a question, then rescore it
    pub async fn enhance(
        &self,
        token: Option<&str>,
        project_id: i64,
        party: PartyType,
        exchange: Exchange<'_>,
    ) -> Result<EnhancedInterests, EnhancementError> {
        self.access.load_owned(token, project_id).await?;
        exchange.validate()?;

        let prompt = build_enhance_prompt(
            exchange.original_statement.trim(),
            exchange.question.trim(),
            exchange.answer.trim(),
        );
        let rewritten = self
            .llm
            .enhance_statement(ENHANCE_SYSTEM_PROMPT, &prompt)
            .await?;
        let statement = rewritten.enhanced_statement.trim();
        if statement.is_empty() {
            return Err(EnhancementError::EmptyStatement);
        }

        let extracted = self
            .llm
            .score_interests(SCORING_SYSTEM_PROMPT, &build_scoring_prompt(statement))
            .await?;
        let score = PartyScore {
            score: clamp_score(extracted.score),
            reasoning: extracted.reasoning,
        };

        self.access
            .store()
            .save_enhanced_interests(project_id, party, statement, &score)
            .await?;

        tracing::info!(
            project_id = project_id,
            party = %party,
            score = score.score,
            "Interest statement enhanced"
        );

        Ok(EnhancedInterests {
            enhanced_statement: statement.to_string(),
            score: score.score,
            reasoning: score.reasoning,
        })
    }
}
