//! Database models for negotiation projects

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::model::{Criterion, ExtractionResult, PartyScore, Project};

/// Database representation of a project
#[derive(Debug, Clone, FromRow)]
pub struct ProjectRow {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub party_a_name: Option<String>,
    pub party_b_name: Option<String>,
    pub party_a: String,
    pub party_b: String,
    pub party_a_score: Option<i32>,
    pub party_a_score_reasoning: Option<String>,
    pub party_b_score: Option<i32>,
    pub party_b_score_reasoning: Option<String>,
    pub options: serde_json::Value,
    pub objective_criteria: Option<serde_json::Value>,
    pub objective_criteria_search_query: Option<String>,
    pub objective_criteria_citations: Option<serde_json::Value>,
    pub objective_criteria_raw_content: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectRow {
    /// Convert database row to domain model
    pub fn into_domain(self) -> Result<Project, String> {
        let options: Vec<String> = serde_json::from_value(self.options)
            .map_err(|e| format!("Invalid options: {}", e))?;

        let objective_criteria = match self.objective_criteria {
            Some(criteria) => Some(ExtractionResult {
                criteria: serde_json::from_value::<Vec<Criterion>>(criteria)
                    .map_err(|e| format!("Invalid objective criteria: {}", e))?,
                search_query: self.objective_criteria_search_query.unwrap_or_default(),
                citations: self
                    .objective_criteria_citations
                    .map(serde_json::from_value::<Vec<String>>)
                    .transpose()
                    .map_err(|e| format!("Invalid citations: {}", e))?
                    .unwrap_or_default(),
                raw_content: self.objective_criteria_raw_content.unwrap_or_default(),
            }),
            None => None,
        };

        Ok(Project {
            id: self.id,
            owner_id: self.owner_id,
            name: self.name,
            party_a_name: self.party_a_name,
            party_b_name: self.party_b_name,
            party_a: self.party_a,
            party_b: self.party_b,
            party_a_score: party_score(self.party_a_score, self.party_a_score_reasoning),
            party_b_score: party_score(self.party_b_score, self.party_b_score_reasoning),
            options,
            objective_criteria,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn party_score(score: Option<i32>, reasoning: Option<String>) -> Option<PartyScore> {
    score.map(|score| PartyScore {
        score,
        reasoning: reasoning.unwrap_or_default(),
    })
}
