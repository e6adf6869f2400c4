//! Repository for project database operations

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;

use super::models::ProjectRow;
use super::{DbError, ProjectStore};
use crate::model::{ExtractionResult, PartyScore, PartyType, Project};

/// PostgreSQL-backed project store
#[derive(Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectStore for ProjectRepository {
    async fn find_by_id(&self, project_id: i64) -> Result<Option<Project>, DbError> {
        let row: Option<ProjectRow> = sqlx::query_as(
            r#"
            SELECT * FROM projects WHERE id = $1
            "#,
        )
        .bind(project_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| row.into_domain().map_err(DbError::Serialization))
            .transpose()
    }

    async fn save_objective_criteria(
        &self,
        project_id: i64,
        result: &ExtractionResult,
    ) -> Result<bool, DbError> {
        let outcome = sqlx::query(
            r#"
            UPDATE projects SET
                objective_criteria = $2,
                objective_criteria_search_query = $3,
                objective_criteria_citations = $4,
                objective_criteria_raw_content = $5,
                updated_at = NOW()
            WHERE id = $1 AND objective_criteria IS NULL
            "#,
        )
        .bind(project_id)
        .bind(Json(&result.criteria))
        .bind(&result.search_query)
        .bind(Json(&result.citations))
        .bind(&result.raw_content)
        .execute(&self.pool)
        .await?;

        let written = outcome.rows_affected() > 0;
        tracing::debug!(project_id = project_id, written = written, "Stored objective criteria");
        Ok(written)
    }

    async fn save_party_score(
        &self,
        project_id: i64,
        party: PartyType,
        score: &PartyScore,
    ) -> Result<(), DbError> {
        let query = match party {
            PartyType::A => {
                "UPDATE projects SET party_a_score = $2, party_a_score_reasoning = $3, updated_at = NOW() WHERE id = $1"
            }
            PartyType::B => {
                "UPDATE projects SET party_b_score = $2, party_b_score_reasoning = $3, updated_at = NOW() WHERE id = $1"
            }
        };

        let outcome = sqlx::query(query)
            .bind(project_id)
            .bind(score.score)
            .bind(&score.reasoning)
            .execute(&self.pool)
            .await?;

        if outcome.rows_affected() == 0 {
            return Err(DbError::NotFound(project_id.to_string()));
        }

        tracing::debug!(project_id = project_id, party = %party, "Stored party score");
        Ok(())
    }

    async fn save_enhanced_interests(
        &self,
        project_id: i64,
        party: PartyType,
        interests: &str,
        score: &PartyScore,
    ) -> Result<(), DbError> {
        let query = match party {
            PartyType::A => {
                "UPDATE projects SET party_a = $2, party_a_score = $3, party_a_score_reasoning = $4, updated_at = NOW() WHERE id = $1"
            }
            PartyType::B => {
                "UPDATE projects SET party_b = $2, party_b_score = $3, party_b_score_reasoning = $4, updated_at = NOW() WHERE id = $1"
            }
        };

        let outcome = sqlx::query(query)
            .bind(project_id)
            .bind(interests)
            .bind(score.score)
            .bind(&score.reasoning)
            .execute(&self.pool)
            .await?;

        if outcome.rows_affected() == 0 {
            return Err(DbError::NotFound(project_id.to_string()));
        }

        tracing::debug!(project_id = project_id, party = %party, "Stored enhanced interests");
        Ok(())
    }

    async fn save_options(&self, project_id: i64, options: &[String]) -> Result<(), DbError> {
        let outcome = sqlx::query(
            r#"
            UPDATE projects SET options = $2, updated_at = NOW() WHERE id = $1
            "#,
        )
        .bind(project_id)
        .bind(Json(options))
        .execute(&self.pool)
        .await?;

        if outcome.rows_affected() == 0 {
            return Err(DbError::NotFound(project_id.to_string()));
        }

        tracing::debug!(project_id = project_id, count = options.len(), "Stored negotiation options");
        Ok(())
    }
}
