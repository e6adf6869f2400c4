//! Database module for PostgreSQL persistence

pub mod models;
pub mod repository;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::env;

use crate::model::{ExtractionResult, PartyScore, PartyType, Project};

// Environment variable names
const ENV_POSTGRES_HOST: &str = "NEGOTIATION_POSTGRES_HOST";
const ENV_POSTGRES_PORT: &str = "NEGOTIATION_POSTGRES_PORT";
const ENV_POSTGRES_USER: &str = "NEGOTIATION_POSTGRES_USER";
const ENV_POSTGRES_PASSWORD: &str = "NEGOTIATION_POSTGRES_PASSWORD";
const ENV_POSTGRES_DB: &str = "NEGOTIATION_POSTGRES_DB";

// Default values
const DEFAULT_POSTGRES_HOST: &str = "127.0.0.1";
const DEFAULT_POSTGRES_PORT: &str = "5432";
const DEFAULT_POSTGRES_USER: &str = "negotiation";
const DEFAULT_POSTGRES_PASSWORD: &str = "negotiation";
const DEFAULT_POSTGRES_DB: &str = "negotiation";

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Persistence of negotiation projects and their generated content
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Load a project by ID
    async fn find_by_id(&self, project_id: i64) -> Result<Option<Project>, DbError>;

    /// Store objective criteria unless the project already has some
    ///
    /// Returns `true` if this call wrote the result, `false` if a result was
    /// already stored (the existing one is left untouched).
    async fn save_objective_criteria(
        &self,
        project_id: i64,
        result: &ExtractionResult,
    ) -> Result<bool, DbError>;

    /// Store the score of one party's interest statement
    async fn save_party_score(
        &self,
        project_id: i64,
        party: PartyType,
        score: &PartyScore,
    ) -> Result<(), DbError>;

    /// Replace one party's interest statement together with its new score
    ///
    /// Statement and score are written in one statement so a stored score always
    /// belongs to the stored interests.
    async fn save_enhanced_interests(
        &self,
        project_id: i64,
        party: PartyType,
        interests: &str,
        score: &PartyScore,
    ) -> Result<(), DbError>;

    /// Store generated negotiation options
    async fn save_options(&self, project_id: i64, options: &[String]) -> Result<(), DbError>;
}

/// Create a new database connection pool
pub async fn create_pool() -> Result<PgPool, DbError> {
    let host = env::var(ENV_POSTGRES_HOST).unwrap_or_else(|_| DEFAULT_POSTGRES_HOST.to_string());
    let port = env::var(ENV_POSTGRES_PORT).unwrap_or_else(|_| DEFAULT_POSTGRES_PORT.to_string());
    let user = env::var(ENV_POSTGRES_USER).unwrap_or_else(|_| DEFAULT_POSTGRES_USER.to_string());
    let password =
        env::var(ENV_POSTGRES_PASSWORD).unwrap_or_else(|_| DEFAULT_POSTGRES_PASSWORD.to_string());
    let database = env::var(ENV_POSTGRES_DB).unwrap_or_else(|_| DEFAULT_POSTGRES_DB.to_string());

    let database_url = format!(
        "postgres://{}:{}@{}:{}/{}",
        user, password, host, port, database
    );

    tracing::debug!(host = %host, port = %port, database = %database, "Connecting to PostgreSQL");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await?;

    tracing::info!(host = %host, port = %port, "PostgreSQL connection established");

    Ok(pool)
}

/// Initialize database schema
pub async fn init_schema(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS projects (
            id BIGSERIAL PRIMARY KEY,
            owner_id BIGINT NOT NULL,
            name TEXT NOT NULL,
            party_a_name TEXT,
            party_b_name TEXT,
            party_a TEXT NOT NULL,
            party_b TEXT NOT NULL,
            party_a_score INTEGER,
            party_a_score_reasoning TEXT,
            party_b_score INTEGER,
            party_b_score_reasoning TEXT,
            options JSONB NOT NULL DEFAULT '[]',
            objective_criteria JSONB,
            objective_criteria_search_query TEXT,
            objective_criteria_citations JSONB,
            objective_criteria_raw_content TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_projects_owner_id ON projects(owner_id)")
        .execute(pool)
        .await?;

    tracing::info!("Database schema initialized");

    Ok(())
}
