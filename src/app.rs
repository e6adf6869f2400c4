//! Application state and service initialization
//!
//! Builds the service graph from configuration and the environment so that `main`
//! only has to hand the services to Actix-web.

use std::sync::Arc;

use sqlx::PgPool;

use crate::api::health::ServiceInfo;
use crate::db::repository::ProjectRepository;
use crate::model::Config;
use crate::service::{
    InterestEnhancementService, JwtAuthVerifier, LlmClient, NegotiationOptionsService,
    ObjectiveCriteriaService, PartyScoreService, PerplexityClient, ProjectAccess,
    ResponseSuggestionService,
};

const ENV_PERPLEXITY_API_KEY: &str = "PERPLEXITY_API_KEY";
const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
const ENV_JWT_SECRET: &str = "JWT_SECRET";

/// Application state containing all services and shared resources
pub struct AppState {
    /// Database connection pool
    pub db_pool: PgPool,
    /// Objective criteria research service
    pub criteria_service: Arc<ObjectiveCriteriaService>,
    /// Interest statement scoring service
    pub scoring_service: Arc<PartyScoreService>,
    /// Negotiation option generation service
    pub options_service: Arc<NegotiationOptionsService>,
    /// Reply suggestion service
    pub suggestions_service: Arc<ResponseSuggestionService>,
    /// Interest statement coaching service
    pub enhancement_service: Arc<InterestEnhancementService>,
    /// Models reported by the readiness endpoint
    pub service_info: ServiceInfo,
}

impl AppState {
    /// Initialize all services and build application state
    ///
    /// This performs:
    /// 1. Secret lookup (PERPLEXITY_API_KEY, OPENAI_API_KEY, JWT_SECRET)
    /// 2. Database connection and schema initialization
    /// 3. Service dependency graph construction
    pub async fn new(config: Config) -> Result<Self, AppError> {
        let perplexity_key = required_env(ENV_PERPLEXITY_API_KEY)?;
        let openai_key = required_env(ENV_OPENAI_API_KEY)?;
        let jwt_secret = required_env(ENV_JWT_SECRET)?;

        let db_pool = crate::db::create_pool()
            .await
            .map_err(|e| AppError::DatabaseInit(e.to_string()))?;

        crate::db::init_schema(&db_pool)
            .await
            .map_err(|e| AppError::DatabaseInit(e.to_string()))?;

        let llm_client = Arc::new(
            LlmClient::new(&openai_key)
                .map_err(|_| AppError::InvalidConfig("Invalid OPENAI_API_KEY"))?,
        );

        let access = ProjectAccess::new(
            Arc::new(JwtAuthVerifier::new(&jwt_secret)),
            Arc::new(ProjectRepository::new(db_pool.clone())),
        );

        tracing::info!(
            research_url = %config.research.completions_url(),
            research_model = %config.research.model,
            "Research client configured"
        );

        let service_info = ServiceInfo {
            research_model: config.research.model.clone(),
            generation_model: llm_client.model().to_string(),
        };

        let criteria_service = Arc::new(ObjectiveCriteriaService::new(
            access.clone(),
            Arc::new(PerplexityClient::new(perplexity_key, config.research)),
        ));
        let scoring_service = Arc::new(PartyScoreService::new(access.clone(), llm_client.clone()));
        let options_service = Arc::new(NegotiationOptionsService::new(
            access.clone(),
            llm_client.clone(),
        ));
        let suggestions_service = Arc::new(ResponseSuggestionService::new(
            access.clone(),
            llm_client.clone(),
        ));
        let enhancement_service = Arc::new(InterestEnhancementService::new(access, llm_client));

        Ok(Self {
            db_pool,
            criteria_service,
            scoring_service,
            options_service,
            suggestions_service,
            enhancement_service,
            service_info,
        })
    }
}

fn required_env(name: &'static str) -> Result<String, AppError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::MissingConfig(name)),
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Database initialization failed
    #[error("Database initialization failed: {0}")]
    DatabaseInit(String),

    /// Missing required configuration
    #[error("Missing required configuration: {0}")]
    MissingConfig(&'static str),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
