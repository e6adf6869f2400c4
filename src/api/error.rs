//! Unified API error handling
//!
//! This module provides a consistent error response format across all API endpoints.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::DbError;
use crate::service::criteria::CriteriaError;
use crate::service::enhancement::EnhancementError;
use crate::service::llm::LlmError;
use crate::service::options::OptionsError;
use crate::service::projects::AccessError;
use crate::service::research::ResearchError;
use crate::service::scoring::ScoringError;
use crate::service::suggestions::SuggestionsError;

/// Standard error response format
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Unique request ID for tracing
    pub request_id: String,
}

/// Unified API error type
///
/// All API endpoints should return `Result<T, ApiError>` for consistent error handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Missing or invalid credentials, or a project owned by someone else (401)
    #[error("{0}")]
    Unauthorized(String),

    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request / validation error (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Database error (500)
    #[error("Database error: {0}")]
    Database(String),

    /// External service error (502)
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Research API response did not match the expected schema (502)
    #[error("Malformed research response: {0}")]
    MalformedResponse(String),

    /// Research API returned no usable text (502)
    #[error("No content returned from research API")]
    EmptyContent,
}

impl ApiError {
    fn error_type(&self) -> &'static str {
        match self {
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::NotFound(_) => "not_found",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Internal(_) => "internal_error",
            ApiError::Database(_) => "database_error",
            ApiError::ExternalService(_) => "external_service_error",
            ApiError::MalformedResponse(_) => "malformed_response",
            ApiError::EmptyContent => "empty_content",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ExternalService(_)
            | ApiError::MalformedResponse(_)
            | ApiError::EmptyContent => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) | ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_type = self.error_type();

        if status.is_server_error() {
            tracing::error!(
                error_type = error_type,
                status = status.as_u16(),
                message = %self,
                "API error"
            );
        } else {
            tracing::debug!(
                error_type = error_type,
                status = status.as_u16(),
                message = %self,
                "API error"
            );
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            request_id: Uuid::new_v4().to_string(),
        })
    }
}

// ============================================================================
// From conversions for service errors
// ============================================================================

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(id) => ApiError::NotFound(id),
            _ => ApiError::Database(err.to_string()),
        }
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Auth(e) => ApiError::Unauthorized(e.to_string()),
            AccessError::NotOwner(_) => ApiError::Unauthorized(err.to_string()),
            AccessError::NotFound(id) => ApiError::NotFound(format!("project {}", id)),
            AccessError::Database(e) => e.into(),
        }
    }
}

impl From<ResearchError> for ApiError {
    fn from(err: ResearchError) -> Self {
        match err {
            ResearchError::MalformedResponse(msg) => ApiError::MalformedResponse(msg),
            ResearchError::EmptyContent => ApiError::EmptyContent,
            _ => ApiError::ExternalService(err.to_string()),
        }
    }
}

impl From<LlmError> for ApiError {
    fn from(err: LlmError) -> Self {
        ApiError::ExternalService(err.to_string())
    }
}

impl From<CriteriaError> for ApiError {
    fn from(err: CriteriaError) -> Self {
        match err {
            CriteriaError::Access(e) => e.into(),
            CriteriaError::Research(e) => e.into(),
        }
    }
}

impl From<ScoringError> for ApiError {
    fn from(err: ScoringError) -> Self {
        match err {
            ScoringError::Access(e) => e.into(),
            ScoringError::AlreadyScored(_) => ApiError::BadRequest(err.to_string()),
            ScoringError::Generation(e) => e.into(),
            ScoringError::Database(e) => e.into(),
        }
    }
}

impl From<OptionsError> for ApiError {
    fn from(err: OptionsError) -> Self {
        match err {
            OptionsError::Access(e) => e.into(),
            OptionsError::Generation(e) => e.into(),
            OptionsError::Database(e) => e.into(),
        }
    }
}

impl From<SuggestionsError> for ApiError {
    fn from(err: SuggestionsError) -> Self {
        match err {
            SuggestionsError::Access(e) => e.into(),
            SuggestionsError::EmptyResponse => ApiError::BadRequest(err.to_string()),
            SuggestionsError::Generation(e) => e.into(),
            SuggestionsError::WrongCount(_) => ApiError::ExternalService(err.to_string()),
        }
    }
}

impl From<EnhancementError> for ApiError {
    fn from(err: EnhancementError) -> Self {
        match err {
            EnhancementError::Access(e) => e.into(),
            EnhancementError::MissingField(_) => ApiError::BadRequest(err.to_string()),
            EnhancementError::EmptyStatement => ApiError::ExternalService(err.to_string()),
            EnhancementError::Generation(e) => e.into(),
            EnhancementError::Database(e) => e.into(),
        }
    }
}
