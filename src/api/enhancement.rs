//! REST API endpoints for interest statement coaching

use actix_web::{HttpRequest, HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ApiError, bearer_token};
use crate::model::PartyType;
use crate::service::InterestEnhancementService;
use crate::service::enhancement::Exchange;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EnhanceRequest {
    /// Statement the question was asked about
    pub original_statement: String,
    pub question: String,
    pub answer: String,
}

/// Ask one question that would improve a party's interest statement
///
/// Uses the reasoning of an earlier score as feedback when the party has one.
#[utoipa::path(
    post,
    path = "/v1/projects/{id}/parties/{party}/enhancement-question",
    params(
        ("id" = i64, Path, description = "Project ID"),
        ("party" = String, Path, description = "Party to coach (a or b)")
    ),
    responses(
        (status = 200, description = "Coaching question", body = crate::model::generation::ExtractedQuestion),
        (status = 400, description = "Unknown party", body = super::error::ErrorResponse),
        (status = 401, description = "Missing or invalid token, or project not owned by caller", body = super::error::ErrorResponse),
        (status = 404, description = "Project not found", body = super::error::ErrorResponse),
        (status = 502, description = "Question generation failed", body = super::error::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "coaching"
)]
#[post("/v1/projects/{id}/parties/{party}/enhancement-question")]
pub async fn enhancement_question(
    service: web::Data<InterestEnhancementService>,
    req: HttpRequest,
    path: web::Path<(i64, String)>,
) -> Result<HttpResponse, ApiError> {
    let (project_id, party) = path.into_inner();
    let party: PartyType = party.parse().map_err(ApiError::BadRequest)?;

    let question = service
        .question(bearer_token(&req), project_id, party)
        .await?;

    Ok(HttpResponse::Ok().json(question))
}

/// Rewrite a party's interest statement with the answer to a coaching question
///
/// The rewrite replaces the stored statement and is scored again.
#[utoipa::path(
    post,
    path = "/v1/projects/{id}/parties/{party}/enhance",
    params(
        ("id" = i64, Path, description = "Project ID"),
        ("party" = String, Path, description = "Party to coach (a or b)")
    ),
    request_body = EnhanceRequest,
    responses(
        (status = 200, description = "Statement rewritten, scored and stored", body = crate::model::EnhancedInterests),
        (status = 400, description = "Unknown party or empty field", body = super::error::ErrorResponse),
        (status = 401, description = "Missing or invalid token, or project not owned by caller", body = super::error::ErrorResponse),
        (status = 404, description = "Project not found", body = super::error::ErrorResponse),
        (status = 502, description = "Rewrite or scoring failed", body = super::error::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "coaching"
)]
#[post("/v1/projects/{id}/parties/{party}/enhance")]
pub async fn enhance_statement(
    service: web::Data<InterestEnhancementService>,
    req: HttpRequest,
    path: web::Path<(i64, String)>,
    body: web::Json<EnhanceRequest>,
) -> Result<HttpResponse, ApiError> {
    let (project_id, party) = path.into_inner();
    let party: PartyType = party.parse().map_err(ApiError::BadRequest)?;

    let exchange = Exchange {
        original_statement: &body.original_statement,
        question: &body.question,
        answer: &body.answer,
    };
    let enhanced = service
        .enhance(bearer_token(&req), project_id, party, exchange)
        .await?;

    Ok(HttpResponse::Ok().json(enhanced))
}

/// Configure coaching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(enhancement_question).service(enhance_statement);
}
