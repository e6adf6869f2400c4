//! REST API endpoint for party interest scores

use actix_web::{HttpRequest, HttpResponse, post, web};

use super::{ApiError, bearer_token};
use crate::model::PartyType;
use crate::service::PartyScoreService;

/// Score one party's interest statement
///
/// A party can be scored once; a second request for the same party is rejected.
#[utoipa::path(
    post,
    path = "/v1/projects/{id}/parties/{party}/score",
    params(
        ("id" = i64, Path, description = "Project ID"),
        ("party" = String, Path, description = "Party to score (a or b)")
    ),
    responses(
        (status = 200, description = "Score generated and stored", body = crate::model::PartyScore),
        (status = 400, description = "Unknown party or party already scored", body = super::error::ErrorResponse),
        (status = 401, description = "Missing or invalid token, or project not owned by caller", body = super::error::ErrorResponse),
        (status = 404, description = "Project not found", body = super::error::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "scoring"
)]
#[post("/v1/projects/{id}/parties/{party}/score")]
pub async fn score_party(
    service: web::Data<PartyScoreService>,
    req: HttpRequest,
    path: web::Path<(i64, String)>,
) -> Result<HttpResponse, ApiError> {
    let (project_id, party) = path.into_inner();
    let party: PartyType = party.parse().map_err(ApiError::BadRequest)?;

    let score = service
        .score_party(bearer_token(&req), project_id, party)
        .await?;

    Ok(HttpResponse::Ok().json(score))
}

/// Configure scoring routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(score_party);
}
