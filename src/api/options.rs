//! REST API endpoint for negotiation options

use actix_web::{HttpRequest, HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ApiError, bearer_token};
use crate::service::NegotiationOptionsService;

/// Options for mutual gain, subtitles in markdown bold
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OptionsResponse {
    pub options: Vec<String>,
}

/// Generate negotiation options for a project
#[utoipa::path(
    post,
    path = "/v1/projects/{id}/options",
    params(
        ("id" = i64, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Stored or newly generated options", body = OptionsResponse),
        (status = 401, description = "Missing or invalid token, or project not owned by caller", body = super::error::ErrorResponse),
        (status = 404, description = "Project not found", body = super::error::ErrorResponse),
        (status = 502, description = "Option generation failed", body = super::error::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "options"
)]
#[post("/v1/projects/{id}/options")]
pub async fn generate_options(
    service: web::Data<NegotiationOptionsService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let options = service
        .get_options(bearer_token(&req), path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(OptionsResponse { options }))
}

/// Configure option routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(generate_options);
}
