//! OpenAPI document and the endpoints serving it

use actix_web::{HttpResponse, get};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use super::ApiError;
use super::{criteria, enhancement, error, health, options, scoring, suggestions};
use crate::model::generation::{ExtractedQuestion, ExtractedSuggestion};
use crate::model::{Criterion, EnhancedInterests, ExtractionResult, PartyScore};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Principled Negotiation API",
        description = "Objective criteria research, interest scoring, option generation and negotiation coaching for negotiation projects"
    ),
    paths(
        criteria::get_objective_criteria,
        scoring::score_party,
        options::generate_options,
        suggestions::suggest_responses,
        enhancement::enhancement_question,
        enhancement::enhance_statement,
        health::liveness,
        health::readiness,
    ),
    components(schemas(
        ExtractionResult,
        Criterion,
        PartyScore,
        options::OptionsResponse,
        suggestions::SuggestionsRequest,
        suggestions::SuggestionsResponse,
        ExtractedSuggestion,
        ExtractedQuestion,
        enhancement::EnhanceRequest,
        EnhancedInterests,
        error::ErrorResponse,
        health::HealthStatus,
        health::ReadinessStatus,
        health::ServiceInfo,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "criteria", description = "Objective criteria research"),
        (name = "scoring", description = "Interest statement scoring"),
        (name = "options", description = "Options for mutual gain"),
        (name = "coaching", description = "Response suggestions and interest statement coaching"),
        (name = "health", description = "Service health checks")
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> Result<HttpResponse, ApiError> {
    let yaml = ApiDoc::openapi()
        .to_yaml()
        .map_err(|e| ApiError::Internal(format!("Failed to render OpenAPI YAML: {}", e)))?;

    Ok(HttpResponse::Ok().content_type("text/yaml").body(yaml))
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}
