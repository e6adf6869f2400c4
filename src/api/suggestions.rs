//! REST API endpoint for response suggestions

use actix_web::{HttpRequest, HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ApiError, bearer_token};
use crate::model::generation::ExtractedSuggestion;
use crate::service::ResponseSuggestionService;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuggestionsRequest {
    /// The other party's latest message, as text
    pub other_party_response: String,
}

/// Three replies: collaborative, assertive and creative
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<ExtractedSuggestion>,
}

/// Suggest replies to the other party's latest message
#[utoipa::path(
    post,
    path = "/v1/projects/{id}/response-suggestions",
    params(
        ("id" = i64, Path, description = "Project ID")
    ),
    request_body = SuggestionsRequest,
    responses(
        (status = 200, description = "Three response suggestions", body = SuggestionsResponse),
        (status = 400, description = "Empty message from the other party", body = super::error::ErrorResponse),
        (status = 401, description = "Missing or invalid token, or project not owned by caller", body = super::error::ErrorResponse),
        (status = 404, description = "Project not found", body = super::error::ErrorResponse),
        (status = 502, description = "Suggestion generation failed", body = super::error::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "coaching"
)]
#[post("/v1/projects/{id}/response-suggestions")]
pub async fn suggest_responses(
    service: web::Data<ResponseSuggestionService>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<SuggestionsRequest>,
) -> Result<HttpResponse, ApiError> {
    let suggestions = service
        .suggest_responses(
            bearer_token(&req),
            path.into_inner(),
            &body.other_party_response,
        )
        .await?;

    Ok(HttpResponse::Ok().json(SuggestionsResponse { suggestions }))
}

/// Configure response suggestion routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(suggest_responses);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test};

    use crate::service::ProjectAccess;
    use crate::service::testing::{FakeAuth, FakeLlm, InMemoryStore, OWNER_TOKEN, project};

    #[actix_web::test]
    async fn test_suggest_responses() {
        let store = Arc::new(InMemoryStore::with([project(1)]));
        let access = ProjectAccess::new(Arc::new(FakeAuth), store);
        let service = web::Data::new(ResponseSuggestionService::new(
            access,
            Arc::new(FakeLlm::new(0, &[])),
        ));
        let app = test::init_service(App::new().app_data(service).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/v1/projects/1/response-suggestions")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", OWNER_TOKEN)))
            .set_json(serde_json::json!({ "other_party_response": "We cap design spend at $3,000." }))
            .to_request();
        let response: SuggestionsResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(response.suggestions.len(), 3);

        let req = test::TestRequest::post()
            .uri("/v1/projects/1/response-suggestions")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", OWNER_TOKEN)))
            .set_json(serde_json::json!({ "other_party_response": "" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/v1/projects/1/response-suggestions")
            .set_json(serde_json::json!({ "other_party_response": "Take it or leave it." }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
