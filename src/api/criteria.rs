//! REST API endpoint for objective criteria

use actix_web::{HttpRequest, HttpResponse, get, web};

use super::{ApiError, bearer_token};
use crate::service::ObjectiveCriteriaService;

/// Get objective criteria for a project
///
/// Runs the research pipeline on the first request for a project; later requests
/// return the stored result.
#[utoipa::path(
    get,
    path = "/v1/projects/{id}/objective-criteria",
    params(
        ("id" = i64, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Objective criteria for the project", body = crate::model::ExtractionResult),
        (status = 401, description = "Missing or invalid token, or project not owned by caller", body = super::error::ErrorResponse),
        (status = 404, description = "Project not found", body = super::error::ErrorResponse),
        (status = 502, description = "Research API failed or returned an unusable response", body = super::error::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "criteria"
)]
#[get("/v1/projects/{id}/objective-criteria")]
pub async fn get_objective_criteria(
    service: web::Data<ObjectiveCriteriaService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let project_id = path.into_inner();
    let result = service
        .get_objective_criteria(bearer_token(&req), project_id)
        .await?;

    Ok(HttpResponse::Ok().json(result))
}

/// Configure objective criteria routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_objective_criteria);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test};

    use crate::model::ExtractionResult;
    use crate::service::ProjectAccess;
    use crate::service::testing::{
        FakeAuth, FakeResearch, InMemoryStore, OWNER_TOKEN, project, research_body,
    };

    fn service(body: String) -> web::Data<ObjectiveCriteriaService> {
        let store = Arc::new(InMemoryStore::with([project(1)]));
        let access = ProjectAccess::new(Arc::new(FakeAuth), store);
        web::Data::new(ObjectiveCriteriaService::new(
            access,
            Arc::new(FakeResearch::new(body)),
        ))
    }

    #[actix_web::test]
    async fn test_get_objective_criteria() {
        let body = research_body(
            "### Market Rate\n- **Standard**: Average hourly rate is $45\n- **Source**: Bureau of Labor Statistics",
            &["https://www.bls.gov/oes/"],
        );
        let app = test::init_service(App::new().app_data(service(body)).configure(configure)).await;

        let req = test::TestRequest::get()
            .uri("/v1/projects/1/objective-criteria")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", OWNER_TOKEN)))
            .to_request();
        let result: ExtractionResult = test::call_and_read_body_json(&app, req).await;

        assert_eq!(result.criteria.len(), 1);
        assert_eq!(result.criteria[0].title, "Market Rate");
        assert_eq!(
            result.criteria[0].source.as_deref(),
            Some("https://www.bls.gov/oes/")
        );
    }

    #[actix_web::test]
    async fn test_error_statuses() {
        let app = test::init_service(
            App::new()
                .app_data(service("not json".to_string()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/v1/projects/1/objective-criteria")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/v1/projects/42/objective-criteria")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", OWNER_TOKEN)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get()
            .uri("/v1/projects/1/objective-criteria")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", OWNER_TOKEN)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "malformed_response");
        assert!(body["request_id"].is_string());
    }
}
