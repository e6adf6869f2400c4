//! Liveness and readiness checks
//!
//! Readiness requires the `projects` table, not just a database connection, and
//! reports which research and generation models the service was started with.

use actix_web::{HttpResponse, Responder, get, web};
use serde::Serialize;
use sqlx::PgPool;
use utoipa::ToSchema;

/// Models the running service calls out to
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceInfo {
    pub research_model: String,
    pub generation_model: String,
}

#[derive(Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

#[derive(Serialize, ToSchema)]
pub struct ReadinessStatus {
    pub status: String,
    pub version: String,
    /// `ready`, `schema_missing` or `unreachable`
    pub project_store: String,
    pub models: ServiceInfo,
}

/// Outcome of checking the project store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreCheck {
    Ready,
    SchemaMissing,
    Unreachable,
}

impl StoreCheck {
    fn as_str(self) -> &'static str {
        match self {
            StoreCheck::Ready => "ready",
            StoreCheck::SchemaMissing => "schema_missing",
            StoreCheck::Unreachable => "unreachable",
        }
    }
}

async fn check_project_store(pool: &PgPool) -> StoreCheck {
    let exists: Result<bool, sqlx::Error> =
        sqlx::query_scalar("SELECT to_regclass('public.projects') IS NOT NULL")
            .fetch_one(pool)
            .await;

    match exists {
        Ok(true) => StoreCheck::Ready,
        Ok(false) => {
            tracing::warn!("Project store reachable but projects table is missing");
            StoreCheck::SchemaMissing
        }
        Err(e) => {
            tracing::error!(error = %e, "Project store health check failed");
            StoreCheck::Unreachable
        }
    }
}

fn readiness_status(store: StoreCheck, info: &ServiceInfo) -> ReadinessStatus {
    ReadinessStatus {
        status: if store == StoreCheck::Ready { "ready" } else { "not_ready" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        project_store: store.as_str().to_string(),
        models: info.clone(),
    }
}

/// Liveness endpoint
///
/// Always returns 200 OK while the process is serving requests.
#[utoipa::path(
    get,
    path = "/health/live",
    responses(
        (status = 200, description = "Service is alive", body = HealthStatus)
    ),
    tag = "health"
)]
#[get("/health/live")]
pub async fn liveness() -> impl Responder {
    HttpResponse::Ok().json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness endpoint
///
/// Returns 200 OK once the `projects` table can be queried.
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessStatus),
        (status = 503, description = "Project store unreachable or not initialized", body = ReadinessStatus)
    ),
    tag = "health"
)]
#[get("/health/ready")]
pub async fn readiness(
    db_pool: web::Data<PgPool>,
    info: web::Data<ServiceInfo>,
) -> impl Responder {
    let store = check_project_store(db_pool.get_ref()).await;
    let status = readiness_status(store, info.get_ref());

    if store == StoreCheck::Ready {
        HttpResponse::Ok().json(status)
    } else {
        HttpResponse::ServiceUnavailable().json(status)
    }
}

/// Configure health check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(liveness).service(readiness);
}
