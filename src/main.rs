use actix_web::{App, HttpServer, web};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod db;
mod model;
mod service;

use app::AppState;
use model::Config;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let bind_addr = config.bind_addr();

    let state = AppState::new(config).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to initialize application");
        std::io::Error::other(e)
    })?;

    let db_pool = web::Data::new(state.db_pool);
    let criteria_service = web::Data::from(state.criteria_service);
    let scoring_service = web::Data::from(state.scoring_service);
    let options_service = web::Data::from(state.options_service);
    let suggestions_service = web::Data::from(state.suggestions_service);
    let enhancement_service = web::Data::from(state.enhancement_service);
    let service_info = web::Data::new(state.service_info);

    tracing::info!("Starting principled negotiation server on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(db_pool.clone())
            .app_data(criteria_service.clone())
            .app_data(scoring_service.clone())
            .app_data(options_service.clone())
            .app_data(suggestions_service.clone())
            .app_data(enhancement_service.clone())
            .app_data(service_info.clone())
            .configure(api::criteria::configure)
            .configure(api::scoring::configure)
            .configure(api::options::configure)
            .configure(api::suggestions::configure)
            .configure(api::enhancement::configure)
            .configure(api::health::configure)
            .configure(api::openapi::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
