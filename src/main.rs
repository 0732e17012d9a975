use std::sync::Arc;

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
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    let db_pool = web::Data::from(Arc::clone(&state.db_pool));
    let triage_service = web::Data::from(Arc::clone(&state.triage_service));
    let report_service = web::Data::from(Arc::clone(&state.report_service));
    let translation_service = web::Data::from(Arc::clone(&state.translation_service));

    tracing::info!("Starting Emergency Triage Agent server on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(db_pool.clone())
            .app_data(triage_service.clone())
            .app_data(report_service.clone())
            .app_data(translation_service.clone())
            .configure(api::triage::configure)
            .configure(api::report::configure)
            .configure(api::translate::configure)
            .configure(api::health::configure)
            .configure(api::openapi::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
