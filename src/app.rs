//! Application state and service initialization
//!
//! This module centralizes all service initialization and dependency injection,
//! making it easier to manage the application lifecycle and test services.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use crate::db::repository::ReportRepository;
use crate::model::Config;
use crate::service::alert::SimulatedDispatcher;
use crate::service::report::ReportStore;
use crate::service::{
    AlertService, LlmClient, ReportService, TranslationService, TriageExtractionService,
    TriageService,
};

/// Application state containing all services and shared resources
///
/// This struct centralizes service initialization and makes it easy to inject
/// dependencies into Actix-web handlers.
pub struct AppState {
    /// Database connection pool
    pub db_pool: Arc<PgPool>,
    /// Full triage pipeline service
    pub triage_service: Arc<TriageService>,
    /// Report persistence and retrieval service
    pub report_service: Arc<ReportService>,
    /// Caller-facing text translation service
    pub translation_service: Arc<TranslationService>,
}

impl AppState {
    /// Initialize all services and build application state
    ///
    /// This performs:
    /// 1. Database connection and schema initialization
    /// 2. LLM client initialization (requires OPENAI_API_KEY)
    /// 3. Service dependency graph construction
    pub async fn new(config: Config) -> Result<Self, AppError> {
        // Initialize PostgreSQL database
        let db_pool = crate::db::create_pool()
            .await
            .map_err(|e| AppError::DatabaseInit(e.to_string()))?;

        // Initialize database schema
        crate::db::init_schema(&db_pool)
            .await
            .map_err(|e| AppError::DatabaseInit(e.to_string()))?;

        // Create shared LLM client (required)
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| AppError::MissingConfig("OPENAI_API_KEY"))?;

        let llm_client = LlmClient::new(&api_key)
            .map_err(|_| AppError::InvalidConfig("Invalid OPENAI_API_KEY"))?;

        // Build service dependency graph
        let report_store: Arc<dyn ReportStore> = Arc::new(ReportRepository::new(db_pool.clone()));
        let report_service = Arc::new(ReportService::new(report_store));

        let extraction_service = TriageExtractionService::new(
            llm_client.clone(),
            Duration::from_secs(config.pipeline.extraction_timeout_secs),
        );

        let alert_service = AlertService::new(
            Arc::new(SimulatedDispatcher),
            Duration::from_secs(config.pipeline.alert_timeout_secs),
        );

        let triage_service = Arc::new(TriageService::new(
            extraction_service,
            alert_service,
            Arc::clone(&report_service),
        ));

        let translation_service = Arc::new(TranslationService::new(llm_client));

        Ok(Self {
            db_pool: Arc::new(db_pool),
            triage_service,
            report_service,
            translation_service,
        })
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Database initialization failed
    #[error("Database initialization failed: {0}")]
    DatabaseInit(String),

    /// Missing required configuration
    #[error("Missing required configuration: {0}")]
    MissingConfig(&'static str),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
