//! OpenAPI specification endpoints

use actix_web::{HttpResponse, Responder, get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Emergency Triage Agent API",
        description = "Emergency call triage: transcript extraction, alert dispatch, report filing and translation"
    ),
    paths(
        crate::api::triage::submit_transcript,
        crate::api::report::list_reports,
        crate::api::report::get_report,
        crate::api::translate::translate_text,
        crate::api::health::liveness,
        crate::api::health::readiness,
    ),
    components(schemas(
        crate::model::TriageRecord,
        crate::model::PersonProfile,
        crate::model::LocationInfo,
        crate::model::Severity,
        crate::model::AlertRecord,
        crate::model::NextStepsRecord,
        crate::model::ReportRecord,
        crate::model::ReportStatus,
        crate::model::TriageRequest,
        crate::model::TriageResponse,
        crate::model::TranslationRequest,
        crate::model::TranslationResponse,
        crate::api::report::ReportListResponse,
        crate::api::report::ReportSummary,
        crate::api::health::HealthStatus,
        crate::api::health::ReadinessStatus,
        crate::api::health::DependencyHealth,
    )),
    tags(
        (name = "triage", description = "Transcript triage pipeline"),
        (name = "reports", description = "Emergency report retrieval"),
        (name = "translation", description = "Transcript translation"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/yaml")
        .body(ApiDoc::openapi().to_yaml().unwrap())
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}
