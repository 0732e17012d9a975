//! REST API endpoint for transcript triage

use actix_web::{post, web, HttpResponse};

use crate::api::error::ApiError;
use crate::model::{TriageRequest, TriageResponse};
use crate::service::TriageService;

/// Process an emergency call transcript
///
/// Runs the full pipeline: extraction, alert simulation, caller
/// guidance, and report filing. A transcript the extractor cannot make
/// sense of still returns 200 with a degraded triage record.
#[utoipa::path(
    post,
    path = "/v1/triage",
    request_body = TriageRequest,
    responses(
        (status = 200, description = "Transcript processed", body = TriageResponse),
        (status = 400, description = "Missing or empty transcript"),
        (status = 500, description = "Internal server error")
    ),
    tag = "triage"
)]
#[post("/v1/triage")]
pub async fn submit_transcript(
    service: web::Data<TriageService>,
    body: web::Json<TriageRequest>,
) -> Result<HttpResponse, ApiError> {
    let outcome = service.process_transcript(&body.transcript).await?;

    Ok(HttpResponse::Ok().json(TriageResponse {
        triage: outcome.triage,
        alert: outcome.alert,
        next_steps: outcome.next_steps,
        report_id: outcome.report_id,
    }))
}

/// Configure triage routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(submit_transcript);
}
