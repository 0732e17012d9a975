//! REST API endpoints for emergency reports

use actix_web::{get, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::error::ApiError;
use crate::db::models::ListReportsQuery;
use crate::service::ReportService;

/// Query parameters for listing reports
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListReportsParams {
    /// Page number (1-indexed, default: 1)
    pub page: Option<u32>,
    /// Page size (default: 20, max: 100)
    pub page_size: Option<u32>,
    /// Filter by status (open, closed)
    pub status: Option<String>,
    /// Filter by severity (low, medium, high, critical, unknown)
    pub severity: Option<String>,
}

/// Paginated response for reports
#[derive(Debug, Serialize, ToSchema)]
pub struct ReportListResponse {
    pub reports: Vec<ReportSummary>,
    pub page: u32,
    pub page_size: u32,
    pub total_count: i64,
    pub total_pages: u32,
}

/// Summary of a report for list responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ReportSummary {
    pub report_id: String,
    pub generated_at: String,
    pub emergency_type: String,
    pub severity: String,
    pub alert_sent: bool,
    pub status: String,
}

/// List emergency reports with pagination and filters
#[utoipa::path(
    get,
    path = "/v1/reports",
    params(ListReportsParams),
    responses(
        (status = 200, description = "Reports retrieved successfully", body = ReportListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "reports"
)]
#[get("/v1/reports")]
pub async fn list_reports(
    service: web::Data<ReportService>,
    query: web::Query<ListReportsParams>,
) -> Result<HttpResponse, ApiError> {
    let db_query = ListReportsQuery {
        page: query.page,
        page_size: query.page_size,
        status: query.status.clone(),
        severity: query.severity.clone(),
    };

    let paginated = service.list_reports(db_query).await?;

    let summaries: Vec<ReportSummary> = paginated
        .reports
        .into_iter()
        .map(|report| ReportSummary {
            report_id: report.report_id,
            generated_at: report.generated_at.to_rfc3339(),
            emergency_type: report.emergency_details.emergency_type,
            severity: report.emergency_details.severity.to_string(),
            alert_sent: report
                .response_details
                .as_ref()
                .map(|a| a.alert_sent)
                .unwrap_or(false),
            status: report.status.to_string(),
        })
        .collect();

    Ok(HttpResponse::Ok().json(ReportListResponse {
        reports: summaries,
        page: paginated.page,
        page_size: paginated.page_size,
        total_count: paginated.total_count,
        total_pages: paginated.total_pages,
    }))
}

/// Get an emergency report by ID
#[utoipa::path(
    get,
    path = "/v1/reports/{report_id}",
    params(
        ("report_id" = String, Path, description = "Report ID (RPT-prefixed token)")
    ),
    responses(
        (status = 200, description = "Report retrieved successfully", body = crate::model::ReportRecord),
        (status = 404, description = "Report not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "reports"
)]
#[get("/v1/reports/{report_id}")]
pub async fn get_report(
    service: web::Data<ReportService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let report_id = path.into_inner();
    let report = service.get_report(&report_id).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// Configure report routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_reports).service(get_report);
}
