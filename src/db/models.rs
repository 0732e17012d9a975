//! Database models for emergency reports

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::model::{AlertRecord, ReportRecord, ReportStatus, TriageRecord};

/// Database representation of an emergency report
#[derive(Debug, Clone, FromRow)]
pub struct ReportRow {
    pub report_id: String,
    pub generated_at: DateTime<Utc>,
    pub emergency_type: String,
    pub severity: String,
    pub emergency_details: serde_json::Value,
    pub response_details: Option<serde_json::Value>,
    pub status: String,
}

impl ReportRow {
    /// Convert database row to domain model
    pub fn into_domain(self) -> Result<ReportRecord, String> {
        let emergency_details: TriageRecord = serde_json::from_value(self.emergency_details)
            .map_err(|e| format!("Invalid emergency_details JSON: {}", e))?;

        let response_details: Option<AlertRecord> = match self.response_details {
            Some(value) if !value.is_null() => Some(
                serde_json::from_value(value)
                    .map_err(|e| format!("Invalid response_details JSON: {}", e))?,
            ),
            _ => None,
        };

        let status = match self.status.as_str() {
            "closed" => ReportStatus::Closed,
            _ => ReportStatus::Open,
        };

        Ok(ReportRecord {
            report_id: self.report_id,
            generated_at: self.generated_at,
            emergency_details,
            response_details,
            status,
        })
    }
}

/// Query parameters for listing reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListReportsQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub status: Option<String>,
    pub severity: Option<String>,
}

/// Paginated response for reports
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginatedReports {
    pub reports: Vec<ReportRecord>,
    pub page: u32,
    pub page_size: u32,
    pub total_count: i64,
    pub total_pages: u32,
}
