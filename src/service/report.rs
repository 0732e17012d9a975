//! Report generation and filing
//!
//! `generate_report` is the pure contract: fresh unique id, fresh
//! timestamp, owned copies of the inputs, status open. `ReportService`
//! files the result in whatever store is wired in behind `ReportStore`.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::db::models::{ListReportsQuery, PaginatedReports};
use crate::db::DbError;
use crate::model::{AlertRecord, ReportRecord, ReportStatus, TriageRecord};
use crate::service::ids;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Malformed triage record: {0}")]
    MalformedRecord(String),

    #[error("Report storage error: {0}")]
    Storage(#[from] DbError),
}

/// Trait for report stores
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Persist a report, returning its identifier.
    /// Saving the same report_id again must be idempotent so callers
    /// can retry a save without duplicating history.
    async fn save(&self, report: &ReportRecord) -> Result<String, DbError>;

    /// Fetch a report by id
    async fn get_by_id(&self, report_id: &str) -> Result<ReportRecord, DbError>;

    /// List reports with pagination and filters
    async fn list(&self, query: ListReportsQuery) -> Result<PaginatedReports, DbError>;
}

/// Build a report from a triage record and optional alert outcome.
///
/// Every call mints a fresh report_id and timestamp; the inputs are
/// cloned, never mutated. A record without an emergency type cannot be
/// filed and is signaled as malformed rather than panicking.
pub fn generate_report(
    record: &TriageRecord,
    alert: Option<&AlertRecord>,
) -> Result<ReportRecord, ReportError> {
    if record.emergency_type.trim().is_empty() {
        return Err(ReportError::MalformedRecord(
            "emergency_type is empty".to_string(),
        ));
    }

    Ok(ReportRecord {
        report_id: ids::report_token(),
        generated_at: Utc::now(),
        emergency_details: record.clone(),
        response_details: alert.cloned(),
        status: ReportStatus::Open,
    })
}

/// Service for generating, filing, and retrieving reports
pub struct ReportService {
    store: Arc<dyn ReportStore>,
}

impl ReportService {
    pub fn new(store: Arc<dyn ReportStore>) -> Self {
        Self { store }
    }

    /// Generate a report and persist it
    pub async fn file_report(
        &self,
        record: &TriageRecord,
        alert: Option<&AlertRecord>,
    ) -> Result<ReportRecord, ReportError> {
        let report = generate_report(record, alert)?;
        let report_id = self.store.save(&report).await?;

        tracing::info!(
            report_id = %report_id,
            emergency_type = %report.emergency_details.emergency_type,
            severity = %report.emergency_details.severity,
            "Emergency report filed"
        );

        Ok(report)
    }

    /// Fetch a report by id
    pub async fn get_report(&self, report_id: &str) -> Result<ReportRecord, DbError> {
        self.store.get_by_id(report_id).await
    }

    /// List reports with pagination and filters
    pub async fn list_reports(&self, query: ListReportsQuery) -> Result<PaginatedReports, DbError> {
        self.store.list(query).await
    }
}

/// Map-backed store for tests
#[cfg(test)]
pub struct InMemoryReportStore {
    reports: std::sync::Mutex<std::collections::HashMap<String, ReportRecord>>,
}

#[cfg(test)]
impl InMemoryReportStore {
    pub fn new() -> Self {
        Self {
            reports: std::sync::Mutex::new(std::collections::HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.reports.lock().unwrap().len()
    }
}

#[cfg(test)]
#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn save(&self, report: &ReportRecord) -> Result<String, DbError> {
        self.reports
            .lock()
            .unwrap()
            .insert(report.report_id.clone(), report.clone());
        Ok(report.report_id.clone())
    }

    async fn get_by_id(&self, report_id: &str) -> Result<ReportRecord, DbError> {
        self.reports
            .lock()
            .unwrap()
            .get(report_id)
            .cloned()
            .ok_or_else(|| DbError::NotFound(report_id.to_string()))
    }

    async fn list(&self, query: ListReportsQuery) -> Result<PaginatedReports, DbError> {
        let page = query.page.unwrap_or(1).max(1);
        let page_size = query.page_size.unwrap_or(20).clamp(1, 100);

        let mut reports: Vec<ReportRecord> = self
            .reports
            .lock()
            .unwrap()
            .values()
            .filter(|r| {
                query
                    .status
                    .as_deref()
                    .map_or(true, |s| r.status.as_str() == s)
            })
            .filter(|r| {
                query
                    .severity
                    .as_deref()
                    .map_or(true, |s| r.emergency_details.severity.as_str() == s)
            })
            .cloned()
            .collect();
        reports.sort_by(|a, b| b.generated_at.cmp(&a.generated_at));

        let total_count = reports.len() as i64;
        let total_pages = ((total_count as f64) / (page_size as f64)).ceil() as u32;
        let start = ((page - 1) as u64 * page_size as u64) as usize;
        let reports = reports.into_iter().skip(start).take(page_size as usize).collect();

        Ok(PaginatedReports {
            reports,
            page,
            page_size,
            total_count,
            total_pages,
        })
    }
}
