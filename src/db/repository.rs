//! Repository for emergency report database operations

use async_trait::async_trait;
use sqlx::PgPool;

use super::models::{ListReportsQuery, PaginatedReports, ReportRow};
use super::DbError;
use crate::model::ReportRecord;
use crate::service::report::ReportStore;

const DEFAULT_PAGE_SIZE: u32 = 20;

/// Repository for emergency report operations
#[derive(Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert or update an emergency report.
    /// The upsert makes retried saves idempotent: saving the same
    /// report_id twice leaves a single row.
    pub async fn upsert(&self, report: &ReportRecord) -> Result<(), DbError> {
        let emergency_details = serde_json::to_value(&report.emergency_details)
            .map_err(|e| DbError::Serialization(e.to_string()))?;
        let response_details = report
            .response_details
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| DbError::Serialization(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO emergency_reports (
                report_id, generated_at, emergency_type, severity,
                emergency_details, response_details, status
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (report_id) DO UPDATE SET
                generated_at = EXCLUDED.generated_at,
                emergency_type = EXCLUDED.emergency_type,
                severity = EXCLUDED.severity,
                emergency_details = EXCLUDED.emergency_details,
                response_details = EXCLUDED.response_details,
                status = EXCLUDED.status
            "#,
        )
        .bind(&report.report_id)
        .bind(report.generated_at)
        .bind(&report.emergency_details.emergency_type)
        .bind(report.emergency_details.severity.as_str())
        .bind(&emergency_details)
        .bind(&response_details)
        .bind(report.status.as_str())
        .execute(&self.pool)
        .await?;

        tracing::debug!(report_id = %report.report_id, "Upserted emergency report");
        Ok(())
    }

    /// Get an emergency report by ID
    pub async fn get_report(&self, report_id: &str) -> Result<ReportRecord, DbError> {
        let row: ReportRow = sqlx::query_as(
            r#"
            SELECT * FROM emergency_reports WHERE report_id = $1
            "#,
        )
        .bind(report_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound(report_id.to_string()))?;

        row.into_domain().map_err(DbError::Serialization)
    }

    /// List emergency reports with pagination and filters
    pub async fn list_reports(&self, query: ListReportsQuery) -> Result<PaginatedReports, DbError> {
        let page = query.page.unwrap_or(1).max(1);
        // Clamp from both ends: a page_size of 0 would mean LIMIT 0 and a
        // division by zero in the total_pages math below.
        let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, 100);
        let offset = (page - 1) as u64 * page_size as u64;

        // Build dynamic query
        let mut conditions = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(ref status) = query.status {
            params.push(status.clone());
            conditions.push(format!("status = ${}", params.len()));
        }

        if let Some(ref severity) = query.severity {
            params.push(severity.clone());
            conditions.push(format!("severity = ${}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        // Get total count
        let count_query = format!(
            "SELECT COUNT(*) as count FROM emergency_reports {}",
            where_clause
        );

        let total_count: i64 = {
            let mut q = sqlx::query_scalar(&count_query);
            for param in &params {
                q = q.bind(param);
            }
            q.fetch_one(&self.pool).await?
        };

        // Get reports
        let select_query = format!(
            r#"
            SELECT * FROM emergency_reports
            {}
            ORDER BY generated_at DESC
            LIMIT {} OFFSET {}
            "#,
            where_clause, page_size, offset
        );

        let rows: Vec<ReportRow> = {
            let mut q = sqlx::query_as(&select_query);
            for param in &params {
                q = q.bind(param);
            }
            q.fetch_all(&self.pool).await?
        };

        let reports: Vec<ReportRecord> = rows
            .into_iter()
            .filter_map(|row| row.into_domain().ok())
            .collect();

        let total_pages = ((total_count as f64) / (page_size as f64)).ceil() as u32;

        Ok(PaginatedReports {
            reports,
            page,
            page_size,
            total_count,
            total_pages,
        })
    }
}

#[async_trait]
impl ReportStore for ReportRepository {
    async fn save(&self, report: &ReportRecord) -> Result<String, DbError> {
        self.upsert(report).await?;
        Ok(report.report_id.clone())
    }

    async fn get_by_id(&self, report_id: &str) -> Result<ReportRecord, DbError> {
        self.get_report(report_id).await
    }

    async fn list(&self, query: ListReportsQuery) -> Result<PaginatedReports, DbError> {
        self.list_reports(query).await
    }
}
