//! Triage pipeline orchestration
//!
//! One entry point takes a transcript through extraction, alerting,
//! caller guidance, and report filing.

use std::sync::Arc;

use crate::model::{AlertRecord, NextStepsRecord, TriageRecord};
use crate::service::alert::AlertService;
use crate::service::extraction::TriageExtractionService;
use crate::service::next_steps::find_next_steps;
use crate::service::report::{ReportError, ReportService};

#[derive(Debug, thiserror::Error)]
pub enum TriageServiceError {
    #[error("Transcript must not be empty")]
    EmptyTranscript,

    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Everything produced for one processed transcript
#[derive(Debug, Clone)]
pub struct TriageOutcome {
    pub triage: TriageRecord,
    pub alert: AlertRecord,
    pub next_steps: NextStepsRecord,
    pub report_id: String,
}

/// Orchestrates the full triage pipeline for one transcript
pub struct TriageService {
    extraction: TriageExtractionService,
    alerts: AlertService,
    reports: Arc<ReportService>,
}

impl TriageService {
    pub fn new(
        extraction: TriageExtractionService,
        alerts: AlertService,
        reports: Arc<ReportService>,
    ) -> Self {
        Self {
            extraction,
            alerts,
            reports,
        }
    }

    /// Process one call transcript end to end.
    ///
    /// Extraction and alerting cannot fail the pipeline; a failed
    /// extraction degrades the record and a failed alert is recorded as
    /// unsent. Only an empty transcript or a report that cannot be
    /// filed surfaces as an error.
    pub async fn process_transcript(
        &self,
        transcript: &str,
    ) -> Result<TriageOutcome, TriageServiceError> {
        if transcript.trim().is_empty() {
            return Err(TriageServiceError::EmptyTranscript);
        }

        let start_time = std::time::Instant::now();

        let triage = self.extraction.extract(transcript).await;
        let alert = self.alerts.send_alert(&triage).await;
        let next_steps = find_next_steps(&triage, &alert);
        let report = self.reports.file_report(&triage, Some(&alert)).await?;

        tracing::info!(
            report_id = %report.report_id,
            emergency_type = %triage.emergency_type,
            severity = %triage.severity,
            alert_sent = alert.alert_sent,
            degraded = triage.is_degraded(),
            elapsed_ms = start_time.elapsed().as_millis(),
            "Transcript processed"
        );

        Ok(TriageOutcome {
            triage,
            alert,
            next_steps,
            report_id: report.report_id,
        })
    }
}
