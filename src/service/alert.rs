//! Alert dispatch for triaged emergencies
//!
//! The simulation maps severity to an estimated response window and
//! stamps each alert with a timestamp-derived id. The dispatcher trait
//! is the seam where a real CAD or paging integration would plug in.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;

use crate::model::{AlertRecord, Severity, TriageRecord};
use crate::service::ids;

#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("Alert dispatch failed: {0}")]
    DispatchFailed(String),
}

/// Trait for alert dispatchers
#[async_trait]
pub trait AlertDispatcher: Send + Sync {
    /// Dispatch an alert for the given triage record
    async fn dispatch(&self, record: &TriageRecord) -> Result<AlertRecord, AlertError>;
}

/// Dispatcher that simulates notifying the relevant emergency service
pub struct SimulatedDispatcher;

#[async_trait]
impl AlertDispatcher for SimulatedDispatcher {
    async fn dispatch(&self, record: &TriageRecord) -> Result<AlertRecord, AlertError> {
        Ok(simulate_alert(record))
    }
}

/// Estimated response window for a severity level
pub fn response_time_bracket(severity: &Severity) -> &'static str {
    match severity {
        Severity::Critical => "2-5 minutes",
        Severity::High => "5-10 minutes",
        Severity::Medium => "10-20 minutes",
        Severity::Low => "30-60 minutes",
        Severity::Unknown => "unknown",
    }
}

/// Simulate alerting the emergency service named by the record.
///
/// A record that carries neither an emergency type nor a severity is
/// malformed and yields `alert_sent = false` with an explanation. A
/// degraded record still alerts: its type string is "unknown", which is
/// enough to route to a human dispatcher.
pub fn simulate_alert(record: &TriageRecord) -> AlertRecord {
    if record.emergency_type.trim().is_empty() && record.severity == Severity::Unknown {
        return AlertRecord {
            alert_sent: false,
            service_alerted: None,
            severity_reported: None,
            estimated_response_time: None,
            alert_time: Utc::now(),
            alert_id: ids::alert_token(),
            error: Some(
                "Triage record carries neither an emergency type nor a severity".to_string(),
            ),
        };
    }

    AlertRecord {
        alert_sent: true,
        service_alerted: Some(record.emergency_type.clone()),
        severity_reported: Some(record.severity.clone()),
        estimated_response_time: Some(response_time_bracket(&record.severity).to_string()),
        alert_time: Utc::now(),
        alert_id: ids::alert_token(),
        error: None,
    }
}

/// Alert record for a dispatch attempt that did not complete
fn failed_alert(error: String) -> AlertRecord {
    AlertRecord {
        alert_sent: false,
        service_alerted: None,
        severity_reported: None,
        estimated_response_time: None,
        alert_time: Utc::now(),
        alert_id: ids::alert_token(),
        error: Some(error),
    }
}

/// Service wrapping a dispatcher with a time bound
pub struct AlertService {
    dispatcher: Arc<dyn AlertDispatcher>,
    timeout: Duration,
}

impl AlertService {
    pub fn new(dispatcher: Arc<dyn AlertDispatcher>, timeout: Duration) -> Self {
        Self {
            dispatcher,
            timeout,
        }
    }

    /// Send an alert for the record.
    ///
    /// Never propagates dispatcher failures: an error or timeout is
    /// recorded as a failed alert so the triage pipeline keeps moving.
    pub async fn send_alert(&self, record: &TriageRecord) -> AlertRecord {
        match tokio::time::timeout(self.timeout, self.dispatcher.dispatch(record)).await {
            Ok(Ok(alert)) => {
                tracing::info!(
                    alert_id = %alert.alert_id,
                    alert_sent = alert.alert_sent,
                    service = alert.service_alerted.as_deref().unwrap_or("none"),
                    "Alert dispatch completed"
                );
                alert
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    error = %e,
                    "Alert dispatch failed, recording failed alert"
                );
                failed_alert(e.to_string())
            }
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.timeout.as_secs(),
                    "Alert dispatch timed out, recording failed alert"
                );
                failed_alert("Alert dispatch timed out".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fire_record(severity: Severity) -> TriageRecord {
        TriageRecord {
            emergency_type: "fire".to_string(),
            severity,
            ..TriageRecord::degraded()
        }
    }

    struct FailingDispatcher;

    #[async_trait]
    impl AlertDispatcher for FailingDispatcher {
        async fn dispatch(&self, _record: &TriageRecord) -> Result<AlertRecord, AlertError> {
            Err(AlertError::DispatchFailed("paging gateway unreachable".to_string()))
        }
    }

    struct SlowDispatcher;

    #[async_trait]
    impl AlertDispatcher for SlowDispatcher {
        async fn dispatch(&self, record: &TriageRecord) -> Result<AlertRecord, AlertError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(simulate_alert(record))
        }
    }

    #[test]
    fn brackets_cover_every_severity() {
        assert_eq!(response_time_bracket(&Severity::Critical), "2-5 minutes");
        assert_eq!(response_time_bracket(&Severity::High), "5-10 minutes");
        assert_eq!(response_time_bracket(&Severity::Medium), "10-20 minutes");
        assert_eq!(response_time_bracket(&Severity::Low), "30-60 minutes");
        assert_eq!(response_time_bracket(&Severity::Unknown), "unknown");
    }

    #[test]
    fn alert_reports_service_and_window() {
        let alert = simulate_alert(&fire_record(Severity::Critical));
        assert!(alert.alert_sent);
        assert_eq!(alert.service_alerted.as_deref(), Some("fire"));
        assert_eq!(alert.severity_reported, Some(Severity::Critical));
        assert_eq!(alert.estimated_response_time.as_deref(), Some("2-5 minutes"));
        assert!(alert.alert_id.starts_with("EM-"));
        assert!(alert.error.is_none());
    }

    #[test]
    fn malformed_record_is_not_alerted() {
        let record = TriageRecord {
            emergency_type: String::new(),
            ..TriageRecord::degraded()
        };
        let alert = simulate_alert(&record);
        assert!(!alert.alert_sent);
        assert!(alert.service_alerted.is_none());
        assert!(alert.error.is_some());
    }

    #[test]
    fn degraded_record_still_alerts_with_unknown_window() {
        let alert = simulate_alert(&TriageRecord::degraded());
        assert!(alert.alert_sent);
        assert_eq!(alert.service_alerted.as_deref(), Some("unknown"));
        assert_eq!(alert.estimated_response_time.as_deref(), Some("unknown"));
    }

    #[test]
    fn alert_ids_are_distinct_per_call() {
        let record = fire_record(Severity::High);
        let first = simulate_alert(&record);
        let second = simulate_alert(&record);
        assert_ne!(first.alert_id, second.alert_id);
    }

    #[tokio::test]
    async fn dispatcher_error_becomes_failed_alert() {
        let service = AlertService::new(Arc::new(FailingDispatcher), Duration::from_secs(5));
        let alert = service.send_alert(&fire_record(Severity::High)).await;
        assert!(!alert.alert_sent);
        assert!(alert.error.as_deref().unwrap().contains("paging gateway unreachable"));
    }

    #[tokio::test(start_paused = true)]
    async fn dispatcher_timeout_becomes_failed_alert() {
        let service = AlertService::new(Arc::new(SlowDispatcher), Duration::from_secs(1));
        let alert = service.send_alert(&fire_record(Severity::High)).await;
        assert!(!alert.alert_sent);
        assert_eq!(alert.error.as_deref(), Some("Alert dispatch timed out"));
    }
}
