use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Severity of an emergency as assessed from the caller transcript.
/// `Unknown` is reserved for records the extraction pipeline could not
/// populate; the extraction model itself only ever assigns the four
/// real levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
    Unknown,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
            Severity::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PersonProfile {
    pub age: Option<String>,
    pub gender: Option<String>,
    pub medical_conditions: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LocationInfo {
    pub address: Option<String>,
    pub landmarks: Option<String>,
    pub coordinates: Option<String>,
}

// Structured triage data extracted from one emergency call
// - emergency_type: free-form service category ("fire", "flood", ...)
// - severity: assessed severity level
// - person_profile / location: caller details when stated
// - immediate_risks / resources_needed: ordered as mentioned in the call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TriageRecord {
    pub emergency_type: String,
    pub severity: Severity,
    pub person_profile: Option<PersonProfile>,
    pub location: Option<LocationInfo>,
    pub time_of_incident: Option<DateTime<Utc>>,
    pub people_affected: Option<u32>,
    pub immediate_risks: Vec<String>,
    pub resources_needed: Vec<String>,
    pub additional_notes: Option<String>,
}

impl TriageRecord {
    /// The record produced when extraction fails for any reason.
    /// Every field is at its empty state; consumers can rely on this
    /// exact shape rather than probing for partially-filled blends.
    pub fn degraded() -> Self {
        Self {
            emergency_type: "unknown".to_string(),
            severity: Severity::Unknown,
            person_profile: None,
            location: None,
            time_of_incident: None,
            people_affected: None,
            immediate_risks: Vec::new(),
            resources_needed: Vec::new(),
            additional_notes: None,
        }
    }

    pub fn is_degraded(&self) -> bool {
        *self == Self::degraded()
    }
}

/// Outcome of notifying an emergency service about a triage record.
/// Created once per record and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AlertRecord {
    pub alert_sent: bool,
    pub service_alerted: Option<String>,
    pub severity_reported: Option<Severity>,
    pub estimated_response_time: Option<String>,
    pub alert_time: DateTime<Utc>,
    pub alert_id: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Open,
    Closed,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Open => "open",
            ReportStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Persistent incident report. Owns copies of the triage and alert data
/// so later mutation of either source cannot rewrite history. Reports
/// always start `Open`; closing them belongs to a different workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReportRecord {
    pub report_id: String,
    pub generated_at: DateTime<Utc>,
    pub emergency_details: TriageRecord,
    pub response_details: Option<AlertRecord>,
    pub status: ReportStatus,
}

/// Caller guidance derived from a triage record and its alert outcome.
/// Computed fresh per request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NextStepsRecord {
    pub recommended_steps: Vec<String>,
    pub priority: Severity,
    pub follow_up_required: bool,
    pub additional_notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TriageRequest {
    pub transcript: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TriageResponse {
    pub triage: TriageRecord,
    pub alert: AlertRecord,
    pub next_steps: NextStepsRecord,
    pub report_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TranslationRequest {
    pub text: String,
    pub target_language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TranslationResponse {
    pub original_text: String,
    pub translated_text: String,
    pub target_language: String,
    pub translated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn full_record() -> TriageRecord {
        TriageRecord {
            emergency_type: "fire".to_string(),
            severity: Severity::Critical,
            person_profile: Some(PersonProfile {
                age: Some("34".to_string()),
                gender: Some("female".to_string()),
                medical_conditions: Some("asthma".to_string()),
            }),
            location: Some(LocationInfo {
                address: Some("12 Elm Street".to_string()),
                landmarks: Some("opposite the bakery".to_string()),
                coordinates: Some("51.5007,-0.1246".to_string()),
            }),
            time_of_incident: Some(Utc.with_ymd_and_hms(2025, 8, 12, 7, 0, 0).unwrap()),
            people_affected: Some(3),
            immediate_risks: vec!["smoke inhalation".to_string(), "structural collapse".to_string()],
            resources_needed: vec!["fire engine".to_string(), "ambulance".to_string()],
            additional_notes: Some("caller trapped on second floor".to_string()),
        }
    }

    #[test]
    fn severity_serializes_to_lowercase_words() {
        for (severity, expected) in [
            (Severity::Low, "\"low\""),
            (Severity::Medium, "\"medium\""),
            (Severity::High, "\"high\""),
            (Severity::Critical, "\"critical\""),
            (Severity::Unknown, "\"unknown\""),
        ] {
            assert_eq!(serde_json::to_string(&severity).unwrap(), expected);
        }
    }

    #[test]
    fn severity_display_matches_wire_form() {
        assert_eq!(Severity::Critical.to_string(), "critical");
        assert_eq!(Severity::Unknown.to_string(), "unknown");
    }

    #[test]
    fn triage_record_round_trips_through_json() {
        let record = full_record();
        let json = serde_json::to_string(&record).unwrap();
        let parsed: TriageRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn degraded_record_has_empty_shape() {
        let record = TriageRecord::degraded();
        assert_eq!(record.emergency_type, "unknown");
        assert_eq!(record.severity, Severity::Unknown);
        assert!(record.person_profile.is_none());
        assert!(record.location.is_none());
        assert!(record.time_of_incident.is_none());
        assert!(record.people_affected.is_none());
        assert!(record.immediate_risks.is_empty());
        assert!(record.resources_needed.is_empty());
        assert!(record.additional_notes.is_none());
        assert!(record.is_degraded());
    }

    #[test]
    fn populated_record_is_not_degraded() {
        assert!(!full_record().is_degraded());
    }

    #[test]
    fn report_status_round_trips() {
        let json = serde_json::to_string(&ReportStatus::Open).unwrap();
        assert_eq!(json, "\"open\"");
        let parsed: ReportStatus = serde_json::from_str("\"closed\"").unwrap();
        assert_eq!(parsed, ReportStatus::Closed);
    }
}
