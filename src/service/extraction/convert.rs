//! Conversion from LLM-extracted triage payloads to domain records

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::model::extraction::{
    ExtractedLocation, ExtractedPersonProfile, ExtractedSeverity, ExtractedTriage,
};
use crate::model::{LocationInfo, PersonProfile, Severity, TriageRecord};

/// Convert extracted severity to the domain severity
pub fn convert_severity(severity: ExtractedSeverity) -> Severity {
    match severity {
        ExtractedSeverity::Low => Severity::Low,
        ExtractedSeverity::Medium => Severity::Medium,
        ExtractedSeverity::High => Severity::High,
        ExtractedSeverity::Critical => Severity::Critical,
    }
}

/// Convert an extracted triage payload into a domain record.
/// Text fields are trimmed, blank values dropped, and the incident
/// timestamp parsed; a timestamp that cannot be parsed is omitted
/// rather than failing the record.
pub fn convert_triage(extracted: ExtractedTriage) -> TriageRecord {
    let time_of_incident = extracted
        .time_of_incident
        .as_deref()
        .and_then(parse_incident_time);

    TriageRecord {
        emergency_type: extracted.emergency_type.trim().to_string(),
        severity: convert_severity(extracted.severity),
        person_profile: extracted.person_profile.and_then(convert_person_profile),
        location: extracted.location.and_then(convert_location),
        time_of_incident,
        people_affected: extracted.people_affected,
        immediate_risks: clean_list(extracted.immediate_risks),
        resources_needed: clean_list(extracted.resources_needed),
        additional_notes: clean_optional(extracted.additional_notes),
    }
}

fn convert_person_profile(profile: ExtractedPersonProfile) -> Option<PersonProfile> {
    let profile = PersonProfile {
        age: clean_optional(profile.age),
        gender: clean_optional(profile.gender),
        medical_conditions: clean_optional(profile.medical_conditions),
    };

    // An all-blank profile carries no information
    if profile.age.is_none() && profile.gender.is_none() && profile.medical_conditions.is_none() {
        None
    } else {
        Some(profile)
    }
}

fn convert_location(location: ExtractedLocation) -> Option<LocationInfo> {
    let location = LocationInfo {
        address: clean_optional(location.address),
        landmarks: clean_optional(location.landmarks),
        coordinates: clean_optional(location.coordinates),
    };

    if location.address.is_none() && location.landmarks.is_none() && location.coordinates.is_none()
    {
        None
    } else {
        Some(location)
    }
}

/// Parse an incident timestamp from model output.
/// Tries RFC 3339 first, then common naive formats taken as UTC.
pub fn parse_incident_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| Utc.from_utc_datetime(&naive));
    }

    None
}

fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn clean_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn extracted_fire() -> ExtractedTriage {
        ExtractedTriage {
            emergency_type: "  fire ".to_string(),
            severity: ExtractedSeverity::Critical,
            person_profile: Some(ExtractedPersonProfile {
                age: Some("34".to_string()),
                gender: None,
                medical_conditions: Some(" asthma ".to_string()),
            }),
            location: Some(ExtractedLocation {
                address: Some("12 Elm Street".to_string()),
                landmarks: None,
                coordinates: None,
            }),
            time_of_incident: Some("2025-08-12T07:00:00Z".to_string()),
            people_affected: Some(3),
            immediate_risks: vec![
                "smoke inhalation".to_string(),
                "  ".to_string(),
                "structural collapse".to_string(),
            ],
            resources_needed: vec!["fire engine".to_string(), String::new()],
            additional_notes: Some("   ".to_string()),
        }
    }

    #[test]
    fn converts_and_cleans_fields() {
        let record = convert_triage(extracted_fire());
        assert_eq!(record.emergency_type, "fire");
        assert_eq!(record.severity, Severity::Critical);
        assert_eq!(
            record.person_profile.as_ref().unwrap().medical_conditions,
            Some("asthma".to_string())
        );
        assert_eq!(record.immediate_risks, vec!["smoke inhalation", "structural collapse"]);
        assert_eq!(record.resources_needed, vec!["fire engine"]);
        assert!(record.additional_notes.is_none());
        assert!(record.time_of_incident.is_some());
    }

    #[test]
    fn all_blank_profile_becomes_none() {
        let mut extracted = extracted_fire();
        extracted.person_profile = Some(ExtractedPersonProfile {
            age: Some("  ".to_string()),
            gender: None,
            medical_conditions: None,
        });
        let record = convert_triage(extracted);
        assert!(record.person_profile.is_none());
    }

    #[test]
    fn severity_maps_one_to_one() {
        assert_eq!(convert_severity(ExtractedSeverity::Low), Severity::Low);
        assert_eq!(convert_severity(ExtractedSeverity::Medium), Severity::Medium);
        assert_eq!(convert_severity(ExtractedSeverity::High), Severity::High);
        assert_eq!(convert_severity(ExtractedSeverity::Critical), Severity::Critical);
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let parsed = parse_incident_time("2025-08-12T09:00:00+02:00").unwrap();
        assert_eq!(parsed.hour(), 7);
    }

    #[test]
    fn parses_naive_datetime_as_utc() {
        let parsed = parse_incident_time("2025-08-12 07:00:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2025-08-12T07:00:00+00:00");
    }

    #[test]
    fn parses_bare_date_at_midnight() {
        let parsed = parse_incident_time("2025-08-12").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2025-08-12T00:00:00+00:00");
    }

    #[test]
    fn rejects_unparseable_timestamps() {
        assert!(parse_incident_time("yesterday morning").is_none());
        assert!(parse_incident_time("").is_none());
    }
}
