//! Validation logic for LLM-extracted triage records
//!
//! Catches outputs that matched the schema but cannot anchor a dispatch
//! decision

use crate::model::extraction::ExtractedTriage;
use crate::service::extraction::convert::parse_incident_time;

/// Result of triage validation
#[derive(Debug)]
pub struct TriageValidationResult {
    /// Whether the extraction passed validation
    pub is_valid: bool,
    /// Critical errors that force the degraded record
    pub errors: Vec<String>,
    /// Warnings for quality issues that keep the record
    pub warnings: Vec<String>,
}

impl TriageValidationResult {
    /// Create a new validation result with no issues
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add an error to the validation result
    pub fn add_error(&mut self, error: String) {
        self.is_valid = false;
        self.errors.push(error);
    }

    /// Add a warning to the validation result
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }
}

/// Validate an extracted triage payload
///
/// Checks:
/// 1. emergency_type is present (error; severity is guaranteed by the schema)
/// 2. emergency_type is a category, not a sentence (warning)
/// 3. time_of_incident is parseable when provided (warning; field is dropped)
/// 4. risk and resource entries are non-blank (warning; entries are pruned)
pub fn validate_extracted_triage(extracted: &ExtractedTriage) -> TriageValidationResult {
    let mut result = TriageValidationResult::valid();

    let emergency_type = extracted.emergency_type.trim();
    if emergency_type.is_empty() {
        result.add_error("Extraction returned an empty emergency_type".to_string());
    } else if emergency_type.len() > 80 {
        result.add_warning(format!(
            "emergency_type looks like a sentence, not a category: '{}'",
            emergency_type.chars().take(80).collect::<String>()
        ));
    }

    if let Some(ref raw) = extracted.time_of_incident {
        if !raw.trim().is_empty() && parse_incident_time(raw).is_none() {
            result.add_warning(format!(
                "time_of_incident '{}' is not parseable and will be dropped",
                raw
            ));
        }
    }

    let blank_risks = extracted
        .immediate_risks
        .iter()
        .filter(|r| r.trim().is_empty())
        .count();
    if blank_risks > 0 {
        result.add_warning(format!(
            "{} blank immediate_risks entries will be pruned",
            blank_risks
        ));
    }

    let blank_resources = extracted
        .resources_needed
        .iter()
        .filter(|r| r.trim().is_empty())
        .count();
    if blank_resources > 0 {
        result.add_warning(format!(
            "{} blank resources_needed entries will be pruned",
            blank_resources
        ));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::extraction::ExtractedSeverity;

    fn create_test_extraction() -> ExtractedTriage {
        ExtractedTriage {
            emergency_type: "fire".to_string(),
            severity: ExtractedSeverity::High,
            person_profile: None,
            location: None,
            time_of_incident: Some("2025-08-12T07:00:00Z".to_string()),
            people_affected: Some(2),
            immediate_risks: vec!["smoke inhalation".to_string()],
            resources_needed: vec!["fire engine".to_string()],
            additional_notes: None,
        }
    }

    #[test]
    fn test_valid_extraction() {
        let result = validate_extracted_triage(&create_test_extraction());
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_empty_emergency_type_is_error() {
        let mut extracted = create_test_extraction();
        extracted.emergency_type = "   ".to_string();
        let result = validate_extracted_triage(&extracted);
        assert!(!result.is_valid);
        assert!(result.errors[0].contains("empty emergency_type"));
    }

    #[test]
    fn test_sentence_emergency_type_is_warning() {
        let mut extracted = create_test_extraction();
        extracted.emergency_type =
            "the caller reported that a large fire had broken out in the kitchen of the restaurant downstairs"
                .to_string();
        let result = validate_extracted_triage(&extracted);
        assert!(result.is_valid);
        assert!(result.warnings.iter().any(|w| w.contains("not a category")));
    }

    #[test]
    fn test_unparseable_time_is_warning() {
        let mut extracted = create_test_extraction();
        extracted.time_of_incident = Some("just before sunrise".to_string());
        let result = validate_extracted_triage(&extracted);
        assert!(result.is_valid);
        assert!(result.warnings.iter().any(|w| w.contains("not parseable")));
    }

    #[test]
    fn test_blank_list_entries_are_warnings() {
        let mut extracted = create_test_extraction();
        extracted.immediate_risks.push("  ".to_string());
        extracted.resources_needed.push(String::new());
        let result = validate_extracted_triage(&extracted);
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 2);
    }
}
