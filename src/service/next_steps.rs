//! Caller guidance derived from a triage record and its alert outcome
//!
//! Step templates are immutable statics; every call assembles a fresh
//! list, so a critical-severity directive prepended for one caller can
//! never leak into the guidance for the next.

use crate::model::{AlertRecord, NextStepsRecord, Severity, TriageRecord};

/// Directive prepended to the steps of a critical emergency
const CRITICAL_DIRECTIVE: &str = "This is a CRITICAL situation - act immediately";

const FIRE_STEPS: &[&str] = &[
    "Evacuate the building immediately",
    "Call 911 if not already done",
    "Move to a safe distance",
    "Do not re-enter until cleared by authorities",
];

const POLICE_STEPS: &[&str] = &[
    "Stay in a safe location",
    "Cooperate with authorities",
    "Document any relevant details",
];

const AMBULANCE_STEPS: &[&str] = &[
    "Stay on the line with emergency services",
    "Follow first aid instructions if provided",
    "Clear a path for emergency responders",
    "Have medical information ready if available",
];

const MENTAL_HEALTH_STEPS: &[&str] = &[
    "Stay on the line with the crisis counselor",
    "Remove any dangerous objects from vicinity",
    "Focus on breathing and grounding techniques",
    "Have a trusted person join if possible",
];

const FOOD_BANK_STEPS: &[&str] = &[
    "Document current food supplies",
    "Identify dietary restrictions",
    "Prepare for delivery or pickup instructions",
];

const OTHER_STEPS: &[&str] = &[
    "Stay calm",
    "Follow instructions from authorities",
    "Document the situation",
];

/// Known guidance categories. Anything the normalizer cannot match
/// lands on `Other`; category resolution never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepCategory {
    Fire,
    Police,
    Ambulance,
    MentalHealth,
    FoodBank,
    Other,
}

/// Resolve the guidance category for a free-form emergency type.
/// Matching ignores case, whitespace, and separators, so "Mental Health"
/// and "mental-health" both resolve to `MentalHealth`.
pub fn category_for(emergency_type: &str) -> StepCategory {
    let normalized: String = emergency_type
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase();

    match normalized.as_str() {
        "fire" => StepCategory::Fire,
        "police" => StepCategory::Police,
        "ambulance" => StepCategory::Ambulance,
        "mentalhealth" => StepCategory::MentalHealth,
        "foodbank" => StepCategory::FoodBank,
        _ => StepCategory::Other,
    }
}

fn template_for(category: StepCategory) -> &'static [&'static str] {
    match category {
        StepCategory::Fire => FIRE_STEPS,
        StepCategory::Police => POLICE_STEPS,
        StepCategory::Ambulance => AMBULANCE_STEPS,
        StepCategory::MentalHealth => MENTAL_HEALTH_STEPS,
        StepCategory::FoodBank => FOOD_BANK_STEPS,
        StepCategory::Other => OTHER_STEPS,
    }
}

/// Derive caller guidance from a triage record and its alert outcome.
/// Never fails; unrecognized emergency types get the generic steps.
pub fn find_next_steps(record: &TriageRecord, alert: &AlertRecord) -> NextStepsRecord {
    let template = template_for(category_for(&record.emergency_type));

    let mut steps: Vec<String> = Vec::with_capacity(template.len() + 1);
    if record.severity == Severity::Critical {
        steps.push(CRITICAL_DIRECTIVE.to_string());
    }
    steps.extend(template.iter().map(|s| s.to_string()));

    let additional_notes = if alert.alert_sent {
        alert
            .estimated_response_time
            .as_ref()
            .map(|window| format!("Responders alerted; estimated response time {}", window))
    } else {
        Some("Alert was not sent; contact emergency services directly".to_string())
    };

    NextStepsRecord {
        recommended_steps: steps,
        priority: record.severity.clone(),
        follow_up_required: matches!(record.severity, Severity::Critical | Severity::High),
        additional_notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::alert::simulate_alert;

    fn record(emergency_type: &str, severity: Severity) -> TriageRecord {
        TriageRecord {
            emergency_type: emergency_type.to_string(),
            severity,
            ..TriageRecord::degraded()
        }
    }

    fn steps_for(emergency_type: &str, severity: Severity) -> NextStepsRecord {
        let triage = record(emergency_type, severity);
        let alert = simulate_alert(&triage);
        find_next_steps(&triage, &alert)
    }

    #[test]
    fn critical_fire_gets_directive_then_canonical_steps() {
        let next = steps_for("fire", Severity::Critical);
        assert_eq!(next.recommended_steps.len(), 5);
        assert_eq!(next.recommended_steps[0], CRITICAL_DIRECTIVE);
        assert_eq!(next.recommended_steps[1..].to_vec(), FIRE_STEPS.to_vec());
        assert!(next.follow_up_required);
        assert_eq!(next.priority, Severity::Critical);
    }

    #[test]
    fn low_fire_after_critical_fire_sees_clean_template() {
        // A critical call must not contaminate the template for later calls
        let _ = steps_for("fire", Severity::Critical);
        let next = steps_for("fire", Severity::Low);
        assert_eq!(
            next.recommended_steps,
            vec![
                "Evacuate the building immediately",
                "Call 911 if not already done",
                "Move to a safe distance",
                "Do not re-enter until cleared by authorities",
            ]
        );
        assert!(!next.follow_up_required);
    }

    #[test]
    fn repeated_critical_calls_prepend_exactly_once() {
        let first = steps_for("ambulance", Severity::Critical);
        let second = steps_for("ambulance", Severity::Critical);
        assert_eq!(first.recommended_steps, second.recommended_steps);
        assert_eq!(
            second
                .recommended_steps
                .iter()
                .filter(|s| *s == CRITICAL_DIRECTIVE)
                .count(),
            1
        );
    }

    #[test]
    fn unrecognized_type_falls_back_to_generic_steps() {
        let next = steps_for("alien_invasion", Severity::Medium);
        assert_eq!(
            next.recommended_steps,
            vec!["Stay calm", "Follow instructions from authorities", "Document the situation"]
        );
    }

    #[test]
    fn category_matching_ignores_case_and_separators() {
        assert_eq!(category_for("Mental Health"), StepCategory::MentalHealth);
        assert_eq!(category_for("mental-health"), StepCategory::MentalHealth);
        assert_eq!(category_for("  FIRE "), StepCategory::Fire);
        assert_eq!(category_for("food_bank"), StepCategory::FoodBank);
        assert_eq!(category_for("flood"), StepCategory::Other);
    }

    #[test]
    fn follow_up_tracks_severity() {
        assert!(steps_for("police", Severity::Critical).follow_up_required);
        assert!(steps_for("police", Severity::High).follow_up_required);
        assert!(!steps_for("police", Severity::Medium).follow_up_required);
        assert!(!steps_for("police", Severity::Low).follow_up_required);
        assert!(!steps_for("police", Severity::Unknown).follow_up_required);
    }

    #[test]
    fn notes_carry_response_window_when_alerted() {
        let next = steps_for("fire", Severity::High);
        assert_eq!(
            next.additional_notes.as_deref(),
            Some("Responders alerted; estimated response time 5-10 minutes")
        );
    }

    #[test]
    fn notes_redirect_caller_when_alert_failed() {
        let triage = record("", Severity::Unknown);
        let alert = simulate_alert(&triage);
        assert!(!alert.alert_sent);
        let next = find_next_steps(&triage, &alert);
        assert_eq!(
            next.additional_notes.as_deref(),
            Some("Alert was not sent; contact emergency services directly")
        );
    }
}
