use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Complete triage extraction from LLM
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedTriage {
    /// Emergency service category
    #[schemars(
        description = "Type of emergency service needed: fire, police, ambulance, mentalhealth, foodbank, or a short free-form category such as 'flood' when none of those fit"
    )]
    pub emergency_type: String,

    pub severity: ExtractedSeverity,

    pub person_profile: Option<ExtractedPersonProfile>,

    pub location: Option<ExtractedLocation>,

    /// When the incident happened, if the caller said
    #[schemars(
        description = "ISO-8601 timestamp of when the incident occurred (e.g. 2025-08-12T07:00:00Z), only if stated in the transcript"
    )]
    pub time_of_incident: Option<String>,

    #[schemars(description = "Number of people affected, only if stated")]
    pub people_affected: Option<u32>,

    /// Dangers mentioned by the caller, in order
    #[schemars(
        description = "Immediate risks in the order they were mentioned (e.g. 'smoke inhalation', 'rising water')"
    )]
    pub immediate_risks: Vec<String>,

    /// Resources the caller asked for or clearly needs, in order
    #[schemars(
        description = "Resources needed in the order they were mentioned (e.g. 'fire engine', 'ambulance')"
    )]
    pub resources_needed: Vec<String>,

    #[schemars(description = "Any other operationally relevant detail from the call")]
    pub additional_notes: Option<String>,
}

/// Severity the model may assign. There is deliberately no unknown
/// variant here; a call the model cannot grade fails extraction
/// wholesale instead of producing a half-graded record.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExtractedSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedPersonProfile {
    #[schemars(description = "Age of the affected person, as stated (e.g. '34', 'elderly')")]
    pub age: Option<String>,

    pub gender: Option<String>,

    #[schemars(description = "Medical conditions mentioned for the affected person")]
    pub medical_conditions: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedLocation {
    #[schemars(description = "Street address or place name, as stated")]
    pub address: Option<String>,

    #[schemars(description = "Nearby landmarks mentioned by the caller")]
    pub landmarks: Option<String>,

    #[schemars(description = "Coordinates if the caller provided them")]
    pub coordinates: Option<String>,
}
