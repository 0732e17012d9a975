pub mod alert;
pub mod extraction;
pub mod ids;
pub mod llm;
pub mod next_steps;
pub mod report;
pub mod translation;
pub mod triage;

pub use alert::AlertService;
pub use extraction::TriageExtractionService;
pub use llm::LlmClient;
pub use report::ReportService;
pub use translation::TranslationService;
pub use triage::TriageService;
