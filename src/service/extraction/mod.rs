//! Transcript triage extraction service using LLM
//!
//! Turns a raw emergency-call transcript into a structured TriageRecord.
//! Extraction never fails outward: any provider error, timeout, or
//! rejected output yields the degraded record with the cause logged.

use rig::client::CompletionClient;
use rig::providers::openai;
use std::time::Duration;

use crate::model::extraction::ExtractedTriage;
use crate::model::TriageRecord;
use crate::service::extraction::convert::convert_triage;
use crate::service::extraction::prompts::{build_triage_prompt, TRIAGE_SYSTEM_PROMPT};
use crate::service::extraction::validation::validate_extracted_triage;
use crate::service::llm::LlmClient;

pub mod convert;
pub mod prompts;
pub mod validation;

/// Environment variable for the extraction model (defaults to gpt-4o-mini if not set)
const ENV_EXTRACTION_MODEL: &str = "TRIAGE_EXTRACTION_MODEL";

/// Default model for transcript extraction
const DEFAULT_MODEL: &str = openai::GPT_4O_MINI;

/// Transcripts beyond this length are truncated before prompting
const MAX_TRANSCRIPT_CHARS: usize = 12_000;

/// Service for extracting structured triage data from call transcripts
pub struct TriageExtractionService {
    llm_client: LlmClient,
    model: String,
    timeout: Duration,
}

impl TriageExtractionService {
    /// Create a new extraction service
    ///
    /// Uses a shared LLM client passed from startup.
    /// Optionally uses TRIAGE_EXTRACTION_MODEL env var (defaults to gpt-4o-mini).
    pub fn new(llm_client: LlmClient, timeout: Duration) -> Self {
        let model =
            std::env::var(ENV_EXTRACTION_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        tracing::info!(
            model = %model,
            timeout_secs = timeout.as_secs(),
            "Triage extraction service initialized"
        );

        Self {
            llm_client,
            model,
            timeout,
        }
    }

    /// Extract a triage record from a call transcript
    ///
    /// Never fails: a provider error, timeout, or output rejected by
    /// validation produces `TriageRecord::degraded()` instead, and the
    /// cause goes to the log.
    pub async fn extract(&self, transcript: &str) -> TriageRecord {
        let start_time = std::time::Instant::now();

        let transcript = match transcript.char_indices().nth(MAX_TRANSCRIPT_CHARS) {
            Some((byte_idx, _)) => {
                tracing::debug!(
                    original_length = transcript.len(),
                    truncated_chars = MAX_TRANSCRIPT_CHARS,
                    "Truncating transcript before extraction"
                );
                &transcript[..byte_idx]
            }
            None => transcript,
        };

        let prompt = build_triage_prompt(transcript);
        let prompt_length = prompt.len();

        tracing::debug!(
            model = %self.model,
            prompt_length = prompt_length,
            "Initiating OpenAI API call for triage extraction"
        );

        // temperature=0.0 and seed so the same call triages the same way
        let extractor = self
            .llm_client
            .openai_client()
            .extractor::<ExtractedTriage>(&self.model)
            .preamble(TRIAGE_SYSTEM_PROMPT)
            .additional_params(serde_json::json!({
                "temperature": 0.0,
                "seed": 42
            }))
            .build();

        let extracted = match tokio::time::timeout(self.timeout, extractor.extract(&prompt)).await {
            Ok(Ok(result)) => {
                let elapsed = start_time.elapsed();
                tracing::info!(
                    model = %self.model,
                    elapsed_ms = elapsed.as_millis(),
                    prompt_length = prompt_length,
                    "OpenAI API call for triage extraction completed successfully"
                );
                result
            }
            Ok(Err(e)) => {
                let elapsed = start_time.elapsed();
                tracing::error!(
                    model = %self.model,
                    elapsed_ms = elapsed.as_millis(),
                    prompt_length = prompt_length,
                    error = %e,
                    "OpenAI API call for triage extraction failed, returning degraded record"
                );
                return TriageRecord::degraded();
            }
            Err(_) => {
                tracing::warn!(
                    model = %self.model,
                    timeout_secs = self.timeout.as_secs(),
                    prompt_length = prompt_length,
                    "Triage extraction timed out, returning degraded record"
                );
                return TriageRecord::degraded();
            }
        };

        let validation = validate_extracted_triage(&extracted);
        if !validation.is_valid {
            tracing::error!(
                errors = ?validation.errors,
                "Extracted triage rejected by validation, returning degraded record"
            );
            return TriageRecord::degraded();
        }
        if !validation.warnings.is_empty() {
            tracing::warn!(
                warnings = ?validation.warnings,
                "Extracted triage has quality warnings"
            );
        }

        convert_triage(extracted)
    }
}
