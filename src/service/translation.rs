//! Text translation service for caller-facing messages
//!
//! Lets operators hand guidance back to non-English-speaking callers.
//! Unlike extraction this surface is allowed to fail; the operator can
//! always fall back to the original text.

use rig::client::CompletionClient;
use rig::providers::openai;

use crate::model::TranslationResponse;
use crate::service::llm::LlmClient;

/// Environment variable for the translation model (defaults to gpt-4o if not set)
const ENV_TRANSLATION_MODEL: &str = "TRANSLATION_MODEL";

/// Default model for translation. Stronger than the extraction default
/// because fidelity matters more than latency here.
const DEFAULT_MODEL: &str = openai::GPT_4O;

/// Maximum retries for a translation call
const MAX_RETRIES: usize = 3;

/// Initial delay between retries in milliseconds
const INITIAL_RETRY_DELAY_MS: u64 = 500;

/// System prompt for translation
const TRANSLATION_SYSTEM_PROMPT: &str = "You are a translator for an emergency response service. \
Translate the given text faithfully into the requested language, keeping instructions imperative \
and unambiguous. Do not add, drop, or soften any instruction. \
Your output must be structured JSON only and conform to the requested schema.";

#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("Translation failed: {0}")]
    TranslationFailed(String),
}

/// Service for translating caller-facing text
pub struct TranslationService {
    llm_client: LlmClient,
    model: String,
}

impl TranslationService {
    /// Create a new translation service
    ///
    /// Uses a shared LLM client passed from startup.
    /// Optionally uses TRANSLATION_MODEL env var (defaults to gpt-4o).
    pub fn new(llm_client: LlmClient) -> Self {
        let model =
            std::env::var(ENV_TRANSLATION_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        tracing::info!(model = %model, "Translation service initialized");

        Self { llm_client, model }
    }

    /// Translate text into the target language, retrying transient
    /// provider failures with exponential backoff
    pub async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<TranslationResponse, TranslationError> {
        #[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
        struct ExtractedTranslation {
            #[schemars(description = "The complete translated text, nothing else")]
            translated_text: String,
        }

        let prompt = format!(
            "Translate the following text to {}.\n\n## Text\n\n{}",
            target_language, text
        );

        let extractor = self
            .llm_client
            .openai_client()
            .extractor::<ExtractedTranslation>(&self.model)
            .preamble(TRANSLATION_SYSTEM_PROMPT)
            .build();

        let start_time = std::time::Instant::now();
        let mut retry_delay_ms = INITIAL_RETRY_DELAY_MS;

        for attempt in 1..=MAX_RETRIES {
            match extractor.extract(&prompt).await {
                Ok(result) => {
                    tracing::info!(
                        model = %self.model,
                        target_language = %target_language,
                        elapsed_ms = start_time.elapsed().as_millis(),
                        "Translation completed"
                    );
                    return Ok(TranslationResponse {
                        original_text: text.to_string(),
                        translated_text: result.translated_text,
                        target_language: target_language.to_string(),
                        translated_at: chrono::Utc::now(),
                    });
                }
                Err(e) => {
                    if attempt == MAX_RETRIES {
                        tracing::error!(
                            error = %e,
                            attempts = attempt,
                            "Translation failed after retries"
                        );
                        return Err(TranslationError::TranslationFailed(e.to_string()));
                    }
                    tracing::debug!(
                        attempt = attempt,
                        error = %e,
                        retry_delay_ms = retry_delay_ms,
                        "Retrying translation"
                    );
                    tokio::time::sleep(std::time::Duration::from_millis(retry_delay_ms)).await;
                    retry_delay_ms *= 2;
                }
            }
        }

        Err(TranslationError::TranslationFailed(
            "Translation retries exhausted".to_string(),
        ))
    }
}
