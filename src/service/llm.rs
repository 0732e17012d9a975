//! Shared LLM client for the extraction and translation services
//!
//! One OpenAI provider client is built at startup and cloned into every
//! service that talks to the model.

use rig::providers::openai;

/// Shared LLM client wrapper
#[derive(Clone)]
pub struct LlmClient {
    client: openai::Client,
}

impl LlmClient {
    /// Create a new LLM client with the provided API key
    pub fn new(api_key: &str) -> Result<Self, String> {
        let client = openai::Client::builder(api_key)
            .build()
            .map_err(|e| format!("Failed to create OpenAI client: {}", e))?;

        Ok(Self { client })
    }

    /// Get a reference to the underlying OpenAI client
    /// Use this to create extractors with per-service configuration
    pub fn openai_client(&self) -> &openai::Client {
        &self.client
    }
}
