//! Text generation clients.
//!
//! Every vendor implements [`Generator`]; [`Client`] picks one from the
//! configured provider.

mod gemini;
mod huggingface;
mod openai_compat;

pub use gemini::GeminiClient;
pub use huggingface::HuggingFaceClient;
pub use openai_compat::OpenAiCompatClient;

use crate::config::{Config, ConfigError, Provider};
use std::future::Future;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("LLM request failed: {0}")]
    RequestFailed(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{provider} returned status {status}: {body}")]
    Status {
        provider: String,
        status: u16,
        body: String,
    },
    #[error("failed to parse response: {0}")]
    ParseError(String),
}

/// Sampling options for one completion call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_tokens: 1024,
            temperature: 0.2,
        }
    }
}

/// A text completion service.
pub trait Generator {
    /// Models this client may be asked to use
    fn list_models(&self) -> Vec<String>;

    /// Cheap liveness check
    fn check_connection(&self) -> impl Future<Output = bool>;

    /// Complete `prompt` with `model`.
    ///
    /// `Ok(None)` means the service answered without any content.
    fn generate(
        &self,
        model: &str,
        prompt: &str,
        options: GenerationOptions,
    ) -> impl Future<Output = Result<Option<String>, LlmError>>;
}

/// The configured vendor client
pub enum Client {
    OpenAiCompat(OpenAiCompatClient),
    Gemini(GeminiClient),
    HuggingFace(HuggingFaceClient),
}

impl Client {
    /// Build the client for the configured provider.
    ///
    /// Fails when the provider's API key is missing.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let api_key = config.api_key()?.to_string();
        let models = config.agent.models.clone();
        let base_url = |default: &str| {
            config
                .api
                .base_url
                .clone()
                .unwrap_or_else(|| default.to_string())
        };
        let chat_client = |default: &str| {
            Client::OpenAiCompat(OpenAiCompatClient::new(
                config.agent.provider,
                base_url(default),
                api_key.clone(),
                models.clone(),
                config.agent.system_prompt.clone(),
                config.generation.timeout_secs,
            ))
        };

        let client = match config.agent.provider {
            Provider::Groq => chat_client(openai_compat::GROQ_BASE_URL),
            Provider::OpenAi => chat_client(openai_compat::OPENAI_BASE_URL),
            Provider::Gemini => Client::Gemini(GeminiClient::new(
                api_key.clone(),
                models.clone(),
                config.agent.system_prompt.clone(),
            )),
            Provider::HuggingFace => Client::HuggingFace(HuggingFaceClient::new(
                base_url(huggingface::HUGGINGFACE_BASE_URL),
                api_key.clone(),
                models.clone(),
            )),
        };
        Ok(client)
    }
}

impl Generator for Client {
    fn list_models(&self) -> Vec<String> {
        match self {
            Client::OpenAiCompat(c) => c.list_models(),
            Client::Gemini(c) => c.list_models(),
            Client::HuggingFace(c) => c.list_models(),
        }
    }

    async fn check_connection(&self) -> bool {
        match self {
            Client::OpenAiCompat(c) => c.check_connection().await,
            Client::Gemini(c) => c.check_connection().await,
            Client::HuggingFace(c) => c.check_connection().await,
        }
    }

    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        options: GenerationOptions,
    ) -> Result<Option<String>, LlmError> {
        match self {
            Client::OpenAiCompat(c) => c.generate(model, prompt, options).await,
            Client::Gemini(c) => c.generate(model, prompt, options).await,
            Client::HuggingFace(c) => c.generate(model, prompt, options).await,
        }
    }
}
