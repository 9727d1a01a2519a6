//! Chat-completions client for OpenAI-compatible APIs (Groq, OpenAI).

use super::{GenerationOptions, Generator, LlmError};
use crate::config::Provider;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// User-Agent string identifying this client
const USER_AGENT: &str = concat!("pdfsumma/", env!("CARGO_PKG_VERSION"));

/// Token limit for the liveness check
const CHECK_TOKENS: u32 = 5;

pub(crate) const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub(crate) const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 2],
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    stream: bool,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct OpenAiCompatClient {
    provider: Provider,
    base_url: String,
    api_key: String,
    models: Vec<String>,
    system_prompt: String,
    timeout: Duration,
}

impl OpenAiCompatClient {
    pub fn new(
        provider: Provider,
        base_url: String,
        api_key: String,
        models: Vec<String>,
        system_prompt: String,
        timeout_secs: u64,
    ) -> Self {
        Self {
            provider,
            base_url,
            api_key,
            models,
            system_prompt,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    fn http(&self) -> Result<Client, reqwest::Error> {
        Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .build()
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl Generator for OpenAiCompatClient {
    fn list_models(&self) -> Vec<String> {
        self.models.clone()
    }

    async fn check_connection(&self) -> bool {
        let Some(model) = self.models.first() else {
            return false;
        };
        let options = GenerationOptions {
            max_tokens: CHECK_TOKENS,
            ..GenerationOptions::default()
        };
        match self.generate(model, "test", options).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(provider = %self.provider, error = %e, "connection check failed");
                false
            }
        }
    }

    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        options: GenerationOptions,
    ) -> Result<Option<String>, LlmError> {
        let body = ChatRequest {
            model,
            messages: [
                Message {
                    role: "system",
                    content: &self.system_prompt,
                },
                Message {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            top_p: 1.0,
            stream: false,
        };

        let response = self
            .http()?
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                provider: self.provider.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let raw = response.text().await?;
        let parsed: ChatResponse =
            serde_json::from_str(&raw).map_err(|e| LlmError::ParseError(format!("{}: {}", e, raw)))?;

        // A 200 without choices usually carries an error object worth keeping
        match parsed.choices.into_iter().next() {
            Some(choice) => Ok(choice.message.content),
            None => Err(LlmError::ParseError(format!("response has no choices: {}", raw))),
        }
    }
}
