//! Gemini client built on rstructor.

use super::{GenerationOptions, Generator, LlmError};
use rstructor::{GeminiClient as RsGeminiClient, GeminiModel, LLMClient};

pub struct GeminiClient {
    api_key: String,
    models: Vec<String>,
    system_prompt: String,
}

impl GeminiClient {
    pub fn new(api_key: String, models: Vec<String>, system_prompt: String) -> Self {
        Self {
            api_key,
            models,
            system_prompt,
        }
    }
}

impl Generator for GeminiClient {
    fn list_models(&self) -> Vec<String> {
        self.models.clone()
    }

    async fn check_connection(&self) -> bool {
        let Some(model) = self.models.first() else {
            return false;
        };
        let options = GenerationOptions {
            max_tokens: 5,
            ..GenerationOptions::default()
        };
        match self.generate(model, "test", options).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(provider = "gemini", error = %e, "connection check failed");
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
        let client = RsGeminiClient::new(self.api_key.clone())
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?
            .model(parse_gemini_model(model))
            .temperature(options.temperature)
            .max_tokens(options.max_tokens);

        // Gemini has no separate system role here, so the persona leads the prompt
        let full_prompt = format!("{}\n\n{}", self.system_prompt, prompt);

        let result = client
            .generate_with_metadata(&full_prompt)
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        Ok(Some(result.text))
    }
}

/// Parse a model string into a GeminiModel
fn parse_gemini_model(model: &str) -> GeminiModel {
    match model {
        "gemini-2.0-flash" => GeminiModel::Gemini20Flash,
        "gemini-2.5-flash" => GeminiModel::Gemini25Flash,
        "gemini-2.5-pro" => GeminiModel::Gemini25Pro,
        other => {
            tracing::warn!(model = other, "unknown Gemini model, using gemini-2.0-flash");
            GeminiModel::Gemini20Flash
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_models_map_to_variants() {
        assert!(matches!(
            parse_gemini_model("gemini-2.5-pro"),
            GeminiModel::Gemini25Pro
        ));
        assert!(matches!(
            parse_gemini_model("gemini-2.5-flash"),
            GeminiModel::Gemini25Flash
        ));
    }

    #[test]
    fn unknown_models_fall_back_to_flash() {
        assert!(matches!(
            parse_gemini_model("gemini-1.0-ultra"),
            GeminiModel::Gemini20Flash
        ));
    }

    #[test]
    fn lists_configured_models() {
        let client = GeminiClient::new("k".into(), vec!["gemini-2.5-pro".into()], String::new());
        assert_eq!(client.list_models(), vec!["gemini-2.5-pro".to_string()]);
    }
}
