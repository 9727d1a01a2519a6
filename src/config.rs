//! Configuration loading and management for pdfsumma.
//!
//! Loads settings from `pdfsumma.toml` with environment variable overrides for sensitive data.

use crate::budget::DEFAULT_MAX_CHARS;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_FILE: &str = "pdfsumma.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("missing required API key for provider: {0}")]
    MissingApiKey(String),
    #[error("no models configured for provider: {0}")]
    NoModels(String),
    #[error("model {0} is not in the configured model list")]
    UnknownModel(String),
}

/// Supported LLM vendors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Groq,
    OpenAi,
    Gemini,
    HuggingFace,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Groq => "groq",
            Provider::OpenAi => "openai",
            Provider::Gemini => "gemini",
            Provider::HuggingFace => "huggingface",
        }
    }

    /// Environment variable holding this provider's API key
    pub fn env_key(&self) -> &'static str {
        match self {
            Provider::Groq => "GROQ_API_KEY",
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::Gemini => "GEMINI_API_KEY",
            Provider::HuggingFace => "HUGGINGFACE_API_KEY",
        }
    }

    /// Models offered when the config file does not list any
    pub fn default_models(&self) -> Vec<String> {
        let models: &[&str] = match self {
            Provider::Groq => &[
                "openai/gpt-oss-120b",
                "llama3-70b-8192",
                "llama3-8b-8192",
                "gemma-7b-it",
            ],
            Provider::OpenAi => &["gpt-3.5-turbo", "gpt-4", "gpt-4-turbo-preview"],
            Provider::Gemini => &["gemini-2.0-flash", "gemini-2.5-flash", "gemini-2.5-pro"],
            Provider::HuggingFace => &[
                "facebook/bart-large-cnn",
                "google/flan-t5-large",
                "mistralai/Mistral-7B-Instruct-v0.2",
            ],
        };
        models.iter().map(|m| m.to_string()).collect()
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// LLM provider: "groq", "openai", "gemini" or "huggingface"
    #[serde(default)]
    pub provider: Provider,
    /// Default model identifier (e.g., "openai/gpt-oss-120b")
    #[serde(default)]
    pub model: Option<String>,
    /// Models the user may pick from
    #[serde(default)]
    pub models: Vec<String>,
    /// System message sent ahead of every prompt
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

/// Request sizing for generation calls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Input budget in characters
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// API keys configuration (loaded from environment)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiConfig {
    #[serde(default)]
    pub groq_key: Option<String>,
    #[serde(default)]
    pub openai_key: Option<String>,
    #[serde(default)]
    pub gemini_key: Option<String>,
    #[serde(default)]
    pub huggingface_key: Option<String>,
    /// Override the vendor base URL, mostly useful for proxies
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

impl Config {
    /// Load configuration from `path`, or from the default locations when
    /// `path` is `None`. Missing default files fall back to built-in settings.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::find_config_file() {
                Some(found) => Self::from_file(&found)?,
                None => Config::default(),
            },
        };

        // Override API keys from environment variables
        config.apply_env(|key| std::env::var(key).ok());
        config.fill_defaults();
        Ok(config)
    }

    /// Parse a config file without consulting the environment
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(content)?;
        config.fill_defaults();
        Ok(config)
    }

    /// Override API keys using `lookup` (normally `std::env::var`).
    /// Blank values leave the file's key in place.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |provider: Provider| lookup(provider.env_key()).filter(|k| !k.trim().is_empty());
        if let Some(key) = lookup(Provider::Groq) {
            self.api.groq_key = Some(key);
        }
        if let Some(key) = lookup(Provider::OpenAi) {
            self.api.openai_key = Some(key);
        }
        if let Some(key) = lookup(Provider::Gemini) {
            self.api.gemini_key = Some(key);
        }
        if let Some(key) = lookup(Provider::HuggingFace) {
            self.api.huggingface_key = Some(key);
        }
    }

    fn fill_defaults(&mut self) {
        if self.agent.models.is_empty() {
            self.agent.models = self.agent.provider.default_models();
        }
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        // Check current directory first
        let local_config = PathBuf::from(CONFIG_FILE);
        if local_config.exists() {
            return Some(local_config);
        }

        // Check home directory
        let home_config = dirs::home_dir()?
            .join(".config")
            .join("pdfsumma")
            .join(CONFIG_FILE);
        home_config.exists().then_some(home_config)
    }

    /// Get the API key for the configured provider
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        let key = match self.agent.provider {
            Provider::Groq => self.api.groq_key.as_deref(),
            Provider::OpenAi => self.api.openai_key.as_deref(),
            Provider::Gemini => self.api.gemini_key.as_deref(),
            Provider::HuggingFace => self.api.huggingface_key.as_deref(),
        };
        key.filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey(self.agent.provider.to_string()))
    }

    /// The model used when the caller does not pick one
    pub fn default_model(&self) -> Result<&str, ConfigError> {
        match &self.agent.model {
            Some(model) => Ok(model),
            None => self
                .agent
                .models
                .first()
                .map(String::as_str)
                .ok_or_else(|| ConfigError::NoModels(self.agent.provider.to_string())),
        }
    }

    /// Check that `model` is on the allow-list
    pub fn check_model(&self, model: &str) -> Result<(), ConfigError> {
        if self.agent.models.iter().any(|m| m == model) {
            Ok(())
        } else {
            Err(ConfigError::UnknownModel(model.to_string()))
        }
    }

    /// Startup checks: a credential and a usable model list
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api_key()?;
        if self.agent.models.is_empty() {
            return Err(ConfigError::NoModels(self.agent.provider.to_string()));
        }
        let model = self.default_model()?;
        self.check_model(model)
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        let provider = Provider::default();
        Self {
            provider,
            model: None,
            models: provider.default_models(),
            system_prompt: default_system_prompt(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            max_chars: default_max_chars(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_max_chars() -> usize {
    DEFAULT_MAX_CHARS
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_system_prompt() -> String {
    "You are a high-precision document summarization model. \
     Summarize PDF content strictly based on the provided text only. \
     Use only the information explicitly present in the document. \
     Do not infer, assume, or add external knowledge. \
     Preserve key facts, definitions, steps, formulas, and conclusions. \
     Remove repetition and non-essential details. \
     If information is missing or unclear, do not guess."
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_gives_groq_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.agent.provider, Provider::Groq);
        assert_eq!(config.generation.max_tokens, 1024);
        assert_eq!(config.generation.max_chars, 12_000);
        assert_eq!(config.default_model().unwrap(), "openai/gpt-oss-120b");
        assert_eq!(config.agent.models.len(), 4);
    }

    #[test]
    fn provider_defaults_follow_the_provider() {
        let config = Config::from_toml("[agent]\nprovider = \"gemini\"\n").unwrap();
        assert_eq!(config.agent.provider, Provider::Gemini);
        assert_eq!(config.default_model().unwrap(), "gemini-2.0-flash");
    }

    #[test]
    fn parses_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[agent]
provider = "openai"
model = "gpt-4"
models = ["gpt-4", "gpt-3.5-turbo"]

[generation]
max_tokens = 512
max_chars = 8000

[api]
openai_key = "sk-file"
"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.agent.provider, Provider::OpenAi);
        assert_eq!(config.default_model().unwrap(), "gpt-4");
        assert_eq!(config.generation.max_tokens, 512);
        assert_eq!(config.generation.max_chars, 8000);
        assert_eq!(config.generation.timeout_secs, 120);
        assert_eq!(config.api_key().unwrap(), "sk-file");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn environment_overrides_file_keys() {
        let mut config = Config::from_toml("[api]\ngroq_key = \"from-file\"\n").unwrap();
        config.apply_env(|key| (key == "GROQ_API_KEY").then(|| "from-env".to_string()));
        assert_eq!(config.api_key().unwrap(), "from-env");
    }

    #[test]
    fn blank_environment_value_keeps_file_key() {
        let mut config = Config::from_toml("[api]\ngroq_key = \"from-file\"\n").unwrap();
        config.apply_env(|key| (key == "GROQ_API_KEY").then(String::new));
        assert_eq!(config.api_key().unwrap(), "from-file");

        config.apply_env(|_| Some("   ".to_string()));
        assert_eq!(config.api_key().unwrap(), "from-file");
    }

    #[test]
    fn huggingface_provider_reads_its_own_key() {
        let mut config = Config::from_toml("[agent]\nprovider = \"huggingface\"\n").unwrap();
        assert_eq!(config.agent.provider, Provider::HuggingFace);
        assert_eq!(config.default_model().unwrap(), "facebook/bart-large-cnn");
        assert!(config.api_key().is_err());

        config.apply_env(|key| (key == "HUGGINGFACE_API_KEY").then(|| "hf-key".to_string()));
        assert_eq!(config.api_key().unwrap(), "hf-key");
    }

    #[test]
    fn missing_key_is_reported() {
        let config = Config::from_toml("").unwrap();
        let err = config.api_key().unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey(ref p) if p == "groq"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let config = Config::from_toml("[api]\ngroq_key = \"  \"\n").unwrap();
        assert!(config.api_key().is_err());
    }

    #[test]
    fn default_model_must_be_allowed() {
        let config = Config::from_toml(
            "[agent]\nmodel = \"mystery\"\n[api]\ngroq_key = \"k\"\n",
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownModel(ref m)) if m == "mystery"
        ));
        assert!(config.check_model("llama3-70b-8192").is_ok());
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        assert!(matches!(
            Config::from_toml("[agent\nprovider ="),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn unknown_provider_is_rejected() {
        assert!(Config::from_toml("[agent]\nprovider = \"acme\"\n").is_err());
    }

    #[test]
    fn missing_explicit_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
    }
}
