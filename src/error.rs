//! Crate-level failure kinds reported to the caller.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The PDF could not be read, or held no text
    #[error("could not extract text from PDF: {0}")]
    ExtractionFailed(String),
    /// The model errored or returned nothing usable
    #[error("failed to generate summary: {0}")]
    GenerationFailed(String),
    /// No usable provider, credential or model list
    #[error("configuration missing: {0}")]
    ConfigurationMissing(String),
}

impl From<crate::config::ConfigError> for Error {
    fn from(err: crate::config::ConfigError) -> Self {
        Error::ConfigurationMissing(err.to_string())
    }
}

impl From<crate::document::ExtractError> for Error {
    fn from(err: crate::document::ExtractError) -> Self {
        Error::ExtractionFailed(err.to_string())
    }
}

impl From<crate::llm::LlmError> for Error {
    fn from(err: crate::llm::LlmError) -> Self {
        Error::GenerationFailed(err.to_string())
    }
}
