//! The summarization pipeline: budget, prompt, generate, normalize.
//!
//! One call to [`Summarizer::run`] issues at most one generation request and
//! never retries. Any failure of the generator, including an empty answer,
//! comes back as [`Error::GenerationFailed`].

use crate::budget::{budget, DEFAULT_MAX_CHARS};
use crate::config::Config;
use crate::error::Error;
use crate::llm::{GenerationOptions, Generator};
use crate::prompt;
use crate::stats::Statistics;
use crate::strategy::{Strategy, SummaryRequest};

/// Output token cap for every summary call
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// A generated summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryResult {
    pub text: String,
    pub strategy: Strategy,
    pub model: String,
}

impl SummaryResult {
    /// Compare this summary against the text it was generated from
    pub fn statistics(&self, original: &str) -> Statistics {
        Statistics::compute(original, &self.text)
    }
}

/// Runs summary requests against a generator.
pub struct Summarizer<'a, G> {
    generator: &'a G,
    max_chars: usize,
    max_tokens: u32,
}

impl<'a, G: Generator> Summarizer<'a, G> {
    pub fn new(generator: &'a G) -> Self {
        Self {
            generator,
            max_chars: DEFAULT_MAX_CHARS,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Take input budget and token cap from configuration
    pub fn with_config(generator: &'a G, config: &Config) -> Self {
        Self {
            generator,
            max_chars: config.generation.max_chars,
            max_tokens: config.generation.max_tokens,
        }
    }

    pub fn max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub async fn run(
        &self,
        document_text: &str,
        request: &SummaryRequest,
    ) -> Result<SummaryResult, Error> {
        let text = budget(document_text, self.max_chars);
        tracing::debug!(
            original_chars = document_text.chars().count(),
            budgeted_chars = text.chars().count(),
            max_chars = self.max_chars,
            "budgeted input"
        );

        let prompt = prompt::build(&request.strategy, &text, request.length);
        let options = GenerationOptions {
            max_tokens: self.max_tokens,
            temperature: request.strategy.temperature(),
        };
        tracing::debug!(
            strategy = request.strategy.label(),
            length = %request.length,
            model = %request.model,
            prompt_chars = prompt.chars().count(),
            temperature = options.temperature,
            max_tokens = options.max_tokens,
            "sending summary request"
        );

        let reply = self
            .generator
            .generate(&request.model, &prompt, options)
            .await
            .map_err(|e| {
                tracing::warn!(model = %request.model, error = %e, "generation failed");
                Error::from(e)
            })?;

        // Whitespace-only answers carry no summary
        let text = match reply.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => {
                tracing::warn!(model = %request.model, "model returned no text");
                return Err(Error::GenerationFailed(
                    "model returned an empty response".to_string(),
                ));
            }
        };

        tracing::info!(
            model = %request.model,
            summary_chars = text.chars().count(),
            "summary generated"
        );

        Ok(SummaryResult {
            text,
            strategy: request.strategy.clone(),
            model: request.model.clone(),
        })
    }
}
