//! Summarization strategies and length settings.

use clap::ValueEnum;
use std::fmt;

/// How long the summary should be.
///
/// Only extractive and abstractive summaries honour this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Length {
    Short,
    #[default]
    Medium,
    Long,
}

impl Length {
    pub fn as_str(&self) -> &'static str {
        match self {
            Length::Short => "short",
            Length::Medium => "medium",
            Length::Long => "long",
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The summary style to ask the model for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Pick key sentences verbatim from the source
    Extractive,
    /// Paraphrase the source in new words
    Abstractive,
    BulletPoints,
    /// Answer a fixed set of analytical questions
    QuestionBased,
    KeyInsights,
    /// Caller-supplied instructions wrapped around the text
    Custom(String),
}

impl Strategy {
    /// Human readable label, used in reports and exports.
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Extractive => "Extractive (Key Sentences)",
            Strategy::Abstractive => "Abstractive (AI-Generated)",
            Strategy::BulletPoints => "Bullet Points",
            Strategy::QuestionBased => "Question-Based Analysis",
            Strategy::KeyInsights => "Key Insights",
            Strategy::Custom(_) => "Custom",
        }
    }

    /// Whether the length setting changes the prompt for this strategy.
    pub fn uses_length(&self) -> bool {
        matches!(self, Strategy::Extractive | Strategy::Abstractive)
    }

    /// Sampling temperature for this strategy.
    ///
    /// Abstractive summaries need room to paraphrase; everything else should
    /// stay close to the source.
    pub fn temperature(&self) -> f32 {
        match self {
            Strategy::Abstractive => 0.7,
            Strategy::Extractive
            | Strategy::BulletPoints
            | Strategy::QuestionBased
            | Strategy::KeyInsights
            | Strategy::Custom(_) => 0.2,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Strategy names as accepted on the command line.
///
/// `Custom` carries no instructions here; they are attached when the
/// request is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyKind {
    Extractive,
    Abstractive,
    Bullets,
    Questions,
    Insights,
    Custom,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 6] = [
        StrategyKind::Extractive,
        StrategyKind::Abstractive,
        StrategyKind::Bullets,
        StrategyKind::Questions,
        StrategyKind::Insights,
        StrategyKind::Custom,
    ];

    /// Turn the kind into a full strategy. Returns `None` for `Custom`
    /// without instructions.
    pub fn into_strategy(self, instructions: Option<String>) -> Option<Strategy> {
        let strategy = match self {
            StrategyKind::Extractive => Strategy::Extractive,
            StrategyKind::Abstractive => Strategy::Abstractive,
            StrategyKind::Bullets => Strategy::BulletPoints,
            StrategyKind::Questions => Strategy::QuestionBased,
            StrategyKind::Insights => Strategy::KeyInsights,
            StrategyKind::Custom => {
                let instructions = instructions.filter(|i| !i.trim().is_empty())?;
                Strategy::Custom(instructions)
            }
        };
        Some(strategy)
    }

    pub fn label(&self) -> &'static str {
        match self {
            StrategyKind::Extractive => Strategy::Extractive.label(),
            StrategyKind::Abstractive => Strategy::Abstractive.label(),
            StrategyKind::Bullets => Strategy::BulletPoints.label(),
            StrategyKind::Questions => Strategy::QuestionBased.label(),
            StrategyKind::Insights => Strategy::KeyInsights.label(),
            StrategyKind::Custom => "Custom",
        }
    }
}

/// A single summarization request.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRequest {
    pub strategy: Strategy,
    pub length: Length,
    pub model: String,
}

impl SummaryRequest {
    pub fn new(strategy: Strategy, length: Length, model: impl Into<String>) -> Self {
        Self {
            strategy,
            length,
            model: model.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_abstractive_runs_warm() {
        assert_eq!(Strategy::Abstractive.temperature(), 0.7);
        for s in [
            Strategy::Extractive,
            Strategy::BulletPoints,
            Strategy::QuestionBased,
            Strategy::KeyInsights,
            Strategy::Custom("x".into()),
        ] {
            assert_eq!(s.temperature(), 0.2, "{s}");
        }
    }

    #[test]
    fn length_matters_for_extractive_and_abstractive_only() {
        assert!(Strategy::Extractive.uses_length());
        assert!(Strategy::Abstractive.uses_length());
        assert!(!Strategy::BulletPoints.uses_length());
        assert!(!Strategy::QuestionBased.uses_length());
        assert!(!Strategy::KeyInsights.uses_length());
        assert!(!Strategy::Custom("x".into()).uses_length());
    }

    #[test]
    fn custom_kind_requires_instructions() {
        assert_eq!(StrategyKind::Custom.into_strategy(None), None);
        assert_eq!(StrategyKind::Custom.into_strategy(Some("  ".into())), None);
        assert_eq!(
            StrategyKind::Custom.into_strategy(Some("List the dates".into())),
            Some(Strategy::Custom("List the dates".into()))
        );
    }

    #[test]
    fn builtin_kinds_ignore_instructions() {
        assert_eq!(
            StrategyKind::Bullets.into_strategy(Some("ignored".into())),
            Some(Strategy::BulletPoints)
        );
        assert_eq!(
            StrategyKind::Questions.into_strategy(None),
            Some(Strategy::QuestionBased)
        );
    }

    #[test]
    fn length_defaults_to_medium() {
        assert_eq!(Length::default(), Length::Medium);
        assert_eq!(Length::Long.to_string(), "long");
    }
}
