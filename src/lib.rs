//! # pdfsumma
//!
//! Summarise PDF documents with a hosted LLM.
//!
//! ## Features
//!
//! - **Six strategies**: extractive, abstractive, bullet points, question-based, key insights and custom prompts
//! - **Bounded requests**: input is trimmed to a character budget, preferring sentence ends
//! - **Provider agnostic**: Groq and OpenAI over their chat-completions APIs, Gemini via rstructor
//! - **Statistics**: word counts and compression ratio for every summary

pub mod budget;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod llm;
pub mod logging;
pub mod pipeline;
pub mod prompt;
pub mod stats;
pub mod strategy;

pub use config::Config;
pub use document::Document;
pub use error::Error;
pub use llm::{Client, Generator};
pub use pipeline::{SummaryResult, Summarizer};
pub use stats::Statistics;
pub use strategy::{Length, Strategy, StrategyKind, SummaryRequest};
