//! PDF text extraction.
//!
//! Uses pdf-extract to pull text page by page.

use crate::stats::TextProfile;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use thiserror::Error;

/// Appended after every page's text
const PAGE_SEPARATOR: &str = "\n\n";

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("failed to read file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("invalid or corrupted PDF: {0}")]
    InvalidPdf(String),
    #[error("no readable text found in PDF")]
    NoText,
}

/// Text extracted from a PDF, in page order.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    text: String,
    page_count: usize,
}

impl Document {
    /// Extract a document from a PDF file on disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ExtractError> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }

    /// Extract a document from PDF bytes held in memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ExtractError> {
        // pdf-extract panics on some malformed inputs
        let pages = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        }))
        .map_err(|_| ExtractError::InvalidPdf("parser aborted".to_string()))?
        .map_err(|e| ExtractError::InvalidPdf(e.to_string()))?;

        tracing::debug!(pages = pages.len(), "extracted PDF text");
        Self::from_pages(pages)
    }

    /// Build a document from already-extracted page texts
    pub fn from_pages<I, S>(pages: I) -> Result<Self, ExtractError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        let mut page_count = 0;
        for page in pages {
            text.push_str(page.as_ref());
            text.push_str(PAGE_SEPARATOR);
            page_count += 1;
        }

        if text.trim().is_empty() {
            return Err(ExtractError::NoText);
        }

        Ok(Self { text, page_count })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// The first `max_chars` characters, for previews
    pub fn preview(&self, max_chars: usize) -> &str {
        match self.text.char_indices().nth(max_chars) {
            Some((idx, _)) => &self.text[..idx],
            None => &self.text,
        }
    }

    pub fn profile(&self) -> TextProfile {
        TextProfile::of(&self.text)
    }
}
