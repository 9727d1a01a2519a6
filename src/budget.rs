//! Character budgeting for model input.
//!
//! Models have a bounded context window. We approximate it with a character
//! count rather than tokens.

/// Default input budget in characters.
pub const DEFAULT_MAX_CHARS: usize = 12_000;

/// Fraction of the budget a sentence boundary must reach before we cut there.
const SENTENCE_CUT_THRESHOLD: f64 = 0.8;

/// Trim `text` so it fits in `max_chars` characters.
///
/// Text already within budget is returned unchanged. Longer text is cut at the
/// last '.' inside the window when that period sits in the final 20% of the
/// budget; otherwise it is cut at exactly `max_chars`.
pub fn budget(text: &str, max_chars: usize) -> String {
    // Byte offset just past the `max_chars`-th character, if the text is longer
    let window_end = match text.char_indices().nth(max_chars) {
        Some((idx, _)) => idx,
        None => return text.to_string(),
    };
    let window = &text[..window_end];

    if let Some(period) = window.rfind('.') {
        let period_pos = window[..period].chars().count();
        if period_pos as f64 >= max_chars as f64 * SENTENCE_CUT_THRESHOLD {
            return window[..=period].to_string();
        }
    }

    window.to_string()
}
