//! Word and character statistics for documents and summaries.

/// Comparison between a source text and its summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    pub original_words: usize,
    pub original_chars: usize,
    pub summary_words: usize,
    pub summary_chars: usize,
    /// Percentage of words removed. Negative when the summary is longer.
    pub compression_ratio: f64,
    /// Words removed. Negative when the summary is longer.
    pub reduction_words: i64,
}

impl Statistics {
    pub fn compute(original: &str, summary: &str) -> Self {
        let original_words = word_count(original);
        let summary_words = word_count(summary);
        let reduction_words = original_words as i64 - summary_words as i64;

        let compression_ratio = if original_words > 0 {
            reduction_words as f64 / original_words as f64 * 100.0
        } else {
            0.0
        };

        Self {
            original_words,
            original_chars: original.chars().count(),
            summary_words,
            summary_chars: summary.chars().count(),
            compression_ratio,
            reduction_words,
        }
    }
}

/// A quick profile of a single text, shown before summarising.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextProfile {
    pub words: usize,
    pub chars: usize,
    pub sentences: usize,
    pub paragraphs: usize,
    pub avg_word_length: f64,
    pub avg_sentence_length: f64,
}

impl TextProfile {
    pub fn of(text: &str) -> Self {
        let words = word_count(text);
        let chars = text.chars().count();
        let sentences = sentence_count(text);
        let paragraphs = text.split("\n\n").filter(|p| !p.trim().is_empty()).count();

        Self {
            words,
            chars,
            sentences,
            paragraphs,
            avg_word_length: if words > 0 { chars as f64 / words as f64 } else { 0.0 },
            avg_sentence_length: if sentences > 0 {
                words as f64 / sentences as f64
            } else {
                0.0
            },
        }
    }

    /// Estimated reading time at the default 200 words per minute.
    pub fn reading_time(&self) -> String {
        reading_time(self.words, 200)
    }
}

/// Whitespace-delimited word count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Count non-blank runs of text between `.`, `!` and `?`.
pub fn sentence_count(text: &str) -> usize {
    text.split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .count()
}

pub fn reading_time(words: usize, words_per_minute: usize) -> String {
    let minutes = words as f64 / words_per_minute.max(1) as f64;
    if minutes < 1.0 {
        "< 1 minute".to_string()
    } else if minutes < 60.0 {
        let whole = minutes as u64;
        format!("{} minute{}", whole, if whole == 1 { "" } else { "s" })
    } else {
        let hours = minutes / 60.0;
        format!("{:.1} hour{}", hours, if hours == 1.0 { "" } else { "s" })
    }
}

/// File size in kilobytes with one decimal, e.g. `12.3 KB`
pub fn format_file_size(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

/// Format an elapsed time in seconds as `12.3s`, `4.5m` or `1.2h`.
pub fn format_elapsed(seconds: f64) -> String {
    if seconds < 60.0 {
        format!("{:.1}s", seconds)
    } else if seconds < 3600.0 {
        format!("{:.1}m", seconds / 60.0)
    } else {
        format!("{:.1}h", seconds / 3600.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_the_words_is_fifty_percent() {
        let stats = Statistics::compute("one two three four", "one two");
        assert_eq!(stats.original_words, 4);
        assert_eq!(stats.summary_words, 2);
        assert_eq!(stats.compression_ratio, 50.0);
        assert_eq!(stats.reduction_words, 2);
        assert_eq!(stats.original_chars, 18);
        assert_eq!(stats.summary_chars, 7);
    }

    #[test]
    fn empty_inputs_give_zero_ratio() {
        let stats = Statistics::compute("", "");
        assert_eq!(stats.compression_ratio, 0.0);
        assert_eq!(stats.reduction_words, 0);
    }

    #[test]
    fn empty_original_with_summary_is_still_zero() {
        let stats = Statistics::compute("   ", "something appeared");
        assert_eq!(stats.original_words, 0);
        assert_eq!(stats.compression_ratio, 0.0);
        assert_eq!(stats.reduction_words, -2);
    }

    #[test]
    fn longer_summary_gives_negative_ratio() {
        let stats = Statistics::compute("short text", "a much longer summary text");
        assert_eq!(stats.compression_ratio, -150.0);
        assert_eq!(stats.reduction_words, -3);
    }

    #[test]
    fn words_split_on_any_whitespace() {
        assert_eq!(word_count("a\tb\n\nc   d"), 4);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn profile_counts_sentences_and_paragraphs() {
        let text = "First point. Second point!\n\nIs there a third? Yes.\n\n\n";
        let profile = TextProfile::of(text);
        assert_eq!(profile.sentences, 4);
        assert_eq!(profile.paragraphs, 2);
        assert_eq!(profile.words, 9);
        assert_eq!(profile.avg_sentence_length, 2.25);
    }

    #[test]
    fn profile_of_empty_text() {
        let profile = TextProfile::of("");
        assert_eq!(profile.words, 0);
        assert_eq!(profile.avg_word_length, 0.0);
        assert_eq!(profile.avg_sentence_length, 0.0);
    }

    #[test]
    fn reading_time_buckets() {
        assert_eq!(reading_time(150, 200), "< 1 minute");
        assert_eq!(reading_time(200, 200), "1 minute");
        assert_eq!(reading_time(1000, 200), "5 minutes");
        assert_eq!(reading_time(18_000, 200), "1.5 hours");
    }

    #[test]
    fn elapsed_formatting() {
        assert_eq!(format_elapsed(2.34), "2.3s");
        assert_eq!(format_elapsed(90.0), "1.5m");
        assert_eq!(format_elapsed(5400.0), "1.5h");
    }

    #[test]
    fn file_size_in_kilobytes() {
        assert_eq!(format_file_size(0), "0.0 KB");
        assert_eq!(format_file_size(1024), "1.0 KB");
        assert_eq!(format_file_size(12_595), "12.3 KB");
    }
}
