//! Prompt templates for each summarization strategy.
//!
//! Building a prompt is pure: the same strategy, text and length always give
//! the same string, and the text is embedded exactly as passed in.

use crate::strategy::{Length, Strategy};

/// Render the instruction prompt for `strategy` over `text`.
///
/// `length` is ignored by every strategy except extractive and abstractive.
pub fn build(strategy: &Strategy, text: &str, length: Length) -> String {
    match strategy {
        Strategy::Extractive => extractive(text, length),
        Strategy::Abstractive => abstractive(text, length),
        Strategy::BulletPoints => bullet_points(text),
        Strategy::QuestionBased => question_based(text),
        Strategy::KeyInsights => key_insights(text),
        Strategy::Custom(instructions) => custom(text, instructions),
    }
}

/// How many sentences an extractive summary should pick.
pub fn extractive_target(length: Length) -> &'static str {
    match length {
        Length::Short => "3-4 key sentences",
        Length::Medium => "5-7 key sentences",
        Length::Long => "8-12 key sentences",
    }
}

/// Sentence and word range for an abstractive summary.
pub fn abstractive_target(length: Length) -> &'static str {
    match length {
        Length::Short => "3-4 sentences (approximately 50-80 words)",
        Length::Medium => "5-7 sentences (approximately 100-150 words)",
        Length::Long => "8-12 sentences (approximately 200-300 words)",
    }
}

fn extractive(text: &str, length: Length) -> String {
    format!(
        r#"You are an expert at extractive text summarization. Your task is to create a summary by selecting and combining the most important sentences from the original text.

TEXT TO SUMMARIZE:
{text}

INSTRUCTIONS:
Select {target} from the original text that capture the main ideas and essential information.

RULES:
1. Use ONLY sentences or phrases from the original text
2. Do NOT create new sentences or paraphrase
3. Select sentences that contain the most important information
4. Maintain the original order when possible
5. Ensure the summary flows naturally
6. Focus on key facts, findings, and conclusions

EXTRACTIVE SUMMARY:"#,
        target = extractive_target(length),
    )
}

fn abstractive(text: &str, length: Length) -> String {
    format!(
        r#"You are an expert at abstractive text summarization. Your task is to read and understand the text, then create a new summary in your own words.

TEXT TO SUMMARIZE:
{text}

INSTRUCTIONS:
Write a {target} summary in your own words.

RULES:
1. Read and understand the entire text
2. Identify the main ideas, key points, and important details
3. Write a NEW summary in your own words (do not copy sentences verbatim)
4. Ensure the summary is coherent and flows naturally
5. Preserve the meaning and critical information
6. Use clear, concise language
7. Focus on what matters most

ABSTRACTIVE SUMMARY:"#,
        target = abstractive_target(length),
    )
}

fn bullet_points(text: &str) -> String {
    format!(
        r#"You are an expert at creating concise bullet-point summaries. Extract the key points from the following text.

TEXT TO SUMMARIZE:
{text}

INSTRUCTIONS:
1. Create 6-10 bullet points
2. Each point should be one clear, complete sentence
3. Focus on the most important information
4. Use parallel structure
5. Start each bullet with a dash (-)

BULLET-POINT SUMMARY:"#
    )
}

fn question_based(text: &str) -> String {
    format!(
        r#"Analyze the following text and create a summary by answering these key questions:

TEXT:
{text}

Create a summary that answers:
1. What is the main topic or thesis?
2. What are the key arguments or findings?
3. What evidence or examples are provided?
4. What are the conclusions or implications?
5. What are the limitations or future directions (if mentioned)?

Provide a cohesive summary addressing these questions in paragraph form:"#
    )
}

fn key_insights(text: &str) -> String {
    format!(
        r#"You are an expert analyst. Read the following text and extract the most important insights and takeaways.

TEXT:
{text}

Provide:
1. TOP 3-5 KEY INSIGHTS (clearly numbered)
2. MAIN TAKEAWAYS (what should readers remember?)
3. PRACTICAL IMPLICATIONS (if applicable)

Format your response with clear headers and make it actionable:"#
    )
}

fn custom(text: &str, instructions: &str) -> String {
    format!(
        r#"TEXT TO SUMMARIZE:
{text}

INSTRUCTIONS:
{instructions}

SUMMARY:"#
    )
}
