use crate::llm_client::prompts::RESUME_ANALYSIS_PROMPT;

/// Characters of document text forwarded to the model; the rest is dropped.
pub const MAX_PROMPT_CHARS: usize = 45_000;

/// Returns at most `max_chars` Unicode scalar values from the start of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Interpolates the (truncated) document text into the analysis template.
pub fn build_analysis_prompt(text: &str) -> String {
    RESUME_ANALYSIS_PROMPT.replace("{resume_text}", truncate_chars(text, MAX_PROMPT_CHARS))
}
