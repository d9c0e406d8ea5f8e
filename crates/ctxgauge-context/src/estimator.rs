//! Word-based token estimation
//!
//! Uses the common rule of ~1.3 tokens per whitespace-delimited word. The
//! ratio is kept in tenths so the ceiling is computed in integer arithmetic.

use crate::context::MessageLike;

/// Tokens per word, in tenths (1.3 tokens per word)
const TOKENS_PER_WORD_TENTHS: usize = 13;

/// Estimate the token count of a text.
///
/// Empty and whitespace-only text is zero tokens. Anything else is
/// `ceil(words * 1.3)`.
pub fn estimate_token_count(text: &str) -> usize {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0;
    }

    words_to_tokens(trimmed.split_whitespace().count())
}

/// Estimate the token count of a text field that may be absent
pub fn estimate_optional(text: Option<&str>) -> usize {
    text.map_or(0, estimate_token_count)
}

/// Estimate the tokens of a message: content plus reasoning
pub fn estimate_message<M: MessageLike + ?Sized>(message: &M) -> usize {
    estimate_optional(message.content()) + estimate_optional(message.reasoning())
}

const fn words_to_tokens(words: usize) -> usize {
    words.saturating_mul(TOKENS_PER_WORD_TENTHS).div_ceil(10)
}
