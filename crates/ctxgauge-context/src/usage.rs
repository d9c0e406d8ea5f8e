//! Context usage reports

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::context::MessageLike;
use crate::estimator::estimate_message;
use crate::window::UsageThresholds;

/// Snapshot of estimated token consumption against a context window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextUsage {
    /// Estimated tokens across all messages, uncapped
    pub used_tokens: usize,
    /// Nominal context size as supplied
    pub max_tokens: usize,
    /// Tokens left before the usable capacity is reached
    pub available_tokens: usize,
    /// Usage relative to the usable capacity
    pub percentage: f64,
    pub is_warning: bool,
    pub is_critical: bool,
    /// Usable capacity: `max_tokens` minus the retention buffer, if any
    pub max_context_retained: usize,
}

/// Single-value classification of a usage report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageLevel {
    Normal,
    Warning,
    Critical,
}

impl ContextUsage {
    /// Estimate every message and build the report.
    ///
    /// Messages are visited in input order; `content` and `reasoning` are
    /// estimated independently.
    pub fn from_messages<I>(
        messages: I,
        max_context: usize,
        retention_buffer: Option<usize>,
        thresholds: &UsageThresholds,
    ) -> Self
    where
        I: IntoIterator,
        I::Item: MessageLike,
    {
        let total_tokens: usize = messages
            .into_iter()
            .map(|message| estimate_message(&message))
            .sum();

        Self::from_token_count(total_tokens, max_context, retention_buffer, thresholds)
    }

    /// Build the report from a token total that is already known.
    ///
    /// With a retention buffer the tokens used for the percentage are capped
    /// at the usable capacity, so the percentage stays within `0..=100`.
    /// Without one the raw total is used and the percentage may exceed 100.
    pub fn from_token_count(
        total_tokens: usize,
        max_context: usize,
        retention_buffer: Option<usize>,
        thresholds: &UsageThresholds,
    ) -> Self {
        let capacity = match retention_buffer {
            Some(buffer) => {
                if max_context > 0 && buffer >= max_context {
                    warn!(
                        max_context,
                        retention_buffer = buffer,
                        "Retention buffer consumes the entire context window"
                    );
                }
                max_context.saturating_sub(buffer)
            }
            None => max_context,
        };

        let counted = if retention_buffer.is_some() {
            total_tokens.min(capacity)
        } else {
            total_tokens
        };

        let percentage = if capacity > 0 {
            counted as f64 * 100.0 / capacity as f64
        } else {
            0.0
        };

        let level = thresholds.classify(percentage);

        debug!(
            used_tokens = total_tokens,
            capacity,
            percentage,
            level = ?level,
            "Calculated context usage"
        );

        Self {
            used_tokens: total_tokens,
            max_tokens: max_context,
            available_tokens: capacity.saturating_sub(counted),
            percentage,
            is_warning: level == UsageLevel::Warning,
            is_critical: level == UsageLevel::Critical,
            max_context_retained: capacity,
        }
    }

    pub fn level(&self) -> UsageLevel {
        if self.is_critical {
            UsageLevel::Critical
        } else if self.is_warning {
            UsageLevel::Warning
        } else {
            UsageLevel::Normal
        }
    }

    /// Whether the raw total went past the usable capacity
    pub fn is_over_capacity(&self) -> bool {
        self.used_tokens > self.max_context_retained
    }
}

/// Calculate context usage with the default 70/90 thresholds.
///
/// `retention_buffer` selects the mode: `Some` reserves that many tokens and
/// caps the percentage at 100, `None` reports uncapped usage against
/// `max_context`.
pub fn calculate_context_usage<I>(
    messages: I,
    max_context: usize,
    retention_buffer: Option<usize>,
) -> ContextUsage
where
    I: IntoIterator,
    I::Item: MessageLike,
{
    ContextUsage::from_messages(
        messages,
        max_context,
        retention_buffer,
        &UsageThresholds::default(),
    )
}
