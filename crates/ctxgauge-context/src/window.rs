//! Context window configuration

use serde::{Deserialize, Serialize};

use crate::context::MessageLike;
use crate::error::{ContextError, ContextResult};
use crate::usage::{ContextUsage, UsageLevel};

/// Tokens held back from the nominal window when none is configured explicitly
pub const DEFAULT_RETENTION_BUFFER: usize = 100;

/// Context window configuration
///
/// `retention_buffer` selects the reporting mode: `Some` caps the reported
/// percentage at 100 of the usable capacity, `None` reports raw usage against
/// `max_tokens` and lets the percentage run past 100 on overflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContextWindow {
    /// Maximum tokens in the context window
    pub max_tokens: usize,
    /// Tokens reserved below `max_tokens`
    pub retention_buffer: Option<usize>,
    /// Warning and critical percentages
    pub thresholds: UsageThresholds,
}

impl Default for ContextWindow {
    fn default() -> Self {
        Self {
            max_tokens: 4096,
            retention_buffer: Some(DEFAULT_RETENTION_BUFFER),
            thresholds: UsageThresholds::default(),
        }
    }
}

impl ContextWindow {
    /// Buffered window with the default retention buffer
    pub fn new(max_tokens: usize) -> Self {
        Self {
            max_tokens,
            ..Default::default()
        }
    }

    /// Window without a retention buffer; percentages are uncapped
    pub fn unbuffered(max_tokens: usize) -> Self {
        Self {
            max_tokens,
            retention_buffer: None,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_retention_buffer(mut self, retention_buffer: Option<usize>) -> Self {
        self.retention_buffer = retention_buffer;
        self
    }

    #[must_use]
    pub fn with_thresholds(mut self, thresholds: UsageThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Parse and validate a JSON configuration.
    ///
    /// Missing fields take their defaults; `"retentionBuffer": null` selects
    /// the unbuffered mode.
    pub fn from_json(json: &str) -> ContextResult<Self> {
        let window: Self = serde_json::from_str(json)?;
        window.validate()?;
        Ok(window)
    }

    pub fn validate(&self) -> ContextResult<()> {
        self.thresholds.validate()
    }

    pub fn is_buffered(&self) -> bool {
        self.retention_buffer.is_some()
    }

    /// Usable capacity after the retention buffer, floored at zero
    pub fn effective_capacity(&self) -> usize {
        match self.retention_buffer {
            Some(buffer) => self.max_tokens.saturating_sub(buffer),
            None => self.max_tokens,
        }
    }

    /// Usage report for `messages` under this window
    pub fn usage<I>(&self, messages: I) -> ContextUsage
    where
        I: IntoIterator,
        I::Item: MessageLike,
    {
        ContextUsage::from_messages(messages, self.max_tokens, self.retention_buffer, &self.thresholds)
    }

    /// Usage report for an already known token total
    pub fn usage_from_tokens(&self, total_tokens: usize) -> ContextUsage {
        ContextUsage::from_token_count(total_tokens, self.max_tokens, self.retention_buffer, &self.thresholds)
    }
}

/// Percentages at which usage turns into a warning and then critical
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageThresholds {
    pub warning: f64,
    pub critical: f64,
}

impl Default for UsageThresholds {
    fn default() -> Self {
        Self {
            warning: 70.0,
            critical: 90.0,
        }
    }
}

impl UsageThresholds {
    pub fn new(warning: f64, critical: f64) -> ContextResult<Self> {
        let thresholds = Self { warning, critical };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> ContextResult<()> {
        let finite = self.warning.is_finite() && self.critical.is_finite();
        if !finite || self.warning < 0.0 || self.warning >= self.critical {
            return Err(ContextError::InvalidThresholds {
                warning: self.warning,
                critical: self.critical,
            });
        }
        Ok(())
    }

    /// Classify a percentage. Warning is `[warning, critical)`, critical is
    /// `critical` and above.
    pub fn classify(&self, percentage: f64) -> UsageLevel {
        if percentage >= self.critical {
            UsageLevel::Critical
        } else if percentage >= self.warning {
            UsageLevel::Warning
        } else {
            UsageLevel::Normal
        }
    }
}
