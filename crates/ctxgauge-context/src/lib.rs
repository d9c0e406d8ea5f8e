//! ctxgauge Context - Context window usage estimation
//!
//! This crate provides:
//! - Word-based token estimation
//! - Context usage reports with warning/critical classification
//! - Context window configuration with an optional retention buffer
//! - Conversation context tracking

pub mod context;
pub mod error;
pub mod estimator;
pub mod usage;
pub mod window;

pub use context::{ConversationContext, Message, MessageLike, MessageRole};
pub use error::{ContextError, ContextResult};
pub use estimator::{estimate_message, estimate_optional, estimate_token_count};
pub use usage::{calculate_context_usage, ContextUsage, UsageLevel};
pub use window::{ContextWindow, UsageThresholds};

/// Prelude for common imports
pub mod prelude {
    pub use crate::context::{ConversationContext, Message, MessageLike, MessageRole};
    pub use crate::error::{ContextError, ContextResult};
    pub use crate::estimator::estimate_token_count;
    pub use crate::usage::{calculate_context_usage, ContextUsage, UsageLevel};
    pub use crate::window::{ContextWindow, UsageThresholds};
}
