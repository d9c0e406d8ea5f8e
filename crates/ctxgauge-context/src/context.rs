//! Conversation context types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::estimator::estimate_message;
use crate::usage::ContextUsage;
use crate::window::ContextWindow;

/// Read-only view of a message's countable text.
///
/// Both fields are optional; an absent field contributes no tokens.
pub trait MessageLike {
    /// Primary text of the message
    fn content(&self) -> Option<&str>;

    /// Side-channel text, e.g. a model's deliberation
    fn reasoning(&self) -> Option<&str> {
        None
    }
}

impl<T: MessageLike + ?Sized> MessageLike for &T {
    fn content(&self) -> Option<&str> {
        (**self).content()
    }

    fn reasoning(&self) -> Option<&str> {
        (**self).reasoning()
    }
}

impl MessageLike for str {
    fn content(&self) -> Option<&str> {
        Some(self)
    }
}

impl MessageLike for String {
    fn content(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

/// Message role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

/// Message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub role: MessageRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::empty(role)
        }
    }

    /// Message with neither content nor reasoning
    pub fn empty(role: MessageRole) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: None,
            reasoning: None,
            created_at: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Attach reasoning text
    #[must_use]
    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = Some(reasoning.into());
        self
    }

    /// Estimated tokens for content and reasoning together
    pub fn token_count(&self) -> usize {
        estimate_message(self)
    }
}

impl MessageLike for Message {
    fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    fn reasoning(&self) -> Option<&str> {
        self.reasoning.as_deref()
    }
}

/// Conversation context
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationContext {
    pub id: Uuid,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for ConversationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationContext {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
        self.updated_at = Utc::now();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn total_tokens(&self) -> usize {
        self.messages.iter().map(Message::token_count).sum()
    }

    /// Usage report for the whole conversation against `window`
    pub fn usage(&self, window: &ContextWindow) -> ContextUsage {
        window.usage(&self.messages)
    }
}
