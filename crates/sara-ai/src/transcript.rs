//! Messages and the ordered, append-only conversation transcript.

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        }
    }
}

/// A single conversational turn. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Ordered conversation history.
///
/// Index 0 always holds the one system instruction; everything after it
/// is user/assistant turns in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new(system_instruction: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_instruction)],
        }
    }

    /// Append a user or assistant turn. System messages are refused.
    pub fn push(&mut self, message: Message) -> bool {
        if message.role == Role::System {
            warn!("refusing to append a second system message to the transcript");
            return false;
        }
        self.messages.push(message);
        true
    }

    /// Every message, system instruction included.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The conversational turns, without the system instruction.
    pub fn history(&self) -> &[Message] {
        &self.messages[1..]
    }

    pub fn system_instruction(&self) -> &str {
        &self.messages[0].content
    }

    pub fn last(&self) -> Option<&Message> {
        self.history().last()
    }

    /// Number of conversational turns.
    pub fn len(&self) -> usize {
        self.messages.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
