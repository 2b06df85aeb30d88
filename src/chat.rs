//! Inbound chat events
//!
//! Boundary validation for the event source. Anything that reaches the
//! arena as a `ChatEvent` has a non-blank username.

use thiserror::Error;

/// Errors raised when turning transport input into chat events.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("username is empty")]
    EmptyUsername,
    #[error("line has no `username: message` separator")]
    MissingSeparator,
}

/// One `(username, message)` pair from the chat source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEvent {
    username: String,
    message: String,
}

impl ChatEvent {
    pub fn new(username: impl Into<String>, message: impl Into<String>) -> Result<Self, ChatError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(ChatError::EmptyUsername);
        }
        Ok(Self {
            username,
            message: message.into(),
        })
    }

    /// Parse a `username: message` line from a text transport.
    ///
    /// The username is trimmed; the message keeps everything after the
    /// first colon except surrounding whitespace.
    pub fn parse_line(line: &str) -> Result<Self, ChatError> {
        let (user, message) = line.split_once(':').ok_or(ChatError::MissingSeparator)?;
        Self::new(user.trim(), message.trim())
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
