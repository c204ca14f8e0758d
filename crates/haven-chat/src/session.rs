//! Caller-owned conversation state.
//!
//! A `SessionContext` is created and held by whoever drives the
//! conversation (the terminal loop, a test). The router only borrows it.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use haven_core::Message;

use crate::response::CoachResponse;

/// One conversation: an id, when it began, and its message history.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    history: Vec<Message>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext {
    pub fn new() -> Self {
        Self::with_history(Vec::new())
    }

    /// Resume a conversation from an existing history.
    pub fn with_history(history: Vec<Message>) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            history,
        }
    }

    /// Messages so far, oldest first.
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Append a user message and the assistant's reply to it.
    pub fn record_turn(&mut self, user_message: &str, response: &CoachResponse) {
        self.history.push(Message::user(user_message));
        self.history.push(Message::assistant(response.message.clone()));
    }
}
