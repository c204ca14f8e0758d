//! Error types for the coaching engine's outer surfaces.
//!
//! Classification and routing never fail; these errors only arise when a
//! raw message is rejected before it reaches the router.

/// Errors from message intake.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
}

/// Reject blank messages and messages longer than `max_length` bytes.
pub fn validate_message(message: &str, max_length: usize) -> Result<(), ChatError> {
    if message.trim().is_empty() {
        return Err(ChatError::EmptyMessage);
    }
    if message.len() > max_length {
        return Err(ChatError::MessageTooLong(max_length));
    }
    Ok(())
}
