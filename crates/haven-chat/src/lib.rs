//! Conversational coaching engine for Haven.
//!
//! Classifies free-text messages into topics, inspects the conversation
//! history to decide what is still missing, and returns structured
//! responses without an LLM.

pub mod error;
pub mod handlers;
pub mod history;
pub mod intent;
pub mod response;
pub mod router;
pub mod session;

pub use error::{validate_message, ChatError};
pub use history::HistoryInspector;
pub use intent::{Intent, IntentClassifier, IntentRule};
pub use response::{CoachReply, CoachResponse, ResponseKind};
pub use router::DialogueRouter;
pub use session::SessionContext;
