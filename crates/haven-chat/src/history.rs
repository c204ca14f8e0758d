//! Conversation history inspection.
//!
//! Answers the yes/no questions topic handlers ask of the history. Every
//! check recomputes from the slice it is given.

use haven_core::Message;

/// Place names and setting words that count as a location having been given.
pub const LOCATION_TOKENS: &[&str] = &["cleveland", "akron", "columbus", "city", "area"];

/// Reads a conversation history for the signals topic handlers need.
#[derive(Debug, Clone)]
pub struct HistoryInspector {
    /// A report is ready once the history holds more messages than this.
    report_min_history: usize,
}

impl Default for HistoryInspector {
    fn default() -> Self {
        Self::new(5)
    }
}

impl HistoryInspector {
    pub fn new(report_min_history: usize) -> Self {
        Self { report_min_history }
    }

    /// True if any message mentions income.
    pub fn mentions_income(&self, history: &[Message]) -> bool {
        history
            .iter()
            .any(|m| m.content.to_lowercase().contains("income"))
    }

    /// True if the joined history mentions one of [`LOCATION_TOKENS`].
    pub fn mentions_known_location(&self, history: &[Message]) -> bool {
        let joined = history
            .iter()
            .map(|m| m.content.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        LOCATION_TOKENS.iter().any(|token| joined.contains(token))
    }

    /// True once the conversation is long enough to summarise.
    pub fn has_enough_turns_for_report(&self, history: &[Message]) -> bool {
        history.len() > self.report_min_history
    }
}
