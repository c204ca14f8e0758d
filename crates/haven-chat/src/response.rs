//! Response payloads returned by topic handlers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::intent::Intent;

/// Which sub-case of which handler produced a response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    BudgetAnalysis,
    AccessibilityAnalysis,
    PropertySearch,
    ComparisonAnalysis,
    ReportGeneration,
    AgentPrep,
    Greeting,
    Acknowledgment,
    General,
}

/// A handler's reply: display text plus handler-specific structured data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoachResponse {
    #[serde(rename = "type")]
    pub kind: ResponseKind,
    pub message: String,
    /// Always a JSON object; empty when the handler has nothing to add.
    pub data: Value,
}

impl CoachResponse {
    pub fn new(kind: ResponseKind, message: impl Into<String>, data: Value) -> Self {
        Self {
            kind,
            message: message.into(),
            data,
        }
    }

    /// A response with an empty `data` object.
    pub fn text(kind: ResponseKind, message: impl Into<String>) -> Self {
        Self::new(kind, message, Value::Object(Default::default()))
    }
}

/// A routed response together with the intent that selected its handler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoachReply {
    pub intent: Intent,
    #[serde(flatten)]
    pub response: CoachResponse,
}
