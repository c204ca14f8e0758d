//! Elicitation: asking the user for a structured preference object.
//!
//! The collaborator answers with one of three outcomes. Declined and
//! cancelled answers are ordinary values, never errors.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::AdvisorError;
use crate::preferences::{PreferenceSchema, SchemaDescriptor};

/// Raw answer from the elicitation collaborator.
///
/// Wire form: `{"action":"accept","content":{..}}`, `{"action":"decline"}`
/// or `{"action":"cancel"}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ElicitationOutcome {
    Accept {
        #[serde(default = "empty_object")]
        content: Value,
    },
    Decline,
    Cancel,
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

impl ElicitationOutcome {
    pub fn accept(content: Value) -> Self {
        ElicitationOutcome::Accept { content }
    }
}

/// Typed, validated answer.
#[derive(Clone, Debug, PartialEq)]
pub enum Elicitation<T> {
    Accepted(T),
    Declined,
    Cancelled,
}

/// Collects a preference object from the end user.
#[async_trait]
pub trait Elicitor: Send + Sync {
    async fn elicit(&self, schema: &SchemaDescriptor) -> Result<ElicitationOutcome, AdvisorError>;
}

/// Ask for a `T` and validate whatever comes back.
pub async fn request_preferences<T: PreferenceSchema>(
    elicitor: &dyn Elicitor,
) -> Result<Elicitation<T>, AdvisorError> {
    let schema = T::descriptor();
    let outcome = elicitor.elicit(&schema).await?;
    debug!(schema = schema.name, outcome = outcome_name(&outcome), "Elicitation answered");
    match outcome {
        ElicitationOutcome::Accept { content } => T::from_content(content).map(Elicitation::Accepted),
        ElicitationOutcome::Decline => Ok(Elicitation::Declined),
        ElicitationOutcome::Cancel => Ok(Elicitation::Cancelled),
    }
}

fn outcome_name(outcome: &ElicitationOutcome) -> &'static str {
    match outcome {
        ElicitationOutcome::Accept { .. } => "accept",
        ElicitationOutcome::Decline => "decline",
        ElicitationOutcome::Cancel => "cancel",
    }
}

/// Answers every request with the same pre-supplied outcome.
///
/// Used when the outcome arrives up front, e.g. in an HTTP request body.
#[derive(Debug)]
pub struct ScriptedElicitor {
    outcome: ElicitationOutcome,
    calls: AtomicUsize,
}

impl ScriptedElicitor {
    pub fn new(outcome: ElicitationOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of times `elicit` has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Elicitor for ScriptedElicitor {
    async fn elicit(&self, _schema: &SchemaDescriptor) -> Result<ElicitationOutcome, AdvisorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.outcome.clone())
    }
}
