//! Dialogue router: classifies a message and hands it to its topic handler.
//!
//! Routing never fails. Unknown topics land in the general handler.

use tracing::debug;

use haven_core::config::CoachConfig;
use haven_core::Message;

use crate::handlers::handler_for;
use crate::history::HistoryInspector;
use crate::intent::{Intent, IntentClassifier};
use crate::response::{CoachReply, CoachResponse};
use crate::session::SessionContext;

/// Entry point for free-text conversation.
#[derive(Debug, Clone)]
pub struct DialogueRouter {
    classifier: IntentClassifier,
    inspector: HistoryInspector,
    context_window: usize,
}

impl Default for DialogueRouter {
    fn default() -> Self {
        Self::new(&CoachConfig::default())
    }
}

impl DialogueRouter {
    /// Create a router with the standard keyword rules.
    pub fn new(config: &CoachConfig) -> Self {
        Self::with_classifier(IntentClassifier::default(), config)
    }

    /// Create a router over a custom classifier.
    pub fn with_classifier(classifier: IntentClassifier, config: &CoachConfig) -> Self {
        Self {
            classifier,
            inspector: HistoryInspector::new(config.report_min_history),
            context_window: config.context_window,
        }
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    /// Run the handler for an already-classified intent.
    pub fn dispatch(&self, intent: Intent, message: &str, history: &[Message]) -> CoachResponse {
        handler_for(intent)(&self.inspector, message, history)
    }

    /// Classify and dispatch, keeping the intent alongside the response.
    pub fn route(&self, message: &str, history: &[Message]) -> CoachReply {
        let (intent, keyword) = self.classifier.classify_with_keyword(message);
        debug!(
            intent = %intent,
            keyword = keyword.unwrap_or("-"),
            history_len = history.len(),
            "Routing message"
        );
        let response = self.dispatch(intent, message, history);
        CoachReply { intent, response }
    }

    /// Process one message against a caller-supplied history.
    pub async fn process_message(&self, message: &str, history: &[Message]) -> CoachResponse {
        self.route(message, history).response
    }

    /// Process one message in a session and record the exchange in it.
    pub async fn converse(&self, session: &mut SessionContext, message: &str) -> CoachReply {
        let reply = self.route(message, session.history());
        session.record_turn(message, &reply.response);
        reply
    }

    /// Condensed `role: content` lines for the trailing context window.
    pub fn build_context(&self, history: &[Message]) -> String {
        let start = history.len().saturating_sub(self.context_window);
        history[start..]
            .iter()
            .map(|m| format!("{}: {}", m.role, m.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::ResponseKind;

    fn router() -> DialogueRouter {
        DialogueRouter::default()
    }

    // ---- Routing by intent ----

    #[tokio::test]
    async fn test_budget_routes_to_budget_handler() {
        let resp = router().process_message("Can I afford this?", &[]).await;
        assert_eq!(resp.kind, ResponseKind::BudgetAnalysis);
        assert_eq!(resp.data["stage"], "gathering_income");
    }

    #[tokio::test]
    async fn test_budget_stage_follows_history() {
        let history = vec![Message::user("my income is 2000")];
        let resp = router().process_message("what's my budget", &history).await;
        assert_eq!(resp.data["stage"], "ready_for_analysis");
    }

    #[tokio::test]
    async fn test_search_with_location_history() {
        let history = vec![
            Message::user("We're in the Akron area"),
            Message::assistant("Got it"),
        ];
        let resp = router().process_message("find apartments", &history).await;
        assert_eq!(resp.kind, ResponseKind::PropertySearch);
        assert_eq!(resp.data["search_ready"], true);
    }

    #[tokio::test]
    async fn test_prep_has_own_handler() {
        let resp = router().process_message("I have questions for my agent", &[]).await;
        assert_eq!(resp.kind, ResponseKind::AgentPrep);
    }

    #[tokio::test]
    async fn test_location_falls_through_to_general() {
        let resp = router().process_message("near a hospital please", &[]).await;
        assert_eq!(resp.kind, ResponseKind::General);

        let reply = router().route("hello, is there a pharmacy near here?", &[]);
        assert_eq!(reply.intent, Intent::Location);
        assert_eq!(reply.response.kind, ResponseKind::Greeting);

        let reply = router().route("thanks, somewhere near family", &[]);
        assert_eq!(reply.response.kind, ResponseKind::Acknowledgment);
    }

    #[tokio::test]
    async fn test_unmatched_goes_to_general() {
        let resp = router().process_message("hello", &[]).await;
        assert_eq!(resp.kind, ResponseKind::Greeting);
    }

    #[test]
    fn test_route_reports_intent() {
        let reply = router().route("compare the two", &[]);
        assert_eq!(reply.intent, Intent::Compare);
        assert_eq!(reply.response.kind, ResponseKind::ComparisonAnalysis);
    }

    #[test]
    fn test_dispatch_bypasses_classifier() {
        let resp = router().dispatch(Intent::Report, "budget", &[]);
        assert_eq!(resp.kind, ResponseKind::ReportGeneration);
    }

    #[test]
    fn test_report_threshold_from_config() {
        let config = CoachConfig {
            report_min_history: 1,
            ..CoachConfig::default()
        };
        let router = DialogueRouter::new(&config);
        let history = vec![Message::user("a"), Message::assistant("b")];
        let resp = router.dispatch(Intent::Report, "report", &history);
        assert_eq!(resp.data["ready_to_generate"], true);
    }

    #[test]
    fn test_history_is_not_mutated() {
        let history = vec![Message::user("my income is 2000")];
        let before = history.clone();
        let _ = router().route("budget", &history);
        assert_eq!(history, before);
    }

    // ---- Sessions ----

    #[tokio::test]
    async fn test_converse_records_turns() {
        let router = router();
        let mut session = SessionContext::new();

        let first = router.converse(&mut session, "help with my budget").await;
        assert_eq!(first.response.data["stage"], "gathering_income");
        assert_eq!(session.len(), 2);

        // The assistant's question mentions income, so the next budget turn
        // moves on.
        let second = router.converse(&mut session, "my budget is tight").await;
        assert_eq!(second.response.data["stage"], "ready_for_analysis");
        assert_eq!(session.len(), 4);
    }

    #[tokio::test]
    async fn test_report_becomes_ready_over_a_session() {
        let router = router();
        let mut session = SessionContext::new();
        for msg in ["hello", "budget", "find housing"] {
            router.converse(&mut session, msg).await;
        }
        assert_eq!(session.len(), 6);
        let reply = router.converse(&mut session, "make a report").await;
        assert_eq!(reply.response.data["ready_to_generate"], true);
    }

    // ---- Context window ----

    #[test]
    fn test_build_context_last_five() {
        let history: Vec<Message> = (0..7).map(|i| Message::user(format!("m{}", i))).collect();
        let ctx = router().build_context(&history);
        let lines: Vec<&str> = ctx.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "user: m2");
        assert_eq!(lines[4], "user: m6");
    }

    #[test]
    fn test_build_context_short_history() {
        let history = vec![Message::user("hi"), Message::assistant("Hello!")];
        assert_eq!(router().build_context(&history), "user: hi\nassistant: Hello!");
    }

    #[test]
    fn test_build_context_empty() {
        assert_eq!(router().build_context(&[]), "");
    }

    // ---- Concurrency ----

    #[tokio::test]
    async fn test_concurrent_routing_is_independent() {
        use std::sync::Arc;

        let router = Arc::new(router());
        let mut handles = Vec::new();
        for i in 0..10 {
            let router = Arc::clone(&router);
            handles.push(tokio::spawn(async move {
                let history = if i % 2 == 0 {
                    vec![Message::user("my income is 3000")]
                } else {
                    vec![]
                };
                let resp = router.process_message("budget", &history).await;
                (i, resp)
            }));
        }
        for handle in handles {
            let (i, resp) = handle.await.unwrap();
            let expected = if i % 2 == 0 {
                "ready_for_analysis"
            } else {
                "gathering_income"
            };
            assert_eq!(resp.data["stage"], expected);
        }
    }
}
