//! Keyword intent classification.
//!
//! The classifier walks an ordered list of keyword rules and returns the
//! intent of the first rule with a keyword contained in the lowered
//! message. Rule order is the tie-break policy: a message mentioning both
//! cost and accessibility is a budget question because the budget rule is
//! checked first.

use serde::{Deserialize, Serialize};

use haven_core::Message;

/// Topic of a free-text message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Budget,
    Accessibility,
    Location,
    Search,
    Compare,
    Report,
    Prep,
    General,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Budget => "budget",
            Intent::Accessibility => "accessibility",
            Intent::Location => "location",
            Intent::Search => "search",
            Intent::Compare => "compare",
            Intent::Report => "report",
            Intent::Prep => "prep",
            Intent::General => "general",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Keyword sets
// =============================================================================

pub const BUDGET_KEYWORDS: &[&str] = &["budget", "afford", "cost", "price", "income", "expense"];

pub const ACCESSIBILITY_KEYWORDS: &[&str] = &[
    "wheelchair",
    "walker",
    "elevator",
    "accessible",
    "mobility",
    "disability",
];

pub const LOCATION_KEYWORDS: &[&str] = &[
    "near",
    "close to",
    "proximity",
    "distance",
    "family",
    "hospital",
    "pharmacy",
];

pub const SEARCH_KEYWORDS: &[&str] = &[
    "find",
    "search",
    "show me",
    "looking for",
    "apartment",
    "housing",
];

pub const COMPARE_KEYWORDS: &[&str] = &[
    "compare",
    "difference",
    "better",
    "versus",
    "vs",
    "which one",
];

pub const REPORT_KEYWORDS: &[&str] = &[
    "report",
    "document",
    "share",
    "family",
    "kids",
    "children",
    "show my",
];

pub const PREP_KEYWORDS: &[&str] = &["realtor", "agent", "questions", "prepare", "ready to"];

// =============================================================================
// Rules
// =============================================================================

/// One entry in the ordered rule list: any keyword hit yields `intent`.
#[derive(Debug, Clone)]
pub struct IntentRule {
    pub intent: Intent,
    pub keywords: &'static [&'static str],
}

impl IntentRule {
    pub const fn new(intent: Intent, keywords: &'static [&'static str]) -> Self {
        Self { intent, keywords }
    }

    /// First keyword contained in an already-lowered message.
    fn first_match(&self, lowered: &str) -> Option<&'static str> {
        self.keywords.iter().copied().find(|kw| lowered.contains(kw))
    }
}

/// Standard rule order, highest priority first.
pub fn default_rules() -> Vec<IntentRule> {
    vec![
        IntentRule::new(Intent::Budget, BUDGET_KEYWORDS),
        IntentRule::new(Intent::Accessibility, ACCESSIBILITY_KEYWORDS),
        IntentRule::new(Intent::Location, LOCATION_KEYWORDS),
        IntentRule::new(Intent::Search, SEARCH_KEYWORDS),
        IntentRule::new(Intent::Compare, COMPARE_KEYWORDS),
        IntentRule::new(Intent::Report, REPORT_KEYWORDS),
        IntentRule::new(Intent::Prep, PREP_KEYWORDS),
    ]
}

// =============================================================================
// IntentClassifier
// =============================================================================

/// Rule-based intent classifier.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    rules: Vec<IntentRule>,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl IntentClassifier {
    /// Create a classifier over an explicit, ordered rule list.
    pub fn new(rules: Vec<IntentRule>) -> Self {
        Self { rules }
    }

    /// The rules in the order they are checked.
    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    /// Classify a message. Falls back to [`Intent::General`].
    ///
    /// `history` is accepted so callers can pass the same arguments they
    /// pass to handlers; the keyword rules only look at the message.
    pub fn classify(&self, message: &str, _history: &[Message]) -> Intent {
        self.classify_with_keyword(message).0
    }

    /// Classify a message and report the keyword that decided it.
    pub fn classify_with_keyword(&self, message: &str) -> (Intent, Option<&'static str>) {
        let lowered = message.to_lowercase();
        for rule in &self.rules {
            if let Some(keyword) = rule.first_match(&lowered) {
                return (rule.intent, Some(keyword));
            }
        }
        (Intent::General, None)
    }
}

// =============================================================================
// Tests
// =============================================================================
