//! Topic handlers.
//!
//! Each handler reads the message and history, never mutates either, and
//! picks one of a small set of canned replies. Handlers share one signature
//! so the router can select them from a table.

use serde_json::json;

use haven_core::Message;

use crate::history::HistoryInspector;
use crate::intent::Intent;
use crate::response::{CoachResponse, ResponseKind};

/// Signature shared by every topic handler.
pub type TopicHandler = fn(&HistoryInspector, &str, &[Message]) -> CoachResponse;

/// Handler for each intent.
pub fn handler_for(intent: Intent) -> TopicHandler {
    match intent {
        Intent::Budget => budget,
        Intent::Accessibility => accessibility,
        // Location is classified for logging but answered as general chat.
        Intent::Location => general,
        Intent::Search => search,
        Intent::Compare => comparison,
        Intent::Report => report,
        Intent::Prep => prep,
        Intent::General => general,
    }
}

// =============================================================================
// Budget
// =============================================================================

const BUDGET_ASK_INCOME: &str = "\
Great question about budgeting! Let's work through it together.

First I need a sense of your finances. About how much comes in each month? \
That might include:
- Social Security benefits
- A pension or retirement account
- Investment income
- Any other regular income

A rough estimate is fine.";

const BUDGET_READY: &str = "\
Let's plan a housing budget you can live with.

A common guideline is to keep housing at 30-40% of monthly income. \
That figure should cover:
- Base rent or the monthly fee
- Utilities, if they aren't included
- Meals, if they aren't included
- Transportation

From here I can:
1. Work out what you can comfortably afford
2. Break down what belongs in the budget
3. List questions that uncover hidden costs
4. Suggest ways to stretch your housing dollar

Shall we run through a detailed budget analysis?";

/// Asks for income until it has been mentioned, then offers an analysis.
pub fn budget(inspector: &HistoryInspector, _message: &str, history: &[Message]) -> CoachResponse {
    if !inspector.mentions_income(history) {
        return CoachResponse::new(
            ResponseKind::BudgetAnalysis,
            BUDGET_ASK_INCOME,
            json!({
                "stage": "gathering_income",
                "needs": ["monthly_income"],
            }),
        );
    }

    CoachResponse::new(
        ResponseKind::BudgetAnalysis,
        BUDGET_READY,
        json!({
            "stage": "ready_for_analysis",
            "next_steps": ["detailed_analysis", "compare_options"],
        }),
    )
}

// =============================================================================
// Accessibility
// =============================================================================

const ACCESSIBILITY_INTRO: &str = "\
Accessibility matters a lot, so let's get it right.

Tell me about your situation:

Mobility
- Do you use a wheelchair, walker, or cane?
- Are stairs hard for you?
- Do you need grab bars?

Getting around
- Do you drive, or need accessible parking close by?
- Would you ride public transit or a shuttle?

Living space
- Do you need a ground-floor unit?
- Is a roll-in shower important?
- Do you use any medical equipment?

The more you share, the better I can match places to how you actually live.";

pub fn accessibility(
    _inspector: &HistoryInspector,
    _message: &str,
    _history: &[Message],
) -> CoachResponse {
    CoachResponse::new(
        ResponseKind::AccessibilityAnalysis,
        ACCESSIBILITY_INTRO,
        json!({
            "assessment_areas": [
                "mobility_devices",
                "building_access",
                "unit_features",
                "bathroom_modifications",
                "medical_equipment",
            ],
            "critical_questions": [
                "Door width (minimum 32 inches for wheelchairs)",
                "Elevator access to all common areas",
                "Emergency call systems",
                "Accessible parking distance",
            ],
        }),
    )
}

// =============================================================================
// Search
// =============================================================================

const SEARCH_ASK_LOCATION: &str = "\
I'd be glad to help you search. Let's find some good options.

First, where should we look?
- Location: which city or area? (for example Cleveland or Akron)
- Family: do you want to be near family, and where are they?
- Setting: city, suburbs, or somewhere quiet?

Once I know where to look, I'll explain each place in plain language.";

const SEARCH_READY: &str = "\
I'll look for senior housing in your area.

For each place I find, I'll tell you:
- What it costs and what's included
- Who it suits best
- The strong points and the things to watch for
- How to get in touch

I'll keep your budget, accessibility needs, and location preferences in mind. \
Ready when you are.";

/// Asks for a location until one appears in the history.
pub fn search(inspector: &HistoryInspector, _message: &str, history: &[Message]) -> CoachResponse {
    let has_location = inspector.mentions_known_location(history);
    let message = if has_location {
        SEARCH_READY
    } else {
        SEARCH_ASK_LOCATION
    };
    let filters_needed: Vec<&str> = if has_location {
        vec![]
    } else {
        vec!["location", "housing_type"]
    };

    CoachResponse::new(
        ResponseKind::PropertySearch,
        message,
        json!({
            "search_ready": has_location,
            "filters_needed": filters_needed,
        }),
    )
}

// =============================================================================
// Comparison
// =============================================================================

const COMPARISON_INTRO: &str = "\
I can compare places side by side.

For each one I'll look at:

Cost and value
- Monthly fees and what's included
- Hidden costs
- What you get for the money

Living experience
- Space and layout
- Accessibility features
- Community atmosphere

Location
- Distance to family
- Healthcare access
- Shopping and services

Care and support
- Level of assistance available
- Emergency response
- Healthcare coordination

Which places should I compare? Names, addresses, or a description all work.";

pub fn comparison(
    _inspector: &HistoryInspector,
    _message: &str,
    _history: &[Message],
) -> CoachResponse {
    CoachResponse::new(
        ResponseKind::ComparisonAnalysis,
        COMPARISON_INTRO,
        json!({
            "comparison_criteria": [
                "monthly_cost",
                "included_services",
                "accessibility",
                "location_convenience",
                "care_level",
                "community_features",
            ],
        }),
    )
}

// =============================================================================
// Report
// =============================================================================

const REPORT_INTRO: &str = "\
I can put together a clear report to share with your family.

It will cover:
- Your situation: what you're looking for and why, your needs, your budget
- Top options: places that fit, with pros, cons, and costs
- Recommendations: why each might work, questions to ask, red flags
- Next steps: scheduling tours, what to bring, a decision timeline

That way your family can follow your thinking and help you decide.";

/// Report is offered every time; it is only marked ready once the
/// conversation has enough material.
pub fn report(inspector: &HistoryInspector, _message: &str, history: &[Message]) -> CoachResponse {
    CoachResponse::new(
        ResponseKind::ReportGeneration,
        REPORT_INTRO,
        json!({
            "report_sections": [
                "needs_assessment",
                "budget_analysis",
                "property_options",
                "recommendations",
                "action_plan",
            ],
            "ready_to_generate": inspector.has_enough_turns_for_report(history),
        }),
    )
}

// =============================================================================
// Agent prep
// =============================================================================

const PREP_INTRO: &str = "\
Let's get you ready to talk with a real estate agent.

About the property:
- What's included in the monthly cost?
- Are there additional fees?
- What happens if my needs change?
- Can I see the contract before committing?

About care and services:
- What level of care is provided?
- How are emergencies handled?
- What's the staff-to-resident ratio?

About money:
- Are there entrance fees?
- Will costs go up, and by how much?
- What's the refund policy?

Tell me which places you're considering and I'll tailor the list.";

pub fn prep(_inspector: &HistoryInspector, _message: &str, _history: &[Message]) -> CoachResponse {
    CoachResponse::new(
        ResponseKind::AgentPrep,
        PREP_INTRO,
        json!({
            "question_groups": {
                "property": [
                    "What's included in the monthly cost?",
                    "Are there additional fees?",
                    "What happens if my needs change?",
                    "Can I see the contract before committing?",
                ],
                "care": [
                    "What level of care is provided?",
                    "How are emergencies handled?",
                    "What's the staff-to-resident ratio?",
                ],
                "financial": [
                    "Are there entrance fees?",
                    "Will costs go up, and by how much?",
                    "What's the refund policy?",
                ],
            },
        }),
    )
}

// =============================================================================
// General
// =============================================================================

const GREETING_WORDS: &[&str] = &["hello", "hi", "hey", "good morning"];
const THANKS_WORDS: &[&str] = &["thank", "thanks", "appreciate"];

const GREETING: &str = "\
Hello! It's good to hear from you.

I'm here to help you find the right senior housing. We can work on:
- Planning your budget
- Searching for places
- Understanding accessibility options
- Finding locations near family
- Comparing your options
- Creating a report for your family

What would you like to start with?";

const ACKNOWLEDGMENT: &str = "You're very welcome! I'm here whenever you need me. \
Is there anything else you'd like to talk about?";

const GENERAL_HELP: &str = "\
I want to make sure I understand how I can help.

Could you tell me a little more about what's on your mind? For example:
- Are you just starting to look at options?
- Do you have questions about costs?
- Do you need help working out which type of housing fits?
- Do you want to compare places you've already found?

Whatever it is, we'll work through it together.";

/// Greeting first, then thanks, otherwise a prompt for more detail.
pub fn general(_inspector: &HistoryInspector, message: &str, _history: &[Message]) -> CoachResponse {
    let lowered = message.to_lowercase();

    if GREETING_WORDS.iter().any(|w| lowered.contains(w)) {
        return CoachResponse::text(ResponseKind::Greeting, GREETING);
    }
    if THANKS_WORDS.iter().any(|w| lowered.contains(w)) {
        return CoachResponse::text(ResponseKind::Acknowledgment, ACKNOWLEDGMENT);
    }
    CoachResponse::text(ResponseKind::General, GENERAL_HELP)
}

// =============================================================================
// Tests
// =============================================================================
