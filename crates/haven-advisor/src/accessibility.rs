//! Accessibility requirements derived from accessibility preferences.

use serde::Serialize;

use crate::preferences::AccessibilityPreferences;

/// Questions worth asking on every property visit.
pub const ACCESSIBILITY_QUESTIONS: [&str; 4] = [
    "Are doorways at least 32 inches wide?",
    "Is there a roll-in shower available?",
    "What is the path from parking to unit?",
    "Are common areas wheelchair accessible?",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessibilityScore {
    HighNeeds,
    ModerateNeeds,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AccessibilityRecommendations {
    pub critical_features: Vec<String>,
    pub questions_to_ask: Vec<String>,
    pub medical_equipment: Vec<String>,
    pub accessibility_score: AccessibilityScore,
}

/// Build the required-feature list and needs score.
///
/// More than two required features counts as high needs.
pub fn score_accessibility(prefs: &AccessibilityPreferences) -> AccessibilityRecommendations {
    let checks = [
        (
            prefs.wheelchair_accessible,
            "Wheelchair accessible entrances and common areas",
        ),
        (prefs.elevator_required, "Building must have elevator"),
        (prefs.ground_floor_preferred, "Ground floor unit preferred"),
        (prefs.grab_bars_needed, "Grab bars in bathroom required"),
    ];
    let critical_features: Vec<String> = checks
        .iter()
        .filter(|(wanted, _)| *wanted)
        .map(|(_, feature)| feature.to_string())
        .collect();

    let accessibility_score = if critical_features.len() > 2 {
        AccessibilityScore::HighNeeds
    } else {
        AccessibilityScore::ModerateNeeds
    };

    AccessibilityRecommendations {
        critical_features,
        questions_to_ask: ACCESSIBILITY_QUESTIONS.iter().map(|q| q.to_string()).collect(),
        medical_equipment: prefs.medical_equipment.clone(),
        accessibility_score,
    }
}
