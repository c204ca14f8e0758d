//! Location-fit priorities built from location preferences.

use crate::preferences::{FamilyProximity, LocationPreferences};

pub const LOCATION_QUESTIONS: [&str; 5] = [
    "How far is the nearest hospital?",
    "Is there a pharmacy on-site or nearby?",
    "What transportation options are available?",
    "How often do shuttle services run?",
    "Are there grocery stores within easy reach?",
];

impl FamilyProximity {
    /// Readable priority label, `None` when the user is flexible.
    pub fn priority_label(&self) -> Option<&'static str> {
        match self {
            FamilyProximity::SameCity => Some("Family in the same city"),
            FamilyProximity::Within30Min => Some("Family within 30 minutes"),
            FamilyProximity::Within1Hour => Some("Family within 1 hour"),
            FamilyProximity::Flexible => None,
        }
    }
}

/// Ordered location priorities: family, hospital, pharmacy, shopping, transit.
pub fn location_priorities(prefs: &LocationPreferences) -> Vec<String> {
    let mut priorities = Vec::new();
    if let Some(label) = prefs.proximity_to_family.priority_label() {
        priorities.push(label.to_string());
    }
    let checks = [
        (prefs.near_hospital, "Hospital within 5 miles"),
        (prefs.near_pharmacy, "Pharmacy within walking distance"),
        (prefs.near_shopping, "Shopping centers nearby"),
        (prefs.public_transport, "Public transportation access"),
    ];
    priorities.extend(
        checks
            .iter()
            .filter(|(wanted, _)| *wanted)
            .map(|(_, label)| label.to_string()),
    );
    priorities
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_only_pharmacy() {
        assert_eq!(
            location_priorities(&LocationPreferences::default()),
            vec!["Pharmacy within walking distance"]
        );
    }

    #[test]
    fn test_everything_in_order() {
        let prefs = LocationPreferences {
            proximity_to_family: FamilyProximity::SameCity,
            near_hospital: true,
            near_pharmacy: true,
            near_shopping: true,
            public_transport: true,
        };
        assert_eq!(
            location_priorities(&prefs),
            vec![
                "Family in the same city",
                "Hospital within 5 miles",
                "Pharmacy within walking distance",
                "Shopping centers nearby",
                "Public transportation access",
            ]
        );
    }

    #[test]
    fn test_nothing_selected_is_empty() {
        let prefs = LocationPreferences {
            near_pharmacy: false,
            ..Default::default()
        };
        assert!(location_priorities(&prefs).is_empty());
    }

    #[test]
    fn test_family_labels() {
        let label = |p: FamilyProximity| {
            location_priorities(&LocationPreferences {
                proximity_to_family: p,
                near_pharmacy: false,
                ..Default::default()
            })
        };
        assert_eq!(label(FamilyProximity::Within30Min), vec!["Family within 30 minutes"]);
        assert_eq!(label(FamilyProximity::Within1Hour), vec!["Family within 1 hour"]);
        assert!(label(FamilyProximity::Flexible).is_empty());
    }
}
