//! Preference-driven housing analysis for Haven.
//!
//! Each operation asks the user for a structured preference object through
//! an elicitation collaborator, then runs a small deterministic calculation
//! (budget affordability, accessibility requirements, location priorities)
//! or forwards to the geocoding and place-search collaborators.

pub mod accessibility;
pub mod budget;
pub mod elicitation;
pub mod error;
pub mod google;
pub mod location;
pub mod operations;
pub mod places;
pub mod preferences;

pub use accessibility::{
    score_accessibility, AccessibilityRecommendations, AccessibilityScore, ACCESSIBILITY_QUESTIONS,
};
pub use budget::{analyze_budget, AffordabilityStatus, BudgetAnalysis, BudgetBreakdown};
pub use elicitation::{
    request_preferences, Elicitation, ElicitationOutcome, Elicitor, ScriptedElicitor,
};
pub use error::AdvisorError;
pub use google::GoogleMapsClient;
pub use location::{location_priorities, LOCATION_QUESTIONS};
pub use operations::{
    AccessibilityReport, BudgetPlanReport, HousingAdvisor, HousingSearchReport, HousingSearchResult,
    LocationFitReport, LocationNotFound, ReportStatus, Tool, ToolResponse,
};
pub use places::{
    Coordinates, Geocoder, PlaceQuery, PlaceSearch, PlaceSearchOutcome, PlaceSearchStatus,
};
pub use preferences::{
    AccessibilityPreferences, BudgetAnalysisPreferences, FamilyProximity, HousingSearchPreferences,
    HousingType, LocationPreferences, PreferenceSchema, SchemaDescriptor, Validate,
};
