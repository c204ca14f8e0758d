//! The four preference-driven operations.
//!
//! Every operation first elicits its preference object. Declined and
//! cancelled answers return a status-only payload before any calculation
//! or network call runs.

use std::sync::Arc;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::{info, warn};

use crate::accessibility::{score_accessibility, AccessibilityRecommendations};
use crate::budget::{analyze_budget, BudgetAnalysis};
use crate::elicitation::{request_preferences, Elicitation, Elicitor};
use crate::error::AdvisorError;
use crate::google::GoogleMapsClient;
use crate::location::{location_priorities, LOCATION_QUESTIONS};
use crate::places::{Coordinates, Geocoder, PlaceQuery, PlaceSearch, PlaceSearchStatus};
use crate::preferences::{
    AccessibilityPreferences, BudgetAnalysisPreferences, HousingSearchPreferences,
    LocationPreferences, PreferenceSchema, SchemaDescriptor,
};

// =============================================================================
// Tool catalogue
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tool {
    SearchSeniorHousing,
    AnalyzeAccessibility,
    PlanBudget,
    AnalyzeLocationFit,
}

impl Tool {
    pub const ALL: [Tool; 4] = [
        Tool::SearchSeniorHousing,
        Tool::AnalyzeAccessibility,
        Tool::PlanBudget,
        Tool::AnalyzeLocationFit,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::SearchSeniorHousing => "search_senior_housing",
            Tool::AnalyzeAccessibility => "analyze_accessibility",
            Tool::PlanBudget => "plan_budget",
            Tool::AnalyzeLocationFit => "analyze_location_fit",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Tool::SearchSeniorHousing => {
                "Search for senior housing options by location, budget and housing type"
            }
            Tool::AnalyzeAccessibility => {
                "Analyze accessibility needs and list features to require and questions to ask"
            }
            Tool::PlanBudget => "Plan a housing budget from income, expenses and savings",
            Tool::AnalyzeLocationFit => {
                "Rank location priorities such as family, hospital and pharmacy proximity"
            }
        }
    }

    /// Schema of the preference object this tool elicits.
    pub fn descriptor(&self) -> SchemaDescriptor {
        match self {
            Tool::SearchSeniorHousing => HousingSearchPreferences::descriptor(),
            Tool::AnalyzeAccessibility => AccessibilityPreferences::descriptor(),
            Tool::PlanBudget => BudgetAnalysisPreferences::descriptor(),
            Tool::AnalyzeLocationFit => LocationPreferences::descriptor(),
        }
    }

    pub fn from_name(name: &str) -> Option<Tool> {
        Tool::ALL.into_iter().find(|t| t.name() == name)
    }
}

// =============================================================================
// Responses
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Success,
    Error,
}

/// Result of one preference-driven operation.
///
/// Declined and cancelled serialize to `{"status":"declined"}` and
/// `{"status":"cancelled"}`; a completed report serializes as itself.
#[derive(Clone, Debug, PartialEq)]
pub enum ToolResponse<T> {
    Completed(T),
    Declined,
    Cancelled,
}

impl<T> ToolResponse<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, ToolResponse::Completed(_))
    }

    /// The report, if the user accepted.
    pub fn completed(self) -> Option<T> {
        match self {
            ToolResponse::Completed(report) => Some(report),
            _ => None,
        }
    }
}

impl<T: Serialize> Serialize for ToolResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let status = match self {
            ToolResponse::Completed(report) => return report.serialize(serializer),
            ToolResponse::Declined => "declined",
            ToolResponse::Cancelled => "cancelled",
        };
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("status", status)?;
        map.end()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HousingSearchReport {
    pub status: PlaceSearchStatus,
    pub query: String,
    pub location: String,
    pub coordinates: Coordinates,
    pub preferences: HousingSearchPreferences,
    pub results: Vec<Value>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The search location could not be geocoded.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LocationNotFound {
    pub status: ReportStatus,
    pub message: String,
    pub preferences: HousingSearchPreferences,
    pub results: Vec<Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HousingSearchResult {
    Found(HousingSearchReport),
    LocationNotFound(LocationNotFound),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AccessibilityReport {
    pub status: ReportStatus,
    pub preferences: AccessibilityPreferences,
    pub recommendations: AccessibilityRecommendations,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BudgetPlanReport {
    pub status: ReportStatus,
    pub analysis: BudgetAnalysis,
    pub preferences: BudgetAnalysisPreferences,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LocationFitReport {
    pub status: ReportStatus,
    pub location_priorities: Vec<String>,
    pub questions_to_ask: Vec<String>,
    pub preferences: LocationPreferences,
}

// =============================================================================
// Advisor
// =============================================================================

/// Runs the preference-driven operations against its collaborators.
///
/// Holds no per-call state; concurrent calls are independent.
#[derive(Clone)]
pub struct HousingAdvisor {
    geocoder: Arc<dyn Geocoder>,
    places: Arc<dyn PlaceSearch>,
}

impl HousingAdvisor {
    pub fn new(geocoder: Arc<dyn Geocoder>, places: Arc<dyn PlaceSearch>) -> Self {
        Self { geocoder, places }
    }

    /// Use one Google Maps client for both geocoding and search.
    pub fn with_google(client: GoogleMapsClient) -> Self {
        let client = Arc::new(client);
        Self::new(client.clone(), client)
    }

    pub async fn search_senior_housing(
        &self,
        elicitor: &dyn Elicitor,
    ) -> Result<ToolResponse<HousingSearchResult>, AdvisorError> {
        let prefs = match request_preferences::<HousingSearchPreferences>(elicitor).await? {
            Elicitation::Accepted(prefs) => prefs,
            Elicitation::Declined => return Ok(ToolResponse::Declined),
            Elicitation::Cancelled => return Ok(ToolResponse::Cancelled),
        };

        let Some(coordinates) = self.geocoder.geocode(&prefs.location).await else {
            warn!(tool = "search_senior_housing", location = %prefs.location, "Location not found");
            return Ok(ToolResponse::Completed(HousingSearchResult::LocationNotFound(
                LocationNotFound {
                    status: ReportStatus::Error,
                    message: format!("Could not find location: {}", prefs.location),
                    preferences: prefs,
                    results: Vec::new(),
                },
            )));
        };

        let query = PlaceQuery::for_housing(
            &prefs.housing_type,
            &prefs.location,
            coordinates,
            prefs.radius_miles,
        );
        let outcome = self.places.search_text(&query).await;
        info!(
            tool = "search_senior_housing",
            status = ?outcome.status,
            count = outcome.results.len(),
            "Housing search finished"
        );

        Ok(ToolResponse::Completed(HousingSearchResult::Found(
            HousingSearchReport {
                status: outcome.status,
                query: query.text_query,
                location: prefs.location.clone(),
                coordinates,
                preferences: prefs,
                count: outcome.results.len(),
                results: outcome.results,
                error: outcome.error,
            },
        )))
    }

    pub async fn analyze_accessibility(
        &self,
        elicitor: &dyn Elicitor,
    ) -> Result<ToolResponse<AccessibilityReport>, AdvisorError> {
        let prefs = match request_preferences::<AccessibilityPreferences>(elicitor).await? {
            Elicitation::Accepted(prefs) => prefs,
            Elicitation::Declined => return Ok(ToolResponse::Declined),
            Elicitation::Cancelled => return Ok(ToolResponse::Cancelled),
        };
        let recommendations = score_accessibility(&prefs);
        info!(
            tool = "analyze_accessibility",
            score = ?recommendations.accessibility_score,
            "Accessibility analyzed"
        );
        Ok(ToolResponse::Completed(AccessibilityReport {
            status: ReportStatus::Success,
            preferences: prefs,
            recommendations,
        }))
    }

    pub async fn plan_budget(
        &self,
        elicitor: &dyn Elicitor,
    ) -> Result<ToolResponse<BudgetPlanReport>, AdvisorError> {
        let prefs = match request_preferences::<BudgetAnalysisPreferences>(elicitor).await? {
            Elicitation::Accepted(prefs) => prefs,
            Elicitation::Declined => return Ok(ToolResponse::Declined),
            Elicitation::Cancelled => return Ok(ToolResponse::Cancelled),
        };
        let analysis = analyze_budget(&prefs);
        info!(
            tool = "plan_budget",
            status = ?analysis.affordability_status,
            "Budget planned"
        );
        Ok(ToolResponse::Completed(BudgetPlanReport {
            status: ReportStatus::Success,
            analysis,
            preferences: prefs,
        }))
    }

    pub async fn analyze_location_fit(
        &self,
        elicitor: &dyn Elicitor,
    ) -> Result<ToolResponse<LocationFitReport>, AdvisorError> {
        let prefs = match request_preferences::<LocationPreferences>(elicitor).await? {
            Elicitation::Accepted(prefs) => prefs,
            Elicitation::Declined => return Ok(ToolResponse::Declined),
            Elicitation::Cancelled => return Ok(ToolResponse::Cancelled),
        };
        let priorities = location_priorities(&prefs);
        info!(
            tool = "analyze_location_fit",
            priorities = priorities.len(),
            "Location fit analyzed"
        );
        Ok(ToolResponse::Completed(LocationFitReport {
            status: ReportStatus::Success,
            location_priorities: priorities,
            questions_to_ask: LOCATION_QUESTIONS.iter().map(|q| q.to_string()).collect(),
            preferences: prefs,
        }))
    }

    /// Run `tool` and return its JSON payload.
    pub async fn run(&self, tool: Tool, elicitor: &dyn Elicitor) -> Result<Value, AdvisorError> {
        let value = match tool {
            Tool::SearchSeniorHousing => {
                serde_json::to_value(self.search_senior_housing(elicitor).await?)?
            }
            Tool::AnalyzeAccessibility => {
                serde_json::to_value(self.analyze_accessibility(elicitor).await?)?
            }
            Tool::PlanBudget => serde_json::to_value(self.plan_budget(elicitor).await?)?,
            Tool::AnalyzeLocationFit => {
                serde_json::to_value(self.analyze_location_fit(elicitor).await?)?
            }
        };
        Ok(value)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elicitation::{ElicitationOutcome, ScriptedElicitor};
    use crate::places::PlaceSearchOutcome;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    const AKRON: Coordinates = Coordinates {
        latitude: 41.0814,
        longitude: -81.519,
    };

    #[derive(Default)]
    struct CountingGeocoder {
        calls: AtomicUsize,
        unknown: bool,
    }

    #[async_trait]
    impl Geocoder for CountingGeocoder {
        async fn geocode(&self, _location: &str) -> Option<Coordinates> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.unknown {
                None
            } else {
                Some(AKRON)
            }
        }
    }

    struct CountingSearch {
        calls: AtomicUsize,
        last_query: Mutex<Option<PlaceQuery>>,
        outcome: PlaceSearchOutcome,
    }

    impl CountingSearch {
        fn returning(outcome: PlaceSearchOutcome) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                last_query: Mutex::new(None),
                outcome,
            }
        }
    }

    #[async_trait]
    impl PlaceSearch for CountingSearch {
        async fn search_text(&self, query: &PlaceQuery) -> PlaceSearchOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_query.lock().unwrap() = Some(query.clone());
            self.outcome.clone()
        }
    }

    struct Fixture {
        geocoder: Arc<CountingGeocoder>,
        search: Arc<CountingSearch>,
        advisor: HousingAdvisor,
    }

    fn fixture_with(geocoder: CountingGeocoder, search: CountingSearch) -> Fixture {
        let geocoder = Arc::new(geocoder);
        let search = Arc::new(search);
        let advisor = HousingAdvisor::new(geocoder.clone(), search.clone());
        Fixture {
            geocoder,
            search,
            advisor,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(
            CountingGeocoder::default(),
            CountingSearch::returning(PlaceSearchOutcome::success(vec![
                json!({"displayName": {"text": "Maple Grove"}}),
                json!({"displayName": {"text": "Oak Terrace"}}),
            ])),
        )
    }

    fn accept(content: Value) -> ScriptedElicitor {
        ScriptedElicitor::new(ElicitationOutcome::accept(content))
    }

    // ---- Catalogue ----

    #[test]
    fn test_tool_names_round_trip() {
        for tool in Tool::ALL {
            assert_eq!(Tool::from_name(tool.name()), Some(tool));
        }
        assert_eq!(Tool::from_name("book_a_tour"), None);
    }

    #[test]
    fn test_tool_descriptors() {
        assert_eq!(Tool::PlanBudget.descriptor().name, "BudgetAnalysisPreferences");
        assert_eq!(
            Tool::SearchSeniorHousing.descriptor().name,
            "HousingSearchPreferences"
        );
    }

    // ---- Search ----

    #[tokio::test]
    async fn test_search_success() {
        let f = fixture();
        let elicitor = accept(json!({"location": "Akron, OH", "radius_miles": 5}));
        let result = f.advisor.search_senior_housing(&elicitor).await.unwrap();

        let Some(HousingSearchResult::Found(report)) = result.completed() else {
            panic!("expected a search report");
        };
        assert_eq!(report.status, PlaceSearchStatus::Success);
        assert_eq!(report.query, "assisted living or independent living in Akron, OH");
        assert_eq!(report.coordinates, AKRON);
        assert_eq!(report.count, 2);

        let sent = f.search.last_query.lock().unwrap().clone().unwrap();
        assert_eq!(sent.location_bias.circle.radius, 8046);
        assert_eq!(sent.location_bias.circle.center, AKRON);
    }

    #[tokio::test]
    async fn test_search_unknown_location_skips_search() {
        let f = fixture_with(
            CountingGeocoder {
                unknown: true,
                ..Default::default()
            },
            CountingSearch::returning(PlaceSearchOutcome::success(vec![])),
        );
        let elicitor = accept(json!({"location": "Nowhere"}));
        let value = serde_json::to_value(f.advisor.search_senior_housing(&elicitor).await.unwrap())
            .unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["message"], "Could not find location: Nowhere");
        assert_eq!(value["results"], json!([]));
        assert_eq!(value["preferences"]["radius_miles"], 10);
        assert_eq!(f.search.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_search_failure_status_passes_through() {
        let f = fixture_with(
            CountingGeocoder::default(),
            CountingSearch::returning(PlaceSearchOutcome::failure(
                PlaceSearchStatus::ApiError,
                "HTTP 500: boom",
            )),
        );
        let elicitor = accept(json!({"location": "Akron"}));
        let value = f
            .advisor
            .run(Tool::SearchSeniorHousing, &elicitor)
            .await
            .unwrap();
        assert_eq!(value["status"], "API_ERROR");
        assert_eq!(value["error"], "HTTP 500: boom");
        assert_eq!(value["count"], 0);
    }

    #[tokio::test]
    async fn test_search_cancel_makes_no_calls() {
        let f = fixture();
        let elicitor = ScriptedElicitor::new(ElicitationOutcome::Cancel);
        let result = f.advisor.search_senior_housing(&elicitor).await.unwrap();
        assert_eq!(result, ToolResponse::Cancelled);
        assert_eq!(f.geocoder.calls.load(Ordering::SeqCst), 0);
        assert_eq!(f.search.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_search_decline_makes_no_calls() {
        let f = fixture();
        let elicitor = ScriptedElicitor::new(ElicitationOutcome::Decline);
        let value = f
            .advisor
            .run(Tool::SearchSeniorHousing, &elicitor)
            .await
            .unwrap();
        assert_eq!(value, json!({"status": "declined"}));
        assert_eq!(f.geocoder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_search_invalid_preferences_make_no_calls() {
        let f = fixture();
        let elicitor = accept(json!({"location": "Akron", "radius_miles": 99}));
        let err = f.advisor.search_senior_housing(&elicitor).await.unwrap_err();
        assert!(matches!(err, AdvisorError::InvalidPreferences(_)));
        assert_eq!(f.geocoder.calls.load(Ordering::SeqCst), 0);
    }

    // ---- Calculators ----

    #[tokio::test]
    async fn test_accessibility_report() {
        let f = fixture();
        let elicitor = accept(json!({
            "wheelchair_accessible": true,
            "elevator_required": true,
            "grab_bars_needed": true,
            "medical_equipment": ["walker"]
        }));
        let value = f
            .advisor
            .run(Tool::AnalyzeAccessibility, &elicitor)
            .await
            .unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["recommendations"]["accessibility_score"], "high_needs");
        assert_eq!(value["recommendations"]["medical_equipment"], json!(["walker"]));
        assert_eq!(value["preferences"]["ground_floor_preferred"], false);
    }

    #[tokio::test]
    async fn test_budget_report() {
        let f = fixture();
        let elicitor = accept(json!({"monthly_income": 3000}));
        let report = f
            .advisor
            .plan_budget(&elicitor)
            .await
            .unwrap()
            .completed()
            .unwrap();
        assert_eq!(report.status, ReportStatus::Success);
        assert!((report.analysis.recommended_housing_budget - 900.0).abs() < 1e-9);
        assert!(report.preferences.include_meals);
    }

    #[tokio::test]
    async fn test_location_fit_report() {
        let f = fixture();
        let elicitor = accept(json!({"proximity_to_family": "same_city", "near_hospital": true}));
        let value = f
            .advisor
            .run(Tool::AnalyzeLocationFit, &elicitor)
            .await
            .unwrap();
        assert_eq!(
            value["location_priorities"],
            json!([
                "Family in the same city",
                "Hospital within 5 miles",
                "Pharmacy within walking distance"
            ])
        );
        assert_eq!(value["questions_to_ask"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_every_tool_cancels_cleanly() {
        let f = fixture();
        for tool in Tool::ALL {
            let elicitor = ScriptedElicitor::new(ElicitationOutcome::Cancel);
            let value = f.advisor.run(tool, &elicitor).await.unwrap();
            assert_eq!(value, json!({"status": "cancelled"}), "tool {}", tool.name());
            assert_eq!(elicitor.calls(), 1);
        }
        assert_eq!(f.geocoder.calls.load(Ordering::SeqCst), 0);
        assert_eq!(f.search.calls.load(Ordering::SeqCst), 0);
    }
}
