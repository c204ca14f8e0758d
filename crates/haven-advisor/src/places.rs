//! Geocoding and place-search seams.
//!
//! Neither collaborator returns a Rust error: a location that cannot be
//! resolved is `None`, and search failures come back as a status-tagged
//! outcome with an empty result list.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::preferences::HousingType;

const METERS_PER_MILE: f64 = 1609.34;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceQuery {
    pub text_query: String,
    pub location_bias: LocationBias,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LocationBias {
    pub circle: Circle,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Circle {
    pub center: Coordinates,
    /// Metres.
    pub radius: u32,
}

impl PlaceQuery {
    /// Query for `types` around `location`, biased to a circle of
    /// `radius_miles` around `center`.
    pub fn for_housing(
        types: &[HousingType],
        location: &str,
        center: Coordinates,
        radius_miles: u32,
    ) -> Self {
        let phrases: Vec<&str> = types.iter().map(HousingType::search_phrase).collect();
        Self {
            text_query: format!("{} in {}", phrases.join(" or "), location),
            location_bias: LocationBias {
                circle: Circle {
                    center,
                    radius: miles_to_meters(radius_miles),
                },
            },
        }
    }
}

/// Truncates toward zero.
pub fn miles_to_meters(miles: u32) -> u32 {
    (f64::from(miles) * METERS_PER_MILE) as u32
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaceSearchStatus {
    #[serde(rename = "success")]
    Success,
    #[serde(rename = "API_ERROR")]
    ApiError,
    #[serde(rename = "REQUEST_FAILED")]
    RequestFailed,
    #[serde(rename = "API_KEY_MISSING")]
    ApiKeyMissing,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlaceSearchOutcome {
    pub status: PlaceSearchStatus,
    pub results: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PlaceSearchOutcome {
    pub fn success(results: Vec<Value>) -> Self {
        Self {
            status: PlaceSearchStatus::Success,
            results,
            error: None,
        }
    }

    pub fn failure(status: PlaceSearchStatus, error: impl Into<String>) -> Self {
        Self {
            status,
            results: Vec::new(),
            error: Some(error.into()),
        }
    }
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, location: &str) -> Option<Coordinates>;
}

#[async_trait]
pub trait PlaceSearch: Send + Sync {
    async fn search_text(&self, query: &PlaceQuery) -> PlaceSearchOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CLEVELAND: Coordinates = Coordinates {
        latitude: 41.4993,
        longitude: -81.6944,
    };

    #[test]
    fn test_query_text_joins_types() {
        let query = PlaceQuery::for_housing(
            &[HousingType::AssistedLiving, HousingType::MemoryCare],
            "Cleveland, OH",
            CLEVELAND,
            10,
        );
        assert_eq!(query.text_query, "assisted living or memory care in Cleveland, OH");
    }

    #[test]
    fn test_single_type_has_no_separator() {
        let query =
            PlaceQuery::for_housing(&[HousingType::SeniorApartments], "Akron", CLEVELAND, 1);
        assert_eq!(query.text_query, "senior apartments in Akron");
    }

    #[test]
    fn test_radius_conversion_truncates() {
        assert_eq!(miles_to_meters(1), 1609);
        assert_eq!(miles_to_meters(10), 16093);
        assert_eq!(miles_to_meters(25), 40233);
    }

    #[test]
    fn test_query_wire_format() {
        let query = PlaceQuery::for_housing(&[HousingType::AssistedLiving], "Akron", CLEVELAND, 5);
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "textQuery": "assisted living in Akron",
                "locationBias": {
                    "circle": {
                        "center": {"latitude": 41.4993, "longitude": -81.6944},
                        "radius": 8046
                    }
                }
            })
        );
    }

    #[test]
    fn test_status_wire_names() {
        let names: Vec<Value> = [
            PlaceSearchStatus::Success,
            PlaceSearchStatus::ApiError,
            PlaceSearchStatus::RequestFailed,
            PlaceSearchStatus::ApiKeyMissing,
        ]
        .iter()
        .map(|s| serde_json::to_value(s).unwrap())
        .collect();
        assert_eq!(
            names,
            vec![
                json!("success"),
                json!("API_ERROR"),
                json!("REQUEST_FAILED"),
                json!("API_KEY_MISSING")
            ]
        );
    }

    #[test]
    fn test_failure_has_empty_results() {
        let outcome = PlaceSearchOutcome::failure(PlaceSearchStatus::ApiError, "HTTP 403: denied");
        assert!(outcome.results.is_empty());
        assert_eq!(outcome.error.as_deref(), Some("HTTP 403: denied"));
    }
}
