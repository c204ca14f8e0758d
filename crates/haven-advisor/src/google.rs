//! Google Maps geocoding and Places text search over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use haven_core::config::PlacesConfig;

use crate::error::AdvisorError;
use crate::places::{
    Coordinates, Geocoder, PlaceQuery, PlaceSearch, PlaceSearchOutcome, PlaceSearchStatus,
};

const MISSING_KEY_ERROR: &str = "Google Maps API key not configured";

#[derive(Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct SearchTextResponse {
    #[serde(default)]
    places: Vec<Value>,
}

/// HTTP client for both collaborator seams.
///
/// Without an API key every geocode is `None` and every search reports
/// `API_KEY_MISSING`; no request is sent.
#[derive(Debug, Clone)]
pub struct GoogleMapsClient {
    http: HttpClient,
    api_key: Option<String>,
    places_url: String,
    geocode_url: String,
    field_mask: String,
}

impl GoogleMapsClient {
    /// Build a client, reading the key from the configured env var.
    pub fn from_config(config: &PlacesConfig) -> Result<Self, AdvisorError> {
        Self::new(config, config.api_key())
    }

    pub fn new(config: &PlacesConfig, api_key: Option<String>) -> Result<Self, AdvisorError> {
        let http = HttpClient::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AdvisorError::HttpClient(format!("failed to build HTTP client: {e}")))?;

        if api_key.is_none() {
            warn!(
                env_var = %config.api_key_env,
                "No Google Maps API key; searches will report API_KEY_MISSING"
            );
        }

        Ok(Self {
            http,
            api_key,
            places_url: config.places_url.clone(),
            geocode_url: config.geocode_url.clone(),
            field_mask: config.field_mask.clone(),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    async fn fetch_coordinates(
        &self,
        location: &str,
        key: &str,
    ) -> reqwest::Result<Option<Coordinates>> {
        let response = self
            .http
            .get(self.geocode_url.as_str())
            .query(&[("address", location), ("key", key)])
            .send()
            .await?;
        if response.status() != StatusCode::OK {
            debug!(status = %response.status(), "Geocode request not OK");
            return Ok(None);
        }
        let body: GeocodeResponse = response.json().await?;
        Ok(body.results.into_iter().next().map(|r| Coordinates {
            latitude: r.geometry.location.lat,
            longitude: r.geometry.location.lng,
        }))
    }
}

#[async_trait]
impl Geocoder for GoogleMapsClient {
    async fn geocode(&self, location: &str) -> Option<Coordinates> {
        let key = self.api_key.as_deref()?;
        match self.fetch_coordinates(location, key).await {
            Ok(coords) => {
                debug!(location, found = coords.is_some(), "Geocoded location");
                coords
            }
            Err(e) => {
                warn!(location, error = %e, "Geocoding failed");
                None
            }
        }
    }
}

#[async_trait]
impl PlaceSearch for GoogleMapsClient {
    async fn search_text(&self, query: &PlaceQuery) -> PlaceSearchOutcome {
        let Some(key) = self.api_key.as_deref() else {
            return PlaceSearchOutcome::failure(
                PlaceSearchStatus::ApiKeyMissing,
                MISSING_KEY_ERROR,
            );
        };

        let sent = self
            .http
            .post(self.places_url.as_str())
            .header("X-Goog-Api-Key", key)
            .header("X-Goog-FieldMask", self.field_mask.as_str())
            .json(query)
            .send()
            .await;

        let response = match sent {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "Place search request failed");
                return PlaceSearchOutcome::failure(
                    PlaceSearchStatus::RequestFailed,
                    e.to_string(),
                );
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Place search returned an error");
            return PlaceSearchOutcome::failure(
                PlaceSearchStatus::ApiError,
                format!("HTTP {}: {}", status.as_u16(), body),
            );
        }

        match response.json::<SearchTextResponse>().await {
            Ok(body) => {
                debug!(
                    query = %query.text_query,
                    count = body.places.len(),
                    "Place search complete"
                );
                PlaceSearchOutcome::success(body.places)
            }
            Err(e) => PlaceSearchOutcome::failure(PlaceSearchStatus::RequestFailed, e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::HousingType;
    use axum::extract::Query;
    use axum::http::{HeaderMap, StatusCode as AxumStatus};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    const KEY: &str = "test-key";

    async fn fake_geocode(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        let known = params.get("address").map(String::as_str) == Some("Cleveland, OH")
            && params.get("key").map(String::as_str) == Some(KEY);
        if known {
            Json(json!({
                "status": "OK",
                "results": [{"geometry": {"location": {"lat": 41.4993, "lng": -81.6944}}}]
            }))
        } else {
            Json(json!({"status": "ZERO_RESULTS", "results": []}))
        }
    }

    async fn fake_search(headers: HeaderMap, Json(body): Json<Value>) -> (AxumStatus, String) {
        if headers.get("X-Goog-Api-Key").and_then(|v| v.to_str().ok()) != Some(KEY) {
            return (AxumStatus::FORBIDDEN, "API key invalid".to_string());
        }
        if headers.get("X-Goog-FieldMask").is_none() {
            return (AxumStatus::BAD_REQUEST, "missing field mask".to_string());
        }
        let places = json!({
            "places": [
                {"displayName": {"text": body["textQuery"]}},
                {"radius": body["locationBias"]["circle"]["radius"]}
            ]
        });
        (AxumStatus::OK, places.to_string())
    }

    async fn garbage() -> &'static str {
        "not json"
    }

    /// Serve the fake endpoints and return a config pointing at them.
    async fn fake_google() -> PlacesConfig {
        let app = Router::new()
            .route("/geocode", get(fake_geocode))
            .route("/places", post(fake_search))
            .route("/garbage", post(garbage));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        PlacesConfig {
            places_url: format!("http://{addr}/places"),
            geocode_url: format!("http://{addr}/geocode"),
            ..PlacesConfig::default()
        }
    }

    fn query() -> PlaceQuery {
        PlaceQuery::for_housing(
            &[HousingType::AssistedLiving, HousingType::IndependentLiving],
            "Cleveland, OH",
            Coordinates {
                latitude: 41.4993,
                longitude: -81.6944,
            },
            10,
        )
    }

    #[tokio::test]
    async fn test_geocode_first_result() {
        let config = fake_google().await;
        let client = GoogleMapsClient::new(&config, Some(KEY.into())).unwrap();
        let coords = client.geocode("Cleveland, OH").await.unwrap();
        assert_eq!(coords.latitude, 41.4993);
        assert_eq!(coords.longitude, -81.6944);
    }

    #[tokio::test]
    async fn test_geocode_no_results_is_none() {
        let config = fake_google().await;
        let client = GoogleMapsClient::new(&config, Some(KEY.into())).unwrap();
        assert!(client.geocode("Atlantis").await.is_none());
    }

    #[tokio::test]
    async fn test_missing_key_sends_nothing() {
        // Unroutable URLs: any request would fail, so success proves none was sent.
        let config = PlacesConfig {
            places_url: "http://127.0.0.1:9/places".into(),
            geocode_url: "http://127.0.0.1:9/geocode".into(),
            ..PlacesConfig::default()
        };
        let client = GoogleMapsClient::new(&config, None).unwrap();
        assert!(!client.has_api_key());
        assert!(client.geocode("Cleveland, OH").await.is_none());

        let outcome = client.search_text(&query()).await;
        assert_eq!(outcome.status, PlaceSearchStatus::ApiKeyMissing);
        assert!(outcome.results.is_empty());
        assert_eq!(outcome.error.as_deref(), Some(MISSING_KEY_ERROR));
    }

    #[tokio::test]
    async fn test_search_success_returns_places() {
        let config = fake_google().await;
        let client = GoogleMapsClient::new(&config, Some(KEY.into())).unwrap();
        let outcome = client.search_text(&query()).await;
        assert_eq!(outcome.status, PlaceSearchStatus::Success);
        assert_eq!(outcome.results.len(), 2);
        assert_eq!(
            outcome.results[0]["displayName"]["text"],
            "assisted living or independent living in Cleveland, OH"
        );
        assert_eq!(outcome.results[1]["radius"], 16093);
        assert!(outcome.error.is_none());
    }

    #[tokio::test]
    async fn test_search_non_200_is_api_error() {
        let config = fake_google().await;
        let client = GoogleMapsClient::new(&config, Some("wrong-key".into())).unwrap();
        let outcome = client.search_text(&query()).await;
        assert_eq!(outcome.status, PlaceSearchStatus::ApiError);
        assert_eq!(outcome.error.as_deref(), Some("HTTP 403: API key invalid"));
        assert!(outcome.results.is_empty());
    }

    #[tokio::test]
    async fn test_search_bad_body_is_request_failed() {
        let mut config = fake_google().await;
        config.places_url = config.places_url.replace("/places", "/garbage");
        let client = GoogleMapsClient::new(&config, Some(KEY.into())).unwrap();
        let outcome = client.search_text(&query()).await;
        assert_eq!(outcome.status, PlaceSearchStatus::RequestFailed);
        assert!(outcome.error.is_some());
    }

    #[tokio::test]
    async fn test_search_unreachable_is_request_failed() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let config = PlacesConfig {
            places_url: format!("http://{addr}/places"),
            ..PlacesConfig::default()
        };
        let client = GoogleMapsClient::new(&config, Some(KEY.into())).unwrap();
        let outcome = client.search_text(&query()).await;
        assert_eq!(outcome.status, PlaceSearchStatus::RequestFailed);
    }
}
