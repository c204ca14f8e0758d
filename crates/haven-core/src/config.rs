use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{HavenError, Result};

/// Top-level configuration for the Haven application.
///
/// Loaded from `~/.haven/config.toml` by default. Every section falls back
/// to its defaults when omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HavenConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub coach: CoachConfig,
    #[serde(default)]
    pub places: PlacesConfig,
}

impl HavenConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: HavenConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| HavenError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// Port for the HTTP API.
    pub port: u16,
    /// File holding the bearer token for `/api` routes.
    pub api_token_path: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            port: 3040,
            api_token_path: "~/.haven/api_token".to_string(),
        }
    }
}

/// Dialogue engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoachConfig {
    /// Longest accepted user message, in bytes.
    pub max_message_length: usize,
    /// Number of trailing messages rendered into a condensed context string.
    pub context_window: usize,
    /// A report is ready once the history holds more messages than this.
    pub report_min_history: usize,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            max_message_length: 2000,
            context_window: 5,
            report_min_history: 5,
        }
    }
}

/// Outbound geocoding and place-search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacesConfig {
    /// Environment variable holding the Google Maps server key.
    pub api_key_env: String,
    /// Places text-search endpoint.
    pub places_url: String,
    /// Geocoding endpoint.
    pub geocode_url: String,
    /// Value of the `X-Goog-FieldMask` header sent with place searches.
    pub field_mask: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GOOGLE_MAPS_API_KEY_SERVER".to_string(),
            places_url: "https://places.googleapis.com/v1/places:searchText".to_string(),
            geocode_url: "https://maps.googleapis.com/maps/api/geocode/json".to_string(),
            field_mask: "places.id,places.displayName,places.formattedAddress,places.location,places.rating,places.priceLevel,places.types".to_string(),
            connect_timeout_secs: 5,
            request_timeout_secs: 15,
        }
    }
}

impl PlacesConfig {
    /// Read the API key from the configured environment variable.
    ///
    /// Blank values count as missing.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }
}
