//! Application state shared across all route handlers.

use std::sync::Arc;
use std::time::Instant;

use haven_advisor::HousingAdvisor;
use haven_chat::DialogueRouter;
use haven_core::HavenConfig;

/// Shared application state.
///
/// Nothing here is mutated after startup, so cloning per request is cheap
/// and handlers never contend on a lock.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<HavenConfig>,
    /// Free-text dialogue router.
    pub router: Arc<DialogueRouter>,
    /// Preference-driven operations and their collaborators.
    pub advisor: HousingAdvisor,
    /// Bearer token required on `/api/*`.
    pub api_token: String,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: HavenConfig, advisor: HousingAdvisor, api_token: String) -> Self {
        let router = DialogueRouter::new(&config.coach);
        Self {
            config: Arc::new(config),
            router: Arc::new(router),
            advisor,
            api_token,
            start_time: Instant::now(),
        }
    }
}
