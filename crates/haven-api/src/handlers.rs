//! Route handler functions for all API endpoints.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use haven_advisor::{AdvisorError, ElicitationOutcome, SchemaDescriptor, ScriptedElicitor, Tool};
use haven_chat::{validate_message, CoachReply};
use haven_core::Message;

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request and response types
// =============================================================================

/// Request body for POST /api/coach.
#[derive(Debug, Deserialize)]
pub struct CoachRequest {
    #[serde(default)]
    pub message: String,
    /// Prior turns, oldest first. Sent back in full by the caller each time.
    #[serde(default)]
    pub history: Vec<Message>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub places_configured: bool,
}

#[derive(Debug, Serialize)]
pub struct ToolInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub schema: SchemaDescriptor,
}

#[derive(Debug, Serialize)]
pub struct ToolsResponse {
    pub tools: Vec<ToolInfo>,
}

// =============================================================================
// Handler functions
// =============================================================================

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        places_configured: state.config.places.api_key().is_some(),
    })
}

/// POST /api/coach - classify one message and return the coach's reply.
pub async fn coach(
    State(state): State<AppState>,
    Json(req): Json<CoachRequest>,
) -> Result<Json<CoachReply>, ApiError> {
    validate_message(&req.message, state.config.coach.max_message_length)?;
    let reply = state.router.route(&req.message, &req.history);
    tracing::info!(
        intent = %reply.intent,
        kind = ?reply.response.kind,
        history_len = req.history.len(),
        "Coach reply"
    );
    Ok(Json(reply))
}

/// GET /api/tools - the preference-driven tools and their schemas.
pub async fn list_tools() -> Json<ToolsResponse> {
    let tools = Tool::ALL
        .into_iter()
        .map(|tool| ToolInfo {
            name: tool.name(),
            description: tool.description(),
            schema: tool.descriptor(),
        })
        .collect();
    Json(ToolsResponse { tools })
}

/// POST /api/tools/{name} - run a tool with a caller-supplied elicitation outcome.
pub async fn invoke_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(outcome): Json<ElicitationOutcome>,
) -> Result<Json<Value>, ApiError> {
    let tool = Tool::from_name(&name).ok_or(AdvisorError::UnknownTool(name))?;
    let elicitor = ScriptedElicitor::new(outcome);
    let payload = state.advisor.run(tool, &elicitor).await?;
    tracing::info!(tool = tool.name(), status = %payload["status"], "Tool invoked");
    Ok(Json(payload))
}
