//! Settings API endpoint
//!
//! Provides POST /api/settings/gemini_api_key for runtime credential
//! configuration. The database copy is authoritative; the environment
//! variable is only a fallback at resolution time.

use crate::{ApiError, ApiResult, AppState};
use axum::{extract::State, routing::post, Json, Router};
use linkstrat_common::db::settings;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Request payload for setting the Gemini API key
#[derive(Debug, Deserialize)]
pub struct SetApiKeyRequest {
    pub api_key: String,
}

/// Response payload for API key configuration
#[derive(Debug, Serialize)]
pub struct SetApiKeyResponse {
    pub success: bool,
    pub message: String,
}

/// POST /api/settings/gemini_api_key
///
/// **Request:** `{"api_key": "your-gemini-key"}`
/// **Errors:** 400 for empty or whitespace-only keys, 500 on write failure.
pub async fn set_gemini_api_key(
    State(state): State<AppState>,
    Json(payload): Json<SetApiKeyRequest>,
) -> ApiResult<Json<SetApiKeyResponse>> {
    if !crate::config::is_valid_key(&payload.api_key) {
        return Err(ApiError::BadRequest(
            "API key cannot be empty or whitespace-only".to_string(),
        ));
    }

    settings::set_gemini_api_key(&state.db, payload.api_key.trim()).await?;
    info!("Gemini API key updated in database");

    Ok(Json(SetApiKeyResponse {
        success: true,
        message: "Gemini API key configured".to_string(),
    }))
}

/// Build settings routes
pub fn settings_routes() -> Router<AppState> {
    Router::new().route("/api/settings/gemini_api_key", post(set_gemini_api_key))
}
