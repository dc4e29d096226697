//! Stateless generation endpoints
//!
//! Each handler is a pure request/response boundary: validate the
//! credential, build one prompt from the payload, issue exactly one
//! generator call, return the raw markdown. No state is read or written.

use crate::prompts::{self, PostRequest};
use crate::services::GenerateError;
use crate::wizard::answers::AnswerStore;
use crate::{ApiError, ApiResult, AppState};
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

fn upstream(e: GenerateError) -> ApiError {
    match e {
        GenerateError::Api(status, body) => ApiError::Upstream(
            format!("Generation service returned status {}", status),
            Some(body),
        ),
        other => ApiError::Upstream(other.to_string(), None),
    }
}

#[derive(Debug, Deserialize)]
pub struct FoundationRequest {
    pub answers: AnswerStore,
}

#[derive(Debug, Serialize)]
pub struct FoundationResponse {
    pub foundation: String,
}

/// POST /api/generate-foundation
pub async fn generate_foundation(
    State(state): State<AppState>,
    Json(payload): Json<FoundationRequest>,
) -> ApiResult<Json<FoundationResponse>> {
    let generator = state.resolve_generator().await?;
    let prompt = prompts::foundation_prompt(&payload.answers, &state.catalog);
    let foundation = generator.generate(&prompt).await.map_err(upstream)?;
    Ok(Json(FoundationResponse { foundation }))
}

#[derive(Debug, Deserialize)]
pub struct CalendarRequest {
    pub answers: AnswerStore,
    pub foundation: String,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub calendar: String,
}

/// POST /api/generate-calendar
pub async fn generate_calendar(
    State(state): State<AppState>,
    Json(payload): Json<CalendarRequest>,
) -> ApiResult<Json<CalendarResponse>> {
    let generator = state.resolve_generator().await?;
    let prompt = prompts::calendar_prompt(&payload.answers, &state.catalog, &payload.foundation);
    let calendar = generator.generate(&prompt).await.map_err(upstream)?;
    Ok(Json(CalendarResponse { calendar }))
}

#[derive(Debug, Deserialize)]
pub struct GeneratePostRequest {
    pub pillar: String,
    pub topic: String,
    pub approach: String,
    pub content_type: String,
    #[serde(default)]
    pub user_voice: String,
    #[serde(default)]
    pub unique_perspective: String,
}

#[derive(Debug, Serialize)]
pub struct GeneratePostResponse {
    pub post: String,
}

/// POST /api/generate-post
pub async fn generate_post(
    State(state): State<AppState>,
    Json(payload): Json<GeneratePostRequest>,
) -> ApiResult<Json<GeneratePostResponse>> {
    let generator = state.resolve_generator().await?;
    let request = PostRequest {
        pillar: payload.pillar,
        topic: payload.topic,
        approach: payload.approach,
        content_type: payload.content_type,
        user_voice: payload.user_voice,
        unique_perspective: payload.unique_perspective,
    };
    let prompt = prompts::post_prompt(&request, &state.catalog);
    let post = generator.generate(&prompt).await.map_err(upstream)?;
    Ok(Json(GeneratePostResponse { post }))
}

/// Build stateless generation routes
pub fn generate_routes() -> Router<AppState> {
    Router::new()
        .route("/api/generate-foundation", post(generate_foundation))
        .route("/api/generate-calendar", post(generate_calendar))
        .route("/api/generate-post", post(generate_post))
}
