//! Server-side strategy generation endpoints
//!
//! Each submission gets one pipeline, created on the first start request
//! and kept in state for status polling and retries. Generation runs on
//! spawned tasks; these handlers return as soon as the stage is started.

use crate::pipeline::{GenerationPipeline, PipelineView};
use crate::wizard::submission;
use crate::{ApiError, ApiResult, AppState};
use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct StartedResponse {
    pub submission_id: Uuid,
    pub started: bool,
}

async fn get_pipeline(state: &AppState, id: Uuid) -> ApiResult<Arc<GenerationPipeline>> {
    state
        .pipelines
        .read()
        .await
        .get(&id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("No generation started for submission {}", id)))
}

/// POST /api/strategy/:submission_id
///
/// Creates the pipeline for the submission if needed and kicks off the
/// foundation stage, which chains into the calendar stage on success.
pub async fn strategy_start(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<StartedResponse>> {
    let generator = state.resolve_generator().await?;

    let pipeline = {
        let mut pipelines = state.pipelines.write().await;
        match pipelines.get(&id) {
            Some(existing) => existing.clone(),
            None => {
                let snapshot = submission::get_submission(&state.db, id).await?;
                let pipeline = Arc::new(GenerationPipeline::new(
                    snapshot,
                    state.catalog.clone(),
                    generator,
                ));
                pipelines.insert(id, pipeline.clone());
                pipeline
            }
        }
    };

    info!(submission_id = %id, "Strategy generation started");
    tokio::spawn(async move { pipeline.run_foundation().await });

    Ok(Json(StartedResponse {
        submission_id: id,
        started: true,
    }))
}

/// GET /api/strategy/:submission_id
pub async fn strategy_view(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<PipelineView>> {
    let pipeline = get_pipeline(&state, id).await?;
    Ok(Json(pipeline.view().await))
}

/// POST /api/strategy/:submission_id/retry-foundation
pub async fn retry_foundation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<StartedResponse>> {
    let pipeline = get_pipeline(&state, id).await?;
    info!(submission_id = %id, "Foundation retry requested");
    tokio::spawn(async move { pipeline.retry_foundation().await });
    Ok(Json(StartedResponse {
        submission_id: id,
        started: true,
    }))
}

/// POST /api/strategy/:submission_id/retry-calendar
pub async fn retry_calendar(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<StartedResponse>> {
    let pipeline = get_pipeline(&state, id).await?;
    info!(submission_id = %id, "Calendar retry requested");
    tokio::spawn(async move { pipeline.retry_calendar().await });
    Ok(Json(StartedResponse {
        submission_id: id,
        started: true,
    }))
}

/// POST /api/strategy/:submission_id/posts/:row_index
///
/// Starts generation of one ready-to-post text for a parsed calendar row.
/// 404 when the calendar has not produced that row.
pub async fn generate_row_post(
    State(state): State<AppState>,
    Path((id, row_index)): Path<(Uuid, usize)>,
) -> ApiResult<Json<StartedResponse>> {
    let pipeline = get_pipeline(&state, id).await?;
    let Some(row) = pipeline.calendar_row(row_index).await else {
        return Err(ApiError::NotFound(format!(
            "No calendar row at index {}",
            row_index
        )));
    };

    info!(submission_id = %id, row_index, "Post generation started");
    tokio::spawn(async move { pipeline.run_post(row_index, row).await });
    Ok(Json(StartedResponse {
        submission_id: id,
        started: true,
    }))
}

/// Build strategy routes
pub fn strategy_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/strategy/:submission_id",
            post(strategy_start).get(strategy_view),
        )
        .route(
            "/api/strategy/:submission_id/retry-foundation",
            post(retry_foundation),
        )
        .route(
            "/api/strategy/:submission_id/retry-calendar",
            post(retry_calendar),
        )
        .route(
            "/api/strategy/:submission_id/posts/:row_index",
            post(generate_row_post),
        )
}
