//! Wizard session endpoints
//!
//! One session per service instance. Every mutating handler saves the
//! updated state to the progress slot before responding; a save failure is
//! logged and swallowed so navigation never fails on persistence.

use crate::catalog::{Question, Section};
use crate::wizard::engine::{AnswerAction, WizardEngine, WizardProgress};
use crate::wizard::{progress, submission};
use crate::{ApiError, ApiResult, AppState};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

/// Current wizard view
#[derive(Debug, Serialize)]
pub struct WizardView {
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_saved_progress: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<SectionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answers: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<WizardProgress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_mode: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct SectionView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub section_index: usize,
    pub question_index: usize,
}

fn section_view(section: &Section, section_index: usize, question_index: usize) -> SectionView {
    SectionView {
        id: section.id.clone(),
        title: section.title.clone(),
        description: section.description.clone(),
        section_index,
        question_index,
    }
}

fn active_view(engine: &WizardEngine) -> ApiResult<WizardView> {
    let state = engine.state();
    let section = engine
        .catalog()
        .section(state.section_index)
        .ok_or_else(|| ApiError::Internal("Wizard position out of range".to_string()))?;
    let answers = serde_json::to_value(&state.answers)
        .map_err(|e| ApiError::Internal(format!("Serialize answers failed: {}", e)))?;

    Ok(WizardView {
        active: true,
        has_saved_progress: None,
        section: Some(section_view(section, state.section_index, state.question_index)),
        question: Some(engine.current_question().clone()),
        answers: Some(answers),
        progress: Some(engine.progress()),
        review_mode: Some(state.review_mode),
    })
}

/// Save the engine's state to the progress slot, swallowing failures
async fn persist(state: &AppState, engine: &WizardEngine) {
    if let Err(e) = progress::save(&state.db, engine.state()).await {
        warn!("Failed to save wizard progress: {}", e);
    }
}

/// GET /api/wizard
pub async fn wizard_view(State(state): State<AppState>) -> ApiResult<Json<WizardView>> {
    let wizard = state.wizard.read().await;
    match wizard.as_ref() {
        Some(engine) => Ok(Json(active_view(engine)?)),
        None => {
            let has_saved = progress::exists(&state.db).await?;
            Ok(Json(WizardView {
                active: false,
                has_saved_progress: Some(has_saved),
                section: None,
                question: None,
                answers: None,
                progress: None,
                review_mode: None,
            }))
        }
    }
}

/// POST /api/wizard/start
pub async fn wizard_start(State(state): State<AppState>) -> ApiResult<Json<WizardView>> {
    let mut wizard = state.wizard.write().await;
    let engine = WizardEngine::new(state.catalog.clone());
    persist(&state, &engine).await;
    info!("Wizard session started");
    let view = active_view(&engine)?;
    *wizard = Some(engine);
    Ok(Json(view))
}

/// POST /api/wizard/resume
///
/// Loads the saved slot into a fresh session. 404 when nothing is saved.
pub async fn wizard_resume(State(state): State<AppState>) -> ApiResult<Json<WizardView>> {
    let Some(saved) = progress::load(&state.db).await? else {
        return Err(ApiError::NotFound("No saved wizard progress".to_string()));
    };
    let mut wizard = state.wizard.write().await;
    let engine = WizardEngine::resume(state.catalog.clone(), saved);
    info!("Wizard session resumed from saved progress");
    let view = active_view(&engine)?;
    *wizard = Some(engine);
    Ok(Json(view))
}

/// POST /api/wizard/discard
///
/// Clears the saved slot and starts a fresh session.
pub async fn wizard_discard(State(state): State<AppState>) -> ApiResult<Json<WizardView>> {
    progress::clear(&state.db).await?;
    info!("Saved wizard progress discarded");
    wizard_start(State(state)).await
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub question_id: String,
    #[serde(flatten)]
    pub action: AnswerAction,
}

/// POST /api/wizard/answer
pub async fn wizard_answer(
    State(state): State<AppState>,
    Json(payload): Json<AnswerRequest>,
) -> ApiResult<Json<WizardView>> {
    let mut wizard = state.wizard.write().await;
    let engine = wizard
        .as_mut()
        .ok_or_else(|| ApiError::BadRequest("No active wizard session".to_string()))?;

    engine.apply(&payload.question_id, payload.action)?;
    persist(&state, engine).await;
    Ok(Json(active_view(engine)?))
}

async fn navigate(
    state: AppState,
    step: impl FnOnce(&mut WizardEngine),
) -> ApiResult<Json<WizardView>> {
    let mut wizard = state.wizard.write().await;
    let engine = wizard
        .as_mut()
        .ok_or_else(|| ApiError::BadRequest("No active wizard session".to_string()))?;

    step(engine);
    persist(&state, engine).await;
    Ok(Json(active_view(engine)?))
}

/// POST /api/wizard/next
pub async fn wizard_next(State(state): State<AppState>) -> ApiResult<Json<WizardView>> {
    navigate(state, WizardEngine::go_next).await
}

/// POST /api/wizard/previous
pub async fn wizard_previous(State(state): State<AppState>) -> ApiResult<Json<WizardView>> {
    navigate(state, WizardEngine::go_previous).await
}

/// POST /api/wizard/review
pub async fn wizard_review(State(state): State<AppState>) -> ApiResult<Json<WizardView>> {
    navigate(state, WizardEngine::enter_review).await
}

/// POST /api/wizard/edit
pub async fn wizard_edit(State(state): State<AppState>) -> ApiResult<Json<WizardView>> {
    navigate(state, WizardEngine::exit_review).await
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub submission_id: Uuid,
}

/// POST /api/wizard/submit
///
/// Valid only in review mode. Inserts the snapshot, clears the progress
/// slot, and ends the session. An insert failure is surfaced, not retried.
pub async fn wizard_submit(State(state): State<AppState>) -> ApiResult<Json<SubmitResponse>> {
    let mut wizard = state.wizard.write().await;
    let engine = wizard
        .as_mut()
        .ok_or_else(|| ApiError::BadRequest("No active wizard session".to_string()))?;

    let answers = engine.submission_answers()?;
    let snapshot = submission::Submission::new(answers);
    submission::insert_submission(&state.db, &snapshot).await?;

    if let Err(e) = progress::clear(&state.db).await {
        warn!("Failed to clear wizard progress after submit: {}", e);
    }
    info!(submission_id = %snapshot.id, "Wizard submitted");

    *wizard = None;
    Ok(Json(SubmitResponse {
        submission_id: snapshot.id,
    }))
}

/// Build wizard routes
pub fn wizard_routes() -> Router<AppState> {
    Router::new()
        .route("/api/wizard", get(wizard_view))
        .route("/api/wizard/start", post(wizard_start))
        .route("/api/wizard/resume", post(wizard_resume))
        .route("/api/wizard/discard", post(wizard_discard))
        .route("/api/wizard/answer", post(wizard_answer))
        .route("/api/wizard/next", post(wizard_next))
        .route("/api/wizard/previous", post(wizard_previous))
        .route("/api/wizard/review", post(wizard_review))
        .route("/api/wizard/edit", post(wizard_edit))
        .route("/api/wizard/submit", post(wizard_submit))
}
