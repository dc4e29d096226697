//! Staged strategy generation pipeline
//!
//! Two dependent stages (foundation, then calendar) plus unbounded per-row
//! post generation. Each stage is a small state machine:
//!
//! ```text
//! idle -> loading -> succeeded
//!                 -> failed
//! ```
//!
//! Retry re-enters loading from failed or succeeded. Every invocation is
//! tagged with a monotone sequence number; a completion whose number no
//! longer matches the stage's current one was superseded by a retry and is
//! dropped instead of clobbering the newer run.

use crate::calendar::{self, CalendarDocument, CalendarRow};
use crate::catalog::Catalog;
use crate::prompts::{self, PostRequest};
use crate::services::TextGenerator;
use crate::wizard::answers::AnswerValue;
use crate::wizard::submission::Submission;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Stage lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// One stage's observable state
#[derive(Debug, Clone, Serialize)]
pub struct StageState {
    pub status: StageStatus,
    pub result: Option<String>,
    pub error: Option<String>,
    #[serde(skip)]
    seq: u64,
}

impl Default for StageState {
    fn default() -> Self {
        Self {
            status: StageStatus::Idle,
            result: None,
            error: None,
            seq: 0,
        }
    }
}

impl StageState {
    /// Enter loading under a fresh sequence number
    fn begin(&mut self, seq: u64) {
        self.status = StageStatus::Loading;
        self.error = None;
        self.seq = seq;
    }

    /// Record success; ignored when superseded by a newer invocation
    fn complete_ok(&mut self, seq: u64, text: String) -> bool {
        if seq != self.seq {
            tracing::debug!(stale = seq, current = self.seq, "Discarding stale stage result");
            return false;
        }
        self.status = StageStatus::Succeeded;
        self.result = Some(text);
        self.error = None;
        true
    }

    /// Record failure; ignored when superseded by a newer invocation
    fn complete_err(&mut self, seq: u64, message: String) -> bool {
        if seq != self.seq {
            tracing::debug!(stale = seq, current = self.seq, "Discarding stale stage error");
            return false;
        }
        self.status = StageStatus::Failed;
        self.error = Some(message);
        true
    }
}

#[derive(Debug, Default)]
struct PipelineState {
    foundation: StageState,
    calendar: StageState,
    /// Parsed form of the calendar result, recomputed only when the stage
    /// result changes
    calendar_doc: Option<CalendarDocument>,
    posts: HashMap<usize, StageState>,
}

/// Read-only snapshot for the API layer
#[derive(Debug, Clone, Serialize)]
pub struct PipelineView {
    pub foundation: StageState,
    pub calendar: StageState,
    pub calendar_doc: Option<CalendarDocument>,
    pub posts: HashMap<usize, StageState>,
}

/// The generation pipeline for one submission
pub struct GenerationPipeline {
    submission: Submission,
    catalog: Arc<Catalog>,
    generator: Arc<dyn TextGenerator>,
    state: Mutex<PipelineState>,
    next_seq: AtomicU64,
}

impl GenerationPipeline {
    pub fn new(
        submission: Submission,
        catalog: Arc<Catalog>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            submission,
            catalog,
            generator,
            state: Mutex::new(PipelineState::default()),
            next_seq: AtomicU64::new(1),
        }
    }

    pub fn submission(&self) -> &Submission {
        &self.submission
    }

    fn fresh_seq(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::Relaxed)
    }

    /// Snapshot all stage states
    pub async fn view(&self) -> PipelineView {
        let state = self.state.lock().await;
        PipelineView {
            foundation: state.foundation.clone(),
            calendar: state.calendar.clone(),
            calendar_doc: state.calendar_doc.clone(),
            posts: state.posts.clone(),
        }
    }

    /// Run the foundation stage, chaining into the calendar stage on success
    ///
    /// No-op while either stage has a call outstanding, so the two stages'
    /// external calls are never concurrent. A foundation failure leaves the
    /// calendar stage untouched.
    pub async fn run_foundation(&self) {
        let seq = {
            let mut state = self.state.lock().await;
            if state.foundation.status == StageStatus::Loading
                || state.calendar.status == StageStatus::Loading
            {
                return;
            }
            let seq = self.fresh_seq();
            state.foundation.begin(seq);
            seq
        };

        tracing::info!(submission_id = %self.submission.id, "Foundation generation started");
        let prompt = prompts::foundation_prompt(&self.submission.answers, &self.catalog);
        let outcome = self.generator.generate(&prompt).await;

        let chain_calendar = {
            let mut state = self.state.lock().await;
            match outcome {
                Ok(text) => state.foundation.complete_ok(seq, text),
                Err(e) => {
                    tracing::warn!(submission_id = %self.submission.id, error = %e,
                        "Foundation generation failed");
                    state.foundation.complete_err(seq, e.to_string());
                    false
                }
            }
        };

        if chain_calendar {
            tracing::info!(submission_id = %self.submission.id, "Foundation generation succeeded");
            self.run_calendar().await;
        }
    }

    /// Run the calendar stage; valid only once foundation has succeeded
    pub async fn run_calendar(&self) {
        let (seq, foundation_text) = {
            let mut state = self.state.lock().await;
            if state.calendar.status == StageStatus::Loading {
                return;
            }
            let Some(foundation_text) = (state.foundation.status == StageStatus::Succeeded)
                .then(|| state.foundation.result.clone())
                .flatten()
            else {
                tracing::warn!(submission_id = %self.submission.id,
                    "Calendar generation requested before foundation succeeded");
                return;
            };
            let seq = self.fresh_seq();
            state.calendar.begin(seq);
            (seq, foundation_text)
        };

        tracing::info!(submission_id = %self.submission.id, "Calendar generation started");
        let prompt =
            prompts::calendar_prompt(&self.submission.answers, &self.catalog, &foundation_text);
        let outcome = self.generator.generate(&prompt).await;

        let mut state = self.state.lock().await;
        match outcome {
            Ok(text) => {
                if state.calendar.complete_ok(seq, text.clone()) {
                    state.calendar_doc = Some(calendar::extract(&text));
                    tracing::info!(submission_id = %self.submission.id,
                        rows = state.calendar_doc.as_ref().map(|d| d.rows.len()).unwrap_or(0),
                        "Calendar generation succeeded");
                }
            }
            Err(e) => {
                tracing::warn!(submission_id = %self.submission.id, error = %e,
                    "Calendar generation failed");
                state.calendar.complete_err(seq, e.to_string());
            }
        }
    }

    /// Re-run the foundation stage (and the cascade) after failure or success
    pub async fn retry_foundation(&self) {
        self.run_foundation().await;
    }

    /// Re-run only the calendar stage
    pub async fn retry_calendar(&self) {
        self.run_calendar().await;
    }

    /// Row from the parsed calendar, if that stage has produced one
    pub async fn calendar_row(&self, row_index: usize) -> Option<CalendarRow> {
        let state = self.state.lock().await;
        state
            .calendar_doc
            .as_ref()
            .and_then(|doc| doc.rows.get(row_index))
            .cloned()
    }

    /// Generate one ready-to-post text for a calendar row
    ///
    /// Rows are keyed independently so concurrent generations never clobber
    /// one another. No-op while that row is already loading.
    pub async fn run_post(&self, row_index: usize, row: CalendarRow) {
        let seq = {
            let mut state = self.state.lock().await;
            let post = state.posts.entry(row_index).or_default();
            if post.status == StageStatus::Loading {
                return;
            }
            let seq = self.fresh_seq();
            post.begin(seq);
            seq
        };

        let request = PostRequest {
            pillar: row.pillar,
            topic: row.topic,
            approach: row.approach,
            content_type: row.content_type,
            user_voice: self.text_answer("userVoice"),
            unique_perspective: self.text_answer("uniquePerspective"),
        };
        let prompt = prompts::post_prompt(&request, &self.catalog);
        let outcome = self.generator.generate(&prompt).await;

        let mut state = self.state.lock().await;
        let post = state.posts.entry(row_index).or_default();
        match outcome {
            Ok(text) => {
                post.complete_ok(seq, text);
            }
            Err(e) => {
                tracing::warn!(submission_id = %self.submission.id, row_index, error = %e,
                    "Post generation failed");
                post.complete_err(seq, e.to_string());
            }
        }
    }

    fn text_answer(&self, question_id: &str) -> String {
        match self.submission.answers.get(question_id) {
            Some(AnswerValue::Text(value)) => value.clone(),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::GenerateError;
    use crate::wizard::answers::AnswerStore;
    use async_trait::async_trait;
    use std::collections::VecDeque;

    /// Generator that replays a fixed script of outcomes
    struct ScriptedGenerator {
        script: Mutex<VecDeque<Result<String, String>>>,
    }

    impl ScriptedGenerator {
        fn new(script: Vec<Result<&str, &str>>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(
                    script
                        .into_iter()
                        .map(|r| r.map(str::to_string).map_err(str::to_string))
                        .collect(),
                ),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
            let next = self.script.lock().await.pop_front().expect("script exhausted");
            next.map_err(GenerateError::Network)
        }
    }

    const CALENDAR_TEXT: &str = "intro\n\
        ## FOUR-WEEK CONTENT CALENDAR\n\
        | Week - Day | Pillar | Topic | Approach | Content Type |\n\
        | --- | --- | --- | --- | --- |\n\
        | Week 1 - Monday | Growth | Scaling | Educational | Carousel |\n";

    fn pipeline(script: Vec<Result<&str, &str>>) -> GenerationPipeline {
        let mut answers = AnswerStore::new();
        answers.set_text("userVoice", "authoritative".to_string());
        answers.set_text("uniquePerspective", "analytical".to_string());
        GenerationPipeline::new(
            Submission::new(answers),
            Arc::new(Catalog::standard()),
            ScriptedGenerator::new(script),
        )
    }

    #[tokio::test]
    async fn test_foundation_success_chains_calendar() {
        let p = pipeline(vec![Ok("F"), Ok(CALENDAR_TEXT)]);
        p.run_foundation().await;

        let view = p.view().await;
        assert_eq!(view.foundation.status, StageStatus::Succeeded);
        assert_eq!(view.foundation.result.as_deref(), Some("F"));
        assert_eq!(view.calendar.status, StageStatus::Succeeded);
        let doc = view.calendar_doc.unwrap();
        assert_eq!(doc.rows.len(), 1);
        assert_eq!(doc.rows[0].pillar, "Growth");
    }

    #[tokio::test]
    async fn test_foundation_failure_leaves_calendar_idle() {
        let p = pipeline(vec![Err("connection refused")]);
        p.run_foundation().await;

        let view = p.view().await;
        assert_eq!(view.foundation.status, StageStatus::Failed);
        assert!(view.foundation.error.as_deref().unwrap().contains("connection refused"));
        assert_eq!(view.calendar.status, StageStatus::Idle);
        assert!(view.calendar_doc.is_none());
    }

    #[tokio::test]
    async fn test_calendar_failure_preserves_foundation_result() {
        let p = pipeline(vec![Ok("F"), Err("timeout")]);
        p.run_foundation().await;

        let view = p.view().await;
        assert_eq!(view.foundation.status, StageStatus::Succeeded);
        assert_eq!(view.calendar.status, StageStatus::Failed);
        assert!(view.calendar_doc.is_none());
    }

    #[tokio::test]
    async fn test_retry_calendar_after_failure_reuses_foundation() {
        let p = pipeline(vec![Ok("F"), Err("timeout"), Ok(CALENDAR_TEXT)]);
        p.run_foundation().await;
        p.retry_calendar().await;

        let view = p.view().await;
        assert_eq!(view.calendar.status, StageStatus::Succeeded);
        assert_eq!(view.calendar_doc.unwrap().rows.len(), 1);
    }

    #[tokio::test]
    async fn test_retry_foundation_restarts_cascade() {
        let p = pipeline(vec![Err("boom"), Ok("F2"), Ok(CALENDAR_TEXT)]);
        p.run_foundation().await;
        p.retry_foundation().await;

        let view = p.view().await;
        assert_eq!(view.foundation.result.as_deref(), Some("F2"));
        assert_eq!(view.calendar.status, StageStatus::Succeeded);
    }

    #[tokio::test]
    async fn test_calendar_before_foundation_is_noop() {
        let p = pipeline(vec![]);
        p.run_calendar().await;
        let view = p.view().await;
        assert_eq!(view.calendar.status, StageStatus::Idle);
    }

    #[tokio::test]
    async fn test_posts_keyed_per_row() {
        let p = pipeline(vec![Ok("F"), Ok(CALENDAR_TEXT), Ok("post zero"), Err("boom")]);
        p.run_foundation().await;

        let row = p.calendar_row(0).await.unwrap();
        p.run_post(0, row.clone()).await;
        p.run_post(1, row).await;

        let view = p.view().await;
        assert_eq!(view.posts[&0].status, StageStatus::Succeeded);
        assert_eq!(view.posts[&0].result.as_deref(), Some("post zero"));
        assert_eq!(view.posts[&1].status, StageStatus::Failed);
    }

    /// Generator whose second call blocks until released
    struct GatedGenerator {
        gate: Arc<tokio::sync::Notify>,
        calls: AtomicU64,
    }

    #[async_trait]
    impl TextGenerator for GatedGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
            match self.calls.fetch_add(1, Ordering::SeqCst) {
                0 => Ok("F".to_string()),
                1 => {
                    self.gate.notified().await;
                    Ok(CALENDAR_TEXT.to_string())
                }
                _ => Ok("unexpected extra call".to_string()),
            }
        }
    }

    #[tokio::test]
    async fn test_foundation_retry_declined_while_calendar_in_flight() {
        let gate = Arc::new(tokio::sync::Notify::new());
        let generator = Arc::new(GatedGenerator {
            gate: gate.clone(),
            calls: AtomicU64::new(0),
        });
        let p = Arc::new(GenerationPipeline::new(
            Submission::new(AnswerStore::new()),
            Arc::new(Catalog::standard()),
            generator.clone(),
        ));

        let runner = tokio::spawn({
            let p = p.clone();
            async move { p.run_foundation().await }
        });

        while p.view().await.calendar.status != StageStatus::Loading {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        // Calendar call is in flight; a foundation retry must not start
        p.retry_foundation().await;
        let view = p.view().await;
        assert_eq!(view.foundation.status, StageStatus::Succeeded);
        assert_eq!(view.foundation.result.as_deref(), Some("F"));
        assert_eq!(view.calendar.status, StageStatus::Loading);

        gate.notify_one();
        runner.await.unwrap();

        let view = p.view().await;
        assert_eq!(view.calendar.status, StageStatus::Succeeded);
        // One foundation call and one calendar call, nothing concurrent
        assert_eq!(generator.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut stage = StageState::default();
        stage.begin(1);
        stage.begin(2);

        assert!(!stage.complete_ok(1, "old".to_string()));
        assert_eq!(stage.status, StageStatus::Loading);
        assert_eq!(stage.result, None);

        assert!(stage.complete_ok(2, "new".to_string()));
        assert_eq!(stage.status, StageStatus::Succeeded);
        assert_eq!(stage.result.as_deref(), Some("new"));
    }

    #[test]
    fn test_stale_error_is_discarded() {
        let mut stage = StageState::default();
        stage.begin(1);
        stage.begin(2);
        assert!(!stage.complete_err(1, "old failure".to_string()));
        assert_eq!(stage.status, StageStatus::Loading);
        assert_eq!(stage.error, None);
    }
}
