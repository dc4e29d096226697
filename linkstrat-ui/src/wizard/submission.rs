//! Finalized answer submissions
//!
//! A submission is an immutable, uniquely identified snapshot of the answer
//! store, persisted independently of in-progress state and read back as the
//! sole input to the generation pipeline.

use crate::wizard::answers::AnswerStore;
use chrono::{DateTime, Utc};
use linkstrat_common::{Error, Result};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Immutable snapshot of final answers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub answers: AnswerStore,
    pub created_at: DateTime<Utc>,
}

impl Submission {
    /// Snapshot the given answers under a fresh unique id
    pub fn new(answers: AnswerStore) -> Self {
        Self {
            id: Uuid::new_v4(),
            answers,
            created_at: Utc::now(),
        }
    }
}

/// Persist a submission under its own key
pub async fn insert_submission(db: &SqlitePool, submission: &Submission) -> Result<()> {
    let answers_json = serde_json::to_string(&submission.answers)
        .map_err(|e| Error::Internal(format!("Serialize submission failed: {}", e)))?;

    sqlx::query("INSERT INTO submissions (submission_id, answers, created_at) VALUES (?, ?, ?)")
        .bind(submission.id.to_string())
        .bind(answers_json)
        .bind(submission.created_at.to_rfc3339())
        .execute(db)
        .await
        .map_err(Error::Database)?;

    Ok(())
}

/// Load a submission by id
pub async fn get_submission(db: &SqlitePool, id: Uuid) -> Result<Submission> {
    let row: Option<(String, String)> =
        sqlx::query_as("SELECT answers, created_at FROM submissions WHERE submission_id = ?")
            .bind(id.to_string())
            .fetch_optional(db)
            .await
            .map_err(Error::Database)?;

    let (answers_json, created_at) =
        row.ok_or_else(|| Error::NotFound(format!("Submission not found: {}", id)))?;

    let answers = serde_json::from_str(&answers_json)
        .map_err(|e| Error::Internal(format!("Stored submission is malformed: {}", e)))?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| Error::Internal(format!("Stored timestamp is malformed: {}", e)))?
        .with_timezone(&Utc);

    Ok(Submission {
        id,
        answers,
        created_at,
    })
}
