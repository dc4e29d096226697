//! In-progress wizard state persistence
//!
//! One settings slot (`wizard_progress`) holds the JSON-serialized
//! WizardState. Saves overwrite the slot; loads fail open on malformed data;
//! clear happens exactly once, at successful submission.

use crate::wizard::engine::WizardState;
use linkstrat_common::db::settings;
use linkstrat_common::Result;
use sqlx::SqlitePool;

const PROGRESS_KEY: &str = "wizard_progress";

/// Overwrite the single progress slot
pub async fn save(db: &SqlitePool, state: &WizardState) -> Result<()> {
    let json = serde_json::to_string(state)
        .map_err(|e| linkstrat_common::Error::Internal(format!("Serialize progress failed: {}", e)))?;
    settings::set_setting(db, PROGRESS_KEY, &json).await
}

/// Load previously saved state
///
/// Returns None when nothing is stored. Malformed stored data is logged and
/// treated as "none found" rather than surfaced to the caller.
pub async fn load(db: &SqlitePool) -> Result<Option<WizardState>> {
    let Some(json) = settings::get_setting(db, PROGRESS_KEY).await? else {
        return Ok(None);
    };
    match serde_json::from_str(&json) {
        Ok(state) => Ok(Some(state)),
        Err(e) => {
            tracing::warn!("Stored wizard progress is malformed, discarding: {}", e);
            Ok(None)
        }
    }
}

/// Check whether a saved slot exists without deserializing it
pub async fn exists(db: &SqlitePool) -> Result<bool> {
    Ok(settings::get_setting(db, PROGRESS_KEY).await?.is_some())
}

/// Remove the progress slot; idempotent when nothing is stored
pub async fn clear(db: &SqlitePool) -> Result<()> {
    settings::delete_setting(db, PROGRESS_KEY).await
}
