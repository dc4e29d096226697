//! Credential resolution for the generation service
//!
//! Two-tier priority: database settings (authoritative, configurable at
//! runtime through the settings endpoint) then environment variable. A
//! missing credential fails closed with a fixed message so callers never
//! reach the external service with a blank key.

use linkstrat_common::db::settings;
use linkstrat_common::Result;
use sqlx::SqlitePool;
use tracing::{info, warn};

/// Environment variable fallback for the Gemini API key
pub const GEMINI_API_KEY_ENV: &str = "LINKSTRAT_GEMINI_API_KEY";

/// Fixed message returned whenever the credential is absent
pub const MISSING_KEY_MESSAGE: &str =
    "Gemini API key is not configured. Set it via POST /api/settings/gemini_api_key \
     or the LINKSTRAT_GEMINI_API_KEY environment variable.";

/// Non-empty, non-whitespace key check
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// Resolve the Gemini API key: database first, then environment
///
/// Returns None when neither tier yields a valid key.
pub async fn resolve_gemini_api_key(db: &SqlitePool) -> Result<Option<String>> {
    let db_key = settings::get_gemini_api_key(db).await?;
    let env_key = std::env::var(GEMINI_API_KEY_ENV).ok();

    let db_valid = db_key.as_deref().is_some_and(is_valid_key);
    let env_valid = env_key.as_deref().is_some_and(is_valid_key);

    if db_valid && env_valid {
        warn!("Gemini API key found in both database and environment. Using database.");
    }

    if db_valid {
        info!("Gemini API key loaded from database");
        return Ok(db_key);
    }
    if env_valid {
        info!("Gemini API key loaded from environment");
        return Ok(env_key);
    }
    Ok(None)
}
