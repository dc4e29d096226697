//! Settings database operations
//!
//! Generic get/set/delete accessors for the `settings` key-value table. The
//! wizard progress slot and the Gemini API key both live here.

use crate::{Error, Result};
use sqlx::{Pool, Sqlite};

/// Get a setting value by key
///
/// Returns None when the key has never been set.
pub async fn get_setting(db: &Pool<Sqlite>, key: &str) -> Result<Option<String>> {
    let row: Option<(String,)> = sqlx::query_as("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(db)
        .await
        .map_err(Error::Database)?;

    Ok(row.map(|(value,)| value))
}

/// Set a setting value (UPSERT, overwrites the slot)
pub async fn set_setting(db: &Pool<Sqlite>, key: &str, value: &str) -> Result<()> {
    sqlx::query(
        "INSERT INTO settings (key, value) VALUES (?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
    )
    .bind(key)
    .bind(value)
    .execute(db)
    .await
    .map_err(Error::Database)?;

    Ok(())
}

/// Delete a setting (idempotent; deleting a missing key succeeds)
pub async fn delete_setting(db: &Pool<Sqlite>, key: &str) -> Result<()> {
    sqlx::query("DELETE FROM settings WHERE key = ?")
        .bind(key)
        .execute(db)
        .await
        .map_err(Error::Database)?;

    Ok(())
}

/// Get Gemini API key from database
pub async fn get_gemini_api_key(db: &Pool<Sqlite>) -> Result<Option<String>> {
    get_setting(db, "gemini_api_key").await
}

/// Set Gemini API key in database
pub async fn set_gemini_api_key(db: &Pool<Sqlite>, key: &str) -> Result<()> {
    set_setting(db, "gemini_api_key", key).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory_pool;

    #[tokio::test]
    async fn test_get_setting_not_exists() {
        let pool = init_memory_pool().await.unwrap();

        let result = get_setting(&pool, "missing").await.unwrap();

        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_set_setting_roundtrip() {
        let pool = init_memory_pool().await.unwrap();

        set_setting(&pool, "gemini_api_key", "test_key_123").await.unwrap();

        let result = get_gemini_api_key(&pool).await.unwrap();
        assert_eq!(result, Some("test_key_123".to_string()));
    }

    #[tokio::test]
    async fn test_set_setting_overwrites_single_row() {
        let pool = init_memory_pool().await.unwrap();

        set_setting(&pool, "slot", "old").await.unwrap();
        set_setting(&pool, "slot", "new").await.unwrap();

        let result = get_setting(&pool, "slot").await.unwrap();
        assert_eq!(result, Some("new".to_string()));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM settings WHERE key = 'slot'")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1, "Should have exactly one entry after overwrite");
    }

    #[tokio::test]
    async fn test_delete_setting_idempotent() {
        let pool = init_memory_pool().await.unwrap();

        set_setting(&pool, "slot", "value").await.unwrap();
        delete_setting(&pool, "slot").await.unwrap();
        // Second delete on an empty slot must also succeed
        delete_setting(&pool, "slot").await.unwrap();

        let result = get_setting(&pool, "slot").await.unwrap();
        assert_eq!(result, None);
    }
}
