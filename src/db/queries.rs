use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::SqlitePool;

// ========== Settings ==========

/// Get a setting value by key.
pub async fn get_setting(pool: &SqlitePool, key: &str) -> Result<Option<String>> {
    let row: Option<(String,)> = sqlx::query_as("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await
        .context("Failed to fetch setting")?;
    Ok(row.map(|(value,)| value))
}

/// Set a setting, overwriting any existing value.
pub async fn set_setting(pool: &SqlitePool, key: &str, value: &str) -> Result<()> {
    sqlx::query(
        r"
        INSERT INTO settings (key, value) VALUES (?, ?)
        ON CONFLICT(key) DO UPDATE SET value = excluded.value
        ",
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await
    .context("Failed to set setting")?;
    Ok(())
}

/// Write a setting only if it has never been set. Returns whether the value
/// was written. Existing values are never overwritten.
pub async fn add_setting_if_unset(pool: &SqlitePool, key: &str, value: &str) -> Result<bool> {
    let result = sqlx::query("INSERT OR IGNORE INTO settings (key, value) VALUES (?, ?)")
        .bind(key)
        .bind(value)
        .execute(pool)
        .await
        .context("Failed to add setting")?;
    Ok(result.rows_affected() > 0)
}

// ========== Announcements ==========

/// Check whether a post has already been announced.
pub async fn is_announced(pool: &SqlitePool, post_id: i64) -> Result<bool> {
    let row: Option<(i64,)> =
        sqlx::query_as("SELECT post_id FROM announcements WHERE post_id = ?")
            .bind(post_id)
            .fetch_optional(pool)
            .await
            .context("Failed to fetch announcement flag")?;
    Ok(row.is_some())
}

/// Mark a post as announced. Set exactly once; marking an already-announced
/// post is a no-op and the flag is never cleared.
pub async fn mark_announced(pool: &SqlitePool, post_id: i64) -> Result<()> {
    sqlx::query("INSERT OR IGNORE INTO announcements (post_id, announced_at) VALUES (?, ?)")
        .bind(post_id)
        .bind(Utc::now().to_rfc3339())
        .execute(pool)
        .await
        .context("Failed to mark post as announced")?;
    Ok(())
}

// ========== Installation lock ==========

/// Try to acquire the time-boxed installation lock. Returns whether the lock
/// was acquired; a held, unexpired lock means another install is running.
pub async fn try_acquire_install_lock(pool: &SqlitePool, ttl: Duration) -> Result<bool> {
    let now = Utc::now();
    let ttl = chrono::Duration::from_std(ttl).context("Install lock TTL out of range")?;
    let expires_at = now + ttl;
    // RFC 3339 timestamps in UTC compare correctly as text.
    let result = sqlx::query(
        r"
        INSERT INTO install_lock (id, expires_at) VALUES (1, ?)
        ON CONFLICT(id) DO UPDATE SET expires_at = excluded.expires_at
        WHERE install_lock.expires_at < ?
        ",
    )
    .bind(expires_at.to_rfc3339())
    .bind(now.to_rfc3339())
    .execute(pool)
    .await
    .context("Failed to acquire install lock")?;
    Ok(result.rows_affected() > 0)
}

/// Release the installation lock.
pub async fn release_install_lock(pool: &SqlitePool) -> Result<()> {
    sqlx::query("DELETE FROM install_lock WHERE id = 1")
        .execute(pool)
        .await
        .context("Failed to release install lock")?;
    Ok(())
}
