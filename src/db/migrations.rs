use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::debug;

/// Run all pending migrations.
pub async fn run(pool: &SqlitePool) -> Result<()> {
    create_migration_table(pool).await?;
    let current_version = get_schema_version(pool).await?;

    if current_version < 1 {
        debug!("Running migration v1");
        run_migration_v1(pool).await?;
        set_schema_version(pool, 1).await?;
    }

    Ok(())
}

async fn create_migration_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )
        ",
    )
    .execute(pool)
    .await
    .context("Failed to create schema_migrations table")?;
    Ok(())
}

async fn get_schema_version(pool: &SqlitePool) -> Result<i64> {
    let row: (Option<i64>,) =
        sqlx::query_as("SELECT MAX(version) FROM schema_migrations")
            .fetch_one(pool)
            .await
            .context("Failed to read schema version")?;
    Ok(row.0.unwrap_or(0))
}

async fn set_schema_version(pool: &SqlitePool, version: i64) -> Result<()> {
    sqlx::query("INSERT INTO schema_migrations (version) VALUES (?)")
        .bind(version)
        .execute(pool)
        .await
        .context("Failed to record schema version")?;
    Ok(())
}

/// v1: settings store, per-post announcement flags, installation lock.
async fn run_migration_v1(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )
        ",
    )
    .execute(pool)
    .await
    .context("Failed to create settings table")?;

    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS announcements (
            post_id INTEGER PRIMARY KEY,
            announced_at TEXT NOT NULL
        )
        ",
    )
    .execute(pool)
    .await
    .context("Failed to create announcements table")?;

    // Single-row table; the row exists only while an install is running
    // (or until it expires).
    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS install_lock (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            expires_at TEXT NOT NULL
        )
        ",
    )
    .execute(pool)
    .await
    .context("Failed to create install_lock table")?;

    Ok(())
}
