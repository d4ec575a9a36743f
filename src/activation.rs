//! Install and version-upgrade bookkeeping.
//!
//! `check_and_update` runs at startup: when the stored version is missing or
//! older than the running crate version, the install routine writes default
//! settings (never overwriting existing values) and records the new version.
//! Installs are guarded by a time-boxed lock so two instances starting at
//! once cannot double-initialize.

use anyhow::Result;
use tracing::{debug, info};

use crate::config::Config;
use crate::constants::{DEFAULT_MESSAGE_TEMPLATE, DEFAULT_POST_TYPES, INSTALL_LOCK_TTL};
use crate::db::{self, Database};
use crate::settings::keys;

/// The version written by the install routine.
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the install routine if the stored version is behind the running one.
///
/// # Errors
///
/// Returns an error if the settings store cannot be read or written.
pub async fn check_and_update(db: &Database, config: &Config) -> Result<()> {
    let stored = db::get_setting(db.pool(), keys::VERSION).await?;

    let needs_install = match stored.as_deref() {
        None => true,
        Some(version) => version_lt(version, CURRENT_VERSION),
    };

    if needs_install {
        if install(db, config).await? {
            info!(version = CURRENT_VERSION, "Installation complete");
        }
    } else {
        debug!(version = ?stored, "Installation up to date");
    }

    Ok(())
}

/// Run the install routine under the installation lock. Returns whether the
/// install ran; a concurrently held lock makes this a no-op.
///
/// # Errors
///
/// Returns an error if the settings store cannot be read or written.
pub async fn install(db: &Database, config: &Config) -> Result<bool> {
    if !db::try_acquire_install_lock(db.pool(), INSTALL_LOCK_TTL).await? {
        debug!("Install already running, skipping");
        return Ok(false);
    }

    set_default_settings(db, config).await?;
    db::set_setting(db.pool(), keys::VERSION, CURRENT_VERSION).await?;

    db::release_install_lock(db.pool()).await?;

    Ok(true)
}

/// Write default settings, leaving any existing values untouched.
async fn set_default_settings(db: &Database, config: &Config) -> Result<()> {
    let pool = db.pool();

    db::add_setting_if_unset(pool, keys::BOT_USERNAME, "").await?;
    db::add_setting_if_unset(pool, keys::BOT_AVATAR_URL, "").await?;
    db::add_setting_if_unset(pool, keys::WEBHOOK_URL, "").await?;
    db::add_setting_if_unset(pool, keys::MENTION_EVERYONE, "no").await?;
    db::add_setting_if_unset(pool, keys::MESSAGE_TEMPLATE, DEFAULT_MESSAGE_TEMPLATE).await?;
    db::add_setting_if_unset(pool, keys::SITE_NAME, "").await?;
    db::add_setting_if_unset(pool, keys::SITE_ICON_URL, "").await?;
    db::add_setting_if_unset(pool, keys::SITE_URL, "").await?;

    // Default announceable types, restricted to those the host has.
    let post_types: Vec<&str> = DEFAULT_POST_TYPES
        .iter()
        .copied()
        .filter(|t| config.host_post_types.iter().any(|h| h == t))
        .collect();
    db::add_setting_if_unset(
        pool,
        keys::SUPPORTED_POST_TYPES,
        &serde_json::to_string(&post_types)?,
    )
    .await?;

    Ok(())
}

/// Compare dotted numeric version strings; missing segments count as zero.
fn version_lt(a: &str, b: &str) -> bool {
    let parse = |v: &str| -> Vec<u64> {
        v.split('.')
            .map(|s| s.trim().parse().unwrap_or(0))
            .collect()
    };

    let a = parse(a);
    let b = parse(b);
    let len = a.len().max(b.len());

    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        if x != y {
            return x < y;
        }
    }

    false
}
