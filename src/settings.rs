//! The announcement settings store.
//!
//! Settings live in the key-value `settings` table so an admin can change
//! them without restarting the service; the publisher reloads them on every
//! publish event.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::constants::DEFAULT_MESSAGE_TEMPLATE;
use crate::db;

/// Setting keys.
pub mod keys {
    pub const BOT_USERNAME: &str = "bot_username";
    pub const BOT_AVATAR_URL: &str = "bot_avatar_url";
    pub const WEBHOOK_URL: &str = "webhook_url";
    pub const MENTION_EVERYONE: &str = "mention_everyone";
    pub const MESSAGE_TEMPLATE: &str = "message_template";
    pub const SUPPORTED_POST_TYPES: &str = "supported_post_types";
    pub const SITE_NAME: &str = "site_name";
    pub const SITE_ICON_URL: &str = "site_icon_url";
    pub const SITE_URL: &str = "site_url";
    pub const VERSION: &str = "version";
}

/// Announcement settings, loaded per publish event.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublishSettings {
    /// Display name the webhook posts under.
    pub bot_username: String,
    /// Avatar URL the webhook posts under.
    pub bot_avatar_url: String,
    /// Discord incoming webhook URL. Blank disables delivery.
    pub webhook_url: String,
    /// Prepend `@everyone` to the rendered message.
    pub mention_everyone: bool,
    /// Message template with `%post_type%`, `%title%`, `%author%` and
    /// `%url%` placeholders.
    pub message_template: String,
    /// Post types eligible for announcement.
    pub supported_post_types: Vec<String>,
    /// Site identity used for embed footers and fallbacks.
    pub site_name: String,
    pub site_icon_url: String,
    pub site_url: String,
}

impl PublishSettings {
    /// Load the current settings from the store. Missing keys fall back to
    /// blank values (an empty supported-type list announces nothing).
    pub async fn load(pool: &SqlitePool) -> Result<Self> {
        let supported_post_types = match db::get_setting(pool, keys::SUPPORTED_POST_TYPES).await? {
            Some(raw) => serde_json::from_str(&raw)
                .context("Invalid supported_post_types setting")?,
            None => Vec::new(),
        };

        Ok(Self {
            bot_username: load_string(pool, keys::BOT_USERNAME).await?,
            bot_avatar_url: load_string(pool, keys::BOT_AVATAR_URL).await?,
            webhook_url: load_string(pool, keys::WEBHOOK_URL).await?,
            mention_everyone: parse_flag(&load_string(pool, keys::MENTION_EVERYONE).await?),
            message_template: load_string(pool, keys::MESSAGE_TEMPLATE).await?,
            supported_post_types,
            site_name: load_string(pool, keys::SITE_NAME).await?,
            site_icon_url: load_string(pool, keys::SITE_ICON_URL).await?,
            site_url: load_string(pool, keys::SITE_URL).await?,
        })
    }

    /// The message template, falling back to the default when blank.
    #[must_use]
    pub fn template(&self) -> &str {
        if self.message_template.trim().is_empty() {
            DEFAULT_MESSAGE_TEMPLATE
        } else {
            &self.message_template
        }
    }

    /// Whether posts of this type are announced at all.
    #[must_use]
    pub fn supports_post_type(&self, post_type: &str) -> bool {
        self.supported_post_types.iter().any(|t| t == post_type)
    }
}

async fn load_string(pool: &SqlitePool, key: &str) -> Result<String> {
    Ok(db::get_setting(pool, key).await?.unwrap_or_default())
}

/// Parse a stored on/off flag. Stored canonically as "yes"/"no" but older
/// stores may carry other truthy spellings.
#[must_use]
pub fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "yes" | "true" | "1" | "on")
}

/// Canonical stored form of an on/off flag.
#[must_use]
pub fn flag_value(enabled: bool) -> &'static str {
    if enabled {
        "yes"
    } else {
        "no"
    }
}
