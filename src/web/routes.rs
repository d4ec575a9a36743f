use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::{debug, error};

use crate::db;
use crate::post::Post;
use crate::settings::{self, keys, PublishSettings};
use crate::web::AppState;

/// The "post published" trigger payload from the host CMS.
#[derive(Debug, Clone, Deserialize)]
pub struct PublishEvent {
    pub post_id: i64,
    pub post: Post,
}

/// Partial settings update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsUpdate {
    #[serde(default)]
    pub bot_username: Option<String>,
    #[serde(default)]
    pub bot_avatar_url: Option<String>,
    #[serde(default)]
    pub webhook_url: Option<String>,
    #[serde(default)]
    pub mention_everyone: Option<bool>,
    #[serde(default)]
    pub message_template: Option<String>,
    #[serde(default)]
    pub supported_post_types: Option<Vec<String>>,
    #[serde(default)]
    pub site_name: Option<String>,
    #[serde(default)]
    pub site_icon_url: Option<String>,
    #[serde(default)]
    pub site_url: Option<String>,
}

pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Handler for the publish trigger (POST /events/post-published).
///
/// Runs the pipeline synchronously within this request. Delivery failures
/// are not surfaced to the host; only a storage error is.
pub async fn publish_event(
    State(state): State<AppState>,
    Json(event): Json<PublishEvent>,
) -> Response {
    match state.publisher.publish(&event.post).await {
        Ok(outcome) => {
            debug!(post_id = event.post_id, ?outcome, "Publish pipeline finished");
            StatusCode::ACCEPTED.into_response()
        }
        Err(e) => {
            error!(post_id = event.post_id, "Publish pipeline error: {e:#}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Storage error").into_response()
        }
    }
}

/// Handler for reading the settings (GET /settings).
pub async fn get_settings(State(state): State<AppState>) -> Response {
    match PublishSettings::load(state.db.pool()).await {
        Ok(settings) => axum::Json(settings).into_response(),
        Err(e) => {
            error!("Failed to load settings: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
        }
    }
}

/// Handler for updating the settings (PUT /settings).
pub async fn update_settings(
    State(state): State<AppState>,
    Json(update): Json<SettingsUpdate>,
) -> Response {
    for (name, value) in [
        ("webhook_url", update.webhook_url.as_deref()),
        ("bot_avatar_url", update.bot_avatar_url.as_deref()),
        ("site_icon_url", update.site_icon_url.as_deref()),
        ("site_url", update.site_url.as_deref()),
    ] {
        if let Some(value) = value {
            if !value.trim().is_empty() && url::Url::parse(value).is_err() {
                return (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    format!("{name} is not a valid URL"),
                )
                    .into_response();
            }
        }
    }

    if let Err(e) = apply_update(&state, &update).await {
        error!("Failed to update settings: {e}");
        return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
    }

    get_settings(State(state)).await
}

async fn apply_update(state: &AppState, update: &SettingsUpdate) -> anyhow::Result<()> {
    let pool = state.db.pool();

    if let Some(value) = &update.bot_username {
        db::set_setting(pool, keys::BOT_USERNAME, value).await?;
    }
    if let Some(value) = &update.bot_avatar_url {
        db::set_setting(pool, keys::BOT_AVATAR_URL, value).await?;
    }
    if let Some(value) = &update.webhook_url {
        db::set_setting(pool, keys::WEBHOOK_URL, value).await?;
    }
    if let Some(value) = update.mention_everyone {
        db::set_setting(pool, keys::MENTION_EVERYONE, settings::flag_value(value)).await?;
    }
    if let Some(value) = &update.message_template {
        db::set_setting(pool, keys::MESSAGE_TEMPLATE, value).await?;
    }
    if let Some(value) = &update.supported_post_types {
        db::set_setting(
            pool,
            keys::SUPPORTED_POST_TYPES,
            &serde_json::to_string(value)?,
        )
        .await?;
    }
    if let Some(value) = &update.site_name {
        db::set_setting(pool, keys::SITE_NAME, value).await?;
    }
    if let Some(value) = &update.site_icon_url {
        db::set_setting(pool, keys::SITE_ICON_URL, value).await?;
    }
    if let Some(value) = &update.site_url {
        db::set_setting(pool, keys::SITE_URL, value).await?;
    }

    Ok(())
}
