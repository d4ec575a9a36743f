//! The publish pipeline: eligibility, payload construction, delivery, and
//! outcome recording.

pub mod eligibility;
pub mod embed;
pub mod message;

use anyhow::Result;
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::constants::DEFAULT_THUMBNAIL_SIZE;
use crate::db::{self, Database};
use crate::discord::{WebhookClient, WebhookPayload, WebhookRequest};
use crate::hooks::Hooks;
use crate::post::Post;
use crate::settings::PublishSettings;

/// How a publish run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Message delivered and the post marked announced.
    Delivered,
    /// Nothing sent: ineligible post, unsupported type, or blank webhook URL.
    Skipped,
    /// Delivery attempted and failed; the post stays unannounced.
    Failed,
}

/// The publishing service. Constructed once at startup with its storage,
/// HTTP client, and hook registry injected.
pub struct Publisher {
    db: Database,
    client: WebhookClient,
    hooks: Hooks,
}

impl Publisher {
    #[must_use]
    pub fn new(db: Database, client: WebhookClient, hooks: Hooks) -> Self {
        Self { db, client, hooks }
    }

    /// Run the publish pipeline for a post.
    ///
    /// Delivery failures are absorbed (logged, post left unannounced for a
    /// later resend); only storage errors propagate.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings store or announcement flags cannot
    /// be read or written.
    pub async fn publish(&self, post: &Post) -> Result<PublishOutcome> {
        let settings = PublishSettings::load(self.db.pool()).await?;

        if !settings.supports_post_type(&post.post_type) {
            debug!(post_id = post.id, post_type = %post.post_type, "Post type not announced");
            return Ok(PublishOutcome::Skipped);
        }

        let already_announced = db::is_announced(self.db.pool(), post.id).await?;
        let eligible = eligibility::is_publishable(post, already_announced, Utc::now());
        let eligible = self.hooks.apply_eligibility(eligible, post);

        if !eligible {
            debug!(post_id = post.id, already_announced, "Post not eligible for announcement");
            return Ok(PublishOutcome::Skipped);
        }

        let message = message::render(&settings, post);
        let message = self.hooks.apply_message(message, post);

        let thumbnail_size = self
            .hooks
            .apply_thumbnail_size(DEFAULT_THUMBNAIL_SIZE.to_string(), post);
        let description = self.hooks.apply_description(embed::description(post), post);
        let embeds = vec![embed::build(post, &settings, &thumbnail_size, description)];
        let embeds = self.hooks.apply_embeds(embeds, post);

        let username = self.hooks.apply_username(settings.bot_username.clone(), post);
        let avatar_url = self.hooks.apply_avatar(settings.bot_avatar_url.clone(), post);
        let webhook_url = self.hooks.apply_webhook_url(settings.webhook_url.clone(), post);

        // A webhook URL was never configured or was filtered out, bail out.
        if webhook_url.trim().is_empty() {
            debug!(post_id = post.id, "No webhook URL configured, skipping announcement");
            return Ok(PublishOutcome::Skipped);
        }

        let payload = WebhookPayload {
            content: message,
            username,
            avatar_url,
            embeds,
        };
        let payload = self.hooks.apply_payload(payload, post);

        let request = WebhookRequest::json(&payload)?;
        let request = self.hooks.apply_request(request, post);

        match self.client.send(&webhook_url, &request).await {
            Ok(status) if status.is_success() => {
                db::mark_announced(self.db.pool(), post.id).await?;
                info!(post_id = post.id, %status, "Post announced to Discord");
                Ok(PublishOutcome::Delivered)
            }
            Ok(status) => {
                // Best-effort notification: no retry, the post stays
                // eligible for a manual resend.
                warn!(post_id = post.id, %status, "Webhook delivery rejected");
                Ok(PublishOutcome::Failed)
            }
            Err(e) => {
                warn!(post_id = post.id, "Webhook delivery failed: {e:#}");
                Ok(PublishOutcome::Failed)
            }
        }
    }
}
