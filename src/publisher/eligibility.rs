//! The gate deciding whether a post triggers an announcement.

use chrono::{DateTime, Utc};

use crate::post::Post;

/// Decide whether a post should be announced, checked in order:
///
/// 1. Never announce a post twice.
/// 2. Never announce revisions.
/// 3. Never announce before the post's publish time (scheduled posts fire
///    again when due). A post with no date is announceable.
#[must_use]
pub fn is_publishable(post: &Post, already_announced: bool, now: DateTime<Utc>) -> bool {
    if already_announced {
        return false;
    }

    if post.is_revision {
        return false;
    }

    match post.published_at {
        // Fail open when the host could not date the post.
        None => true,
        Some(published_at) => published_at.with_timezone(&Utc) <= now,
    }
}
