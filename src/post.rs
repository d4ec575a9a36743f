//! The post entity delivered with a publish event.
//!
//! Posts are owned by the host CMS and read-only here; the event payload
//! carries everything the pipeline needs so the service never calls back
//! into the host.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_THUMBNAIL_SIZE;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub post_type: String,
    pub title: String,
    /// Author display name.
    pub author: String,
    pub permalink: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    /// Publish time in the site timezone (RFC 3339 with offset). Absent for
    /// posts the host could not date.
    #[serde(default)]
    pub published_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub is_revision: bool,
    /// Featured image renditions keyed by size name ("full", "thumbnail", ...).
    /// Empty when the post has no featured image.
    #[serde(default)]
    pub thumbnails: HashMap<String, String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Post {
    /// The featured image URL for the requested size, falling back to the
    /// default rendition when that size is missing.
    #[must_use]
    pub fn thumbnail_url(&self, size: &str) -> Option<&str> {
        self.thumbnails
            .get(size)
            .or_else(|| self.thumbnails.get(DEFAULT_THUMBNAIL_SIZE))
            .map(String::as_str)
    }
}
