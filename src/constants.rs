//! Shared constants.

use std::time::Duration;

/// User agent sent with outbound webhook requests.
pub const USER_AGENT: &str = concat!("discord-post-announcer/", env!("CARGO_PKG_VERSION"));

/// Message template used when the configured template is blank.
pub const DEFAULT_MESSAGE_TEMPLATE: &str = r#"New %post_type% "%title%" by "%author%" (%url%)"#;

/// Token that pings the whole channel.
pub const MENTION_EVERYONE: &str = "@everyone";

/// Featured-image rendition used for the embed image unless overridden.
pub const DEFAULT_THUMBNAIL_SIZE: &str = "full";

/// Post types announced out of the box, restricted at install time to the
/// types the host actually has.
pub const DEFAULT_POST_TYPES: &[&str] = &["post", "page"];

/// How long the installation lock is held before it is considered stale.
pub const INSTALL_LOCK_TTL: Duration = Duration::from_secs(600);

/// Word limit for embed descriptions derived from the post body.
pub const EXCERPT_WORD_LIMIT: usize = 55;

/// Suffix appended to truncated embed descriptions.
pub const EXCERPT_MORE: &str = " ...";
