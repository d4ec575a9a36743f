//! Embed construction for a post.

use chrono::Utc;

use crate::constants::{EXCERPT_MORE, EXCERPT_WORD_LIMIT};
use crate::discord::{Embed, EmbedAuthor, EmbedField, EmbedFooter, EmbedImage};
use crate::post::Post;
use crate::settings::PublishSettings;
use crate::text;

/// Build the embed for a post.
///
/// The title is entity-decoded, the description is the trimmed excerpt, and
/// category/tag fields appear only when the post has categories/tags. The
/// embed URL and author fall back to the configured site identity.
#[must_use]
pub fn build(
    post: &Post,
    settings: &PublishSettings,
    thumbnail_size: &str,
    description: String,
) -> Embed {
    let mut fields = Vec::new();

    if !post.categories.is_empty() {
        fields.push(EmbedField {
            name: "Categories".to_string(),
            value: join_terms(&post.categories),
        });
    }

    if !post.tags.is_empty() {
        fields.push(EmbedField {
            name: "Tags".to_string(),
            value: join_terms(&post.tags),
        });
    }

    Embed {
        title: text::strip_markup(&post.title),
        kind: "rich".to_string(),
        description,
        url: if post.permalink.is_empty() {
            settings.site_url.clone()
        } else {
            post.permalink.clone()
        },
        timestamp: post
            .published_at
            .map_or_else(|| Utc::now().to_rfc3339(), |d| d.to_rfc3339()),
        footer: EmbedFooter {
            text: settings.site_name.clone(),
            icon_url: settings.site_icon_url.clone(),
        },
        author: EmbedAuthor {
            name: if post.author.is_empty() {
                settings.site_name.clone()
            } else {
                post.author.clone()
            },
        },
        fields,
        image: post
            .thumbnail_url(thumbnail_size)
            .map(|url| EmbedImage {
                url: url.to_string(),
            }),
    }
}

/// The embed description: the post's excerpt when it has one, otherwise a
/// word-trimmed extraction from the body. Markup is stripped either way.
#[must_use]
pub fn description(post: &Post) -> String {
    let source = post
        .excerpt
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .or(post.body.as_deref())
        .unwrap_or_default();

    text::trim_words(&text::strip_markup(source), EXCERPT_WORD_LIMIT, EXCERPT_MORE)
}

/// Comma-separated plain-text term list with markup stripped.
fn join_terms(terms: &[String]) -> String {
    terms
        .iter()
        .map(|t| text::strip_markup(t))
        .collect::<Vec<_>>()
        .join(", ")
}
