//! Message content rendering.

use crate::constants::MENTION_EVERYONE;
use crate::post::Post;
use crate::settings::PublishSettings;

/// Render the message for a post: substitute template placeholders, then
/// prepend the everyone-mention when enabled and not already present.
#[must_use]
pub fn render(settings: &PublishSettings, post: &Post) -> String {
    let message = substitute(
        settings.template(),
        &[
            ("%post_type%", &post.post_type),
            ("%title%", &post.title),
            ("%author%", &post.author),
            ("%url%", &post.permalink),
        ],
    );

    if settings.mention_everyone && !message.contains(MENTION_EVERYONE) {
        format!("{MENTION_EVERYONE} {message}")
    } else {
        message
    }
}

/// Single-pass placeholder substitution. Substituted values are never
/// re-scanned, so a title containing `%url%` stays literal; tokens not in
/// the map pass through unchanged.
fn substitute(template: &str, replacements: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    'outer: while let Some(c) = rest.chars().next() {
        if c == '%' {
            for (token, value) in replacements {
                if let Some(after) = rest.strip_prefix(token) {
                    out.push_str(value);
                    rest = after;
                    continue 'outer;
                }
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn sample_post() -> Post {
        Post {
            id: 1,
            post_type: "post".to_string(),
            title: "Hello World".to_string(),
            author: "Admin".to_string(),
            permalink: "https://example.com/hello-world".to_string(),
            excerpt: None,
            body: None,
            published_at: None,
            is_revision: false,
            thumbnails: HashMap::new(),
            categories: vec![],
            tags: vec![],
        }
    }

    fn settings_with(template: &str, mention_everyone: bool) -> PublishSettings {
        PublishSettings {
            message_template: template.to_string(),
            mention_everyone,
            ..PublishSettings::default()
        }
    }

    #[test]
    fn test_default_template_rendering() {
        let message = render(&settings_with("", false), &sample_post());
        assert_eq!(
            message,
            r#"New post "Hello World" by "Admin" (https://example.com/hello-world)"#
        );
    }

    #[test]
    fn test_all_placeholders_substituted() {
        let message = render(
            &settings_with("%post_type%|%title%|%author%|%url%", false),
            &sample_post(),
        );
        assert_eq!(message, "post|Hello World|Admin|https://example.com/hello-world");
    }

    #[test]
    fn test_unknown_placeholders_pass_through() {
        let message = render(&settings_with("%title% %unknown% 100%", false), &sample_post());
        assert_eq!(message, "Hello World %unknown% 100%");
    }

    #[test]
    fn test_substituted_values_are_not_rescanned() {
        let post = Post {
            title: "Check %url% out".to_string(),
            ..sample_post()
        };
        let message = render(&settings_with("%title%", false), &post);
        assert_eq!(message, "Check %url% out");
    }

    #[test]
    fn test_mention_everyone_prepended() {
        let message = render(&settings_with("%title%", true), &sample_post());
        assert_eq!(message, "@everyone Hello World");
    }

    #[test]
    fn test_mention_everyone_not_doubled() {
        let message = render(&settings_with("@everyone %title%", true), &sample_post());
        assert_eq!(message, "@everyone Hello World");
    }

    #[test]
    fn test_mention_everyone_disabled() {
        let message = render(&settings_with("%title%", false), &sample_post());
        assert_eq!(message, "Hello World");
    }
}
