//! Discord webhook wire types and delivery client.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::constants::USER_AGENT;

/// The webhook request body.
///
/// `embeds` is omitted from the wire format entirely when empty rather than
/// sent as an empty array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebhookPayload {
    pub content: String,
    pub username: String,
    pub avatar_url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
}

/// A rich-content block attached to the message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Embed {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub url: String,
    /// ISO-8601 publish timestamp.
    pub timestamp: String,
    pub footer: EmbedFooter,
    pub author: EmbedAuthor,
    pub fields: Vec<EmbedField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmbedFooter {
    pub text: String,
    pub icon_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmbedAuthor {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmbedImage {
    pub url: String,
}

/// The fully assembled outbound request: headers plus serialized body.
/// Exposed as its own value so the final-request hook can replace it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookRequest {
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl WebhookRequest {
    /// Build a JSON request from a payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be serialized.
    pub fn json(payload: &WebhookPayload) -> Result<Self> {
        Ok(Self {
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: serde_json::to_string(payload).context("Failed to serialize webhook payload")?,
        })
    }
}

/// HTTP client for webhook delivery.
pub struct WebhookClient {
    client: Client,
}

impl WebhookClient {
    /// Create a new webhook client.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be constructed.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// POST the request to the webhook URL, returning the response status.
    ///
    /// # Errors
    ///
    /// Returns an error on transport-level failure (connect, timeout).
    pub async fn send(&self, url: &str, request: &WebhookRequest) -> Result<StatusCode> {
        let mut builder = self.client.post(url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .body(request.body.clone())
            .send()
            .await
            .context("Failed to send webhook request")?;

        Ok(response.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_embed() -> Embed {
        Embed {
            title: "Hello".to_string(),
            kind: "rich".to_string(),
            description: "A post".to_string(),
            url: "https://example.com/hello".to_string(),
            timestamp: "2024-01-01T00:00:00+00:00".to_string(),
            footer: EmbedFooter {
                text: "Example Site".to_string(),
                icon_url: String::new(),
            },
            author: EmbedAuthor {
                name: "Admin".to_string(),
            },
            fields: vec![],
            image: None,
        }
    }

    #[test]
    fn test_payload_omits_empty_embeds() {
        let payload = WebhookPayload {
            content: "hi".to_string(),
            username: "bot".to_string(),
            avatar_url: String::new(),
            embeds: vec![],
        };
        let json: serde_json::Value = serde_json::to_value(&payload).unwrap();
        assert!(json.get("embeds").is_none());
    }

    #[test]
    fn test_embed_serializes_type_field() {
        let json = serde_json::to_value(sample_embed()).unwrap();
        assert_eq!(json["type"], "rich");
        assert!(json.get("image").is_none());
    }

    #[test]
    fn test_embed_includes_image_when_set() {
        let embed = Embed {
            image: Some(EmbedImage {
                url: "https://example.com/img.jpg".to_string(),
            }),
            ..sample_embed()
        };
        let json = serde_json::to_value(embed).unwrap();
        assert_eq!(json["image"]["url"], "https://example.com/img.jpg");
    }

    #[test]
    fn test_request_has_json_content_type() {
        let payload = WebhookPayload {
            content: "hi".to_string(),
            username: String::new(),
            avatar_url: String::new(),
            embeds: vec![],
        };
        let request = WebhookRequest::json(&payload).unwrap();
        assert_eq!(
            request.headers,
            vec![("Content-Type".to_string(), "application/json".to_string())]
        );
        assert!(request.body.contains("\"content\":\"hi\""));
    }
}
