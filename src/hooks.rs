//! Pluggable override points for the publish pipeline.
//!
//! Each stage of the pipeline exposes an ordered chain of transform
//! functions; every registered function receives the current value and the
//! post, and returns the (possibly replaced) value. Chains run in
//! registration order, and the stages themselves run in a fixed order:
//! eligibility, message, embeds, username, avatar, webhook URL, request
//! body, full request.

use crate::discord::{Embed, WebhookPayload, WebhookRequest};
use crate::post::Post;

type Transform<T> = Box<dyn Fn(T, &Post) -> T + Send + Sync>;

/// Registered pipeline overrides. An empty registry leaves every value
/// untouched.
#[derive(Default)]
pub struct Hooks {
    eligibility: Vec<Transform<bool>>,
    message: Vec<Transform<String>>,
    embeds: Vec<Transform<Vec<Embed>>>,
    username: Vec<Transform<String>>,
    avatar: Vec<Transform<String>>,
    webhook_url: Vec<Transform<String>>,
    thumbnail_size: Vec<Transform<String>>,
    description: Vec<Transform<String>>,
    payload: Vec<Transform<WebhookPayload>>,
    request: Vec<Transform<WebhookRequest>>,
}

impl Hooks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the computed eligibility decision.
    pub fn on_eligibility(&mut self, f: impl Fn(bool, &Post) -> bool + Send + Sync + 'static) {
        self.eligibility.push(Box::new(f));
    }

    /// Override the rendered message content.
    pub fn on_message(&mut self, f: impl Fn(String, &Post) -> String + Send + Sync + 'static) {
        self.message.push(Box::new(f));
    }

    /// Override the embed list.
    pub fn on_embeds(
        &mut self,
        f: impl Fn(Vec<Embed>, &Post) -> Vec<Embed> + Send + Sync + 'static,
    ) {
        self.embeds.push(Box::new(f));
    }

    /// Override the bot username.
    pub fn on_username(&mut self, f: impl Fn(String, &Post) -> String + Send + Sync + 'static) {
        self.username.push(Box::new(f));
    }

    /// Override the bot avatar URL.
    pub fn on_avatar(&mut self, f: impl Fn(String, &Post) -> String + Send + Sync + 'static) {
        self.avatar.push(Box::new(f));
    }

    /// Override the target webhook URL.
    pub fn on_webhook_url(&mut self, f: impl Fn(String, &Post) -> String + Send + Sync + 'static) {
        self.webhook_url.push(Box::new(f));
    }

    /// Override the featured-image rendition used for the embed image.
    pub fn on_thumbnail_size(
        &mut self,
        f: impl Fn(String, &Post) -> String + Send + Sync + 'static,
    ) {
        self.thumbnail_size.push(Box::new(f));
    }

    /// Override the embed description.
    pub fn on_description(&mut self, f: impl Fn(String, &Post) -> String + Send + Sync + 'static) {
        self.description.push(Box::new(f));
    }

    /// Override the request body before serialization.
    pub fn on_payload(
        &mut self,
        f: impl Fn(WebhookPayload, &Post) -> WebhookPayload + Send + Sync + 'static,
    ) {
        self.payload.push(Box::new(f));
    }

    /// Override the final request (headers and serialized body).
    pub fn on_request(
        &mut self,
        f: impl Fn(WebhookRequest, &Post) -> WebhookRequest + Send + Sync + 'static,
    ) {
        self.request.push(Box::new(f));
    }

    pub(crate) fn apply_eligibility(&self, value: bool, post: &Post) -> bool {
        Self::apply(&self.eligibility, value, post)
    }

    pub(crate) fn apply_message(&self, value: String, post: &Post) -> String {
        Self::apply(&self.message, value, post)
    }

    pub(crate) fn apply_embeds(&self, value: Vec<Embed>, post: &Post) -> Vec<Embed> {
        Self::apply(&self.embeds, value, post)
    }

    pub(crate) fn apply_username(&self, value: String, post: &Post) -> String {
        Self::apply(&self.username, value, post)
    }

    pub(crate) fn apply_avatar(&self, value: String, post: &Post) -> String {
        Self::apply(&self.avatar, value, post)
    }

    pub(crate) fn apply_webhook_url(&self, value: String, post: &Post) -> String {
        Self::apply(&self.webhook_url, value, post)
    }

    pub(crate) fn apply_thumbnail_size(&self, value: String, post: &Post) -> String {
        Self::apply(&self.thumbnail_size, value, post)
    }

    pub(crate) fn apply_description(&self, value: String, post: &Post) -> String {
        Self::apply(&self.description, value, post)
    }

    pub(crate) fn apply_payload(&self, value: WebhookPayload, post: &Post) -> WebhookPayload {
        Self::apply(&self.payload, value, post)
    }

    pub(crate) fn apply_request(&self, value: WebhookRequest, post: &Post) -> WebhookRequest {
        Self::apply(&self.request, value, post)
    }

    fn apply<T>(chain: &[Transform<T>], value: T, post: &Post) -> T {
        chain.iter().fold(value, |current, f| f(current, post))
    }
}
