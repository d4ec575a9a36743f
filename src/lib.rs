//! Discord post announcer library.
//!
//! A service that receives "post published" events from a host CMS, renders
//! the post into a Discord webhook message, delivers it, and records the
//! announcement so each post is announced at most once.

pub mod activation;
pub mod config;
pub mod constants;
pub mod db;
pub mod discord;
pub mod hooks;
pub mod post;
pub mod publisher;
pub mod settings;
pub mod text;
pub mod web;
