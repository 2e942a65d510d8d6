//! CitizenLab - community content client
//!
//! This library provides the core functionality of the CitizenLab client:
//! content fetched from the CMS GraphQL endpoint, event / speaker / podcast
//! management against the REST backend, screen view-models, theme selection
//! and podcast playback.

pub mod app;
pub mod audio;
pub mod config;
pub mod content;
pub mod models;
pub mod platform;
pub mod screens;
pub mod services;
pub mod theme;

#[cfg(test)]
pub(crate) mod testing;
