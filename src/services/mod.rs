//! Services layer - REST backend
//!
//! This module talks to the Laravel backend that stores events, speakers and
//! podcasts. Services are responsible for:
//! - Building JSON or multipart requests
//! - Unwrapping `{ "data": ... }` envelopes
//! - Turning failed responses into user-facing error messages
//!
//! Each resource is exposed through an async trait (`EventApi`, `SpeakerApi`,
//! `PodcastApi`) implemented by [`RestClient`], so screens can be driven by
//! in-memory implementations in tests.

pub mod evenement;
pub mod intervenant;
pub mod podcast;
mod error;
mod upload;

pub use error::ServiceError;
pub use evenement::EventApi;
pub use intervenant::SpeakerApi;
pub use podcast::PodcastApi;
pub use upload::{audio_mime, image_mime, Attachment};

use reqwest::header::ACCEPT;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::RestConfig;

/// Header that lets requests through an ngrok tunnel without the browser warning page
pub const TUNNEL_BYPASS_HEADER: &str = "ngrok-skip-browser-warning";

/// Response body, bare or wrapped in `{ "data": ... }`
#[derive(Debug, Deserialize)]
#[serde(untagged, bound(deserialize = "T: DeserializeOwned"))]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } => data,
            Self::Bare(value) => value,
        }
    }
}

/// HTTP client for the REST backend
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    origin: String,
    api_base: String,
    podcasts_base: String,
    tunnel_bypass: bool,
}

impl RestClient {
    /// Create a client from configuration
    pub fn new(config: &RestConfig) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("citizenlab/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ServiceError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            origin: config.base_url.trim_end_matches('/').to_string(),
            api_base: config.api_base(),
            podcasts_base: config.podcasts_api_base(),
            tunnel_bypass: config.tunnel_bypass_header,
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn podcasts_base(&self) -> &str {
        &self.podcasts_base
    }

    /// Public URL of a file stored by the backend
    pub fn image_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/storage/{}", self.origin, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.http.request(method, url).header(ACCEPT, "application/json");
        if self.tunnel_bypass {
            builder.header(TUNNEL_BYPASS_HEADER, "true")
        } else {
            builder
        }
    }

    /// GET and decode; any non-success status becomes `error_message`
    async fn get_json<T: DeserializeOwned>(&self, url: &str, error_message: &str) -> Result<T, ServiceError> {
        tracing::debug!("GET {}", url);
        let response = self.request(Method::GET, url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("GET {} failed with status {}", url, status);
            return Err(ServiceError::Status {
                status: status.as_u16(),
                message: error_message.to_string(),
            });
        }

        let envelope: Envelope<T> = response.json().await?;
        Ok(envelope.into_inner())
    }

    /// Send a write request and decode the created record
    async fn send_write<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        default_error: &str,
    ) -> Result<T, ServiceError> {
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = ServiceError::from_write_failure(status, &body, default_error);
            tracing::error!("Write request failed ({}): {}", status, err);
            return Err(err);
        }

        let envelope: Envelope<T> = response.json().await?;
        Ok(envelope.into_inner())
    }

    async fn delete(&self, url: &str, error_message: &str) -> Result<(), ServiceError> {
        tracing::debug!("DELETE {}", url);
        let response = self.request(Method::DELETE, url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("DELETE {} failed with status {}", url, status);
            return Err(ServiceError::Status {
                status: status.as_u16(),
                message: error_message.to_string(),
            });
        }
        Ok(())
    }
}
