//! Configuration management
//!
//! This module handles loading and parsing configuration for the CitizenLab client.
//! Configuration can be loaded from:
//! - citizenlab.yml file
//! - Environment variables (override file settings)
//!
//! Missing optional values are filled with sensible defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::theme::ColorScheme;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// CMS (GraphQL) configuration
    #[serde(default)]
    pub cms: CmsConfig,
    /// REST backend configuration
    #[serde(default)]
    pub rest: RestConfig,
    /// Document download configuration
    #[serde(default)]
    pub documents: DocumentsConfig,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
    /// Audio playback configuration
    #[serde(default)]
    pub audio: AudioConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// CMS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CmsConfig {
    /// GraphQL endpoint used by most queries
    #[serde(default = "default_cms_endpoint")]
    pub endpoint: String,
    /// Secondary GraphQL endpoint (team members, full news list).
    /// Falls back to `endpoint` when unset.
    #[serde(default)]
    pub secondary_endpoint: Option<String>,
    /// Timeout in seconds for queries without a dedicated timeout
    #[serde(default = "default_cms_timeout")]
    pub timeout_secs: u64,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            endpoint: default_cms_endpoint(),
            secondary_endpoint: None,
            timeout_secs: default_cms_timeout(),
        }
    }
}

impl CmsConfig {
    /// Endpoint for queries routed to the secondary CMS
    pub fn secondary(&self) -> &str {
        self.secondary_endpoint.as_deref().unwrap_or(&self.endpoint)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_cms_endpoint() -> String {
    "https://citizenlab.africtivistes.org/senegal/graphql".to_string()
}

fn default_cms_timeout() -> u64 {
    10
}

/// REST backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestConfig {
    /// Backend origin, also used to resolve stored images
    #[serde(default = "default_rest_base_url")]
    pub base_url: String,
    /// Path prefix of the JSON API
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    /// Full API base for podcast endpoints when they live on another host
    #[serde(default)]
    pub podcasts_base_url: Option<String>,
    /// Send `ngrok-skip-browser-warning` on every request
    #[serde(default)]
    pub tunnel_bypass_header: bool,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_url: default_rest_base_url(),
            api_prefix: default_api_prefix(),
            podcasts_base_url: None,
            tunnel_bypass_header: false,
        }
    }
}

impl RestConfig {
    /// Base URL of the JSON API, e.g. `http://127.0.0.1:8000/api`
    pub fn api_base(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.api_prefix.trim_matches('/')
        )
    }

    /// Base URL for podcast, member and category endpoints
    pub fn podcasts_api_base(&self) -> String {
        match &self.podcasts_base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => self.api_base(),
        }
    }
}

fn default_rest_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

/// Document download configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentsConfig {
    /// Directory downloaded documents are written to
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
        }
    }
}

fn default_cache_dir() -> PathBuf {
    std::env::temp_dir().join("citizenlab")
}

/// Theme configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Colour scheme applied at start-up
    #[serde(default)]
    pub scheme: ColorScheme,
}

/// Audio backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AudioBackendKind {
    /// No audio device; playback state is tracked only (default)
    #[default]
    Headless,
    /// Native output through rodio (requires the `rodio-playback` feature)
    Rodio,
}

/// Audio configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudioConfig {
    #[serde(default)]
    pub backend: AudioBackendKind,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "citizenlab=info".to_string()
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError {
        path: String,
        message: String,
    },
}

impl Config {
    /// Load configuration from file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// If the file exists but is invalid YAML, returns an error with details.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::ParseError {
                path: path.display().to_string(),
                message: format_yaml_error(&e),
            }
        })?;

        Ok(config)
    }

    /// Load configuration from file with environment variable overrides
    ///
    /// Environment variables follow the pattern:
    /// - CITIZENLAB_CMS_ENDPOINT
    /// - CITIZENLAB_CMS_SECONDARY_ENDPOINT
    /// - CITIZENLAB_CMS_TIMEOUT_SECS
    /// - CITIZENLAB_REST_BASE_URL
    /// - CITIZENLAB_REST_PODCASTS_BASE_URL
    /// - CITIZENLAB_REST_TUNNEL_BYPASS
    /// - CITIZENLAB_DOCUMENTS_CACHE_DIR
    /// - CITIZENLAB_THEME_SCHEME
    /// - CITIZENLAB_AUDIO_BACKEND
    /// - CITIZENLAB_LOG
    pub fn load_with_env(path: &std::path::Path) -> anyhow::Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(&mut self) {
        // CMS configuration
        if let Ok(endpoint) = std::env::var("CITIZENLAB_CMS_ENDPOINT") {
            self.cms.endpoint = endpoint;
        }
        if let Ok(endpoint) = std::env::var("CITIZENLAB_CMS_SECONDARY_ENDPOINT") {
            self.cms.secondary_endpoint = Some(endpoint);
        }
        if let Ok(timeout) = std::env::var("CITIZENLAB_CMS_TIMEOUT_SECS") {
            if let Ok(timeout) = timeout.parse::<u64>() {
                self.cms.timeout_secs = timeout;
            }
        }

        // REST configuration
        if let Ok(base_url) = std::env::var("CITIZENLAB_REST_BASE_URL") {
            self.rest.base_url = base_url;
        }
        if let Ok(url) = std::env::var("CITIZENLAB_REST_PODCASTS_BASE_URL") {
            self.rest.podcasts_base_url = Some(url);
        }
        if let Ok(flag) = std::env::var("CITIZENLAB_REST_TUNNEL_BYPASS") {
            match flag.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.rest.tunnel_bypass_header = true,
                "0" | "false" | "no" => self.rest.tunnel_bypass_header = false,
                _ => {} // Ignore invalid values
            }
        }

        // Documents
        if let Ok(dir) = std::env::var("CITIZENLAB_DOCUMENTS_CACHE_DIR") {
            self.documents.cache_dir = PathBuf::from(dir);
        }

        // Theme
        if let Ok(scheme) = std::env::var("CITIZENLAB_THEME_SCHEME") {
            if let Ok(scheme) = scheme.parse::<ColorScheme>() {
                self.theme.scheme = scheme;
            }
        }

        // Audio
        if let Ok(backend) = std::env::var("CITIZENLAB_AUDIO_BACKEND") {
            match backend.to_lowercase().as_str() {
                "headless" => self.audio.backend = AudioBackendKind::Headless,
                "rodio" => self.audio.backend = AudioBackendKind::Rodio,
                _ => {} // Ignore invalid values
            }
        }

        if let Ok(filter) = std::env::var("CITIZENLAB_LOG") {
            self.logging.filter = filter;
        }
    }
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

// Shared mutex for all config tests that modify environment variables.
#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());


/// Property-based tests for configuration parsing
#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn scheme_strategy() -> impl Strategy<Value = ColorScheme> {
        prop_oneof![Just(ColorScheme::Light), Just(ColorScheme::Dark)]
    }

    fn config_strategy() -> impl Strategy<Value = Config> {
        (
            "https://[a-z]{3,10}\\.org/graphql",
            1u64..=60,
            "http://[a-z]{3,10}:[0-9]{4}",
            any::<bool>(),
            scheme_strategy(),
        )
            .prop_map(|(endpoint, timeout_secs, base_url, bypass, scheme)| Config {
                cms: CmsConfig {
                    endpoint,
                    secondary_endpoint: None,
                    timeout_secs,
                },
                rest: RestConfig {
                    base_url,
                    tunnel_bypass_header: bypass,
                    ..RestConfig::default()
                },
                theme: ThemeConfig { scheme },
                ..Config::default()
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        /// Serializing then loading a config preserves every field we set.
        #[test]
        fn config_roundtrip_through_yaml(config in config_strategy()) {
            let yaml = serde_yaml::to_string(&config).unwrap();
            let file = tempfile::NamedTempFile::new().unwrap();
            std::fs::write(file.path(), yaml).unwrap();

            let loaded = Config::load(file.path()).unwrap();

            prop_assert_eq!(loaded.cms.endpoint, config.cms.endpoint);
            prop_assert_eq!(loaded.cms.timeout_secs, config.cms.timeout_secs);
            prop_assert_eq!(loaded.rest.base_url, config.rest.base_url);
            prop_assert_eq!(loaded.rest.tunnel_bypass_header, config.rest.tunnel_bypass_header);
            prop_assert_eq!(loaded.theme.scheme, config.theme.scheme);
        }

        /// The API base never ends up with doubled or trailing slashes.
        #[test]
        fn api_base_is_normalised(host in "[a-z]{3,10}", trailing in 0usize..3, prefix in "/?[a-z]{2,5}/?") {
            let rest = RestConfig {
                base_url: format!("http://{}{}", host, "/".repeat(trailing)),
                api_prefix: prefix.clone(),
                ..RestConfig::default()
            };
            let base = rest.api_base();

            prop_assert!(!base.ends_with('/'));
            prop_assert!(!base["http://".len()..].contains("//"));
            prop_assert!(base.ends_with(prefix.trim_matches('/')));
        }
    }
}
