//! Document downloads into the local cache directory

use std::io::Write;
use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Alert text shown when a download fails
pub const DOWNLOAD_ERROR_MESSAGE: &str = "Impossible de télécharger le fichier.";

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s/\\]+").unwrap());

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Download failed: {0}")]
    Network(String),

    #[error("Download failed with status {0}")]
    Status(u16),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for DownloadError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Local file name for a document title, plus `.pdf`.
///
/// Runs of whitespace and path separators become `_`, so the name always
/// stays inside the cache directory.
pub fn clean_file_name(title: &str) -> String {
    format!("{}.pdf", SEPARATORS.replace_all(title.trim(), "_"))
}

/// Fetches remote files into `cache_dir`
#[derive(Debug, Clone)]
pub struct Downloader {
    http: reqwest::Client,
    cache_dir: PathBuf,
}

impl Downloader {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            http: reqwest::Client::new(),
            cache_dir: cache_dir.into(),
        }
    }

    pub fn cache_dir(&self) -> &std::path::Path {
        &self.cache_dir
    }

    /// Download `url` to `cache_dir/file_name`, replacing any previous copy.
    ///
    /// The body is written to a temporary file first so a failed transfer
    /// never leaves a truncated document behind.
    pub async fn download(&self, url: &str, file_name: &str) -> Result<PathBuf, DownloadError> {
        tracing::info!("Downloading {} to {}", url, file_name);
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("Download of {} failed with status {}", url, status);
            return Err(DownloadError::Status(status.as_u16()));
        }
        let bytes = response.bytes().await?;

        let dir = self.cache_dir.clone();
        let target = dir.join(file_name);
        tokio::task::spawn_blocking(move || -> Result<PathBuf, DownloadError> {
            std::fs::create_dir_all(&dir)?;
            let mut tmp = NamedTempFile::new_in(&dir)?;
            tmp.write_all(&bytes)?;
            tmp.persist(&target).map_err(|e| DownloadError::Io(e.error))?;
            Ok(target)
        })
        .await
        .map_err(|e| DownloadError::Io(std::io::Error::other(e)))?
    }
}
