//! Platform capabilities
//!
//! Alerts, the share sheet, external links and file downloads are reached
//! through small traits chosen at start-up. The terminal front-end uses the
//! console implementations below; tests substitute recording doubles.

mod download;

pub use download::{clean_file_name, DownloadError, Downloader, DOWNLOAD_ERROR_MESSAGE};

use std::path::Path;

/// User-facing alert dialog
pub trait Notifier: Send + Sync {
    fn alert(&self, title: &str, message: &str);
}

/// System share sheet for downloaded files
pub trait ShareSheet: Send + Sync {
    fn is_available(&self) -> bool;

    fn share(&self, path: &Path) -> anyhow::Result<()>;
}

/// Opens URLs outside the application
pub trait LinkOpener: Send + Sync {
    fn open(&self, url: &str) -> anyhow::Result<()>;
}

/// Prints alerts to stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn alert(&self, title: &str, message: &str) {
        tracing::info!("Alert shown: {}", title);
        eprintln!("[{}] {}", title, message);
    }
}

/// Reports the saved path instead of opening a share sheet
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleShare;

impl ShareSheet for ConsoleShare {
    fn is_available(&self) -> bool {
        true
    }

    fn share(&self, path: &Path) -> anyhow::Result<()> {
        println!("{}", path.display());
        Ok(())
    }
}

/// Prints the URL for the user to follow
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleLinkOpener;

impl LinkOpener for ConsoleLinkOpener {
    fn open(&self, url: &str) -> anyhow::Result<()> {
        let parsed = reqwest::Url::parse(url)?;
        println!("{}", parsed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_link_opener_rejects_invalid_urls() {
        assert!(ConsoleLinkOpener.open("https://citizenlab.africa").is_ok());
        assert!(ConsoleLinkOpener.open("pas une url").is_err());
    }

    #[test]
    fn test_console_share_is_available() {
        assert!(ConsoleShare.is_available());
    }
}
