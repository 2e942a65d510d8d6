//! Document catalogue with download and share

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::models::{Document, DocumentCategory, DOCUMENTS};
use crate::platform::{clean_file_name, Downloader, Notifier, ShareSheet, DOWNLOAD_ERROR_MESSAGE};
use crate::theme::Palette;

use super::Render;

/// Result of tapping a document's download button
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Saved and handed to the share sheet
    Shared(PathBuf),
    /// Saved; no share sheet on this platform
    Saved(PathBuf),
    /// A download of the same document is already running
    InFlight,
    NotFound,
    Failed,
}

/// Marks a document as downloading until dropped
struct InFlightGuard<'a> {
    ids: &'a Mutex<HashSet<String>>,
    id: String,
}

impl<'a> InFlightGuard<'a> {
    /// `None` when the document is already downloading
    fn acquire(ids: &'a Mutex<HashSet<String>>, id: &str) -> Option<Self> {
        let inserted = lock_ids(ids).insert(id.to_string());
        inserted.then(|| Self { ids, id: id.to_string() })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        lock_ids(self.ids).remove(&self.id);
    }
}

fn lock_ids(ids: &Mutex<HashSet<String>>) -> std::sync::MutexGuard<'_, HashSet<String>> {
    ids.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct DocumentsScreen {
    downloader: Downloader,
    share: Arc<dyn ShareSheet>,
    notifier: Arc<dyn Notifier>,
    documents: Vec<Document>,
    pub category: Option<DocumentCategory>,
    downloading: Mutex<HashSet<String>>,
}

impl DocumentsScreen {
    pub fn new(downloader: Downloader, share: Arc<dyn ShareSheet>, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_documents(DOCUMENTS.clone(), downloader, share, notifier)
    }

    pub fn with_documents(
        documents: Vec<Document>,
        downloader: Downloader,
        share: Arc<dyn ShareSheet>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            downloader,
            share,
            notifier,
            documents,
            category: None,
            downloading: Mutex::new(HashSet::new()),
        }
    }

    /// Select a chip by label; `Tous` clears the filter
    pub fn select_chip(&mut self, label: &str) -> anyhow::Result<()> {
        self.category = if label == DocumentCategory::ALL_LABEL {
            None
        } else {
            Some(label.parse()?)
        };
        Ok(())
    }

    pub fn visible(&self) -> Vec<&Document> {
        self.documents
            .iter()
            .filter(|d| self.category.map_or(true, |c| d.category == c))
            .collect()
    }

    pub fn is_downloading(&self, id: &str) -> bool {
        lock_ids(&self.downloading).contains(id)
    }

    /// Download a document into the cache directory and share it
    pub async fn download(&self, id: &str) -> DownloadOutcome {
        let Some(document) = self.documents.iter().find(|d| d.id == id) else {
            return DownloadOutcome::NotFound;
        };
        let Some(guard) = InFlightGuard::acquire(&self.downloading, id) else {
            return DownloadOutcome::InFlight;
        };

        let file_name = clean_file_name(&document.title);
        let result = self.downloader.download(&document.url, &file_name).await;
        drop(guard);

        let path = match result {
            Ok(path) => path,
            Err(e) => {
                tracing::error!("Failed to download document {}: {}", id, e);
                self.notifier.alert("Erreur", DOWNLOAD_ERROR_MESSAGE);
                return DownloadOutcome::Failed;
            }
        };

        if !self.share.is_available() {
            tracing::info!("Saved {} without sharing", path.display());
            return DownloadOutcome::Saved(path);
        }
        match self.share.share(&path) {
            Ok(()) => DownloadOutcome::Shared(path),
            Err(e) => {
                tracing::error!("Failed to share {}: {}", path.display(), e);
                self.notifier.alert("Erreur", DOWNLOAD_ERROR_MESSAGE);
                DownloadOutcome::Failed
            }
        }
    }
}

impl Render for DocumentsScreen {
    fn render(&self, palette: &Palette) -> String {
        let mut out = format!("{}\n", palette.heading("Documents"));

        let selected = self.category.map_or(DocumentCategory::ALL_LABEL, |c| c.label());
        let chips: Vec<String> = DocumentCategory::chips()
            .into_iter()
            .map(|chip| {
                if chip == selected {
                    format!("[{}]", Palette::paint(palette.tint1, chip))
                } else {
                    chip.to_string()
                }
            })
            .collect();
        out.push_str(&format!("{}\n\n", chips.join("  ")));

        for doc in self.visible() {
            let status = if self.is_downloading(&doc.id) { "  ⇣" } else { "" };
            out.push_str(&format!(
                "{}{}  {}{}\n    {}\n    {}\n",
                palette.card_prefix(),
                Palette::paint(palette.tint1, &doc.category.label().to_uppercase()),
                doc.size,
                status,
                doc.title,
                doc.description
            ));
        }
        out
    }
}
