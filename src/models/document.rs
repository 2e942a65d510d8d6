//! Static document catalogue

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

const SAMPLE_PDF: &str = "https://www.w3.org/WAI/ER/tests/xhtml/testfiles/resources/pdf/dummy.pdf";

/// Document category shown as a filter chip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentCategory {
    Gouvernance,
    #[serde(rename = "Numérique")]
    Numerique,
    Participation,
    Rapports,
}

impl DocumentCategory {
    /// Label of the "all categories" chip
    pub const ALL_LABEL: &'static str = "Tous";

    pub const ALL: [DocumentCategory; 4] = [
        Self::Gouvernance,
        Self::Numerique,
        Self::Participation,
        Self::Rapports,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Gouvernance => "Gouvernance",
            Self::Numerique => "Numérique",
            Self::Participation => "Participation",
            Self::Rapports => "Rapports",
        }
    }

    /// Chip labels in display order, `Tous` first
    pub fn chips() -> Vec<&'static str> {
        std::iter::once(Self::ALL_LABEL)
            .chain(Self::ALL.iter().map(|c| c.label()))
            .collect()
    }
}

impl std::fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for DocumentCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gouvernance" => Ok(Self::Gouvernance),
            "numérique" | "numerique" => Ok(Self::Numerique),
            "participation" => Ok(Self::Participation),
            "rapports" => Ok(Self::Rapports),
            _ => Err(anyhow::anyhow!("Invalid document category: {}", s)),
        }
    }
}

/// Downloadable document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub category: DocumentCategory,
    pub size: String,
    pub description: String,
    pub url: String,
}

impl Document {
    fn new(id: &str, title: &str, category: DocumentCategory, size: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            category,
            size: size.to_string(),
            description: description.to_string(),
            url: SAMPLE_PDF.to_string(),
        }
    }
}

/// The published document catalogue
pub static DOCUMENTS: Lazy<Vec<Document>> = Lazy::new(|| {
    let charte = |id: &str| {
        Document::new(
            id,
            "Charte du Numérique",
            DocumentCategory::Numerique,
            "1.2 MB",
            "Les règles de bonne conduite sur nos plateformes.",
        )
    };

    let mut docs = vec![
        Document::new(
            "1",
            "Guide de la participation",
            DocumentCategory::Participation,
            "2.4 MB",
            "Comment s'impliquer dans les décisions locales.",
        ),
        Document::new(
            "2",
            "Rapport Annuel 2025",
            DocumentCategory::Rapports,
            "5.1 MB",
            "Bilan des activités et budgets de l'année passée.",
        ),
    ];
    docs.extend(["3", "4", "5", "6", "7", "8"].into_iter().map(charte));
    docs
});
