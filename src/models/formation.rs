//! Training sessions and magazine issues (CMS custom field groups)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{null_as_default, FeaturedImage, MediaItem};

/// Status field: a single choice or a checkbox list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Statut {
    One(String),
    Many(Vec<String>),
}

impl Statut {
    pub const UPCOMING: &'static str = "À venir";

    pub fn contains(&self, value: &str) -> bool {
        match self {
            Self::One(s) => s.trim() == value,
            Self::Many(values) => values.iter().any(|s| s.trim() == value),
        }
    }
}

/// `lien { url title target }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormationLink {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
}

/// `formation { ... }` field group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormationDetails {
    #[serde(default)]
    pub nom: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub lieu: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub prix: Option<String>,
    #[serde(default)]
    pub statut: Option<Statut>,
    #[serde(default)]
    pub duree: Option<String>,
    #[serde(default)]
    pub formateur: Option<String>,
    #[serde(default)]
    pub profession: Option<String>,
    #[serde(default)]
    pub places: Option<serde_json::Value>,
    #[serde(default)]
    pub lien: Option<FormationLink>,
}

impl FormationDetails {
    /// Session date; accepts ISO, `YYYYMMDD` and `DD/MM/YYYY`
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let raw = self.date.as_deref()?.trim();
        if raw.len() == 8 && raw.bytes().all(|b| b.is_ascii_digit()) {
            let iso = format!("{}-{}-{}", &raw[..4], &raw[4..6], &raw[6..]);
            return NaiveDate::parse_from_str(&iso, "%Y-%m-%d").ok();
        }
        let day = raw.get(..10).unwrap_or(raw);
        ["%Y-%m-%d", "%d/%m/%Y"]
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(day, fmt).ok())
    }
}

/// Post of the "Formations" category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormationPost {
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub formation: Option<FormationDetails>,
    #[serde(default)]
    pub featured_image: Option<FeaturedImage>,
}

impl FormationPost {
    pub fn is_upcoming(&self) -> bool {
        self.formation
            .as_ref()
            .and_then(|f| f.statut.as_ref())
            .is_some_and(|s| s.contains(Statut::UPCOMING))
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.formation.as_ref().and_then(FormationDetails::parsed_date)
    }

    /// Display name: `formation.nom`, else the post title
    pub fn name(&self) -> &str {
        self.formation
            .as_ref()
            .and_then(|f| f.nom.as_deref())
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.title)
    }
}

/// `magazine { titre description date fichier }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MagazineDetails {
    #[serde(default)]
    pub titre: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub fichier: Option<FeaturedImage>,
}

/// Post of the "Magazine" category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Magazine {
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default)]
    pub magazine: Option<MagazineDetails>,
    #[serde(default)]
    pub featured_image: Option<FeaturedImage>,
}

impl Magazine {
    /// PDF of the issue
    pub fn file(&self) -> Option<&MediaItem> {
        self.magazine
            .as_ref()
            .and_then(|m| m.fichier.as_ref())
            .and_then(|f| f.node.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formation(json: &str) -> FormationPost {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_statut_string_or_list() {
        let single = formation(r#"{"slug": "a", "formation": {"statut": "À venir", "date": "2025-09-10"}}"#);
        assert!(single.is_upcoming());

        let list = formation(r#"{"slug": "b", "formation": {"statut": ["Complet", "À venir"]}}"#);
        assert!(list.is_upcoming());

        let past = formation(r#"{"slug": "c", "formation": {"statut": ["Terminée"]}}"#);
        assert!(!past.is_upcoming());

        let none = formation(r#"{"slug": "d", "formation": null}"#);
        assert!(!none.is_upcoming());
    }

    #[test]
    fn test_formation_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 9, 10);

        assert_eq!(formation(r#"{"formation": {"date": "2025-09-10"}}"#).date(), expected);
        assert_eq!(formation(r#"{"formation": {"date": "20250910"}}"#).date(), expected);
        assert_eq!(formation(r#"{"formation": {"date": "10/09/2025"}}"#).date(), expected);
        assert_eq!(formation(r#"{"formation": {"date": "bientôt"}}"#).date(), None);
    }

    #[test]
    fn test_formation_name_falls_back_to_title() {
        let named = formation(r#"{"title": "Post", "formation": {"nom": "Data journalisme"}}"#);
        assert_eq!(named.name(), "Data journalisme");

        let unnamed = formation(r#"{"title": "Post", "formation": {"nom": ""}}"#);
        assert_eq!(unnamed.name(), "Post");
    }

    #[test]
    fn test_magazine_file() {
        let magazine: Magazine = serde_json::from_str(r#"{
            "slug": "numero-3",
            "magazine": {"titre": "Numéro 3", "fichier": {"node": {"mediaItemUrl": "https://cdn.example.org/n3.pdf", "altText": ""}}}
        }"#).unwrap();

        assert_eq!(magazine.file().and_then(MediaItem::url), Some("https://cdn.example.org/n3.pdf"));
    }
}
