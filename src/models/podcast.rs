//! Podcast models (REST backend)

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Podcast author
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Membre {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nom: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub prenom: String,
}

impl Membre {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.prenom, self.nom).trim().to_string()
    }
}

/// Podcast category; older records carry `libelle` instead of `nom`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Categorie {
    pub id: i64,
    #[serde(default)]
    pub nom: Option<String>,
    #[serde(default)]
    pub libelle: Option<String>,
}

impl Categorie {
    pub fn display_name(&self) -> Option<&str> {
        self.nom
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(self.libelle.as_deref().filter(|l| !l.is_empty()))
    }
}

/// Podcast episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Podcast {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub libelle: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Audio file URL
    #[serde(default, deserialize_with = "null_as_default")]
    pub fichier: String,
    #[serde(default)]
    pub membre: Option<Membre>,
    #[serde(default)]
    pub categorie: Option<Categorie>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Podcast {
    pub const UNKNOWN_AUTHOR: &'static str = "Inconnu";
    pub const UNCATEGORIZED: &'static str = "Non catégorisé";

    pub fn author_name(&self) -> String {
        self.membre
            .as_ref()
            .map(Membre::full_name)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| Self::UNKNOWN_AUTHOR.to_string())
    }

    pub fn category_name(&self) -> &str {
        self.categorie
            .as_ref()
            .and_then(Categorie::display_name)
            .unwrap_or(Self::UNCATEGORIZED)
    }

    /// Text matched by the admin search box
    pub fn search_text(&self) -> String {
        let (prenom, nom) = self
            .membre
            .as_ref()
            .map(|m| (m.prenom.as_str(), m.nom.as_str()))
            .unwrap_or_default();
        let categorie = self
            .categorie
            .as_ref()
            .and_then(Categorie::display_name)
            .unwrap_or_default();
        format!("{} {} {} {}", self.libelle, prenom, nom, categorie)
    }
}

/// Text fields of `POST /podcasts`; the audio file travels separately
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPodcast {
    pub libelle: String,
    pub description: String,
    pub membre_id: i64,
    pub categorie_id: i64,
}

impl NewPodcast {
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("libelle", self.libelle.clone()),
            ("description", self.description.clone()),
            ("membre_id", self.membre_id.to_string()),
            ("categorie_id", self.categorie_id.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_podcast_fallback_names() {
        let podcast: Podcast = serde_json::from_str(r#"{"id": 1, "libelle": "Épisode 1", "fichier": "https://cdn.example.org/ep1.mp3"}"#).unwrap();

        assert_eq!(podcast.author_name(), "Inconnu");
        assert_eq!(podcast.category_name(), "Non catégorisé");
        assert_eq!(podcast.search_text().trim(), "Épisode 1");
    }

    #[test]
    fn test_categorie_uses_libelle_when_nom_missing() {
        let podcast: Podcast = serde_json::from_str(r#"{
            "id": 2,
            "libelle": "Voix des jeunes",
            "description": null,
            "fichier": "x.mp3",
            "membre": {"id": 5, "nom": "Sow", "prenom": "Fatou"},
            "categorie": {"id": 1, "nom": null, "libelle": "Société"}
        }"#).unwrap();

        assert_eq!(podcast.description, "");
        assert_eq!(podcast.author_name(), "Fatou Sow");
        assert_eq!(podcast.category_name(), "Société");
        assert_eq!(podcast.search_text(), "Voix des jeunes Fatou Sow Société");
    }

    #[test]
    fn test_new_podcast_form_fields() {
        let podcast = NewPodcast {
            libelle: "Titre".into(),
            description: "Desc".into(),
            membre_id: 7,
            categorie_id: 2,
        };

        let fields = podcast.form_fields();

        assert_eq!(fields[2], ("membre_id", "7".to_string()));
        assert_eq!(fields[3], ("categorie_id", "2".to_string()));
    }
}
