//! Data models
//!
//! This module contains all data structures used throughout the CitizenLab client.
//! Models represent:
//! - CMS records (Post, MenuItem, TeamMember, Formation, Magazine)
//! - REST backend records (Evenement, Intervenant, Podcast, Membre, Categorie)
//! - The static document catalogue

mod document;
mod evenement;
mod formation;
mod menu;
mod podcast;
mod post;
mod team;

pub use document::{Document, DocumentCategory, DOCUMENTS};
pub use evenement::{Evenement, Intervenant, ModeEvenement, NewEvenement, NewIntervenant, Sexe, TypeEvenement};
pub use formation::{FormationDetails, FormationLink, FormationPost, Magazine, MagazineDetails, Statut};
pub use menu::MenuItem;
pub use podcast::{Categorie, Membre, NewPodcast, Podcast};
pub use post::{CategoryNode, CategoryRef, FeaturedImage, MediaDetails, MediaItem, NodeList, PodcastMeta, Post, TermRef, UriNode};
pub use team::{SocialLink, SocialLinks, SocialPlatform, TeamMember, TeamNode};

use serde::{Deserialize, Deserializer};

/// Deserialize a nullable field into its `Default` value.
///
/// WordPress returns explicit `null` for empty text fields, which `#[serde(default)]`
/// alone does not cover.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "null_as_default")]
        title: String,
        #[serde(default, deserialize_with = "null_as_default")]
        count: u32,
    }

    #[test]
    fn test_null_as_default_handles_null_missing_and_present() {
        let null: Sample = serde_json::from_str(r#"{"title": null, "count": null}"#).unwrap();
        assert_eq!(null.title, "");
        assert_eq!(null.count, 0);

        let missing: Sample = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.title, "");

        let present: Sample = serde_json::from_str(r#"{"title": "Bonjour", "count": 3}"#).unwrap();
        assert_eq!(present.title, "Bonjour");
        assert_eq!(present.count, 3);
    }
}
