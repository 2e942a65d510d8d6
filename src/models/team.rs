//! Team member model

use serde::{Deserialize, Serialize};

use super::{null_as_default, FeaturedImage};

/// `fonctions { equipe fonction }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fonctions {
    #[serde(default)]
    pub equipe: Option<String>,
    #[serde(default)]
    pub fonction: Option<String>,
}

/// `social { facebook instagram linkedin twitter }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub tiktok: Option<String>,
}

impl SocialLinks {
    /// Non-empty links, in display order
    pub fn links(&self) -> Vec<SocialLink> {
        [
            (SocialPlatform::Facebook, &self.facebook),
            (SocialPlatform::Instagram, &self.instagram),
            (SocialPlatform::Linkedin, &self.linkedin),
            (SocialPlatform::Twitter, &self.twitter),
            (SocialPlatform::Tiktok, &self.tiktok),
        ]
        .into_iter()
        .filter_map(|(platform, url)| {
            url.as_ref()
                .filter(|u| !u.trim().is_empty())
                .map(|u| SocialLink { platform, url: u.clone() })
        })
        .collect()
    }
}

/// Raw `equipes` node from the CMS
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamNode {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub fonctions: Option<Fonctions>,
    #[serde(default)]
    pub social: Option<SocialLinks>,
    #[serde(default)]
    pub featured_image: Option<FeaturedImage>,
}

/// Social network of a team member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Facebook,
    Instagram,
    Linkedin,
    Twitter,
    Tiktok,
}

impl SocialPlatform {
    /// Brand colour used for the platform icon
    pub fn color(&self) -> &'static str {
        match self {
            Self::Linkedin => "#0A66C2",
            Self::Facebook => "#1877F2",
            Self::Twitter => "#1DA1F2",
            Self::Instagram => "#E4405F",
            Self::Tiktok => "#000000",
        }
    }
}

impl std::fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Facebook => write!(f, "facebook"),
            Self::Instagram => write!(f, "instagram"),
            Self::Linkedin => write!(f, "linkedin"),
            Self::Twitter => write!(f, "twitter"),
            Self::Tiktok => write!(f, "tiktok"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: SocialPlatform,
    pub url: String,
}

/// Team member formatted for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub position: String,
    pub description: String,
    pub image_uri: Option<String>,
    pub socials: Vec<SocialLink>,
}

impl TeamMember {
    pub const DEFAULT_POSITION: &'static str = "Membre de l'équipe";

    /// Format a CMS node; `index` is its position in the result list
    pub fn from_node(node: &TeamNode, index: usize) -> Self {
        let id = if node.title.is_empty() {
            format!("member-{}", index)
        } else {
            node.title.clone()
        };
        let fonctions = node.fonctions.clone().unwrap_or_default();

        Self {
            id,
            name: node.title.clone(),
            position: fonctions
                .fonction
                .filter(|f| !f.is_empty())
                .unwrap_or_else(|| Self::DEFAULT_POSITION.to_string()),
            description: fonctions.equipe.unwrap_or_default(),
            image_uri: node
                .featured_image
                .as_ref()
                .and_then(|f| f.node.as_ref())
                .and_then(|m| m.media_item_url.clone()),
            socials: node.social.as_ref().map(SocialLinks::links).unwrap_or_default(),
        }
    }
}
