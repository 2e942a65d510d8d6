//! CMS post model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::null_as_default;

/// GraphQL connection wrapper (`{ nodes: [...] }`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct NodeList<T> {
    #[serde(default = "Vec::new", deserialize_with = "nodes_or_empty")]
    pub nodes: Vec<T>,
}

impl<T> Default for NodeList<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<T> From<Vec<T>> for NodeList<T> {
    fn from(nodes: Vec<T>) -> Self {
        Self { nodes }
    }
}

fn nodes_or_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Image dimensions reported by the media library
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaDetails {
    pub height: Option<u32>,
    pub width: Option<u32>,
}

/// Media library item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    #[serde(default)]
    pub media_item_url: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub alt_text: String,
    #[serde(default)]
    pub src_set: Option<String>,
    #[serde(default)]
    pub media_details: Option<MediaDetails>,
}

impl MediaItem {
    pub fn new(url: impl Into<String>, alt_text: impl Into<String>) -> Self {
        Self {
            media_item_url: Some(url.into()),
            alt_text: alt_text.into(),
            ..Default::default()
        }
    }

    /// Best available URL for display
    pub fn url(&self) -> Option<&str> {
        self.media_item_url
            .as_deref()
            .or(self.source_url.as_deref())
            .filter(|u| !u.is_empty())
    }
}

/// `featuredImage { node { ... } }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeaturedImage {
    pub node: Option<MediaItem>,
}

impl From<MediaItem> for FeaturedImage {
    fn from(item: MediaItem) -> Self {
        Self { node: Some(item) }
    }
}

/// Category reference attached to a post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, alias = "permalink")]
    pub uri: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

/// Taxonomy term attached to a post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default, alias = "permalink")]
    pub uri: Option<String>,
}

/// `podcast { type }` custom field group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PodcastMeta {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// CMS post (news article, project, podcast entry, video...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// HTML excerpt
    #[serde(default, deserialize_with = "null_as_default")]
    pub excerpt: String,
    /// HTML body
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default, alias = "permalink", deserialize_with = "null_as_default")]
    pub uri: String,
    #[serde(default)]
    pub featured_image: Option<FeaturedImage>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: NodeList<CategoryRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub terms: NodeList<TermRef>,
    #[serde(default)]
    pub comment_count: Option<u32>,
    #[serde(default)]
    pub podcast: Option<PodcastMeta>,
}

impl Post {
    /// Featured image, if the post has one with a usable URL
    pub fn image(&self) -> Option<&MediaItem> {
        self.featured_image
            .as_ref()
            .and_then(|f| f.node.as_ref())
            .filter(|m| m.url().is_some())
    }

    /// Name of the first category
    pub fn primary_category(&self) -> Option<&str> {
        self.categories.nodes.first().map(|c| c.name.as_str())
    }

    /// Publication date parsed from the CMS format (`2025-03-14T10:00:00`)
    pub fn published_at(&self) -> Option<NaiveDateTime> {
        let trimmed = self.date.trim_end_matches('Z');
        NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f"))
            .ok()
    }

    /// Whether the post belongs to the category (name or slug, case-insensitive)
    pub fn in_category(&self, category: &str) -> bool {
        let wanted = category.to_lowercase();
        self.categories.nodes.iter().any(|c| {
            c.name.to_lowercase() == wanted
                || c.slug.as_deref().map(str::to_lowercase).as_deref() == Some(wanted.as_str())
        })
    }
}

/// Category node returned by `nodeByUri`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryNode {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub posts: NodeList<Post>,
}

/// Result of `nodeByUri`, discriminated by `__typename`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum UriNode {
    Post(Post),
    Page(Post),
    Category(CategoryNode),
    #[serde(other)]
    Other,
}

impl UriNode {
    /// Article-like content (post or page)
    pub fn as_post(&self) -> Option<&Post> {
        match self {
            Self::Post(post) | Self::Page(post) => Some(post),
            _ => None,
        }
    }
}
