//! Content fetchers
//!
//! This module reads public content from the WordPress GraphQL CMS:
//! - Header menu and URI resolution
//! - News (latest, paged, by category)
//! - Podcast, project, realisation, video and magazine posts
//! - Training sessions and team members
//!
//! Every fetcher comes in two flavours. `try_*` methods return a
//! `Result<_, ContentError>`; the plain methods log the error and serve a
//! fallback value instead (empty list, default menu or demo posts), so a
//! screen always has something to render.

mod error;
mod fallback;
mod graphql;
pub mod media;
pub mod pagination;
mod queries;

pub use error::ContentError;
pub use fallback::{default_menu, default_uris, demo_latest_posts, demo_news_posts};
pub use graphql::GraphQlClient;
pub use pagination::{collect_pages, collect_pages_with_retry, Page, PageInfo, RetryPolicy};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::config::CmsConfig;
use crate::models::{FormationPost, Magazine, MenuItem, NodeList, Post, TeamNode, UriNode};

/// Category names used by the CMS
pub mod categories {
    pub const ACTUALITES: &str = "Actualites";
    pub const PODCAST: &str = "Podcast";
    pub const PROJETS: &str = "projets";
    pub const REALISATIONS: &str = "Realisations";
    pub const VIDEOS: &str = "Videos";
}

/// Per-fetcher timeouts
#[derive(Debug, Clone, Copy)]
pub struct FetchTimeouts {
    pub menu: Duration,
    pub node: Duration,
    /// Applied to each page of the URI listing
    pub uris: Duration,
    pub latest: Duration,
    /// Applied to each page of the news listing
    pub news: Duration,
    /// Every other query
    pub default: Duration,
}

impl FetchTimeouts {
    pub fn uniform(timeout: Duration) -> Self {
        Self {
            menu: timeout,
            node: timeout,
            uris: timeout,
            latest: timeout,
            news: timeout,
            default: timeout,
        }
    }
}

impl Default for FetchTimeouts {
    fn default() -> Self {
        Self {
            menu: Duration::from_secs(8),
            node: Duration::from_secs(8),
            uris: Duration::from_secs(8),
            latest: Duration::from_secs(10),
            news: Duration::from_secs(15),
            default: Duration::from_secs(10),
        }
    }
}

/// Connection whose `nodes` must be present
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Connection<T> {
    nodes: Vec<T>,
    #[serde(default)]
    page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MenuData {
    menu_items: Connection<MenuItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeData {
    node_by_uri: Option<UriNode>,
}

#[derive(Debug, Deserialize)]
struct UriRef {
    uri: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UrisData {
    posts: Connection<UriRef>,
    #[serde(default)]
    pages: Option<NodeList<UriRef>>,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct PostsData<T> {
    posts: Connection<T>,
}

#[derive(Debug, Deserialize)]
struct PostData {
    post: Option<Post>,
}

#[derive(Debug, Deserialize)]
struct TeamData {
    equipes: Connection<TeamNode>,
}

/// Strip the surrounding slashes of a CMS uri and percent-decode it
fn clean_uri(uri: &str) -> String {
    let trimmed = uri.strip_prefix('/').unwrap_or(uri);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    urlencoding::decode(trimmed)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| trimmed.to_string())
}

fn or_fallback<T>(what: &str, result: Result<T, ContentError>, fallback: impl FnOnce() -> T) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Failed to fetch {}: {}, using fallback", what, e);
            fallback()
        }
    }
}

/// Client for the CMS GraphQL endpoints
#[derive(Debug, Clone)]
pub struct ContentClient {
    primary: GraphQlClient,
    secondary: GraphQlClient,
    timeouts: FetchTimeouts,
    retry: RetryPolicy,
}

impl ContentClient {
    /// Create a client from configuration
    pub fn new(config: &CmsConfig) -> Result<Self, ContentError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("citizenlab/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ContentError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_endpoints(http, &config.endpoint, config.secondary())
            .with_timeouts(FetchTimeouts {
                default: config.timeout(),
                ..FetchTimeouts::default()
            }))
    }

    pub fn with_endpoints(http: reqwest::Client, primary: &str, secondary: &str) -> Self {
        Self {
            primary: GraphQlClient::new(http.clone(), primary),
            secondary: GraphQlClient::new(http, secondary),
            timeouts: FetchTimeouts::default(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_timeouts(mut self, timeouts: FetchTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn timeouts(&self) -> &FetchTimeouts {
        &self.timeouts
    }

    async fn category_posts<T: DeserializeOwned>(
        &self,
        client: &GraphQlClient,
        category: &str,
        first: u32,
    ) -> Result<Vec<T>, ContentError> {
        let data: PostsData<T> = client
            .query(
                queries::POSTS_BY_CATEGORY,
                Some(json!({ "category": category, "first": first })),
                self.timeouts.default,
            )
            .await?;
        Ok(data.posts.nodes)
    }

    // ------------------------------------------------------------------
    // Menu and routing
    // ------------------------------------------------------------------

    /// Top-level header menu entries
    pub async fn try_nav_menu(&self) -> Result<Vec<MenuItem>, ContentError> {
        let data: MenuData = self
            .primary
            .query(queries::NAV_MENU, None, self.timeouts.menu)
            .await?;
        Ok(data.menu_items.nodes.into_iter().filter(MenuItem::is_root).collect())
    }

    pub async fn nav_menu(&self) -> Vec<MenuItem> {
        or_fallback("menu", self.try_nav_menu().await, default_menu)
    }

    /// Resolve a URI to its post, page or category
    pub async fn try_node_by_uri(&self, uri: &str) -> Result<Option<UriNode>, ContentError> {
        let data: NodeData = self
            .primary
            .query(queries::NODE_BY_URI, Some(json!({ "uri": uri })), self.timeouts.node)
            .await?;
        Ok(data.node_by_uri)
    }

    pub async fn node_by_uri(&self, uri: &str) -> Option<UriNode> {
        or_fallback("node by uri", self.try_node_by_uri(uri).await, || None)
    }

    /// Every post and page URI, cleaned for routing.
    ///
    /// Pages that keep failing end the listing; what was collected before
    /// is still returned.
    pub async fn try_all_uris(&self) -> Result<Vec<String>, ContentError> {
        let client = &self.primary;
        let timeout = self.timeouts.uris;

        let collected = collect_pages_with_retry(
            |after: Option<String>| async move {
                let first_page = after.is_none();
                let data: UrisData = client
                    .query(queries::ALL_URIS, Some(json!({ "after": after })), timeout)
                    .await?;
                let mut refs = data.posts.nodes;
                if first_page {
                    refs.extend(data.pages.map(|p| p.nodes).unwrap_or_default());
                }
                Ok::<_, ContentError>(Page::new(refs, data.posts.page_info))
            },
            self.retry,
        )
        .await;

        let uris: Vec<String> = collected
            .items
            .iter()
            .filter_map(|r| r.uri.as_deref())
            .map(clean_uri)
            .collect();

        match collected.error {
            Some(e) if uris.is_empty() => Err(e),
            Some(e) => {
                tracing::warn!("URI listing incomplete ({} collected): {}", uris.len(), e);
                Ok(uris)
            }
            None => Ok(uris),
        }
    }

    pub async fn all_uris(&self) -> Vec<String> {
        let uris = or_fallback("uris", self.try_all_uris().await, default_uris);
        if uris.is_empty() {
            default_uris()
        } else {
            uris
        }
    }

    // ------------------------------------------------------------------
    // News
    // ------------------------------------------------------------------

    /// The eight most recent posts
    pub async fn try_latest_posts(&self) -> Result<Vec<Post>, ContentError> {
        let data: PostsData<Post> = self
            .primary
            .query(queries::LATEST_POSTS, None, self.timeouts.latest)
            .await?;
        Ok(data.posts.nodes)
    }

    pub async fn latest_posts(&self) -> Vec<Post> {
        or_fallback("latest posts", self.try_latest_posts().await, demo_latest_posts)
    }

    /// Every post, following the cursor until the last page
    pub async fn try_news_posts(&self) -> Result<Vec<Post>, ContentError> {
        let client = &self.primary;
        let timeout = self.timeouts.news;

        collect_pages(|after: Option<String>| async move {
            let data: PostsData<Post> = client
                .query(queries::NEWS_POSTS, Some(json!({ "after": after })), timeout)
                .await?;
            Ok::<_, ContentError>(Page::new(data.posts.nodes, data.posts.page_info))
        })
        .await
    }

    pub async fn news_posts(&self) -> Vec<Post> {
        or_fallback("news posts", self.try_news_posts().await, demo_news_posts)
    }

    /// Published posts of a category
    pub async fn try_posts_by_category(&self, category: &str, first: u32) -> Result<Vec<Post>, ContentError> {
        self.category_posts(&self.primary, category, first).await
    }

    pub async fn posts_by_category(&self, category: &str, first: u32) -> Vec<Post> {
        or_fallback(category, self.try_posts_by_category(category, first).await, Vec::new)
    }

    /// Most recent "Actualites" posts, newest first
    pub async fn try_latest_actualites(&self, limit: u32) -> Result<Vec<Post>, ContentError> {
        let data: PostsData<Post> = self
            .primary
            .query(
                queries::LATEST_BY_CATEGORY,
                Some(json!({ "category": categories::ACTUALITES, "limit": limit })),
                self.timeouts.default,
            )
            .await?;
        Ok(data.posts.nodes)
    }

    pub async fn latest_actualites(&self, limit: u32) -> Vec<Post> {
        or_fallback("latest actualites", self.try_latest_actualites(limit).await, Vec::new)
    }

    /// Full "Actualites" listing from the secondary CMS
    pub async fn try_all_actualites(&self) -> Result<Vec<Post>, ContentError> {
        self.category_posts(&self.secondary, categories::ACTUALITES, 100).await
    }

    pub async fn all_actualites(&self) -> Vec<Post> {
        or_fallback("actualites", self.try_all_actualites().await, Vec::new)
    }

    // ------------------------------------------------------------------
    // Category listings
    // ------------------------------------------------------------------

    pub async fn try_podcast_posts(&self) -> Result<Vec<Post>, ContentError> {
        let data: PostsData<Post> = self
            .primary
            .query(queries::PODCAST_POSTS, None, self.timeouts.default)
            .await?;
        Ok(data.posts.nodes)
    }

    pub async fn podcast_posts(&self) -> Vec<Post> {
        or_fallback("podcast posts", self.try_podcast_posts().await, Vec::new)
    }

    pub async fn try_projects(&self) -> Result<Vec<Post>, ContentError> {
        self.category_posts(&self.primary, categories::PROJETS, 100).await
    }

    pub async fn projects(&self) -> Vec<Post> {
        or_fallback("projects", self.try_projects().await, Vec::new)
    }

    pub async fn try_realisations(&self) -> Result<Vec<Post>, ContentError> {
        self.category_posts(&self.primary, categories::REALISATIONS, 50).await
    }

    pub async fn realisations(&self) -> Vec<Post> {
        or_fallback("realisations", self.try_realisations().await, Vec::new)
    }

    pub async fn try_realisation_by_slug(&self, slug: &str) -> Result<Option<Post>, ContentError> {
        let data: PostData = self
            .primary
            .query(queries::REALISATION_BY_SLUG, Some(json!({ "slug": slug })), self.timeouts.default)
            .await?;
        Ok(data.post)
    }

    pub async fn realisation_by_slug(&self, slug: &str) -> Option<Post> {
        or_fallback("realisation", self.try_realisation_by_slug(slug).await, || None)
    }

    pub async fn try_videos(&self) -> Result<Vec<Post>, ContentError> {
        self.category_posts(&self.primary, categories::VIDEOS, 100).await
    }

    pub async fn videos(&self) -> Vec<Post> {
        or_fallback("videos", self.try_videos().await, Vec::new)
    }

    pub async fn try_magazines(&self) -> Result<Vec<Magazine>, ContentError> {
        let data: PostsData<Magazine> = self
            .primary
            .query(queries::MAGAZINES, None, self.timeouts.default)
            .await?;
        Ok(data.posts.nodes)
    }

    pub async fn magazines(&self) -> Vec<Magazine> {
        or_fallback("magazines", self.try_magazines().await, Vec::new)
    }

    // ------------------------------------------------------------------
    // Training sessions and team
    // ------------------------------------------------------------------

    pub async fn try_formations(&self) -> Result<Vec<FormationPost>, ContentError> {
        let data: PostsData<FormationPost> = self
            .primary
            .query(queries::FORMATIONS, None, self.timeouts.default)
            .await?;
        Ok(data.posts.nodes)
    }

    pub async fn formations(&self) -> Vec<FormationPost> {
        or_fallback("formations", self.try_formations().await, Vec::new)
    }

    /// Earliest upcoming training session
    pub async fn try_next_formation(&self) -> Result<Option<FormationPost>, ContentError> {
        let mut upcoming: Vec<FormationPost> = self
            .try_formations()
            .await?
            .into_iter()
            .filter(FormationPost::is_upcoming)
            .collect();

        // Undated sessions sort last
        upcoming.sort_by_key(|f| (f.date().is_none(), f.date()));
        Ok(upcoming.into_iter().next())
    }

    pub async fn next_formation(&self) -> Option<FormationPost> {
        or_fallback("next formation", self.try_next_formation().await, || None)
    }

    /// Published team members, from the secondary CMS
    pub async fn try_team_members(&self) -> Result<Vec<TeamNode>, ContentError> {
        let data: TeamData = self
            .secondary
            .query(queries::TEAM_MEMBERS, None, self.timeouts.default)
            .await?;
        Ok(data.equipes.nodes)
    }

    pub async fn team_members(&self) -> Vec<TeamNode> {
        or_fallback("team members", self.try_team_members().await, Vec::new)
    }
}
