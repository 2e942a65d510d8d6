//! News list and article detail

use crate::content::media::strip_html;
use crate::content::ContentClient;
use crate::models::Post;
use crate::theme::Palette;

use super::{filter_items, render_list, ListState, LoadTrigger, Render};

const EMPTY_MESSAGE: &str = "Aucune actualité pour le moment.";
const NOT_FOUND: &str = "Article introuvable.";

fn post_date(post: &Post) -> String {
    post.published_at()
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

pub struct NewsScreen {
    content: ContentClient,
    pub list: ListState<Post>,
    pub query: String,
}

impl NewsScreen {
    pub fn new(content: ContentClient) -> Self {
        Self {
            content,
            list: ListState::default(),
            query: String::new(),
        }
    }

    pub async fn load(&mut self, trigger: LoadTrigger) {
        self.list.begin(trigger);
        let posts = self.content.all_actualites().await;
        self.list.finish(Ok::<_, ()>(posts), |_| String::new());
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn visible(&self) -> Vec<&Post> {
        filter_items(&self.list.items, &self.query, |p| format!("{} {}", p.title, strip_html(&p.excerpt)))
    }
}

impl Render for NewsScreen {
    fn render(&self, palette: &Palette) -> String {
        render_list(palette, "Actualités", &self.list, &self.visible(), EMPTY_MESSAGE, |post| {
            let date = post_date(post);
            if date.is_empty() {
                post.title.clone()
            } else {
                format!("{}  ({})", post.title, date)
            }
        })
    }
}

/// Single article resolved by URI
pub struct NewsDetailScreen {
    content: ContentClient,
    pub uri: String,
    pub post: Option<Post>,
    pub loading: bool,
}

impl NewsDetailScreen {
    pub fn new(content: ContentClient, uri: impl Into<String>) -> Self {
        Self {
            content,
            uri: uri.into(),
            post: None,
            loading: true,
        }
    }

    pub async fn load(&mut self) {
        self.loading = true;
        self.post = self
            .content
            .node_by_uri(&self.uri)
            .await
            .and_then(|node| node.as_post().cloned());
        self.loading = false;
    }
}

impl Render for NewsDetailScreen {
    fn render(&self, palette: &Palette) -> String {
        if self.loading {
            return "Chargement...\n".to_string();
        }
        let Some(post) = &self.post else {
            return format!("{}\n", NOT_FOUND);
        };

        let badge = post.primary_category().unwrap_or("Actualités");
        let mut out = format!("[{}]\n{}\n", badge, palette.heading(&post.title));
        let date = post_date(post);
        if !date.is_empty() {
            out.push_str(&format!("{}\n", date));
        }
        if let Some(image) = post.image().and_then(|i| i.url()) {
            out.push_str(&format!("{}\n", image));
        }
        out.push('\n');
        out.push_str(&strip_html(&post.content));
        out.push('\n');
        out
    }
}
