//! Home screen

use crate::content::media::{embed_source, extract_audio_embed, extract_video_embed, strip_html};
use crate::content::ContentClient;
use crate::models::{FormationPost, MenuItem, Post};
use crate::theme::Palette;

use super::{LoadTrigger, Render};

/// Number of news items shown on the home screen
pub const LATEST_NEWS_COUNT: u32 = 3;

/// Shortcut tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAccess {
    pub label: &'static str,
    pub route: &'static str,
}

pub const QUICK_ACCESS: [QuickAccess; 4] = [
    QuickAccess { label: "Actualités", route: "/actualites" },
    QuickAccess { label: "Événements", route: "/evenements" },
    QuickAccess { label: "Podcasts", route: "/podcasts" },
    QuickAccess { label: "Projets", route: "/projets" },
];

pub struct HomeScreen {
    content: ContentClient,
    pub menu: Vec<MenuItem>,
    pub actualites: Vec<Post>,
    pub podcasts: Vec<Post>,
    pub next_formation: Option<FormationPost>,
    pub loading: bool,
    pub refreshing: bool,
}

impl HomeScreen {
    pub fn new(content: ContentClient) -> Self {
        Self {
            content,
            menu: Vec::new(),
            actualites: Vec::new(),
            podcasts: Vec::new(),
            next_formation: None,
            loading: true,
            refreshing: false,
        }
    }

    /// Fetch every section concurrently; each falls back on its own
    pub async fn load(&mut self, trigger: LoadTrigger) {
        if trigger == LoadTrigger::Refresh {
            self.refreshing = true;
        } else {
            self.loading = true;
        }

        let (menu, actualites, podcasts, next_formation) = futures::join!(
            self.content.nav_menu(),
            self.content.latest_actualites(LATEST_NEWS_COUNT),
            self.content.podcast_posts(),
            self.content.next_formation(),
        );

        self.menu = menu;
        self.actualites = actualites;
        self.podcasts = podcasts;
        self.next_formation = next_formation;
        self.loading = false;
        self.refreshing = false;
    }

    pub fn quick_access(&self) -> &'static [QuickAccess] {
        &QUICK_ACCESS
    }
}

impl Render for HomeScreen {
    fn render(&self, palette: &Palette) -> String {
        if self.loading {
            return "Chargement...\n".to_string();
        }

        let mut out = String::new();
        let menu: Vec<&str> = self.menu.iter().map(|m| m.text.as_str()).collect();
        out.push_str(&format!("{}\n\n", menu.join(" | ")));

        out.push_str(&format!("{}\n", palette.heading("Accès rapide")));
        for entry in &QUICK_ACCESS {
            out.push_str(&format!("  • {} ({})\n", entry.label, entry.route));
        }

        out.push_str(&format!("\n{}\n", palette.heading("Dernières actualités")));
        if self.actualites.is_empty() {
            out.push_str("Aucune actualité disponible.\n");
        }
        for post in &self.actualites {
            out.push_str(&format!("{}{}\n", palette.card_prefix(), post.title));
            let excerpt = strip_html(&post.excerpt);
            if !excerpt.is_empty() {
                out.push_str(&format!("    {}\n", excerpt));
            }
        }

        if let Some(formation) = &self.next_formation {
            out.push_str(&format!("\n{}\n", palette.heading("Prochaine formation")));
            out.push_str(&format!("{}{}", palette.card_prefix(), formation.name()));
            if let Some(date) = formation.date() {
                out.push_str(&format!(" - {}", date.format("%d/%m/%Y")));
            }
            out.push('\n');
        }

        if !self.podcasts.is_empty() {
            out.push_str(&format!("\n{}\n", palette.heading("Podcasts")));
            for post in &self.podcasts {
                out.push_str(&format!("{}{}\n", palette.card_prefix(), post.title));
                if let Some(src) = episode_source(post) {
                    out.push_str(&format!("    ▶ {}\n", src));
                }
            }
        }
        out
    }
}

/// Playable source of a podcast post: the audio embed, else the video one
fn episode_source(post: &Post) -> Option<String> {
    embed_source(&extract_audio_embed(&post.content)).or_else(|| embed_source(&extract_video_embed(&post.content)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{content_client, spawn_cms};
    use serde_json::json;

    #[tokio::test]
    async fn test_home_loads_all_sections() {
        let endpoint = spawn_cms(vec![
            ("menuItems", json!({"menuItems": {"nodes": [
                {"label": "Accueil", "uri": "/", "parentId": null},
                {"label": "Sous-page", "uri": "/a/b", "parentId": "cG9zdDox"}
            ]}})),
            ("LatestByCategory", json!({"posts": {"nodes": [
                {"id": "1", "title": "Budget participatif", "excerpt": "<p>Vote &amp; débat</p>"}
            ]}})),
            ("podcast { type }", json!({"posts": {"nodes": [
                {"id": "2", "title": "Épisode pilote", "content": "<p>Intro</p><audio controls src=\"https://cdn.example.org/ep1.mp3\"></audio>"},
                {"id": "3", "title": "Épisode filmé", "content": "<video src=\"https://cdn.example.org/ep2.mp4\"></video>"},
                {"id": "4", "title": "Épisode texte", "content": "<p>Transcription</p>"}
            ]}})),
            ("formation { nom", json!({"posts": {"nodes": [
                {"slug": "f1", "title": "Atelier", "formation": {"nom": "Atelier civique", "statut": ["À venir"], "date": "20300115"}}
            ]}})),
        ])
        .await;
        let mut screen = HomeScreen::new(content_client(&endpoint));

        screen.load(LoadTrigger::Mount).await;

        assert!(!screen.loading);
        assert_eq!(screen.menu.len(), 1);
        assert_eq!(screen.actualites[0].title, "Budget participatif");
        assert_eq!(screen.podcasts.len(), 3);
        assert_eq!(screen.next_formation.as_ref().map(|f| f.name()), Some("Atelier civique"));

        let text = screen.render(&Palette::LIGHT);
        assert!(text.contains("Vote & débat"));
        assert!(text.contains("15/01/2030"));
        assert!(text.contains("Projets (/projets)"));
        assert!(text.contains("Épisode pilote\n    ▶ https://cdn.example.org/ep1.mp3\n"));
        assert!(text.contains("Épisode filmé\n    ▶ https://cdn.example.org/ep2.mp4\n"));
        assert!(!text.contains("Épisode texte\n    ▶"));
    }

    #[tokio::test]
    async fn test_home_uses_fallbacks_when_cms_is_down() {
        let mut screen = HomeScreen::new(content_client("http://127.0.0.1:9/graphql"));

        screen.load(LoadTrigger::Mount).await;

        let labels: Vec<&str> = screen.menu.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(labels, vec!["Accueil", "FAQ", "Contact"]);
        assert!(screen.actualites.is_empty());
        assert!(screen.next_formation.is_none());
        assert!(screen.render(&Palette::DARK).contains("Aucune actualité disponible."));
    }
}
