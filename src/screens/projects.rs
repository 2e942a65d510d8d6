//! Projects list

use crate::content::media::strip_html;
use crate::content::ContentClient;
use crate::models::Post;
use crate::theme::Palette;

use super::{filter_items, render_list, ListState, LoadTrigger, Render};

const EMPTY_MESSAGE: &str = "Aucun projet trouvé.";

pub struct ProjectsScreen {
    content: ContentClient,
    pub list: ListState<Post>,
    pub query: String,
}

impl ProjectsScreen {
    pub fn new(content: ContentClient) -> Self {
        Self {
            content,
            list: ListState::default(),
            query: String::new(),
        }
    }

    pub async fn load(&mut self, trigger: LoadTrigger) {
        self.list.begin(trigger);
        let projects = self.content.projects().await;
        self.list.finish(Ok::<_, ()>(projects), |_| String::new());
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn visible(&self) -> Vec<&Post> {
        filter_items(&self.list.items, &self.query, |p| format!("{} {}", p.title, strip_html(&p.excerpt)))
    }
}

impl Render for ProjectsScreen {
    fn render(&self, palette: &Palette) -> String {
        render_list(palette, "Projets", &self.list, &self.visible(), EMPTY_MESSAGE, |post| {
            let excerpt = strip_html(&post.excerpt);
            if excerpt.is_empty() {
                post.title.clone()
            } else {
                format!("{}\n    {}", post.title, excerpt)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{content_client, spawn_cms};
    use serde_json::json;

    #[tokio::test]
    async fn test_projects_search() {
        let endpoint = spawn_cms(vec![(
            "\"category\":\"projets\"",
            json!({"posts": {"nodes": [
                {"id": "1", "title": "Jardins partagés", "excerpt": "<p>Quartier de Médina</p>"},
                {"id": "2", "title": "Éclairage solaire", "excerpt": "<p>Pikine</p>"}
            ]}}),
        )])
        .await;
        let mut screen = ProjectsScreen::new(content_client(&endpoint));

        screen.load(LoadTrigger::Mount).await;
        assert_eq!(screen.list.items.len(), 2);

        screen.set_query("médina");
        let titles: Vec<&str> = screen.visible().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Jardins partagés"]);

        screen.set_query("ÉCLAIRAGE");
        assert!(screen.render(&Palette::LIGHT).contains("Éclairage solaire\n    Pikine"));
    }

    #[tokio::test]
    async fn test_unreachable_cms_shows_empty_list() {
        let mut screen = ProjectsScreen::new(content_client("http://127.0.0.1:9/graphql"));

        screen.load(LoadTrigger::Mount).await;

        assert!(screen.list.items.is_empty());
        assert!(screen.render(&Palette::LIGHT).contains(EMPTY_MESSAGE));
    }
}
