//! Team members

use crate::content::ContentClient;
use crate::models::TeamMember;
use crate::theme::Palette;

use super::{render_list, ListState, LoadTrigger, Render};

pub const LOAD_ERROR: &str =
    "Impossible de charger les données de l'équipe. Vérifiez l'URL de l'API et le réseau.";
const EMPTY_MESSAGE: &str = "Aucun membre de l'équipe n'est disponible pour le moment.";

pub struct TeamScreen {
    content: ContentClient,
    pub list: ListState<TeamMember>,
}

impl TeamScreen {
    pub fn new(content: ContentClient) -> Self {
        Self {
            content,
            list: ListState::default(),
        }
    }

    pub async fn load(&mut self, trigger: LoadTrigger) {
        self.list.begin(trigger);
        let result = self.content.try_team_members().await.map(|nodes| {
            nodes
                .iter()
                .enumerate()
                .map(|(index, node)| TeamMember::from_node(node, index))
                .collect::<Vec<_>>()
        });
        if let Err(e) = &result {
            tracing::error!("Failed to load team members: {}", e);
        }
        self.list.finish(result, |_| LOAD_ERROR.to_string());
    }
}

impl Render for TeamScreen {
    fn render(&self, palette: &Palette) -> String {
        let rows: Vec<&TeamMember> = self.list.items.iter().collect();
        render_list(palette, "Notre équipe", &self.list, &rows, EMPTY_MESSAGE, |member| {
            let mut row = format!("{}\n    {}", member.name, member.position);
            if !member.description.is_empty() {
                row.push_str(&format!(" · {}", member.description));
            }
            for social in &member.socials {
                row.push_str(&format!(
                    "\n    {} {}",
                    Palette::paint(social.platform.color(), &social.platform.to_string()),
                    social.url
                ));
            }
            row
        })
    }
}
