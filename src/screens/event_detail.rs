//! Event detail

use std::sync::Arc;

use crate::models::{Evenement, ModeEvenement};
use crate::platform::LinkOpener;
use crate::services::EventApi;
use crate::theme::Palette;

use super::events::short_month;
use super::Render;

const LOAD_ERROR: &str = "Impossible de charger l'événement";

pub struct EventDetailScreen {
    api: Arc<dyn EventApi>,
    pub id: i64,
    pub event: Option<Evenement>,
    pub loading: bool,
    pub error: Option<String>,
}

impl EventDetailScreen {
    pub fn new(api: Arc<dyn EventApi>, id: i64) -> Self {
        Self {
            api,
            id,
            event: None,
            loading: true,
            error: None,
        }
    }

    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;
        match self.api.get_evenement(self.id).await {
            Ok(event) => self.event = Some(event),
            Err(e) => {
                tracing::error!("Failed to load event {}: {}", self.id, e);
                self.error = Some(e.user_message(LOAD_ERROR));
            }
        }
        self.loading = false;
    }

    /// Where "open" leads: the meeting link for online events, a map search otherwise
    pub fn destination(&self) -> Option<String> {
        let event = self.event.as_ref()?;
        match event.mode() {
            ModeEvenement::Enligne => event.lien.clone(),
            ModeEvenement::Presentiel => event
                .lieu
                .as_deref()
                .filter(|l| !l.trim().is_empty())
                .map(|l| format!("https://www.google.com/maps/search/?api=1&query={}", urlencoding::encode(l.trim()))),
        }
    }

    /// Open the destination; `false` when there is nowhere to go
    pub fn open(&self, opener: &dyn LinkOpener) -> anyhow::Result<bool> {
        match self.destination() {
            Some(url) => opener.open(&url).map(|()| true),
            None => Ok(false),
        }
    }
}

impl Render for EventDetailScreen {
    fn render(&self, palette: &Palette) -> String {
        if self.loading {
            return "Chargement...\n".to_string();
        }
        if let Some(error) = &self.error {
            return format!("{}\n", error);
        }
        let Some(event) = &self.event else {
            return String::new();
        };

        let mut out = format!("[{}]\n{}\n\n", event.type_badge(), palette.heading(&event.libelle));

        let date = match (event.start_date(), event.end_date()) {
            (Some(start), Some(end)) if end != start => format!(
                "Du {} {} au {} {}",
                start.format("%d"),
                short_month(start),
                end.format("%d"),
                short_month(end)
            ),
            (Some(start), _) => format!("{} {} {}", start.format("%d"), short_month(start), start.format("%Y")),
            _ => event.date_debut.clone(),
        };
        out.push_str(&format!("{}\n", date));

        let end_time = event.heure_fin.as_deref().filter(|h| !h.is_empty()).map(|h| h.chars().take(5).collect::<String>());
        match end_time {
            Some(end) => out.push_str(&format!("{} - {}\n", event.start_time(), end)),
            None => out.push_str(&format!("{}\n", event.start_time())),
        }

        let mode = match event.mode() {
            ModeEvenement::Presentiel => "Présentiel",
            ModeEvenement::Enligne => "En ligne",
        };
        out.push_str(&format!("{} - {}\n", mode, event.location()));

        if let Some(image) = event.image.as_deref().filter(|p| !p.is_empty()) {
            out.push_str(&format!("{}\n", self.api.image_url(image)));
        }

        if !event.intervenants.is_empty() {
            out.push_str(&format!("\n{}\n", palette.heading("Intervenants")));
            for speaker in &event.intervenants {
                out.push_str(&format!("{}{}\n", palette.card_prefix(), speaker.full_name()));
            }
        }

        if !event.description.is_empty() {
            out.push_str(&format!("\n{}\n", event.description));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{evenement, FakeBackend};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingOpener(Mutex<Vec<String>>);

    impl LinkOpener for RecordingOpener {
        fn open(&self, url: &str) -> anyhow::Result<()> {
            self.0.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    fn backend_with(event: Evenement) -> Arc<FakeBackend> {
        let backend = Arc::new(FakeBackend::default());
        backend.evenements.lock().unwrap().push(event);
        backend
    }

    #[tokio::test]
    async fn test_detail_renders_event() {
        let mut event = evenement(4, "Sommet citoyen", "2026-01-24");
        event.date_fin = "2026-01-25".into();
        event.heure_debut = Some("09:00:00".into());
        event.heure_fin = Some("17:00".into());
        event.lieu = Some("Place de l'Indépendance, Dakar".into());
        event.image = Some("evenements/sommet.jpg".into());
        event.intervenants = vec![serde_json::from_value(serde_json::json!({"prenom": "Amy", "nom": "Sall"})).unwrap()];
        let mut screen = EventDetailScreen::new(backend_with(event), 4);

        screen.load().await;
        let text = screen.render(&Palette::LIGHT);

        assert!(text.contains("Du 24 janv. au 25 janv."));
        assert!(text.contains("09:00 - 17:00"));
        assert!(text.contains("Présentiel - Place de l'Indépendance, Dakar"));
        assert!(text.contains("http://backend.test/storage/evenements/sommet.jpg"));
        assert!(text.contains("Amy Sall"));
    }

    #[tokio::test]
    async fn test_open_location_and_link() {
        let mut event = evenement(1, "Forum", "2026-01-24");
        event.lieu = Some("Thiès centre".into());
        let mut screen = EventDetailScreen::new(backend_with(event), 1);
        screen.load().await;
        let opener = RecordingOpener::default();

        assert!(screen.open(&opener).unwrap());
        assert_eq!(
            opener.0.lock().unwrap()[0],
            "https://www.google.com/maps/search/?api=1&query=Thi%C3%A8s%20centre"
        );

        let mut online = evenement(2, "Webinaire", "2026-01-24");
        online.lien = Some("https://meet.example.org/x".into());
        let mut screen = EventDetailScreen::new(backend_with(online), 2);
        screen.load().await;
        assert_eq!(screen.destination().as_deref(), Some("https://meet.example.org/x"));
    }

    #[tokio::test]
    async fn test_missing_event_shows_error() {
        let mut screen = EventDetailScreen::new(Arc::new(FakeBackend::default()), 9);

        screen.load().await;

        assert!(screen.event.is_none());
        assert_eq!(screen.render(&Palette::LIGHT), "Erreur lors de la récupération de l'événement\n");
    }
}
