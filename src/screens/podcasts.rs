//! Podcast administration: list, search, playback and deletion

use std::sync::Arc;

use crate::audio::{AudioController, PlaybackState, Track};
use crate::models::Podcast;
use crate::platform::Notifier;
use crate::services::PodcastApi;
use crate::theme::Palette;

use super::{filter_items, render_list, ListState, LoadTrigger, Render};

pub const LOAD_ERROR: &str = "Impossible de charger les podcasts";
pub const DELETED_MESSAGE: &str = "Podcast supprimé";
pub const DELETE_ERROR: &str = "Impossible de supprimer";

pub struct PodcastAdminScreen {
    api: Arc<dyn PodcastApi>,
    notifier: Arc<dyn Notifier>,
    pub audio: AudioController,
    pub list: ListState<Podcast>,
    pub query: String,
    pub selected: Option<i64>,
}

impl PodcastAdminScreen {
    pub fn new(api: Arc<dyn PodcastApi>, notifier: Arc<dyn Notifier>, audio: AudioController) -> Self {
        Self {
            api,
            notifier,
            audio,
            list: ListState::default(),
            query: String::new(),
            selected: None,
        }
    }

    pub async fn load(&mut self, trigger: LoadTrigger) {
        self.list.begin(trigger);
        let result = self.api.list_podcasts().await;
        if let Err(e) = &result {
            tracing::error!("Failed to load podcasts: {}", e);
            self.notifier.alert("Erreur", LOAD_ERROR);
        }
        self.list.finish(result, |_| LOAD_ERROR.to_string());
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn visible(&self) -> Vec<&Podcast> {
        filter_items(&self.list.items, &self.query, Podcast::search_text)
    }

    /// `1 épisode`, `3 épisodes`
    pub fn count_label(&self) -> String {
        let count = self.visible().len();
        format!("{} {}", count, if count > 1 { "épisodes" } else { "épisode" })
    }

    fn find(&self, id: i64) -> Option<&Podcast> {
        self.list.items.iter().find(|p| p.id == id)
    }

    pub fn select(&mut self, id: i64) {
        if self.find(id).is_some() {
            self.selected = Some(id);
        }
    }

    pub fn close_details(&mut self) {
        self.selected = None;
    }

    pub fn selected_podcast(&self) -> Option<&Podcast> {
        self.selected.and_then(|id| self.find(id))
    }

    /// Play, pause or resume the podcast
    pub async fn play(&mut self, id: i64) {
        let Some(track) = self.find(id).map(Track::from) else {
            return;
        };
        self.audio.select(track).await;
    }

    pub fn stop(&mut self) {
        self.audio.stop();
    }

    /// Delete a podcast, stopping playback first when it is the current track
    pub async fn delete(&mut self, id: i64) -> bool {
        if self.audio.is_current(id) {
            self.audio.stop();
        }

        match self.api.delete_podcast(id).await {
            Ok(()) => {
                self.list.items.retain(|p| p.id != id);
                if self.selected == Some(id) {
                    self.selected = None;
                }
                self.notifier.alert("Succès", DELETED_MESSAGE);
                true
            }
            Err(e) => {
                tracing::error!("Failed to delete podcast {}: {}", id, e);
                self.notifier.alert("Erreur", DELETE_ERROR);
                false
            }
        }
    }

    fn marker(&self, podcast: &Podcast) -> &'static str {
        if !self.audio.is_current(podcast.id) {
            return "  ";
        }
        match self.audio.state() {
            PlaybackState::Playing => "▶ ",
            PlaybackState::Paused => "⏸ ",
            PlaybackState::Loading => "… ",
            PlaybackState::Idle => "  ",
        }
    }
}

impl Render for PodcastAdminScreen {
    fn render(&self, palette: &Palette) -> String {
        let mut out = format!("{}\n", self.count_label());
        out.push_str(&render_list(
            palette,
            "Podcasts",
            &self.list,
            &self.visible(),
            "Aucun podcast trouvé.",
            |p| format!("{}{}\n    {} · {}", self.marker(p), p.libelle, p.author_name(), p.category_name()),
        ));

        if let Some(podcast) = self.selected_podcast() {
            out.push_str(&format!("\n{}\n", palette.heading(&podcast.libelle)));
            out.push_str(&format!("Auteur: {}\nCatégorie: {}\n", podcast.author_name(), podcast.category_name()));
            if !podcast.description.is_empty() {
                out.push_str(&format!("{}\n", podcast.description));
            }
            let file = podcast.fichier.rsplit('/').next().unwrap_or_default();
            out.push_str(&format!("Fichier: {}\n", file));
        }

        if let Some(track) = self.audio.current() {
            out.push_str(&format!("\n{} {} ({})\n", palette.heading("Lecture"), track.title, self.audio.state()));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{engine_backend, HeadlessEngine};
    use crate::testing::{podcast, FakeBackend, RecordingNotifier};

    fn screen_with(podcasts: Vec<Podcast>) -> (PodcastAdminScreen, Arc<FakeBackend>, Arc<RecordingNotifier>) {
        let backend = Arc::new(FakeBackend::default());
        *backend.podcasts.lock().unwrap() = podcasts;
        let notifier = Arc::new(RecordingNotifier::default());
        let audio = AudioController::new(engine_backend(HeadlessEngine::new()), notifier.clone());
        let screen = PodcastAdminScreen::new(backend.clone(), notifier.clone(), audio);
        (screen, backend, notifier)
    }

    fn sample() -> Vec<Podcast> {
        vec![
            podcast(1, "Voix citoyennes", ("Mariama", "Diallo"), "Société"),
            podcast(2, "Budget ouvert", ("Ousmane", "Ba"), "Gouvernance"),
            podcast(3, "Jeunesse et vote", ("Awa", "Ndiaye"), "Société"),
        ]
    }

    #[tokio::test]
    async fn test_search_over_title_author_and_category() {
        let (mut screen, _, _) = screen_with(sample());
        screen.load(LoadTrigger::Mount).await;

        screen.set_query("société");
        assert_eq!(screen.visible().len(), 2);
        assert_eq!(screen.count_label(), "2 épisodes");

        screen.set_query("BA");
        let titles: Vec<&str> = screen.visible().iter().map(|p| p.libelle.as_str()).collect();
        assert_eq!(titles, vec!["Budget ouvert"]);
        assert_eq!(screen.count_label(), "1 épisode");
    }

    #[tokio::test]
    async fn test_load_failure_alerts() {
        let (mut screen, backend, notifier) = screen_with(sample());
        backend.fail_with(500, "boom");

        screen.load(LoadTrigger::Mount).await;

        assert_eq!(notifier.messages(), vec![LOAD_ERROR]);
        assert_eq!(screen.list.error.as_deref(), Some(LOAD_ERROR));
    }

    #[tokio::test]
    async fn test_playing_another_podcast_switches_track() {
        let (mut screen, _, _) = screen_with(sample());
        screen.load(LoadTrigger::Mount).await;

        screen.play(1).await;
        screen.play(2).await;

        assert!(screen.audio.is_current(2));
        assert_eq!(screen.audio.state(), PlaybackState::Playing);
        assert!(screen.render(&Palette::LIGHT).contains("▶ Budget ouvert"));

        screen.play(2).await;
        assert_eq!(screen.audio.state(), PlaybackState::Paused);
    }

    #[tokio::test]
    async fn test_delete_current_track_stops_playback() {
        let (mut screen, backend, notifier) = screen_with(sample());
        screen.load(LoadTrigger::Mount).await;
        screen.select(1);
        screen.play(1).await;

        assert!(screen.delete(1).await);

        assert_eq!(screen.audio.state(), PlaybackState::Idle);
        assert!(screen.audio.current().is_none());
        assert!(screen.selected.is_none());
        assert_eq!(screen.list.items.len(), 2);
        assert_eq!(notifier.messages(), vec![DELETED_MESSAGE]);
        assert_eq!(backend.calls().last().map(String::as_str), Some("delete_podcast 1"));
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_item() {
        let (mut screen, backend, notifier) = screen_with(sample());
        screen.load(LoadTrigger::Mount).await;
        screen.play(2).await;
        backend.fail_with(500, "x");

        assert!(!screen.delete(3).await);

        assert_eq!(screen.list.items.len(), 3);
        assert!(screen.audio.is_current(2));
        assert_eq!(notifier.messages(), vec![DELETE_ERROR]);
    }

    #[tokio::test]
    async fn test_details() {
        let (mut screen, _, _) = screen_with(sample());
        screen.load(LoadTrigger::Mount).await;
        screen.select(3);

        let text = screen.render(&Palette::LIGHT);
        assert!(text.contains("Auteur: Awa Ndiaye"));
        assert!(text.contains("Fichier: 3.mp3"));

        screen.close_details();
        assert!(screen.selected_podcast().is_none());
    }
}
