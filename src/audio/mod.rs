//! Podcast playback
//!
//! [`AudioController`] drives a single track through the
//! Idle → Loading → Playing ⇄ Paused cycle on top of a platform
//! [`AudioBackend`]. Two adapters map platform primitives onto the backend:
//! - `element`: event-driven media elements
//! - `engine`: polling sound engines (headless, rodio)

mod backend;
pub mod element;
pub mod engine;
mod headless;
#[cfg(feature = "rodio-playback")]
mod rodio_engine;

pub use backend::{create_backend, element_backend, engine_backend, AudioBackend, AudioError, BackendEvent};
pub use headless::HeadlessEngine;
#[cfg(feature = "rodio-playback")]
pub use rodio_engine::RodioEngine;

use std::fmt;
use std::sync::Arc;

use crate::models::Podcast;
use crate::platform::Notifier;

/// Alert shown when a track cannot be loaded
pub const PLAYBACK_ERROR: &str = "Impossible de lire ce podcast";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Loading,
    Playing,
    Paused,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackState::Idle => write!(f, "idle"),
            PlaybackState::Loading => write!(f, "loading"),
            PlaybackState::Playing => write!(f, "playing"),
            PlaybackState::Paused => write!(f, "paused"),
        }
    }
}

/// Something playable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub id: i64,
    pub title: String,
    pub url: String,
}

impl From<&Podcast> for Track {
    fn from(podcast: &Podcast) -> Self {
        Self {
            id: podcast.id,
            title: podcast.libelle.clone(),
            url: podcast.fichier.clone(),
        }
    }
}

pub struct AudioController {
    backend: Box<dyn AudioBackend>,
    notifier: Arc<dyn Notifier>,
    state: PlaybackState,
    current: Option<Track>,
}

impl AudioController {
    pub fn new(backend: Box<dyn AudioBackend>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            backend,
            notifier,
            state: PlaybackState::Idle,
            current: None,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn current(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    pub fn is_current(&self, id: i64) -> bool {
        self.current.as_ref().is_some_and(|t| t.id == id)
    }

    /// Play `track`, or toggle it when it is already the loaded track
    pub async fn select(&mut self, track: Track) {
        if self.is_current(track.id) && matches!(self.state, PlaybackState::Playing | PlaybackState::Paused) {
            self.toggle();
            return;
        }

        if self.current.is_some() {
            self.backend.stop();
        }

        tracing::debug!("Loading track {} ({})", track.id, track.url);
        self.state = PlaybackState::Loading;
        self.current = Some(track.clone());

        let result = self.backend.load(&track.url).await;
        match result.and_then(|()| self.backend.play()) {
            Ok(()) => self.state = PlaybackState::Playing,
            Err(e) => self.fail(&e),
        }
    }

    /// Swap Playing and Paused; no-op in any other state
    pub fn toggle(&mut self) {
        let result = match self.state {
            PlaybackState::Playing => self.backend.pause().map(|()| PlaybackState::Paused),
            PlaybackState::Paused => self.backend.play().map(|()| PlaybackState::Playing),
            _ => return,
        };
        match result {
            Ok(state) => self.state = state,
            Err(e) => self.fail(&e),
        }
    }

    pub fn stop(&mut self) {
        self.backend.stop();
        self.state = PlaybackState::Idle;
        self.current = None;
    }

    /// Apply status changes reported by the backend since the last call
    pub fn sync(&mut self) -> PlaybackState {
        for event in self.backend.poll() {
            match event {
                BackendEvent::Ended => {
                    tracing::debug!("Track finished");
                    self.state = PlaybackState::Idle;
                    self.current = None;
                }
                BackendEvent::Playing if self.state == PlaybackState::Paused => {
                    self.state = PlaybackState::Playing;
                }
                BackendEvent::Paused if self.state == PlaybackState::Playing => {
                    self.state = PlaybackState::Paused;
                }
                BackendEvent::Failed(message) => self.fail(&AudioError::Device(message)),
                _ => {}
            }
        }
        self.state
    }

    fn fail(&mut self, err: &AudioError) {
        tracing::warn!("Playback failed: {}", err);
        self.backend.stop();
        self.state = PlaybackState::Idle;
        self.current = None;
        self.notifier.alert("Erreur", PLAYBACK_ERROR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::element::tests::FakeElement;
    use crate::audio::element::MediaEvent;
    use crate::testing::RecordingNotifier;

    fn track(id: i64, url: &str) -> Track {
        Track {
            id,
            title: format!("Épisode {}", id),
            url: url.to_string(),
        }
    }

    fn element_controller() -> (AudioController, FakeElement, Arc<RecordingNotifier>) {
        let (element, rx) = FakeElement::new();
        let notifier = Arc::new(RecordingNotifier::default());
        let controller = AudioController::new(element_backend(element.clone(), rx), notifier.clone());
        (controller, element, notifier)
    }

    #[tokio::test]
    async fn test_select_plays_track() {
        let (mut controller, _, _) = element_controller();

        controller.select(track(1, "https://cdn.example.org/1.mp3")).await;

        assert_eq!(controller.state(), PlaybackState::Playing);
        assert!(controller.is_current(1));
    }

    #[tokio::test]
    async fn test_selecting_another_track_stops_the_first() {
        let (mut controller, element, _) = element_controller();

        controller.select(track(1, "https://cdn.example.org/1.mp3")).await;
        controller.select(track(2, "https://cdn.example.org/2.mp3")).await;

        assert_eq!(controller.state(), PlaybackState::Playing);
        assert_eq!(controller.current().map(|t| t.id), Some(2));
        assert_eq!(
            element.log(),
            vec![
                "src https://cdn.example.org/1.mp3",
                "play",
                "reset",
                "src https://cdn.example.org/2.mp3",
                "play"
            ]
        );
    }

    #[tokio::test]
    async fn test_select_current_toggles() {
        let (mut controller, _, _) = element_controller();
        let episode = track(1, "https://cdn.example.org/1.mp3");

        controller.select(episode.clone()).await;
        controller.select(episode.clone()).await;
        assert_eq!(controller.state(), PlaybackState::Paused);

        controller.select(episode).await;
        assert_eq!(controller.state(), PlaybackState::Playing);
    }

    #[tokio::test]
    async fn test_load_failure_alerts_and_returns_to_idle() {
        let (mut controller, _, notifier) = element_controller();

        controller.select(track(3, "https://cdn.example.org/broken.mp3")).await;

        assert_eq!(controller.state(), PlaybackState::Idle);
        assert!(controller.current().is_none());
        assert_eq!(notifier.messages(), vec![PLAYBACK_ERROR.to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_silent_source_alerts_and_returns_to_idle() {
        let (mut controller, element, notifier) = element_controller();

        controller.select(track(4, "https://cdn.example.org/stalled.mp3")).await;

        assert_eq!(controller.state(), PlaybackState::Idle);
        assert!(controller.current().is_none());
        assert_eq!(notifier.messages(), vec![PLAYBACK_ERROR.to_string()]);
        assert_eq!(element.log().last().map(String::as_str), Some("reset"));
    }

    #[tokio::test]
    async fn test_track_end_clears_current() {
        let (mut controller, element, _) = element_controller();

        controller.select(track(1, "https://cdn.example.org/1.mp3")).await;
        element.events.send(MediaEvent::Ended).unwrap();

        assert_eq!(controller.sync(), PlaybackState::Idle);
        assert!(controller.current().is_none());
    }

    #[tokio::test]
    async fn test_external_pause_is_reflected() {
        let (mut controller, element, _) = element_controller();

        controller.select(track(1, "https://cdn.example.org/1.mp3")).await;
        controller.sync();
        element.events.send(MediaEvent::Pause).unwrap();

        assert_eq!(controller.sync(), PlaybackState::Paused);
    }

    #[tokio::test]
    async fn test_headless_engine_contract() {
        let engine = HeadlessEngine::new();
        let notifier = Arc::new(RecordingNotifier::default());
        let mut controller = AudioController::new(engine_backend(engine.clone()), notifier.clone());

        controller.select(track(1, "https://cdn.example.org/1.mp3")).await;
        controller.toggle();
        assert_eq!(controller.sync(), PlaybackState::Paused);

        controller.toggle();
        engine.finish();
        assert_eq!(controller.sync(), PlaybackState::Idle);

        controller.select(track(2, "pas-une-url")).await;
        assert_eq!(controller.state(), PlaybackState::Idle);
        assert_eq!(notifier.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_stop() {
        let (mut controller, _, _) = element_controller();

        controller.select(track(1, "https://cdn.example.org/1.mp3")).await;
        controller.stop();
        controller.toggle();

        assert_eq!(controller.state(), PlaybackState::Idle);
        assert!(!controller.is_current(1));
    }
}
