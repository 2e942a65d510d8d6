//! Playback backend capability

use async_trait::async_trait;
use thiserror::Error;

use super::element::{ElementBackend, MediaElement};
use super::engine::{EngineBackend, SoundEngine};
use super::headless::HeadlessEngine;
use crate::config::{AudioBackendKind, AudioConfig};

/// Audio errors
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("Invalid audio source: {0}")]
    InvalidSource(String),

    #[error("Failed to load audio: {0}")]
    Load(String),

    #[error("Audio device error: {0}")]
    Device(String),

    #[error("No track loaded")]
    NotLoaded,

    #[error("Unsupported audio backend: {0}")]
    Unsupported(String),
}

/// Status change reported by a backend between two polls
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendEvent {
    Playing,
    Paused,
    Ended,
    Failed(String),
}

/// Platform playback backend.
///
/// Implementations hold at most one loaded source; `load` replaces it.
#[async_trait]
pub trait AudioBackend: Send {
    /// Load `url` and resolve once it is ready to play
    async fn load(&mut self, url: &str) -> Result<(), AudioError>;

    fn play(&mut self) -> Result<(), AudioError>;

    fn pause(&mut self) -> Result<(), AudioError>;

    /// Unload the current source and discard pending events
    fn stop(&mut self);

    /// Events observed since the previous call
    fn poll(&mut self) -> Vec<BackendEvent>;
}

/// Create the backend selected in configuration
pub fn create_backend(config: &AudioConfig) -> Result<Box<dyn AudioBackend>, AudioError> {
    match config.backend {
        AudioBackendKind::Headless => Ok(Box::new(EngineBackend::new(HeadlessEngine::new()))),
        AudioBackendKind::Rodio => {
            #[cfg(feature = "rodio-playback")]
            {
                let engine = super::rodio_engine::RodioEngine::spawn()?;
                Ok(Box::new(EngineBackend::new(engine)))
            }

            #[cfg(not(feature = "rodio-playback"))]
            {
                Err(AudioError::Unsupported(
                    "the 'rodio' backend is configured but the 'rodio-playback' feature is not enabled. \
                     Either build with `--features rodio-playback` or use the 'headless' backend."
                        .to_string(),
                ))
            }
        }
    }
}

/// Wrap an event-driven media element
pub fn element_backend<E: MediaElement + 'static>(
    element: E,
    events: tokio::sync::mpsc::UnboundedReceiver<super::element::MediaEvent>,
) -> Box<dyn AudioBackend> {
    Box::new(ElementBackend::new(element, events))
}

/// Wrap a polling sound engine
pub fn engine_backend<S: SoundEngine + 'static>(engine: S) -> Box<dyn AudioBackend> {
    Box::new(EngineBackend::new(engine))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_headless_backend() {
        let mut backend = create_backend(&AudioConfig::default()).unwrap();

        backend.load("https://cdn.example.org/episode.mp3").await.unwrap();
        backend.play().unwrap();

        assert_eq!(backend.poll(), vec![BackendEvent::Playing]);
    }

    #[cfg(not(feature = "rodio-playback"))]
    #[test]
    fn test_rodio_backend_requires_feature() {
        let config = AudioConfig {
            backend: AudioBackendKind::Rodio,
        };

        let result = create_backend(&config);
        assert!(matches!(result, Err(AudioError::Unsupported(_))));
    }
}
