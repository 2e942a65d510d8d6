//! Polling adapter
//!
//! Wraps a sound engine that exposes status snapshots instead of events.
//! Each poll diffs the latest snapshot against the previous one.

use async_trait::async_trait;

use super::backend::{AudioBackend, AudioError, BackendEvent};

/// Status snapshot of a sound engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SoundStatus {
    pub is_loaded: bool,
    pub is_playing: bool,
    /// True in exactly one snapshot after playback reaches the end
    pub did_just_finish: bool,
}

#[async_trait]
pub trait SoundEngine: Send {
    async fn load(&mut self, url: &str) -> Result<(), AudioError>;

    fn play(&mut self) -> Result<(), AudioError>;

    fn pause(&mut self) -> Result<(), AudioError>;

    fn unload(&mut self);

    fn status(&mut self) -> SoundStatus;
}

pub struct EngineBackend<S> {
    engine: S,
    last: SoundStatus,
}

impl<S: SoundEngine> EngineBackend<S> {
    pub fn new(engine: S) -> Self {
        Self {
            engine,
            last: SoundStatus::default(),
        }
    }
}

#[async_trait]
impl<S: SoundEngine> AudioBackend for EngineBackend<S> {
    async fn load(&mut self, url: &str) -> Result<(), AudioError> {
        self.engine.unload();
        self.engine.load(url).await?;
        self.last = self.engine.status();
        Ok(())
    }

    fn play(&mut self) -> Result<(), AudioError> {
        self.engine.play()
    }

    fn pause(&mut self) -> Result<(), AudioError> {
        self.engine.pause()
    }

    fn stop(&mut self) {
        self.engine.unload();
        self.last = SoundStatus::default();
    }

    fn poll(&mut self) -> Vec<BackendEvent> {
        let status = self.engine.status();
        let mut events = Vec::new();

        if status.did_just_finish {
            self.last = SoundStatus::default();
            return vec![BackendEvent::Ended];
        }

        if self.last.is_loaded && !status.is_loaded {
            events.push(BackendEvent::Failed("source unloaded".to_string()));
        } else if status.is_playing != self.last.is_playing {
            events.push(if status.is_playing {
                BackendEvent::Playing
            } else {
                BackendEvent::Paused
            });
        }

        self.last = status;
        events
    }
}
