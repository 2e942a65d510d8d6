//! Headless sound engine
//!
//! Tracks playback state without producing sound. Used by the terminal
//! front-end and wherever no audio device is available.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::backend::AudioError;
use super::engine::{SoundEngine, SoundStatus};

#[derive(Debug, Default)]
struct State {
    source: Option<reqwest::Url>,
    status: SoundStatus,
}

/// Cloning shares the underlying state
#[derive(Debug, Clone, Default)]
pub struct HeadlessEngine {
    state: Arc<Mutex<State>>,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn source(&self) -> Option<String> {
        self.state().source.as_ref().map(|u| u.to_string())
    }

    /// Mark the loaded source as played to the end
    pub fn finish(&self) {
        let mut state = self.state();
        if state.status.is_loaded {
            state.status.is_playing = false;
            state.status.did_just_finish = true;
        }
    }
}

#[async_trait]
impl SoundEngine for HeadlessEngine {
    async fn load(&mut self, url: &str) -> Result<(), AudioError> {
        let parsed = reqwest::Url::parse(url).map_err(|e| AudioError::InvalidSource(format!("{}: {}", url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https" | "file") {
            return Err(AudioError::InvalidSource(format!("unsupported scheme '{}'", parsed.scheme())));
        }

        tracing::debug!("Headless engine loaded {}", parsed);
        let mut state = self.state();
        state.source = Some(parsed);
        state.status = SoundStatus {
            is_loaded: true,
            ..SoundStatus::default()
        };
        Ok(())
    }

    fn play(&mut self) -> Result<(), AudioError> {
        let mut state = self.state();
        if !state.status.is_loaded {
            return Err(AudioError::NotLoaded);
        }
        state.status.is_playing = true;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), AudioError> {
        let mut state = self.state();
        if !state.status.is_loaded {
            return Err(AudioError::NotLoaded);
        }
        state.status.is_playing = false;
        Ok(())
    }

    fn unload(&mut self) {
        let mut state = self.state();
        state.source = None;
        state.status = SoundStatus::default();
    }

    fn status(&mut self) -> SoundStatus {
        let mut state = self.state();
        let status = state.status;
        if status.did_just_finish {
            state.status = SoundStatus::default();
            state.source = None;
        }
        status
    }
}
