//! Event-driven adapter
//!
//! Wraps a media element that reports its state through events (`canplay`,
//! `play`, `pause`, `ended`, `error`) delivered on a channel.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::UnboundedReceiver;

use super::backend::{AudioBackend, AudioError, BackendEvent};

/// Event emitted by a media element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaEvent {
    CanPlay,
    Play,
    Pause,
    Ended,
    Error(String),
}

/// Commands understood by a media element
pub trait MediaElement: Send {
    fn set_source(&mut self, url: &str);

    fn play(&mut self);

    fn pause(&mut self);

    /// Pause and drop the current source
    fn reset(&mut self);
}

/// How long `load` waits for `canplay` or `error`
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(30);

pub struct ElementBackend<E> {
    element: E,
    events: UnboundedReceiver<MediaEvent>,
    loaded: bool,
    load_timeout: Duration,
}

impl<E: MediaElement> ElementBackend<E> {
    pub fn new(element: E, events: UnboundedReceiver<MediaEvent>) -> Self {
        Self {
            element,
            events,
            loaded: false,
            load_timeout: DEFAULT_LOAD_TIMEOUT,
        }
    }

    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = timeout;
        self
    }

    async fn wait_until_ready(&mut self) -> Result<(), AudioError> {
        loop {
            match self.events.recv().await {
                Some(MediaEvent::CanPlay) => return Ok(()),
                Some(MediaEvent::Error(message)) => return Err(AudioError::Load(message)),
                Some(_) => continue,
                None => return Err(AudioError::Device("media element closed".to_string())),
            }
        }
    }

    fn discard_pending(&mut self) {
        while self.events.try_recv().is_ok() {}
    }
}

#[async_trait]
impl<E: MediaElement> AudioBackend for ElementBackend<E> {
    async fn load(&mut self, url: &str) -> Result<(), AudioError> {
        self.discard_pending();
        self.loaded = false;
        self.element.set_source(url);

        let timeout = self.load_timeout;
        let result = match tokio::time::timeout(timeout, self.wait_until_ready()).await {
            Ok(result) => result,
            Err(_) => Err(AudioError::Load(format!("{} not ready after {:?}", url, timeout))),
        };
        match result {
            Ok(()) => {
                self.loaded = true;
                Ok(())
            }
            Err(e) => {
                self.element.reset();
                Err(e)
            }
        }
    }

    fn play(&mut self) -> Result<(), AudioError> {
        if !self.loaded {
            return Err(AudioError::NotLoaded);
        }
        self.element.play();
        Ok(())
    }

    fn pause(&mut self) -> Result<(), AudioError> {
        if !self.loaded {
            return Err(AudioError::NotLoaded);
        }
        self.element.pause();
        Ok(())
    }

    fn stop(&mut self) {
        self.element.reset();
        self.loaded = false;
        self.discard_pending();
    }

    fn poll(&mut self) -> Vec<BackendEvent> {
        let mut out = Vec::new();
        loop {
            match self.events.try_recv() {
                Ok(MediaEvent::Play) => out.push(BackendEvent::Playing),
                Ok(MediaEvent::Pause) => out.push(BackendEvent::Paused),
                Ok(MediaEvent::Ended) => {
                    self.loaded = false;
                    out.push(BackendEvent::Ended);
                }
                Ok(MediaEvent::Error(message)) => {
                    self.loaded = false;
                    out.push(BackendEvent::Failed(message));
                }
                Ok(MediaEvent::CanPlay) => {}
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        out
    }
}
