//! Native sound engine using rodio
//!
//! The output stream is not `Send`, so it lives on a dedicated thread that
//! receives commands over a channel and publishes status snapshots.

use std::io::Cursor;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use async_trait::async_trait;
use rodio::{Decoder, OutputStream, Sink};
use tokio::sync::oneshot;

use super::backend::AudioError;
use super::engine::{SoundEngine, SoundStatus};

const TICK: Duration = Duration::from_millis(100);

enum Command {
    Load(Vec<u8>, oneshot::Sender<Result<(), AudioError>>),
    Play,
    Pause,
    Unload,
}

pub struct RodioEngine {
    http: reqwest::Client,
    commands: mpsc::Sender<Command>,
    status: Arc<Mutex<SoundStatus>>,
}

fn lock(status: &Mutex<SoundStatus>) -> MutexGuard<'_, SoundStatus> {
    match status.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl RodioEngine {
    /// Open the default output device on a dedicated thread
    pub fn spawn() -> Result<Self, AudioError> {
        let (commands, receiver) = mpsc::channel();
        let (ready_tx, ready_rx) = mpsc::channel();
        let status = Arc::new(Mutex::new(SoundStatus::default()));
        let shared = Arc::clone(&status);

        thread::Builder::new()
            .name("citizenlab-audio".to_string())
            .spawn(move || run(receiver, shared, ready_tx))
            .map_err(|e| AudioError::Device(e.to_string()))?;

        ready_rx
            .recv()
            .map_err(|_| AudioError::Device("audio thread exited".to_string()))?
            .map_err(AudioError::Device)?;

        tracing::info!("Rodio audio output opened");
        Ok(Self {
            http: reqwest::Client::new(),
            commands,
            status,
        })
    }

    fn send(&self, command: Command) -> Result<(), AudioError> {
        self.commands
            .send(command)
            .map_err(|_| AudioError::Device("audio thread exited".to_string()))
    }
}

fn run(commands: mpsc::Receiver<Command>, status: Arc<Mutex<SoundStatus>>, ready: mpsc::Sender<Result<(), String>>) {
    let (_stream, handle) = match OutputStream::try_default() {
        Ok(output) => output,
        Err(e) => {
            let _ = ready.send(Err(format!("Failed to open audio output: {}", e)));
            return;
        }
    };
    let _ = ready.send(Ok(()));

    let mut sink: Option<Sink> = None;
    loop {
        match commands.recv_timeout(TICK) {
            Ok(Command::Load(bytes, reply)) => {
                if let Some(old) = sink.take() {
                    old.stop();
                }
                let result = Decoder::new(Cursor::new(bytes))
                    .map_err(|e| AudioError::Load(e.to_string()))
                    .and_then(|source| {
                        let new_sink = Sink::try_new(&handle).map_err(|e| AudioError::Device(e.to_string()))?;
                        new_sink.pause();
                        new_sink.append(source);
                        Ok(new_sink)
                    });
                let reply_value = result.map(|new_sink| {
                    sink = Some(new_sink);
                    *lock(&status) = SoundStatus {
                        is_loaded: true,
                        ..SoundStatus::default()
                    };
                });
                let _ = reply.send(reply_value);
            }
            Ok(Command::Play) => {
                if let Some(sink) = &sink {
                    sink.play();
                    lock(&status).is_playing = true;
                }
            }
            Ok(Command::Pause) => {
                if let Some(sink) = &sink {
                    sink.pause();
                    lock(&status).is_playing = false;
                }
            }
            Ok(Command::Unload) => {
                if let Some(old) = sink.take() {
                    old.stop();
                }
                *lock(&status) = SoundStatus::default();
            }
            Err(RecvTimeoutError::Timeout) => {
                let finished = sink.as_ref().is_some_and(|s| s.empty());
                let mut current = lock(&status);
                if finished && current.is_playing {
                    sink = None;
                    current.is_playing = false;
                    current.did_just_finish = true;
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    tracing::debug!("Audio thread stopped");
}

#[async_trait]
impl SoundEngine for RodioEngine {
    async fn load(&mut self, url: &str) -> Result<(), AudioError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| AudioError::Load(e.to_string()))?;
        if !response.status().is_success() {
            return Err(AudioError::Load(format!("status {}", response.status())));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AudioError::Load(e.to_string()))?;

        let (reply, done) = oneshot::channel();
        self.send(Command::Load(bytes.to_vec(), reply))?;
        done.await
            .map_err(|_| AudioError::Device("audio thread exited".to_string()))?
    }

    fn play(&mut self) -> Result<(), AudioError> {
        if !lock(&self.status).is_loaded {
            return Err(AudioError::NotLoaded);
        }
        self.send(Command::Play)
    }

    fn pause(&mut self) -> Result<(), AudioError> {
        if !lock(&self.status).is_loaded {
            return Err(AudioError::NotLoaded);
        }
        self.send(Command::Pause)
    }

    fn unload(&mut self) {
        let _ = self.send(Command::Unload);
    }

    fn status(&mut self) -> SoundStatus {
        let mut current = lock(&self.status);
        let snapshot = *current;
        if snapshot.did_just_finish {
            *current = SoundStatus::default();
        }
        snapshot
    }
}
