//! Cue player implementation using rodio.
//!
//! The rodio output stream cannot leave the thread that opened it, so
//! `RodioNotifier` parks it on a dedicated audio thread and talks to that
//! thread over a channel. The notifier itself is `Send + Sync` and can sit
//! inside the engine.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use rodio::source::{SineWave, Source};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::error::CueError;
use super::source::{CueSource, DEFAULT_TONE_HZ, DEFAULT_TONE_MS};
use super::Notifier;

/// Tone volume relative to full scale.
const TONE_VOLUME: f32 = 0.2;

/// Requests handled by the audio thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CueCommand {
    Play,
    Cancel,
    Shutdown,
}

/// A [`Notifier`] that plays the cue through the default audio device.
pub struct RodioNotifier {
    commands: Sender<CueCommand>,
    source: CueSource,
    worker: Option<JoinHandle<()>>,
}

impl RodioNotifier {
    /// Opens the default output device and starts the audio thread.
    ///
    /// `source` is played at every boundary.
    ///
    /// # Errors
    ///
    /// Returns `CueError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new(source: CueSource) -> Result<Self, CueError> {
        let (commands, receiver) = crossbeam_channel::unbounded();
        let (ready_tx, ready_rx) = crossbeam_channel::bounded(1);

        let thread_source = source.clone();
        let worker = thread::Builder::new()
            .name("cue-audio".to_string())
            .spawn(move || audio_loop(thread_source, receiver, ready_tx))
            .map_err(|e| CueError::PlaybackError(e.to_string()))?;

        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                let _ = worker.join();
                return Err(e);
            }
            Err(e) => {
                let _ = worker.join();
                return Err(CueError::Disconnected(e.to_string()));
            }
        }

        debug!(cue = %source.name(), "Cue player ready");

        Ok(Self {
            commands,
            source,
            worker: Some(worker),
        })
    }

    fn send(&self, command: CueCommand) -> Result<(), CueError> {
        self.commands
            .send(command)
            .map_err(|e| CueError::Disconnected(e.to_string()))
    }
}

impl Notifier for RodioNotifier {
    fn play_cue(&self) -> Result<(), CueError> {
        self.send(CueCommand::Play)
    }

    fn cancel_cue(&self) -> Result<(), CueError> {
        self.send(CueCommand::Cancel)
    }
}

impl Drop for RodioNotifier {
    fn drop(&mut self) {
        let _ = self.commands.send(CueCommand::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl std::fmt::Debug for RodioNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioNotifier")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Body of the audio thread.
fn audio_loop(
    source: CueSource,
    commands: Receiver<CueCommand>,
    ready: Sender<Result<(), CueError>>,
) {
    let (_stream, handle) = match OutputStream::try_default() {
        Ok(pair) => pair,
        Err(e) => {
            let _ = ready.send(Err(CueError::DeviceNotAvailable(e.to_string())));
            return;
        }
    };
    let _ = ready.send(Ok(()));
    debug!("Audio output stream initialized");

    let mut current: Option<Sink> = None;

    for command in commands.iter() {
        match command {
            CueCommand::Play => {
                // Always restart from the beginning.
                if let Some(sink) = current.take() {
                    sink.stop();
                }
                match start_cue(&handle, &source) {
                    Ok(sink) => current = Some(sink),
                    Err(e) => warn!("Failed to play cue: {} ({})", e, e.suggestion()),
                }
            }
            CueCommand::Cancel => {
                if let Some(sink) = current.take() {
                    sink.stop();
                    debug!("Cue cancelled");
                }
            }
            CueCommand::Shutdown => break,
        }
    }

    debug!("Audio thread exiting");
}

/// Starts playback of `source` on a fresh sink.
fn start_cue(handle: &OutputStreamHandle, source: &CueSource) -> Result<Sink, CueError> {
    let sink = Sink::try_new(handle).map_err(|e| CueError::StreamError(e.to_string()))?;

    match source {
        CueSource::File { path } => match decode_file(path) {
            Ok(decoder) => {
                debug!("Playing cue file: {}", path.display());
                sink.append(decoder);
            }
            Err(e) if e.should_fallback_to_tone() => {
                warn!("{}, falling back to tone", e);
                append_tone(&sink, DEFAULT_TONE_HZ, DEFAULT_TONE_MS);
            }
            Err(e) => return Err(e),
        },
        CueSource::Tone {
            frequency_hz,
            duration_ms,
        } => {
            debug!("Playing cue tone: {}Hz", frequency_hz);
            append_tone(&sink, *frequency_hz, *duration_ms);
        }
    }

    Ok(sink)
}

fn decode_file(path: &Path) -> Result<Decoder<BufReader<File>>, CueError> {
    let file = File::open(path)
        .map_err(|e| CueError::FileNotFound(format!("{}: {}", path.display(), e)))?;
    Decoder::new(BufReader::new(file)).map_err(|e| CueError::DecodeError(e.to_string()))
}

fn append_tone(sink: &Sink, frequency_hz: u32, duration_ms: u64) {
    let tone = SineWave::new(frequency_hz as f32)
        .take_duration(Duration::from_millis(duration_ms))
        .amplify(TONE_VOLUME);
    sink.append(tone);
}

/// Creates a cue player, returning None if audio is unavailable.
///
/// If audio initialization fails, a warning is logged and None is returned.
#[must_use]
pub fn try_create_notifier(source: CueSource) -> Option<Arc<RodioNotifier>> {
    match RodioNotifier::new(source) {
        Ok(notifier) => Some(Arc::new(notifier)),
        Err(e) => {
            warn!("Audio not available, cue disabled: {}", e);
            None
        }
    }
}
