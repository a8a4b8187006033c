//! Cue playback error types.
//!
//! Every failure here is recoverable from the clock's point of view: the
//! engine logs it and keeps counting.

use thiserror::Error;

/// Errors that can occur while playing or cancelling a cue.
#[derive(Debug, Error)]
pub enum CueError {
    /// No audio output device could be opened.
    #[error("audio device not available: {0}")]
    DeviceNotAvailable(String),

    /// The configured cue file does not exist or is not a regular file.
    #[error("cue file not found: {0}")]
    FileNotFound(String),

    /// The cue file could not be decoded.
    #[error("failed to decode cue file: {0}")]
    DecodeError(String),

    /// A sink on the output stream could not be created.
    #[error("failed to open audio stream: {0}")]
    StreamError(String),

    /// The audio thread is gone.
    #[error("cue player disconnected: {0}")]
    Disconnected(String),

    /// Generic playback failure.
    #[error("cue playback error: {0}")]
    PlaybackError(String),
}

impl CueError {
    /// Returns true if this error is related to device availability.
    #[must_use]
    pub fn is_device_error(&self) -> bool {
        matches!(
            self,
            Self::DeviceNotAvailable(_) | Self::StreamError(_) | Self::Disconnected(_)
        )
    }

    /// Returns true if this error is related to the cue file.
    #[must_use]
    pub fn is_file_error(&self) -> bool {
        matches!(self, Self::FileNotFound(_) | Self::DecodeError(_))
    }

    /// Returns true if playback should fall back to the built-in tone.
    #[must_use]
    pub fn should_fallback_to_tone(&self) -> bool {
        self.is_file_error()
    }

    /// Returns a short hint for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::DeviceNotAvailable(_) => "connect an audio device or pass --no-sound",
            Self::FileNotFound(_) => "check the --cue path; the built-in tone is used instead",
            Self::DecodeError(_) => "the cue file may be corrupt or in an unsupported format",
            Self::StreamError(_) => "check the system audio settings",
            Self::Disconnected(_) | Self::PlaybackError(_) => "restart the clock",
        }
    }
}
