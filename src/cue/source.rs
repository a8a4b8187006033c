//! Cue sources.
//!
//! A cue is either an audio file chosen on the command line or a
//! synthesized beep that needs no asset at all.

use std::path::{Path, PathBuf};

use super::error::CueError;

/// Default beep pitch.
pub const DEFAULT_TONE_HZ: u32 = 880;

/// Default beep length.
pub const DEFAULT_TONE_MS: u64 = 1000;

/// Where the cue audio comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CueSource {
    /// An audio file on disk (wav, mp3, flac, ogg).
    File {
        /// Path to the file
        path: PathBuf,
    },
    /// A generated sine beep.
    Tone {
        /// Pitch in hertz
        frequency_hz: u32,
        /// Length in milliseconds
        duration_ms: u64,
    },
}

impl CueSource {
    /// Creates a file source without checking the path.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File { path: path.into() }
    }

    /// Creates a file source after checking that `path` is a regular file.
    ///
    /// # Errors
    ///
    /// Returns [`CueError::FileNotFound`] if the path is missing or is not
    /// a file.
    pub fn file_validated(path: impl Into<PathBuf>) -> Result<Self, CueError> {
        let path = path.into();
        validate_cue_path(&path)?;
        Ok(Self::File { path })
    }

    /// Creates a tone source.
    #[must_use]
    pub fn tone(frequency_hz: u32, duration_ms: u64) -> Self {
        Self::Tone {
            frequency_hz,
            duration_ms,
        }
    }

    /// Returns a short human-readable name.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::File { path } => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            Self::Tone { frequency_hz, .. } => format!("tone {frequency_hz}Hz"),
        }
    }

    /// Returns true if this source reads from disk.
    #[must_use]
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }

    /// Returns the file path for file sources.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File { path } => Some(path),
            Self::Tone { .. } => None,
        }
    }
}

impl Default for CueSource {
    fn default() -> Self {
        Self::tone(DEFAULT_TONE_HZ, DEFAULT_TONE_MS)
    }
}

fn validate_cue_path(path: &Path) -> Result<(), CueError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CueError::FileNotFound(path.display().to_string()))
    }
}

/// Resolves the cue for an optional `--cue` path.
///
/// Falls back to the default tone when no path is given or the path is
/// unusable.
#[must_use]
pub fn resolve_cue_source(path: Option<&Path>) -> CueSource {
    match path {
        Some(path) => CueSource::file_validated(path).unwrap_or_else(|e| {
            tracing::warn!("{}: {}", e, e.suggestion());
            CueSource::default()
        }),
        None => CueSource::default(),
    }
}
