//! Audio asset system
//!
//! Loads sound clips and music tracks from disk, caches them under a name and
//! hands out typed handles. Playback itself lives elsewhere; this module only
//! owns the output device and the decoded assets.

pub mod asset;
pub mod backend;
pub mod registry;
pub mod sound_manager;

pub use asset::{AudioFormat, Clip, Music};
pub use registry::{AssetRegistry, DuplicatePolicy};
pub use sound_manager::{SoundManager, SoundManagerConfig};

use crate::foundation::collections::TypedHandle;
use std::path::PathBuf;
use thiserror::Error;

/// Handle to a clip owned by a [`SoundManager`]
pub type ClipHandle = TypedHandle<Clip>;

/// Handle to a music track owned by a [`SoundManager`]
pub type MusicHandle = TypedHandle<Music>;

/// Audio system errors
#[derive(Error, Debug)]
pub enum AudioError {
    /// Another sound manager is still alive in this process
    #[error("A sound manager is already active")]
    AlreadyInitialized,

    /// The output device could not be opened
    #[error("Audio backend initialization failed: {0}")]
    DeviceInitFailed(String),

    /// No file at the given path or under any search path
    #[error("Audio file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The decoder rejected the file
    #[error("Failed to decode {}: {reason}", path.display())]
    DecodeFailed {
        /// File that failed to decode
        path: PathBuf,
        /// Decoder message
        reason: String,
    },

    /// Name already registered and the policy rejects duplicates
    #[error("Duplicate asset name: {0}")]
    DuplicateName(String),

    /// No asset registered under this name
    #[error("No asset registered as '{0}'")]
    NotFound(String),

    /// IO error while reading an asset
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
