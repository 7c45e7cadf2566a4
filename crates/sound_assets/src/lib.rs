//! # Sound Assets
//!
//! A small named cache of sound clips and music tracks for games, built on
//! top of [`rodio`].
//!
//! ## Features
//!
//! - **Clips**: short sound effects decoded fully into memory at load time
//! - **Music**: longer tracks probed at load time and decoded lazily on playback
//! - **Named lookup**: assets are registered under a caller-chosen name
//! - **Typed handles**: `Copy` handles that stop resolving once an asset is released
//! - **Deterministic teardown**: dropping the manager releases every asset and the output device
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sound_assets::prelude::*;
//!
//! fn main() -> Result<(), AudioError> {
//!     sound_assets::foundation::logging::init();
//!
//!     let mut sounds = SoundManager::new(SoundManagerConfig::default())?;
//!     let boom = sounds.load_clip("resources/audio/boom.wav", "explosion")?;
//!     assert_eq!(sounds.get_clip("explosion")?, boom);
//!
//!     sounds.load_music("resources/audio/theme.ogg", "theme")?;
//!     let theme = sounds.music_by_name("theme")?;
//!     println!("theme runs {:?}", theme.duration());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod audio;

/// Common imports for users of the crate
pub mod prelude {
    pub use crate::{
        audio::{
            AudioError,
            Clip, ClipHandle, Music, MusicHandle,
            DuplicatePolicy, SoundManager, SoundManagerConfig,
            backend::AudioBackendConfig,
        },
        config::{Config, ConfigError},
    };
}
