//! Sound asset management
//!
//! [`SoundManager`] owns the audio output device and two name registries, one
//! for clips and one for music. Assets are loaded by path, registered under a
//! caller-chosen name and looked up again by that name.
//!
//! Only one manager may exist per process at a time. There is no global
//! accessor for it: pass the manager to whatever needs audio.

use super::backend::{self, AudioBackend, AudioBackendConfig, OutputMixer};
use super::registry::{AssetRegistry, DuplicatePolicy, Registered};
use super::{AudioError, Clip, ClipHandle, Music, MusicHandle};
use crate::config::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// Set while a `SoundManager` is alive
static ACTIVE: AtomicBool = AtomicBool::new(false);

/// Single-instance token, released on drop
struct InstanceGuard(());

impl InstanceGuard {
    fn acquire() -> Result<Self, AudioError> {
        if ACTIVE.swap(true, Ordering::AcqRel) {
            return Err(AudioError::AlreadyInitialized);
        }
        Ok(Self(()))
    }
}

impl Drop for InstanceGuard {
    fn drop(&mut self) {
        ACTIVE.store(false, Ordering::Release);
    }
}

/// Sound manager configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundManagerConfig {
    /// Output device settings
    pub backend: AudioBackendConfig,
    /// Behavior when a name is loaded twice
    pub duplicate_policy: DuplicatePolicy,
    /// Directories tried, in order, for relative asset paths
    pub search_paths: Vec<PathBuf>,
}

impl Config for SoundManagerConfig {}

/// Sound asset manager
pub struct SoundManager {
    config: SoundManagerConfig,
    backend: Box<dyn AudioBackend>,
    clips: AssetRegistry<Clip>,
    music: AssetRegistry<Music>,
    _guard: InstanceGuard,
}

impl SoundManager {
    /// Create a sound manager on the default rodio backend
    ///
    /// # Errors
    /// - `AlreadyInitialized` if another manager is alive
    pub fn new(config: SoundManagerConfig) -> Result<Self, AudioError> {
        Self::with_backend(config, backend::create_backend())
    }

    /// Create a sound manager on a caller-supplied backend
    ///
    /// A backend that fails to initialize is logged and the manager runs
    /// without output; loading and lookup still work.
    ///
    /// # Errors
    /// - `AlreadyInitialized` if another manager is alive
    pub fn with_backend(config: SoundManagerConfig, mut backend: Box<dyn AudioBackend>) -> Result<Self, AudioError> {
        let guard = InstanceGuard::acquire()?;

        log::info!("Initializing sound manager with config: {:?}", config);
        if let Err(e) = backend.initialize(&config.backend) {
            log::error!("Audio output unavailable, continuing without it: {}", e);
        }

        Ok(Self {
            config,
            backend,
            clips: AssetRegistry::new(),
            music: AssetRegistry::new(),
            _guard: guard,
        })
    }

    /// Whether a sound manager currently exists in this process
    pub fn is_active() -> bool {
        ACTIVE.load(Ordering::Acquire)
    }

    /// Load and fully decode a clip, registering it as `name`
    ///
    /// # Errors
    /// - `FileNotFound` if `path` does not resolve to a file
    /// - `DecodeFailed` / `Io` if the file cannot be decoded
    /// - `DuplicateName` if `name` is taken and the policy is `Reject`
    pub fn load_clip(&mut self, path: impl AsRef<Path>, name: &str) -> Result<ClipHandle, AudioError> {
        let path = self.resolve_path(path.as_ref())?;
        let clip = Clip::load(&path)?;
        let Registered { handle, replaced } = self.clips.insert(name, clip, self.config.duplicate_policy)?;
        if let Some(old) = replaced {
            log::warn!("Clip '{}' replaced ({} -> {})", name, old.path().display(), path.display());
        }
        log::debug!("Loaded clip '{}' from {}", name, path.display());
        Ok(handle)
    }

    /// Probe a music track, registering it as `name`
    ///
    /// # Errors
    /// - `FileNotFound` if `path` does not resolve to a file
    /// - `DecodeFailed` / `Io` if the decoder rejects the file
    /// - `DuplicateName` if `name` is taken and the policy is `Reject`
    pub fn load_music(&mut self, path: impl AsRef<Path>, name: &str) -> Result<MusicHandle, AudioError> {
        let path = self.resolve_path(path.as_ref())?;
        let music = Music::load(&path)?;
        let Registered { handle, replaced } = self.music.insert(name, music, self.config.duplicate_policy)?;
        if let Some(old) = replaced {
            log::warn!("Music '{}' replaced ({} -> {})", name, old.path().display(), path.display());
        }
        log::debug!("Loaded music '{}' from {}", name, path.display());
        Ok(handle)
    }

    /// Handle of the clip registered as `name`
    ///
    /// # Errors
    /// - `NotFound` if no clip has that name
    pub fn get_clip(&self, name: &str) -> Result<ClipHandle, AudioError> {
        self.clips.handle(name)
    }

    /// Handle of the music track registered as `name`
    ///
    /// # Errors
    /// - `NotFound` if no track has that name
    pub fn get_music(&self, name: &str) -> Result<MusicHandle, AudioError> {
        self.music.handle(name)
    }

    /// Resolve a clip handle
    pub fn clip(&self, handle: ClipHandle) -> Option<&Clip> {
        self.clips.get(handle)
    }

    /// Resolve a music handle
    pub fn music(&self, handle: MusicHandle) -> Option<&Music> {
        self.music.get(handle)
    }

    /// Clip registered as `name`
    ///
    /// # Errors
    /// - `NotFound` if no clip has that name
    pub fn clip_by_name(&self, name: &str) -> Result<&Clip, AudioError> {
        self.clips.get_by_name(name)
    }

    /// Music track registered as `name`
    ///
    /// # Errors
    /// - `NotFound` if no track has that name
    pub fn music_by_name(&self, name: &str) -> Result<&Music, AudioError> {
        self.music.get_by_name(name)
    }

    /// Check if a clip is registered
    pub fn contains_clip(&self, name: &str) -> bool {
        self.clips.contains(name)
    }

    /// Check if a music track is registered
    pub fn contains_music(&self, name: &str) -> bool {
        self.music.contains(name)
    }

    /// Number of registered clips
    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }

    /// Number of registered music tracks
    pub fn music_count(&self) -> usize {
        self.music.len()
    }

    /// Registered clip names, in no particular order
    pub fn clip_names(&self) -> impl Iterator<Item = &str> {
        self.clips.names()
    }

    /// Registered music names, in no particular order
    pub fn music_names(&self) -> impl Iterator<Item = &str> {
        self.music.names()
    }

    /// Whether the output device opened successfully
    pub fn is_output_available(&self) -> bool {
        self.backend.is_initialized()
    }

    /// Output mixer for playback code, if the output device is open
    pub fn output_mixer(&self) -> Option<&OutputMixer> {
        self.backend.output_mixer()
    }

    /// Active configuration
    pub const fn config(&self) -> &SoundManagerConfig {
        &self.config
    }

    /// Find `path` as given if absolute, otherwise under each search path and then as given
    fn resolve_path(&self, path: &Path) -> Result<PathBuf, AudioError> {
        if path.is_relative() {
            if let Some(found) = self
                .config
                .search_paths
                .iter()
                .map(|dir| dir.join(path))
                .find(|candidate| candidate.is_file())
            {
                return Ok(found);
            }
        }

        if path.is_file() {
            Ok(path.to_path_buf())
        } else {
            Err(AudioError::FileNotFound(path.to_path_buf()))
        }
    }
}

impl Drop for SoundManager {
    fn drop(&mut self) {
        let clips = self.clips.clear();
        let music = self.music.clear();
        self.backend.shutdown();
        log::info!("Sound manager shutdown: released {} clip(s) and {} music track(s)", clips, music);
    }
}
