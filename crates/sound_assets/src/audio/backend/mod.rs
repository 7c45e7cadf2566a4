//! Audio backend implementations
//!
//! Platform-independent abstraction over the audio output device.

pub mod rodio_backend;

use crate::audio::AudioError;
use rodio::dynamic_mixer::DynamicMixerController;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Mixer feeding the output device; playback code adds sources to it
pub type OutputMixer = Arc<DynamicMixerController<f32>>;

/// Audio backend trait for platform abstraction
///
/// # Threading
/// Not `Send + Sync`: the cpal output stream must stay on the thread that
/// opened it, and the sound manager is single-threaded.
pub trait AudioBackend {
    /// Open the output device
    fn initialize(&mut self, config: &AudioBackendConfig) -> Result<(), AudioError>;

    /// Close the output device
    fn shutdown(&mut self);

    /// Check if backend is initialized
    fn is_initialized(&self) -> bool;

    /// Mixer used by playback code to start sources, if the device is open
    fn output_mixer(&self) -> Option<&OutputMixer>;
}

/// Configuration for audio backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioBackendConfig {
    /// Sample rate (e.g., 44100, 48000)
    pub sample_rate: u32,
    /// Number of output channels (1=mono, 2=stereo)
    pub channels: u16,
    /// Buffer size in frames requested from the device
    pub buffer_size: u32,
}

impl Default for AudioBackendConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            channels: 2,
            buffer_size: 2048,
        }
    }
}

/// Create the default audio backend for the platform, not yet initialized
pub fn create_backend() -> Box<dyn AudioBackend> {
    Box::new(rodio_backend::RodioBackend::new())
}
