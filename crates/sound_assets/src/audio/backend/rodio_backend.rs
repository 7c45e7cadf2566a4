//! Rodio audio backend implementation
//!
//! Opens the cpal output stream directly so the configured buffer size
//! reaches the device, and feeds it from a rodio dynamic mixer. Playback
//! code adds sources to the mixer.
//!
//! # Example
//!
//! ```no_run
//! use rodio::Source;
//! use sound_assets::audio::backend::{AudioBackend, AudioBackendConfig};
//! use sound_assets::audio::backend::rodio_backend::RodioBackend;
//! use sound_assets::audio::Clip;
//!
//! let mut backend = RodioBackend::new();
//! backend.initialize(&AudioBackendConfig::default()).unwrap();
//!
//! let clip = Clip::load("resources/audio/boom.wav".as_ref()).unwrap();
//! backend.output_mixer().unwrap().add(clip.source().convert_samples::<f32>());
//!
//! backend.shutdown();
//! ```

use super::{AudioBackend, AudioBackendConfig, OutputMixer};
use crate::audio::AudioError;
use rodio::cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rodio::cpal::{self, BufferSize, SampleRate, Stream, StreamConfig};
use rodio::dynamic_mixer;

/// Stream configuration handed to the device for `config`
pub fn requested_stream_config(config: &AudioBackendConfig, buffer_size: BufferSize) -> StreamConfig {
    StreamConfig {
        channels: config.channels,
        sample_rate: SampleRate(config.sample_rate),
        buffer_size,
    }
}

/// Rodio-based audio backend
pub struct RodioBackend {
    /// Device stream (must be kept alive)
    stream: Option<Stream>,
    /// Mixer feeding the stream
    mixer: Option<OutputMixer>,
    /// Configuration the device accepted
    stream_config: Option<StreamConfig>,
}

impl RodioBackend {
    /// Create a new Rodio backend
    pub const fn new() -> Self {
        Self {
            stream: None,
            mixer: None,
            stream_config: None,
        }
    }

    /// Configuration the open stream runs with, if any
    pub const fn stream_config(&self) -> Option<&StreamConfig> {
        self.stream_config.as_ref()
    }

    /// Build and start a stream that pulls from a fresh mixer
    fn open_stream(device: &cpal::Device, stream_config: &StreamConfig) -> Result<(Stream, OutputMixer), String> {
        let (controller, mut mixer) = dynamic_mixer::mixer::<f32>(stream_config.channels, stream_config.sample_rate.0);

        let stream = device
            .build_output_stream(
                stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    for sample in data.iter_mut() {
                        *sample = mixer.next().unwrap_or(0.0);
                    }
                },
                |err| log::error!("Audio output stream error: {}", err),
                None,
            )
            .map_err(|e| e.to_string())?;
        stream.play().map_err(|e| e.to_string())?;

        Ok((stream, controller))
    }
}

impl AudioBackend for RodioBackend {
    fn initialize(&mut self, config: &AudioBackendConfig) -> Result<(), AudioError> {
        if self.is_initialized() {
            return Ok(());
        }

        let device = cpal::default_host()
            .default_output_device()
            .ok_or_else(|| AudioError::DeviceInitFailed("No default output device found".to_string()))?;

        let fixed = requested_stream_config(config, BufferSize::Fixed(config.buffer_size));
        let (stream, mixer, opened) = match Self::open_stream(&device, &fixed) {
            Ok((stream, mixer)) => (stream, mixer, fixed),
            Err(reason) => {
                log::warn!(
                    "Device refused a fixed {}-frame buffer ({}), retrying with its default buffer size",
                    config.buffer_size,
                    reason
                );
                let flexible = requested_stream_config(config, BufferSize::Default);
                let (stream, mixer) = Self::open_stream(&device, &flexible)
                    .map_err(|e| AudioError::DeviceInitFailed(format!("Failed to open audio output: {e}")))?;
                (stream, mixer, flexible)
            }
        };

        log::info!(
            "Rodio audio backend initialized: sample_rate={}, channels={}, buffer_size={:?}",
            opened.sample_rate.0,
            opened.channels,
            opened.buffer_size
        );
        self.stream = Some(stream);
        self.mixer = Some(mixer);
        self.stream_config = Some(opened);
        Ok(())
    }

    fn shutdown(&mut self) {
        if !self.is_initialized() {
            return;
        }

        // Stop the callback before dropping the mixer it reads from
        self.stream = None;
        self.mixer = None;
        self.stream_config = None;

        log::info!("Rodio audio backend shutdown");
    }

    fn is_initialized(&self) -> bool {
        self.stream.is_some()
    }

    fn output_mixer(&self) -> Option<&OutputMixer> {
        self.mixer.as_ref()
    }
}

impl Default for RodioBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RodioBackend {
    fn drop(&mut self) {
        self.shutdown();
    }
}
