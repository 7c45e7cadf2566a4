//! Audio asset types for loading and holding audio data
//!
//! [`Clip`] decodes the whole file up front so playback never touches the
//! disk. [`Music`] only probes the file header at load time and decodes
//! incrementally when playback code asks for a source.

use crate::audio::AudioError;
use rodio::buffer::SamplesBuffer;
use rodio::{Decoder, Source};
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Supported audio formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    /// WAV uncompressed
    Wav,
    /// OGG Vorbis compressed
    Ogg,
    /// MP3 compressed
    Mp3,
    /// FLAC lossless
    Flac,
    /// Not recognized from the leading bytes
    Unknown,
}

impl AudioFormat {
    /// Detect audio format from magic bytes
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.len() < 4 {
            return Self::Unknown;
        }

        match &bytes[0..4] {
            b"RIFF" => Self::Wav,
            b"OggS" => Self::Ogg,
            b"fLaC" => Self::Flac,
            // MP3 can start with ID3 tag or frame sync
            [0xFF, 0xFB | 0xFA | 0xF3 | 0xF2, _, _] => Self::Mp3,
            [b'I', b'D', b'3', _] => Self::Mp3,
            _ => Self::Unknown,
        }
    }

    /// Detect the format of a file from its first bytes
    pub fn sniff(path: &Path) -> Result<Self, AudioError> {
        let mut header = [0u8; 4];
        let mut file = File::open(path)?;
        let mut filled = 0;
        while filled < header.len() {
            match file.read(&mut header[filled..])? {
                0 => break,
                n => filled += n,
            }
        }
        Ok(Self::detect(&header[..filled]))
    }
}

fn decode_failed(path: &Path, reason: impl ToString) -> AudioError {
    AudioError::DecodeFailed {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Short sound decoded entirely into memory
///
/// Samples are interleaved signed 16-bit PCM.
#[derive(Clone)]
pub struct Clip {
    path: PathBuf,
    format: AudioFormat,
    channels: u16,
    sample_rate: u32,
    samples: Arc<[i16]>,
}

impl Clip {
    /// Read and fully decode an audio file
    ///
    /// # Errors
    /// - `Io` if the file cannot be read
    /// - `DecodeFailed` if the file is empty or the decoder rejects it
    pub fn load(path: &Path) -> Result<Self, AudioError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(path, bytes)
    }

    /// Decode an in-memory encoded file; `path` is kept for diagnostics
    ///
    /// # Errors
    /// - `DecodeFailed` if `bytes` is empty or the decoder rejects it
    pub fn from_bytes(path: &Path, bytes: Vec<u8>) -> Result<Self, AudioError> {
        if bytes.is_empty() {
            return Err(decode_failed(path, "empty audio file"));
        }

        let format = AudioFormat::detect(&bytes);
        let decoder = Decoder::new(Cursor::new(bytes)).map_err(|e| decode_failed(path, e))?;
        let channels = decoder.channels();
        let sample_rate = decoder.sample_rate();
        if channels == 0 || sample_rate == 0 {
            return Err(decode_failed(path, "stream reports no channels or zero sample rate"));
        }
        let samples: Arc<[i16]> = decoder.collect();

        log::debug!(
            "Decoded clip {} ({:?}, {} ch, {} Hz, {} samples)",
            path.display(),
            format,
            channels,
            sample_rate,
            samples.len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            format,
            channels,
            sample_rate,
            samples,
        })
    }

    /// File the clip was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Format detected from the file header
    pub const fn format(&self) -> AudioFormat {
        self.format
    }

    /// Number of interleaved channels
    pub const fn channels(&self) -> u16 {
        self.channels
    }

    /// Samples per second per channel
    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Decoded interleaved samples
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Playback length
    #[allow(clippy::cast_precision_loss)]
    pub fn duration(&self) -> Duration {
        let frames = self.samples.len() / usize::from(self.channels);
        Duration::from_secs_f64(frames as f64 / f64::from(self.sample_rate))
    }

    /// Build a playable source over a copy of the cached samples
    pub fn source(&self) -> SamplesBuffer<i16> {
        SamplesBuffer::new(self.channels, self.sample_rate, self.samples.to_vec())
    }
}

impl std::fmt::Debug for Clip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clip")
            .field("path", &self.path)
            .field("format", &self.format)
            .field("channels", &self.channels)
            .field("sample_rate", &self.sample_rate)
            .field("samples", &self.samples.len())
            .finish()
    }
}

/// Longer track decoded incrementally during playback
#[derive(Debug, Clone)]
pub struct Music {
    path: PathBuf,
    format: AudioFormat,
    channels: u16,
    sample_rate: u32,
    duration: Option<Duration>,
}

impl Music {
    /// Probe an audio file without decoding its samples
    ///
    /// The decoder is opened once so unsupported or corrupt files fail here
    /// rather than when playback starts.
    ///
    /// # Errors
    /// - `Io` if the file cannot be opened
    /// - `DecodeFailed` if the decoder rejects the header
    pub fn load(path: &Path) -> Result<Self, AudioError> {
        let format = AudioFormat::sniff(path)?;
        let decoder = Self::open_decoder(path)?;
        let channels = decoder.channels();
        let sample_rate = decoder.sample_rate();
        if channels == 0 || sample_rate == 0 {
            return Err(decode_failed(path, "stream reports no channels or zero sample rate"));
        }
        let duration = decoder.total_duration();

        log::debug!(
            "Probed music {} ({:?}, {} ch, {} Hz, duration {:?})",
            path.display(),
            format,
            channels,
            sample_rate,
            duration
        );

        Ok(Self {
            path: path.to_path_buf(),
            format,
            channels,
            sample_rate,
            duration,
        })
    }

    fn open_decoder(path: &Path) -> Result<Decoder<BufReader<File>>, AudioError> {
        let file = File::open(path)?;
        Decoder::new(BufReader::new(file)).map_err(|e| decode_failed(path, e))
    }

    /// Open a fresh streaming decoder for playback
    ///
    /// # Errors
    /// Same as [`Music::load`]; the file may have changed since it was probed.
    pub fn open_source(&self) -> Result<Decoder<BufReader<File>>, AudioError> {
        Self::open_decoder(&self.path)
    }

    /// File the track streams from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Format detected from the file header
    pub const fn format(&self) -> AudioFormat {
        self.format
    }

    /// Number of interleaved channels
    pub const fn channels(&self) -> u16 {
        self.channels
    }

    /// Samples per second per channel
    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Total length, when the decoder can tell without reading the whole file
    pub const fn duration(&self) -> Option<Duration> {
        self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_wav(path: &Path, channels: u16, sample_rate: u32, frames: u32) {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for i in 0..frames * u32::from(channels) {
            writer.write_sample((i % 128) as i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(AudioFormat::detect(b"RIFF....WAVE"), AudioFormat::Wav);
        assert_eq!(AudioFormat::detect(b"OggS...."), AudioFormat::Ogg);
        assert_eq!(AudioFormat::detect(b"fLaC...."), AudioFormat::Flac);
        assert_eq!(AudioFormat::detect(b"ID3\x04"), AudioFormat::Mp3);
        assert_eq!(AudioFormat::detect(&[0xFF, 0xFB, 0x90, 0x00]), AudioFormat::Mp3);
        assert_eq!(AudioFormat::detect(b"ABCD"), AudioFormat::Unknown);
        assert_eq!(AudioFormat::detect(b"RI"), AudioFormat::Unknown);
    }

    #[test]
    fn test_clip_decodes_all_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boom.wav");
        write_wav(&path, 2, 22_050, 2_205);

        let clip = Clip::load(&path).unwrap();
        assert_eq!(clip.format(), AudioFormat::Wav);
        assert_eq!(clip.channels(), 2);
        assert_eq!(clip.sample_rate(), 22_050);
        assert_eq!(clip.samples().len(), 4_410);
        assert_eq!(clip.duration().as_millis(), 100);
        assert_eq!(clip.path(), path.as_path());
    }

    #[test]
    fn test_clip_source_matches_cached_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tick.wav");
        write_wav(&path, 1, 8_000, 16);

        let clip = Clip::load(&path).unwrap();
        let source = clip.source();
        assert_eq!(source.channels(), 1);
        assert_eq!(source.sample_rate(), 8_000);
        assert_eq!(source.collect::<Vec<i16>>(), clip.samples());
    }

    #[test]
    fn test_empty_data_fails() {
        let result = Clip::from_bytes(Path::new("empty.wav"), Vec::new());
        assert!(matches!(result, Err(AudioError::DecodeFailed { .. })));
    }

    #[test]
    fn test_garbage_data_fails() {
        let result = Clip::from_bytes(Path::new("noise.bin"), vec![0x42; 256]);
        assert!(matches!(result, Err(AudioError::DecodeFailed { .. })));
    }

    #[test]
    fn test_music_probe_keeps_metadata_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.wav");
        write_wav(&path, 2, 44_100, 44_100);

        let music = Music::load(&path).unwrap();
        assert_eq!(music.format(), AudioFormat::Wav);
        assert_eq!(music.channels(), 2);
        assert_eq!(music.sample_rate(), 44_100);
        assert_eq!(music.duration(), Some(Duration::from_secs(1)));

        let streamed = music.open_source().unwrap().count();
        assert_eq!(streamed, 88_200);
    }

    #[test]
    fn test_music_rejects_undecodable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "definitely not audio").unwrap();

        assert!(matches!(Music::load(&path), Err(AudioError::DecodeFailed { .. })));
    }

    #[test]
    fn test_music_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Music::load(&dir.path().join("missing.ogg"));
        assert!(matches!(result, Err(AudioError::Io(_))));
    }
}
