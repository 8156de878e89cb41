//! Types for the converter module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Target audio format for extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioFormat {
    /// WAVE, CD quality PCM (44.1 kHz stereo)
    Wav,
    /// WAVE tuned for speech transcription (16 kHz mono)
    WavVoice,
    /// MPEG Audio Layer III
    Mp3,
    /// Ogg Vorbis
    Ogg,
    /// Free Lossless Audio Codec
    Flac,
    /// Advanced Audio Coding (raw .aac)
    Aac,
    /// AAC in an MP4 container
    M4a,
    /// Opus
    Opus,
    /// Windows Media Audio
    Wma,
}

impl AudioFormat {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Wav | Self::WavVoice => "wav",
            Self::Mp3 => "mp3",
            Self::Ogg => "ogg",
            Self::Flac => "flac",
            Self::Aac => "aac",
            Self::M4a => "m4a",
            Self::Opus => "opus",
            Self::Wma => "wma",
        }
    }

    /// Returns the ffmpeg codec name for this format.
    pub fn ffmpeg_codec(&self) -> &'static str {
        match self {
            Self::Wav | Self::WavVoice => "pcm_s16le",
            Self::Mp3 => "libmp3lame",
            Self::Ogg => "libvorbis",
            Self::Flac => "flac",
            Self::Aac | Self::M4a => "aac",
            Self::Opus => "libopus",
            Self::Wma => "wmav2",
        }
    }

    /// Whether this format is lossless.
    pub fn is_lossless(&self) -> bool {
        matches!(self, Self::Wav | Self::WavVoice | Self::Flac)
    }

    /// Whether the quality level has any effect on this format.
    ///
    /// PCM output is fixed by the format itself.
    pub fn uses_quality(&self) -> bool {
        !matches!(self, Self::Wav | Self::WavVoice)
    }

    /// All supported output formats.
    pub fn all() -> &'static [AudioFormat] {
        &[
            Self::Wav,
            Self::WavVoice,
            Self::Mp3,
            Self::Ogg,
            Self::Flac,
            Self::Aac,
            Self::M4a,
            Self::Opus,
            Self::Wma,
        ]
    }
}

impl FromStr for AudioFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wav" => Ok(Self::Wav),
            "wav_voice" | "wav-voice" => Ok(Self::WavVoice),
            "mp3" => Ok(Self::Mp3),
            "ogg" => Ok(Self::Ogg),
            "flac" => Ok(Self::Flac),
            "aac" => Ok(Self::Aac),
            "m4a" => Ok(Self::M4a),
            "opus" => Ok(Self::Opus),
            "wma" => Ok(Self::Wma),
            other => Err(format!("unknown audio format: {}", other)),
        }
    }
}

/// Quality level on a five step scale, best to smallest.
///
/// Each lossy codec maps the level to its own quality scale or bitrate;
/// FLAC maps it to a compression level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityLevel {
    Best,
    High,
    #[default]
    Medium,
    Low,
    Lowest,
}

impl QualityLevel {
    /// Numeric level, 0 (best) to 4 (smallest file).
    pub fn level(&self) -> u8 {
        match self {
            Self::Best => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
            Self::Lowest => 4,
        }
    }

    /// Parses a numeric level in the 0-4 range.
    pub fn from_level(level: u8) -> Result<Self, String> {
        match level {
            0 => Ok(Self::Best),
            1 => Ok(Self::High),
            2 => Ok(Self::Medium),
            3 => Ok(Self::Low),
            4 => Ok(Self::Lowest),
            other => Err(format!("quality level out of range (0-4): {}", other)),
        }
    }

    /// LAME VBR quality for `-qscale:a` (0 best, 9 worst).
    pub fn mp3_qscale(&self) -> &'static str {
        match self {
            Self::Best => "0",
            Self::High => "2",
            Self::Medium => "4",
            Self::Low => "6",
            Self::Lowest => "9",
        }
    }

    /// Vorbis quality for `-qscale:a` (10 best, -1 worst).
    pub fn vorbis_qscale(&self) -> &'static str {
        match self {
            Self::Best => "10",
            Self::High => "8",
            Self::Medium => "6",
            Self::Low => "3",
            Self::Lowest => "1",
        }
    }

    /// AAC and WMA bitrate for `-b:a`.
    pub fn aac_bitrate(&self) -> &'static str {
        match self {
            Self::Best => "256k",
            Self::High => "192k",
            Self::Medium => "128k",
            Self::Low => "96k",
            Self::Lowest => "64k",
        }
    }

    /// Opus bitrate for `-b:a`.
    pub fn opus_bitrate(&self) -> &'static str {
        match self {
            Self::Best => "192k",
            Self::High => "128k",
            Self::Medium => "96k",
            Self::Low => "64k",
            Self::Lowest => "32k",
        }
    }

    /// FLAC compression level for `-compression_level`.
    pub fn flac_compression(&self) -> u8 {
        self.level()
    }
}

/// A single file conversion request.
#[derive(Debug, Clone)]
pub struct ConversionJob {
    /// Identifier unique within a batch.
    pub job_id: String,
    /// Input video file.
    pub input_path: PathBuf,
    /// Output audio file.
    pub output_path: PathBuf,
    /// Target format.
    pub format: AudioFormat,
    /// Quality level for lossy targets.
    pub quality: QualityLevel,
}

/// Result of a successful conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Job identifier.
    pub job_id: String,
    /// Output file path.
    pub output_path: PathBuf,
    /// Output file size in bytes.
    pub output_size_bytes: u64,
    /// Wall clock conversion time in milliseconds.
    pub duration_ms: u64,
}
