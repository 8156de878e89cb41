//! Configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::batch::ConversionOptions;
use crate::converter::{AudioFormat, ConverterConfig, QualityLevel};
use crate::scanner::DEFAULT_VIDEO_EXTENSIONS;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("config file not found: {0}")]
    FileNotFound(String),

    /// Failed to parse configuration.
    #[error("failed to parse config: {0}")]
    ParseError(String),

    /// Configuration failed validation.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Converter settings.
    #[serde(default)]
    pub converter: ConverterConfig,

    /// Default batch options.
    #[serde(default)]
    pub defaults: BatchDefaults,
}

/// Defaults applied to a batch unless overridden by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchDefaults {
    /// Target audio format.
    #[serde(default = "default_format")]
    pub format: AudioFormat,

    /// Quality level.
    #[serde(default)]
    pub quality: QualityLevel,

    /// Whether to scan subdirectories.
    #[serde(default = "default_recursive")]
    pub recursive: bool,

    /// Whether to overwrite existing destinations.
    #[serde(default)]
    pub overwrite_existing: bool,

    /// Video extensions to match.
    #[serde(default = "default_extensions")]
    pub video_extensions: Vec<String>,
}

fn default_format() -> AudioFormat {
    AudioFormat::Wav
}

fn default_recursive() -> bool {
    true
}

fn default_extensions() -> Vec<String> {
    DEFAULT_VIDEO_EXTENSIONS
        .iter()
        .map(|e| e.to_string())
        .collect()
}

impl Default for BatchDefaults {
    fn default() -> Self {
        Self {
            format: default_format(),
            quality: QualityLevel::default(),
            recursive: default_recursive(),
            overwrite_existing: false,
            video_extensions: default_extensions(),
        }
    }
}

impl Config {
    /// Builds batch options for the given input root from these defaults.
    pub fn options_for(&self, input_root: impl Into<PathBuf>) -> ConversionOptions {
        ConversionOptions::new(input_root)
            .with_format(self.defaults.format)
            .with_quality(self.defaults.quality)
            .with_recursive(self.defaults.recursive)
            .with_overwrite(self.defaults.overwrite_existing)
            .with_extensions(self.defaults.video_extensions.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.defaults.format, AudioFormat::Wav);
        assert!(config.defaults.recursive);
        assert!(!config.defaults.overwrite_existing);
        assert!(!config.defaults.video_extensions.is_empty());
    }

    #[test]
    fn test_options_for_applies_defaults() {
        let config = Config {
            defaults: BatchDefaults {
                format: AudioFormat::Opus,
                quality: QualityLevel::Best,
                recursive: false,
                overwrite_existing: true,
                video_extensions: vec!["mp4".to_string()],
            },
            ..Default::default()
        };

        let options = config.options_for("/videos");
        assert_eq!(options.format, AudioFormat::Opus);
        assert_eq!(options.quality, QualityLevel::Best);
        assert!(!options.recursive);
        assert!(options.overwrite_existing);
        assert_eq!(options.video_extensions, vec!["mp4".to_string()]);
    }
}
