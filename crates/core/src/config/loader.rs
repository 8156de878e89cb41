//! Configuration loading from TOML files and environment variables.

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use std::path::Path;
use tracing::info;

use super::types::{Config, ConfigError};
use super::validate::validate_config;

/// Loads configuration from a TOML file with environment overrides.
///
/// Environment variables prefixed with `VIDRIP_` override file values,
/// with `__` separating sections, e.g. `VIDRIP_CONVERTER__TIMEOUT_SECS=600`.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: Config = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("VIDRIP_").split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    validate_config(&config)?;
    info!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Loads configuration with only environment overrides applied to the
/// built-in defaults. Used when no config file is given.
pub fn load_default_config() -> Result<Config, ConfigError> {
    let config: Config = Figment::from(figment::providers::Serialized::defaults(Config::default()))
        .merge(Env::prefixed("VIDRIP_").split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    validate_config(&config)?;
    Ok(config)
}

/// Loads configuration from a TOML string. Test helper.
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Toml::string(toml_str))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    validate_config(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::{AudioFormat, QualityLevel};

    #[test]
    fn test_load_empty_config_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.converter.ffmpeg_path, Path::new("ffmpeg"));
        assert_eq!(config.defaults.format, AudioFormat::Wav);
    }

    #[test]
    fn test_load_full_config() {
        let toml_str = r#"
            [converter]
            ffmpeg_path = "/usr/local/bin/ffmpeg"
            timeout_secs = 600

            [defaults]
            format = "mp3"
            quality = "high"
            recursive = false
            overwrite_existing = true
            video_extensions = ["mp4", "mkv"]
        "#;

        let config = load_config_from_str(toml_str).unwrap();
        assert_eq!(
            config.converter.ffmpeg_path,
            Path::new("/usr/local/bin/ffmpeg")
        );
        assert_eq!(config.converter.timeout_secs, 600);
        assert_eq!(config.defaults.format, AudioFormat::Mp3);
        assert_eq!(config.defaults.quality, QualityLevel::High);
        assert!(!config.defaults.recursive);
        assert!(config.defaults.overwrite_existing);
        assert_eq!(config.defaults.video_extensions.len(), 2);
    }

    #[test]
    fn test_invalid_format_rejected() {
        let result = load_config_from_str(
            r#"
            [defaults]
            format = "midi"
        "#,
        );
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_config(Path::new("/nonexistent/vidrip.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = load_config_from_str(
            r#"
            [converter]
            timeout_secs = 0
        "#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
