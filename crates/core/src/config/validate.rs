//! Configuration validation.

use super::types::{Config, ConfigError};

/// Validates a loaded configuration.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.converter.timeout_secs == 0 {
        return Err(ConfigError::Invalid(
            "converter.timeout_secs must be greater than zero".to_string(),
        ));
    }

    if config.converter.ffmpeg_path.as_os_str().is_empty() {
        return Err(ConfigError::Invalid(
            "converter.ffmpeg_path must not be empty".to_string(),
        ));
    }

    if config.defaults.video_extensions.is_empty() {
        return Err(ConfigError::Invalid(
            "defaults.video_extensions must list at least one extension".to_string(),
        ));
    }

    if config
        .defaults
        .video_extensions
        .iter()
        .all(|e| e.trim_start_matches('.').trim().is_empty())
    {
        return Err(ConfigError::Invalid(
            "defaults.video_extensions contains no usable extension".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_empty_ffmpeg_path_rejected() {
        let mut config = Config::default();
        config.converter.ffmpeg_path = std::path::PathBuf::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_empty_extensions_rejected() {
        let mut config = Config::default();
        config.defaults.video_extensions.clear();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_dot_only_extensions_rejected() {
        let mut config = Config::default();
        config.defaults.video_extensions = vec![".".to_string(), "".to_string()];
        assert!(validate_config(&config).is_err());
    }
}
