//! Error types for the converter module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during conversion.
#[derive(Debug, Error)]
pub enum ConverterError {
    /// FFmpeg binary not found.
    #[error("ffmpeg not found at path: {path}")]
    FfmpegNotFound { path: PathBuf },

    /// Input file not found.
    #[error("input file not found: {path}")]
    InputNotFound { path: PathBuf },

    /// Conversion process failed.
    #[error("conversion failed: {reason}")]
    ConversionFailed {
        reason: String,
        stderr: Option<String>,
    },

    /// The transcoder exited cleanly but produced no usable output.
    #[error("output file missing or empty: {path}")]
    OutputMissing { path: PathBuf },

    /// Conversion timed out.
    #[error("conversion timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// I/O error during conversion.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConverterError {
    /// Creates a new conversion failed error with stderr output.
    pub fn conversion_failed(reason: impl Into<String>, stderr: Option<String>) -> Self {
        Self::ConversionFailed {
            reason: reason.into(),
            stderr,
        }
    }

    /// Human readable failure reason, including captured diagnostics.
    pub fn reason_text(&self) -> String {
        match self {
            Self::ConversionFailed {
                reason,
                stderr: Some(stderr),
            } if !stderr.trim().is_empty() => {
                format!("{}: {}", reason, stderr.trim())
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_includes_stderr() {
        let err = ConverterError::conversion_failed(
            "ffmpeg exited with code 1",
            Some("Unknown encoder 'wmav2'\n".to_string()),
        );
        let reason = err.reason_text();
        assert!(reason.contains("exited with code 1"));
        assert!(reason.contains("Unknown encoder"));
    }

    #[test]
    fn test_reason_without_stderr() {
        let err = ConverterError::Timeout { timeout_secs: 30 };
        assert!(err.reason_text().contains("timed out after 30"));
    }
}
