//! Types for the batch module.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::converter::{AudioFormat, QualityLevel};
use crate::scanner::{self, DEFAULT_VIDEO_EXTENSIONS};

/// Options for one conversion batch.
///
/// Built once before a run and immutable afterwards.
#[derive(Debug, Clone)]
pub struct ConversionOptions {
    /// Directory scanned for input files.
    pub input_root: PathBuf,
    /// Destination root; defaults to `input_root` when unset.
    pub output_root: Option<PathBuf>,
    /// Whether to descend into subdirectories.
    pub recursive: bool,
    /// Whether existing destination files are overwritten.
    pub overwrite_existing: bool,
    /// Target audio format.
    pub format: AudioFormat,
    /// Quality level for lossy targets.
    pub quality: QualityLevel,
    /// Video extensions to match, lowercase without the dot.
    pub video_extensions: Vec<String>,
}

impl ConversionOptions {
    /// Creates options with defaults matching the interactive tool:
    /// recursive on, overwrite off, WAV output, medium quality.
    pub fn new(input_root: impl Into<PathBuf>) -> Self {
        Self {
            input_root: input_root.into(),
            output_root: None,
            recursive: true,
            overwrite_existing: false,
            format: AudioFormat::Wav,
            quality: QualityLevel::default(),
            video_extensions: DEFAULT_VIDEO_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }

    /// Sets the output root.
    pub fn with_output_root(mut self, output_root: impl Into<PathBuf>) -> Self {
        self.output_root = Some(output_root.into());
        self
    }

    /// Sets the target format.
    pub fn with_format(mut self, format: AudioFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the quality level.
    pub fn with_quality(mut self, quality: QualityLevel) -> Self {
        self.quality = quality;
        self
    }

    /// Enables or disables recursion.
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Enables or disables overwriting existing destinations.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite_existing = overwrite;
        self
    }

    /// Replaces the extension filter.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.video_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Effective output root.
    pub fn output_root(&self) -> &Path {
        self.output_root.as_deref().unwrap_or(&self.input_root)
    }

    /// Normalized extension filter set.
    pub fn extension_set(&self) -> HashSet<String> {
        scanner::extension_set(&self.video_extensions)
    }
}

/// Lifecycle status of a single job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobStatus {
    /// Not yet dispatched.
    Pending,
    /// Currently converting.
    Running,
    /// Converted successfully.
    Succeeded,
    /// Conversion failed; the batch continues.
    Failed { reason: String },
    /// Destination existed and overwrite was disabled.
    Skipped,
    /// The batch was cancelled before this job started.
    Cancelled,
}

impl JobStatus {
    /// Whether this is a terminal status.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending | Self::Running)
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Succeeded => "succeeded",
            Self::Failed { .. } => "failed",
            Self::Skipped => "skipped",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Final record of one job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    /// Job identifier (the input's path relative to the scan root).
    pub job_id: String,
    /// Input file.
    pub input: PathBuf,
    /// Destination file.
    pub output: PathBuf,
    /// Terminal status.
    pub status: JobStatus,
}

/// Aggregate result of a batch, finalized once the last job settles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchResult {
    /// Jobs that converted successfully.
    pub succeeded: usize,
    /// Jobs that failed.
    pub failed: usize,
    /// Jobs skipped because the destination existed.
    pub skipped: usize,
    /// Jobs cancelled before dispatch.
    pub cancelled: usize,
    /// Wall clock batch duration in milliseconds.
    pub duration_ms: u64,
    /// Per-job outcomes in dispatch order.
    pub jobs: Vec<JobRecord>,
}

impl BatchResult {
    /// Total number of jobs submitted.
    pub fn total(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the counters account for every job.
    pub fn counts_consistent(&self) -> bool {
        self.succeeded + self.failed + self.skipped + self.cancelled == self.jobs.len()
    }
}

/// Progress events emitted by the batch worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BatchEvent {
    /// The scan finished; jobs are about to run.
    ScanCompleted { files_found: usize },
    /// A job was dispatched to the converter.
    JobStarted { job_id: String, file_name: String },
    /// A job reached a terminal status.
    JobFinished { job_id: String, status: JobStatus },
    /// The whole batch finished.
    BatchFinished {
        succeeded: usize,
        failed: usize,
        skipped: usize,
        cancelled: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_defaults() {
        let options = ConversionOptions::new("/videos");
        assert!(options.recursive);
        assert!(!options.overwrite_existing);
        assert_eq!(options.format, AudioFormat::Wav);
        assert_eq!(options.output_root(), Path::new("/videos"));
        assert!(options.extension_set().contains("mp4"));
    }

    #[test]
    fn test_options_output_root_override() {
        let options = ConversionOptions::new("/videos").with_output_root("/audio");
        assert_eq!(options.output_root(), Path::new("/audio"));
    }

    #[test]
    fn test_status_terminal() {
        assert!(!JobStatus::Pending.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
        assert!(JobStatus::Succeeded.is_terminal());
        assert!(JobStatus::Skipped.is_terminal());
        assert!(JobStatus::Cancelled.is_terminal());
        assert!(JobStatus::Failed {
            reason: "x".to_string()
        }
        .is_terminal());
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&JobStatus::Failed {
            reason: "boom".to_string(),
        })
        .unwrap();
        assert!(json.contains("\"status\":\"failed\""));
        assert!(json.contains("\"reason\":\"boom\""));
    }

    #[test]
    fn test_event_serialization() {
        let event = BatchEvent::JobStarted {
            job_id: "sub/clip.mp4".to_string(),
            file_name: "clip.mp4".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"event\":\"job_started\""));
    }

    #[test]
    fn test_counts_consistency() {
        let mut result = BatchResult {
            succeeded: 1,
            skipped: 1,
            ..Default::default()
        };
        result.jobs.push(JobRecord {
            job_id: "a".to_string(),
            input: "/in/a.mp4".into(),
            output: "/out/a.wav".into(),
            status: JobStatus::Succeeded,
        });
        result.jobs.push(JobRecord {
            job_id: "b".to_string(),
            input: "/in/b.mp4".into(),
            output: "/out/b.wav".into(),
            status: JobStatus::Skipped,
        });
        assert!(result.counts_consistent());
        assert_eq!(result.total(), 2);
    }
}
