//! Mock converter for testing.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::converter::{ConversionJob, ConversionResult, Converter, ConverterError};

/// Mock implementation of the `Converter` trait.
///
/// Records every job it receives and allows tests to inject failures
/// and simulate conversion time. Clones share state, so a test can keep
/// a handle while the batch runner owns another.
#[derive(Debug, Clone)]
pub struct MockConverter {
    /// Jobs received, in order.
    jobs: Arc<RwLock<Vec<ConversionJob>>>,
    /// If set, the next conversion fails with this error.
    next_error: Arc<RwLock<Option<ConverterError>>>,
    /// Simulated conversion duration in milliseconds.
    conversion_duration_ms: Arc<RwLock<u64>>,
    /// Whether to write a small output file on success.
    write_output: Arc<RwLock<bool>>,
}

impl Default for MockConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConverter {
    /// Creates a new mock converter.
    pub fn new() -> Self {
        Self {
            jobs: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            conversion_duration_ms: Arc::new(RwLock::new(0)),
            write_output: Arc::new(RwLock::new(true)),
        }
    }

    /// All jobs received so far.
    pub async fn recorded_jobs(&self) -> Vec<ConversionJob> {
        self.jobs.read().await.clone()
    }

    /// Number of conversions attempted.
    pub async fn conversion_count(&self) -> usize {
        self.jobs.read().await.len()
    }

    /// Configures the next conversion to fail with the given error.
    pub async fn set_next_error(&self, error: ConverterError) {
        *self.next_error.write().await = Some(error);
    }

    /// Sets the simulated conversion duration.
    pub async fn set_conversion_duration(&self, duration: Duration) {
        *self.conversion_duration_ms.write().await = duration.as_millis() as u64;
    }

    /// Enables or disables writing the output file on success.
    pub async fn set_write_output(&self, write: bool) {
        *self.write_output.write().await = write;
    }

    async fn take_error(&self) -> Option<ConverterError> {
        self.next_error.write().await.take()
    }
}

#[async_trait]
impl Converter for MockConverter {
    fn name(&self) -> &str {
        "mock"
    }

    async fn convert(&self, job: ConversionJob) -> Result<ConversionResult, ConverterError> {
        self.jobs.write().await.push(job.clone());

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        let duration_ms = *self.conversion_duration_ms.read().await;
        if duration_ms > 0 {
            tokio::time::sleep(Duration::from_millis(duration_ms)).await;
        }

        if *self.write_output.read().await {
            // Parent directories are the caller's responsibility,
            // matching the real converter.
            tokio::fs::write(&job.output_path, b"mock audio").await?;
        }

        Ok(ConversionResult {
            job_id: job.job_id,
            output_path: job.output_path,
            output_size_bytes: 10,
            duration_ms,
        })
    }

    async fn validate(&self) -> Result<(), ConverterError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::{AudioFormat, QualityLevel};
    use tempfile::TempDir;

    fn job_into(dir: &TempDir, id: &str) -> ConversionJob {
        ConversionJob {
            job_id: id.to_string(),
            input_path: dir.path().join(format!("{}.mp4", id)),
            output_path: dir.path().join(format!("{}.wav", id)),
            format: AudioFormat::Wav,
            quality: QualityLevel::default(),
        }
    }

    #[tokio::test]
    async fn test_records_jobs() {
        let dir = TempDir::new().unwrap();
        let converter = MockConverter::new();

        converter.convert(job_into(&dir, "a")).await.unwrap();
        converter.convert(job_into(&dir, "b")).await.unwrap();

        assert_eq!(converter.conversion_count().await, 2);
        let jobs = converter.recorded_jobs().await;
        assert_eq!(jobs[0].job_id, "a");
        assert_eq!(jobs[1].job_id, "b");
    }

    #[tokio::test]
    async fn test_error_injection_is_consumed() {
        let dir = TempDir::new().unwrap();
        let converter = MockConverter::new();
        converter
            .set_next_error(ConverterError::conversion_failed("injected", None))
            .await;

        let first = converter.convert(job_into(&dir, "fail")).await;
        assert!(first.is_err());

        let second = converter.convert(job_into(&dir, "ok")).await;
        assert!(second.is_ok());
        assert_eq!(converter.conversion_count().await, 2);
    }

    #[tokio::test]
    async fn test_writes_output_file() {
        let dir = TempDir::new().unwrap();
        let converter = MockConverter::new();
        let job = job_into(&dir, "out");
        let output_path = job.output_path.clone();

        converter.convert(job).await.unwrap();
        assert!(output_path.exists());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let dir = TempDir::new().unwrap();
        let converter = MockConverter::new();
        let clone = converter.clone();

        converter.convert(job_into(&dir, "shared")).await.unwrap();
        assert_eq!(clone.conversion_count().await, 1);
    }
}
