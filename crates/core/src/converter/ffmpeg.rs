//! FFmpeg-based converter implementation.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::debug;

use super::config::ConverterConfig;
use super::error::ConverterError;
use super::traits::Converter;
use super::types::{AudioFormat, ConversionJob, ConversionResult, QualityLevel};

/// Upper bound on captured diagnostic output per conversion.
const MAX_STDERR_BYTES: usize = 16 * 1024;

/// FFmpeg-based converter implementation.
///
/// Shells out to the `ffmpeg` binary; only exit status and output file
/// presence are inspected, never ffmpeg internals.
pub struct FfmpegConverter {
    config: ConverterConfig,
}

impl FfmpegConverter {
    /// Creates a new FFmpeg converter with the given configuration.
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// Creates a converter with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ConverterConfig::default())
    }

    /// Builds ffmpeg arguments for an audio extraction job.
    fn build_args(
        &self,
        input_path: &Path,
        output_path: &Path,
        format: AudioFormat,
        quality: QualityLevel,
    ) -> Vec<String> {
        let mut args = vec![
            "-y".to_string(), // Overwrite output
            "-hide_banner".to_string(),
            "-i".to_string(),
            input_path.to_string_lossy().to_string(),
            "-vn".to_string(), // Drop the video stream
        ];

        match format {
            AudioFormat::Wav => {
                // CD quality PCM, always stereo
                args.extend([
                    "-acodec".to_string(),
                    "pcm_s16le".to_string(),
                    "-ar".to_string(),
                    "44100".to_string(),
                    "-ac".to_string(),
                    "2".to_string(),
                ]);
            }
            AudioFormat::WavVoice => {
                // Speech transcription target, always 16 kHz mono
                args.extend([
                    "-acodec".to_string(),
                    "pcm_s16le".to_string(),
                    "-ar".to_string(),
                    "16000".to_string(),
                    "-ac".to_string(),
                    "1".to_string(),
                ]);
            }
            AudioFormat::Mp3 => {
                args.extend([
                    "-codec:a".to_string(),
                    format.ffmpeg_codec().to_string(),
                    "-qscale:a".to_string(),
                    quality.mp3_qscale().to_string(),
                ]);
            }
            AudioFormat::Ogg => {
                args.extend([
                    "-codec:a".to_string(),
                    format.ffmpeg_codec().to_string(),
                    "-qscale:a".to_string(),
                    quality.vorbis_qscale().to_string(),
                ]);
            }
            AudioFormat::Flac => {
                args.extend([
                    "-codec:a".to_string(),
                    format.ffmpeg_codec().to_string(),
                    "-compression_level".to_string(),
                    quality.flac_compression().to_string(),
                ]);
            }
            AudioFormat::Aac | AudioFormat::M4a | AudioFormat::Wma => {
                args.extend([
                    "-codec:a".to_string(),
                    format.ffmpeg_codec().to_string(),
                    "-b:a".to_string(),
                    quality.aac_bitrate().to_string(),
                ]);
            }
            AudioFormat::Opus => {
                args.extend([
                    "-codec:a".to_string(),
                    format.ffmpeg_codec().to_string(),
                    "-b:a".to_string(),
                    quality.opus_bitrate().to_string(),
                ]);
            }
        }

        args.extend([
            "-loglevel".to_string(),
            self.config.ffmpeg_log_level.clone(),
        ]);

        args.extend(self.config.extra_ffmpeg_args.iter().cloned());

        args.push(output_path.to_string_lossy().to_string());

        args
    }

    async fn run_conversion(&self, job: &ConversionJob) -> Result<ConversionResult, ConverterError> {
        let start = Instant::now();

        if !job.input_path.exists() {
            return Err(ConverterError::InputNotFound {
                path: job.input_path.clone(),
            });
        }

        let args = self.build_args(&job.input_path, &job.output_path, job.format, job.quality);
        debug!(job_id = %job.job_id, ?args, "spawning ffmpeg");

        let mut child = Command::new(&self.config.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ConverterError::FfmpegNotFound {
                        path: self.config.ffmpeg_path.clone(),
                    }
                } else {
                    ConverterError::Io(e)
                }
            })?;

        let stderr = child.stderr.take().expect("stderr should be captured");
        let mut reader = BufReader::new(stderr).lines();

        let timeout_duration = Duration::from_secs(self.config.timeout_secs);
        let result = timeout(timeout_duration, async {
            let mut diagnostic = String::new();

            while let Ok(Some(line)) = reader.next_line().await {
                if diagnostic.len() < MAX_STDERR_BYTES {
                    diagnostic.push_str(&line);
                    diagnostic.push('\n');
                }
            }

            let status = child.wait().await?;
            Ok::<(std::process::ExitStatus, String), std::io::Error>((status, diagnostic))
        })
        .await;

        let (status, diagnostic) = match result {
            Ok(Ok(pair)) => pair,
            Ok(Err(e)) => return Err(ConverterError::Io(e)),
            Err(_) => {
                // Kill the process on timeout
                let _ = child.kill().await;
                return Err(ConverterError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                });
            }
        };

        if !status.success() {
            return Err(ConverterError::conversion_failed(
                format!("ffmpeg exited with code {:?}", status.code()),
                if diagnostic.is_empty() {
                    None
                } else {
                    Some(diagnostic)
                },
            ));
        }

        // Verify the output exists and is non-empty
        let output_meta = tokio::fs::metadata(&job.output_path)
            .await
            .map_err(|_| ConverterError::OutputMissing {
                path: job.output_path.clone(),
            })?;
        if output_meta.len() == 0 {
            return Err(ConverterError::OutputMissing {
                path: job.output_path.clone(),
            });
        }

        Ok(ConversionResult {
            job_id: job.job_id.clone(),
            output_path: job.output_path.clone(),
            output_size_bytes: output_meta.len(),
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[async_trait]
impl Converter for FfmpegConverter {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    async fn convert(&self, job: ConversionJob) -> Result<ConversionResult, ConverterError> {
        self.run_conversion(&job).await
    }

    async fn validate(&self) -> Result<(), ConverterError> {
        let result = Command::new(&self.config.ffmpeg_path)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ConverterError::FfmpegNotFound {
                    path: self.config.ffmpeg_path.clone(),
                })
            }
            Err(e) => Err(ConverterError::Io(e)),
        }
    }
}
