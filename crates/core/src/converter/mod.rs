//! Converter module for extracting audio from video files.
//!
//! Provides the `Converter` trait and the `FfmpegConverter` implementation
//! that shells out to the external `ffmpeg` binary.
//!
//! # Example
//!
//! ```ignore
//! use vidrip_core::converter::{
//!     AudioFormat, ConversionJob, Converter, FfmpegConverter, QualityLevel,
//! };
//!
//! let converter = FfmpegConverter::with_defaults();
//!
//! // Fail fast if ffmpeg is not on the PATH
//! converter.validate().await?;
//!
//! let job = ConversionJob {
//!     job_id: "clip.mp4".to_string(),
//!     input_path: PathBuf::from("/videos/clip.mp4"),
//!     output_path: PathBuf::from("/audio/clip.mp3"),
//!     format: AudioFormat::Mp3,
//!     quality: QualityLevel::High,
//! };
//!
//! let result = converter.convert(job).await?;
//! println!("wrote {} bytes in {} ms", result.output_size_bytes, result.duration_ms);
//! ```

mod config;
mod error;
mod ffmpeg;
mod traits;
mod types;

pub use config::ConverterConfig;
pub use error::ConverterError;
pub use ffmpeg::FfmpegConverter;
pub use traits::Converter;
pub use types::{AudioFormat, ConversionJob, ConversionResult, QualityLevel};
