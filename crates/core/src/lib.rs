pub mod batch;
pub mod config;
pub mod converter;
pub mod mapper;
pub mod scanner;
pub mod testing;

pub use batch::{
    BatchCanceller, BatchError, BatchEvent, BatchHandle, BatchResult, BatchRunner,
    ConversionOptions, JobRecord, JobStatus,
};
pub use config::{load_config, load_config_from_str, load_default_config, Config, ConfigError};
pub use converter::{
    AudioFormat, ConversionJob, ConversionResult, Converter, ConverterConfig, ConverterError,
    FfmpegConverter, QualityLevel,
};
pub use scanner::{ScanError, SourceFile, DEFAULT_VIDEO_EXTENSIONS};
