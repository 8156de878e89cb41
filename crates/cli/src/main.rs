use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vidrip_core::{
    load_config, load_default_config, AudioFormat, BatchEvent, BatchResult, BatchRunner, Config,
    Converter, ConversionOptions, FfmpegConverter, JobStatus, QualityLevel,
};

/// Buffer size for the batch event channel
const EVENT_BUFFER_SIZE: usize = 256;

/// Batch convert video files to audio with ffmpeg.
#[derive(Debug, Parser)]
#[command(name = "vidrip", version, about)]
struct Cli {
    /// Directory to scan for video files
    input: PathBuf,

    /// Destination root; defaults to writing next to the inputs
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output audio format [default: wav, or the config file's]
    #[arg(short, long)]
    format: Option<AudioFormat>,

    /// Quality level, 0 (best) to 4 (smallest file)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=4))]
    quality: Option<u8>,

    /// Only convert files directly under the input directory
    #[arg(long)]
    no_recursive: bool,

    /// Reconvert files whose destination already exists
    #[arg(long)]
    overwrite: bool,

    /// Restrict the scan to these video extensions (repeatable)
    #[arg(short, long = "extension")]
    extensions: Vec<String>,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the ffmpeg binary, overriding the config
    #[arg(long)]
    ffmpeg: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = load_configuration(&cli)?;

    let mut converter_config = config.converter.clone();
    if let Some(ffmpeg) = &cli.ffmpeg {
        converter_config.ffmpeg_path = ffmpeg.clone();
    }

    let converter = FfmpegConverter::new(converter_config);
    converter
        .validate()
        .await
        .context("ffmpeg is not usable; install it or point --ffmpeg at the binary")?;

    let options = build_options(&cli, &config);
    info!(
        input = %options.input_root.display(),
        output = %options.output_root().display(),
        format = ?options.format,
        "starting batch"
    );

    let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER_SIZE);
    let handle = BatchRunner::new(options, converter).spawn(Some(event_tx));

    // Ctrl+C requests cancellation; the in-flight conversion finishes.
    let canceller = handle.canceller();
    tokio::spawn(async move {
        shutdown_signal().await;
        warn!("shutdown requested, cancelling pending conversions");
        canceller.cancel();
    });

    let logger = tokio::spawn(log_events(event_rx));

    let result = handle.wait().await.context("batch failed")?;
    let _ = logger.await;

    print_summary(&result);

    if result.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn load_configuration(cli: &Cli) -> Result<Config> {
    let config_path = cli.config.clone().or_else(|| {
        std::env::var("VIDRIP_CONFIG").ok().map(PathBuf::from)
    });

    match config_path {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            load_config(&path).with_context(|| format!("Failed to load config from {:?}", path))
        }
        None => load_default_config().context("Failed to load configuration"),
    }
}

fn build_options(cli: &Cli, config: &Config) -> ConversionOptions {
    let mut options = config
        .options_for(&cli.input)
        .with_recursive(config.defaults.recursive && !cli.no_recursive)
        .with_overwrite(config.defaults.overwrite_existing || cli.overwrite);

    if let Some(format) = cli.format {
        options = options.with_format(format);
    }
    // clap bounds the flag to 0-4, so from_level cannot fail here.
    if let Some(quality) = cli.quality.and_then(|q| QualityLevel::from_level(q).ok()) {
        options = options.with_quality(quality);
    }

    if let Some(output) = &cli.output {
        options = options.with_output_root(output);
    }
    if !cli.extensions.is_empty() {
        options = options.with_extensions(cli.extensions.clone());
    }
    options
}

async fn log_events(mut event_rx: mpsc::Receiver<BatchEvent>) {
    while let Some(event) = event_rx.recv().await {
        match event {
            BatchEvent::ScanCompleted { files_found } => {
                info!(files_found, "scan completed");
            }
            BatchEvent::JobStarted { job_id, file_name } => {
                info!(job_id = %job_id, file = %file_name, "converting");
            }
            BatchEvent::JobFinished { job_id, status } => match status {
                JobStatus::Failed { reason } => {
                    warn!(job_id = %job_id, reason = %reason, "failed");
                }
                other => info!(job_id = %job_id, status = other.label(), "done"),
            },
            BatchEvent::BatchFinished { .. } => {}
        }
    }
}

fn print_summary(result: &BatchResult) {
    println!(
        "converted {} file(s) in {:.1}s: {} succeeded, {} failed, {} skipped, {} cancelled",
        result.total(),
        result.duration_ms as f64 / 1000.0,
        result.succeeded,
        result.failed,
        result.skipped,
        result.cancelled,
    );
    for job in &result.jobs {
        if let JobStatus::Failed { reason } = &job.status {
            println!("  failed: {} ({})", job.job_id, reason);
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
