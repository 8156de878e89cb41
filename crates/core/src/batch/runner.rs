//! Batch worker executing conversion jobs off the interactive thread.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::converter::{ConversionJob, Converter};
use crate::mapper;
use crate::scanner::{self, ScanError, SourceFile};

use super::types::{BatchEvent, BatchResult, ConversionOptions, JobRecord, JobStatus};

/// Errors that abort a batch before or outside job execution.
///
/// Per-file conversion failures are not errors at this level; they are
/// recorded as `JobStatus::Failed` and the batch continues.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Scanning the input root failed; no job was started.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// The background worker task failed.
    #[error("batch worker failed: {0}")]
    Worker(String),
}

/// Runs one batch of conversions on a background tokio task.
///
/// Jobs execute sequentially; only the worker mutates job state, and
/// observers follow along through the event channel.
pub struct BatchRunner<C: Converter> {
    options: ConversionOptions,
    converter: Arc<C>,
}

/// Handle to a spawned batch: cancellation and completion.
pub struct BatchHandle {
    cancel: Arc<AtomicBool>,
    join: JoinHandle<Result<BatchResult, BatchError>>,
}

/// Clonable cancellation trigger, detached from the handle so a signal
/// watcher can request cancellation while another task awaits the batch.
#[derive(Clone)]
pub struct BatchCanceller {
    cancel: Arc<AtomicBool>,
}

impl BatchCanceller {
    /// Requests cancellation, same as `BatchHandle::cancel`.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }
}

impl BatchHandle {
    /// Returns a detached cancellation trigger.
    pub fn canceller(&self) -> BatchCanceller {
        BatchCanceller {
            cancel: Arc::clone(&self.cancel),
        }
    }

    /// Requests cancellation.
    ///
    /// No new job is dispatched after the flag is observed; the job in
    /// flight runs to completion. Pending jobs settle as `Cancelled`.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// Waits for the batch to finish and returns the aggregate result.
    pub async fn wait(self) -> Result<BatchResult, BatchError> {
        self.join
            .await
            .map_err(|e| BatchError::Worker(e.to_string()))?
    }
}

impl<C: Converter + 'static> BatchRunner<C> {
    /// Creates a runner for the given options and converter.
    pub fn new(options: ConversionOptions, converter: C) -> Self {
        Self {
            options,
            converter: Arc::new(converter),
        }
    }

    /// Spawns the batch on a background task.
    ///
    /// Events are sent to `event_tx` if provided; a dropped receiver
    /// never stalls the batch.
    pub fn spawn(self, event_tx: Option<mpsc::Sender<BatchEvent>>) -> BatchHandle {
        let cancel = Arc::new(AtomicBool::new(false));
        let worker_cancel = Arc::clone(&cancel);
        let join = tokio::spawn(run_batch(
            self.options,
            self.converter,
            worker_cancel,
            event_tx,
        ));
        BatchHandle { cancel, join }
    }
}

async fn emit(event_tx: &Option<mpsc::Sender<BatchEvent>>, event: BatchEvent) {
    if let Some(tx) = event_tx {
        let _ = tx.send(event).await;
    }
}

async fn run_batch<C: Converter>(
    options: ConversionOptions,
    converter: Arc<C>,
    cancel: Arc<AtomicBool>,
    event_tx: Option<mpsc::Sender<BatchEvent>>,
) -> Result<BatchResult, BatchError> {
    let start = Instant::now();

    // Scan up front; a scan failure aborts before any job starts.
    let root = options.input_root.clone();
    let recursive = options.recursive;
    let extensions = options.extension_set();
    let sources = tokio::task::spawn_blocking(move || scanner::scan(&root, recursive, &extensions))
        .await
        .map_err(|e| BatchError::Worker(e.to_string()))??;

    info!(
        files = sources.len(),
        root = %options.input_root.display(),
        "scan completed"
    );
    emit(
        &event_tx,
        BatchEvent::ScanCompleted {
            files_found: sources.len(),
        },
    )
    .await;

    let output_root = options.output_root().to_path_buf();
    let jobs: Vec<(SourceFile, PathBuf)> = sources
        .into_iter()
        .map(|source| {
            let destination = mapper::map_output_path(&source, &output_root, options.format);
            (source, destination)
        })
        .collect();

    let mut result = BatchResult::default();

    for (source, destination) in jobs {
        let job_id = source.relative_path.display().to_string();

        if cancel.load(Ordering::Relaxed) {
            info!(job_id = %job_id, "cancelled before dispatch");
            record_outcome(&mut result, &event_tx, source, destination, job_id, JobStatus::Cancelled)
                .await;
            continue;
        }

        emit(
            &event_tx,
            BatchEvent::JobStarted {
                job_id: job_id.clone(),
                file_name: source.file_name(),
            },
        )
        .await;

        let status = execute_job(&options, converter.as_ref(), &source, &destination, &job_id).await;
        record_outcome(&mut result, &event_tx, source, destination, job_id, status).await;
    }

    result.duration_ms = start.elapsed().as_millis() as u64;

    info!(
        succeeded = result.succeeded,
        failed = result.failed,
        skipped = result.skipped,
        cancelled = result.cancelled,
        duration_ms = result.duration_ms,
        "batch finished"
    );
    emit(
        &event_tx,
        BatchEvent::BatchFinished {
            succeeded: result.succeeded,
            failed: result.failed,
            skipped: result.skipped,
            cancelled: result.cancelled,
        },
    )
    .await;

    Ok(result)
}

async fn execute_job<C: Converter>(
    options: &ConversionOptions,
    converter: &C,
    source: &SourceFile,
    destination: &PathBuf,
    job_id: &str,
) -> JobStatus {
    // The source file is never written to, even with overwrite enabled.
    // This happens for in-place output when the input already carries the
    // target extension (e.g. an .ogg input converted to ogg).
    if *destination == source.path {
        warn!(job_id = %job_id, "destination equals the source file");
        return JobStatus::Failed {
            reason: format!(
                "destination equals the source file: {}",
                destination.display()
            ),
        };
    }

    // Skip check happens before the converter is ever involved.
    if !options.overwrite_existing && destination.exists() {
        info!(job_id = %job_id, "skipped, destination exists");
        return JobStatus::Skipped;
    }

    if let Err(e) = mapper::prepare_destination(destination).await {
        warn!(job_id = %job_id, error = %e, "failed to create output directory");
        return JobStatus::Failed {
            reason: format!(
                "failed to create output directory for {}: {}",
                destination.display(),
                e
            ),
        };
    }

    info!(job_id = %job_id, "converting");
    let job = ConversionJob {
        job_id: job_id.to_string(),
        input_path: source.path.clone(),
        output_path: destination.clone(),
        format: options.format,
        quality: options.quality,
    };

    match converter.convert(job).await {
        Ok(result) => {
            info!(
                job_id = %job_id,
                bytes = result.output_size_bytes,
                duration_ms = result.duration_ms,
                "converted"
            );
            JobStatus::Succeeded
        }
        Err(e) => {
            let reason = e.reason_text();
            warn!(job_id = %job_id, reason = %reason, "conversion failed");
            JobStatus::Failed { reason }
        }
    }
}

async fn record_outcome(
    result: &mut BatchResult,
    event_tx: &Option<mpsc::Sender<BatchEvent>>,
    source: SourceFile,
    destination: PathBuf,
    job_id: String,
    status: JobStatus,
) {
    match &status {
        JobStatus::Succeeded => result.succeeded += 1,
        JobStatus::Failed { .. } => result.failed += 1,
        JobStatus::Skipped => result.skipped += 1,
        JobStatus::Cancelled => result.cancelled += 1,
        JobStatus::Pending | JobStatus::Running => {}
    }

    emit(
        event_tx,
        BatchEvent::JobFinished {
            job_id: job_id.clone(),
            status: status.clone(),
        },
    )
    .await;

    result.jobs.push(JobRecord {
        job_id,
        input: source.path,
        output: destination,
        status,
    });
}
