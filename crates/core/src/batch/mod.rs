//! Batch orchestration: scan, map, convert, report.
//!
//! A batch is one user-initiated run over a directory tree. The runner
//! scans for inputs, executes one conversion job per file on a
//! background task, and reports through a typed event stream plus an
//! aggregate `BatchResult`.

mod runner;
mod types;

pub use runner::{BatchCanceller, BatchError, BatchHandle, BatchRunner};
pub use types::{BatchEvent, BatchResult, ConversionOptions, JobRecord, JobStatus};
