//! Concurrent media duration and size scanner with duplicate detection
//!
//! This library scans a directory tree for media files, measures each
//! file's playback duration and size across a bounded worker pool,
//! aggregates totals, detects byte-identical duplicates, and reports
//! progress with a live time estimate.

pub mod config;
pub mod error;
pub mod filter;
pub mod hasher;
pub mod models;
pub mod probe;
pub mod processor;
pub mod progress;
pub mod report;
pub mod scanner;
pub mod walker;

pub use config::ScanConfig;
pub use error::{ProbeError, ScanError};
pub use filter::{FilterVerdict, PathFilter};
pub use hasher::ContentHasher;
pub use models::{
    FailedFile, FailureReason, FileEntry, FileRecord, ScanReport, ScanStatus, ScanSummary,
    SkippedFile,
};
pub use probe::{DurationProbe, FfprobeDurationProbe};
pub use processor::UnitOutcome;
pub use progress::{Estimate, ProgressEstimator, ProgressPrinter, ProgressUpdate};
pub use report::ReportBuilder;
pub use scanner::{CancelHandle, ProgressCallback, Scanner};
pub use walker::{Candidate, DirectoryWalker, WalkOutcome};
