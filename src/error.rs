//! Error types for the scan engine

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that prevent a scan from starting.
///
/// Per-file problems (unreadable content, probe rejections) are never
/// represented here; they are captured as data in the final report.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The configured root path does not exist
    #[error("root path does not exist: {0}")]
    RootNotFound(PathBuf),

    /// The configured root path exists but is not a directory
    #[error("root path is not a directory: {0}")]
    RootNotADirectory(PathBuf),

    /// The worker pool could not be constructed
    #[error("failed to build worker pool: {0}")]
    WorkerPool(String),
}

/// Failure of the external duration probe on a single file.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The probe process could not be launched
    #[error("failed to launch probe process: {0}")]
    Spawn(#[from] std::io::Error),

    /// The probe process ran but exited unsuccessfully
    #[error("probe exited with status {0}")]
    ProcessFailed(std::process::ExitStatus),

    /// The probe produced output that could not be parsed
    #[error("unparseable probe output: {0}")]
    InvalidOutput(String),

    /// The probe ran but reported no duration for the file
    #[error("no duration reported for {0}")]
    MissingDuration(PathBuf),
}
