//! Core data models for the scan engine

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A successfully measured media file
///
/// Created once a file has been both hashed and probed; immutable
/// thereafter.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    /// Full path to the file (unique key)
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// Playback duration in seconds
    pub duration_secs: f64,
    /// Content hash as lowercase hex
    pub hash: String,
}

/// Why a single file ended up in the failed list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// Reading the file content for hashing failed
    HashError,
    /// The external duration probe rejected the file
    ProbeError,
}

impl FailureReason {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::HashError => "hash_error",
            FailureReason::ProbeError => "probe_error",
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A file whose processing failed; never retried within a run
#[derive(Debug, Clone, PartialEq)]
pub struct FailedFile {
    /// Full path to the file
    pub path: PathBuf,
    /// Classification of the failure
    pub reason: FailureReason,
}

/// A candidate excluded by the minimum-size threshold
///
/// Skipped files contribute nothing to size or duration totals.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedFile {
    /// Full path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

/// Lifecycle of one scan invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanStatus {
    /// Scan has not started dispatching yet
    #[default]
    Idle,
    /// Work units are being dispatched and applied
    Running,
    /// Every dispatched unit has reported a result
    Completed,
    /// Cancellation was requested; partial state is still valid
    Cancelled,
}

/// Aggregate numbers derived from the record set
///
/// Recomputed from state on every build; never the source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Candidate files found by the walker (processed + skipped + failed)
    pub total_files: u64,
    /// Files successfully hashed and probed
    pub processed_files: u64,
    /// Candidates below the minimum-size threshold
    pub skipped_files: u64,
    /// Minimum-size threshold used for this scan, in KB
    pub min_file_size_kb: u64,
    /// Sum of processed file sizes in GB
    pub total_size_gb: f64,
    /// Sum of processed file durations in seconds
    pub total_duration_seconds: f64,
    /// Total duration formatted as "<H>h <M>m"
    pub total_duration_readable: String,
    /// Files that failed hashing or probing
    pub failed_files_count: u64,
    /// Number of duplicate groups
    pub duplicate_groups_count: u64,
    /// Total paths across all duplicate groups
    pub total_duplicate_files: u64,
}

/// Per-file entry in the report's files map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Playback duration in seconds
    pub duration: f64,
    /// File size in bytes
    pub size: u64,
    /// Content hash as lowercase hex
    pub hash: String,
}

/// Final structured report of one scan
///
/// The files map is keyed by absolute path and ordered, so serializing an
/// unchanged report twice yields byte-identical output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    /// Aggregate summary numbers
    pub summary: ScanSummary,
    /// Successfully processed files keyed by absolute path
    pub files: BTreeMap<String, FileEntry>,
    /// Groups of >=2 paths sharing an identical content hash
    pub duplicate_groups: Vec<Vec<String>>,
    /// Paths that failed hashing or probing
    pub failed_files: Vec<String>,
}

/// Format a duration in seconds as "<H>h <M>m"
pub fn format_hours_minutes(total_secs: f64) -> String {
    let secs = total_secs.max(0.0) as u64;
    format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
}
