//! Configuration for the scan engine

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Default minimum file size threshold in KB (0 = no filtering)
pub const DEFAULT_MIN_FILE_SIZE_KB: u64 = 0;

/// Default number of worker threads
pub const DEFAULT_WORKERS: usize = 4;

/// Maximum number of worker threads
pub const MAX_WORKERS: usize = 16;

/// Configuration for a single scan invocation
///
/// All knobs are explicit values carried by this struct; the engine never
/// reads ambient process-wide state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Root directory to scan
    pub root: PathBuf,

    /// File extensions to include (lowercase, without dot)
    pub extensions: HashSet<String>,

    /// Minimum file size in KB; smaller candidates are recorded as skipped
    pub min_file_size_kb: u64,

    /// Number of worker threads (clamped to 1..=16 at use)
    pub workers: usize,

    /// Cancel the scan after the first per-file failure
    pub stop_on_failure: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            extensions: Self::default_extensions(),
            min_file_size_kb: DEFAULT_MIN_FILE_SIZE_KB,
            workers: DEFAULT_WORKERS,
            stop_on_failure: false,
        }
    }
}

impl ScanConfig {
    /// Create a new config for the given root directory
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            ..Default::default()
        }
    }

    /// Create a config builder
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::new()
    }

    /// Get the default media extensions
    pub fn default_extensions() -> HashSet<String> {
        ["mp3", "mp4", "avi", "mkv", "mov", "wav", "flac", "mxf", "raw"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Check if an extension should be included (case-insensitive)
    pub fn should_include_extension(&self, ext: &str) -> bool {
        self.extensions.contains(&ext.to_lowercase())
    }

    /// Get the minimum file size threshold in bytes
    pub fn min_file_size_bytes(&self) -> u64 {
        self.min_file_size_kb * 1024
    }

    /// Get the effective worker count, clamped to 1..=16
    pub fn effective_workers(&self) -> usize {
        self.workers.clamp(1, MAX_WORKERS)
    }
}

/// Builder for ScanConfig
#[derive(Debug, Default)]
pub struct ScanConfigBuilder {
    config: ScanConfig,
}

impl ScanConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root directory
    pub fn root(mut self, root: PathBuf) -> Self {
        self.config.root = root;
        self
    }

    /// Set the extensions whitelist
    pub fn extensions(mut self, extensions: HashSet<String>) -> Self {
        self.config.extensions = extensions;
        self
    }

    /// Add a single extension to the whitelist
    pub fn add_extension(mut self, ext: impl Into<String>) -> Self {
        self.config.extensions.insert(ext.into().to_lowercase());
        self
    }

    /// Set the minimum file size threshold in KB
    pub fn min_file_size_kb(mut self, kb: u64) -> Self {
        self.config.min_file_size_kb = kb;
        self
    }

    /// Set the number of worker threads
    pub fn workers(mut self, workers: usize) -> Self {
        self.config.workers = workers;
        self
    }

    /// Enable or disable cancelling on the first per-file failure
    pub fn stop_on_failure(mut self, enabled: bool) -> Self {
        self.config.stop_on_failure = enabled;
        self
    }

    /// Build the config
    pub fn build(self) -> ScanConfig {
        self.config
    }
}
