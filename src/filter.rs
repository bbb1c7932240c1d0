//! Path filtering rules for candidate selection

use std::collections::HashSet;
use std::path::Path;

use crate::config::ScanConfig;

/// Outcome of filtering a single directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterVerdict {
    /// The entry qualifies for processing
    Accept,
    /// The entry name starts with the hidden-file marker
    Hidden,
    /// The entry's extension is not in the configured media set
    UnsupportedExtension,
    /// The entry is smaller than the minimum-size threshold
    TooSmall,
}

/// Decides whether a filesystem entry qualifies for processing.
///
/// Pure decision logic; the caller stats the entry once and passes the
/// size in.
#[derive(Debug, Clone)]
pub struct PathFilter {
    extensions: HashSet<String>,
    min_size_bytes: u64,
}

impl PathFilter {
    /// Create a filter with an explicit extension set and size threshold
    pub fn new(extensions: HashSet<String>, min_size_bytes: u64) -> Self {
        let extensions = extensions.into_iter().map(|e| e.to_lowercase()).collect();
        Self {
            extensions,
            min_size_bytes,
        }
    }

    /// Create a filter from a scan configuration
    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(config.extensions.clone(), config.min_file_size_bytes())
    }

    /// Evaluate a regular file by name and size.
    ///
    /// Name rules (hidden marker, extension) decide candidacy; the size
    /// rule applies last so a too-small media file is still a candidate,
    /// just a skipped one.
    pub fn evaluate(&self, name: &str, size: u64) -> FilterVerdict {
        if name.starts_with('.') {
            return FilterVerdict::Hidden;
        }

        let extension = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        if !self.extensions.contains(&extension) {
            return FilterVerdict::UnsupportedExtension;
        }

        if size < self.min_size_bytes {
            return FilterVerdict::TooSmall;
        }

        FilterVerdict::Accept
    }

    /// Convenience check for a fully qualifying entry
    pub fn accepts(&self, name: &str, size: u64) -> bool {
        self.evaluate(name, size) == FilterVerdict::Accept
    }
}
