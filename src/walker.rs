//! Recursive enumeration of candidate media files

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::filter::{FilterVerdict, PathFilter};
use crate::models::SkippedFile;

/// A file that qualifies for processing, with its size cached from the
/// single stat performed during the walk.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Full path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

/// Everything one walk over the tree produced
#[derive(Debug, Clone, Default)]
pub struct WalkOutcome {
    /// Files qualifying for dispatch
    pub candidates: Vec<Candidate>,
    /// Media candidates excluded by the minimum-size threshold
    pub skipped: Vec<SkippedFile>,
}

impl WalkOutcome {
    /// Total candidate count (dispatchable + skipped)
    pub fn total_files(&self) -> u64 {
        (self.candidates.len() + self.skipped.len()) as u64
    }
}

/// Recursively enumerates regular files under a root, applying the path
/// filter to each one.
///
/// Unreadable subtrees are logged and skipped; a walk never aborts the
/// scan. Ordering of the produced sequence is filesystem-dependent and
/// downstream consumers must treat it as arbitrary.
#[derive(Debug, Clone)]
pub struct DirectoryWalker {
    filter: PathFilter,
}

impl DirectoryWalker {
    /// Create a walker using the given filter
    pub fn new(filter: PathFilter) -> Self {
        Self { filter }
    }

    /// Walk the tree under `root`, producing candidates and skipped files.
    ///
    /// Each accepted file is stat'ed exactly once; the size travels with
    /// the candidate so no later stage stats it again.
    pub fn walk(&self, root: &Path) -> WalkOutcome {
        let mut outcome = WalkOutcome::default();

        for entry in WalkDir::new(root).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let name = match entry.file_name().to_str() {
                Some(name) => name,
                None => {
                    log::warn!("skipping non-UTF-8 file name: {}", entry.path().display());
                    continue;
                }
            };

            let size = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(e) => {
                    log::warn!("failed to stat {}: {}", entry.path().display(), e);
                    continue;
                }
            };

            match self.filter.evaluate(name, size) {
                FilterVerdict::Accept => outcome.candidates.push(Candidate {
                    path: entry.into_path(),
                    size,
                }),
                FilterVerdict::TooSmall => outcome.skipped.push(SkippedFile {
                    path: entry.into_path(),
                    size,
                }),
                FilterVerdict::Hidden | FilterVerdict::UnsupportedExtension => {
                    log::trace!("not a candidate: {}", entry.path().display());
                }
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanConfig;
    use std::fs;
    use tempfile::TempDir;

    fn walker(min_size_bytes: u64) -> DirectoryWalker {
        DirectoryWalker::new(PathFilter::new(
            ScanConfig::default_extensions(),
            min_size_bytes,
        ))
    }

    fn touch(path: &Path, bytes: usize) {
        fs::write(path, vec![0u8; bytes]).unwrap();
    }

    #[test]
    fn test_walk_finds_nested_media_files() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("season1").join("disc2");
        fs::create_dir_all(&sub).unwrap();
        touch(&dir.path().join("a.mp4"), 10);
        touch(&sub.join("b.mkv"), 20);

        let outcome = walker(0).walk(dir.path());
        assert_eq!(outcome.candidates.len(), 2);
        assert_eq!(outcome.skipped.len(), 0);
        assert_eq!(outcome.total_files(), 2);
    }

    #[test]
    fn test_walk_excludes_hidden_and_wrong_extension() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("a.mp4"), 10);
        touch(&dir.path().join("b.mp3"), 10);
        touch(&dir.path().join(".hidden.mp4"), 10);
        touch(&dir.path().join("c.txt"), 10);

        let outcome = walker(0).walk(dir.path());
        assert_eq!(outcome.candidates.len(), 2);
        // Hidden and wrong-extension files are not candidates at all
        assert_eq!(outcome.total_files(), 2);
    }

    #[test]
    fn test_walk_records_too_small_files_as_skipped() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("big.mp4"), 2048);
        touch(&dir.path().join("small.mp4"), 100);

        let outcome = walker(1024).walk(dir.path());
        assert_eq!(outcome.candidates.len(), 1);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].size, 100);
        assert!(outcome.skipped[0].path.ends_with("small.mp4"));
        assert_eq!(outcome.total_files(), 2);
    }

    #[test]
    fn test_walk_caches_size_on_candidate() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("a.mp4"), 777);

        let outcome = walker(0).walk(dir.path());
        assert_eq!(outcome.candidates[0].size, 777);
    }

    #[test]
    fn test_walk_descends_hidden_directories() {
        // Only file names are checked for the hidden marker; directories
        // are traversed regardless.
        let dir = TempDir::new().unwrap();
        let hidden_dir = dir.path().join(".archive");
        fs::create_dir(&hidden_dir).unwrap();
        touch(&hidden_dir.join("old.mp4"), 10);

        let outcome = walker(0).walk(dir.path());
        assert_eq!(outcome.candidates.len(), 1);
    }

    #[test]
    fn test_walk_empty_tree() {
        let dir = TempDir::new().unwrap();
        let outcome = walker(0).walk(dir.path());
        assert!(outcome.candidates.is_empty());
        assert!(outcome.skipped.is_empty());
        assert_eq!(outcome.total_files(), 0);
    }

    #[test]
    fn test_walk_is_restartable() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("a.mp4"), 10);

        let w = walker(0);
        let first = w.walk(dir.path());
        let second = w.walk(dir.path());
        assert_eq!(first.candidates.len(), second.candidates.len());
    }
}
