//! Per-file work unit pipeline: hash, then probe

use crate::hasher::ContentHasher;
use crate::models::{FailedFile, FailureReason, FileRecord};
use crate::probe::DurationProbe;
use crate::walker::Candidate;

/// Verdict for one processed work unit
#[derive(Debug, Clone, PartialEq)]
pub enum UnitOutcome {
    /// Both steps succeeded; the file becomes a record
    Record(FileRecord),
    /// Hashing or probing failed; the file is reported, never retried
    Failed(FailedFile),
}

/// Process a single candidate that already passed the path filter.
///
/// Both the content hash and the duration must be obtained for the file
/// to become a record; the first failing step classifies the failure.
pub fn process_unit(
    candidate: &Candidate,
    hasher: &ContentHasher,
    probe: &dyn DurationProbe,
) -> UnitOutcome {
    let hash = match hasher.hash(&candidate.path) {
        Ok(hash) => hash,
        Err(e) => {
            log::debug!("hashing failed for {}: {}", candidate.path.display(), e);
            return UnitOutcome::Failed(FailedFile {
                path: candidate.path.clone(),
                reason: FailureReason::HashError,
            });
        }
    };

    let duration_secs = match probe.probe(&candidate.path) {
        Ok(secs) => secs,
        Err(e) => {
            log::debug!("probe failed for {}: {}", candidate.path.display(), e);
            return UnitOutcome::Failed(FailedFile {
                path: candidate.path.clone(),
                reason: FailureReason::ProbeError,
            });
        }
    };

    UnitOutcome::Record(FileRecord {
        path: candidate.path.clone(),
        size: candidate.size,
        duration_secs,
        hash,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProbeError;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn candidate(dir: &TempDir, name: &str, content: &[u8]) -> Candidate {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        Candidate {
            path,
            size: content.len() as u64,
        }
    }

    #[test]
    fn test_successful_unit_becomes_record() {
        let dir = TempDir::new().unwrap();
        let c = candidate(&dir, "a.mp4", b"content");
        let probe = |_: &Path| Ok(60.0);

        match process_unit(&c, &ContentHasher::new(), &probe) {
            UnitOutcome::Record(record) => {
                assert_eq!(record.path, c.path);
                assert_eq!(record.size, 7);
                assert_eq!(record.duration_secs, 60.0);
                assert_eq!(record.hash.len(), 64);
            }
            UnitOutcome::Failed(f) => panic!("unexpected failure: {:?}", f),
        }
    }

    #[test]
    fn test_unreadable_file_is_hash_error() {
        let dir = TempDir::new().unwrap();
        let c = Candidate {
            path: dir.path().join("missing.mp4"),
            size: 10,
        };
        let probe = |_: &Path| Ok(60.0);

        match process_unit(&c, &ContentHasher::new(), &probe) {
            UnitOutcome::Failed(f) => {
                assert_eq!(f.reason, FailureReason::HashError);
                assert_eq!(f.path, c.path);
            }
            UnitOutcome::Record(_) => panic!("expected hash failure"),
        }
    }

    #[test]
    fn test_probe_rejection_is_probe_error() {
        let dir = TempDir::new().unwrap();
        let c = candidate(&dir, "bad.mp4", b"not really media");
        let probe = |p: &Path| -> Result<f64, ProbeError> {
            Err(ProbeError::MissingDuration(PathBuf::from(p)))
        };

        match process_unit(&c, &ContentHasher::new(), &probe) {
            UnitOutcome::Failed(f) => assert_eq!(f.reason, FailureReason::ProbeError),
            UnitOutcome::Record(_) => panic!("expected probe failure"),
        }
    }

    #[test]
    fn test_probe_not_consulted_when_hash_fails() {
        let dir = TempDir::new().unwrap();
        let c = Candidate {
            path: dir.path().join("missing.mp4"),
            size: 10,
        };
        let probe = |_: &Path| -> Result<f64, ProbeError> {
            panic!("probe must not run after a hash failure")
        };

        let outcome = process_unit(&c, &ContentHasher::new(), &probe);
        assert!(matches!(
            outcome,
            UnitOutcome::Failed(FailedFile {
                reason: FailureReason::HashError,
                ..
            })
        ));
    }
}
