//! Scan coordination: worker pool, shared aggregation state, cancellation

use rand::seq::SliceRandom;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::filter::PathFilter;
use crate::hasher::ContentHasher;
use crate::models::{FailedFile, FileRecord, ScanReport, ScanStatus, SkippedFile};
use crate::probe::DurationProbe;
use crate::processor::{process_unit, UnitOutcome};
use crate::progress::{ProgressEstimator, ProgressUpdate};
use crate::report::ReportBuilder;
use crate::walker::{DirectoryWalker, WalkOutcome};

/// Progress callback type, invoked with a consistent snapshot after each
/// completed work unit
pub type ProgressCallback = Box<dyn Fn(&ProgressUpdate) + Send + Sync>;

/// Handle for cooperative cancellation of a running scan.
///
/// Cancelling prevents new work units from starting; in-flight units
/// finish and still report. The partial result is a valid report.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    /// Request cancellation
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Check whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Mutable aggregation state for one scan invocation.
///
/// Owned by the coordinator; all mutation happens under a single mutex,
/// one completed unit at a time, so the counting invariants are never
/// observable mid-update.
#[derive(Debug)]
pub struct ScanState {
    /// Lifecycle position of this scan
    pub status: ScanStatus,
    /// Candidate files found by the walker (dispatched + skipped)
    pub total_files: u64,
    /// Successfully processed files, in completion order
    pub records: Vec<FileRecord>,
    /// Files that failed hashing or probing, in completion order
    pub failed: Vec<FailedFile>,
    /// Candidates excluded by the minimum-size threshold
    pub skipped: Vec<SkippedFile>,
    /// Running sum of measured durations in seconds
    pub duration_sum_secs: f64,
    /// Running sum of processed file sizes in bytes
    pub size_sum_bytes: u64,
    /// Work units that have reported a result
    pub completed_units: u64,
    /// Monotonic start timestamp
    pub started: Instant,
}

impl ScanState {
    fn new(total_files: u64, skipped: Vec<SkippedFile>) -> Self {
        Self {
            status: ScanStatus::Idle,
            total_files,
            records: Vec::new(),
            failed: Vec::new(),
            skipped,
            duration_sum_secs: 0.0,
            size_sum_bytes: 0,
            completed_units: 0,
            started: Instant::now(),
        }
    }

    /// Fold one unit's outcome into the aggregates
    fn apply(&mut self, outcome: UnitOutcome) {
        self.completed_units += 1;
        match outcome {
            UnitOutcome::Record(record) => {
                self.duration_sum_secs += record.duration_secs;
                self.size_sum_bytes += record.size;
                self.records.push(record);
            }
            UnitOutcome::Failed(failed) => {
                self.failed.push(failed);
            }
        }
    }

    /// Produce a progress snapshot; caller must hold the state lock
    fn snapshot(&self, total_units: u64) -> ProgressUpdate {
        let elapsed_secs = self.started.elapsed().as_secs_f64();
        let estimate = ProgressEstimator::estimate(
            self.completed_units,
            total_units,
            elapsed_secs,
            self.duration_sum_secs,
        );
        ProgressUpdate {
            completed_units: self.completed_units,
            total_units,
            processed_files: self.records.len() as u64,
            skipped_files: self.skipped.len() as u64,
            failed_files: self.failed.len() as u64,
            percent_complete: estimate.percent_complete,
            current_duration_secs: estimate.current_duration_secs,
            estimated_total_secs: estimate.estimated_total_secs,
            eta_secs: estimate.eta_secs,
            elapsed_secs,
        }
    }
}

/// Coordinates one scan: enumerates candidates, dispatches them across a
/// bounded worker pool, aggregates results, and builds the final report.
pub struct Scanner {
    config: ScanConfig,
    hasher: ContentHasher,
    probe: Arc<dyn DurationProbe>,
    cancel: Arc<AtomicBool>,
}

impl Scanner {
    /// Create a scanner for the given configuration and probe
    pub fn new(config: ScanConfig, probe: Arc<dyn DurationProbe>) -> Self {
        Self {
            config,
            hasher: ContentHasher::new(),
            probe,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get a handle that can cancel this scanner's running scan
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            flag: Arc::clone(&self.cancel),
        }
    }

    /// Run a scan without progress reporting
    pub fn scan(&self) -> Result<ScanReport, ScanError> {
        self.scan_internal(None)
    }

    /// Run a scan, invoking `on_progress` after every completed file
    pub fn scan_with_progress(
        &self,
        on_progress: ProgressCallback,
    ) -> Result<ScanReport, ScanError> {
        self.scan_internal(Some(on_progress))
    }

    fn scan_internal(
        &self,
        on_progress: Option<ProgressCallback>,
    ) -> Result<ScanReport, ScanError> {
        let root = &self.config.root;
        if !root.exists() {
            return Err(ScanError::RootNotFound(root.clone()));
        }
        if !root.is_dir() {
            return Err(ScanError::RootNotADirectory(root.clone()));
        }

        self.cancel.store(false, Ordering::Release);

        let walker = DirectoryWalker::new(PathFilter::from_config(&self.config));
        let outcome = walker.walk(root);
        let total_files = outcome.total_files();
        let WalkOutcome {
            mut candidates,
            skipped,
        } = outcome;
        log::info!(
            "found {} candidate files under {} ({} below size threshold)",
            total_files,
            root.display(),
            skipped.len()
        );

        // Shuffle so the estimator's per-file cost sample is not biased
        // by directory layout.
        candidates.shuffle(&mut rand::thread_rng());
        let total_units = candidates.len() as u64;

        let mut state = ScanState::new(total_files, skipped);
        state.status = ScanStatus::Running;
        let state = Mutex::new(state);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.effective_workers())
            .build()
            .map_err(|e| ScanError::WorkerPool(e.to_string()))?;

        pool.install(|| {
            candidates.par_iter().for_each(|candidate| {
                // Units not yet started are dropped after cancellation;
                // in-flight ones finish and still report below.
                if self.cancel.load(Ordering::Acquire) {
                    return;
                }

                let outcome = process_unit(candidate, &self.hasher, self.probe.as_ref());
                let is_failure = matches!(outcome, UnitOutcome::Failed(_));

                let mut state = state.lock().expect("scan state mutex poisoned");
                state.apply(outcome);
                if is_failure && self.config.stop_on_failure {
                    self.cancel.store(true, Ordering::Release);
                }
                let update = state.snapshot(total_units);
                if let Some(callback) = &on_progress {
                    callback(&update);
                }
            });
        });

        let mut state = state.into_inner().expect("scan state mutex poisoned");
        state.status = if self.cancel.load(Ordering::Acquire) {
            ScanStatus::Cancelled
        } else {
            ScanStatus::Completed
        };
        log::info!(
            "scan {:?}: {} processed, {} skipped, {} failed in {:.2}s",
            state.status,
            state.records.len(),
            state.skipped.len(),
            state.failed.len(),
            state.started.elapsed().as_secs_f64()
        );

        Ok(ReportBuilder::build(&state, &self.config))
    }
}
