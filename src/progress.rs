//! Progress estimation and reporting for scan operations
//!
//! The estimator converts work completed so far into a completion
//! percentage and a projected total duration; the printer renders updates
//! to stderr at a bounded rate for CLI consumption.

use std::io::Write;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::models::format_hours_minutes;

/// Snapshot of scan progress, produced after each completed work unit
/// under the coordinator's state lock, so every field is mutually
/// consistent.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    /// Work units that have reported a result (successes + failures)
    pub completed_units: u64,
    /// Work units dispatched in total
    pub total_units: u64,
    /// Files successfully hashed and probed so far
    pub processed_files: u64,
    /// Candidates excluded by the minimum-size threshold
    pub skipped_files: u64,
    /// Files that failed hashing or probing so far
    pub failed_files: u64,
    /// Completion percentage in [0, 100]
    pub percent_complete: f64,
    /// Sum of durations measured so far, in seconds
    pub current_duration_secs: f64,
    /// Projected duration of all dispatched files; absent until the first
    /// unit completes
    pub estimated_total_secs: Option<f64>,
    /// Projected wall-clock time remaining, in seconds
    pub eta_secs: Option<f64>,
    /// Wall-clock time since dispatch began, in seconds
    pub elapsed_secs: f64,
}

/// Result of one estimation step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    /// Completion percentage in [0, 100]
    pub percent_complete: f64,
    /// Sum of durations measured so far, in seconds
    pub current_duration_secs: f64,
    /// Projected duration of all dispatched files
    pub estimated_total_secs: Option<f64>,
    /// Projected wall-clock time remaining
    pub eta_secs: Option<f64>,
}

/// Converts elapsed work into a duration projection and a completion
/// percentage.
///
/// Dispatch order is randomized upstream precisely so that the per-file
/// sample this extrapolates from is not biased by directory layout.
pub struct ProgressEstimator;

impl ProgressEstimator {
    /// Estimate progress after `completed` of `total` units.
    ///
    /// With zero total units the scan is complete by definition (100%).
    /// Before the first unit completes, both projections are undefined and
    /// reported as absent rather than zero.
    pub fn estimate(
        completed: u64,
        total: u64,
        elapsed_secs: f64,
        duration_sum_secs: f64,
    ) -> Estimate {
        let percent_complete = if total == 0 {
            100.0
        } else {
            completed as f64 / total as f64 * 100.0
        };

        let (estimated_total_secs, eta_secs) = if completed == 0 {
            (None, None)
        } else {
            let per_unit = duration_sum_secs / completed as f64;
            let remaining = total.saturating_sub(completed) as f64;
            (
                Some(per_unit * total as f64),
                Some(elapsed_secs / completed as f64 * remaining),
            )
        };

        Estimate {
            percent_complete,
            current_duration_secs: duration_sum_secs,
            estimated_total_secs,
            eta_secs,
        }
    }
}

/// Default minimum interval between printed progress lines
pub const DEFAULT_PRINT_INTERVAL_MS: u64 = 500;

/// Renders progress updates to stderr at a bounded rate.
///
/// The final update of a run (100%) is always printed regardless of the
/// interval.
pub struct ProgressPrinter {
    interval: Duration,
    last_print: Mutex<Option<Instant>>,
}

impl ProgressPrinter {
    /// Create a printer with the default interval
    pub fn new() -> Self {
        Self::with_interval_ms(DEFAULT_PRINT_INTERVAL_MS)
    }

    /// Create a printer with a custom minimum interval
    pub fn with_interval_ms(interval_ms: u64) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms),
            last_print: Mutex::new(None),
        }
    }

    /// Print the update if the interval has elapsed (or the run just
    /// finished). Returns true if a line was written.
    pub fn report(&self, update: &ProgressUpdate) -> bool {
        let finished = update.completed_units == update.total_units;
        let mut last = self.last_print.lock().expect("printer lock poisoned");
        if !finished {
            if let Some(at) = *last {
                if at.elapsed() < self.interval {
                    return false;
                }
            }
        }
        *last = Some(Instant::now());
        drop(last);

        eprintln!("{}", render_progress_line(update));
        std::io::stderr().flush().ok();
        true
    }
}

impl Default for ProgressPrinter {
    fn default() -> Self {
        Self::new()
    }
}

/// Format one human-readable progress line
fn render_progress_line(update: &ProgressUpdate) -> String {
    let mut line = format!(
        "[{}/{} ({:.1}%)] Sum of durations so far: {}",
        update.completed_units,
        update.total_units,
        update.percent_complete,
        format_hours_minutes(update.current_duration_secs),
    );
    if let Some(estimated) = update.estimated_total_secs {
        line.push_str(&format!(
            " | Estimated total for all files: {}",
            format_hours_minutes(estimated)
        ));
    }
    if update.skipped_files > 0 {
        line.push_str(&format!(" | Skipped: {}", update.skipped_files));
    }
    line
}
