//! Folds scan state into the final structured report

use std::collections::{BTreeMap, HashMap};

use crate::config::ScanConfig;
use crate::models::{format_hours_minutes, FileEntry, ScanReport, ScanSummary};
use crate::scanner::ScanState;

const BYTES_PER_GB: f64 = (1u64 << 30) as f64;

/// Derives the report purely from scan state; building twice from
/// unchanged state yields byte-identical output.
pub struct ReportBuilder;

impl ReportBuilder {
    /// Build the report for `state`
    pub fn build(state: &ScanState, config: &ScanConfig) -> ScanReport {
        let duplicate_groups = Self::duplicate_groups(state);
        let total_duplicate_files: u64 = duplicate_groups.iter().map(|g| g.len() as u64).sum();

        let summary = ScanSummary {
            total_files: state.total_files,
            processed_files: state.records.len() as u64,
            skipped_files: state.skipped.len() as u64,
            min_file_size_kb: config.min_file_size_kb,
            total_size_gb: state.size_sum_bytes as f64 / BYTES_PER_GB,
            total_duration_seconds: state.duration_sum_secs,
            total_duration_readable: format_hours_minutes(state.duration_sum_secs),
            failed_files_count: state.failed.len() as u64,
            duplicate_groups_count: duplicate_groups.len() as u64,
            total_duplicate_files,
        };

        let files: BTreeMap<String, FileEntry> = state
            .records
            .iter()
            .map(|record| {
                (
                    record.path.to_string_lossy().into_owned(),
                    FileEntry {
                        duration: record.duration_secs,
                        size: record.size,
                        hash: record.hash.clone(),
                    },
                )
            })
            .collect();

        let failed_files = state
            .failed
            .iter()
            .map(|f| f.path.to_string_lossy().into_owned())
            .collect();

        ScanReport {
            summary,
            files,
            duplicate_groups,
            failed_files,
        }
    }

    /// Group records by content hash, keeping only hashes with >=2 paths.
    ///
    /// Derived in one pass after all records are known; groups and their
    /// member paths come out in record-insertion order, which for a
    /// concurrent run is completion order and not stable across runs.
    fn duplicate_groups(state: &ScanState) -> Vec<Vec<String>> {
        let mut by_hash: HashMap<&str, Vec<String>> = HashMap::new();
        let mut hash_order: Vec<&str> = Vec::new();

        for record in &state.records {
            let paths = by_hash.entry(record.hash.as_str()).or_insert_with(|| {
                hash_order.push(record.hash.as_str());
                Vec::new()
            });
            paths.push(record.path.to_string_lossy().into_owned());
        }

        hash_order
            .into_iter()
            .filter_map(|hash| {
                let paths = by_hash.remove(hash)?;
                (paths.len() >= 2).then_some(paths)
            })
            .collect()
    }
}
