//! Media Meter CLI
//!
//! Scans a directory tree for media files and reports total duration,
//! size, and byte-identical duplicates.

use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use media_meter::{
    FfprobeDurationProbe, ProgressPrinter, ProgressUpdate, ScanConfig, ScanReport, Scanner,
};

/// Concurrent media duration and size scanner
#[derive(Parser)]
#[command(name = "media_meter")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a directory tree for media files
    Scan {
        /// Root directory to scan
        #[arg(short = 'r', long)]
        root: PathBuf,

        /// Minimum file size in KB; smaller media files are skipped
        #[arg(short = 'm', long, default_value = "0")]
        min_size_kb: u64,

        /// Number of worker threads (1-16)
        #[arg(short = 'w', long, default_value = "4")]
        workers: usize,

        /// Comma-separated media extensions to include
        #[arg(short = 'e', long, value_delimiter = ',')]
        extensions: Option<Vec<String>>,

        /// Write the JSON report to this file
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Print the JSON report to stdout
        #[arg(long)]
        json: bool,

        /// Stop processing on the first file error
        #[arg(long)]
        stop_on_error: bool,

        /// Do not print progress lines to stderr
        #[arg(long)]
        no_progress: bool,

        /// Path to the ffprobe binary
        #[arg(long, default_value = "ffprobe")]
        ffprobe: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            root,
            min_size_kb,
            workers,
            extensions,
            output,
            json,
            stop_on_error,
            no_progress,
            ffprobe,
        } => {
            let mut builder = ScanConfig::builder()
                .root(root)
                .min_file_size_kb(min_size_kb)
                .workers(workers)
                .stop_on_failure(stop_on_error);
            if let Some(extensions) = extensions {
                builder = builder.extensions(
                    extensions.iter().map(|e| e.to_lowercase()).collect(),
                );
            }
            let config = builder.build();

            info!("scanning {} with {} workers", config.root.display(), config.effective_workers());

            let probe = Arc::new(FfprobeDurationProbe::with_binary(ffprobe));
            let scanner = Scanner::new(config, probe);

            let result = if no_progress {
                scanner.scan()
            } else {
                let printer = ProgressPrinter::new();
                scanner.scan_with_progress(Box::new(move |update: &ProgressUpdate| {
                    printer.report(update);
                }))
            };

            let report = match result {
                Ok(report) => report,
                Err(e) => {
                    log::error!("{}", e);
                    std::process::exit(1);
                }
            };

            if let Some(path) = &output {
                match serde_json::to_string_pretty(&report) {
                    Ok(body) => {
                        if let Err(e) = fs::write(path, body) {
                            log::error!("failed to write {}: {}", path.display(), e);
                            std::process::exit(1);
                        }
                        info!("report saved to {}", path.display());
                    }
                    Err(e) => {
                        log::error!("failed to serialize report: {}", e);
                        std::process::exit(1);
                    }
                }
            }

            if json {
                match serde_json::to_string_pretty(&report) {
                    Ok(body) => println!("{}", body),
                    Err(e) => {
                        log::error!("failed to serialize report: {}", e);
                        std::process::exit(1);
                    }
                }
            } else {
                print_summary(&report);
            }
        }
    }
}

/// Print the human-readable summary
fn print_summary(report: &ScanReport) {
    let s = &report.summary;
    println!("Scan completed:");
    println!("  Total files: {}", s.total_files);
    println!("  Processed: {}", s.processed_files);
    if s.skipped_files > 0 {
        println!(
            "  Skipped: {} (smaller than {} KB)",
            s.skipped_files, s.min_file_size_kb
        );
    }
    println!("  Failed: {}", s.failed_files_count);
    println!("  Total size: {:.2} GB", s.total_size_gb);
    println!(
        "  Total duration: {} ({:.0}s)",
        s.total_duration_readable, s.total_duration_seconds
    );
    if s.duplicate_groups_count > 0 {
        println!(
            "  Duplicates: {} groups, {} files",
            s.duplicate_groups_count, s.total_duplicate_files
        );
        for (i, group) in report.duplicate_groups.iter().enumerate() {
            println!("    Group {}: {} identical files", i + 1, group.len());
            for path in group {
                println!("      - {}", path);
            }
        }
    } else {
        println!("  No duplicate files found");
    }
    if !report.failed_files.is_empty() {
        println!("  Failed to process {} files:", report.failed_files.len());
        for path in &report.failed_files {
            println!("    - {}", path);
        }
    }
}
