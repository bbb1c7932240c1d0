//! Duration extraction via an injected probe capability

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::ProbeError;

/// Extracts a media file's playback duration in seconds.
///
/// The scan engine treats this as a black box: implementations may open
/// the container in-process or shell out to an external tool. Closures
/// with the matching signature implement it too, which keeps the engine
/// testable with deterministic fakes.
pub trait DurationProbe: Send + Sync {
    /// Probe the file at `path`, returning its duration in seconds
    fn probe(&self, path: &Path) -> Result<f64, ProbeError>;
}

impl<F> DurationProbe for F
where
    F: Fn(&Path) -> Result<f64, ProbeError> + Send + Sync,
{
    fn probe(&self, path: &Path) -> Result<f64, ProbeError> {
        self(path)
    }
}

/// Probe backed by the `ffprobe` command-line tool.
#[derive(Debug, Clone)]
pub struct FfprobeDurationProbe {
    binary: PathBuf,
}

impl FfprobeDurationProbe {
    /// Use `ffprobe` from PATH
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("ffprobe"),
        }
    }

    /// Use an explicit ffprobe binary
    pub fn with_binary(binary: PathBuf) -> Self {
        Self { binary }
    }
}

impl Default for FfprobeDurationProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl DurationProbe for FfprobeDurationProbe {
    fn probe(&self, path: &Path) -> Result<f64, ProbeError> {
        let output = Command::new(&self.binary)
            .args(["-v", "quiet", "-print_format", "json", "-show_format"])
            .arg(path)
            .output()?;

        if !output.status.success() {
            return Err(ProbeError::ProcessFailed(output.status));
        }

        parse_ffprobe_output(&output.stdout, path)
    }
}

/// Parse `format.duration` out of ffprobe's JSON output
fn parse_ffprobe_output(stdout: &[u8], path: &Path) -> Result<f64, ProbeError> {
    let value: serde_json::Value = serde_json::from_slice(stdout)
        .map_err(|e| ProbeError::InvalidOutput(e.to_string()))?;

    let duration = value
        .get("format")
        .and_then(|f| f.get("duration"))
        .and_then(|d| d.as_str())
        .ok_or_else(|| ProbeError::MissingDuration(path.to_path_buf()))?;

    let secs: f64 = duration
        .parse()
        .map_err(|_| ProbeError::InvalidOutput(format!("bad duration field: {duration}")))?;

    Ok(secs.max(0.0))
}
