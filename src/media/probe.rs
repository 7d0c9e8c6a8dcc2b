//! ffprobe adapter.
//!
//! Each file is probed with three small, independent ffprobe queries. Any
//! failure (missing tool, non-zero exit, timeout, unparseable output)
//! degrades only the affected field to `"Unknown"`.

use crate::catalog::UNKNOWN;
use crate::error::{CatalogError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeQuery {
    /// Width and height of the first video stream.
    Resolution,
    /// Container duration in seconds.
    Duration,
    /// Language tag of the first audio stream.
    AudioLanguage,
}

impl ProbeQuery {
    pub fn args(&self) -> [&'static str; 8] {
        match self {
            ProbeQuery::Resolution => [
                "-v",
                "error",
                "-select_streams",
                "v:0",
                "-show_entries",
                "stream=width,height",
                "-of",
                "csv=p=0",
            ],
            ProbeQuery::Duration => [
                "-v",
                "error",
                "-select_streams",
                "v:0",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ],
            ProbeQuery::AudioLanguage => [
                "-v",
                "error",
                "-select_streams",
                "a:0",
                "-show_entries",
                "stream_tags=language",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ],
        }
    }
}

impl fmt::Display for ProbeQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProbeQuery::Resolution => "resolution",
            ProbeQuery::Duration => "duration",
            ProbeQuery::AudioLanguage => "audio language",
        })
    }
}

/// Runs one probe query against one file and returns its raw standard output.
#[async_trait]
pub trait ProbeRunner: Send + Sync {
    async fn run(&self, path: &Path, query: ProbeQuery) -> Result<String>;
}

/// [`ProbeRunner`] backed by an ffprobe executable.
#[derive(Debug, Clone)]
pub struct FfprobeRunner {
    program: PathBuf,
    timeout: Duration,
}

impl FfprobeRunner {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    fn tool_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.to_string_lossy().to_string())
    }
}

#[async_trait]
impl ProbeRunner for FfprobeRunner {
    async fn run(&self, path: &Path, query: ProbeQuery) -> Result<String> {
        let tool = self.tool_name();

        let child = Command::new(&self.program)
            .args(query.args())
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| CatalogError::Probe {
                tool: tool.clone(),
                message: format!("failed to spawn: {}", e),
            })?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(CatalogError::Probe {
                    tool,
                    message: format!("I/O error waiting for process: {}", e),
                })
            }
            Err(_) => {
                return Err(CatalogError::Probe {
                    tool,
                    message: format!("timed out after {:?}", self.timeout),
                })
            }
        };

        if !output.status.success() {
            let err = String::from_utf8_lossy(&output.stderr);
            return Err(CatalogError::Probe {
                tool,
                message: format!("exited with {}: {}", output.status, err.trim()),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// The three probed fields of a record, each either a value or `"Unknown"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbedMetadata {
    pub resolution: String,
    pub duration: String,
    pub audio_language: String,
}

#[derive(Clone)]
pub struct MetadataProbe {
    runner: Arc<dyn ProbeRunner>,
}

impl MetadataProbe {
    pub fn new(runner: Arc<dyn ProbeRunner>) -> Self {
        Self { runner }
    }

    /// Runs the three queries concurrently; they fail independently.
    pub async fn probe(&self, path: &Path) -> ProbedMetadata {
        let (resolution, duration, audio_language) = tokio::join!(
            self.resolution(path),
            self.duration(path),
            self.audio_language(path)
        );
        ProbedMetadata {
            resolution,
            duration,
            audio_language,
        }
    }

    pub async fn resolution(&self, path: &Path) -> String {
        self.query(path, ProbeQuery::Resolution, parse_resolution_output)
            .await
    }

    pub async fn duration(&self, path: &Path) -> String {
        self.query(path, ProbeQuery::Duration, |out| {
            parse_duration_output(out).map(format_duration)
        })
        .await
    }

    pub async fn audio_language(&self, path: &Path) -> String {
        self.query(path, ProbeQuery::AudioLanguage, parse_language_output)
            .await
    }

    async fn query<F>(&self, path: &Path, query: ProbeQuery, parse: F) -> String
    where
        F: FnOnce(&str) -> Option<String>,
    {
        match self.runner.run(path, query).await {
            Ok(output) => parse(&output).unwrap_or_else(|| {
                debug!("No usable {} in probe output for {:?}", query, path);
                UNKNOWN.to_string()
            }),
            Err(e) => {
                warn!("Could not probe {} of {:?}: {}", query, path, e);
                UNKNOWN.to_string()
            }
        }
    }
}

fn first_line(output: &str) -> Option<&str> {
    output.lines().map(str::trim).find(|line| !line.is_empty())
}

/// `"1920,1080"` becomes `"1920x1080"`.
pub fn parse_resolution_output(output: &str) -> Option<String> {
    let line = first_line(output)?.trim_end_matches(',');
    let (width, height) = line.split_once(',')?;
    let width: u32 = width.trim().parse().ok()?;
    let height: u32 = height.trim().parse().ok()?;
    Some(format!("{}x{}", width, height))
}

/// Whole seconds; the fractional part is truncated.
pub fn parse_duration_output(output: &str) -> Option<u64> {
    let seconds: f64 = first_line(output)?.parse().ok()?;
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    Some(seconds.trunc() as u64)
}

pub fn parse_language_output(output: &str) -> Option<String> {
    first_line(output).map(str::to_string)
}

/// Zero-padded `HH:MM:SS`. Hours grow past two digits when needed.
pub fn format_duration(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
