use crate::catalog::UNKNOWN;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Release tier as labelled in the file name.
///
/// This is read from naming conventions only. Probed resolution does not
/// reliably say which tier a release was published as, so it feeds the
/// aspect ratio and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quality {
    #[serde(rename = "4K")]
    Uhd,
    #[serde(rename = "1080p")]
    FullHd,
    #[serde(rename = "720p")]
    Hd,
    Unknown,
}

impl Quality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Uhd => "4K",
            Quality::FullHd => "1080p",
            Quality::Hd => "720p",
            Quality::Unknown => UNKNOWN,
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checks the file name (not the directories above it) for tier markers.
/// Rules are tried in order and the first hit wins.
pub fn get_video_quality(path: &Path) -> Quality {
    let file_name = match path.file_name() {
        Some(name) => name.to_string_lossy().to_lowercase(),
        None => return Quality::Unknown,
    };

    if file_name.contains("2160p") || file_name.contains("4k") {
        Quality::Uhd
    } else if file_name.contains("1080p") {
        Quality::FullHd
    } else if file_name.contains("720p") {
        Quality::Hd
    } else {
        Quality::Unknown
    }
}

/// Width over height to two decimals for a `"<w>x<h>"` resolution.
pub fn get_aspect_ratio(resolution: &str) -> String {
    parse_resolution(resolution)
        .map(|(width, height)| format!("{:.2}", width as f64 / height as f64))
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// `Some((width, height))` when both sides are integers and height is nonzero.
pub fn parse_resolution(resolution: &str) -> Option<(u32, u32)> {
    let (width, height) = resolution.split_once('x')?;
    let width: u32 = width.trim().parse().ok()?;
    let height: u32 = height.trim().parse().ok()?;
    if height == 0 {
        return None;
    }
    Some((width, height))
}
