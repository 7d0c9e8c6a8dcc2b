use crate::catalog::facets::ToleranceBand;
use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub scanner: ScannerConfig,
    pub probe: ProbeConfig,
    pub facets: FacetConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ScannerConfig {
    /// Recognized video extensions, matched case-insensitively. A leading dot is optional.
    pub extensions: Vec<String>,
    /// Walk dot-prefixed files and directories too.
    pub include_hidden: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ProbeConfig {
    pub ffprobe_path: PathBuf,
    pub timeout_secs: u64,
    pub max_concurrent: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct FacetConfig {
    pub band_label: String,
    pub band_min: f64,
    pub band_max: f64,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            extensions: [".mp4", ".mkv", ".avi", ".mov", ".flv", ".wmv"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            include_hidden: false,
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            ffprobe_path: PathBuf::from("ffprobe"),
            timeout_secs: 30,
            max_concurrent: num_cpus::get(),
        }
    }
}

impl Default for FacetConfig {
    fn default() -> Self {
        Self {
            band_label: "UltraWide".to_string(),
            band_min: 2.2,
            band_max: 2.5,
        }
    }
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl FacetConfig {
    pub fn band(&self) -> ToleranceBand {
        ToleranceBand::new(self.band_label.clone(), self.band_min, self.band_max)
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| CatalogError::Config(format!("Failed to parse {:?}: {}", path, e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.scanner.extensions.is_empty() {
            return Err(CatalogError::Config(
                "scanner.extensions must not be empty".into(),
            ));
        }
        if self.probe.timeout_secs == 0 {
            return Err(CatalogError::Config(
                "probe.timeout_secs must be at least 1".into(),
            ));
        }
        if self.probe.max_concurrent == 0 {
            return Err(CatalogError::Config(
                "probe.max_concurrent must be at least 1".into(),
            ));
        }
        if self.facets.band_label.trim().is_empty() {
            return Err(CatalogError::Config(
                "facets.band_label must not be empty".into(),
            ));
        }
        let (min, max) = (self.facets.band_min, self.facets.band_max);
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(CatalogError::Config(format!(
                "facets band [{}, {}] is not a valid range",
                min, max
            )));
        }
        Ok(())
    }
}
