use crate::catalog::{Catalog, VideoRecord, UNKNOWN};
use crate::config::Config;
use crate::error::{CatalogError, Result};
use crate::media::classifier::{get_aspect_ratio, get_video_quality};
use crate::media::naming::{get_decade, NameParser};
use crate::media::probe::{FfprobeRunner, MetadataProbe};
use crate::media::scanner::PathScanner;
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Runs one scan pass: discover, probe, classify, then fold facets.
pub struct CatalogBuilder {
    scanner: PathScanner,
    names: NameParser,
    probe: MetadataProbe,
    max_concurrent: usize,
    cancel: CancellationToken,
}

impl CatalogBuilder {
    pub fn new(scanner: PathScanner, probe: MetadataProbe) -> Result<Self> {
        Ok(Self {
            scanner,
            names: NameParser::new()?,
            probe,
            max_concurrent: 1,
            cancel: CancellationToken::new(),
        })
    }

    /// Builder wired to ffprobe as configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let runner = FfprobeRunner::new(&config.probe.ffprobe_path, config.probe.timeout());
        Ok(Self::new(
            PathScanner::new(&config.scanner.extensions)
                .with_hidden(config.scanner.include_hidden),
            MetadataProbe::new(Arc::new(runner)),
        )?
        .with_max_concurrent(config.probe.max_concurrent))
    }

    /// Upper bound on files probed at once. Values below 1 are treated as 1.
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Scans `root` into a fresh catalog. Records keep discovery order no
    /// matter how many probes ran at once.
    ///
    /// Fails only for an unusable root or cancellation; per-file problems
    /// degrade fields to `"Unknown"`. A cancelled scan returns no records.
    pub async fn build(&self, root: &Path) -> Result<Catalog> {
        check_root(root).await?;

        let started = Instant::now();
        info!("Scanning directory: {:?}", root);

        let paths = self.discover(root).await?;
        info!("Found {} candidate media files", paths.len());

        let records = stream::iter(paths.iter())
            .map(|path| self.build_record(path))
            .buffered(self.max_concurrent)
            .collect::<Vec<_>>();

        let records = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                warn!("Scan of {:?} cancelled, discarding partial results", root);
                return Err(CatalogError::Cancelled);
            }
            records = records => records,
        };

        let catalog = Catalog::from_records(records);
        info!(
            "Catalog built: {} records in {:.2}s",
            catalog.len(),
            started.elapsed().as_secs_f64()
        );
        Ok(catalog)
    }

    /// Derives every field of one record. Never fails.
    pub async fn build_record(&self, path: &Path) -> VideoRecord {
        let folder_name = path
            .parent()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN.to_string());
        let (title, year) = self.names.parse_folder_name(&folder_name);
        let decade = get_decade(&year);
        let quality = get_video_quality(path).to_string();

        let probed = self.probe.probe(path).await;
        let aspect_ratio = get_aspect_ratio(&probed.resolution);

        let file_size_gb = match tokio::fs::metadata(path).await {
            Ok(meta) => format_size_gb(meta.len()),
            Err(e) => {
                warn!("Could not read size of {:?}: {}", path, e);
                UNKNOWN.to_string()
            }
        };

        debug!("Catalogued {:?} as {} ({})", path, title, year);

        VideoRecord {
            path: path.to_path_buf(),
            title,
            year,
            decade,
            resolution: probed.resolution,
            aspect_ratio,
            quality,
            file_size_gb,
            duration: probed.duration,
            audio_language: probed.audio_language,
        }
    }

    async fn discover(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let scanner = self.scanner.clone();
        let root = root.to_path_buf();
        let cancel = self.cancel.clone();

        let paths = tokio::task::spawn_blocking(move || {
            scanner
                .scan_until(&root, move || cancel.is_cancelled())
                .collect::<Vec<_>>()
        })
        .await
        .map_err(|e| CatalogError::Io(std::io::Error::other(e)))?;

        if self.cancel.is_cancelled() {
            return Err(CatalogError::Cancelled);
        }
        Ok(paths)
    }
}

async fn check_root(root: &Path) -> Result<()> {
    let invalid = |reason: String| CatalogError::InvalidRoot(root.to_path_buf(), reason);

    let meta = tokio::fs::metadata(root)
        .await
        .map_err(|e| invalid(e.to_string()))?;
    if !meta.is_dir() {
        return Err(invalid("not a directory".to_string()));
    }
    let mut entries = tokio::fs::read_dir(root)
        .await
        .map_err(|e| invalid(e.to_string()))?;
    entries
        .next_entry()
        .await
        .map_err(|e| invalid(e.to_string()))?;
    Ok(())
}

/// Binary gigabytes to two decimals.
pub fn format_size_gb(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / BYTES_PER_GB)
}
