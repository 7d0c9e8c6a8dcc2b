//! Video library catalog: discover media files, probe them with ffprobe,
//! classify them by decade, aspect ratio and quality, then filter and export.

pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod media;

pub use catalog::builder::CatalogBuilder;
pub use catalog::facets::ToleranceBand;
pub use catalog::filter::{FacetSelection, FilterEngine};
pub use catalog::{Catalog, FacetKind, FacetSet, VideoRecord, ALL, UNKNOWN};
pub use config::Config;
pub use error::{CatalogError, Result};
pub use media::probe::{FfprobeRunner, MetadataProbe, ProbeQuery, ProbeRunner};
pub use media::scanner::PathScanner;
