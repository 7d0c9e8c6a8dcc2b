pub mod builder;
pub mod facets;
pub mod filter;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use self::facets::{order_facet_values, ToleranceBand};

/// Placeholder for any field that could not be derived.
pub const UNKNOWN: &str = "Unknown";

/// Facet selection that matches every record. Never stored as a facet value.
pub const ALL: &str = "All";

/// One discovered video file. Every field is populated; missing data is `"Unknown"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub path: PathBuf,
    pub title: String,
    pub year: String,
    pub decade: String,
    pub resolution: String,
    pub aspect_ratio: String,
    pub quality: String,
    pub file_size_gb: String,
    pub duration: String,
    pub audio_language: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetKind {
    Decade,
    AspectRatio,
    Quality,
}

impl FacetKind {
    pub const ALL: [FacetKind; 3] = [FacetKind::Decade, FacetKind::AspectRatio, FacetKind::Quality];

    pub fn value_of<'a>(&self, record: &'a VideoRecord) -> &'a str {
        match self {
            FacetKind::Decade => &record.decade,
            FacetKind::AspectRatio => &record.aspect_ratio,
            FacetKind::Quality => &record.quality,
        }
    }
}

impl fmt::Display for FacetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FacetKind::Decade => "Decade",
            FacetKind::AspectRatio => "Aspect Ratio",
            FacetKind::Quality => "Quality",
        })
    }
}

/// Distinct known values observed for one facet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetSet {
    values: BTreeSet<String>,
}

impl FacetSet {
    /// Returns false for `"Unknown"`, `"All"` and values already present.
    pub fn insert(&mut self, value: &str) -> bool {
        if value == UNKNOWN || value == ALL || value.is_empty() {
            return false;
        }
        self.values.insert(value.to_string())
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.contains(value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }
}

/// Records of one scan pass in discovery order, plus their facet sets.
/// Immutable once built; a rescan produces a new catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    records: Vec<VideoRecord>,
    decades: FacetSet,
    aspect_ratios: FacetSet,
    qualities: FacetSet,
}

impl Catalog {
    /// Folds the facet sets from `records` in a single pass.
    pub fn from_records(records: Vec<VideoRecord>) -> Self {
        let mut decades = FacetSet::default();
        let mut aspect_ratios = FacetSet::default();
        let mut qualities = FacetSet::default();
        for record in &records {
            decades.insert(&record.decade);
            aspect_ratios.insert(&record.aspect_ratio);
            qualities.insert(&record.quality);
        }
        Self {
            records,
            decades,
            aspect_ratios,
            qualities,
        }
    }

    pub fn records(&self) -> &[VideoRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn facet(&self, kind: FacetKind) -> &FacetSet {
        match kind {
            FacetKind::Decade => &self.decades,
            FacetKind::AspectRatio => &self.aspect_ratios,
            FacetKind::Quality => &self.qualities,
        }
    }

    /// Selection options for `kind`, starting with `"All"`. Only the aspect
    /// ratio facet is folded into `band`.
    pub fn facet_options(&self, kind: FacetKind, band: &ToleranceBand) -> Vec<String> {
        let band = match kind {
            FacetKind::AspectRatio => Some(band),
            _ => None,
        };
        order_facet_values(self.facet(kind).iter(), band)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn record(name: &str, decade: &str, aspect_ratio: &str, quality: &str) -> VideoRecord {
        VideoRecord {
            path: PathBuf::from(format!("/library/{}.mkv", name)),
            title: name.to_string(),
            year: UNKNOWN.to_string(),
            decade: decade.to_string(),
            resolution: UNKNOWN.to_string(),
            aspect_ratio: aspect_ratio.to_string(),
            quality: quality.to_string(),
            file_size_gb: "0.00".to_string(),
            duration: UNKNOWN.to_string(),
            audio_language: UNKNOWN.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::record;
    use super::*;

    #[test]
    fn test_facet_set_skips_placeholders() {
        let mut set = FacetSet::default();
        assert!(set.insert("1990s"));
        assert!(!set.insert("1990s"));
        assert!(!set.insert("Unknown"));
        assert!(!set.insert("All"));
        assert!(!set.insert(""));
        assert_eq!(set.len(), 1);
        assert!(set.contains("1990s"));
    }

    #[test]
    fn test_catalog_folds_facets() {
        let catalog = Catalog::from_records(vec![
            record("a", "1990s", "1.78", "1080p"),
            record("b", "Unknown", "2.40", "Unknown"),
            record("c", "1990s", "Unknown", "4K"),
        ]);

        assert_eq!(catalog.len(), 3);
        assert_eq!(
            catalog.facet(FacetKind::Decade).iter().collect::<Vec<_>>(),
            vec!["1990s"]
        );
        assert_eq!(catalog.facet(FacetKind::AspectRatio).len(), 2);
        assert_eq!(
            catalog.facet(FacetKind::Quality).iter().collect::<Vec<_>>(),
            vec!["1080p", "4K"]
        );
    }

    #[test]
    fn test_facet_options_band_only_for_aspect_ratio() {
        let catalog = Catalog::from_records(vec![
            record("a", "1990s", "2.35", "1080p"),
            record("b", "1980s", "1.85", "720p"),
        ]);
        let band = ToleranceBand::default();

        assert_eq!(
            catalog.facet_options(FacetKind::AspectRatio, &band),
            vec!["All", "1.85", "UltraWide"]
        );
        assert_eq!(
            catalog.facet_options(FacetKind::Decade, &band),
            vec!["All", "1980s", "1990s"]
        );
        assert_eq!(
            catalog.facet_options(FacetKind::Quality, &band),
            vec!["All", "1080p", "720p"]
        );
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::default();
        assert!(catalog.is_empty());
        assert_eq!(
            catalog.facet_options(FacetKind::AspectRatio, &ToleranceBand::default()),
            vec!["All", "UltraWide"]
        );
    }
}
