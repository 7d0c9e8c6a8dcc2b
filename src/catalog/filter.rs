use super::facets::ToleranceBand;
use super::{Catalog, FacetKind, VideoRecord, ALL};
use serde::{Deserialize, Serialize};

/// One choice per facet. Each defaults to `"All"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacetSelection {
    pub decade: String,
    pub aspect_ratio: String,
    pub quality: String,
}

impl Default for FacetSelection {
    fn default() -> Self {
        Self {
            decade: ALL.to_string(),
            aspect_ratio: ALL.to_string(),
            quality: ALL.to_string(),
        }
    }
}

impl FacetSelection {
    pub fn get(&self, kind: FacetKind) -> &str {
        match kind {
            FacetKind::Decade => &self.decade,
            FacetKind::AspectRatio => &self.aspect_ratio,
            FacetKind::Quality => &self.quality,
        }
    }

    pub fn set(&mut self, kind: FacetKind, value: impl Into<String>) {
        let value = value.into();
        match kind {
            FacetKind::Decade => self.decade = value,
            FacetKind::AspectRatio => self.aspect_ratio = value,
            FacetKind::Quality => self.quality = value,
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        FacetKind::ALL.iter().all(|kind| self.get(*kind) == ALL)
    }
}

/// Narrows a catalog to the records matching every facet of a selection.
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    band: ToleranceBand,
}

impl FilterEngine {
    pub fn new(band: ToleranceBand) -> Self {
        Self { band }
    }

    pub fn band(&self) -> &ToleranceBand {
        &self.band
    }

    /// Matching records in catalog order. The catalog itself is untouched.
    pub fn filter<'a>(
        &self,
        catalog: &'a Catalog,
        selection: &FacetSelection,
    ) -> Vec<&'a VideoRecord> {
        catalog
            .records()
            .iter()
            .filter(|record| self.matches(record, selection))
            .collect()
    }

    pub fn matches(&self, record: &VideoRecord, selection: &FacetSelection) -> bool {
        FacetKind::ALL
            .iter()
            .all(|kind| self.matches_facet(*kind, record, selection.get(*kind)))
    }

    fn matches_facet(&self, kind: FacetKind, record: &VideoRecord, selected: &str) -> bool {
        let value = kind.value_of(record);
        if selected == ALL || value == selected {
            return true;
        }
        kind == FacetKind::AspectRatio
            && selected == self.band.label
            && self.band.contains_str(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::record;

    fn sample() -> Catalog {
        Catalog::from_records(vec![
            record("heat", "1990s", "2.40", "1080p"),
            record("alien", "1970s", "1.85", "720p"),
            record("fargo", "1990s", "1.85", "4K"),
            record("clip", "Unknown", "Unknown", "Unknown"),
            record("seven", "1990s", "2.35", "Unknown"),
        ])
    }

    fn titles(records: &[&VideoRecord]) -> Vec<String> {
        records.iter().map(|r| r.title.clone()).collect()
    }

    #[test]
    fn test_default_selection_returns_everything() {
        let catalog = sample();
        let selection = FacetSelection::default();
        assert!(selection.is_unfiltered());
        let result = FilterEngine::default().filter(&catalog, &selection);
        assert_eq!(result.len(), 5);
        assert_eq!(
            titles(&result),
            vec!["heat", "alien", "fargo", "clip", "seven"]
        );
    }

    #[test]
    fn test_decade_filter_preserves_order() {
        let catalog = sample();
        let mut selection = FacetSelection::default();
        selection.set(FacetKind::Decade, "1990s");
        let result = FilterEngine::default().filter(&catalog, &selection);
        assert_eq!(titles(&result), vec!["heat", "fargo", "seven"]);
    }

    #[test]
    fn test_band_selection_matches_numeric_range() {
        let catalog = sample();
        let mut selection = FacetSelection::default();
        selection.set(FacetKind::AspectRatio, "UltraWide");
        let result = FilterEngine::default().filter(&catalog, &selection);
        assert_eq!(titles(&result), vec!["heat", "seven"]);
    }

    #[test]
    fn test_facets_combine_with_and() {
        let catalog = sample();
        let selection = FacetSelection {
            decade: "1990s".into(),
            aspect_ratio: "1.85".into(),
            quality: "All".into(),
        };
        let engine = FilterEngine::default();
        assert_eq!(titles(&engine.filter(&catalog, &selection)), vec!["fargo"]);

        let selection = FacetSelection {
            decade: "1990s".into(),
            aspect_ratio: "UltraWide".into(),
            quality: "1080p".into(),
        };
        assert_eq!(titles(&engine.filter(&catalog, &selection)), vec!["heat"]);
    }

    #[test]
    fn test_unknown_value_is_selectable() {
        let catalog = sample();
        let mut selection = FacetSelection::default();
        selection.set(FacetKind::Quality, "Unknown");
        let result = FilterEngine::default().filter(&catalog, &selection);
        assert_eq!(titles(&result), vec!["clip", "seven"]);
    }

    #[test]
    fn test_band_label_only_applies_to_aspect_ratio() {
        let catalog = Catalog::from_records(vec![record("odd", "2.3", "2.3", "2.3")]);
        let mut selection = FacetSelection::default();
        selection.set(FacetKind::Quality, "UltraWide");
        assert!(FilterEngine::default().filter(&catalog, &selection).is_empty());
    }

    #[test]
    fn test_no_match_leaves_catalog_intact() {
        let catalog = sample();
        let mut selection = FacetSelection::default();
        selection.set(FacetKind::Decade, "2020s");
        assert!(FilterEngine::default().filter(&catalog, &selection).is_empty());
        assert_eq!(catalog.len(), 5);
    }

    #[test]
    fn test_custom_band() {
        let catalog = sample();
        let engine = FilterEngine::new(ToleranceBand::new("Scope", 2.38, 2.42));
        let mut selection = FacetSelection::default();
        selection.set(FacetKind::AspectRatio, "Scope");
        assert_eq!(titles(&engine.filter(&catalog, &selection)), vec!["heat"]);
    }
}
