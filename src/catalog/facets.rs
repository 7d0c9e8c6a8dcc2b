//! Ordering of facet values for selection lists.
//!
//! Output is `["All", <numeric ascending>, <text lexicographic>, <band label>]`.
//! Numeric values inside the tolerance band are not listed individually; the
//! band label stands in for all of them.

use super::{ALL, UNKNOWN};
use serde::{Deserialize, Serialize};

/// A named inclusive numeric range offered as a single facet value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToleranceBand {
    pub label: String,
    pub min: f64,
    pub max: f64,
}

impl Default for ToleranceBand {
    fn default() -> Self {
        Self::new("UltraWide", 2.2, 2.5)
    }
}

impl ToleranceBand {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            label: label.into(),
            min,
            max,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// True when `value` parses as a number inside the band.
    pub fn contains_str(&self, value: &str) -> bool {
        parse_numeric(value).is_some_and(|v| self.contains(v))
    }
}

/// Finite number after trimming, or `None`.
pub fn parse_numeric(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

pub fn order_facet_values<'a, I>(values: I, band: Option<&ToleranceBand>) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut numeric: Vec<(f64, &str)> = Vec::new();
    let mut text: Vec<&str> = Vec::new();

    for value in values {
        if value == ALL || value == UNKNOWN || value.is_empty() {
            continue;
        }
        if band.is_some_and(|b| b.label == value) {
            continue;
        }
        match parse_numeric(value) {
            Some(n) => {
                if band.is_some_and(|b| b.contains(n)) {
                    continue;
                }
                numeric.push((n, value));
            }
            None => text.push(value),
        }
    }

    numeric.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    numeric.dedup_by(|a, b| a.1 == b.1);
    text.sort_unstable();
    text.dedup();

    let mut ordered = Vec::with_capacity(numeric.len() + text.len() + 2);
    ordered.push(ALL.to_string());
    ordered.extend(numeric.into_iter().map(|(_, v)| v.to_string()));
    ordered.extend(text.into_iter().map(str::to_string));
    if let Some(band) = band {
        ordered.push(band.label.clone());
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_absorbs_ultrawide_ratios() {
        let values = ["1.33", "1.78", "2.35", "2.40", "1.85"];
        let ordered = order_facet_values(values, Some(&ToleranceBand::default()));
        assert_eq!(ordered, vec!["All", "1.33", "1.78", "1.85", "UltraWide"]);
    }

    #[test]
    fn test_band_edges_are_inclusive() {
        let values = ["2.20", "2.50", "2.19", "2.51"];
        let ordered = order_facet_values(values, Some(&ToleranceBand::default()));
        assert_eq!(ordered, vec!["All", "2.19", "2.51", "UltraWide"]);
    }

    #[test]
    fn test_numeric_sort_is_by_value_not_text() {
        let ordered = order_facet_values(["10.5", "9", "1.33"], None);
        assert_eq!(ordered, vec!["All", "1.33", "9", "10.5"]);
    }

    #[test]
    fn test_mixed_partitions() {
        let ordered = order_facet_values(
            ["1990s", "1.78", "Unknown", "All", "1980s", "2.39"],
            Some(&ToleranceBand::default()),
        );
        assert_eq!(ordered, vec!["All", "1.78", "1980s", "1990s", "UltraWide"]);
    }

    #[test]
    fn test_without_band_nothing_is_absorbed() {
        let ordered = order_facet_values(["2.35", "1.78"], None);
        assert_eq!(ordered, vec!["All", "1.78", "2.35"]);
    }

    #[test]
    fn test_band_label_listed_once_at_end() {
        let ordered = order_facet_values(
            ["UltraWide", "Academy", "1.37"],
            Some(&ToleranceBand::default()),
        );
        assert_eq!(ordered, vec!["All", "1.37", "Academy", "UltraWide"]);
    }

    #[test]
    fn test_custom_band() {
        let band = ToleranceBand::new("Scope", 2.3, 2.4);
        let ordered = order_facet_values(["2.20", "2.35", "2.39", "1.85"], Some(&band));
        assert_eq!(ordered, vec!["All", "1.85", "2.20", "Scope"]);
        assert!(band.contains_str("2.39"));
        assert!(!band.contains_str("2.41"));
        assert!(!band.contains_str("wide"));
    }

    #[test]
    fn test_parse_numeric() {
        assert_eq!(parse_numeric(" 1.78 "), Some(1.78));
        assert_eq!(parse_numeric("NaN"), None);
        assert_eq!(parse_numeric("inf"), None);
        assert_eq!(parse_numeric("1990s"), None);
    }
}
