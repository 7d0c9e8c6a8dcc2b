//! Title, year and decade derivation from the containing folder name.
//!
//! Library folders follow the `<Title> (<Year>)` convention, e.g.
//! `Blade Runner (1982)`. Anything else keeps its folder name as title and
//! gets an `"Unknown"` year.

use crate::catalog::UNKNOWN;
use crate::error::Result;
use regex::Regex;

#[derive(Debug, Clone)]
pub struct NameParser {
    re_title_year: Regex,
}

impl NameParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_title_year: Regex::new(r"(.+?) \(([0-9]{4})\)")?,
        })
    }

    /// Returns `(title, year)`. The first `<title> (<4 digits>)` occurrence wins;
    /// the title is its trimmed non-greedy prefix.
    pub fn parse_folder_name(&self, name: &str) -> (String, String) {
        match self.re_title_year.captures(name) {
            Some(caps) => (caps[1].trim().to_string(), caps[2].to_string()),
            None => (name.to_string(), UNKNOWN.to_string()),
        }
    }
}

/// `"1994"` becomes `"1990s"`; anything that does not parse as an integer is `"Unknown"`.
pub fn get_decade(year: &str) -> String {
    match year.trim().parse::<i64>() {
        Ok(y) => format!("{}s", y.div_euclid(10) * 10),
        Err(_) => UNKNOWN.to_string(),
    }
}
