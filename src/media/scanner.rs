use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Recursive video file discovery filtered by extension.
#[derive(Debug, Clone)]
pub struct PathScanner {
    extensions: HashSet<String>,
    include_hidden: bool,
}

impl Default for PathScanner {
    fn default() -> Self {
        Self::new([".mp4", ".mkv", ".avi", ".mov", ".flv", ".wmv"])
    }
}

impl PathScanner {
    /// Extensions are matched case-insensitively; `".MKV"` and `"mkv"` are equivalent.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim().trim_start_matches('.').to_lowercase())
                .filter(|ext| !ext.is_empty())
                .collect(),
            include_hidden: false,
        }
    }

    /// Also walk dot-prefixed files and directories (`._Movie.mkv` stubs and the like).
    pub fn with_hidden(mut self, include_hidden: bool) -> Self {
        self.include_hidden = include_hidden;
        self
    }

    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.contains(&ext.to_lowercase()))
    }

    /// Lazily walks `root` and every subdirectory, yielding absolute paths of
    /// recognized video files in filesystem enumeration order.
    ///
    /// A missing root yields nothing. Unreadable entries are logged and skipped.
    /// Symlinked files are listed; symlinked directories are not entered.
    pub fn scan<'a>(&'a self, root: &Path) -> impl Iterator<Item = PathBuf> + 'a {
        self.scan_until(root, || false)
    }

    /// Like [`scan`](Self::scan), but consults `stop` before every entry and
    /// stops descending once it returns true.
    pub fn scan_until<'a, F>(&'a self, root: &Path, stop: F) -> impl Iterator<Item = PathBuf> + 'a
    where
        F: Fn() -> bool + 'a,
    {
        let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
        WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(move |entry| {
                if stop() {
                    return false;
                }
                entry.depth() == 0 || self.include_hidden || !is_hidden(entry)
            })
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| {
                entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
            })
            .filter(move |entry| self.matches(entry.path()))
            .map(|entry| {
                debug!("Found media file: {:?}", entry.path());
                entry.into_path()
            })
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}
