use crate::errors::{AppError, AppResult};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// `{category: {year: url}}` as stored on disk.
type CacheEntries = BTreeMap<String, BTreeMap<String, String>>;

/// Categories every new cache file starts with.
const SEED_CATEGORIES: [&str; 2] = ["autonomicos", "locales"];

/// JSON file remembering source URLs per category and year.
///
/// Only URLs are cached, never parsed records. Reads treat a missing or malformed
/// file as empty; saves re-read the file, merge one entry and write it back.
#[derive(Debug, Clone)]
pub struct UrlCache {
    path: PathBuf,
    entries: CacheEntries,
}

impl UrlCache {
    /// Loads the cache at `path`, falling back to an empty cache on any error.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = read_entries(&path);
        let total: usize = entries.values().map(BTreeMap::len).sum();
        debug!(cache_file = %path.display(), urls = total, "URL cache loaded");
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the cached URL for `category` and `year`, if any.
    pub fn get(&self, category: &str, year: i32) -> Option<&str> {
        self.entries
            .get(category)
            .and_then(|years| years.get(&year.to_string()))
            .map(String::as_str)
    }

    /// Number of URLs stored under `category`.
    pub fn len(&self, category: &str) -> usize {
        self.entries.get(category).map_or(0, BTreeMap::len)
    }

    /// Persists `url` under `category`/`year`, merging with the current file contents.
    ///
    /// Failures are logged and reported as `false`; they never abort a scrape.
    pub fn save(&mut self, category: &str, year: i32, url: &str) -> bool {
        match self.try_save(category, year, url) {
            Ok(()) => {
                info!(
                    cache_file = %self.path.display(),
                    category = category,
                    year = year,
                    url = url,
                    "URL saved to cache"
                );
                true
            }
            Err(e) => {
                warn!(
                    cache_file = %self.path.display(),
                    error = %e,
                    "Could not save URL to cache"
                );
                false
            }
        }
    }

    fn try_save(&mut self, category: &str, year: i32, url: &str) -> AppResult<()> {
        // Re-read so entries written since load() are not lost
        let mut entries = read_entries(&self.path);
        if entries.is_empty() {
            for seed in SEED_CATEGORIES {
                entries.insert(seed.to_string(), BTreeMap::new());
            }
        }
        entries
            .entry(category.to_string())
            .or_default()
            .insert(year.to_string(), url.to_string());

        write_entries(&self.path, &entries)?;
        self.entries = entries;
        Ok(())
    }
}

fn read_entries(path: &Path) -> CacheEntries {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return CacheEntries::new(),
        Err(e) => {
            warn!(cache_file = %path.display(), error = %e, "Failed to read URL cache, treating as empty");
            return CacheEntries::new();
        }
    };

    match serde_json::from_str(&contents) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(cache_file = %path.display(), error = %e, "Malformed URL cache, treating as empty");
            CacheEntries::new()
        }
    }
}

fn write_entries(path: &Path, entries: &CacheEntries) -> AppResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|e| {
        AppError::IoError(format!("Failed to create cache directory {}: {e}", dir.display()))
    })?;

    // Write to a temp file in the same directory, then atomically replace the cache
    let mut tmp = NamedTempFile::new_in(&dir)?;
    serde_json::to_writer_pretty(&mut tmp, entries)?;
    tmp.write_all(b"\n")?;
    tmp.persist(path).map_err(|e| {
        AppError::IoError(format!("Failed to write cache file {}: {e}", path.display()))
    })?;
    Ok(())
}
