//! Cache manager for persisting API responses to disk
//!
//! Provides a `CacheManager` that stores serializable data to JSON files with
//! write timestamps and a fixed time-to-live. Entries older than the TTL are
//! logically absent: a read past expiry removes the entry and reports a miss.
//! All operations are best-effort so a broken cache never blocks the UI.

use chrono::{DateTime, Duration, Utc};
use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Fixed time-to-live for all cache entries
const CACHE_TTL_HOURS: i64 = 24;

/// Cache key for the full league list
pub const ALL_LEAGUES_CACHE_KEY: &str = "all_leagues";

/// Cache key for a league's seasonal badge URL
pub fn badge_cache_key(league_id: &str) -> String {
    format!("league_badge_{}", league_id)
}

/// Cache key for a league's details lookup (reserved, unused by current flows)
#[allow(dead_code)]
pub fn details_cache_key(league_id: &str) -> String {
    format!("league_details_{}", league_id)
}

/// Wrapper struct for cached data stored on disk
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry<T> {
    /// The cached data
    data: T,
    /// When the data was cached
    cached_at: DateTime<Utc>,
}

/// Manages reading and writing cached data to disk
///
/// The cache manager stores data as JSON files in an XDG-compliant cache
/// directory (`~/.cache/leaguedex/` on Linux). Each entry records when it was
/// written; entries older than 24 hours are removed on read and treated as
/// misses.
#[derive(Debug, Clone)]
pub struct CacheManager {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
}

impl CacheManager {
    /// Creates a new CacheManager using XDG-compliant cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g., no
    /// home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "leaguedex")?;
        let cache_dir = project_dirs.cache_dir().to_path_buf();
        Some(Self { cache_dir })
    }

    /// Creates a new CacheManager with a custom cache directory
    ///
    /// Useful for testing or when a specific cache location is needed.
    #[allow(dead_code)]
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Returns the path to a cache file for the given key
    fn cache_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }

    /// Ensures the cache directory exists
    fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.cache_dir)
    }

    /// Writes data to the cache, overwriting any prior entry for the key
    ///
    /// # Arguments
    /// * `key` - Unique identifier for the cache entry (e.g., "all_leagues")
    /// * `data` - The data to cache (must implement Serialize)
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err` if directory creation or file writing fails; callers treat
    ///   this as best-effort and ignore the error
    pub fn write<T: Serialize>(&self, key: &str, data: &T) -> std::io::Result<()> {
        self.ensure_dir()?;

        let entry = CacheEntry {
            data,
            cached_at: Utc::now(),
        };

        let json = serde_json::to_string_pretty(&entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        fs::write(self.cache_path(key), json)
    }

    /// Reads data from the cache
    ///
    /// Returns `None` if the entry doesn't exist, cannot be parsed, or is
    /// older than the 24-hour TTL. An expired entry is removed as part of the
    /// read, so the key subsequently behaves as if it was never set.
    ///
    /// # Arguments
    /// * `key` - The cache key to read
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.cache_path(key);
        let content = fs::read_to_string(&path).ok()?;
        let entry: CacheEntry<T> = serde_json::from_str(&content).ok()?;

        let age = Utc::now() - entry.cached_at;
        if age > Duration::hours(CACHE_TTL_HOURS) {
            let _ = fs::remove_file(&path);
            return None;
        }

        Some(entry.data)
    }

    /// Removes the entry for the given key if present
    ///
    /// Absence is not an error; failures are swallowed.
    pub fn clear(&self, key: &str) {
        let _ = fs::remove_file(self.cache_path(key));
    }
}
