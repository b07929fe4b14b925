//! Cache module for storing API responses to disk
//!
//! This module provides a cache manager that persists API responses to the
//! filesystem with a fixed 24-hour TTL (time-to-live). Expired entries are
//! treated as absent and evicted lazily on read, so callers never observe
//! stale data.

mod manager;

pub use manager::{badge_cache_key, details_cache_key, CacheManager, ALL_LEAGUES_CACHE_KEY};
