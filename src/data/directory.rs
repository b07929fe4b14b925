//! Read-through league directory over TheSportsDB API
//!
//! Combines the request executor with the expiring cache: every data need
//! consults the cache first and falls back to the network on a miss, writing
//! successful results back. Cache failures degrade to misses so the
//! directory keeps working when storage is unavailable.

use super::client::{endpoints, ApiResult, SportsDbClient};
use super::{ApiError, League, Season, SeasonBadge};
use crate::cache::{badge_cache_key, CacheManager, ALL_LEAGUES_CACHE_KEY};

/// League directory backed by the remote API and a local expiring cache
#[derive(Debug, Clone)]
pub struct LeagueDirectory {
    /// Request executor for the remote API
    client: SportsDbClient,
    /// Cache manager for persisting responses; `None` disables caching
    cache: Option<CacheManager>,
}

impl Default for LeagueDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl LeagueDirectory {
    /// Creates a directory with the default API client and XDG cache
    pub fn new() -> Self {
        Self {
            client: SportsDbClient::new(),
            cache: CacheManager::new(),
        }
    }

    /// Creates a directory with no cache; every fetch hits the network
    pub fn without_cache() -> Self {
        Self {
            client: SportsDbClient::new(),
            cache: None,
        }
    }

    /// Creates a directory from explicit parts (used by tests)
    #[allow(dead_code)]
    pub fn with_parts(client: SportsDbClient, cache: Option<CacheManager>) -> Self {
        Self { client, cache }
    }

    /// Fetches the full league list through the cache
    ///
    /// On a cache hit the network is skipped entirely. On a miss the request
    /// goes through the rate-limit retry policy, and a successful result is
    /// written back under the `all_leagues` key.
    pub async fn fetch_leagues(&self) -> ApiResult<Vec<League>> {
        if let Some(ref cache) = self.cache {
            if let Some(leagues) = cache.read::<Vec<League>>(ALL_LEAGUES_CACHE_KEY) {
                return Ok(leagues);
            }
        }

        let leagues = self
            .client
            .execute_with_retry::<League>(endpoints::ALL_LEAGUES, &[])
            .await?;

        if let Some(ref cache) = self.cache {
            let _ = cache.write(ALL_LEAGUES_CACHE_KEY, &leagues);
        }

        Ok(leagues)
    }

    /// Fetches a league's seasonal badge URL through the cache
    ///
    /// The composed `league_badge_<id>` key keeps entries for different
    /// leagues apart. `Ok(None)` means the league genuinely has no badge;
    /// only non-empty URLs are cached.
    pub async fn fetch_badge_url(&self, league_id: &str) -> ApiResult<Option<String>> {
        let cache_key = badge_cache_key(league_id);

        if let Some(ref cache) = self.cache {
            if let Some(url) = cache.read::<String>(&cache_key) {
                return Ok(Some(url));
            }
        }

        let badges = self
            .client
            .execute::<SeasonBadge>(
                endpoints::SEASON_BADGE,
                &[("id", league_id), ("badge", "1")],
            )
            .await?;

        let url = extract_badge_url(&badges);

        if let Some(ref found) = url {
            if let Some(ref cache) = self.cache {
                let _ = cache.write(&cache_key, found);
            }
        }

        Ok(url)
    }

    /// Fetches the season list for a league
    ///
    /// No retry and no caching; failures surface immediately.
    pub async fn fetch_seasons(&self, league_id: &str) -> ApiResult<Vec<Season>> {
        self.client
            .execute::<Season>(endpoints::SEASONS, &[("id", league_id)])
            .await
    }

    /// Looks up a single league's details
    ///
    /// Tries once without retry; if that attempt fails, the retrying path
    /// gets one more chance before the error surfaces.
    #[allow(dead_code)]
    pub async fn fetch_league_details(&self, league_id: &str) -> ApiResult<Vec<League>> {
        let params = [("id", league_id)];

        match self
            .client
            .execute::<League>(endpoints::LEAGUE_DETAILS, &params)
            .await
        {
            Ok(leagues) => Ok(leagues),
            Err(_) => {
                self.client
                    .execute_with_retry::<League>(endpoints::LEAGUE_DETAILS, &params)
                    .await
            }
        }
    }

    /// Removes the cached league list so the next fetch goes to the network
    pub fn invalidate_leagues(&self) {
        if let Some(ref cache) = self.cache {
            cache.clear(ALL_LEAGUES_CACHE_KEY);
        }
    }
}

/// Extracts the badge URL from a badge lookup result
///
/// Only the first entry is consulted; an absent list, a null badge field, or
/// an empty URL all count as "no badge".
pub fn extract_badge_url(badges: &[SeasonBadge]) -> Option<String> {
    badges
        .first()
        .and_then(|entry| entry.badge.clone())
        .filter(|url| !url.is_empty())
}

/// Maps a normalized error to the message shown to the user
///
/// Total: every input, including an empty message with an arbitrary code,
/// produces a non-empty display string.
pub fn describe_api_error(error: &ApiError) -> String {
    match error.code {
        404 => "The requested resource was not found".to_string(),
        429 => "Too many requests. Please try again later".to_string(),
        500 => "Server error. Please try again later".to_string(),
        _ if error.message.is_empty() => "An unknown error occurred".to_string(),
        _ => error.message.clone(),
    }
}
