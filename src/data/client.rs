//! TheSportsDB API request executor and retry policy
//!
//! This module performs single HTTP GET requests against the remote API,
//! validates the response envelope, and normalizes every failure mode into
//! one `ApiError` shape. A separate retry wrapper re-issues rate-limited
//! requests with linear backoff. Nothing in here caches; this is the
//! innermost layer.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Base URL for TheSportsDB API (free-tier key 3)
const SPORTSDB_BASE_URL: &str = "https://www.thesportsdb.com/api/v1/json/3";

/// Maximum number of attempts for rate-limited requests
pub const MAX_RETRY_ATTEMPTS: u32 = 3;

/// Base delay between retry attempts; attempt N waits N times this
pub const RETRY_BASE_DELAY: Duration = Duration::from_millis(1000);

/// Fallback message when a failure carries no usable message of its own
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// Message for a 2xx response that matches none of the recognized shapes
const INVALID_FORMAT_MESSAGE: &str = "Invalid API response format";

/// Recognized API endpoint paths
pub mod endpoints {
    /// Lists every league in the database
    pub const ALL_LEAGUES: &str = "/all_leagues.php";
    /// Lists seasons for a league (`id` param)
    pub const SEASONS: &str = "/search_all_seasons.php";
    /// Same endpoint with `badge=1` returns seasonal badge artwork
    pub const SEASON_BADGE: &str = "/search_all_seasons.php";
    /// Looks up a single league's details (`id` param)
    pub const LEAGUE_DETAILS: &str = "/lookupleague.php";
}

/// The single normalized error shape surfaced to every layer above the
/// executor
///
/// Transport faults, API-reported errors, malformed responses, and retry
/// exhaustion all collapse into this record before crossing the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (code {code}, endpoint {endpoint})")]
pub struct ApiError {
    /// Human-oriented failure message
    pub message: String,
    /// Numeric code: the HTTP status when one exists, 500 otherwise
    pub code: u16,
    /// The endpoint path that produced the failure
    pub endpoint: String,
}

impl ApiError {
    fn new(message: impl Into<String>, code: u16, endpoint: &str) -> Self {
        Self {
            message: message.into(),
            code,
            endpoint: endpoint.to_string(),
        }
    }

    /// Normalizes a transport-level fault (connection failure, body read
    /// failure) into an `ApiError`
    ///
    /// Uses the fault's own message with code 500, unless the fault carries
    /// an HTTP status. Total: every input produces a valid error record.
    pub fn transport(err: &reqwest::Error, endpoint: &str) -> Self {
        let code = err.status().map_or(500, |status| status.as_u16());
        let message = err.to_string();
        if message.is_empty() {
            Self::new(UNKNOWN_ERROR_MESSAGE, code, endpoint)
        } else {
            Self::new(message, code, endpoint)
        }
    }
}

/// Outcome type for every boundary-crossing API operation
pub type ApiResult<T> = Result<T, ApiError>;

/// Response envelope used by TheSportsDB
///
/// A successful body carries the result list under `leagues` or `seasons`;
/// an error body carries an `error` object instead.
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    leagues: Option<Vec<T>>,
    seasons: Option<Vec<T>>,
    error: Option<ReportedError>,
}

/// Structured error object the API embeds in a response body
#[derive(Debug, Deserialize)]
struct ReportedError {
    message: String,
    code: u16,
}

/// Client for issuing GET requests against TheSportsDB API
#[derive(Debug, Clone)]
pub struct SportsDbClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Base URL for the API (allows override for testing)
    base_url: String,
}

impl Default for SportsDbClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SportsDbClient {
    /// Creates a new SportsDbClient with default configuration
    pub fn new() -> Self {
        Self {
            http_client: Client::new(),
            base_url: SPORTSDB_BASE_URL.to_string(),
        }
    }

    /// Creates a new SportsDbClient with a custom base URL
    ///
    /// Used by tests to point the client at an unroutable or fake host.
    #[allow(dead_code)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Issues exactly one GET request and validates the response shape
    ///
    /// # Arguments
    /// * `endpoint` - API endpoint path (see [`endpoints`])
    /// * `params` - Query parameters as string pairs, order-insensitive
    ///
    /// # Returns
    /// * `Ok(Vec<T>)` - The result list found under a recognized envelope key
    /// * `Err(ApiError)` - Any failure, normalized; no retry, no caching
    pub async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> ApiResult<Vec<T>> {
        let url = format!("{}{}", self.base_url, endpoint);

        let response = match self.http_client.get(&url).query(params).send().await {
            Ok(response) => response,
            Err(err) => return Err(ApiError::transport(&err, endpoint)),
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => return Err(ApiError::transport(&err, endpoint)),
        };

        interpret_response(status, &body, endpoint)
    }

    /// Issues a request through the rate-limit retry policy
    ///
    /// Retries only on 429 responses, waiting `RETRY_BASE_DELAY` times the
    /// attempt number between attempts. Every other failure surfaces
    /// immediately.
    pub async fn execute_with_retry<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> ApiResult<Vec<T>> {
        retry_rate_limited(endpoint, MAX_RETRY_ATTEMPTS, RETRY_BASE_DELAY, || {
            self.execute(endpoint, params)
        })
        .await
    }
}

/// Maps a received HTTP response to the typed result list or a normalized
/// error
///
/// Rules, in priority order:
/// - non-2xx status: the body's error message if one parses, else the
///   unknown-error fallback; the code is always the HTTP status
/// - 2xx with an `error` object: that message and code, verbatim
/// - 2xx with neither `leagues` nor `seasons`: invalid-format error, 500
/// - otherwise: the found list
fn interpret_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
    endpoint: &str,
) -> ApiResult<Vec<T>> {
    let envelope: ApiEnvelope<T> = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(_) if !status.is_success() => {
            return Err(ApiError::new(UNKNOWN_ERROR_MESSAGE, status.as_u16(), endpoint));
        }
        Err(_) => return Err(ApiError::new(INVALID_FORMAT_MESSAGE, 500, endpoint)),
    };

    if !status.is_success() {
        let message = envelope
            .error
            .map(|reported| reported.message)
            .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string());
        return Err(ApiError::new(message, status.as_u16(), endpoint));
    }

    if let Some(reported) = envelope.error {
        return Err(ApiError::new(reported.message, reported.code, endpoint));
    }

    match envelope.leagues.or(envelope.seasons) {
        Some(items) => Ok(items),
        None => Err(ApiError::new(INVALID_FORMAT_MESSAGE, 500, endpoint)),
    }
}

/// Retries a request on rate-limiting responses with linear backoff
///
/// Calls `request` up to `max_attempts` times. Returns immediately on
/// success or on any error code other than 429. A 429 that is not the last
/// attempt suspends for `base_delay * (attempt + 1)` before the next try.
/// Exhausting every attempt yields a synthetic error superseding the last
/// real one.
///
/// Generic over the request future so the policy can be exercised in tests
/// without a network.
pub async fn retry_rate_limited<T, F, Fut>(
    endpoint: &str,
    max_attempts: u32,
    base_delay: Duration,
    mut request: F,
) -> ApiResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ApiResult<T>>,
{
    for attempt in 0..max_attempts {
        match request().await {
            Ok(data) => return Ok(data),
            Err(err) if err.code != 429 => return Err(err),
            Err(_) => {
                if attempt + 1 < max_attempts {
                    tokio::time::sleep(base_delay * (attempt + 1)).await;
                }
            }
        }
    }

    Err(ApiError::new(
        format!("Failed after {} retries", max_attempts),
        500,
        endpoint,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{League, SeasonBadge};
    use std::cell::Cell;

    /// Sample body for a successful league list response
    const LEAGUES_BODY: &str = r#"{
        "leagues": [
            {
                "idLeague": "4328",
                "strLeague": "English Premier League",
                "strSport": "Soccer",
                "strLeagueAlternate": "Premier League",
                "strCurrentSeason": "2024-2025"
            },
            {
                "idLeague": "4387",
                "strLeague": "NBA",
                "strSport": "Basketball",
                "strLeagueAlternate": null,
                "strCurrentSeason": null
            }
        ]
    }"#;

    #[test]
    fn test_interpret_leagues_body() {
        let result: ApiResult<Vec<League>> =
            interpret_response(StatusCode::OK, LEAGUES_BODY, endpoints::ALL_LEAGUES);

        let leagues = result.expect("Leagues body should parse");
        assert_eq!(leagues.len(), 2);
        assert_eq!(leagues[0].name, "English Premier League");
        assert_eq!(leagues[1].sport, "Basketball");
    }

    #[test]
    fn test_interpret_seasons_body() {
        let body = r#"{
            "seasons": [
                {"strSeason": "2014-2015", "strBadge": "https://example.com/badge.png"}
            ]
        }"#;

        let result: ApiResult<Vec<SeasonBadge>> =
            interpret_response(StatusCode::OK, body, endpoints::SEASON_BADGE);

        let badges = result.expect("Seasons body should parse");
        assert_eq!(badges.len(), 1);
        assert_eq!(badges[0].badge.as_deref(), Some("https://example.com/badge.png"));
    }

    #[test]
    fn test_interpret_empty_seasons_body() {
        let body = r#"{"seasons": []}"#;

        let result: ApiResult<Vec<SeasonBadge>> =
            interpret_response(StatusCode::OK, body, endpoints::SEASON_BADGE);

        assert_eq!(result.expect("Empty list is a genuine result").len(), 0);
    }

    #[test]
    fn test_interpret_api_reported_error() {
        let body = r#"{"error": {"message": "League not found", "code": 404}}"#;

        let result: ApiResult<Vec<League>> =
            interpret_response(StatusCode::OK, body, endpoints::LEAGUE_DETAILS);

        let err = result.expect_err("Error object should surface");
        assert_eq!(err.message, "League not found");
        assert_eq!(err.code, 404);
        assert_eq!(err.endpoint, endpoints::LEAGUE_DETAILS);
    }

    #[test]
    fn test_interpret_unrecognized_shape() {
        let body = r#"{"teams": []}"#;

        let result: ApiResult<Vec<League>> =
            interpret_response(StatusCode::OK, body, endpoints::ALL_LEAGUES);

        let err = result.expect_err("Unrecognized shape should fail");
        assert_eq!(err.message, INVALID_FORMAT_MESSAGE);
        assert_eq!(err.code, 500);
    }

    #[test]
    fn test_interpret_non_json_success_body() {
        let result: ApiResult<Vec<League>> =
            interpret_response(StatusCode::OK, "<html>hi</html>", endpoints::ALL_LEAGUES);

        let err = result.expect_err("Non-JSON body should fail");
        assert_eq!(err.message, INVALID_FORMAT_MESSAGE);
        assert_eq!(err.code, 500);
    }

    #[test]
    fn test_interpret_error_status_with_structured_body() {
        // Message comes from the body, code from the transport status
        let body = r#"{"error": {"message": "Slow down", "code": 0}}"#;

        let result: ApiResult<Vec<League>> = interpret_response(
            StatusCode::TOO_MANY_REQUESTS,
            body,
            endpoints::ALL_LEAGUES,
        );

        let err = result.expect_err("429 should surface");
        assert_eq!(err.message, "Slow down");
        assert_eq!(err.code, 429);
    }

    #[test]
    fn test_interpret_error_status_without_usable_body() {
        let result: ApiResult<Vec<League>> = interpret_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "<html>500</html>",
            endpoints::ALL_LEAGUES,
        );

        let err = result.expect_err("Status error should surface");
        assert_eq!(err.message, UNKNOWN_ERROR_MESSAGE);
        assert_eq!(err.code, 500);
    }

    #[test]
    fn test_interpret_error_status_with_json_but_no_error_object() {
        let result: ApiResult<Vec<League>> =
            interpret_response(StatusCode::NOT_FOUND, "{}", endpoints::LEAGUE_DETAILS);

        let err = result.expect_err("404 should surface");
        assert_eq!(err.message, UNKNOWN_ERROR_MESSAGE);
        assert_eq!(err.code, 404);
    }

    fn rate_limited(endpoint: &str) -> ApiError {
        ApiError::new("rate limited", 429, endpoint)
    }

    #[tokio::test]
    async fn test_retry_returns_success_immediately() {
        let calls = Cell::new(0u32);

        let result = retry_rate_limited("/x", 3, Duration::from_millis(1), || {
            calls.set(calls.get() + 1);
            async { Ok::<_, ApiError>(vec![1, 2, 3]) }
        })
        .await;

        assert_eq!(result.unwrap(), vec![1, 2, 3]);
        assert_eq!(calls.get(), 1, "Success should not be retried");
    }

    #[tokio::test]
    async fn test_retry_does_not_retry_non_rate_limit_errors() {
        let calls = Cell::new(0u32);

        let result: ApiResult<Vec<u32>> =
            retry_rate_limited("/x", 3, Duration::from_millis(1), || {
                calls.set(calls.get() + 1);
                async { Err(ApiError::new("not found", 404, "/x")) }
            })
            .await;

        let err = result.expect_err("404 should surface unchanged");
        assert_eq!(err.code, 404);
        assert_eq!(calls.get(), 1, "Non-429 errors must not be retried");
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_exhaustion_makes_max_attempts_calls() {
        let calls = Cell::new(0u32);
        let started = tokio::time::Instant::now();

        let result: ApiResult<Vec<u32>> =
            retry_rate_limited("/x", 3, Duration::from_millis(1000), || {
                calls.set(calls.get() + 1);
                async { Err(rate_limited("/x")) }
            })
            .await;

        let err = result.expect_err("Exhaustion should produce synthetic error");
        assert_eq!(err.message, "Failed after 3 retries");
        assert_eq!(err.code, 500);
        assert_eq!(err.endpoint, "/x");
        assert_eq!(calls.get(), 3, "Exactly max_attempts calls");

        // Linear backoff: 1000ms after the first attempt, 2000ms after the
        // second, nothing after the last
        assert_eq!(started.elapsed(), Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_recovers_after_rate_limiting() {
        let calls = Cell::new(0u32);
        let started = tokio::time::Instant::now();

        let result = retry_rate_limited("/x", 3, Duration::from_millis(1000), || {
            calls.set(calls.get() + 1);
            let attempt = calls.get();
            async move {
                if attempt <= 2 {
                    Err(rate_limited("/x"))
                } else {
                    Ok(vec!["data"])
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), vec!["data"]);
        assert_eq!(calls.get(), 3);
        // Slept ~1000ms then ~2000ms before the successful third attempt
        assert_eq!(started.elapsed(), Duration::from_millis(3000));
    }

    #[tokio::test]
    async fn test_execute_normalizes_connection_failure() {
        // Nothing listens on this port; the transport fault must come back
        // as a normalized ApiError, never a panic or raw error
        let client = SportsDbClient::with_base_url("http://127.0.0.1:9");

        let result: ApiResult<Vec<League>> =
            client.execute(endpoints::ALL_LEAGUES, &[]).await;

        let err = result.expect_err("Connection failure should surface");
        assert_eq!(err.code, 500);
        assert_eq!(err.endpoint, endpoints::ALL_LEAGUES);
        assert!(!err.message.is_empty());
    }

    #[test]
    fn test_api_error_display_includes_context() {
        let err = ApiError::new("boom", 429, "/all_leagues.php");
        let rendered = err.to_string();
        assert!(rendered.contains("boom"));
        assert!(rendered.contains("429"));
        assert!(rendered.contains("/all_leagues.php"));
    }

    #[test]
    fn test_endpoint_constants() {
        assert_eq!(endpoints::ALL_LEAGUES, "/all_leagues.php");
        assert_eq!(endpoints::SEASONS, "/search_all_seasons.php");
        assert_eq!(endpoints::SEASON_BADGE, "/search_all_seasons.php");
        assert_eq!(endpoints::LEAGUE_DETAILS, "/lookupleague.php");
    }
}
