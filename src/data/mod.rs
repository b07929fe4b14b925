//! Core data models for Leaguedex
//!
//! This module contains the record types mirroring TheSportsDB API schema
//! for leagues, seasons, and seasonal badges, along with the normalized
//! error shape shared by every layer above the request executor.

pub mod client;
pub mod directory;

pub use client::{endpoints, retry_rate_limited, ApiError, ApiResult, SportsDbClient};
pub use directory::{describe_api_error, extract_badge_url, LeagueDirectory};

use serde::{Deserialize, Serialize};

/// A sports league as returned by the remote API
///
/// Field names follow TheSportsDB's `idLeague`/`strLeague` convention on the
/// wire; all display fields beyond the identifier and name may be null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    /// Unique identifier for the league
    #[serde(rename = "idLeague")]
    pub id: String,
    /// Human-readable league name
    #[serde(rename = "strLeague")]
    pub name: String,
    /// The sport this league belongs to
    #[serde(rename = "strSport")]
    pub sport: String,
    /// Alternate names, if any
    #[serde(rename = "strLeagueAlternate", default)]
    pub alternate_name: Option<String>,
    /// Division within the sport, if any
    #[serde(rename = "strDivision", default)]
    pub division: Option<String>,
    /// The league's current season label
    #[serde(rename = "strCurrentSeason", default)]
    pub current_season: Option<String>,
    /// Country the league is based in
    #[serde(rename = "strCountry", default)]
    pub country: Option<String>,
    /// Official website
    #[serde(rename = "strWebsite", default)]
    pub website: Option<String>,
    /// English-language description
    #[serde(rename = "strDescriptionEN", default)]
    pub description: Option<String>,
}

/// A single season of a league
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    /// Unique identifier for the season
    #[serde(rename = "idSeason", default)]
    pub id: Option<String>,
    /// Season label (e.g., "2014-2015")
    #[serde(rename = "strSeason")]
    pub season: String,
    /// Name of the league this season belongs to
    #[serde(rename = "strLeague", default)]
    pub league: Option<String>,
    /// Division within the league, if any
    #[serde(rename = "strDivision", default)]
    pub division: Option<String>,
}

/// A season entry carrying the seasonal badge artwork URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonBadge {
    /// Unique identifier for the season
    #[serde(rename = "idSeason", default)]
    pub id: Option<String>,
    /// Season label
    #[serde(rename = "strSeason")]
    pub season: String,
    /// Name of the league this season belongs to
    #[serde(rename = "strLeague", default)]
    pub league: Option<String>,
    /// URL of the badge image, if one exists for this season
    #[serde(rename = "strBadge", default)]
    pub badge: Option<String>,
}
