//! Command-line interface parsing for Leaguedex
//!
//! This module handles parsing of CLI arguments using clap, including the
//! repeatable --sport flag for starting with a sport filter applied and
//! --no-cache for bypassing the on-disk cache.

use clap::Parser;

/// Leaguedex - Browse sports leagues and look up seasonal badges
#[derive(Parser, Debug)]
#[command(name = "leaguedex")]
#[command(about = "Browse sports leagues from TheSportsDB and look up seasonal badges")]
#[command(version)]
pub struct Cli {
    /// Start with a sport filter applied; may be given multiple times
    ///
    /// Examples:
    ///   leaguedex --sport Soccer
    ///   leaguedex --sport Soccer --sport Basketball
    ///
    /// Sports are matched case-insensitively against the loaded league list.
    #[arg(long, value_name = "SPORT")]
    pub sport: Vec<String>,

    /// Ignore the on-disk cache for this run; every fetch hits the network
    #[arg(long)]
    pub no_cache: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Sports to pre-select in the filter
    pub initial_sports: Vec<String>,
    /// Whether the on-disk cache is used
    pub use_cache: bool,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            initial_sports: Vec::new(),
            use_cache: true,
        }
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            initial_sports: cli.sport.clone(),
            use_cache: !cli.no_cache,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["leaguedex"]);
        assert!(cli.sport.is_empty());
        assert!(!cli.no_cache);
    }

    #[test]
    fn test_cli_parse_single_sport() {
        let cli = Cli::parse_from(["leaguedex", "--sport", "Soccer"]);
        assert_eq!(cli.sport, vec!["Soccer"]);
    }

    #[test]
    fn test_cli_parse_repeated_sports() {
        let cli = Cli::parse_from(["leaguedex", "--sport", "Soccer", "--sport", "Basketball"]);
        assert_eq!(cli.sport, vec!["Soccer", "Basketball"]);
    }

    #[test]
    fn test_cli_parse_no_cache_flag() {
        let cli = Cli::parse_from(["leaguedex", "--no-cache"]);
        assert!(cli.no_cache);
    }

    #[test]
    fn test_startup_config_default() {
        let config = StartupConfig::default();
        assert!(config.initial_sports.is_empty());
        assert!(config.use_cache);
    }

    #[test]
    fn test_startup_config_from_cli() {
        let cli = Cli::parse_from(["leaguedex", "--sport", "Motorsport", "--no-cache"]);
        let config = StartupConfig::from_cli(&cli);
        assert_eq!(config.initial_sports, vec!["Motorsport"]);
        assert!(!config.use_cache);
    }
}
