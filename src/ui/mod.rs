//! UI rendering module for Leaguedex
//!
//! This module contains all the rendering logic for the terminal user
//! interface, using the ratatui library for TUI components.

pub mod league_detail;
pub mod league_list;
pub mod sport_filter;

pub use league_detail::render as render_league_detail;
pub use league_list::render_league_list;
pub use sport_filter::render as render_sport_filter;
