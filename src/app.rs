//! Application state management for Leaguedex
//!
//! This module contains the main application state, handling keyboard input,
//! league loading through the read-through directory, debounced filtering,
//! and state transitions between the list and detail views.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use crate::cli::StartupConfig;
use crate::data::{describe_api_error, ApiResult, League, LeagueDirectory, Season};

/// Delay between the last keystroke and the filter actually running
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Message shown when a league has no seasonal badge
pub const NO_BADGE_MESSAGE: &str = "No badge available for this league";

/// Application state enum representing the current view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Initial loading state while fetching the league list
    Loading,
    /// List view showing all (filtered) leagues
    LeagueList,
    /// Detail view for a specific league, keyed by league id
    LeagueDetail(String),
}

/// Three-state result of the badge fetch shown in the detail view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BadgeState {
    /// Fetch still in flight
    Loading,
    /// Badge URL retrieved
    Ready(String),
    /// No badge, or the fetch failed; carries the message to display
    Failed(String),
}

/// State of the sport filter overlay
#[derive(Debug, Clone, Default)]
pub struct SportFilter {
    /// Whether the overlay is currently shown
    pub open: bool,
    /// Cursor position within the sport list
    pub cursor: usize,
    /// Sports currently selected; empty means "all sports"
    pub selected: BTreeSet<String>,
}

/// Main application struct managing state and data
pub struct App {
    /// Current application state/view
    pub state: AppState,
    /// All leagues as loaded from cache or network
    pub leagues: Vec<League>,
    /// Indices into `leagues` that pass the current search + sport filter
    pub filtered: Vec<usize>,
    /// Current search text
    pub search_input: String,
    /// Sport filter overlay state
    pub sport_filter: SportFilter,
    /// Index of currently selected row within `filtered`
    pub selected_index: usize,
    /// Error message for the list-level banner, if the last load failed
    pub error: Option<String>,
    /// Badge fetch state for the detail view
    pub badge: BadgeState,
    /// Seasons for the league shown in the detail view
    pub seasons: Vec<Season>,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag indicating a refresh has been requested
    pub refresh_requested: bool,
    /// Timestamp of the last successful league load
    pub last_refresh: Option<DateTime<Local>>,
    /// Deadline for the pending debounced filter run; a new keystroke
    /// supersedes the previous schedule
    pending_filter_at: Option<Instant>,
    /// League id whose detail data still needs fetching
    pending_detail_fetch: Option<String>,
    /// Read-through directory over the remote API
    directory: LeagueDirectory,
}

impl App {
    /// Creates a new App instance around an explicit directory
    pub fn with_directory(directory: LeagueDirectory) -> Self {
        Self {
            state: AppState::Loading,
            leagues: Vec::new(),
            filtered: Vec::new(),
            search_input: String::new(),
            sport_filter: SportFilter::default(),
            selected_index: 0,
            error: None,
            badge: BadgeState::Loading,
            seasons: Vec::new(),
            should_quit: false,
            refresh_requested: false,
            last_refresh: None,
            pending_filter_at: None,
            pending_detail_fetch: None,
            directory,
        }
    }

    /// Creates a new App instance with the given startup configuration
    ///
    /// Applies CLI arguments: `--sport` pre-populates the sport filter and
    /// `--no-cache` swaps in a cacheless directory.
    pub fn with_startup_config(config: StartupConfig) -> Self {
        let directory = if config.use_cache {
            LeagueDirectory::new()
        } else {
            LeagueDirectory::without_cache()
        };

        let mut app = Self::with_directory(directory);
        for sport in config.initial_sports {
            app.sport_filter.selected.insert(sport);
        }
        app
    }

    /// Loads the league list through the cache / retry-wrapped executor
    ///
    /// Transitions to LeagueList when complete; a failure lands the
    /// normalized message in `error` instead, and the loading state is
    /// cleared either way.
    pub async fn load_leagues(&mut self) {
        match self.directory.fetch_leagues().await {
            Ok(leagues) => {
                self.leagues = leagues;
                self.error = None;
                self.last_refresh = Some(Local::now());
                self.apply_filter_now();
            }
            Err(err) => {
                self.error = Some(describe_api_error(&err));
            }
        }
        self.state = AppState::LeagueList;
    }

    /// Drops the cached league list and reloads from the network
    pub async fn refresh(&mut self) {
        self.directory.invalidate_leagues();
        self.load_leagues().await;
    }

    /// Fetches badge and seasons for a league, applying them to detail state
    ///
    /// The two lookups are awaited jointly. The result is applied even when
    /// the user has already left the detail view; there is no cancellation.
    pub async fn load_league_detail(&mut self, league_id: &str) {
        let (badge_result, seasons_result) = futures::future::join(
            self.directory.fetch_badge_url(league_id),
            self.directory.fetch_seasons(league_id),
        )
        .await;

        self.badge = badge_state_from_result(badge_result);
        self.seasons = seasons_result.unwrap_or_default();
    }

    /// Takes the league id whose detail fetch is still pending, if any
    pub fn take_pending_detail_fetch(&mut self) -> Option<String> {
        self.pending_detail_fetch.take()
    }

    /// Returns the league currently under the selection cursor
    pub fn selected_league(&self) -> Option<&League> {
        self.filtered
            .get(self.selected_index)
            .and_then(|&index| self.leagues.get(index))
    }

    /// Looks up a loaded league by id
    pub fn league_by_id(&self, league_id: &str) -> Option<&League> {
        self.leagues.iter().find(|league| league.id == league_id)
    }

    /// Distinct sports across the loaded leagues, sorted
    pub fn unique_sports(&self) -> Vec<String> {
        let sports: BTreeSet<String> = self
            .leagues
            .iter()
            .map(|league| league.sport.clone())
            .collect();
        sports.into_iter().collect()
    }

    /// Schedules the debounced filter run
    ///
    /// Each call supersedes any previously pending schedule, so rapid
    /// keystrokes result in a single filter run 300ms after the last one.
    fn schedule_filter(&mut self) {
        self.pending_filter_at = Some(Instant::now() + SEARCH_DEBOUNCE);
    }

    /// Applies a due debounced filter; called from the main loop each tick
    pub fn tick(&mut self) {
        if let Some(deadline) = self.pending_filter_at {
            if Instant::now() >= deadline {
                self.pending_filter_at = None;
                self.apply_filter_now();
            }
        }
    }

    /// Recomputes `filtered` from the search text and sport selection
    ///
    /// Search is a case-insensitive substring match on the league name; the
    /// sport filter is an AND on top, with an empty selection meaning all.
    pub fn apply_filter_now(&mut self) {
        let query = self.search_input.to_lowercase();
        let sports: BTreeSet<String> = self
            .sport_filter
            .selected
            .iter()
            .map(|sport| sport.to_lowercase())
            .collect();

        self.filtered = self
            .leagues
            .iter()
            .enumerate()
            .filter(|(_, league)| {
                let matches_search = league.name.to_lowercase().contains(&query);
                let matches_sport =
                    sports.is_empty() || sports.contains(&league.sport.to_lowercase());
                matches_search && matches_sport
            })
            .map(|(index, _)| index)
            .collect();

        if self.selected_index >= self.filtered.len() {
            self.selected_index = 0;
        }
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - Printable keys: edit the search text (list view)
    /// - `Up`/`Down`: move selection
    /// - `Enter`: open detail view for the selected league
    /// - `Ctrl+S`: toggle the sport filter overlay
    /// - `Ctrl+R`: refresh (drop cached list, refetch)
    /// - `Esc` (list): clear search if non-empty, otherwise quit
    /// - `Esc` (detail/overlay): go back
    /// - `q` (detail) / `Ctrl+C`: quit
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Ctrl+C always quits
        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == KeyCode::Char('c')
        {
            self.should_quit = true;
            return;
        }

        // Sport filter overlay intercepts all keys when shown
        if self.sport_filter.open {
            self.handle_sport_filter_key(key_event);
            return;
        }

        match self.state {
            AppState::Loading => {
                // Only quit is allowed during loading
                if key_event.code == KeyCode::Char('q') || key_event.code == KeyCode::Esc {
                    self.should_quit = true;
                }
            }
            AppState::LeagueList => match key_event.code {
                KeyCode::Esc => {
                    if self.search_input.is_empty() {
                        self.should_quit = true;
                    } else {
                        self.search_input.clear();
                        self.schedule_filter();
                    }
                }
                KeyCode::Up => {
                    self.move_selection_up();
                }
                KeyCode::Down => {
                    self.move_selection_down();
                }
                KeyCode::Enter => {
                    if let Some(league) = self.selected_league() {
                        let league_id = league.id.clone();
                        self.badge = BadgeState::Loading;
                        self.seasons.clear();
                        self.pending_detail_fetch = Some(league_id.clone());
                        self.state = AppState::LeagueDetail(league_id);
                    }
                }
                KeyCode::Char('s') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.sport_filter.open = true;
                    self.sport_filter.cursor = 0;
                }
                KeyCode::Char('r') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.refresh_requested = true;
                }
                KeyCode::Backspace => {
                    self.search_input.pop();
                    self.schedule_filter();
                }
                KeyCode::Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.search_input.push(c);
                    self.schedule_filter();
                }
                _ => {}
            },
            AppState::LeagueDetail(_) => match key_event.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                }
                KeyCode::Esc => {
                    self.state = AppState::LeagueList;
                }
                _ => {}
            },
        }
    }

    /// Handles keys while the sport filter overlay is open
    fn handle_sport_filter_key(&mut self, key_event: KeyEvent) {
        let sports = self.unique_sports();
        match key_event.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.sport_filter.open = false;
            }
            KeyCode::Up => {
                if !sports.is_empty() {
                    if self.sport_filter.cursor == 0 {
                        self.sport_filter.cursor = sports.len() - 1;
                    } else {
                        self.sport_filter.cursor -= 1;
                    }
                }
            }
            KeyCode::Down => {
                if !sports.is_empty() {
                    self.sport_filter.cursor = (self.sport_filter.cursor + 1) % sports.len();
                }
            }
            KeyCode::Char(' ') => {
                if let Some(sport) = sports.get(self.sport_filter.cursor) {
                    if !self.sport_filter.selected.remove(sport) {
                        self.sport_filter.selected.insert(sport.clone());
                    }
                    self.schedule_filter();
                }
            }
            _ => {}
        }
    }

    /// Moves the selection up in the list, wrapping to bottom if at top
    fn move_selection_up(&mut self) {
        let count = self.filtered.len();
        if count == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = count - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Moves the selection down in the list, wrapping to top if at bottom
    fn move_selection_down(&mut self) {
        let count = self.filtered.len();
        if count == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % count;
    }
}

/// Maps the badge fetch outcome to the state the detail view renders
///
/// An error becomes its display message; a missing badge becomes the fixed
/// no-badge message, so the view only ever deals with three states.
fn badge_state_from_result(result: ApiResult<Option<String>>) -> BadgeState {
    match result {
        Ok(Some(url)) => BadgeState::Ready(url),
        Ok(None) => BadgeState::Failed(NO_BADGE_MESSAGE.to_string()),
        Err(err) => BadgeState::Failed(describe_api_error(&err)),
    }
}
