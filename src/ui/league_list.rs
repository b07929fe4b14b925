//! League list screen rendering
//!
//! Renders the main league list view: the search bar, the active sport
//! filter line, the filtered league rows, the error banner when the last
//! load failed, and the help footer with data freshness.

use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

/// Renders the league list screen
///
/// # Arguments
/// * `frame` - The ratatui Frame to render to
/// * `app` - The application state containing league data and selection
pub fn render_league_list(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Length(1), // Active filter line
            Constraint::Min(3),    // League list / error banner
            Constraint::Length(1), // Help text
        ])
        .split(area);

    render_search_bar(frame, app, chunks[0]);
    render_filter_line(frame, app, chunks[1]);

    if let Some(ref message) = app.error {
        render_error_banner(frame, message, chunks[2]);
    } else {
        render_list(frame, app, chunks[2]);
    }

    render_help(frame, chunks[3], app);
}

/// Renders the search input with a block cursor
fn render_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::styled("Search: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.search_input.clone(),
            Style::default().fg(Color::White),
        ),
        Span::styled("\u{2588}", Style::default().fg(Color::Cyan)), // █
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Renders the active sport filter summary line
fn render_filter_line(frame: &mut Frame, app: &App, area: Rect) {
    let selected = &app.sport_filter.selected;
    let summary = if selected.is_empty() {
        "Sports: all".to_string()
    } else {
        let sports: Vec<&str> = selected.iter().map(String::as_str).collect();
        format!("Sports: {}", sports.join(", "))
    };

    let line = Line::from(Span::styled(
        format!(" {}", summary),
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Renders the error banner in place of the list
fn render_error_banner(frame: &mut Frame, message: &str, area: Rect) {
    let block = Block::default()
        .title(" Sports Leagues ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let paragraph = Paragraph::new(Line::from(Span::styled(
        format!("Error: {}", message),
        Style::default().fg(Color::Red),
    )))
    .block(block)
    .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Renders the filtered league rows
fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::with_capacity(app.filtered.len().max(1));

    if app.filtered.is_empty() {
        lines.push(Line::from(Span::styled(
            "No leagues found",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for (row, &league_index) in app.filtered.iter().enumerate() {
        let Some(league) = app.leagues.get(league_index) else {
            continue;
        };
        let is_selected = row == app.selected_index;

        let cursor = if is_selected { "\u{25B8} " } else { "  " }; // ▸ or space

        let name_style = if is_selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let cursor_style = if is_selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };

        let mut spans = vec![
            Span::styled(cursor, cursor_style),
            Span::styled(format!("{:<34}", league.name), name_style),
            Span::raw(" "),
            Span::styled(
                format!("{:<14}", league.sport),
                Style::default().fg(Color::Yellow),
            ),
        ];

        if let Some(ref season) = league.current_season {
            spans.push(Span::styled(
                format!("  Season: {}", season),
                Style::default().fg(Color::Gray),
            ));
        }

        lines.push(Line::from(spans));
    }

    let title = format!(" Sports Leagues ({}) ", app.filtered.len());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Renders the help text at the bottom of the screen with data freshness
fn render_help(frame: &mut Frame, area: Rect, app: &App) {
    let mut help_spans = vec![
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Navigate  "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Badge  "),
        Span::styled("Ctrl+S", Style::default().fg(Color::Yellow)),
        Span::raw(" Sports  "),
        Span::styled("Ctrl+R", Style::default().fg(Color::Yellow)),
        Span::raw(" Refresh  "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(" Clear/Quit"),
    ];

    // Add data freshness indicator
    if let Some(last_refresh) = app.last_refresh {
        let elapsed = Local::now() - last_refresh;
        let mins_ago = elapsed.num_minutes();
        let freshness_text = if mins_ago < 1 {
            " │ Data: just now".to_string()
        } else if mins_ago < 60 {
            format!(" │ Data: {}m ago", mins_ago)
        } else {
            format!(" │ Data: {}h ago", elapsed.num_hours())
        };
        help_spans.push(Span::styled(
            freshness_text,
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph =
        Paragraph::new(Line::from(help_spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}
