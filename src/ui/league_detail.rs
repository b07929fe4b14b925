//! League detail screen UI
//!
//! Renders the detail view for a single league: its display fields, the
//! three-state seasonal badge result, and the season list. Badge failures
//! render inside this view rather than replacing the whole screen.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, BadgeState};

/// Most seasons shown before the list is elided
const MAX_SEASON_ROWS: usize = 12;

/// Renders the league detail screen
///
/// # Arguments
/// * `frame` - The ratatui frame to render into
/// * `app` - The application state
/// * `league_id` - The ID of the league to display
pub fn render(frame: &mut Frame, app: &App, league_id: &str) {
    let area = frame.area();

    let Some(league) = app.league_by_id(league_id) else {
        render_no_data(frame, area, league_id);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Detail content
            Constraint::Length(1), // Help text
        ])
        .split(area);

    let mut lines = vec![Line::from(vec![
        Span::styled("Sport: ", Style::default().fg(Color::DarkGray)),
        Span::styled(league.sport.clone(), Style::default().fg(Color::Yellow)),
    ])];

    if let Some(ref country) = league.country {
        lines.push(detail_line("Country: ", country));
    }
    if let Some(ref season) = league.current_season {
        lines.push(detail_line("Current season: ", season));
    }
    if let Some(ref website) = league.website {
        lines.push(detail_line("Website: ", website));
    }
    if let Some(ref alternate) = league.alternate_name {
        lines.push(detail_line("Also known as: ", alternate));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Seasonal Badge",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(badge_line(&app.badge));

    if !app.seasons.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Seasons ({})", app.seasons.len()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        for season in app.seasons.iter().take(MAX_SEASON_ROWS) {
            lines.push(Line::from(Span::styled(
                format!("  {}", season.season),
                Style::default().fg(Color::White),
            )));
        }
        if app.seasons.len() > MAX_SEASON_ROWS {
            lines.push(Line::from(Span::styled(
                format!("  … and {} more", app.seasons.len() - MAX_SEASON_ROWS),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            format!(" {} ", league.name),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));

    frame.render_widget(Paragraph::new(lines).block(block), chunks[0]);
    render_help(frame, chunks[1]);
}

/// Builds the line rendering the current badge state
fn badge_line(badge: &BadgeState) -> Line<'static> {
    match badge {
        BadgeState::Loading => Line::from(Span::styled(
            "  Loading badge...",
            Style::default().fg(Color::Cyan),
        )),
        BadgeState::Ready(url) => Line::from(vec![
            Span::raw("  "),
            Span::styled(url.clone(), Style::default().fg(Color::Green)),
        ]),
        BadgeState::Failed(message) => Line::from(Span::styled(
            format!("  {}", message),
            Style::default().fg(Color::Red),
        )),
    }
}

/// A labeled detail row
fn detail_line(label: &'static str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::DarkGray)),
        Span::styled(value.to_string(), Style::default().fg(Color::White)),
    ])
}

/// Fallback when the league id is not in the loaded list
fn render_no_data(frame: &mut Frame, area: Rect, league_id: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let paragraph = Paragraph::new(format!("No data for league {}", league_id))
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Renders the help text at the bottom of the detail screen
fn render_help(frame: &mut Frame, area: Rect) {
    let help = Line::from(vec![
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(" Back  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" Quit"),
    ]);
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
