//! Sport filter overlay
//!
//! Renders a centered modal overlay listing the distinct sports from the
//! loaded leagues, with checkbox-style toggles. An empty selection means
//! no sport restriction.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;

/// Renders the sport filter overlay on top of the current view
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let sports = app.unique_sports();

    let overlay_width = 40;
    let overlay_height = (sports.len() as u16 + 6).min(area.height);
    let overlay_area = centered_rect(overlay_width, overlay_height, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let mut lines = vec![Line::from("")];

    if sports.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No sports loaded",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for (index, sport) in sports.iter().enumerate() {
        let is_cursor = index == app.sport_filter.cursor;
        let is_selected = app.sport_filter.selected.contains(sport);

        let checkbox = if is_selected { "[x]" } else { "[ ]" };
        let cursor = if is_cursor { "\u{25B8} " } else { "  " }; // ▸

        let style = if is_cursor {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        lines.push(Line::from(vec![
            Span::styled(cursor, style),
            Span::styled(format!("{} {}", checkbox, sport), style),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Space Toggle  Enter/Esc Close",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .title(" Filter by Sport ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, overlay_area);
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
