// Loading overlay widget.
//
// Centered modal drawn on top of the dashboard while an analysis is in
// flight. Shows the latest progress label, or "Loading..." before the first
// poll lands.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

const MIN_DIALOG_WIDTH: u16 = 30;
const DIALOG_HEIGHT: u16 = 5;

pub fn render(frame: &mut Frame, area: Rect, label: &str) {
    let dialog_area = centered_rect(dialog_width(label), DIALOG_HEIGHT, area);

    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            " Analyzing ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));

    let text = vec![
        Line::from(Span::styled(
            label.to_string(),
            Style::default().fg(Color::White),
        ))
        .centered(),
        Line::from(Span::styled(
            "q to quit",
            Style::default().fg(Color::DarkGray),
        ))
        .centered(),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, dialog_area);
}

/// Wide enough for the label plus borders and padding.
fn dialog_width(label: &str) -> u16 {
    let needed = label.chars().count().saturating_add(6);
    u16::try_from(needed)
        .unwrap_or(u16::MAX)
        .max(MIN_DIALOG_WIDTH)
}

/// Compute a centered rectangle of the given size within `area`, clamped to
/// the available space.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let clamped_width = width.min(area.width);
    let clamped_height = height.min(area.height);

    let vertical = Layout::vertical([Constraint::Length(clamped_height)])
        .flex(Flex::Center)
        .split(area);

    let horizontal = Layout::horizontal([Constraint::Length(clamped_width)])
        .flex(Flex::Center)
        .split(vertical[0]);

    horizontal[0]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
