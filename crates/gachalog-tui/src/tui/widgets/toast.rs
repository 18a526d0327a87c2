// Toast stack: short-lived notifications in the top-right corner, newest at
// the bottom.

use std::collections::VecDeque;

use gachalog_core::notify::Severity;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::Toast;

const MAX_TOAST_WIDTH: u16 = 60;
const TOAST_HEIGHT: u16 = 3;

pub fn render(frame: &mut Frame, area: Rect, toasts: &VecDeque<Toast>) {
    // Start below the status bar.
    let mut y = area.y.saturating_add(1);
    for toast in toasts {
        if y.saturating_add(TOAST_HEIGHT) > area.y.saturating_add(area.height) {
            break;
        }
        let text = toast.notification.display_text();
        let width = toast_width(&text, area.width);
        let rect = Rect::new(
            area.x + area.width.saturating_sub(width),
            y,
            width,
            TOAST_HEIGHT,
        );
        let color = severity_color(toast.notification.severity);

        frame.render_widget(Clear, rect);
        let paragraph = Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(color),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
        .style(Style::default().bg(Color::Black));
        frame.render_widget(paragraph, rect);

        y = y.saturating_add(TOAST_HEIGHT);
    }
}

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Warning => Color::Yellow,
        Severity::Success => Color::Green,
        Severity::Error => Color::Red,
    }
}

/// Text plus borders and padding, capped by `MAX_TOAST_WIDTH` and the screen.
fn toast_width(text: &str, available: u16) -> u16 {
    let needed = u16::try_from(text.chars().count().saturating_add(4)).unwrap_or(u16::MAX);
    needed.min(MAX_TOAST_WIDTH).min(available)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
