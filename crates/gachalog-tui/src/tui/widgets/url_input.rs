// URL input field. Shows the tail of long URLs so the cursor end stays
// visible.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::{InputMode, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let editing = state.input_mode == InputMode::EditingUrl;
    let inner_width = (area.width as usize).saturating_sub(2);

    let (title, border) = if editing {
        ("Gacha log URL (Enter to analyze)", Style::default().fg(Color::Cyan))
    } else {
        ("Gacha log URL (u to edit)", Style::default())
    };

    let line = if state.url_input.is_empty() && !editing {
        Line::from(Span::styled(
            "Paste the gacha log link here",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        // Leave one column for the cursor.
        let shown = visible_tail(&state.url_input, inner_width.saturating_sub(1));
        Line::from(Span::raw(shown.to_string()))
    };

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title),
    );
    frame.render_widget(paragraph, area);

    if editing && area.height > 2 {
        let shown = visible_tail(&state.url_input, inner_width.saturating_sub(1));
        let cursor_x = area.x + 1 + shown.chars().count() as u16;
        frame.set_cursor_position((cursor_x, area.y + 1));
    }
}

/// The last `width` characters of `text`.
pub fn visible_tail(text: &str, width: usize) -> &str {
    let len = text.chars().count();
    if len <= width {
        return text;
    }
    match text.char_indices().nth(len - width) {
        Some((idx, _)) => &text[idx..],
        None => "",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
