// Pool summary widget: counters for the active category.
//
//   Total pulls 1,600 | Primogems 256,000
//   5★ 3 | 4★ 40 | 3★ 1,557

use gachalog_core::presentation::format_count;
use gachalog_core::protocol::PoolStats;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::widgets::status_bar::tab_label;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let pool = state.pools.get(state.active_tab);
    let lines = summary_lines(&pool.stats, &state.thousands_separator);

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(tab_label(state.active_tab, &state.pools)),
    );
    frame.render_widget(paragraph, area);
}

/// The two counter rows for `stats`.
pub fn summary_lines(stats: &PoolStats, separator: &str) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::Gray);
    let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let sep = || Span::styled(" | ", Style::default().fg(Color::DarkGray));

    vec![
        Line::from(vec![
            Span::styled("Total pulls ", label),
            Span::styled(format_count(stats.total_pulls, separator), value),
            sep(),
            Span::styled("Primogems ", label),
            Span::styled(format_count(stats.total_primogems, separator), value),
        ]),
        Line::from(vec![
            Span::styled("5★ ", Style::default().fg(Color::Yellow)),
            Span::styled(format_count(stats.five_star_count, separator), value),
            sep(),
            Span::styled("4★ ", Style::default().fg(Color::Magenta)),
            Span::styled(format_count(stats.four_star_count, separator), value),
            sep(),
            Span::styled("3★ ", Style::default().fg(Color::Blue)),
            Span::styled(format_count(stats.three_star_count, separator), value),
        ]),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn summary_formats_counters() {
        let stats = PoolStats {
            total_pulls: 1_600,
            total_primogems: 256_000,
            five_star_count: 3,
            four_star_count: 40,
            three_star_count: 1_557,
        };
        let lines = summary_lines(&stats, ",");
        assert_eq!(text(&lines[0]), "Total pulls 1,600 | Primogems 256,000");
        assert_eq!(text(&lines[1]), "5★ 3 | 4★ 40 | 3★ 1,557");
    }

    #[test]
    fn summary_uses_configured_separator() {
        let stats = PoolStats {
            total_primogems: 1_234_567,
            ..PoolStats::default()
        };
        let lines = summary_lines(&stats, " ");
        assert!(text(&lines[0]).ends_with("Primogems 1 234 567"));
    }

    #[test]
    fn render_does_not_panic_with_defaults() {
        let backend = ratatui::backend::TestBackend::new(60, 4);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
