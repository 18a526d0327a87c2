// Five-star and four-star pull lists for the active category.
//
// Most recent first. Each row: "{name} {pity bar} {pulls}", the bar filled
// in proportion to the pity cap and colored by tier. Five-star rows lost to
// the standard pool carry an off-banner marker. Each list scrolls on its own;
// the focused one has a highlighted border.

use gachalog_core::presentation::{
    five_star_tier, four_star_tier, pity_ratio, PityTier, FIVE_STAR_PITY_CAP, FOUR_STAR_PITY_CAP,
};
use gachalog_core::protocol::PullRecord;
use ratatui::layout::{Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};
use ratatui::Frame;

use crate::tui::{max_offset, PullList, ViewState};

/// Width of the pity bar in cells.
const BAR_WIDTH: usize = 20;

/// Width of the item name column.
const NAME_WIDTH: usize = 18;

const OFF_BANNER_MARKER: &str = "off-banner";

pub fn render_five_star(frame: &mut Frame, area: Rect, state: &ViewState) {
    let records = state.pools.recent_five_star_pulls(state.active_tab.code());
    let title = format!("5★ History ({})", records.len());
    render_list(
        frame,
        area,
        &title,
        &records,
        state.scroll(PullList::FiveStar),
        state.focused_list == PullList::FiveStar,
        FIVE_STAR_PITY_CAP,
        five_star_tier,
        "  No five-star pulls yet.",
    );
}

pub fn render_four_star(frame: &mut Frame, area: Rect, state: &ViewState) {
    let records = state.pools.recent_four_star_pulls(state.active_tab.code());
    let title = format!("4★ History ({})", records.len());
    render_list(
        frame,
        area,
        &title,
        &records,
        state.scroll(PullList::FourStar),
        state.focused_list == PullList::FourStar,
        FOUR_STAR_PITY_CAP,
        four_star_tier,
        "  No four-star pulls yet.",
    );
}

#[allow(clippy::too_many_arguments)]
fn render_list(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    records: &[&PullRecord],
    scroll_offset: usize,
    focused: bool,
    cap: u32,
    tier: fn(u32) -> PityTier,
    empty_text: &str,
) {
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title.to_string());

    if records.is_empty() {
        let paragraph = Paragraph::new(empty_text.to_string())
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    // Subtract 2 for borders.
    let visible_rows = (area.height as usize).saturating_sub(2);
    let total = records.len();
    let last_offset = max_offset(total, visible_rows);
    let scroll_offset = scroll_offset.min(last_offset);

    let items: Vec<ListItem> = records
        .iter()
        .skip(scroll_offset)
        .take(visible_rows.max(1))
        .map(|record| ListItem::new(pull_line(record, cap, tier(record.pulls))))
        .collect();

    frame.render_widget(List::new(items).block(block), area);

    if total > visible_rows {
        let mut scrollbar_state =
            ScrollbarState::new(last_offset).position(scroll_offset);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

/// One list row for `record`.
pub fn pull_line(record: &PullRecord, cap: u32, tier: PityTier) -> Line<'static> {
    let color = tier_color(tier);
    let mut spans = vec![
        Span::styled(
            format!("{:<width$} ", truncate(&record.name, NAME_WIDTH), width = NAME_WIDTH),
            Style::default().fg(Color::White),
        ),
        Span::styled(pity_bar(record.pulls, cap, BAR_WIDTH), Style::default().fg(color)),
        Span::styled(
            format!(" {:>3}", record.pulls),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ];
    if record.is_wai {
        spans.push(Span::styled(
            format!(" {}", OFF_BANNER_MARKER),
            Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC),
        ));
    }
    Line::from(spans)
}

/// Bar color for a pity tier.
pub fn tier_color(tier: PityTier) -> Color {
    match tier {
        PityTier::Critical => Color::Red,
        PityTier::Warning => Color::Yellow,
        PityTier::Elevated => Color::Rgb(255, 165, 0),
        PityTier::Nominal => Color::Blue,
    }
}

/// Text bar of `width` cells, filled in proportion to `pulls / cap`.
pub fn pity_bar(pulls: u32, cap: u32, width: usize) -> String {
    let filled = (pity_ratio(pulls, cap) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// At most `max` characters, with an ellipsis when cut.
fn truncate(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        return name.to_string();
    }
    let mut out: String = name.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use gachalog_core::category::CategoryCode;
    use gachalog_core::protocol::{Pool, PoolCollection};

    fn record(name: &str, pulls: u32, is_wai: bool) -> PullRecord {
        PullRecord {
            name: name.to_string(),
            pulls,
            is_wai,
            ..PullRecord::default()
        }
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn tier_colors() {
        assert_eq!(tier_color(PityTier::Critical), Color::Red);
        assert_eq!(tier_color(PityTier::Warning), Color::Yellow);
        assert_eq!(tier_color(PityTier::Elevated), Color::Rgb(255, 165, 0));
        assert_eq!(tier_color(PityTier::Nominal), Color::Blue);
    }

    #[test]
    fn pity_bar_fills_proportionally() {
        assert_eq!(pity_bar(0, 90, 10), "░".repeat(10));
        assert_eq!(pity_bar(45, 90, 10), format!("{}{}", "█".repeat(5), "░".repeat(5)));
        assert_eq!(pity_bar(90, 90, 10), "█".repeat(10));
        assert_eq!(pity_bar(120, 90, 10), "█".repeat(10));
    }

    #[test]
    fn pull_line_colors_by_tier() {
        let line = pull_line(&record("Furina", 77, false), 90, five_star_tier(77));
        assert_eq!(line.spans[1].style.fg, Some(Color::Yellow));
        assert_eq!(line.spans[2].content.as_ref(), "  77");
        assert_eq!(line.spans.len(), 3);
    }

    #[test]
    fn pull_line_marks_off_banner() {
        let line = pull_line(&record("Diluc", 90, true), 90, five_star_tier(90));
        assert!(text(&line).ends_with(" off-banner"));
        assert_eq!(line.spans[1].style.fg, Some(Color::Red));
    }

    #[test]
    fn long_names_are_truncated() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
        let line = pull_line(&record(&"x".repeat(40), 1, false), 10, PityTier::Nominal);
        assert_eq!(line.spans[0].content.chars().count(), NAME_WIDTH + 1);
    }

    #[test]
    fn render_does_not_panic_empty() {
        let backend = ratatui::backend::TestBackend::new(80, 10);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| {
                render_five_star(frame, frame.area(), &state);
            })
            .unwrap();
    }

    #[test]
    fn render_does_not_panic_with_overflowing_lists() {
        let backend = ratatui::backend::TestBackend::new(80, 8);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();

        let mut pool = Pool::empty("Character Event Wish");
        pool.pulls = (1..=20).map(|i| record("Five", i * 4, i % 3 == 0)).collect();
        pool.four_star_pulls = (1..=20).map(|i| record("Four", i % 11, false)).collect();
        let mut data = PoolCollection::new();
        data.insert(CategoryCode::CharacterEvent.code().into(), pool);
        state.pools.replace_all(&data);
        state
            .scroll_offset
            .insert((CategoryCode::CharacterEvent, PullList::FiveStar), 100);
        state
            .scroll_offset
            .insert((CategoryCode::CharacterEvent, PullList::FourStar), 100);

        terminal
            .draw(|frame| {
                let area = frame.area();
                let half = area.width / 2;
                render_five_star(frame, Rect { width: half, ..area }, &state);
                render_four_star(frame, Rect { x: half, width: half, ..area }, &state);
            })
            .unwrap();
    }

    fn screen(terminal: &ratatui::Terminal<ratatui::backend::TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn four_star_list_scrolls_to_oldest_record() {
        let backend = ratatui::backend::TestBackend::new(60, 12);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();

        let mut pool = Pool::empty("Character Event Wish");
        pool.four_star_pulls = (0..40).map(|i| record(&format!("four {i:02}"), 5, false)).collect();
        let mut data = PoolCollection::new();
        data.insert(CategoryCode::CharacterEvent.code().into(), pool);
        state.pools.replace_all(&data);

        terminal
            .draw(|frame| render_four_star(frame, frame.area(), &state))
            .unwrap();
        let top = screen(&terminal);
        assert!(top.contains("four 39"));
        assert!(!top.contains("four 00"));

        // 10 visible rows, so the last page starts at offset 30.
        state
            .scroll_offset
            .insert((CategoryCode::CharacterEvent, PullList::FourStar), 30);
        terminal
            .draw(|frame| render_four_star(frame, frame.area(), &state))
            .unwrap();
        let bottom = screen(&terminal);
        assert!(bottom.contains("four 00"));
        assert!(bottom.contains("four 09"));
        assert!(!bottom.contains("four 10"));
    }
}
