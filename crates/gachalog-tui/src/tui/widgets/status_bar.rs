// Status bar widget: request state, task id, category tabs. Also the help
// bar at the bottom of the screen.

use gachalog_core::category::CategoryCode;
use gachalog_core::store::PoolDataStore;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::{InputMode, ViewState};

/// Render the status bar into the given area.
///
/// Layout: [request indicator] [task id] | [tab bar]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = Vec::new();

    let (dot, label, dot_color) = request_indicator(state.loading);
    spans.push(Span::styled(
        format!(" {} {} ", dot, label),
        Style::default().fg(dot_color),
    ));

    spans.push(Span::styled(
        format!("task {}", short_task_id(&state.task_id)),
        Style::default().fg(Color::Gray),
    ));

    spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));

    spans.extend(tab_spans(state.active_tab, &state.pools));

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Dot, label and color for the request state.
pub fn request_indicator(loading: bool) -> (&'static str, &'static str, Color) {
    if loading {
        ("●", "Analyzing", Color::Yellow)
    } else {
        ("●", "Idle", Color::Green)
    }
}

/// First 8 characters; enough to match against the log.
pub fn short_task_id(task_id: &str) -> &str {
    match task_id.char_indices().nth(8) {
        Some((idx, _)) => &task_id[..idx],
        None => task_id,
    }
}

/// Tab indicator spans in display order, active tab highlighted.
/// E.g. "[1:Character Event Wish] [2:Weapon Event Wish] ..."
pub fn tab_spans(active: CategoryCode, pools: &PoolDataStore) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, (category, pool)) in pools.display_order().enumerate() {
        let style = if category == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(
            format!("[{}:{}]", i + 1, pool_label(category, &pool.name)),
            style,
        ));
        spans.push(Span::raw(" "));
    }
    spans
}

/// Pool name from the backend, or the category default before any data.
pub fn tab_label(category: CategoryCode, pools: &PoolDataStore) -> String {
    pool_label(category, &pools.get(category).name)
}

fn pool_label(category: CategoryCode, name: &str) -> String {
    if name.is_empty() {
        category.default_name().to_string()
    } else {
        name.to_string()
    }
}

// ---------------------------------------------------------------------------
// Help bar
// ---------------------------------------------------------------------------

pub fn render_help(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        help_text(state.input_mode),
        Style::default().fg(Color::White).add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

pub fn help_text(mode: InputMode) -> &'static str {
    match mode {
        InputMode::Normal => " u:Enter URL | 1-4/←→:Tabs | f:Focus 5★/4★ | ↑↓/Home/End:Scroll | q:Quit",
        InputMode::EditingUrl => " Enter:Analyze | Esc:Cancel | Ctrl+C:Quit",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use gachalog_core::protocol::{Pool, PoolCollection};

    #[test]
    fn request_indicator_states() {
        assert_eq!(request_indicator(false), ("●", "Idle", Color::Green));
        assert_eq!(request_indicator(true), ("●", "Analyzing", Color::Yellow));
    }

    #[test]
    fn short_task_id_truncates() {
        assert_eq!(
            short_task_id("3f2b9c1e-aaaa-4bbb-8ccc-0123456789ab"),
            "3f2b9c1e"
        );
        assert_eq!(short_task_id("abc"), "abc");
        assert_eq!(short_task_id(""), "");
    }

    #[test]
    fn tab_spans_follow_display_order() {
        let pools = PoolDataStore::initialize();
        let labels: Vec<String> = tab_spans(CategoryCode::CharacterEvent, &pools)
            .iter()
            .step_by(2)
            .map(|s| s.content.to_string())
            .collect();
        assert_eq!(
            labels,
            vec![
                "[1:Character Event Wish]",
                "[2:Weapon Event Wish]",
                "[3:Standard Wish]",
                "[4:Chronicled Wish]",
            ]
        );
    }

    #[test]
    fn tab_spans_highlight_active() {
        let pools = PoolDataStore::initialize();
        let spans = tab_spans(CategoryCode::Permanent, &pools);
        // 0=[1:..], 1=" ", 2=[2:..], 3=" ", 4=[3:Standard Wish]
        assert!(spans[4].style.add_modifier.contains(Modifier::BOLD));
        assert!(!spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn tab_label_prefers_backend_name() {
        let mut pools = PoolDataStore::initialize();
        let mut data = PoolCollection::new();
        data.insert("500".into(), Pool::empty("Chronicled Wish: Mondstadt"));
        data.insert("200".into(), Pool::empty(""));
        pools.replace_all(&data);

        assert_eq!(
            tab_label(CategoryCode::Chronicled, &pools),
            "Chronicled Wish: Mondstadt"
        );
        assert_eq!(tab_label(CategoryCode::Permanent, &pools), "Standard Wish");
    }

    #[test]
    fn help_text_depends_on_mode() {
        assert!(help_text(InputMode::Normal).contains("q:Quit"));
        assert!(help_text(InputMode::EditingUrl).contains("Esc:Cancel"));
    }

    #[test]
    fn render_does_not_panic_with_defaults() {
        let backend = ratatui::backend::TestBackend::new(80, 2);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, Rect { height: 1, ..area }, &state);
                render_help(frame, Rect { y: 1, height: 1, ..area }, &state);
            })
            .unwrap();
    }
}
