// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | URL Input (3 rows)                                |
// +--------------------------------------------------+
// | Pool Summary (4 rows)                             |
// +-------------------------+------------------------+
// | Five-star pulls (60%)    | Four-star pulls (40%)  |
// +-------------------------+------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+
//
// The loading overlay and the toast stack are drawn over the whole area.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Task id, request state, category tabs.
    pub status_bar: Rect,
    pub url_input: Rect,
    /// Counters for the active category.
    pub summary: Rect,
    pub five_star: Rect,
    pub four_star: Rect,
    /// Keyboard shortcut hints.
    pub help_bar: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Length(3), // url input
            Constraint::Length(4), // summary
            Constraint::Min(6),    // pull lists
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let lists = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(vertical[3]);

    AppLayout {
        status_bar: vertical[0],
        url_input: vertical[1],
        summary: vertical[2],
        five_star: lists[0],
        four_star: lists[1],
        help_bar: vertical[4],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn all_rects(layout: &AppLayout) -> [(&'static str, Rect); 6] {
        [
            ("status_bar", layout.status_bar),
            ("url_input", layout.url_input),
            ("summary", layout.summary),
            ("five_star", layout.five_star),
            ("four_star", layout.four_star),
            ("help_bar", layout.help_bar),
        ]
    }

    #[test]
    fn layout_all_rects_nonzero() {
        let layout = build_layout(Rect::new(0, 0, 120, 40));
        for (name, rect) in all_rects(&layout) {
            assert!(
                rect.width > 0 && rect.height > 0,
                "{} has zero area: {:?}",
                name,
                rect
            );
        }
    }

    #[test]
    fn layout_fixed_heights() {
        let layout = build_layout(Rect::new(0, 0, 120, 40));
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.url_input.height, 3);
        assert_eq!(layout.summary.height, 4);
        assert_eq!(layout.help_bar.height, 1);
    }

    #[test]
    fn layout_five_star_list_is_wider() {
        let layout = build_layout(Rect::new(0, 0, 120, 40));
        assert!(layout.five_star.width > layout.four_star.width);
        assert_eq!(layout.five_star.y, layout.four_star.y);
    }

    #[test]
    fn layout_fits_within_area() {
        let area = Rect::new(0, 0, 120, 40);
        let layout = build_layout(area);
        for (name, rect) in all_rects(&layout) {
            assert!(rect.x + rect.width <= area.width, "{name} exceeds width");
            assert!(rect.y + rect.height <= area.height, "{name} exceeds height");
        }
    }

    #[test]
    fn layout_small_terminal_still_valid() {
        let layout = build_layout(Rect::new(0, 0, 40, 16));
        for (name, rect) in all_rects(&layout) {
            assert!(rect.width > 0 && rect.height > 0, "{name} collapsed");
        }
    }
}
