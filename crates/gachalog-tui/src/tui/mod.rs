// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that mirrors what the dashboard needs. The
// command loop pushes `UiUpdate` messages over an mpsc channel; loading and
// progress state is read from the orchestrator's watch channels on every
// render tick. The frame is redrawn at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste, Event, EventStream};
use futures_util::StreamExt;
use gachalog_app::config::DisplayConfig;
use gachalog_app::orchestrator::ProgressView;
use gachalog_app::protocol::{UiUpdate, UserCommand};
use gachalog_core::category::CategoryCode;
use gachalog_core::notify::Notification;
use gachalog_core::store::PoolDataStore;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use layout::build_layout;

/// How long a toast stays on screen.
pub const TOAST_TTL: Duration = Duration::from_secs(4);

/// Toasts beyond this count push out the oldest.
pub const MAX_TOASTS: usize = 5;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    /// Keystrokes go to the URL buffer.
    EditingUrl,
}

/// Which pull list receives scroll keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PullList {
    #[default]
    FiveStar,
    FourStar,
}

impl PullList {
    pub fn toggle(self) -> Self {
        match self {
            PullList::FiveStar => PullList::FourStar,
            PullList::FourStar => PullList::FiveStar,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub notification: Notification,
    pub shown_at: Instant,
}

/// TUI-local state that mirrors the application state for rendering.
pub struct ViewState {
    /// Session task id, shown in the status bar.
    pub task_id: String,
    /// Copy of the orchestrator's store, replaced on every successful run.
    pub pools: PoolDataStore,
    pub active_tab: CategoryCode,
    pub input_mode: InputMode,
    pub url_input: String,
    /// List that scroll keys move.
    pub focused_list: PullList,
    /// Scroll offset per tab and list.
    pub scroll_offset: HashMap<(CategoryCode, PullList), usize>,
    /// Rows visible inside a pull list, as of the last render. Zero before
    /// the first frame.
    pub list_rows: usize,
    /// Oldest first.
    pub toasts: VecDeque<Toast>,
    /// Whether an analysis is in flight (loading overlay visible).
    pub loading: bool,
    /// Overlay text while loading.
    pub progress_label: String,
    pub thousands_separator: String,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            task_id: String::new(),
            pools: PoolDataStore::initialize(),
            active_tab: CategoryCode::CharacterEvent,
            input_mode: InputMode::Normal,
            url_input: String::new(),
            focused_list: PullList::FiveStar,
            scroll_offset: HashMap::new(),
            list_rows: 0,
            toasts: VecDeque::new(),
            loading: false,
            progress_label: String::new(),
            thousands_separator: ",".to_string(),
        }
    }
}

impl ViewState {
    pub fn new(task_id: impl Into<String>, display: &DisplayConfig) -> Self {
        ViewState {
            task_id: task_id.into(),
            active_tab: display.default_category(),
            thousands_separator: display.thousands_separator.clone(),
            ..ViewState::default()
        }
    }

    pub fn scroll(&self, list: PullList) -> usize {
        self.scroll_offset
            .get(&(self.active_tab, list))
            .copied()
            .unwrap_or(0)
    }

    /// Records in `list` for the active tab.
    pub fn list_len(&self, list: PullList) -> usize {
        let pool = self.pools.get(self.active_tab);
        match list {
            PullList::FiveStar => pool.pulls.len(),
            PullList::FourStar => pool.four_star_pulls.len(),
        }
    }

    /// Largest offset that still fills the visible rows.
    pub fn max_scroll(&self, list: PullList) -> usize {
        max_offset(self.list_len(list), self.list_rows)
    }

    pub fn push_toast(&mut self, notification: Notification, now: Instant) {
        self.toasts.push_back(Toast {
            notification,
            shown_at: now,
        });
        while self.toasts.len() > MAX_TOASTS {
            self.toasts.pop_front();
        }
    }

    /// Drop toasts older than `TOAST_TTL`.
    pub fn expire_toasts(&mut self, now: Instant) {
        self.toasts
            .retain(|t| now.saturating_duration_since(t.shown_at) < TOAST_TTL);
    }

    /// Pull loading state from the orchestrator's watch channels.
    pub fn sync_progress(&mut self, progress: &ProgressView) {
        self.loading = progress.is_loading();
        self.progress_label = if self.loading {
            progress.label()
        } else {
            String::new()
        };
    }
}

/// Shared by input clamping and list rendering so both agree on the last row.
pub fn max_offset(total: usize, visible_rows: usize) -> usize {
    total.saturating_sub(visible_rows.max(1))
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
fn apply_ui_update(state: &mut ViewState, update: UiUpdate, now: Instant) {
    match update {
        UiUpdate::Notify(notification) => {
            state.push_toast(notification, now);
        }
        UiUpdate::PoolsReplaced(pools) => {
            state.pools.replace_all(&pools);
            state.scroll_offset.clear();
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame. Records the list height so scroll
/// keys clamp against what is on screen.
fn render_frame(frame: &mut Frame, state: &mut ViewState) {
    let layout = build_layout(frame.area());
    // Both lists share a row; subtract 2 for borders.
    state.list_rows = usize::from(layout.five_star.height).saturating_sub(2);
    let state = &*state;

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::url_input::render(frame, layout.url_input, state);
    widgets::pool_summary::render(frame, layout.summary, state);
    widgets::pull_list::render_five_star(frame, layout.five_star, state);
    widgets::pull_list::render_four_star(frame, layout.four_star, state);
    widgets::status_bar::render_help(frame, layout.help_bar, state);

    if state.loading {
        widgets::loading::render(frame, frame.area(), &state.progress_label);
    }
    widgets::toast::render(frame, frame.area(), &state.toasts);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal and enables bracketed paste.
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    progress: ProgressView,
    mut view_state: ViewState,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();
    if let Err(e) = crossterm::execute!(std::io::stdout(), EnableBracketedPaste) {
        warn!("Bracketed paste unavailable: {}", e);
    }

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::execute!(std::io::stdout(), DisableBracketedPaste);
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result = loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update, Instant::now()),
                    None => {
                        debug!("UI channel closed");
                        break Ok(());
                    }
                }
            }

            maybe_event = event_stream.next() => {
                let command = match maybe_event {
                    Some(Ok(Event::Key(key_event))) => input::handle_key(key_event, &mut view_state),
                    Some(Ok(Event::Paste(text))) => {
                        input::handle_paste(&text, &mut view_state);
                        None
                    }
                    Some(Ok(_)) => None,
                    Some(Err(e)) => break Err(e.into()),
                    None => break Ok(()),
                };
                match command {
                    Some(UserCommand::Quit) => {
                        let _ = cmd_tx.send(UserCommand::Quit).await;
                        break Ok(());
                    }
                    Some(cmd) => {
                        if cmd_tx.send(cmd).await.is_err() {
                            warn!("Command loop is gone; exiting TUI");
                            break Ok(());
                        }
                    }
                    None => {}
                }
            }

            _ = render_tick.tick() => {
                view_state.sync_progress(&progress);
                view_state.expire_toasts(Instant::now());
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &mut view_state)) {
                    break Err(e.into());
                }
            }
        }
    };

    let _ = crossterm::execute!(std::io::stdout(), DisableBracketedPaste);
    ratatui::restore();

    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
