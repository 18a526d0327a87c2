// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the command
// loop, or into local ViewState mutations (tab switching, list focus,
// scrolling, URL editing).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use gachalog_app::protocol::UserCommand;
use gachalog_core::category::DISPLAY_ORDER;

use super::{InputMode, PullList, ViewState};

/// Rows moved by PageUp/PageDown.
const PAGE_SIZE: usize = 10;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// command loop, `None` when it was handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Some platforms emit Release/Repeat as well as Press.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.input_mode == InputMode::EditingUrl {
        return handle_url_input(key_event, view_state);
    }

    match key_event.code {
        KeyCode::Char('u') | KeyCode::Char('/') => {
            view_state.input_mode = InputMode::EditingUrl;
            None
        }

        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            view_state.active_tab = DISPLAY_ORDER[index];
            None
        }
        KeyCode::Right | KeyCode::Tab => {
            view_state.active_tab = view_state.active_tab.next();
            None
        }
        KeyCode::Left | KeyCode::BackTab => {
            view_state.active_tab = view_state.active_tab.prev();
            None
        }

        KeyCode::Char('f') => {
            view_state.focused_list = view_state.focused_list.toggle();
            None
        }

        KeyCode::Up | KeyCode::Char('k') => {
            scroll_up(view_state, 1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            scroll_down(view_state, 1);
            None
        }
        KeyCode::PageUp => {
            scroll_up(view_state, PAGE_SIZE);
            None
        }
        KeyCode::PageDown => {
            scroll_down(view_state, PAGE_SIZE);
            None
        }
        KeyCode::Home => {
            scroll_up(view_state, usize::MAX);
            None
        }
        KeyCode::End => {
            scroll_down(view_state, usize::MAX);
            None
        }

        KeyCode::Char('q') => Some(UserCommand::Quit),

        _ => None,
    }
}

/// Keys while the URL field has focus.
///
/// Enter submits the buffer as-is; validation belongs to the orchestrator.
fn handle_url_input(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.input_mode = InputMode::Normal;
            view_state.url_input.clear();
            None
        }
        KeyCode::Enter => {
            view_state.input_mode = InputMode::Normal;
            Some(UserCommand::Analyze(view_state.url_input.clone()))
        }
        KeyCode::Backspace => {
            view_state.url_input.pop();
            None
        }
        KeyCode::Char(c) => {
            view_state.url_input.push(c);
            None
        }
        _ => None,
    }
}

/// Bracketed paste: append to the URL buffer, newlines stripped. Ignored
/// outside URL editing.
pub fn handle_paste(text: &str, view_state: &mut ViewState) {
    if view_state.input_mode != InputMode::EditingUrl {
        return;
    }
    view_state
        .url_input
        .extend(text.chars().filter(|c| *c != '\n' && *c != '\r'));
}

fn scroll_up(view_state: &mut ViewState, amount: usize) {
    let key = (view_state.active_tab, view_state.focused_list);
    let offset = view_state.scroll_offset.entry(key).or_insert(0);
    *offset = offset.saturating_sub(amount);
}

/// Clamped so the last page of the focused list stays full.
fn scroll_down(view_state: &mut ViewState, amount: usize) {
    let max = view_state.max_scroll(view_state.focused_list);
    let key = (view_state.active_tab, view_state.focused_list);
    let offset = view_state.scroll_offset.entry(key).or_insert(0);
    *offset = offset.saturating_add(amount).min(max);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
