// Terminal front end for gachalog: the command loop that owns the
// orchestrator, and the ratatui dashboard.

pub mod app;
pub mod tui;
