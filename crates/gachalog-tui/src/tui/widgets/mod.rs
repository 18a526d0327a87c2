// TUI widget modules for each dashboard panel.

pub mod loading;
pub mod pool_summary;
pub mod pull_list;
pub mod status_bar;
pub mod toast;
pub mod url_input;
