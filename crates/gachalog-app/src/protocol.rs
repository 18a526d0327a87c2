// Messages between the orchestrator and the presentation layer.

use gachalog_core::notify::Notification;
use gachalog_core::protocol::PoolCollection;

/// Pushed from the orchestrator to the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// Show a toast.
    Notify(Notification),
    /// The store was replaced; mirror it.
    PoolsReplaced(Box<PoolCollection>),
}

/// Sent from the UI to the command loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Analyze the gacha history behind this URL.
    Analyze(String),
    Quit,
}
