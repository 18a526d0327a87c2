// Command loop: receives `UserCommand`s from the TUI and drives the
// orchestrator.
//
// Only one analysis runs at a time. While `analyze()` is pending the loop
// keeps draining commands: another `Analyze` gets a warning toast, `Quit`
// (or a closed channel) drops the pending future, which releases the
// poller and the loading overlay through the orchestrator's run scope.

use gachalog_app::orchestrator::{AnalysisOrchestrator, MSG_ALREADY_RUNNING};
use gachalog_app::protocol::{UiUpdate, UserCommand};
use gachalog_core::notify::Notification;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Run the command loop until the user quits or the command channel closes.
pub async fn run(
    mut orchestrator: AnalysisOrchestrator,
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
) -> anyhow::Result<()> {
    info!("Command loop started (task {})", orchestrator.task_id());

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            UserCommand::Quit => {
                info!("Quit requested");
                break;
            }
            UserCommand::Analyze(url) => {
                if !run_analysis(&mut orchestrator, &url, &mut cmd_rx, &ui_tx).await {
                    info!("Quit requested during analysis; abandoning request");
                    break;
                }
            }
        }
    }

    info!("Command loop finished");
    Ok(())
}

/// Drive one analysis to completion while still answering commands.
/// Returns `false` if the loop should exit.
async fn run_analysis(
    orchestrator: &mut AnalysisOrchestrator,
    url: &str,
    cmd_rx: &mut mpsc::Receiver<UserCommand>,
    ui_tx: &mpsc::Sender<UiUpdate>,
) -> bool {
    let analysis = orchestrator.analyze(url);
    tokio::pin!(analysis);

    loop {
        tokio::select! {
            () = &mut analysis => return true,
            cmd = cmd_rx.recv() => match cmd {
                Some(UserCommand::Analyze(_)) => {
                    debug!("Rejecting analysis request: one is already in flight");
                    let warning = UiUpdate::Notify(Notification::warning(MSG_ALREADY_RUNNING));
                    if ui_tx.send(warning).await.is_err() {
                        debug!("UI channel closed, dropping update");
                    }
                }
                Some(UserCommand::Quit) | None => return false,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
