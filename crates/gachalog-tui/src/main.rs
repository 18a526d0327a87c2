// gachalog entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Pick an identity generator and create the session task id
// 4. Build the backend client and the orchestrator
// 5. Create mpsc channels
// 6. Spawn the command loop
// 7. Submit the URL given on the command line, if any
// 8. Run the TUI until the user quits
// 9. Cleanup on exit

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use gachalog_app::backend::{GachaBackend, HttpBackend};
use gachalog_app::config;
use gachalog_app::orchestrator::AnalysisOrchestrator;
use gachalog_app::protocol::UserCommand;
use gachalog_core::identity;
use gachalog_tui::{app, tui};
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    let log_path = init_tracing()?;
    info!("gachalog starting up (log file {})", log_path.display());

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: backend={}, poll interval {}ms",
        config.server.base_url, config.polling.interval_ms
    );

    // 3. Session task id
    let generator = identity::select_generator();
    let task_id = generator.generate();
    info!("Session task id {} ({})", task_id, generator.kind());

    // 4. Backend client and orchestrator
    let backend: Arc<dyn GachaBackend> = Arc::new(HttpBackend::from_config(&config));

    // 5. Channels
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    let orchestrator = AnalysisOrchestrator::new(
        backend,
        task_id.clone(),
        config.polling.interval(),
        ui_tx.clone(),
    );
    let progress = orchestrator.progress_view();
    let view_state = tui::ViewState::new(task_id.to_string(), &config.display);

    // 6. Command loop
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(orchestrator, cmd_rx, ui_tx).await {
            error!("Command loop error: {}", e);
        }
    });

    // 7. URL from the command line
    if let Some(url) = std::env::args().nth(1) {
        info!("Submitting URL from command line");
        cmd_tx
            .send(UserCommand::Analyze(url))
            .await
            .context("command loop exited before startup finished")?;
    }

    // 8. TUI, blocking until the user presses 'q' or Ctrl+C
    info!("Application ready");
    if let Err(e) = tui::run(ui_rx, cmd_tx, progress, view_state).await {
        error!("TUI error: {}", e);
    }

    // 9. Cleanup: wait for the command loop to finish (with timeout)
    if tokio::time::timeout(Duration::from_secs(5), app_handle)
        .await
        .is_err()
    {
        error!("Command loop did not stop within 5s");
    }

    info!("gachalog shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by
/// the TUI). Returns the log file path.
fn init_tracing() -> anyhow::Result<PathBuf> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = match directories::ProjectDirs::from("", "", "gachalog") {
        Some(dirs) => dirs.data_local_dir().join("logs"),
        None => std::env::current_dir()?.join("logs"),
    };
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let log_path = log_dir.join("gachalog.log");
    let log_file = std::fs::File::create(&log_path)
        .with_context(|| format!("failed to create log file {}", log_path.display()))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gachalog=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(log_path)
}
