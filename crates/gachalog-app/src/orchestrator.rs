// Analysis orchestration: one URL in, one store replacement (or one error
// toast) out, with progress polling and the loading overlay bracketing the
// request.
//
// Sequence for `analyze(url)`:
// 1. Reject an empty (after trim) URL with a warning, no network activity
// 2. Acquire a `RunScope`: in-flight state, loading overlay, poller
// 3. POST {url, task_id} and wait for the single response
// 4. Success: replace the store wholesale, forward it, success toast
// 5. Rejection: backend error text (or a default) as an error toast
// 6. Transport failure: generic network error toast, details to the log
// 7. `RunScope` drops: poller stopped, overlay closed, state idle

use std::sync::Arc;
use std::time::Duration;

use gachalog_core::identity::TaskId;
use gachalog_core::notify::Notification;
use gachalog_core::protocol::{AnalysisRequest, AnalysisResponse, PoolCollection, ProgressStatus};
use gachalog_core::store::PoolDataStore;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::backend::{BackendError, GachaBackend};
use crate::loading::LoadingIndicator;
use crate::poller::ProgressPoller;
use crate::protocol::UiUpdate;

// ---------------------------------------------------------------------------
// User-facing messages
// ---------------------------------------------------------------------------

pub const MSG_EMPTY_URL: &str = "Please enter a gacha log URL";
pub const MSG_SUCCESS: &str = "Analysis complete";
pub const MSG_DEFAULT_FAILURE: &str = "Analysis failed, please check that the link is correct";
pub const MSG_NETWORK_ERROR: &str = "Network error, please try again later";
pub const MSG_ALREADY_RUNNING: &str = "An analysis is already running";

// ---------------------------------------------------------------------------
// Supporting types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    InFlight,
}

/// Read-only handles the renderer uses to draw the loading overlay.
#[derive(Debug, Clone)]
pub struct ProgressView {
    pub loading: watch::Receiver<bool>,
    pub status: watch::Receiver<Option<ProgressStatus>>,
}

impl ProgressView {
    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// Overlay text: the latest progress, or a generic label.
    pub fn label(&self) -> String {
        self.status
            .borrow()
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "Loading...".to_string())
    }
}

/// How one analysis request ended.
#[derive(Debug, PartialEq)]
enum Outcome {
    Accepted(PoolCollection),
    Rejected(String),
    TransportFailed,
}

fn classify(result: Result<AnalysisResponse, BackendError>) -> Outcome {
    match result {
        Ok(response) => match response.into_result() {
            Ok(data) => Outcome::Accepted(data),
            Err(message) => {
                Outcome::Rejected(message.unwrap_or_else(|| MSG_DEFAULT_FAILURE.to_string()))
            }
        },
        Err(e) => {
            warn!("Analysis request failed: {}", e);
            Outcome::TransportFailed
        }
    }
}

// ---------------------------------------------------------------------------
// RunScope
// ---------------------------------------------------------------------------

/// Resources held for the duration of one analysis request. Released on drop,
/// which covers normal return, panics, and cancellation of the future.
struct RunScope<'a> {
    request_state: &'a mut RequestState,
    loading: &'a LoadingIndicator,
    poller: &'a mut ProgressPoller,
}

impl<'a> RunScope<'a> {
    fn acquire(
        request_state: &'a mut RequestState,
        loading: &'a LoadingIndicator,
        poller: &'a mut ProgressPoller,
        task_id: &TaskId,
    ) -> Self {
        *request_state = RequestState::InFlight;
        loading.open();
        poller.start(task_id.clone());
        RunScope {
            request_state,
            loading,
            poller,
        }
    }
}

impl Drop for RunScope<'_> {
    fn drop(&mut self) {
        self.poller.stop();
        self.loading.close();
        *self.request_state = RequestState::Idle;
        debug!("analysis run released");
    }
}

// ---------------------------------------------------------------------------
// AnalysisOrchestrator
// ---------------------------------------------------------------------------

pub struct AnalysisOrchestrator {
    backend: Arc<dyn GachaBackend>,
    task_id: TaskId,
    store: PoolDataStore,
    poller: ProgressPoller,
    loading: LoadingIndicator,
    request_state: RequestState,
    ui_tx: mpsc::Sender<UiUpdate>,
}

impl AnalysisOrchestrator {
    /// `task_id` is the session identity; every analysis and every progress
    /// query of this orchestrator carries it.
    pub fn new(
        backend: Arc<dyn GachaBackend>,
        task_id: TaskId,
        poll_interval: Duration,
        ui_tx: mpsc::Sender<UiUpdate>,
    ) -> Self {
        let poller = ProgressPoller::new(Arc::clone(&backend), poll_interval);
        AnalysisOrchestrator {
            backend,
            task_id,
            store: PoolDataStore::initialize(),
            poller,
            loading: LoadingIndicator::new(),
            request_state: RequestState::Idle,
            ui_tx,
        }
    }

    pub fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    pub fn store(&self) -> &PoolDataStore {
        &self.store
    }

    pub fn request_state(&self) -> RequestState {
        self.request_state
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_running()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_open()
    }

    pub fn progress_view(&self) -> ProgressView {
        ProgressView {
            loading: self.loading.subscribe(),
            status: self.poller.subscribe(),
        }
    }

    /// Run one analysis. Every outcome is reported through the UI channel.
    pub async fn analyze(&mut self, url: &str) {
        let url = url.trim();
        if url.is_empty() {
            info!("Analysis not started: empty URL");
            emit(&self.ui_tx, UiUpdate::Notify(Notification::warning(MSG_EMPTY_URL))).await;
            return;
        }

        let request = AnalysisRequest {
            url: url.to_string(),
            task_id: self.task_id.clone(),
        };
        info!("Starting analysis for task {}", self.task_id);

        let scope = RunScope::acquire(
            &mut self.request_state,
            &self.loading,
            &mut self.poller,
            &self.task_id,
        );

        let result = self.backend.submit_analysis(&request).await;

        match classify(result) {
            Outcome::Accepted(data) => {
                self.store.replace_all(&data);
                info!("Analysis complete: {} categories received", data.len());
                emit(
                    &self.ui_tx,
                    UiUpdate::PoolsReplaced(Box::new(self.store.to_collection())),
                )
                .await;
                emit(&self.ui_tx, UiUpdate::Notify(Notification::success(MSG_SUCCESS))).await;
            }
            Outcome::Rejected(message) => {
                warn!("Analysis rejected by backend: {}", message);
                emit(&self.ui_tx, UiUpdate::Notify(Notification::error(message))).await;
            }
            Outcome::TransportFailed => {
                emit(
                    &self.ui_tx,
                    UiUpdate::Notify(Notification::error(MSG_NETWORK_ERROR)),
                )
                .await;
            }
        }

        drop(scope);
    }
}

async fn emit(ui_tx: &mpsc::Sender<UiUpdate>, update: UiUpdate) {
    if ui_tx.send(update).await.is_err() {
        debug!("UI channel closed, dropping update");
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
