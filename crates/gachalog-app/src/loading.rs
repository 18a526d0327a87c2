// Blocking loading overlay shown while an analysis is in flight.

use tokio::sync::watch;
use tracing::debug;

/// Visibility of the loading overlay, published over a watch channel so the
/// renderer can read it without a round trip through the orchestrator.
pub struct LoadingIndicator {
    visible: watch::Sender<bool>,
}

impl Default for LoadingIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingIndicator {
    pub fn new() -> Self {
        let (visible, _) = watch::channel(false);
        LoadingIndicator { visible }
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.visible.subscribe()
    }

    pub fn is_open(&self) -> bool {
        *self.visible.borrow()
    }

    /// Show the overlay. Returns `false` if it was already showing.
    pub fn open(&self) -> bool {
        let opened = self.visible.send_if_modified(|v| !std::mem::replace(v, true));
        if opened {
            debug!("loading indicator opened");
        }
        opened
    }

    /// Hide the overlay. Returns `false` if it was already hidden.
    pub fn close(&self) -> bool {
        let closed = self.visible.send_if_modified(|v| std::mem::replace(v, false));
        if closed {
            debug!("loading indicator closed");
        }
        closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed() {
        let indicator = LoadingIndicator::new();
        assert!(!indicator.is_open());
        assert!(!*indicator.subscribe().borrow());
    }

    #[test]
    fn open_then_close() {
        let indicator = LoadingIndicator::new();
        let rx = indicator.subscribe();

        assert!(indicator.open());
        assert!(indicator.is_open());
        assert!(*rx.borrow());

        assert!(indicator.close());
        assert!(!indicator.is_open());
        assert!(!*rx.borrow());
    }

    #[test]
    fn double_close_is_noop() {
        let indicator = LoadingIndicator::new();
        assert!(!indicator.close());
        indicator.open();
        assert!(indicator.close());
        assert!(!indicator.close());
    }

    #[test]
    fn double_open_reports_already_open() {
        let indicator = LoadingIndicator::new();
        assert!(indicator.open());
        assert!(!indicator.open());
        assert!(indicator.is_open());
    }

    #[tokio::test]
    async fn subscribers_are_woken_on_change() {
        let indicator = LoadingIndicator::new();
        let mut rx = indicator.subscribe();
        indicator.open();
        rx.changed().await.unwrap();
        assert!(*rx.borrow_and_update());
    }
}
