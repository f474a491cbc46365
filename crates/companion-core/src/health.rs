//! Backend health monitoring.
//!
//! A cancellable periodic task probes the backend on a fixed interval and
//! publishes a tri-state status. The probe function is injected, so the
//! monitor is testable with a fake transport and short intervals.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Observed backend reachability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    /// No probe has completed yet.
    Unknown,
    /// The last probe got a response.
    Healthy,
    /// The last probe got no response.
    Unreachable,
}

/// Periodic backend reachability monitor.
///
/// The first probe fires immediately on start, then once per interval. The
/// unreachable banner is dismissible; a later `Healthy` observation resets
/// the dismissal so the banner reappears if the backend drops again.
pub struct HealthMonitor {
    status_rx: watch::Receiver<HealthStatus>,
    dismissed: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl HealthMonitor {
    /// Starts probing with the given interval and probe function.
    pub fn start<F, Fut>(interval: Duration, probe: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        let (status_tx, status_rx) = watch::channel(HealthStatus::Unknown);
        let dismissed = Arc::new(AtomicBool::new(false));

        let task_dismissed = Arc::clone(&dismissed);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let next = if probe().await {
                    HealthStatus::Healthy
                } else {
                    HealthStatus::Unreachable
                };

                if next == HealthStatus::Healthy {
                    task_dismissed.store(false, Ordering::SeqCst);
                }

                if *status_tx.borrow() != next {
                    tracing::info!(target: "health", status = ?next, "backend health changed");
                }
                status_tx.send_replace(next);
            }
        });

        Self {
            status_rx,
            dismissed,
            handle: Some(handle),
        }
    }

    /// Returns the most recently observed status.
    pub fn status(&self) -> HealthStatus {
        *self.status_rx.borrow()
    }

    /// Whether the unreachable banner should currently be shown.
    pub fn banner_visible(&self) -> bool {
        self.status() == HealthStatus::Unreachable && !self.dismissed.load(Ordering::SeqCst)
    }

    /// Hides the banner until the next healthy/unreachable cycle.
    pub fn dismiss(&self) {
        self.dismissed.store(true, Ordering::SeqCst);
    }

    /// Returns a receiver that observes status changes.
    pub fn subscribe(&self) -> watch::Receiver<HealthStatus> {
        self.status_rx.clone()
    }

    /// Stops probing. Called automatically on drop.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}
