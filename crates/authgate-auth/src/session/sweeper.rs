//! Periodic removal of expired sessions.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time;

use authgate_core::config::SessionConfig;

use super::store::SessionStore;

/// Background task that purges expired sessions on a fixed interval.
///
/// Lazy expiry on lookup stays in force; the sweeper only reclaims records
/// for tokens that are never presented again.
#[derive(Debug, Clone)]
pub struct SessionSweeper {
    store: Arc<SessionStore>,
    interval: Duration,
}

impl SessionSweeper {
    /// Create a sweeper running every `interval`.
    pub fn new(store: Arc<SessionStore>, interval: Duration) -> Self {
        Self { store, interval }
    }

    /// Create a sweeper from configuration, or `None` when
    /// `cleanup_interval_seconds` is zero.
    pub fn from_config(store: Arc<SessionStore>, config: &SessionConfig) -> Option<Self> {
        match config.cleanup_interval_seconds {
            0 => None,
            secs => Some(Self::new(store, Duration::from_secs(secs))),
        }
    }

    /// Run one sweep, returning the number of sessions removed.
    pub fn sweep(&self) -> usize {
        let purged = self.store.purge_expired();
        if purged > 0 {
            tracing::info!(
                purged = purged,
                remaining = self.store.len(),
                "Expired sessions purged"
            );
        } else {
            tracing::trace!("No expired sessions to purge");
        }
        purged
    }

    /// Sweep on every tick until the cancel signal flips to `true`.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        tracing::info!(
            "Session sweeper started, interval={}s",
            self.interval.as_secs()
        );

        let mut interval = time::interval(self.interval);
        interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.sweep();
                }
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        tracing::info!("Session sweeper shutting down");
                        break;
                    }
                }
            }
        }
    }

    /// Spawn [`run`](Self::run) onto the current runtime.
    pub fn spawn(self, cancel: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(cancel).await })
    }
}
