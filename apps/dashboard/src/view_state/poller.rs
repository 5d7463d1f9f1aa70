//! Mounting: run a hook's default action on mount and then on a fixed
//! period, until the returned handle is cancelled or dropped.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// The default action of a mounted hook.
#[async_trait]
pub trait Refresh: Send + Sync + 'static {
    async fn refresh(&self);
}

/// Keeps a mounted hook alive. Dropping it unmounts.
pub struct MountHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl MountHandle {
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Cancels and waits for the polling task to exit.
    pub async fn unmount(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Mounts `target`.
///
/// With `auto_fetch` the default action runs immediately. With a non-zero
/// `refresh_interval` it runs again every period, the first tick one period
/// after mount; ticks missed while an action is still running are skipped.
/// Cancelling aborts an action that is in flight.
pub fn mount<R>(target: Arc<R>, auto_fetch: bool, refresh_interval: Option<Duration>) -> MountHandle
where
    R: Refresh + ?Sized,
{
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    let period = refresh_interval.filter(|p| !p.is_zero());

    let task = tokio::spawn(async move {
        if auto_fetch {
            tokio::select! {
                biased;
                _ = token.cancelled() => return,
                _ = target.refresh() => {}
            }
        }

        let Some(period) = period else {
            return;
        };
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                _ = ticker.tick() => {
                    tokio::select! {
                        biased;
                        _ = token.cancelled() => break,
                        _ = target.refresh() => {}
                    }
                }
            }
        }
        debug!("Unmounted polling hook");
    });

    MountHandle {
        cancel,
        task: Some(task),
    }
}
