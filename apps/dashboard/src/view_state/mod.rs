//! View-state containers ("hooks").
//!
//! A `ViewStore` holds the `{is_loading, error, data}` triple for one panel
//! and publishes every change on a `tokio::sync::watch` channel. Per-domain
//! hooks in `hooks` wrap one agent client each; `poller` mounts a hook so its
//! default action runs on mount and on a fixed interval.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;

use crate::http_client::ApiError;

pub mod hooks;
pub mod poller;

pub use poller::{MountHandle, Refresh};

pub type SuccessCallback<T> = Arc<dyn Fn(&T) + Send + Sync>;
pub type ErrorCallback = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState<T> {
    pub is_loading: bool,
    pub error: Option<String>,
    pub data: Option<T>,
}

impl<T> ViewState<T> {
    fn initial(data: Option<T>) -> Self {
        Self {
            is_loading: false,
            error: None,
            data,
        }
    }
}

/// Mount-time behavior and callbacks of a hook.
pub struct HookOptions<T> {
    /// Run the default action as soon as the hook is mounted.
    pub auto_fetch: bool,
    /// Re-run the default action on this period while mounted.
    pub refresh_interval: Option<Duration>,
    pub on_success: Option<SuccessCallback<T>>,
    pub on_error: Option<ErrorCallback>,
}

impl<T> Default for HookOptions<T> {
    fn default() -> Self {
        Self {
            auto_fetch: false,
            refresh_interval: None,
            on_success: None,
            on_error: None,
        }
    }
}

impl<T> Clone for HookOptions<T> {
    fn clone(&self) -> Self {
        Self {
            auto_fetch: self.auto_fetch,
            refresh_interval: self.refresh_interval,
            on_success: self.on_success.clone(),
            on_error: self.on_error.clone(),
        }
    }
}

impl<T> HookOptions<T> {
    pub fn polling(every: Duration) -> Self {
        Self {
            auto_fetch: true,
            refresh_interval: Some(every),
            ..Self::default()
        }
    }

    pub fn on_success(mut self, callback: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Arc::new(callback));
        self
    }

    pub fn on_error(mut self, callback: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(callback));
        self
    }
}

/// Loading/error/data state for one panel.
pub struct ViewStore<T> {
    state: watch::Sender<ViewState<T>>,
    initial: Option<T>,
    on_success: Option<SuccessCallback<T>>,
    on_error: Option<ErrorCallback>,
}

impl<T: Clone + Send + Sync + 'static> ViewStore<T> {
    pub fn new(initial: Option<T>) -> Self {
        let (state, _) = watch::channel(ViewState::initial(initial.clone()));
        Self {
            state,
            initial,
            on_success: None,
            on_error: None,
        }
    }

    pub fn with_callbacks(mut self, options: &HookOptions<T>) -> Self {
        self.on_success = options.on_success.clone();
        self.on_error = options.on_error.clone();
        self
    }

    pub fn snapshot(&self) -> ViewState<T> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<T>> {
        self.state.subscribe()
    }

    /// Runs one action against this store.
    ///
    /// `is_loading` is set for exactly the duration of `call`. Success
    /// replaces `data` and clears `error`; failure records a readable `error`
    /// and leaves `data` as it was. The outcome is also returned so callers
    /// can react on their own. `fallback` is the message used when the error
    /// has no text of its own.
    pub async fn run<Fut>(&self, fallback: &str, call: Fut) -> Result<T, ApiError>
    where
        Fut: Future<Output = Result<T, ApiError>>,
    {
        self.state.send_modify(|s| s.is_loading = true);
        let guard = LoadingGuard {
            state: &self.state,
            armed: true,
        };
        let outcome = call.await;
        guard.disarm();

        match outcome {
            Ok(data) => {
                let stored = data.clone();
                self.state.send_modify(move |s| {
                    s.data = Some(stored);
                    s.error = None;
                    s.is_loading = false;
                });
                if let Some(callback) = &self.on_success {
                    callback(&data);
                }
                Ok(data)
            }
            Err(err) => {
                let mut message = err.user_message();
                if message.trim().is_empty() {
                    message = fallback.to_string();
                }
                let stored = message.clone();
                self.state.send_modify(move |s| {
                    s.error = Some(stored);
                    s.is_loading = false;
                });
                if let Some(callback) = &self.on_error {
                    callback(&message);
                }
                Err(err)
            }
        }
    }

    #[allow(dead_code)]
    pub fn reset(&self) {
        self.state
            .send_replace(ViewState::initial(self.initial.clone()));
    }
}

/// Clears `is_loading` if an action is dropped before it settles.
struct LoadingGuard<'a, T> {
    state: &'a watch::Sender<ViewState<T>>,
    armed: bool,
}

impl<T> LoadingGuard<'_, T> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<T> Drop for LoadingGuard<'_, T> {
    fn drop(&mut self) {
        if self.armed {
            self.state.send_modify(|s| s.is_loading = false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_loading_spans_the_call() {
        let store = Arc::new(ViewStore::<u32>::new(None));
        let (release, gate) = oneshot::channel::<()>();

        let running = {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store
                    .run("failed", async move {
                        gate.await.ok();
                        Ok(7)
                    })
                    .await
            })
        };

        let mut rx = store.subscribe();
        rx.wait_for(|s| s.is_loading).await.unwrap();
        assert!(store.snapshot().is_loading);

        release.send(()).unwrap();
        assert_eq!(running.await.unwrap().unwrap(), 7);

        let state = store.snapshot();
        assert!(!state.is_loading);
        assert_eq!(state.data, Some(7));
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_data() {
        let store = ViewStore::<u32>::new(None);
        store.run("failed", async { Ok(1) }).await.unwrap();

        let err = store
            .run("failed", async {
                Err(ApiError::Status {
                    status: 404,
                    message: "no such workflow".into(),
                })
            })
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));

        let state = store.snapshot();
        assert!(!state.is_loading);
        assert_eq!(state.data, Some(1));
        let message = state.error.unwrap();
        assert!(!message.is_empty());
        assert!(message.contains("no such workflow"));
    }

    #[tokio::test]
    async fn test_success_clears_previous_error() {
        let store = ViewStore::<u32>::new(None);
        let _ = store
            .run("failed", async { Err(ApiError::Validation("x".into())) })
            .await;
        assert!(store.snapshot().error.is_some());

        store.run("failed", async { Ok(2) }).await.unwrap();
        assert_eq!(store.snapshot().error, None);
    }

    #[tokio::test]
    async fn test_callbacks_fire() {
        let seen = Arc::new(Mutex::new(Vec::<String>::new()));
        let options = {
            let ok = Arc::clone(&seen);
            let bad = Arc::clone(&seen);
            HookOptions::<u32>::default()
                .on_success(move |v| ok.lock().unwrap().push(format!("ok:{v}")))
                .on_error(move |e| bad.lock().unwrap().push(format!("err:{e}")))
        };
        let store = ViewStore::new(None).with_callbacks(&options);

        store.run("failed", async { Ok(3) }).await.unwrap();
        let _ = store
            .run("failed", async {
                Err(ApiError::Rejected {
                    message: "slot taken".into(),
                })
            })
            .await;

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0], "ok:3");
        assert_eq!(seen[1], "err:Request rejected: slot taken");
    }

    #[tokio::test]
    async fn test_dropped_action_clears_loading() {
        let store = ViewStore::<u32>::new(Some(9));
        {
            let pending = store.run("failed", std::future::pending());
            tokio::pin!(pending);
            let _ = tokio::time::timeout(Duration::from_millis(10), &mut pending).await;
            assert!(store.snapshot().is_loading);
        }
        let state = store.snapshot();
        assert!(!state.is_loading);
        assert_eq!(state.data, Some(9));
    }

    #[tokio::test]
    async fn test_reset_restores_initial() {
        let store = ViewStore::<u32>::new(Some(0));
        store.run("failed", async { Ok(5) }).await.unwrap();
        store.reset();
        assert_eq!(store.snapshot(), ViewState::initial(Some(0)));
    }
}
