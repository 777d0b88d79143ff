// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! An observer that records everything it receives.

use async_trait::async_trait;
use parking_lot::Mutex;
use ripple_core::{Observer, ObserverRef, Result, RippleError};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::timeout;

/// One call received by an observer.
#[derive(Debug, Clone)]
pub enum Notification<T> {
    /// `on_next(value)`
    Next(T),
    /// `on_error(error)`
    Error(RippleError),
    /// `on_completed()`
    Completed,
}

impl<T> Notification<T> {
    /// Returns `true` for `Error` and `Completed`.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Error(_) | Self::Completed)
    }
}

/// Terminal sink that keeps a log of every notification, in arrival order.
///
/// Tests await progress with [`wait_for_terminal`](Self::wait_for_terminal) or
/// [`wait_for_values`](Self::wait_for_values) instead of sleeping.
///
/// ```rust
/// use ripple_core::Observer;
/// use ripple_test_utils::RecordingObserver;
///
/// # #[tokio::main]
/// # async fn main() {
/// let recorder = RecordingObserver::<i32>::new();
/// recorder.on_next(7).await.unwrap();
/// recorder.on_completed().await;
///
/// assert_eq!(recorder.values(), vec![7]);
/// assert_eq!(recorder.completed_count(), 1);
/// # }
/// ```
pub struct RecordingObserver<T> {
    log: Mutex<Vec<Notification<T>>>,
    changes: watch::Sender<usize>,
}

impl<T: Clone + Send + Sync + 'static> RecordingObserver<T> {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Arc<Self> {
        let (changes, _) = watch::channel(0);
        Arc::new(Self {
            log: Mutex::new(Vec::new()),
            changes,
        })
    }

    /// Returns a handle suitable for `subscribe` / `unsubscribe`.
    #[must_use]
    pub fn observer(self: &Arc<Self>) -> ObserverRef<T> {
        self.clone()
    }

    fn record(&self, notification: Notification<T>) {
        self.log.lock().push(notification);
        self.changes.send_modify(|count| *count += 1);
    }

    /// Every notification received so far.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification<T>> {
        self.log.lock().clone()
    }

    /// The values received through `on_next`, in order.
    #[must_use]
    pub fn values(&self) -> Vec<T> {
        self.log
            .lock()
            .iter()
            .filter_map(|n| match n {
                Notification::Next(v) => Some(v.clone()),
                _ => None,
            })
            .collect()
    }

    /// The errors received through `on_error`.
    #[must_use]
    pub fn errors(&self) -> Vec<RippleError> {
        self.log
            .lock()
            .iter()
            .filter_map(|n| match n {
                Notification::Error(e) => Some(e.clone()),
                _ => None,
            })
            .collect()
    }

    /// How many times `on_completed` was called.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.log
            .lock()
            .iter()
            .filter(|n| matches!(n, Notification::Completed))
            .count()
    }

    /// How many times `on_error` was called.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.log
            .lock()
            .iter()
            .filter(|n| matches!(n, Notification::Error(_)))
            .count()
    }

    /// Returns `true` once a terminal notification was recorded.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.log.lock().iter().any(Notification::is_terminal)
    }

    /// Waits until `predicate` holds for the log, or `limit` elapses.
    ///
    /// Returns `false` on timeout.
    pub async fn wait_until<P>(&self, limit: Duration, predicate: P) -> bool
    where
        P: Fn(&[Notification<T>]) -> bool,
    {
        let mut changes = self.changes.subscribe();
        timeout(limit, async {
            loop {
                if predicate(&self.log.lock()) {
                    return;
                }
                if changes.changed().await.is_err() {
                    return;
                }
            }
        })
        .await
        .is_ok()
    }

    /// Waits for `on_error` or `on_completed`. Returns `false` on timeout.
    pub async fn wait_for_terminal(&self, limit: Duration) -> bool {
        self.wait_until(limit, |log| log.iter().any(Notification::is_terminal))
            .await
    }

    /// Waits until at least `count` values were received. Returns `false` on timeout.
    pub async fn wait_for_values(&self, count: usize, limit: Duration) -> bool {
        self.wait_until(limit, |log| {
            log.iter()
                .filter(|n| matches!(n, Notification::Next(_)))
                .count()
                >= count
        })
        .await
    }
}

#[async_trait]
impl<T: Clone + Send + Sync + 'static> Observer<T> for RecordingObserver<T> {
    async fn on_next(&self, value: T) -> Result<()> {
        self.record(Notification::Next(value));
        Ok(())
    }

    async fn on_error(&self, error: RippleError) {
        self.record(Notification::Error(error));
    }

    async fn on_completed(&self) {
        self.record(Notification::Completed);
    }
}
