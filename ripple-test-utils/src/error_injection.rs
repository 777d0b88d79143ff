// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Observers that fail on demand, for testing failure propagation through fan-out.

use crate::recording::RecordingObserver;
use async_trait::async_trait;
use ripple_core::{Observer, ObserverRef, Result, RippleError};
use std::sync::Arc;

/// Error returned by [`FailingObserver`].
#[derive(Debug, thiserror::Error)]
#[error("Injected failure: {0}")]
pub struct InjectedError(pub String);

type Trigger<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Observer whose `on_next` returns an error for values matching a predicate.
///
/// Everything received, including the value that triggered the failure, is
/// recorded in an inner [`RecordingObserver`].
pub struct FailingObserver<T> {
    trigger: Trigger<T>,
    recorder: Arc<RecordingObserver<T>>,
}

impl<T: Clone + Send + Sync + 'static> FailingObserver<T> {
    /// Fails on every value for which `trigger` returns `true`.
    pub fn new(trigger: impl Fn(&T) -> bool + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            trigger: Box::new(trigger),
            recorder: RecordingObserver::new(),
        })
    }

    /// The log of everything this observer received.
    #[must_use]
    pub fn recorder(&self) -> &Arc<RecordingObserver<T>> {
        &self.recorder
    }

    /// Returns a handle suitable for `subscribe`.
    #[must_use]
    pub fn observer(self: &Arc<Self>) -> ObserverRef<T> {
        self.clone()
    }
}

#[async_trait]
impl<T: Clone + Send + Sync + 'static> Observer<T> for FailingObserver<T> {
    async fn on_next(&self, value: T) -> Result<()> {
        let fail = (self.trigger)(&value);
        self.recorder.on_next(value).await?;
        if fail {
            return Err(RippleError::user_error(InjectedError(
                "observer rejected value".to_string(),
            )));
        }
        Ok(())
    }

    async fn on_error(&self, error: RippleError) {
        self.recorder.on_error(error).await;
    }

    async fn on_completed(&self) {
        self.recorder.on_completed().await;
    }
}

/// Observer that panics inside `on_next` for values matching a predicate.
pub struct PanickingObserver<T> {
    trigger: Trigger<T>,
    message: String,
    recorder: Arc<RecordingObserver<T>>,
}

impl<T: Clone + Send + Sync + 'static> PanickingObserver<T> {
    /// Panics with `message` on every value for which `trigger` returns `true`.
    pub fn new(
        message: impl Into<String>,
        trigger: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            trigger: Box::new(trigger),
            message: message.into(),
            recorder: RecordingObserver::new(),
        })
    }

    /// The log of everything this observer received before and after panicking.
    #[must_use]
    pub fn recorder(&self) -> &Arc<RecordingObserver<T>> {
        &self.recorder
    }

    /// Returns a handle suitable for `subscribe`.
    #[must_use]
    pub fn observer(self: &Arc<Self>) -> ObserverRef<T> {
        self.clone()
    }
}

#[async_trait]
impl<T: Clone + Send + Sync + 'static> Observer<T> for PanickingObserver<T> {
    async fn on_next(&self, value: T) -> Result<()> {
        if (self.trigger)(&value) {
            panic!("{}", self.message);
        }
        self.recorder.on_next(value).await
    }

    async fn on_error(&self, error: RippleError) {
        self.recorder.on_error(error).await;
    }

    async fn on_completed(&self) {
        self.recorder.on_completed().await;
    }
}
