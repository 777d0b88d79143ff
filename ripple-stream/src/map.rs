// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Map operator: republishes transformed values of one observable on a new stream.
//!
//! The operator subscribes an adapter observer to the upstream observable and
//! activates the upstream immediately. The adapter writes each transformed value
//! into the hand-off channel of the returned stream, so the upstream waits on
//! every value until the returned stream has been activated and takes it.
//!
//! - upstream completion closes the downstream channel, the downstream completes;
//! - upstream failure is forwarded, the downstream fails with the same error;
//! - a failing transformation aborts the upstream activation, which in turn fails
//!   the downstream. No value after the failing one is forwarded;
//! - mapping an upstream whose activation has already ended replays its terminal
//!   signal: the downstream completes, or fails with the recorded error.

use async_trait::async_trait;
use core::convert::Infallible;
use core::marker::PhantomData;
use core::sync::atomic::{AtomicBool, Ordering};
use ripple_core::{HandoffSender, Observable, Observer, ObserverRef, Outcome, Result, RippleError};
use std::sync::Arc;

use crate::RippleStream;

/// Extension trait providing the map operators on every [`Observable`].
///
/// ```
/// use ripple_core::Observable;
/// use ripple_stream::{MapExt, RippleStream};
/// use ripple_test_utils::{emit_items, RecordingObserver, DEFAULT_WAIT};
///
/// # #[tokio::main]
/// # async fn main() {
/// let (tx, source) = RippleStream::channel();
/// emit_items(tx, vec![1, 2]);
///
/// let doubled = source.map(|v: i32| v * 2);
/// let recorder = RecordingObserver::new();
/// doubled.subscribe(recorder.observer());
/// doubled.connect().unwrap();
///
/// assert!(recorder.wait_for_terminal(DEFAULT_WAIT).await);
/// assert_eq!(recorder.values(), vec![2, 4]);
/// # }
/// ```
pub trait MapExt<T>: Observable<T> {
    /// See [`map`](fn@map).
    fn map<U, F>(&self, f: F) -> RippleStream<U>
    where
        T: Send + 'static,
        U: Clone + Send + Sync + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        map(self, f)
    }

    /// See [`try_map`].
    fn try_map<U, E, F>(&self, f: F) -> RippleStream<U>
    where
        T: Send + 'static,
        U: Clone + Send + Sync + 'static,
        E: std::error::Error + Send + Sync + 'static,
        F: Fn(T) -> core::result::Result<U, E> + Send + Sync + 'static,
    {
        try_map(self, f)
    }
}

impl<T, O> MapExt<T> for O where O: Observable<T> + ?Sized {}

/// Maps every value of `source` with `f`.
///
/// The upstream is activated by this call; if it was already active the adapter is
/// still subscribed and only sees the values delivered from now on.
///
/// # Panics
/// Panics if called outside of a Tokio runtime.
///
/// # Examples
///
/// ```
/// use ripple_core::Observable;
/// use ripple_stream::{map, RippleStream};
/// use ripple_test_utils::{emit_items, RecordingObserver, DEFAULT_WAIT};
///
/// # #[tokio::main]
/// # async fn main() {
/// let (tx, source) = RippleStream::channel();
/// emit_items(tx, vec![10, 20, 30]);
///
/// let mapped = map(&source, |v: i32| v + 1000);
/// let recorder = RecordingObserver::new();
/// mapped.subscribe(recorder.observer());
/// mapped.connect().unwrap();
///
/// assert!(recorder.wait_for_terminal(DEFAULT_WAIT).await);
/// assert_eq!(recorder.values(), vec![1010, 1020, 1030]);
/// # }
/// ```
pub fn map<S, T, U, F>(source: &S, f: F) -> RippleStream<U>
where
    S: Observable<T> + ?Sized,
    T: Send + 'static,
    U: Clone + Send + Sync + 'static,
    F: Fn(T) -> U + Send + Sync + 'static,
{
    try_map(source, move |value: T| Ok::<U, Infallible>(f(value)))
}

/// Maps every value of `source` with a transformation that can fail.
///
/// The first `Err` returned by `f` aborts the upstream activation: every upstream
/// subscriber receives `on_error` with the error wrapped as
/// [`RippleError::UserError`], and the returned stream fails with it too.
///
/// If the upstream activation has already ended, the returned stream ends the same
/// way once activated.
///
/// # Panics
/// Panics if called outside of a Tokio runtime.
pub fn try_map<S, T, U, E, F>(source: &S, f: F) -> RippleStream<U>
where
    S: Observable<T> + ?Sized,
    T: Send + 'static,
    U: Clone + Send + Sync + 'static,
    E: std::error::Error + Send + Sync + 'static,
    F: Fn(T) -> core::result::Result<U, E> + Send + Sync + 'static,
{
    let (downstream, stream) = RippleStream::channel();
    let adapter = Arc::new(MapObserver {
        transform: f,
        downstream,
        finished: AtomicBool::new(false),
        _error: PhantomData,
    });
    let handle: ObserverRef<T> = adapter.clone();

    // Subscribe before activating so the first upstream value is not missed.
    source.subscribe(handle.clone());

    if let Err(error) = source.connect() {
        debug!("map: upstream not activated: {}", error);

        if let Some(outcome) = source.outcome() {
            debug!("map: upstream already ended, replaying its outcome");
            source.unsubscribe(&handle);
            tokio::spawn(async move { adapter.finish(outcome).await });
        }
    }

    stream
}

struct MapObserver<F, U, E> {
    transform: F,
    downstream: HandoffSender<U>,
    finished: AtomicBool,
    _error: PhantomData<fn() -> E>,
}

impl<F, U: Send, E> MapObserver<F, U, E> {
    /// Ends the downstream once, whichever path reports the upstream outcome first.
    async fn finish(&self, outcome: Outcome) {
        if self.finished.swap(true, Ordering::AcqRel) {
            return;
        }

        if let Outcome::Failed(error) = outcome {
            if let Err(send_error) = self.downstream.send_error(error).await {
                warn!("map: upstream error not forwarded: {}", send_error);
            }
        }
        self.downstream.close();
    }
}

#[async_trait]
impl<T, U, E, F> Observer<T> for MapObserver<F, U, E>
where
    T: Send + 'static,
    U: Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
    F: Fn(T) -> core::result::Result<U, E> + Send + Sync + 'static,
{
    async fn on_next(&self, value: T) -> Result<()> {
        let mapped = (self.transform)(value).map_err(RippleError::user_error)?;
        self.downstream.send_value(mapped).await.inspect_err(|error| {
            warn!("map: downstream rejected value: {}", error);
        })
    }

    async fn on_error(&self, error: RippleError) {
        self.finish(Outcome::Failed(error)).await;
    }

    async fn on_completed(&self) {
        self.finish(Outcome::Completed).await;
    }
}
