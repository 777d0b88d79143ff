// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot observable stream fed by a hand-off channel.
//!
//! A [`RippleStream`] owns the reader side of a [`handoff`](ripple_core::handoff)
//! channel and a [`SubscriberRegistry`]. Activating it with
//! [`connect`](Observable::connect) spawns one delivery task that:
//!
//! 1. takes items from the channel in arrival order and hands each value to every
//!    current subscriber, one after the other, in subscription order;
//! 2. on end of channel, calls `on_completed` on every subscriber;
//! 3. on any failure (an `Error` item, an observer returning `Err`, an observer
//!    panicking) calls `on_error` on every subscriber instead.
//!
//! The terminal signal ends every subscription. A stream is activated at most once.
//!
//! ## Example
//!
//! ```
//! use ripple_core::{FnObserver, Observable};
//! use ripple_stream::{Outcome, RippleStream};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let (tx, stream) = RippleStream::<i32>::channel();
//! stream.subscribe(FnObserver::from_next(|v: i32| println!("Value {v}")).into_ref());
//!
//! let activation = stream.connect().unwrap();
//! tx.send_value(10).await.unwrap();
//! tx.close();
//!
//! assert!(matches!(activation.join().await.unwrap(), Outcome::Completed));
//! # }
//! ```

use core::future::Future;
use core::panic::AssertUnwindSafe;
use futures::FutureExt;
use parking_lot::Mutex;
use ripple_core::handoff::{self, HandoffReceiver, HandoffSender};
use ripple_core::{
    Observable, ObserverRef, Outcome, Result, RippleError, StreamItem, SubscriberRegistry,
};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Handle to the delivery task of a connected stream.
///
/// Dropping the handle detaches the task; it keeps running until its source ends.
#[derive(Debug)]
pub struct Activation {
    handle: JoinHandle<Outcome>,
}

impl Activation {
    /// Waits for the delivery task to deliver its terminal signal.
    ///
    /// # Errors
    /// Returns an error if the task was aborted by the runtime before finishing.
    pub async fn join(self) -> Result<Outcome> {
        self.handle
            .await
            .map_err(|e| RippleError::stream_error(format!("delivery task aborted: {e}")))
    }

    /// Returns `true` once the terminal signal has been delivered.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Lets the delivery task run on its own.
    pub fn detach(self) {}
}

struct Shared<T> {
    source: Mutex<Option<HandoffReceiver<T>>>,
    registry: SubscriberRegistry<T>,
    outcome: Mutex<Option<Outcome>>,
}

/// A hot observable draining one hand-off channel.
///
/// Cheap to clone; all clones share the same source and subscribers.
///
/// See the [module documentation](self) for the delivery contract.
pub struct RippleStream<T> {
    shared: Arc<Shared<T>>,
}

impl<T: Clone + Send + Sync + 'static> RippleStream<T> {
    /// Wraps the reader side of a producer-owned hand-off channel.
    #[must_use]
    pub fn from_receiver(source: HandoffReceiver<T>) -> Self {
        Self {
            shared: Arc::new(Shared {
                source: Mutex::new(Some(source)),
                registry: SubscriberRegistry::new(),
                outcome: Mutex::new(None),
            }),
        }
    }

    /// Creates a stream together with the writer feeding it.
    #[must_use]
    pub fn channel() -> (HandoffSender<T>, Self) {
        let (tx, rx) = handoff::channel();
        (tx, Self::from_receiver(rx))
    }

    /// Returns the number of current subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.shared.registry.len()
    }

    /// Returns `true` once [`connect`](Observable::connect) has been called.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.shared.source.lock().is_none()
    }
}

impl<T> Clone for RippleStream<T> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Observable<T> for RippleStream<T> {
    type Activation = Activation;

    fn subscribe(&self, observer: ObserverRef<T>) {
        self.shared.registry.add(observer);
    }

    fn unsubscribe(&self, observer: &ObserverRef<T>) -> bool {
        self.shared.registry.remove(observer)
    }

    fn connect(&self) -> Result<Activation> {
        let source = self
            .shared
            .source
            .lock()
            .take()
            .ok_or(RippleError::AlreadyConnected)?;

        let handle = tokio::spawn(deliver(source, self.shared.clone()));
        Ok(Activation { handle })
    }

    fn outcome(&self) -> Option<Outcome> {
        self.shared.outcome.lock().clone()
    }
}

async fn deliver<T>(source: HandoffReceiver<T>, shared: Arc<Shared<T>>) -> Outcome
where
    T: Clone + Send + Sync + 'static,
{
    debug!("delivery task started");

    let outcome = match pump(&source, &shared.registry).await {
        Ok(()) => Outcome::Completed,
        Err(error) => Outcome::Failed(error),
    };

    // Recorded before the registry is cleared: a subscriber that misses the
    // terminal fan-out always finds the outcome.
    *shared.outcome.lock() = Some(outcome.clone());

    match &outcome {
        Outcome::Completed => {
            complete(&shared.registry).await;
            debug!("delivery task completed");
        }
        Outcome::Failed(error) => {
            debug!("delivery task failed: {}", error);
            fail(&shared.registry, error).await;
        }
    }
    outcome
}

async fn pump<T>(source: &HandoffReceiver<T>, registry: &SubscriberRegistry<T>) -> Result<()>
where
    T: Clone + Send + Sync + 'static,
{
    while let Some(item) = source.recv().await {
        let value = match item {
            StreamItem::Value(value) => value,
            StreamItem::Error(error) => return Err(error),
        };

        for observer in registry.snapshot() {
            catch_panic(observer.on_next(value.clone())).await?;
        }
    }
    Ok(())
}

async fn complete<T>(registry: &SubscriberRegistry<T>) {
    let observers = registry.clear();
    if observers.is_empty() {
        debug!("completion dropped: no subscribers");
    }

    for observer in observers {
        if let Err(error) = catch_panic(observer.on_completed().map(Ok)).await {
            warn!("on_completed handler failed: {}", error);
        }
    }
}

async fn fail<T>(registry: &SubscriberRegistry<T>, error: &RippleError) {
    let observers = registry.clear();
    if observers.is_empty() {
        debug!("error dropped: no subscribers: {}", error);
    }

    for observer in observers {
        if let Err(handler_error) = catch_panic(observer.on_error(error.clone()).map(Ok)).await {
            warn!("on_error handler failed: {}", handler_error);
        }
    }
}

async fn catch_panic<F>(handler: F) -> Result<()>
where
    F: Future<Output = Result<()>>,
{
    AssertUnwindSafe(handler)
        .catch_unwind()
        .await
        .unwrap_or_else(|payload| Err(RippleError::from_panic_payload(payload)))
}
