// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The observer side of a stream: a sink for values and terminal signals.
//!
//! During one activation of a stream an observer sees zero or more `on_next`
//! calls followed by at most one terminal call, either `on_error` or
//! `on_completed`. Calls are never concurrent for the same activation.

use crate::error::{Result, RippleError};
use async_trait::async_trait;
use std::sync::Arc;

/// A sink for the values and terminal signal of a stream activation.
///
/// `on_next` is the only fallible handler. Returning `Err` aborts the activation
/// that is delivering the value: every current subscriber then receives `on_error`.
#[async_trait]
pub trait Observer<T>: Send + Sync {
    /// Receives the next value of the sequence.
    ///
    /// # Errors
    /// An error aborts the activation delivering this value.
    async fn on_next(&self, value: T) -> Result<()>;

    /// Receives the error that terminated the sequence.
    async fn on_error(&self, error: RippleError);

    /// Receives the end of the sequence.
    async fn on_completed(&self);
}

/// Shared handle to an observer, as stored in a subscriber registry.
pub type ObserverRef<T> = Arc<dyn Observer<T>>;

/// Returns `true` if both handles point to the same observer allocation.
///
/// Only the data address is compared; two handles to one observer created through
/// different unsizing coercions still compare equal.
#[must_use]
pub fn same_observer<T>(a: &ObserverRef<T>, b: &ObserverRef<T>) -> bool {
    core::ptr::eq(Arc::as_ptr(a).cast::<()>(), Arc::as_ptr(b).cast::<()>())
}

type NextFn<T> = Box<dyn Fn(T) + Send + Sync>;
type ErrorFn = Box<dyn Fn(RippleError) + Send + Sync>;
type CompletedFn = Box<dyn Fn() + Send + Sync>;

/// An observer assembled from three plain callables.
///
/// Useful for terminal sinks that print, record or forward values synchronously.
///
/// ```
/// use ripple_core::{FnObserver, Observer};
///
/// # #[tokio::main]
/// # async fn main() {
/// let observer = FnObserver::new(
///     |value: i32| println!("Value {value}"),
///     |error| println!("Error {error}"),
///     || println!("Completed"),
/// );
/// observer.on_next(1).await.unwrap();
/// observer.on_completed().await;
/// # }
/// ```
pub struct FnObserver<T> {
    on_next: NextFn<T>,
    on_error: ErrorFn,
    on_completed: CompletedFn,
}

impl<T> FnObserver<T> {
    /// Builds an observer from its three handlers.
    pub fn new<N, E, C>(on_next: N, on_error: E, on_completed: C) -> Self
    where
        N: Fn(T) + Send + Sync + 'static,
        E: Fn(RippleError) + Send + Sync + 'static,
        C: Fn() + Send + Sync + 'static,
    {
        Self {
            on_next: Box::new(on_next),
            on_error: Box::new(on_error),
            on_completed: Box::new(on_completed),
        }
    }

    /// Builds an observer that only cares about values; terminal signals are ignored.
    pub fn from_next<N>(on_next: N) -> Self
    where
        N: Fn(T) + Send + Sync + 'static,
    {
        Self::new(on_next, |_| {}, || {})
    }
}

impl<T: Send + 'static> FnObserver<T> {
    /// Wraps this observer in a shared handle ready for `subscribe`.
    #[must_use]
    pub fn into_ref(self) -> ObserverRef<T> {
        Arc::new(self)
    }
}

#[async_trait]
impl<T: Send + 'static> Observer<T> for FnObserver<T> {
    async fn on_next(&self, value: T) -> Result<()> {
        (self.on_next)(value);
        Ok(())
    }

    async fn on_error(&self, error: RippleError) {
        (self.on_error)(error);
    }

    async fn on_completed(&self) {
        (self.on_completed)();
    }
}
