// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::{Result, RippleError};
use crate::observer::ObserverRef;

/// How an activation ended.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The source channel was closed and fully drained.
    Completed,
    /// The activation was aborted by this error.
    Failed(RippleError),
}

impl Outcome {
    /// Returns `true` for [`Outcome::Completed`].
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Returns the error that aborted the activation, if any.
    #[must_use]
    pub fn error(&self) -> Option<&RippleError> {
        match self {
            Self::Completed => None,
            Self::Failed(error) => Some(error),
        }
    }
}

/// A source of values that can be subscribed to and activated.
///
/// Subscriptions may be added or removed at any time, including while an
/// activation is delivering. An observer subscribed after a value has been
/// fanned out does not see that value.
pub trait Observable<T>: Send + Sync {
    /// Handle to the running delivery task returned by [`connect`](Self::connect).
    type Activation;

    /// Appends an observer to the subscriber list.
    fn subscribe(&self, observer: ObserverRef<T>);

    /// Removes the first subscription of this observer.
    ///
    /// Returns `false` if the observer was not subscribed.
    fn unsubscribe(&self, observer: &ObserverRef<T>) -> bool;

    /// Starts delivering values to subscribers in the background and returns immediately.
    ///
    /// # Errors
    /// An observable can only be activated once; later calls return
    /// [`RippleError::AlreadyConnected`](crate::RippleError::AlreadyConnected).
    fn connect(&self) -> Result<Self::Activation>;

    /// Returns how the activation ended, once its terminal signal is being delivered.
    ///
    /// `None` before activation and while values are still flowing.
    fn outcome(&self) -> Option<Outcome>;
}
