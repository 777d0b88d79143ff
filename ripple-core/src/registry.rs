// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::observer::{same_observer, ObserverRef};
use parking_lot::Mutex;
use std::sync::Arc;

/// Ordered set of observers with add / remove-by-identity semantics.
///
/// The registry is shared between `subscribe`/`unsubscribe` callers and the
/// delivery task of an activation. Fan-out never iterates the live list: it
/// takes a [`snapshot`](Self::snapshot) first, so the lock is never held while
/// an observer runs and a concurrent unsubscribe does not cancel a delivery
/// already in flight.
pub struct SubscriberRegistry<T> {
    observers: Arc<Mutex<Vec<ObserverRef<T>>>>,
}

impl<T> SubscriberRegistry<T> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            observers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Appends an observer. Registering the same observer twice yields two entries.
    pub fn add(&self, observer: ObserverRef<T>) {
        self.observers.lock().push(observer);
    }

    /// Removes the first entry matching the observer's identity.
    ///
    /// Returns `false` when the observer was not registered.
    pub fn remove(&self, observer: &ObserverRef<T>) -> bool {
        let mut observers = self.observers.lock();
        match observers.iter().position(|o| same_observer(o, observer)) {
            Some(index) => {
                observers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns `true` if the observer has at least one entry.
    #[must_use]
    pub fn contains(&self, observer: &ObserverRef<T>) -> bool {
        self.observers
            .lock()
            .iter()
            .any(|o| same_observer(o, observer))
    }

    /// Copies the current membership, in registration order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ObserverRef<T>> {
        self.observers.lock().clone()
    }

    /// Removes every entry and returns what was registered.
    pub fn clear(&self) -> Vec<ObserverRef<T>> {
        core::mem::take(&mut *self.observers.lock())
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.lock().len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.lock().is_empty()
    }
}

impl<T> Default for SubscriberRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SubscriberRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            observers: self.observers.clone(),
        }
    }
}
