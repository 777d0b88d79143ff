// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Extension methods turning hand-off receivers into `RippleStream`s.

use ripple_core::HandoffReceiver;
use ripple_stream::RippleStream;

/// Extension trait for `HandoffReceiver` to create a `RippleStream`.
pub trait HandoffReceiverExt<T> {
    /// Wraps this receiver in a stream that owns it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ripple_rx::prelude::*;
    /// use ripple_core::handoff;
    ///
    /// let (tx, rx) = handoff::channel::<u32>();
    /// let stream = rx.into_ripple_stream();
    /// assert_eq!(stream.subscriber_count(), 0);
    /// # drop(tx);
    /// ```
    fn into_ripple_stream(self) -> RippleStream<T>;
}

impl<T> HandoffReceiverExt<T> for HandoffReceiver<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn into_ripple_stream(self) -> RippleStream<T> {
        RippleStream::from_receiver(self)
    }
}
