// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Bridges `futures` streams into Ripple observables.

use futures::{Stream, StreamExt};
use ripple_stream::RippleStream;

/// Extension trait turning any `futures::Stream` into a producer for a `RippleStream`.
pub trait StreamSourceExt<T>: Stream<Item = T> + Sized {
    /// Spawns a producer task that hands every item of this stream to the returned
    /// observable, then closes it.
    ///
    /// The producer advances one item at a time, as the observable takes them; it
    /// stops early if the observable is dropped without being activated.
    ///
    /// # Panics
    /// Panics if called outside of a Tokio runtime.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ripple_rx::prelude::*;
    /// use ripple_test_utils::{RecordingObserver, DEFAULT_WAIT};
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let stream = futures::stream::iter(vec![1, 2, 3]).into_ripple_stream();
    /// let recorder = RecordingObserver::new();
    /// stream.subscribe(recorder.observer());
    /// stream.connect().unwrap();
    ///
    /// assert!(recorder.wait_for_terminal(DEFAULT_WAIT).await);
    /// assert_eq!(recorder.values(), vec![1, 2, 3]);
    /// # }
    /// ```
    fn into_ripple_stream(self) -> RippleStream<T>;
}

impl<S, T> StreamSourceExt<T> for S
where
    S: Stream<Item = T> + Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    fn into_ripple_stream(self) -> RippleStream<T> {
        let (tx, stream) = RippleStream::channel();

        tokio::spawn(async move {
            let mut source = Box::pin(self);
            while let Some(value) = source.next().await {
                if tx.send_value(value).await.is_err() {
                    break;
                }
            }
            tx.close();
        });

        stream
    }
}
