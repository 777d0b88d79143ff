// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Rendezvous hand-off channel feeding a single stream.
//!
//! A write completes only once the reader has taken the item, so a producer is
//! never more than one item ahead of the stream draining it. Writing into a
//! channel whose stream is never activated waits forever.
//!
//! ```
//! use ripple_core::handoff;
//! use ripple_core::StreamItem;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let (tx, rx) = handoff::channel::<i32>();
//!
//! let producer = tokio::spawn(async move {
//!     tx.send_value(1).await.unwrap();
//!     tx.close();
//! });
//!
//! assert_eq!(rx.recv().await, Some(StreamItem::Value(1)));
//! assert_eq!(rx.recv().await, None);
//! producer.await.unwrap();
//! # }
//! ```

use crate::error::{Result, RippleError};
use crate::StreamItem;
use futures::channel::oneshot;

struct Envelope<T> {
    item: StreamItem<T>,
    taken: oneshot::Sender<()>,
}

/// Creates a connected sender / receiver pair.
#[must_use]
pub fn channel<T>() -> (HandoffSender<T>, HandoffReceiver<T>) {
    // One slot holds the item being handed over; the acknowledgement makes the
    // writer wait for the reader.
    let (tx, rx) = async_channel::bounded(1);
    (HandoffSender { inner: tx }, HandoffReceiver { inner: rx })
}

/// Writer side of a hand-off channel.
///
/// Cloning yields another writer on the same channel. The channel closes when
/// [`close`](Self::close) is called or every writer is dropped.
pub struct HandoffSender<T> {
    inner: async_channel::Sender<Envelope<T>>,
}

impl<T> HandoffSender<T> {
    /// Hands an item to the reader, waiting until it has been taken.
    ///
    /// # Errors
    /// Returns [`RippleError::ChannelSendError`] if the channel is closed or the
    /// reader was dropped before taking the item.
    pub async fn send(&self, item: StreamItem<T>) -> Result<()> {
        let (taken_tx, taken_rx) = oneshot::channel();
        self.inner
            .send(Envelope {
                item,
                taken: taken_tx,
            })
            .await
            .map_err(|_| RippleError::ChannelSendError)?;

        taken_rx.await.map_err(|_| RippleError::ChannelSendError)
    }

    /// Hands a value to the reader.
    ///
    /// # Errors
    /// See [`send`](Self::send).
    pub async fn send_value(&self, value: T) -> Result<()> {
        self.send(StreamItem::Value(value)).await
    }

    /// Hands a terminal error to the reader.
    ///
    /// # Errors
    /// See [`send`](Self::send).
    pub async fn send_error(&self, error: RippleError) -> Result<()> {
        self.send(StreamItem::Error(error)).await
    }

    /// Closes the channel. Items already handed over remain readable.
    ///
    /// Closing is idempotent.
    pub fn close(&self) {
        if self.inner.close() {
            debug!("hand-off channel closed by writer");
        }
    }

    /// Returns `true` if the channel is closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }
}

impl<T> Clone for HandoffSender<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Reader side of a hand-off channel, owned by exactly one stream.
pub struct HandoffReceiver<T> {
    inner: async_channel::Receiver<Envelope<T>>,
}

impl<T> HandoffReceiver<T> {
    /// Takes the next item, releasing the writer that handed it over.
    ///
    /// Returns `None` once the channel is closed and drained.
    pub async fn recv(&self) -> Option<StreamItem<T>> {
        let envelope = self.inner.recv().await.ok()?;
        // The writer may have given up waiting; the item is still delivered.
        let _ = envelope.taken.send(());
        Some(envelope.item)
    }

    /// Returns `true` if the channel is closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }
}

impl<T> Drop for HandoffReceiver<T> {
    fn drop(&mut self) {
        self.inner.close();
        // Dropping pending envelopes releases their writers with an error.
        while self.inner.try_recv().is_ok() {}
    }
}
