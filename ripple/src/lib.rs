// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Ripple
//!
//! A minimal push-based reactive stream core.
//!
//! ## Overview
//!
//! A producer writes values into a rendezvous hand-off channel. A [`RippleStream`]
//! wraps the reading end and, once activated, pushes every value to its
//! [`Observer`]s from a background task, followed by exactly one terminal signal.
//! [`map`] and [`try_map`] compose one observable into another.
//!
//! ## Design Philosophy
//!
//! - **Push, not pull**: observers are called; they never poll.
//! - **Rendezvous back-pressure**: a producer is never more than one value ahead of
//!   the stage reading it.
//! - **Failures are signals**: observer errors, transformation errors and panics are
//!   caught at the delivery-task boundary and turned into one `on_error` fan-out.
//!
//! ## Quick Start
//!
//! ```rust
//! use ripple_rx::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let (tx, source) = RippleStream::<i32>::channel();
//! let mapped = source.map(|v: i32| v + 1000);
//!
//! mapped.subscribe(
//!     FnObserver::new(
//!         |v: i32| println!("Value {v}"),
//!         |e| println!("Error {e}"),
//!         || println!("Completed"),
//!     )
//!     .into_ref(),
//! );
//! let activation = mapped.connect().unwrap();
//!
//! for v in [10, 20, 30] {
//!     tx.send_value(v).await.unwrap();
//! }
//! tx.close();
//!
//! assert!(activation.join().await.unwrap().is_completed());
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod channel_ext;
pub mod stream_ext;

// Re-export core types
pub use ripple_core::handoff;
pub use ripple_core::{
    FnObserver, HandoffReceiver, HandoffSender, Observable, Observer, ObserverRef, Result,
    RippleError, StreamItem, SubscriberRegistry,
};

// Re-export the stream and its operators
pub use ripple_stream::{map, try_map, Activation, MapExt, Outcome, RippleStream};

pub use channel_ext::HandoffReceiverExt;
pub use stream_ext::StreamSourceExt;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::channel_ext::HandoffReceiverExt;
    pub use crate::stream_ext::StreamSourceExt;
    pub use ripple_core::{FnObserver, Observable, Observer, ObserverRef, RippleError, StreamItem};
    pub use ripple_stream::{Activation, MapExt, Outcome, RippleStream};
}
