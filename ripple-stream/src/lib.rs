// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot observable streams and operators.
//!
//! - **[`RippleStream`]**: an [`Observable`](ripple_core::Observable) draining a
//!   hand-off channel into its subscribers from a background task
//! - **[`map`] / [`try_map`]**: compose one observable into another
//! - **[`MapExt`]**: the same operators as methods on every observable
//!
//! # Pipelines
//!
//! ```
//! use ripple_core::{FnObserver, Observable};
//! use ripple_stream::{MapExt, RippleStream};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let (tx, source) = RippleStream::<i32>::channel();
//! let mapped = source.map(|v: i32| v + 1000);
//!
//! mapped.subscribe(FnObserver::from_next(|v: i32| println!("Value {v}")).into_ref());
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
//!
//! Values written by the producer only move once every stage downstream of it has
//! been activated: each hand-off waits for its reader.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

pub mod map;
pub mod prelude;
pub mod ripple_stream;

pub use self::map::{map, try_map, MapExt};
pub use self::ripple_stream::{Activation, RippleStream};
pub use ripple_core::Outcome;
