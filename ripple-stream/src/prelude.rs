// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Prelude module re-exporting all commonly used traits and types.
//!
//! ```
//! use ripple_stream::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let (tx, source) = RippleStream::<i32>::channel();
//! let mapped = source.map(|v: i32| v * 2);
//! assert!(!mapped.is_connected());
//! # drop(tx);
//! # }
//! ```

pub use crate::map::MapExt;
pub use crate::ripple_stream::{Activation, RippleStream};
pub use ripple_core::{
    FnObserver, Observable, Observer, ObserverRef, Outcome, RippleError, StreamItem,
};
