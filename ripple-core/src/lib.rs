// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core traits and types for Ripple push-based reactive streams.
//!
//! - [`Observer`]: a sink for values and terminal signals
//! - [`Observable`]: something observers subscribe to and that can be activated
//! - [`SubscriberRegistry`]: the concurrently accessed list of subscribers
//! - [`handoff`]: the rendezvous channel feeding a stream
//! - [`RippleError`]: every failure surfaced to observers

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

pub mod error;
pub mod handoff;
pub mod observable;
pub mod observer;
pub mod registry;
pub mod stream_item;

pub use self::error::{IntoRippleError, Result, ResultExt, RippleError};
pub use self::handoff::{HandoffReceiver, HandoffSender};
pub use self::observable::{Observable, Outcome};
pub use self::observer::{same_observer, FnObserver, Observer, ObserverRef};
pub use self::registry::SubscriberRegistry;
pub use self::stream_item::StreamItem;
