// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the Ripple reactive stream core.
//!
//! Designed for use in development and testing only, not for production code.
//!
//! # Key Types
//!
//! - [`RecordingObserver`]: terminal sink that logs every [`Notification`] and lets
//!   tests await progress with a timeout
//! - [`FailingObserver`] / [`PanickingObserver`]: observers that fail on chosen values
//! - [`emit_items`]: producer task writing a fixed sequence into a hand-off channel
//!
//! # Example
//!
//! ```rust
//! use ripple_core::handoff;
//! use ripple_test_utils::emit_items;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let (tx, rx) = handoff::channel();
//! let producer = emit_items(tx, vec![1, 2]);
//!
//! while let Some(item) = rx.recv().await {
//!     assert!(item.is_value());
//! }
//! producer.await.unwrap().unwrap();
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod error_injection;
pub mod helpers;
pub mod recording;

pub use error_injection::{FailingObserver, InjectedError, PanickingObserver};
pub use helpers::{assert_no_notification, emit_items, DEFAULT_WAIT};
pub use recording::{Notification, RecordingObserver};
