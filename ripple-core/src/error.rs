// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the Ripple reactive stream core.
//!
//! Every failure that crosses a delivery-task boundary ends up as a [`RippleError`]
//! and reaches observers through `on_error`. Nothing is returned to the caller of
//! `connect` once the activation is running.
//!
//! # Examples
//!
//! ```
//! use ripple_core::{RippleError, Result};
//!
//! fn check(value: i32) -> Result<i32> {
//!     if value < 0 {
//!         return Err(RippleError::stream_error("negative value"));
//!     }
//!     Ok(value)
//! }
//!
//! assert!(check(-1).is_err());
//! ```

use core::any::Any;
use std::sync::Arc;

/// Root error type for all Ripple operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RippleError {
    /// Stream processing encountered an error
    ///
    /// General failure for stream operations that don't fit the other variants,
    /// including errors pushed explicitly by a producer.
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong during stream processing
        context: String,
    },

    /// Custom error from user code
    ///
    /// Wraps errors produced by transformation functions and observer handlers.
    /// The source is shared, so every observer of a failed activation receives
    /// this same variant.
    #[error("User error: {0}")]
    UserError(#[source] Arc<dyn std::error::Error + Send + Sync>),

    /// A user-provided handler panicked during fan-out
    ///
    /// The panic is caught at the delivery-task boundary and turned into this variant.
    #[error("User callback panicked: {context}")]
    CallbackPanic {
        /// String representation of the panic payload
        context: String,
    },

    /// Writing into a hand-off channel failed
    ///
    /// The channel was closed, or its receiver went away before taking the item.
    #[error("Channel send failed: receiver closed or dropped")]
    ChannelSendError,

    /// The stream has already been activated
    #[error("Stream already connected: a stream can only be activated once")]
    AlreadyConnected,
}

impl RippleError {
    /// Create a stream processing error with the given context
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Arc::new(error))
    }

    /// Create a callback panic error with the given context
    pub fn callback_panic(context: impl Into<String>) -> Self {
        Self::CallbackPanic {
            context: context.into(),
        }
    }

    /// Convert a payload caught from a panic into a `CallbackPanic` error.
    ///
    /// `&str` and `String` payloads are carried verbatim; anything else is reported
    /// as an unknown payload.
    ///
    /// ```
    /// use ripple_core::RippleError;
    ///
    /// let err = RippleError::from_panic_payload(Box::new("boom"));
    /// assert_eq!(err.to_string(), "User callback panicked: boom");
    /// ```
    #[must_use]
    pub fn from_panic_payload(payload: Box<dyn Any + Send>) -> Self {
        let context = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(message) => (*message).to_string(),
                Err(_) => "unknown panic payload".to_string(),
            },
        };
        Self::CallbackPanic { context }
    }

    /// Check if this error came from user code (a handler or a transformation)
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(self, Self::UserError(_) | Self::CallbackPanic { .. })
    }
}

/// Specialized Result type for Ripple operations
pub type Result<T> = std::result::Result<T, RippleError>;

/// Extension trait for converting errors into `RippleError`
///
/// Automatically implemented for every `std::error::Error + Send + Sync + 'static`.
pub trait IntoRippleError {
    /// Convert this error into a `RippleError` with additional context
    fn into_ripple_error(self, context: &str) -> RippleError;

    /// Convert this error into a `RippleError` without additional context
    fn into_ripple(self) -> RippleError
    where
        Self: Sized,
    {
        self.into_ripple_error("")
    }
}

impl<E: std::error::Error + Send + Sync + 'static> IntoRippleError for E {
    fn into_ripple_error(self, context: &str) -> RippleError {
        if context.is_empty() {
            RippleError::user_error(self)
        } else {
            RippleError::stream_error(format!("{context}: {self}"))
        }
    }
}

/// Helper trait for adding context to `Result`s
pub trait ResultExt<T> {
    /// Add context to an error
    ///
    /// # Errors
    /// Returns `Err(RippleError)` if the underlying result is `Err`.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context to an error using a closure (lazy evaluation)
    ///
    /// # Errors
    /// Returns `Err(RippleError)` if the underlying result is `Err`.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<RippleError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| attach_context(context.into(), e.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| attach_context(f(), e.into()))
    }
}

fn attach_context(context: String, error: RippleError) -> RippleError {
    match error {
        RippleError::UserError(inner) => RippleError::StreamProcessingError {
            context: format!("{context}: {inner}"),
        },
        other => other,
    }
}
