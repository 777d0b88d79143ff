// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use ripple_core::{RippleError, StreamItem};

#[test]
fn test_stream_item_value_creation() {
    let item: StreamItem<i32> = StreamItem::Value(42);
    assert!(item.is_value());
    assert!(!item.is_error());
}

#[test]
fn test_stream_item_error_creation() {
    let item: StreamItem<i32> = StreamItem::Error(RippleError::stream_error("test error"));
    assert!(!item.is_value());
    assert!(item.is_error());
}

#[test]
fn test_stream_item_ok_and_err() {
    assert_eq!(StreamItem::Value(42).ok(), Some(42));
    assert!(StreamItem::Value(42).err().is_none());

    let item: StreamItem<i32> = StreamItem::Error(RippleError::stream_error("test"));
    assert!(item.clone().ok().is_none());
    assert!(item.err().is_some());
}

#[test]
fn test_stream_item_map() {
    assert_eq!(StreamItem::Value(5).map(|x| x * 2), StreamItem::Value(10));

    let item: StreamItem<i32> = StreamItem::Error(RippleError::stream_error("test"));
    assert!(item.map(|x| x * 2).is_error());
}

#[test]
fn test_stream_item_and_then() {
    let item = StreamItem::Value(5).and_then(|x| {
        if x > 3 {
            StreamItem::Error(RippleError::stream_error("too large"))
        } else {
            StreamItem::Value(x)
        }
    });
    assert!(item.is_error());

    let item = StreamItem::Value(2).and_then(|x| StreamItem::Value(x + 1));
    assert_eq!(item, StreamItem::Value(3));
}

#[test]
fn test_errors_never_compare_equal() {
    let a: StreamItem<i32> = StreamItem::Error(RippleError::stream_error("same"));
    let b: StreamItem<i32> = StreamItem::Error(RippleError::stream_error("same"));
    assert_ne!(a, b);
}

#[test]
fn test_result_conversions() {
    let item: StreamItem<i32> = Ok(7).into();
    assert_eq!(item, StreamItem::Value(7));

    let item: StreamItem<i32> = Err(RippleError::ChannelSendError).into();
    assert!(item.is_error());

    let result: Result<i32, RippleError> = StreamItem::Value(9).into();
    assert_eq!(result.unwrap(), 9);
}
