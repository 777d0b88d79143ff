// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use ripple_core::{same_observer, FnObserver, Observer, ObserverRef, RippleError};
use std::sync::{Arc, Mutex};

#[tokio::test]
async fn test_fn_observer_dispatches_to_handlers() -> anyhow::Result<()> {
    // Arrange
    let log = Arc::new(Mutex::new(Vec::<String>::new()));
    let observer = FnObserver::new(
        {
            let log = log.clone();
            move |v: i32| log.lock().unwrap().push(format!("Value {v}"))
        },
        {
            let log = log.clone();
            move |e: RippleError| log.lock().unwrap().push(format!("Error {e}"))
        },
        {
            let log = log.clone();
            move || log.lock().unwrap().push("Completed".to_string())
        },
    );

    // Act
    observer.on_next(10).await?;
    observer.on_error(RippleError::stream_error("boom")).await;
    observer.on_completed().await;

    // Assert
    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "Value 10".to_string(),
            "Error Stream processing error: boom".to_string(),
            "Completed".to_string(),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_from_next_ignores_terminal_signals() -> anyhow::Result<()> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let observer = FnObserver::from_next({
        let seen = seen.clone();
        move |v: i32| seen.lock().unwrap().push(v)
    });

    observer.on_next(1).await?;
    observer.on_error(RippleError::ChannelSendError).await;
    observer.on_completed().await;

    assert_eq!(*seen.lock().unwrap(), vec![1]);
    Ok(())
}

#[test]
fn test_same_observer_compares_allocation() {
    let a: ObserverRef<i32> = FnObserver::from_next(|_| {}).into_ref();
    let b: ObserverRef<i32> = FnObserver::from_next(|_| {}).into_ref();

    assert!(same_observer(&a, &a.clone()));
    assert!(!same_observer(&a, &b));
}
