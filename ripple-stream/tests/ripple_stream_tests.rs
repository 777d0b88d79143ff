// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use ripple_core::{FnObserver, Observable, Observer, ObserverRef, RippleError};
use ripple_stream::{Outcome, RippleStream};
use ripple_test_utils::{
    assert_no_notification, emit_items, FailingObserver, Notification, PanickingObserver,
    RecordingObserver, DEFAULT_WAIT,
};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, Notify};
use tokio::time::timeout;

/// Blocks inside `on_next` for one value until released.
struct GateObserver {
    hold_on: i32,
    entered: mpsc::UnboundedSender<i32>,
    release: Arc<Notify>,
}

#[async_trait]
impl Observer<i32> for GateObserver {
    async fn on_next(&self, value: i32) -> ripple_core::Result<()> {
        if value == self.hold_on {
            let _ = self.entered.send(value);
            self.release.notified().await;
        }
        Ok(())
    }

    async fn on_error(&self, _error: RippleError) {}

    async fn on_completed(&self) {}
}

#[tokio::test]
async fn test_values_then_single_completion() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = RippleStream::channel();
    let recorder = RecordingObserver::new();
    stream.subscribe(recorder.observer());
    let producer = emit_items(tx, vec![1, 2, 3]);

    // Act
    let activation = stream.connect()?;
    let outcome = timeout(DEFAULT_WAIT, activation.join()).await??;

    // Assert
    assert!(outcome.is_completed());
    assert!(matches!(
        recorder.notifications().as_slice(),
        [
            Notification::Next(1),
            Notification::Next(2),
            Notification::Next(3),
            Notification::Completed
        ]
    ));
    producer.await??;
    Ok(())
}

#[tokio::test]
async fn test_every_subscriber_gets_a_full_copy() -> anyhow::Result<()> {
    let (tx, stream) = RippleStream::channel();
    let first = RecordingObserver::new();
    let second = RecordingObserver::new();
    stream.subscribe(first.observer());
    stream.subscribe(second.observer());
    emit_items(tx, vec!["a", "b"]);

    timeout(DEFAULT_WAIT, stream.connect()?.join()).await??;

    for recorder in [&first, &second] {
        assert_eq!(recorder.values(), vec!["a", "b"]);
        assert_eq!(recorder.completed_count(), 1);
        assert_eq!(recorder.error_count(), 0);
    }
    Ok(())
}

#[tokio::test]
async fn test_fan_out_follows_subscription_order() -> anyhow::Result<()> {
    let (tx, stream) = RippleStream::channel();
    let log = Arc::new(Mutex::new(Vec::new()));
    for name in ["A", "B"] {
        let log = log.clone();
        stream.subscribe(
            FnObserver::from_next(move |v: i32| log.lock().unwrap().push(format!("{name}{v}")))
                .into_ref(),
        );
    }
    emit_items(tx, vec![1, 2]);

    timeout(DEFAULT_WAIT, stream.connect()?.join()).await??;

    assert_eq!(*log.lock().unwrap(), vec!["A1", "B1", "A2", "B2"]);
    Ok(())
}

#[tokio::test]
async fn test_unsubscribed_before_connect_sees_nothing() -> anyhow::Result<()> {
    let (tx, stream) = RippleStream::channel();
    let kept = RecordingObserver::new();
    let removed = RecordingObserver::new();
    stream.subscribe(kept.observer());
    let removed_ref = removed.observer();
    stream.subscribe(removed_ref.clone());

    assert!(stream.unsubscribe(&removed_ref));
    assert!(!stream.unsubscribe(&removed_ref));
    emit_items(tx, vec![1]);
    timeout(DEFAULT_WAIT, stream.connect()?.join()).await??;

    assert_eq!(kept.values(), vec![1]);
    assert!(removed.notifications().is_empty());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unsubscribe_during_activation_stops_later_values() -> anyhow::Result<()> {
    // Arrange: A removes B while value 2 is being fanned out
    let (tx, stream) = RippleStream::channel();
    let b = RecordingObserver::new();
    let b_ref: ObserverRef<i32> = b.observer();
    let a = {
        let stream = stream.clone();
        let b_ref = b_ref.clone();
        FnObserver::from_next(move |v: i32| {
            if v == 2 {
                stream.unsubscribe(&b_ref);
            }
        })
    };
    stream.subscribe(a.into_ref());
    stream.subscribe(b_ref);
    emit_items(tx, vec![1, 2, 3]);

    // Act
    timeout(DEFAULT_WAIT, stream.connect()?.join()).await??;

    // Assert: the pass already dispatching 2 still reaches B
    assert_eq!(b.values(), vec![1, 2]);
    assert_eq!(b.completed_count(), 0);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_unsubscribe_while_delivery_blocked() -> anyhow::Result<()> {
    // Arrange: the gate holds the fan-out pass for value 1
    let (tx, stream) = RippleStream::<i32>::channel();
    let (entered_tx, mut entered_rx) = mpsc::unbounded_channel();
    let release = Arc::new(Notify::new());
    stream.subscribe(Arc::new(GateObserver {
        hold_on: 1,
        entered: entered_tx,
        release: release.clone(),
    }));
    let b = RecordingObserver::new();
    let b_ref: ObserverRef<i32> = b.observer();
    stream.subscribe(b_ref.clone());
    emit_items(tx, vec![1, 2, 3]);
    let activation = stream.connect()?;
    assert_eq!(timeout(DEFAULT_WAIT, entered_rx.recv()).await?, Some(1));

    // Act: another task removes B while the gate is still inside on_next
    let remover = {
        let stream = stream.clone();
        tokio::spawn(async move { stream.unsubscribe(&b_ref) })
    };
    assert!(remover.await?);
    release.notify_one();
    timeout(DEFAULT_WAIT, activation.join()).await??;

    // Assert: the pass in flight still reaches B, later passes do not
    assert_eq!(b.values(), vec![1]);
    assert!(!b.is_terminated());
    Ok(())
}

#[tokio::test]
async fn test_outcome_is_recorded() -> anyhow::Result<()> {
    let (tx, stream) = RippleStream::<i32>::channel();
    assert!(stream.outcome().is_none());

    let activation = stream.connect()?;
    tx.close();
    timeout(DEFAULT_WAIT, activation.join()).await??;

    assert!(stream.outcome().is_some_and(|o| o.is_completed()));
    Ok(())
}

#[tokio::test]
async fn test_failed_outcome_keeps_error() -> anyhow::Result<()> {
    let (tx, stream) = RippleStream::<i32>::channel();
    let failing = FailingObserver::new(|_: &i32| true);
    stream.subscribe(failing.observer());
    emit_items(tx, vec![1]);

    timeout(DEFAULT_WAIT, stream.connect()?.join()).await??;

    let outcome = stream.outcome().expect("activation ended");
    assert!(outcome.error().is_some_and(RippleError::is_user_error));
    Ok(())
}

#[tokio::test]
async fn test_second_connect_is_rejected() -> anyhow::Result<()> {
    let (tx, stream) = RippleStream::<i32>::channel();
    assert!(!stream.is_connected());

    let activation = stream.connect()?;

    assert!(stream.is_connected());
    assert!(matches!(
        stream.connect(),
        Err(RippleError::AlreadyConnected)
    ));
    assert!(matches!(
        stream.clone().connect(),
        Err(RippleError::AlreadyConnected)
    ));

    tx.close();
    timeout(DEFAULT_WAIT, activation.join()).await??;
    Ok(())
}

#[tokio::test]
async fn test_failing_observer_aborts_for_everyone() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = RippleStream::channel();
    let failing = FailingObserver::new(|v: &i32| *v == 2);
    let bystander = RecordingObserver::new();
    stream.subscribe(failing.observer());
    stream.subscribe(bystander.observer());
    let producer = emit_items(tx, vec![1, 2, 3]);

    // Act
    let outcome = timeout(DEFAULT_WAIT, stream.connect()?.join()).await??;

    // Assert
    assert!(matches!(outcome, Outcome::Failed(RippleError::UserError(_))));
    assert_eq!(failing.recorder().values(), vec![1, 2]);
    assert_eq!(failing.recorder().error_count(), 1);
    assert!(matches!(
        bystander.notifications().as_slice(),
        [
            Notification::Next(1),
            Notification::Error(RippleError::UserError(_))
        ]
    ));
    assert_eq!(bystander.completed_count(), 0);

    // The producer is released once the stream stops reading
    let sent = timeout(DEFAULT_WAIT, producer).await??;
    assert!(matches!(sent, Err(RippleError::ChannelSendError)));
    Ok(())
}

#[tokio::test]
async fn test_panicking_observer_becomes_callback_panic() -> anyhow::Result<()> {
    let (tx, stream) = RippleStream::channel();
    let panicking = PanickingObserver::new("value rejected", |v: &i32| *v == 2);
    let bystander = RecordingObserver::new();
    stream.subscribe(panicking.observer());
    stream.subscribe(bystander.observer());
    emit_items(tx, vec![1, 2]);

    let outcome = timeout(DEFAULT_WAIT, stream.connect()?.join()).await??;

    assert!(matches!(
        outcome,
        Outcome::Failed(RippleError::CallbackPanic { ref context }) if context == "value rejected"
    ));
    assert_eq!(panicking.recorder().values(), vec![1]);
    assert_eq!(panicking.recorder().error_count(), 1);
    assert_eq!(bystander.values(), vec![1]);
    assert!(matches!(
        bystander.errors().as_slice(),
        [RippleError::CallbackPanic { .. }]
    ));
    Ok(())
}

#[tokio::test]
async fn test_error_item_fails_the_activation() -> anyhow::Result<()> {
    let (tx, stream) = RippleStream::channel();
    let recorder = RecordingObserver::new();
    stream.subscribe(recorder.observer());
    let producer = tokio::spawn(async move {
        tx.send_value(1).await?;
        tx.send_error(RippleError::stream_error("sensor offline"))
            .await
    });

    let outcome = timeout(DEFAULT_WAIT, stream.connect()?.join()).await??;

    assert!(matches!(outcome, Outcome::Failed(_)));
    assert_eq!(recorder.values(), vec![1]);
    assert_eq!(
        recorder.errors()[0].to_string(),
        "Stream processing error: sensor offline"
    );
    assert_eq!(recorder.completed_count(), 0);
    producer.await??;
    Ok(())
}

#[tokio::test]
async fn test_panicking_terminal_handler_does_not_starve_others() -> anyhow::Result<()> {
    let (tx, stream) = RippleStream::<i32>::channel();
    stream.subscribe(FnObserver::new(|_| {}, |_| {}, || panic!("completion handler")).into_ref());
    let recorder = RecordingObserver::new();
    stream.subscribe(recorder.observer());
    tx.close();

    let outcome = timeout(DEFAULT_WAIT, stream.connect()?.join()).await??;

    assert!(outcome.is_completed());
    assert_eq!(recorder.completed_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_completes_without_subscribers() -> anyhow::Result<()> {
    let (tx, stream) = RippleStream::channel();
    let producer = emit_items(tx, vec![1, 2, 3]);

    let outcome = timeout(DEFAULT_WAIT, stream.connect()?.join()).await??;

    assert!(outcome.is_completed());
    producer.await??;
    Ok(())
}

#[tokio::test]
async fn test_terminal_signal_ends_subscriptions() -> anyhow::Result<()> {
    let (tx, stream) = RippleStream::<i32>::channel();
    stream.subscribe(RecordingObserver::new().observer());
    stream.subscribe(RecordingObserver::new().observer());
    assert_eq!(stream.subscriber_count(), 2);
    tx.close();

    timeout(DEFAULT_WAIT, stream.connect()?.join()).await??;

    assert_eq!(stream.subscriber_count(), 0);

    let late = RecordingObserver::new();
    stream.subscribe(late.observer());
    assert_no_notification(&late, 50).await;
    Ok(())
}

#[tokio::test]
async fn test_producer_waits_until_connect() -> anyhow::Result<()> {
    let (tx, stream) = RippleStream::channel();
    let recorder = RecordingObserver::new();
    stream.subscribe(recorder.observer());
    let producer = emit_items(tx, vec![7]);

    assert_no_notification(&recorder, 50).await;
    assert!(!producer.is_finished());

    let activation = stream.connect()?;
    producer.await??;
    timeout(DEFAULT_WAIT, activation.join()).await??;

    assert_eq!(recorder.values(), vec![7]);
    Ok(())
}
