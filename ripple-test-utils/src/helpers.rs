// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::recording::RecordingObserver;
use ripple_core::{HandoffSender, Result};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// How long tests wait for a stream to make progress before failing.
pub const DEFAULT_WAIT: Duration = Duration::from_secs(5);

/// Spawns a producer that hands over every value in order, then closes the channel.
///
/// The producer waits for each value to be taken, so it only finishes once the
/// stream draining the channel has been activated.
pub fn emit_items<T, I>(sender: HandoffSender<T>, values: I) -> JoinHandle<Result<()>>
where
    T: Send + 'static,
    I: IntoIterator<Item = T>,
    I::IntoIter: Send + 'static,
{
    let values = values.into_iter();
    tokio::spawn(async move {
        for value in values {
            sender.send_value(value).await?;
        }
        sender.close();
        Ok(())
    })
}

/// Asserts that the recorder receives nothing at all within `timeout_ms`.
pub async fn assert_no_notification<T>(recorder: &RecordingObserver<T>, timeout_ms: u64)
where
    T: Clone + Send + Sync + 'static,
{
    sleep(Duration::from_millis(timeout_ms)).await;
    assert!(
        recorder.notifications().is_empty(),
        "Unexpected notification received, expected no output."
    );
}
