//! Status polling loop feeding a `StatusStore`.

use crate::status::SystemStatus;
use crate::store::StatusStore;
use pump_traits::StatusFeed;
use pump_traits::clock::Clock;
use std::future::Future;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Fetch one report and publish it stamped with the receipt time.
///
/// A failed fetch marks the store disconnected. Returns the published snapshot.
pub async fn poll_once<F, C>(feed: &F, store: &StatusStore, clock: &C) -> Option<SystemStatus>
where
    F: StatusFeed,
    C: Clock,
{
    match feed.status().await {
        Ok(report) => {
            let snapshot = SystemStatus::received(report, clock.now());
            match store.publish(snapshot) {
                Ok(()) => {
                    tracing::trace!(running = report.running, "status snapshot published");
                    Some(snapshot)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "dropping out-of-order snapshot");
                    None
                }
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "status poll failed; marking disconnected");
            store.disconnect();
            None
        }
    }
}

/// Poll `feed` every `interval` until `shutdown` resolves.
///
/// The first poll happens immediately. A poll in progress when `shutdown`
/// resolves is abandoned.
pub async fn poll_status<F, C, S>(
    feed: &F,
    store: &StatusStore,
    clock: &C,
    interval: Duration,
    shutdown: S,
) where
    F: StatusFeed,
    C: Clock,
    S: Future<Output = ()>,
{
    let mut ticks = tokio::time::interval(interval.max(Duration::from_millis(1)));
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);
    tracing::debug!(interval_ms = interval.as_millis() as u64, "status poller started");

    loop {
        tokio::select! {
            biased;
            () = &mut shutdown => break,
            _ = async {
                ticks.tick().await;
                poll_once(feed, store, clock).await
            } => {}
        }
    }
    tracing::debug!("status poller stopped");
}
