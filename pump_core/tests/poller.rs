use pump_core::mocks::ScriptedFeed;
use pump_core::{StatusStore, poll_once, poll_status};
use pump_traits::PumpReport;
use pump_traits::clock::{Clock, ManualClock};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn report(running: bool) -> Result<PumpReport, String> {
    Ok(PumpReport {
        running,
        time_left: Some(Duration::from_millis(if running { 900 } else { 0 })),
        water_threshold: Some(Duration::from_millis(10_000)),
    })
}

#[tokio::test]
async fn poll_once_stamps_receipt_time() {
    let feed = ScriptedFeed::new([report(true)]);
    let store = StatusStore::new();
    let clock = ManualClock::new();
    clock.advance(Duration::from_secs(4));

    let snap = poll_once(&feed, &store, &clock).await.expect("published");

    assert!(snap.is_running());
    assert_eq!(snap.updated, clock.now());
    assert_eq!(snap.pump.time_left, Some(Duration::from_millis(900)));
    assert_eq!(store.current(), Some(snap));
}

#[tokio::test]
async fn failed_poll_marks_disconnected() {
    let feed = ScriptedFeed::new([report(false), Err("connection refused".to_string())]);
    let store = StatusStore::new();
    let clock = ManualClock::new();

    assert!(poll_once(&feed, &store, &clock).await.is_some());
    assert!(store.current().is_some());

    assert!(poll_once(&feed, &store, &clock).await.is_none());
    assert_eq!(store.current(), None);
}

#[tokio::test(start_paused = true)]
async fn poll_status_publishes_each_interval_until_shutdown() {
    let feed = ScriptedFeed::new([report(false), report(true), report(false)]);
    let store = StatusStore::new();
    let clock = ManualClock::new();
    let changes = Arc::new(AtomicUsize::new(0));
    let c = changes.clone();
    let _sub = store.subscribe(move |_| {
        c.fetch_add(1, Ordering::SeqCst);
    });

    // Three readings land at t=0, 100ms, 200ms; shutdown before the feed runs dry.
    poll_status(
        &feed,
        &store,
        &clock,
        Duration::from_millis(100),
        tokio::time::sleep(Duration::from_millis(250)),
    )
    .await;

    assert_eq!(changes.load(Ordering::SeqCst), 3);
    assert!(!store.current().expect("connected").is_running());
}

#[tokio::test(start_paused = true)]
async fn poll_status_exits_promptly_on_shutdown() {
    let feed = ScriptedFeed::new([report(true)]);
    let store = StatusStore::new();
    let clock = ManualClock::new();

    poll_status(&feed, &store, &clock, Duration::from_secs(60), async {}).await;

    assert_eq!(store.current(), None);
}
