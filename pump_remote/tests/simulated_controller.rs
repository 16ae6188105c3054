use pump_remote::sim::{INVALID_MILLISECONDS, UNREACHABLE};
use pump_remote::{RemoteError, SimulatedPump};
use pump_traits::clock::ManualClock;
use pump_traits::{StatusFeed, WaterPumpApi};
use rstest::rstest;
use std::time::Duration;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[rstest]
#[case(0)]
#[case(123)]
fn boundary_pours_are_accepted(#[case] pour_ms: u64) {
    let pump = SimulatedPump::new(ManualClock::new(), ms(123));
    assert!(pump.pour(ms(pour_ms)).is_ok());
}

#[test]
fn pour_above_threshold_is_rejected() {
    let pump = SimulatedPump::new(ManualClock::new(), ms(123));
    match pump.pour(ms(1234)) {
        Err(RemoteError::Rejected(m)) => assert_eq!(m, INVALID_MILLISECONDS),
        other => panic!("expected rejection, got {other:?}"),
    }
    assert!(!pump.report().unwrap().running);
}

#[test]
fn idle_status_reports_no_time_left() {
    let pump = SimulatedPump::new(ManualClock::new(), ms(123));
    let r = pump.report().unwrap();
    assert!(!r.running);
    assert_eq!(r.time_left, Some(Duration::ZERO));
    assert_eq!(r.water_threshold, Some(ms(123)));
}

#[test]
fn running_pour_counts_down_and_finishes() {
    let clock = ManualClock::new();
    let pump = SimulatedPump::new(clock.clone(), ms(12_345));

    pump.pour(ms(1123)).unwrap();
    clock.advance(ms(123));
    let r = pump.report().unwrap();
    assert!(r.running);
    assert_eq!(r.time_left, Some(ms(1000)));

    clock.advance(ms(1000));
    let r = pump.report().unwrap();
    assert!(!r.running);
    assert_eq!(r.time_left, Some(Duration::ZERO));
}

#[test]
fn stop_ends_pour() {
    let pump = SimulatedPump::new(ManualClock::new(), ms(5000));
    pump.pour(ms(4000)).unwrap();
    assert!(pump.report().unwrap().running);
    assert!(!pump.halt().unwrap().running);
}

#[tokio::test]
async fn trait_surface_maps_rejections_to_api_errors() {
    let pump = SimulatedPump::new(ManualClock::new(), ms(100));

    let err = pump.start(ms(101)).await.expect_err("too long");
    assert_eq!(err.to_string(), INVALID_MILLISECONDS);

    pump.start(ms(100)).await.expect("within threshold");
    assert!(pump.status().await.unwrap().running);
    pump.stop().await.expect("stop");
    assert!(!pump.status().await.unwrap().running);
}

#[tokio::test]
async fn offline_controller_fails_every_call() {
    let pump = SimulatedPump::new(ManualClock::new(), ms(100));
    pump.set_offline(true);

    assert_eq!(pump.start(ms(10)).await.unwrap_err().to_string(), UNREACHABLE);
    assert_eq!(pump.stop().await.unwrap_err().to_string(), UNREACHABLE);
    assert!(pump.status().await.is_err());

    pump.set_offline(false);
    assert!(pump.status().await.is_ok());
}
