//! In-process stand-in for the pump controller.
//!
//! Follows the controller's rules: a pour is accepted when it does not exceed
//! the water threshold, runs until `start + pouring_time`, and `stop` ends it.

use crate::error::{RemoteError, Result};
use pump_traits::clock::Clock;
use pump_traits::{ApiError, PumpReport, StatusFeed, WaterPumpApi};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

pub const INVALID_MILLISECONDS: &str = "invalid milliseconds value";
pub const UNREACHABLE: &str = "controller unreachable";

pub struct SimulatedPump<C: Clock> {
    clock: C,
    water_threshold: Duration,
    stop_at: Mutex<Option<Instant>>,
    offline: AtomicBool,
}

impl<C: Clock> SimulatedPump<C> {
    pub fn new(clock: C, water_threshold: Duration) -> Self {
        Self {
            clock,
            water_threshold,
            stop_at: Mutex::new(None),
            offline: AtomicBool::new(false),
        }
    }

    /// While offline every call fails as if the controller could not be reached.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::Relaxed);
    }

    pub fn pour(&self, pouring_time: Duration) -> Result<PumpReport> {
        self.reachable()?;
        if pouring_time > self.water_threshold {
            tracing::debug!(
                requested_ms = pouring_time.as_millis() as u64,
                "simulated controller rejected pour"
            );
            return Err(RemoteError::Rejected(INVALID_MILLISECONDS.to_string()));
        }
        let now = self.clock.now();
        *self.stop_at.lock().unwrap_or_else(PoisonError::into_inner) = Some(now + pouring_time);
        tracing::info!(ms = pouring_time.as_millis() as u64, "simulated pour started");
        Ok(self.report_at(now))
    }

    pub fn halt(&self) -> Result<PumpReport> {
        self.reachable()?;
        *self.stop_at.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(self.report_at(self.clock.now()))
    }

    pub fn report(&self) -> Result<PumpReport> {
        self.reachable()?;
        Ok(self.report_at(self.clock.now()))
    }

    fn reachable(&self) -> Result<()> {
        if self.offline.load(Ordering::Relaxed) {
            return Err(RemoteError::Rejected(UNREACHABLE.to_string()));
        }
        Ok(())
    }

    fn report_at(&self, now: Instant) -> PumpReport {
        let mut stop_at = self.stop_at.lock().unwrap_or_else(PoisonError::into_inner);
        // Pours whose deadline passed have finished.
        if stop_at.is_some_and(|t| t <= now) {
            *stop_at = None;
        }
        PumpReport {
            running: stop_at.is_some(),
            time_left: Some(stop_at.map_or(Duration::ZERO, |t| t - now)),
            water_threshold: Some(self.water_threshold),
        }
    }
}

impl<C: Clock + Send + Sync> WaterPumpApi for SimulatedPump<C> {
    async fn start(&self, pouring_time: Duration) -> std::result::Result<(), ApiError> {
        self.pour(pouring_time)?;
        Ok(())
    }

    async fn stop(&self) -> std::result::Result<(), ApiError> {
        self.halt()?;
        Ok(())
    }
}

impl<C: Clock + Send + Sync> StatusFeed for SimulatedPump<C> {
    async fn status(&self) -> std::result::Result<PumpReport, ApiError> {
        Ok(self.report()?)
    }
}
