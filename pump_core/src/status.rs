//! Pump status snapshots.

use pump_traits::PumpReport;
use std::time::{Duration, Instant};

/// Authoritative run state of the physical pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PumpStatus {
    pub running: bool,
    /// Remaining pour time while running, when the controller reports it.
    pub time_left: Option<Duration>,
}

/// Last confirmed snapshot, stamped at receipt.
///
/// Snapshots are never edited; a newer one replaces the old one wholesale.
/// "No connection yet" is `Option<SystemStatus>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemStatus {
    pub pump: PumpStatus,
    pub updated: Instant,
    pub water_threshold: Option<Duration>,
}

impl SystemStatus {
    pub fn new(running: bool, updated: Instant) -> Self {
        Self {
            pump: PumpStatus {
                running,
                time_left: None,
            },
            updated,
            water_threshold: None,
        }
    }

    /// Snapshot of a controller report received at `at`.
    pub fn received(report: PumpReport, at: Instant) -> Self {
        Self {
            pump: PumpStatus {
                running: report.running,
                time_left: report.time_left,
            },
            updated: at,
            water_threshold: report.water_threshold,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.pump.running
    }
}
