//! Controller selection from config.

use eyre::WrapErr;
use pump_remote::{HttpWaterPump, SimulatedPump};
use pump_traits::clock::MonotonicClock;
use pump_traits::{ApiError, PumpReport, StatusFeed, WaterPumpApi};
use std::time::Duration;

/// Test hook: make the simulated controller unreachable.
pub const SIM_OFFLINE_ENV: &str = "PUMP_SIM_OFFLINE";
/// Test hook: start the simulated controller with a pour of this many ms in progress.
pub const SIM_RUNNING_ENV: &str = "PUMP_SIM_RUNNING_MS";

pub enum Backend {
    Http(HttpWaterPump),
    Sim(SimulatedPump<MonotonicClock>),
}

impl Backend {
    pub fn from_config(cfg: &pump_config::Config) -> eyre::Result<Self> {
        match cfg.api.backend {
            pump_config::Backend::Http => {
                let pump = HttpWaterPump::new(
                    &cfg.api.base_url,
                    Duration::from_millis(cfg.api.request_timeout_ms),
                )
                .wrap_err("open controller client")?;
                tracing::info!(base_url = %pump.base_url(), "using HTTP controller");
                Ok(Backend::Http(pump))
            }
            pump_config::Backend::Sim => {
                let sim = SimulatedPump::new(
                    MonotonicClock::new(),
                    Duration::from_millis(cfg.sim.water_threshold_ms),
                );
                if std::env::var(SIM_OFFLINE_ENV).is_ok_and(|v| v == "1") {
                    sim.set_offline(true);
                }
                if let Some(ms) = std::env::var(SIM_RUNNING_ENV)
                    .ok()
                    .and_then(|v| v.parse::<u64>().ok())
                    && let Err(e) = sim.pour(Duration::from_millis(ms))
                {
                    tracing::warn!(error = %e, "could not pre-start simulated pour");
                }
                tracing::info!("using simulated controller");
                Ok(Backend::Sim(sim))
            }
        }
    }
}

impl WaterPumpApi for Backend {
    async fn start(&self, pouring_time: Duration) -> Result<(), ApiError> {
        match self {
            Backend::Http(p) => p.start(pouring_time).await,
            Backend::Sim(p) => p.start(pouring_time).await,
        }
    }

    async fn stop(&self) -> Result<(), ApiError> {
        match self {
            Backend::Http(p) => p.stop().await,
            Backend::Sim(p) => p.stop().await,
        }
    }
}

impl StatusFeed for Backend {
    async fn status(&self) -> Result<PumpReport, ApiError> {
        match self {
            Backend::Http(p) => p.status().await,
            Backend::Sim(p) => p.status().await,
        }
    }
}
