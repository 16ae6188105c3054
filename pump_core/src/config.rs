//! Runtime settings for the monitor, derived from the TOML config in `pump_config`.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorSettings {
    /// Pour duration used when none is given explicitly.
    pub default_pour: Duration,
    /// How often the status feed is polled.
    pub poll_interval: Duration,
    /// How often the elapsed-time display refreshes.
    pub tick_interval: Duration,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            default_pour: Duration::from_millis(3000),
            poll_interval: Duration::from_millis(1000),
            tick_interval: Duration::from_millis(1000),
        }
    }
}

impl From<&pump_config::Config> for MonitorSettings {
    fn from(c: &pump_config::Config) -> Self {
        Self {
            default_pour: Duration::from_millis(c.pouring.default_ms),
            poll_interval: Duration::from_millis(c.monitor.poll_ms),
            tick_interval: Duration::from_millis(c.monitor.tick_ms),
        }
    }
}
