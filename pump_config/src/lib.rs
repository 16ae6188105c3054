#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema for the pump monitor.
//!
//! - `Config` and sub-structs are deserialized from TOML; every section is optional.
//! - `Config::validate` rejects values the runtime cannot work with.
use serde::Deserialize;
use std::path::Path;

/// Which controller implementation the client talks to.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Http,
    /// In-process simulated controller (no network)
    Sim,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiCfg {
    pub backend: Backend,
    /// Controller root, e.g. "http://192.168.1.50/"
    pub base_url: String,
    /// Per-request timeout; a timed out request is reported as a failed command.
    pub request_timeout_ms: u64,
}

impl Default for ApiCfg {
    fn default() -> Self {
        Self {
            backend: Backend::Http,
            base_url: "http://localhost:8080/".to_string(),
            request_timeout_ms: 5000,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PouringCfg {
    /// Pour duration used when the command line does not give one
    pub default_ms: u64,
}

impl Default for PouringCfg {
    fn default() -> Self {
        Self { default_ms: 3000 }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MonitorCfg {
    /// Status poll period
    pub poll_ms: u64,
    /// Elapsed-time refresh period
    pub tick_ms: u64,
}

impl Default for MonitorCfg {
    fn default() -> Self {
        Self {
            poll_ms: 1000,
            tick_ms: 1000,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SimCfg {
    /// Longest pour the simulated controller accepts
    pub water_threshold_ms: u64,
}

impl Default for SimCfg {
    fn default() -> Self {
        Self {
            water_threshold_ms: 10_000,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiCfg,
    pub pouring: PouringCfg,
    pub monitor: MonitorCfg,
    pub sim: SimCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// Read, parse and validate a config file.
pub fn load_file(path: &Path) -> eyre::Result<Config> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("read config {:?}: {}", path, e))?;
    let cfg = load_toml(&text).map_err(|e| eyre::eyre!("invalid configuration {:?}: {}", path, e))?;
    cfg.validate()?;
    Ok(cfg)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Api
        if self.api.backend == Backend::Http {
            let url = self.api.base_url.trim();
            if url.is_empty() {
                eyre::bail!("api.base_url must not be empty");
            }
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                eyre::bail!("api.base_url must start with http:// or https://");
            }
        }
        if self.api.request_timeout_ms == 0 {
            eyre::bail!("api.request_timeout_ms must be >= 1");
        }

        // Pouring
        if self.pouring.default_ms == 0 {
            eyre::bail!("pouring.default_ms must be > 0");
        }

        // Monitor
        if self.monitor.poll_ms == 0 {
            eyre::bail!("monitor.poll_ms must be >= 1");
        }
        if self.monitor.tick_ms == 0 {
            eyre::bail!("monitor.tick_ms must be >= 1");
        }

        // Logging
        if let Some(rotation) = self.logging.rotation.as_deref()
            && !matches!(rotation, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly");
        }

        Ok(())
    }
}
