//! HTTP client for the pump controller.
//!
//! Endpoints (relative to the base URL): `pour_tea?milliseconds=N`, `stop`, `status`.

use crate::error::{RemoteError, Result};
use crate::wire::parse_reply;
use pump_traits::{ApiError, PumpReport, StatusFeed, WaterPumpApi};
use reqwest::Url;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpWaterPump {
    client: reqwest::Client,
    base: Url,
}

impl HttpWaterPump {
    /// `timeout` bounds every request; an expired request surfaces as `RemoteError::Http`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base =
            Url::parse(base_url).map_err(|e| RemoteError::BaseUrl(format!("{base_url}: {e}")))?;
        // Url::join drops the last segment unless the path ends with '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pump-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| RemoteError::BaseUrl(format!("{}{path}: {e}", self.base)))
    }

    pub fn pour_url(&self, pouring_time: Duration) -> Result<Url> {
        let mut url = self.endpoint("pour_tea")?;
        url.query_pairs_mut()
            .append_pair("milliseconds", &pouring_time.as_millis().to_string());
        Ok(url)
    }

    pub async fn pour(&self, pouring_time: Duration) -> Result<PumpReport> {
        let url = self.pour_url(pouring_time)?;
        self.get(url).await
    }

    pub async fn halt(&self) -> Result<PumpReport> {
        let url = self.endpoint("stop")?;
        self.get(url).await
    }

    pub async fn fetch_status(&self) -> Result<PumpReport> {
        let url = self.endpoint("status")?;
        self.get(url).await
    }

    async fn get(&self, url: Url) -> Result<PumpReport> {
        tracing::debug!(%url, "controller request");
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if status.is_success() {
            return parse_reply(&body);
        }
        match parse_reply(&body) {
            Err(RemoteError::Rejected(msg)) => Err(RemoteError::Rejected(msg)),
            _ => Err(RemoteError::Status(status)),
        }
    }
}

impl WaterPumpApi for HttpWaterPump {
    async fn start(&self, pouring_time: Duration) -> std::result::Result<(), ApiError> {
        self.pour(pouring_time).await?;
        Ok(())
    }

    async fn stop(&self) -> std::result::Result<(), ApiError> {
        self.halt().await?;
        Ok(())
    }
}

impl StatusFeed for HttpWaterPump {
    async fn status(&self) -> std::result::Result<PumpReport, ApiError> {
        Ok(self.fetch_status().await?)
    }
}
