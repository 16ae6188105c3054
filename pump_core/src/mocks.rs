//! Test and helper mocks for pump_core

use pump_traits::{ApiError, Notifier, PumpReport, StatusFeed, WaterPumpApi};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::Notify;

/// Notifier that keeps every alert for later inspection.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}

/// Pump API that logs calls and replies from a script.
///
/// Scripted replies are consumed in order; once exhausted every call succeeds.
/// With a gate, each call waits for a `notify_one` before replying.
#[derive(Debug, Default)]
pub struct ScriptedPump {
    log: Mutex<Vec<String>>,
    script: Mutex<VecDeque<Result<(), String>>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedPump {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next call fails with `message`.
    pub fn then_fail(self, message: &str) -> Self {
        self.push(Err(message.to_string()));
        self
    }

    /// Next call succeeds.
    pub fn then_succeed(self) -> Self {
        self.push(Ok(()));
        self
    }

    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Calls received so far, e.g. `["start(1234ms)", "stop()"]`.
    pub fn calls(&self) -> Vec<String> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn push(&self, reply: Result<(), String>) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(reply);
    }

    async fn reply(&self, call: String) -> Result<(), ApiError> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let next = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        match next {
            Some(Err(msg)) => Err(msg.into()),
            Some(Ok(())) | None => Ok(()),
        }
    }
}

impl WaterPumpApi for ScriptedPump {
    async fn start(&self, pouring_time: Duration) -> Result<(), ApiError> {
        self.reply(format!("start({}ms)", pouring_time.as_millis()))
            .await
    }

    async fn stop(&self) -> Result<(), ApiError> {
        self.reply("stop()".to_string()).await
    }
}

/// Status feed replaying a fixed list of readings, then failing.
#[derive(Debug, Default)]
pub struct ScriptedFeed {
    readings: Mutex<VecDeque<Result<PumpReport, String>>>,
}

impl ScriptedFeed {
    pub fn new<I>(readings: I) -> Self
    where
        I: IntoIterator<Item = Result<PumpReport, String>>,
    {
        Self {
            readings: Mutex::new(readings.into_iter().collect()),
        }
    }
}

impl StatusFeed for ScriptedFeed {
    async fn status(&self) -> Result<PumpReport, ApiError> {
        let next = self
            .readings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        match next {
            Some(Ok(r)) => Ok(r),
            Some(Err(msg)) => Err(msg.into()),
            None => Err("feed exhausted".into()),
        }
    }
}
