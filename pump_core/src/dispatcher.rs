//! Start/stop intents sent to the pump API.
//!
//! Every call produces exactly one notification and never returns an error:
//! API failures are converted into `CommandOutcome::Failure` and reported
//! through the notifier. The dispatcher never touches status; the effect of a
//! successful command shows up in later snapshots.

use crate::error::CommandError;
use crate::status::SystemStatus;
use pump_traits::{Notifier, WaterPumpApi};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

pub const START_OK: &str = "Water pump started successfully!";
pub const STOP_OK: &str = "Water pump stopped successfully!";
pub const START_ERR_PREFIX: &str = "Error starting water pump: ";
pub const STOP_ERR_PREFIX: &str = "Error stopping water pump: ";
/// Failure text when an intent arrives while another call is still awaiting.
pub const BUSY: &str = "another command is already in flight";

/// A user request to change the pump's run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Start(Duration),
    Stop,
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::Start(_) => "start",
            Intent::Stop => "stop",
        }
    }

    fn success_message(&self) -> &'static str {
        match self {
            Intent::Start(_) => START_OK,
            Intent::Stop => STOP_OK,
        }
    }

    fn failure_prefix(&self) -> &'static str {
        match self {
            Intent::Start(_) => START_ERR_PREFIX,
            Intent::Stop => STOP_ERR_PREFIX,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Success,
    /// Message of the underlying error (without the notification prefix).
    Failure(String),
}

impl CommandOutcome {
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, CommandOutcome::Success)
    }

    /// Notification text for this outcome of `intent`.
    pub fn notification(&self, intent: &Intent) -> String {
        match self {
            CommandOutcome::Success => intent.success_message().to_string(),
            CommandOutcome::Failure(msg) => format!("{}{}", intent.failure_prefix(), msg),
        }
    }
}

/// Which controls are usable for the last known status.
///
/// Advisory only: the API may still reject a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub start_enabled: bool,
    pub stop_enabled: bool,
}

impl Controls {
    pub fn for_status(status: Option<&SystemStatus>) -> Self {
        match status {
            Some(s) => Self {
                start_enabled: !s.is_running(),
                stop_enabled: s.is_running(),
            },
            None => Self {
                start_enabled: false,
                stop_enabled: false,
            },
        }
    }

    pub fn allows(&self, intent: &Intent) -> bool {
        match intent {
            Intent::Start(_) => self.start_enabled,
            Intent::Stop => self.stop_enabled,
        }
    }
}

/// Holds the in-flight flag for the duration of one API call.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Translates intents into API calls and reports each outcome once.
pub struct CommandDispatcher<A, N> {
    api: A,
    notifier: N,
    in_flight: AtomicBool,
}

impl<A: WaterPumpApi, N: Notifier> CommandDispatcher<A, N> {
    pub fn new(api: A, notifier: N) -> Self {
        Self {
            api,
            notifier,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Ask the pump to pour for `pouring_time`. The value is forwarded unchecked.
    pub async fn start(&self, pouring_time: Duration) -> CommandOutcome {
        self.dispatch(Intent::Start(pouring_time)).await
    }

    pub async fn stop(&self) -> CommandOutcome {
        self.dispatch(Intent::Stop).await
    }

    pub async fn dispatch(&self, intent: Intent) -> CommandOutcome {
        let result = match InFlight::acquire(&self.in_flight) {
            Some(_guard) => {
                tracing::debug!(command = intent.name(), ?intent, "dispatching pump command");
                let res = match intent {
                    Intent::Start(d) => self.api.start(d).await,
                    Intent::Stop => self.api.stop().await,
                };
                res.map_err(|e| CommandError::from_api(&*e))
            }
            None => Err(CommandError::new(BUSY)),
        };

        let outcome = match result {
            Ok(()) => {
                tracing::debug!(command = intent.name(), "pump command accepted");
                CommandOutcome::Success
            }
            Err(e) => {
                tracing::debug!(command = intent.name(), error = %e, "pump command failed");
                CommandOutcome::Failure(e.message)
            }
        };
        self.notifier.alert(&outcome.notification(&intent));
        outcome
    }

    /// Whether a call is currently awaiting the API.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn api(&self) -> &A {
        &self.api
    }
}
