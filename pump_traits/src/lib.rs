pub mod clock;

pub use clock::{Clock, ManualClock, MonotonicClock};

use std::future::Future;
use std::time::Duration;

/// Error type crossing the backend boundary; the core only relies on its display text.
pub type ApiError = Box<dyn std::error::Error + Send + Sync>;

/// Remote control surface of the water pump.
///
/// Both calls are validated by the controller; callers forward values unchecked.
pub trait WaterPumpApi {
    fn start(&self, pouring_time: Duration) -> impl Future<Output = Result<(), ApiError>> + Send;
    fn stop(&self) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// One status reading as reported by the pump controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PumpReport {
    pub running: bool,
    /// Remaining pour time while running.
    pub time_left: Option<Duration>,
    /// Longest pour the controller accepts.
    pub water_threshold: Option<Duration>,
}

/// Source of status readings.
pub trait StatusFeed {
    fn status(&self) -> impl Future<Output = Result<PumpReport, ApiError>> + Send;
}

/// Fire-and-forget user notification sink.
pub trait Notifier {
    fn alert(&self, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    fn alert(&self, message: &str) {
        (**self).alert(message);
    }
}

impl<A: WaterPumpApi> WaterPumpApi for std::sync::Arc<A> {
    fn start(&self, pouring_time: Duration) -> impl Future<Output = Result<(), ApiError>> + Send {
        (**self).start(pouring_time)
    }
    fn stop(&self) -> impl Future<Output = Result<(), ApiError>> + Send {
        (**self).stop()
    }
}

impl<F: StatusFeed> StatusFeed for std::sync::Arc<F> {
    fn status(&self) -> impl Future<Output = Result<PumpReport, ApiError>> + Send {
        (**self).status()
    }
}
