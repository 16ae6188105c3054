#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Pump command/status synchronization (backend-agnostic).
//!
//! All controller interactions go through the `pump_traits::WaterPumpApi`,
//! `pump_traits::StatusFeed` and `pump_traits::Notifier` traits, passed in
//! explicitly.
//!
//! ## Architecture
//!
//! - **Dispatcher**: start/stop intents, one notification per call (`dispatcher`)
//! - **Projector**: pure `(status, now)` -> display view (`projector`)
//! - **Store**: latest snapshot plus subscriptions (`store`)
//! - **Live view**: store subscription + ticker driving re-projection (`live`)
//! - **Poller**: feeds the store from a `StatusFeed` (`poller`)

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod live;
pub mod mocks;
pub mod poller;
pub mod projector;
pub mod status;
pub mod store;
pub mod ticker;

pub use config::MonitorSettings;
pub use dispatcher::{CommandDispatcher, CommandOutcome, Controls, Intent};
pub use error::{CommandError, StatusError};
pub use live::LiveStatus;
pub use poller::{poll_once, poll_status};
pub use projector::{Color, StatusView, project};
pub use status::{PumpStatus, SystemStatus};
pub use store::{StatusStore, Subscription};
pub use ticker::Ticker;
