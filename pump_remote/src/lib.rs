//! Pump controller backends: HTTP client and in-process simulation.
pub mod error;
pub mod http;
pub mod sim;
pub mod wire;

pub use error::RemoteError;
pub use http::HttpWaterPump;
pub use sim::SimulatedPump;
