//! HTTP API handlers

pub mod health;
pub mod instruments;
pub mod samples;
pub mod sessions;

pub use health::health_routes;
pub use instruments::instrument_routes;
pub use samples::sample_routes;
pub use sessions::session_routes;
