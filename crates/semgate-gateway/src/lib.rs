//! semgate gateway library entry.
//!
//! Wires config, the metric engine seam, the group-by resolver and the HTTP
//! surface into one service. Consumed by the binaries and integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod engine;
pub mod obs;
pub mod ops;
pub mod router;
pub mod service;
pub mod shutdown;
