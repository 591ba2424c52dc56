//! Top-level facade crate for semgate.
//!
//! Re-exports the core resolver/manifest types and the gateway library so users can depend on a single crate.

pub mod core {
    pub use semgate_core::*;
}

pub mod gateway {
    pub use semgate_gateway::*;
}
