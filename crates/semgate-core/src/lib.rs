//! semgate core: group-by resolution, wire types, and semantic manifest tooling.
//!
//! This crate holds everything that does not need a runtime or a transport:
//! the alias resolver used by the query endpoint, the JSON bodies exchanged
//! over HTTP, and the manifest patcher / label catalog. The gateway crate
//! layers axum, config and the metric engine seam on top.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. All fallible paths
//! surface as `SemgateError`/`Result` so a malformed manifest or request body
//! never brings the process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod manifest;
pub mod protocol;
pub mod resolver;

/// Shared result type.
pub use error::{Result, SemgateError};
pub use resolver::{resolve, AliasMap, Resolution, LABEL_SEPARATOR};
