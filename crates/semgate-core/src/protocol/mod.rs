//! Wire types.
//!
//! - `http`: JSON bodies of the `/query` and `/` endpoints.
//! - `engine`: shapes exchanged with the metric engine (group-by items, tabular results).

pub mod engine;
pub mod http;
