//! Query API (`POST /query`) and its error mapping.

pub mod error;
pub mod query;

pub use error::ApiError;
