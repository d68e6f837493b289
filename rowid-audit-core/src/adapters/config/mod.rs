//! Configuration types for database adapters.

mod connection;

pub use connection::{ConnectionConfig, DEFAULT_PORT};
