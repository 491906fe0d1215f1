//! `hwcheck-agent` library crate.
//!
//! Runs health check requests against devices with a bounded wait. The
//! binary entrypoint lives in `main.rs`; the modules are public so the
//! integration tests can drive the executor with their own requests.

pub mod config;
pub mod connection;
pub mod executor;
pub mod fault;
pub mod hardware_health;
pub mod output;
pub mod request;
pub mod snapshot;
pub mod timeout;
