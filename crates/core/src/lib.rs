//! `hwcheck-core` -- hardware health check domain logic.
//!
//! Everything in this crate is pure: no I/O, no async. The agent crate
//! reads hardware health from a device and hands the reading to
//! [`health_check::check_hardware_health`], which drives a
//! [`aggregator::StatusAggregator`] over each component and produces a
//! [`response::Response`].

pub mod aggregator;
pub mod device;
pub mod error;
pub mod hardware;
pub mod health_check;
pub mod metric_names;
pub mod perfdata;
pub mod response;
pub mod status;
