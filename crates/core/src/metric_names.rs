//! Well-known performance data point names.
//!
//! These are the names monitoring dashboards key on; renaming one breaks
//! every graph built on it.

/// Numeric code of the device's environment monitor state.
pub const ENVIRONMENT_MONITOR_STATE: &str = "environment_monitor_state";

/// Numeric code of a fan's state, labelled with the fan description.
pub const FAN_STATE: &str = "fan_state";

/// Numeric code of a power supply's state, labelled with its description
/// when one is reported.
pub const POWER_SUPPLY_STATE: &str = "power_supply_state";
