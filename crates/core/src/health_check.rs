//! Status pipeline over a hardware health reading.
//!
//! Components are evaluated in a fixed order: environment monitor, fans,
//! power supplies. The first halting condition ends the run; metrics
//! recorded before it are kept.

use crate::aggregator::{Halted, StatusAggregator};
use crate::hardware::{Fan, HardwareHealthReading, PowerSupply};
use crate::metric_names::{ENVIRONMENT_MONITOR_STATE, FAN_STATE, POWER_SUPPLY_STATE};
use crate::perfdata::PerformanceDataPoint;
use crate::response::Response;
use crate::status::StatusLevel;

pub const INVALID_ENVIRONMENT_STATE: &str = "read out invalid environment monitor state";
pub const ENVIRONMENT_CRITICAL: &str = "environment monitor state is critical";
pub const FAN_FIELDS_MISSING: &str = "description or state is missing for fan";
pub const INVALID_FAN_STATE: &str = "read out invalid hardware health component state for fan";
pub const POWER_SUPPLY_STATE_MISSING: &str = "state is missing for power supply";
pub const INVALID_POWER_SUPPLY_STATE: &str =
    "read out invalid hardware health component state for power supply";
pub const POWER_SUPPLY_DESCRIPTION_MISSING: &str = "description is missing for power supply";

/// Evaluate `reading` on a fresh aggregator.
pub fn check_hardware_health(reading: &HardwareHealthReading) -> Response {
    run(StatusAggregator::new(), reading)
}

/// Evaluate `reading` on `aggregator` and finalize it.
pub fn run(mut aggregator: StatusAggregator, reading: &HardwareHealthReading) -> Response {
    // A halt is already recorded in the aggregator.
    let _ = evaluate(&mut aggregator, reading);
    aggregator.finalize()
}

fn evaluate(agg: &mut StatusAggregator, reading: &HardwareHealthReading) -> Result<(), Halted> {
    if let Some(state) = &reading.environment_monitor_state {
        let code = agg.require_ok(state.code(), StatusLevel::Unknown, INVALID_ENVIRONMENT_STATE)?;
        agg.add_metric(PerformanceDataPoint::new(ENVIRONMENT_MONITOR_STATE, code))?;
        agg.escalate_if(!state.is_normal(), StatusLevel::Critical, ENVIRONMENT_CRITICAL);
    }

    for fan in &reading.fans {
        check_fan(agg, fan)?;
    }

    let single_power_supply = reading.power_supplies.len() == 1;
    for power_supply in &reading.power_supplies {
        check_power_supply(agg, power_supply, single_power_supply)?;
    }

    Ok(())
}

fn check_fan(agg: &mut StatusAggregator, fan: &Fan) -> Result<(), Halted> {
    let (state, description) = match (&fan.state, &fan.description) {
        (Some(state), Some(description)) => (state, description),
        _ => return agg.require(true, StatusLevel::Unknown, FAN_FIELDS_MISSING),
    };
    let code = agg.require_ok(state.code(), StatusLevel::Unknown, INVALID_FAN_STATE)?;
    agg.add_metric(PerformanceDataPoint::new(FAN_STATE, code).with_label(description.as_str()))
}

/// A lone power supply may be unlabelled; with several, every unit needs a
/// description to tell the points apart.
fn check_power_supply(
    agg: &mut StatusAggregator,
    power_supply: &PowerSupply,
    single: bool,
) -> Result<(), Halted> {
    let Some(state) = &power_supply.state else {
        return agg.require(true, StatusLevel::Unknown, POWER_SUPPLY_STATE_MISSING);
    };
    let code = agg.require_ok(state.code(), StatusLevel::Unknown, INVALID_POWER_SUPPLY_STATE)?;

    let point = PerformanceDataPoint::new(POWER_SUPPLY_STATE, code);
    let point = match &power_supply.description {
        Some(description) => point.with_label(description.as_str()),
        None => {
            agg.require(!single, StatusLevel::Unknown, POWER_SUPPLY_DESCRIPTION_MISSING)?;
            point
        }
    };
    agg.add_metric(point)
}
