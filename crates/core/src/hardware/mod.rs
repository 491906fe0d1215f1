//! Hardware health readings as reported by a device.
//!
//! Every field a device may omit is an `Option`; the status pipeline in
//! [`crate::health_check`] decides which omissions are fatal.

pub mod reading;
pub mod state;

pub use reading::{Fan, HardwareHealthReading, PowerSupply};
pub use state::ComponentState;
