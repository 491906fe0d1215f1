//! Escalate-only status accumulator for a single check run.
//!
//! A [`StatusAggregator`] starts at OK with the message `"checked"`. Each
//! component check either escalates the status and keeps going
//! ([`StatusAggregator::escalate_if`]) or halts the run
//! ([`StatusAggregator::require`]). Halting returns [`Halted`] as the error
//! arm of a `Result`, so a pipeline step can bail out with `?`; the
//! performance data collected up to that point is still part of the final
//! [`Response`].

use std::fmt;

use crate::perfdata::{PerformanceData, PerformanceDataPoint};
use crate::response::Response;
use crate::status::StatusLevel;

/// Message of a run that never escalated.
pub const DEFAULT_MESSAGE: &str = "checked";

/// Message used when a performance data point cannot be added.
pub const ADD_METRIC_FAILED: &str = "error while adding performance data point";

/// The run was halted; no further components may be evaluated.
///
/// Call [`StatusAggregator::finalize`] to obtain the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Halted;

#[derive(Debug)]
pub struct StatusAggregator {
    status: StatusLevel,
    message: String,
    data: PerformanceData,
    halted: bool,
}

impl Default for StatusAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusAggregator {
    pub fn new() -> Self {
        Self {
            status: StatusLevel::Ok,
            message: DEFAULT_MESSAGE.to_string(),
            data: PerformanceData::new(),
            halted: false,
        }
    }

    pub fn status(&self) -> StatusLevel {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn performance_data(&self) -> &PerformanceData {
        &self.data
    }

    /// Halt the run at `level` if `condition` holds.
    ///
    /// Once halted every further call returns `Err(Halted)` without
    /// touching status or message.
    pub fn require(
        &mut self,
        condition: bool,
        level: StatusLevel,
        message: impl Into<String>,
    ) -> Result<(), Halted> {
        if self.halted {
            return Err(Halted);
        }
        if condition {
            return Err(self.halt(level, message.into()));
        }
        Ok(())
    }

    /// Unwrap `result`, halting at `level` on error.
    ///
    /// The halt message is `"<message>: <error>"`.
    pub fn require_ok<T, E: fmt::Display>(
        &mut self,
        result: Result<T, E>,
        level: StatusLevel,
        message: &str,
    ) -> Result<T, Halted> {
        if self.halted {
            return Err(Halted);
        }
        result.map_err(|e| self.halt(level, format!("{message}: {e}")))
    }

    /// Escalate to `level` if `condition` holds, without halting.
    ///
    /// No-op after a halt.
    pub fn escalate_if(&mut self, condition: bool, level: StatusLevel, message: impl Into<String>) {
        if condition && !self.halted {
            self.raise(level, message.into());
        }
    }

    /// Append a performance data point.
    ///
    /// A rejected point (duplicate name and label) halts the run with
    /// UNKNOWN. The message carries no cause, unlike [`require_ok`](Self::require_ok).
    pub fn add_metric(&mut self, point: PerformanceDataPoint) -> Result<(), Halted> {
        if self.halted {
            return Err(Halted);
        }
        let rejected = self.data.add(point).is_err();
        self.require(rejected, StatusLevel::Unknown, ADD_METRIC_FAILED)
    }

    /// Consume the aggregator, keeping every point added before a halt.
    pub fn finalize(self) -> Response {
        Response::new(self.status, self.message, self.data)
    }

    fn halt(&mut self, level: StatusLevel, message: String) -> Halted {
        self.raise(level, message);
        self.halted = true;
        Halted
    }

    fn raise(&mut self, level: StatusLevel, message: String) {
        self.status = self.status.escalate(level);
        self.message = message;
    }
}
