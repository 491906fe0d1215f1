//! The verdict handed to the monitoring front end.

use serde::Serialize;

use crate::perfdata::{PerformanceData, PerformanceDataPoint};
use crate::status::StatusLevel;

/// Final result of a check: status, free-text message and ordered
/// performance data. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    status: StatusLevel,
    message: String,
    performance_data: Vec<PerformanceDataPoint>,
}

impl Response {
    pub fn new(status: StatusLevel, message: impl Into<String>, data: PerformanceData) -> Self {
        Self {
            status,
            message: message.into(),
            performance_data: data.into_vec(),
        }
    }

    /// Minimal response for failures that happen before or outside the
    /// check body: status UNKNOWN, no performance data.
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(StatusLevel::Unknown, message, PerformanceData::new())
    }

    pub fn status(&self) -> StatusLevel {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn performance_data(&self) -> &[PerformanceDataPoint] {
        &self.performance_data
    }

    pub fn exit_code(&self) -> i32 {
        self.status.exit_code()
    }

    /// Single-line monitoring plugin output:
    /// `<STATUS>: <message> | <point> <point> ...`.
    ///
    /// The performance data section is omitted when there are no points or
    /// `print_performance_data` is false.
    pub fn render(&self, print_performance_data: bool) -> String {
        let mut out = format!("{}: {}", self.status, self.message);
        if print_performance_data && !self.performance_data.is_empty() {
            let points: Vec<String> = self.performance_data.iter().map(|p| p.to_string()).collect();
            out.push_str(" | ");
            out.push_str(&points.join(" "));
        }
        out
    }
}
