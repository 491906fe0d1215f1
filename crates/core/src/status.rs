//! Monitoring severity levels.

use std::fmt;

use serde::Serialize;

/// Severity verdict of a check.
///
/// Variants are declared in escalation order, so the derived `Ord` gives
/// `Ok < Warning < Critical < Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatusLevel {
    #[default]
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl StatusLevel {
    /// The more severe of `self` and `other`.
    pub fn escalate(self, other: StatusLevel) -> StatusLevel {
        self.max(other)
    }

    /// Process exit code expected by monitoring front ends.
    pub fn exit_code(self) -> i32 {
        match self {
            StatusLevel::Ok => 0,
            StatusLevel::Warning => 1,
            StatusLevel::Critical => 2,
            StatusLevel::Unknown => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusLevel::Ok => "OK",
            StatusLevel::Warning => "WARNING",
            StatusLevel::Critical => "CRITICAL",
            StatusLevel::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
