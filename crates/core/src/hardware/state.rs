//! Component state tokens and their numeric codes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::StateError;

pub const STATE_INITIAL: &str = "initial";
pub const STATE_NORMAL: &str = "normal";
pub const STATE_WARNING: &str = "warning";
pub const STATE_CRITICAL: &str = "critical";
pub const STATE_SHUTDOWN: &str = "shutdown";
pub const STATE_NOT_PRESENT: &str = "not_present";
pub const STATE_NOT_FUNCTIONING: &str = "not_functioning";
pub const STATE_UNKNOWN: &str = "unknown";

/// Raw state token read from a device, e.g. `"normal"` or `"critical"`.
///
/// The token is kept verbatim so that an unrecognized value survives
/// deserialization and is reported by the pipeline instead of rejecting
/// the whole reading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentState(String);

impl ComponentState {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn is_normal(&self) -> bool {
        self.0 == STATE_NORMAL
    }

    /// Numeric code recorded as performance data.
    pub fn code(&self) -> Result<i32, StateError> {
        let code = match self.0.as_str() {
            STATE_INITIAL => 0,
            STATE_NORMAL => 1,
            STATE_WARNING => 2,
            STATE_CRITICAL => 3,
            STATE_SHUTDOWN => 4,
            STATE_NOT_PRESENT => 5,
            STATE_NOT_FUNCTIONING => 6,
            STATE_UNKNOWN => 7,
            other => return Err(StateError::Unrecognized(other.to_string())),
        };
        Ok(code)
    }
}

impl From<&str> for ComponentState {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl fmt::Display for ComponentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
