use serde::{Deserialize, Serialize};

use super::state::ComponentState;

/// One hardware health reading of a device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HardwareHealthReading {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_monitor_state: Option<ComponentState>,
    #[serde(default)]
    pub fans: Vec<Fan>,
    #[serde(default)]
    pub power_supplies: Vec<PowerSupply>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ComponentState>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerSupply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ComponentState>,
}

impl Fan {
    pub fn new(description: Option<&str>, state: Option<&str>) -> Self {
        Self {
            description: description.map(str::to_string),
            state: state.map(ComponentState::from),
        }
    }
}

impl PowerSupply {
    pub fn new(description: Option<&str>, state: Option<&str>) -> Self {
        Self {
            description: description.map(str::to_string),
            state: state.map(ComponentState::from),
        }
    }
}
