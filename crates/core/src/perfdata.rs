//! Performance data points emitted alongside a check verdict.

use std::fmt;

use serde::Serialize;

/// A named numeric measurement, optionally labelled.
///
/// Points are identified by `(name, label)`: two fans may both report
/// `fan_state` as long as their labels differ.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceDataPoint {
    name: String,
    value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

impl PerformanceDataPoint {
    pub fn new(name: impl Into<String>, value: impl Into<f64>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn same_identity(&self, other: &PerformanceDataPoint) -> bool {
        self.name == other.name && self.label == other.label
    }
}

/// Renders as `'<name>'=<value>` or `'<name>_<label>'=<value>`.
///
/// Single quotes inside the key are doubled, as the plugin output format
/// requires.
impl fmt::Display for PerformanceDataPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match &self.label {
            Some(label) => format!("{}_{}", self.name, label),
            None => self.name.clone(),
        };
        write!(f, "'{}'={}", key.replace('\'', "''"), self.value)
    }
}

/// Adding a point whose `(name, label)` is already present.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PerfDataError {
    #[error("performance data point '{name}' with label {label:?} already exists")]
    Duplicate { name: String, label: Option<String> },
}

/// Insertion-ordered set of performance data points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerformanceData {
    points: Vec<PerformanceDataPoint>,
}

impl PerformanceData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point, rejecting duplicates of an existing `(name, label)`.
    pub fn add(&mut self, point: PerformanceDataPoint) -> Result<(), PerfDataError> {
        if self.points.iter().any(|p| p.same_identity(&point)) {
            return Err(PerfDataError::Duplicate {
                name: point.name,
                label: point.label,
            });
        }
        self.points.push(point);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PerformanceDataPoint> {
        self.points.iter()
    }

    pub fn into_vec(self) -> Vec<PerformanceDataPoint> {
        self.points
    }
}
