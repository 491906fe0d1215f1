//! Rendering of execution outcomes for the monitoring front end.

use chrono::Utc;
use hwcheck_core::perfdata::PerformanceDataPoint;
use hwcheck_core::response::Response;
use hwcheck_core::status::StatusLevel;
use serde::Serialize;

use crate::config::OutputFormat;
use crate::request::Outcome;

/// JSON report written when the output format is `json`.
#[derive(Debug, Serialize)]
pub struct CheckReport<'a> {
    pub status: StatusLevel,
    pub exit_code: i32,
    pub message: &'a str,
    pub performance_data: &'a [PerformanceDataPoint],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub checked_at: String,
}

/// Text to print and process exit code for an outcome.
pub fn render(outcome: &Outcome, format: OutputFormat, print_performance_data: bool) -> (String, i32) {
    let (response, error) = match outcome {
        Ok(response) => (response, None),
        Err(e) => (e.response(), Some(e.error().to_string())),
    };
    let text = match format {
        OutputFormat::Plugin => response.render(print_performance_data),
        OutputFormat::Json => render_json(response, error, print_performance_data),
    };
    (text, response.exit_code())
}

fn render_json(response: &Response, error: Option<String>, print_performance_data: bool) -> String {
    let performance_data: &[PerformanceDataPoint] = if print_performance_data {
        response.performance_data()
    } else {
        &[]
    };
    let report = CheckReport {
        status: response.status(),
        exit_code: response.exit_code(),
        message: response.message(),
        performance_data,
        error,
        checked_at: Utc::now().to_rfc3339(),
    };
    serde_json::to_string_pretty(&report).expect("CheckReport is always serialisable")
}
