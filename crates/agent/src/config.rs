use std::path::PathBuf;
use std::str::FromStr;

/// How the check result is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Single-line monitoring plugin text.
    Plugin,
    /// JSON report.
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plugin" => Ok(OutputFormat::Plugin),
            "json" => Ok(OutputFormat::Json),
            other => Err(ConfigError::Invalid {
                var: VAR_OUTPUT,
                value: other.to_string(),
            }),
        }
    }
}

const VAR_DEVICE_ADDRESS: &str = "HWCHECK_DEVICE_ADDRESS";
const VAR_TIMEOUT_SECS: &str = "HWCHECK_TIMEOUT_SECS";
const VAR_SNAPSHOT_DIR: &str = "HWCHECK_SNAPSHOT_DIR";
const VAR_OUTPUT: &str = "HWCHECK_OUTPUT";
const VAR_PRINT_PERFDATA: &str = "HWCHECK_PRINT_PERFDATA";

const DEFAULT_SNAPSHOT_DIR: &str = "snapshots";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{var} has an invalid value: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Agent configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    pub device_address: String,
    pub timeout_secs: Option<u64>,
    pub snapshot_dir: PathBuf,
    pub output: OutputFormat,
    pub print_performance_data: bool,
}

impl AgentConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                  | Default     |
    /// |--------------------------|-------------|
    /// | `HWCHECK_DEVICE_ADDRESS` | (required)  |
    /// | `HWCHECK_TIMEOUT_SECS`   | unset       |
    /// | `HWCHECK_SNAPSHOT_DIR`   | `snapshots` |
    /// | `HWCHECK_OUTPUT`         | `plugin`    |
    /// | `HWCHECK_PRINT_PERFDATA` | `true`      |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let device_address = lookup(VAR_DEVICE_ADDRESS)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing(VAR_DEVICE_ADDRESS))?;

        let timeout_secs = lookup(VAR_TIMEOUT_SECS)
            .map(|v| {
                v.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                    var: VAR_TIMEOUT_SECS,
                    value: v.clone(),
                })
            })
            .transpose()?;

        let snapshot_dir = lookup(VAR_SNAPSHOT_DIR)
            .unwrap_or_else(|| DEFAULT_SNAPSHOT_DIR.to_string())
            .into();

        let output = lookup(VAR_OUTPUT)
            .map(|v| v.parse::<OutputFormat>())
            .transpose()?
            .unwrap_or(OutputFormat::Plugin);

        let print_performance_data = match lookup(VAR_PRINT_PERFDATA) {
            None => true,
            Some(v) => parse_bool(&v).ok_or(ConfigError::Invalid {
                var: VAR_PRINT_PERFDATA,
                value: v,
            })?,
        };

        Ok(Self {
            device_address: device_address.trim().to_string(),
            timeout_secs,
            snapshot_dir,
            output,
            print_performance_data,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AgentConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AgentConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = load(&[(VAR_DEVICE_ADDRESS, "10.0.0.1")]).unwrap();
        assert_eq!(cfg.device_address, "10.0.0.1");
        assert_eq!(cfg.timeout_secs, None);
        assert_eq!(cfg.snapshot_dir, PathBuf::from("snapshots"));
        assert_eq!(cfg.output, OutputFormat::Plugin);
        assert!(cfg.print_performance_data);
    }

    #[test]
    fn address_is_required() {
        assert_eq!(load(&[]), Err(ConfigError::Missing(VAR_DEVICE_ADDRESS)));
        assert_eq!(
            load(&[(VAR_DEVICE_ADDRESS, " ")]),
            Err(ConfigError::Missing(VAR_DEVICE_ADDRESS))
        );
    }

    #[test]
    fn reads_all_variables() {
        let cfg = load(&[
            (VAR_DEVICE_ADDRESS, "10.0.0.9"),
            (VAR_TIMEOUT_SECS, "15"),
            (VAR_SNAPSHOT_DIR, "/var/lib/hwcheck"),
            (VAR_OUTPUT, "JSON"),
            (VAR_PRINT_PERFDATA, "off"),
        ])
        .unwrap();
        assert_eq!(cfg.timeout_secs, Some(15));
        assert_eq!(cfg.snapshot_dir, PathBuf::from("/var/lib/hwcheck"));
        assert_eq!(cfg.output, OutputFormat::Json);
        assert!(!cfg.print_performance_data);
    }

    #[test]
    fn rejects_invalid_values() {
        assert_eq!(
            load(&[(VAR_DEVICE_ADDRESS, "10.0.0.1"), (VAR_TIMEOUT_SECS, "soon")]),
            Err(ConfigError::Invalid {
                var: VAR_TIMEOUT_SECS,
                value: "soon".into()
            })
        );
        assert!(load(&[(VAR_DEVICE_ADDRESS, "10.0.0.1"), (VAR_OUTPUT, "xml")]).is_err());
        assert!(load(&[(VAR_DEVICE_ADDRESS, "10.0.0.1"), (VAR_PRINT_PERFDATA, "maybe")]).is_err());
    }
}
