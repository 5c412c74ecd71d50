use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{AppError, Result};
use crate::reconciler::renderer::DEFAULT_CA_FILE_PATH;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "compact" | "" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::ConfigurationError(format!(
                "OPERATOR_LOG_FORMAT must be 'compact' or 'json', got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorConfig {
    /// Overrides the namespace named by the snapshot
    pub namespace: Option<String>,
    pub cluster: Option<String>,
    pub snapshot_path: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub ca_file_path: String,
    pub log_format: LogFormat,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            namespace: None,
            cluster: None,
            snapshot_path: None,
            output_dir: None,
            ca_file_path: DEFAULT_CA_FILE_PATH.to_string(),
            log_format: LogFormat::Compact,
        }
    }
}

fn non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

impl OperatorConfig {
    /// Read the operator settings from the environment, after loading `.env`
    pub fn init() -> Result<OperatorConfig> {
        dotenv::dotenv().ok();
        Self::from_lookup(non_empty)
    }

    /// Build from any variable lookup; unset and blank values take defaults
    pub fn from_lookup<F>(lookup: F) -> Result<OperatorConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = OperatorConfig::default();

        let log_format = match lookup("OPERATOR_LOG_FORMAT") {
            Some(value) => value.parse::<LogFormat>()?,
            None => defaults.log_format,
        };

        Ok(OperatorConfig {
            namespace: lookup("OPERATOR_NAMESPACE"),
            cluster: lookup("OPERATOR_CLUSTER"),
            snapshot_path: lookup("OPERATOR_SNAPSHOT_PATH").map(PathBuf::from),
            output_dir: lookup("OPERATOR_OUTPUT_DIR").map(PathBuf::from),
            ca_file_path: lookup("OPERATOR_CA_FILE_PATH").unwrap_or(defaults.ca_file_path),
            log_format,
        })
    }
}
