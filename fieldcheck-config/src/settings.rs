// Runtime settings read from the environment

use crate::env::EnvLoader;
use crate::{ConfigError, Result};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::Level;

/// Prefix of every recognised environment variable
pub const ENV_PREFIX: &str = "FIELDCHECK";

/// How reports are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    #[default]
    Pretty,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "pretty" => Ok(OutputFormat::Pretty),
            _ => Err(ConfigError::InvalidSetting {
                key: "output".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Pretty => write!(f, "pretty"),
        }
    }
}

/// Settings for the command-line front end.
///
/// `FIELDCHECK_LOG_LEVEL` sets the default log level, `FIELDCHECK_OUTPUT`
/// the report format (`json` or `pretty`). An output format chosen by the
/// caller takes precedence, and the variable is then not parsed at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log_level: Level,
    pub output: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: Level::WARN,
            output: OutputFormat::default(),
        }
    }
}

impl Settings {
    /// Read settings from the process environment
    pub fn from_env(output: Option<OutputFormat>) -> Result<Self> {
        Self::from_vars(&EnvLoader::with_prefix(ENV_PREFIX).load(), output)
    }

    /// Prime the environment from a `.env` file, then read settings.
    ///
    /// Without a path a `.env` in the working directory is used if present.
    pub fn load(dotenv: Option<&Path>, output: Option<OutputFormat>) -> Result<Self> {
        match dotenv {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
            }
            None => {
                dotenvy::dotenv().ok();
            }
        }
        Self::from_env(output)
    }

    /// Build settings from prefix-stripped, lowercased variables
    pub fn from_vars(
        vars: &HashMap<String, String>,
        output: Option<OutputFormat>,
    ) -> Result<Self> {
        let mut settings = Self::default();

        if let Some(level) = vars.get("log_level") {
            settings.log_level =
                Level::from_str(level.trim()).map_err(|_| ConfigError::InvalidSetting {
                    key: "log_level".to_string(),
                    value: level.clone(),
                })?;
        }
        match (output, vars.get("output")) {
            (Some(output), _) => settings.output = output,
            (None, Some(output)) => settings.output = output.parse()?,
            (None, None) => {}
        }

        Ok(settings)
    }
}
