//! Runtime settings loaded from YAML and environment variables.
//!
//! Settings are parsed with `serde_yaml`, checked with `validator` range
//! rules, then checked again for constraints the derive cannot express
//! (log level names). Environment variables override file values:
//!
//! | Variable           | Field                 |
//! |--------------------|-----------------------|
//! | `KINEMA_ENV`       | `environment`         |
//! | `KINEMA_LOG_LEVEL` | `logging.level`       |
//! | `KINEMA_LOG_FILE`  | `logging.file`        |
//! | `KINEMA_TOLERANCE` | `numerics.tolerance`  |

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Level;
use validator::Validate;

use crate::constants::DEFAULT_TOLERANCE;

/// Errors raised while loading settings or installing a log subscriber.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading a settings or log file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// The YAML document is malformed or has unexpected fields.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// A field is outside its allowed range.
    #[error("invalid settings: {0}")]
    Validation(#[from] validator::ValidationErrors),
    /// The log level is not one of `trace`, `debug`, `info`, `warn`, `error`.
    #[error("unknown log level `{0}`")]
    UnknownLevel(String),
    /// An environment override could not be parsed.
    #[error("invalid value `{value}` for {key}")]
    InvalidValue {
        /// Variable name.
        key: &'static str,
        /// Offending value.
        value: String,
    },
    /// A process-wide subscriber was already installed.
    #[error("a global log subscriber is already installed")]
    GlobalSubscriber(#[from] tracing::dispatcher::SetGlobalDefaultError),
}

/// Deployment environment, which picks the default log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Quiet defaults (`info`).
    #[default]
    Production,
    /// Verbose defaults (`debug`).
    Development,
    /// Verbose defaults (`debug`).
    Testing,
}

impl Environment {
    /// Level used when the settings do not name one.
    #[must_use]
    pub const fn default_level(self) -> Level {
        match self {
            Self::Production => Level::INFO,
            Self::Development | Self::Testing => Level::DEBUG,
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "development" | "dev" => Ok(Self::Development),
            "testing" | "test" => Ok(Self::Testing),
            _ => Err(ConfigError::InvalidValue { key: "KINEMA_ENV", value: s.to_owned() }),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Production => "production",
            Self::Development => "development",
            Self::Testing => "testing",
        })
    }
}

/// Where and how verbosely to log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LoggingSettings {
    /// Explicit level; falls back to the environment's default.
    #[serde(default)]
    pub level: Option<String>,
    /// Log file; parent directories are created on demand. Stdout when unset.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl LoggingSettings {
    /// Resolves the level to log at in `environment`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownLevel`] for an unrecognised level name.
    pub fn effective_level(&self, environment: Environment) -> Result<Level, ConfigError> {
        self.level.as_deref().map_or(Ok(environment.default_level()), parse_level)
    }
}

/// Parses a case-insensitive level name.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownLevel`] for anything but the five level names.
pub fn parse_level(name: &str) -> Result<Level, ConfigError> {
    match name.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(ConfigError::UnknownLevel(name.to_owned())),
    }
}

/// Numerical thresholds for the inverse solvers, see [`crate::inverse::InverseSolver::from_settings`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct NumericSettings {
    /// Absolute tolerance for treating a coefficient as zero.
    #[validate(range(min = 1.0e-15, max = 0.1))]
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

const fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

impl Default for NumericSettings {
    fn default() -> Self {
        Self { tolerance: default_tolerance() }
    }
}

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Deployment environment.
    #[serde(default)]
    pub environment: Environment,
    /// Logging settings.
    #[validate(nested)]
    #[serde(default)]
    pub logging: LoggingSettings,
    /// Solver thresholds.
    #[validate(nested)]
    #[serde(default)]
    pub numerics: NumericSettings,
}

impl Settings {
    /// Loads settings from a YAML file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, parsed or validated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parses and validates settings from a YAML string.
    ///
    /// # Errors
    ///
    /// Fails if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        settings.validate_semantic()?;
        Ok(settings)
    }

    /// Defaults overridden by the process environment.
    ///
    /// # Errors
    ///
    /// Fails if an override cannot be parsed or breaks validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(std::env::vars())
    }

    /// Defaults overridden by an explicit key/value source.
    ///
    /// # Errors
    ///
    /// Fails if an override cannot be parsed or breaks validation.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self::default().with_overrides(vars)
    }

    /// Applies `KINEMA_*` overrides on top of `self`; other keys are ignored.
    ///
    /// # Errors
    ///
    /// Fails if an override cannot be parsed or breaks validation.
    pub fn with_overrides<I, K, V>(mut self, vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            let value = value.as_ref();
            match key.as_ref() {
                "KINEMA_ENV" => self.environment = value.parse()?,
                "KINEMA_LOG_LEVEL" => self.logging.level = Some(value.to_owned()),
                "KINEMA_LOG_FILE" => self.logging.file = Some(PathBuf::from(value)),
                "KINEMA_TOLERANCE" => {
                    self.numerics.tolerance = value.trim().parse().map_err(|_| {
                        ConfigError::InvalidValue { key: "KINEMA_TOLERANCE", value: value.to_owned() }
                    })?;
                }
                _ => {}
            }
        }
        self.validate()?;
        self.validate_semantic()?;
        Ok(self)
    }

    /// Log level after applying the environment default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownLevel`] for an unrecognised level name.
    pub fn log_level(&self) -> Result<Level, ConfigError> {
        self.logging.effective_level(self.environment)
    }

    fn validate_semantic(&self) -> Result<(), ConfigError> {
        self.log_level()?;
        Ok(())
    }
}
