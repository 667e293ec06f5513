//! Configuration errors.

use thiserror::Error;

/// A single constraint violated by a [`TooltipConfig`](super::TooltipConfig).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("opacityMax must be between 0.0 and 1.0 (got {0})")]
    OpacityOutOfRange(f64),

    #[error("fadeStepsPerSecond must be greater than zero")]
    ZeroFadeRate,

    #[error("{field} must be a finite number of seconds >= 0 (got {value})")]
    InvalidDuration { field: &'static str, value: f64 },

    #[error("{field} must be a finite number of pixels (got {value})")]
    InvalidOffset { field: &'static str, value: f64 },

    #[error("options are not valid JSON: {0}")]
    Parse(String),
}

/// Every violation found while validating a configuration.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("invalid tooltip options: {}", join(.0))]
pub struct ConfigErrors(pub Vec<ConfigError>);

impl ConfigErrors {
    pub fn iter(&self) -> impl Iterator<Item = &ConfigError> + '_ {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<ConfigError> for ConfigErrors {
    fn from(error: ConfigError) -> Self {
        Self(vec![error])
    }
}

fn join(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
