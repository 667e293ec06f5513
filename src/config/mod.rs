//! Tooltip options.
//!
//! A [`TooltipConfig`] is immutable per instance and replaced wholesale;
//! hosts describe changes as an [`OptionsPatch`] that is merged over the
//! current options and validated before it takes effect.
//!
//! Validation uses Stillwater's `Validation` so that every violated
//! constraint is reported at once instead of only the first.
//!
//! # Example
//!
//! ```rust
//! use fadetip::config::{OptionsPatch, TooltipConfig};
//! use fadetip::core::Placement;
//!
//! let config = TooltipConfig::from_json(r#"{"fadeInSeconds": 0, "placementMode": "top"}"#)
//!     .unwrap();
//! assert_eq!(config.fade_in_seconds, 0.0);
//! assert_eq!(config.placement, Placement::Top);
//! assert_eq!(config.pause_seconds, 0.5);
//!
//! let patch = OptionsPatch {
//!     opacity_max: Some(2.0),
//!     fade_steps_per_second: Some(0),
//!     ..OptionsPatch::default()
//! };
//! let errors = config.merged(&patch).validated().unwrap_err();
//! assert_eq!(errors.len(), 2);
//! ```

mod error;

pub use error::{ConfigError, ConfigErrors};

use crate::core::{Offset, Placement};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Options of a single tooltip instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TooltipConfig {
    /// Opacity once fade-in finishes, between 0.0 and 1.0.
    pub opacity_max: f64,
    /// Horizontal distance between pointer (or anchor) and box.
    pub offset_x: f64,
    /// Vertical distance between pointer (or anchor) and box.
    pub offset_y: f64,
    /// Animation rate for both fades.
    pub fade_steps_per_second: u32,
    /// How long the pointer must rest before fade-in starts.
    pub pause_seconds: f64,
    /// How long the box stays fully shown.
    pub display_seconds: f64,
    pub fade_in_seconds: f64,
    pub fade_out_seconds: f64,
    #[serde(rename = "placementMode")]
    pub placement: Placement,
    /// Log and record every committed transition.
    pub trace_enabled: bool,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            opacity_max: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            fade_steps_per_second: 24,
            pause_seconds: 0.5,
            display_seconds: 10.0,
            fade_in_seconds: 1.0,
            fade_out_seconds: 3.0,
            placement: Placement::Hover,
            trace_enabled: false,
        }
    }
}

impl TooltipConfig {
    /// Parse options from a JSON object; missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigErrors> {
        let patch = OptionsPatch::from_json(json)?;
        Self::default().merged(&patch).validated()
    }

    /// Return a copy with every `Some` field of `patch` applied.
    pub fn merged(&self, patch: &OptionsPatch) -> Self {
        Self {
            opacity_max: patch.opacity_max.unwrap_or(self.opacity_max),
            offset_x: patch.offset_x.unwrap_or(self.offset_x),
            offset_y: patch.offset_y.unwrap_or(self.offset_y),
            fade_steps_per_second: patch
                .fade_steps_per_second
                .unwrap_or(self.fade_steps_per_second),
            pause_seconds: patch.pause_seconds.unwrap_or(self.pause_seconds),
            display_seconds: patch.display_seconds.unwrap_or(self.display_seconds),
            fade_in_seconds: patch.fade_in_seconds.unwrap_or(self.fade_in_seconds),
            fade_out_seconds: patch.fade_out_seconds.unwrap_or(self.fade_out_seconds),
            placement: patch.placement.unwrap_or(self.placement),
            trace_enabled: patch.trace_enabled.unwrap_or(self.trace_enabled),
        }
    }

    /// Check every constraint, accumulating all violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigError>>> = Vec::new();

        checks.push(
            if self.opacity_max.is_finite() && (0.0..=1.0).contains(&self.opacity_max) {
                Validation::success(())
            } else {
                Validation::fail(ConfigError::OpacityOutOfRange(self.opacity_max))
            },
        );

        checks.push(if self.fade_steps_per_second > 0 {
            Validation::success(())
        } else {
            Validation::fail(ConfigError::ZeroFadeRate)
        });

        for (field, value) in [("offsetX", self.offset_x), ("offsetY", self.offset_y)] {
            checks.push(if value.is_finite() {
                Validation::success(())
            } else {
                Validation::fail(ConfigError::InvalidOffset { field, value })
            });
        }

        for (field, value) in [
            ("pauseSeconds", self.pause_seconds),
            ("displaySeconds", self.display_seconds),
            ("fadeInSeconds", self.fade_in_seconds),
            ("fadeOutSeconds", self.fade_out_seconds),
        ] {
            checks.push(if value.is_finite() && value >= 0.0 {
                Validation::success(())
            } else {
                Validation::fail(ConfigError::InvalidDuration { field, value })
            });
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Validate and hand the config back, or every violation found.
    pub fn validated(self) -> Result<Self, ConfigErrors> {
        match self.validate() {
            Validation::Success(_) => Ok(self),
            Validation::Failure(errors) => Err(ConfigErrors(errors.iter().cloned().collect())),
        }
    }

    pub fn offset(&self) -> Offset {
        Offset {
            x: self.offset_x,
            y: self.offset_y,
        }
    }

    pub fn pause(&self) -> Duration {
        seconds(self.pause_seconds)
    }

    pub fn display(&self) -> Duration {
        seconds(self.display_seconds)
    }
}

/// Negative and NaN inputs map to zero; anything too large saturates.
fn seconds(value: f64) -> Duration {
    match Duration::try_from_secs_f64(value) {
        Ok(duration) => duration,
        Err(_) if value > 0.0 => Duration::MAX,
        Err(_) => Duration::ZERO,
    }
}

/// A partial set of options, merged over an existing [`TooltipConfig`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OptionsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fade_steps_per_second: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pause_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fade_in_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fade_out_seconds: Option<f64>,
    #[serde(rename = "placementMode", skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_enabled: Option<bool>,
}

impl OptionsPatch {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<TooltipConfig> for OptionsPatch {
    fn from(config: TooltipConfig) -> Self {
        Self {
            opacity_max: Some(config.opacity_max),
            offset_x: Some(config.offset_x),
            offset_y: Some(config.offset_y),
            fade_steps_per_second: Some(config.fade_steps_per_second),
            pause_seconds: Some(config.pause_seconds),
            display_seconds: Some(config.display_seconds),
            fade_in_seconds: Some(config.fade_in_seconds),
            fade_out_seconds: Some(config.fade_out_seconds),
            placement: Some(config.placement),
            trace_enabled: Some(config.trace_enabled),
        }
    }
}
