//! Opacity arithmetic for fade animations.
//!
//! The functions here are pure; the executor owns the mutable opacity.

use crate::config::TooltipConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Opacity values are rounded to the nearest `1 / OPACITY_SCALE` before any
/// comparison.
pub const OPACITY_SCALE: f64 = 1_000_000.0;

/// Round to the nearest millionth.
pub fn round_opacity(value: f64) -> f64 {
    (value * OPACITY_SCALE).round() / OPACITY_SCALE
}

/// Advance `current` by `delta`, clamped to `[0, max]`.
///
/// The sum is rounded first, so a run of equal increments lands exactly on
/// the bound instead of drifting just short of it. A non-zero `delta` always
/// moves by at least one rounding unit, so a fade too slow to register after
/// rounding still reaches its bound.
///
/// # Example
///
/// ```rust
/// use fadetip::core::fade::step;
///
/// let mut opacity = 0.0;
/// for _ in 0..10 {
///     opacity = step(opacity, 0.1, 1.0);
/// }
/// assert_eq!(opacity, 1.0);
/// assert_eq!(step(0.05, -0.1, 1.0), 0.0);
/// ```
pub fn step(current: f64, delta: f64, max: f64) -> f64 {
    let mut next = round_opacity(current + delta);
    let base = round_opacity(current);
    if delta != 0.0 && next == base {
        next = round_opacity(base + delta.signum() / OPACITY_SCALE);
    }
    if next.is_nan() || next < 0.0 {
        0.0
    } else if next > max {
        max
    } else {
        next
    }
}

/// Per-tick increments of one animation run.
///
/// Captured when the ticker starts so that option changes made mid-fade do
/// not alter the animation already in flight. A zero fade duration yields an
/// increment covering the whole range in a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FadeRates {
    pub max: f64,
    pub fade_in: f64,
    pub fade_out: f64,
    pub interval: Duration,
}

impl FadeRates {
    pub fn from_config(config: &TooltipConfig) -> Self {
        let steps = f64::from(config.fade_steps_per_second.max(1));
        let per_tick = |seconds: f64| {
            if seconds > 0.0 {
                config.opacity_max / (seconds * steps)
            } else {
                config.opacity_max
            }
        };
        Self {
            max: config.opacity_max,
            fade_in: per_tick(config.fade_in_seconds),
            fade_out: per_tick(config.fade_out_seconds),
            interval: Duration::from_secs_f64(1.0 / steps),
        }
    }
}
