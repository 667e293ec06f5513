//! Build errors for the tooltip builder.

use crate::config::ConfigErrors;
use thiserror::Error;

/// Errors that can occur when building a tooltip.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Render surface not specified. Call .surface(surface) before .build()")]
    MissingSurface,

    #[error("Timer service not specified. Call .timers(timers) before .build()")]
    MissingTimers,

    #[error("Tooltip for {0} has neither content nor a title to fall back to")]
    MissingContent(String),

    #[error(transparent)]
    InvalidConfig(#[from] ConfigErrors),
}
