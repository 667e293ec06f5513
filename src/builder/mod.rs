//! Builder API for ergonomic tooltip construction.
//!
//! [`TooltipBuilder`] collects the surface identity, content, options and
//! host collaborators, validates the options once and produces a ready
//! [`Tooltip`](crate::effects::Tooltip). The [`state_enum!`](crate::state_enum)
//! macro generates the `State` impl for phase enums.

pub mod error;
pub mod macros;
pub mod tooltip;

pub use error::BuildError;
pub use tooltip::TooltipBuilder;
