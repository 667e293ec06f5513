//! Pure core of the tooltip state machine.
//!
//! This module contains everything that can be computed without touching a
//! timer or a render surface:
//! - Lifecycle phases via the `State` trait
//! - The event vocabulary
//! - Opacity arithmetic for fades
//! - Placement geometry
//! - Bounded transition history

pub mod fade;
pub mod placement;

mod event;
mod history;
mod state;

pub use event::{Event, EventKind, Point};
pub use fade::FadeRates;
pub use history::{StateHistory, StateTransition, DEFAULT_HISTORY_CAPACITY};
pub use placement::{compute_position, Offset, Placement, Rect, Size};
pub use state::{Phase, State};
