//! The imperative shell around the pure core.
//!
//! Rules in [`transition`] are pure: they read a [`Context`] and return a
//! [`Decision`]. [`Tooltip`] is the only place where decisions meet the
//! outside world, through two capabilities supplied by the host:
//!
//! - [`RenderSurface`] draws, moves, fades and removes the box
//! - [`TimerService`] schedules the pause/display timer and the fade ticker
//!
//! [`RecordingSurface`] and [`ManualTimers`] are headless implementations
//! for tests and for hosts that drive time themselves.

mod machine;
mod surface;
mod timer;
pub mod transition;

pub use machine::Tooltip;
pub use surface::{Content, RecordedBox, RecordingSurface, RenderSurface, SurfaceOp};
pub use timer::{Fired, ManualTimers, TimerHandle, TimerKind, TimerService};
pub use transition::{
    rules, Command, Context, Decision, Next, Rule, TransitionError, TransitionTable,
};
