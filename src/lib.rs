//! Fadetip: a delayed, fading tooltip modelled as a pure state machine
//!
//! The tooltip lifecycle is a five-phase machine. The pointer enters a
//! surface and rests there (`Pause`); the box fades in (`FadeIn`), stays
//! fully shown (`Display`), then fades out (`FadeOut`) back to `Inactive`.
//! Leaving and re-entering mid-fade reverses the fade from its current
//! opacity instead of restarting it.
//!
//! # Core Concepts
//!
//! - **Pure core**: `core` holds phases, events, fade arithmetic and
//!   placement geometry, all free of side effects
//! - **Rules**: each `(phase, event)` pair maps to a pure rule returning
//!   commands plus the next phase; missing pairs are unexpected events
//! - **Imperative shell**: [`Tooltip`] applies commands to a
//!   [`RenderSurface`](effects::RenderSurface) and a
//!   [`TimerService`](effects::TimerService) supplied by the host
//! - **Recovery**: unexpected events and undefined target phases are
//!   logged and reset the instance, never surfaced as errors
//!
//! # Example
//!
//! ```rust
//! use fadetip::builder::TooltipBuilder;
//! use fadetip::core::{Event, Phase};
//! use fadetip::effects::{ManualTimers, RecordingSurface};
//! use std::time::Duration;
//!
//! let mut tooltip = TooltipBuilder::new("help-icon")
//!     .content("Opens the help panel")
//!     .surface(RecordingSurface::default())
//!     .timers(ManualTimers::new())
//!     .build()
//!     .unwrap();
//!
//! tooltip.handle(Event::pointer_enter(40.0, 12.0));
//! assert_eq!(tooltip.phase(), Phase::Pause);
//!
//! tooltip.advance(Duration::from_millis(500));
//! assert_eq!(tooltip.phase(), Phase::FadeIn);
//! assert!(tooltip.is_visible());
//!
//! tooltip.handle(Event::pointer_leave(40.0, 12.0));
//! assert_eq!(tooltip.phase(), Phase::FadeOut);
//! ```

pub mod adapter;
pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod core;
pub mod effects;
pub mod registry;
#[cfg(feature = "runtime")]
pub mod runtime;

// Re-export commonly used types
pub use builder::{BuildError, TooltipBuilder};
pub use config::{OptionsPatch, TooltipConfig};
pub use core::{Event, Phase, State};
pub use effects::{Content, Tooltip};
