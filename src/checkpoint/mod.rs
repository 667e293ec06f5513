//! Point-in-time snapshots of a tooltip instance.
//!
//! A [`Snapshot`] captures everything observable about an instance: phase,
//! opacity, timer activity, options, content and the traced history. It
//! does not capture the transition table (rules are closures) nor the live
//! timers themselves, so it is a diagnostic record rather than a way to
//! resume a fade mid-flight.
//!
//! # Example
//!
//! ```rust
//! use fadetip::builder::TooltipBuilder;
//! use fadetip::checkpoint::Snapshot;
//! use fadetip::core::{Event, Phase};
//! use fadetip::effects::{ManualTimers, RecordingSurface};
//!
//! let mut tooltip = TooltipBuilder::new("help")
//!     .content("Saves the document")
//!     .surface(RecordingSurface::default())
//!     .timers(ManualTimers::new())
//!     .build()
//!     .unwrap();
//! tooltip.handle(Event::pointer_enter(3.0, 4.0));
//!
//! let bytes = tooltip.snapshot().to_bytes().unwrap();
//! let restored = Snapshot::from_bytes(&bytes).unwrap();
//! assert_eq!(restored.phase, Phase::Pause);
//! assert!(restored.timer_active);
//! ```

use crate::config::TooltipConfig;
use crate::core::{Phase, Point, StateHistory};
use crate::effects::{Content, RenderSurface, TimerService, Tooltip};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::SnapshotError;

/// Version identifier for the snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable view of one tooltip instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot format version
    pub version: u32,

    /// Instance the snapshot was taken from
    pub instance: Uuid,

    /// Surface the instance is attached to
    pub surface: String,

    pub taken_at: DateTime<Utc>,

    pub phase: Phase,
    pub opacity: f64,
    pub visible: bool,
    pub timer_active: bool,
    pub ticker_active: bool,

    /// Last pointer position recorded while waiting to show
    pub pointer: Point,

    pub config: TooltipConfig,
    pub content: Content,

    /// Transitions recorded while tracing was enabled
    pub history: StateHistory<Phase>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Decode a JSON snapshot, rejecting unknown format versions.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Decode a binary snapshot, rejecting unknown format versions.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()
    }

    fn check_version(self) -> Result<Self, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(self)
    }
}

impl<R: RenderSurface, T: TimerService> Tooltip<R, T> {
    /// Capture the observable state of this instance.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            instance: self.id(),
            surface: self.surface_id().to_string(),
            taken_at: Utc::now(),
            phase: self.phase(),
            opacity: self.opacity(),
            visible: self.is_visible(),
            timer_active: self.timer_active(),
            ticker_active: self.ticker_active(),
            pointer: self.pointer(),
            config: self.options().clone(),
            content: self.content().clone(),
            history: self.history().clone(),
        }
    }
}
