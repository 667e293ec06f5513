//! Raw host notifications to typed events.
//!
//! Hosts report pointer activity and timer expiry by name, the way DOM-like
//! event systems do. [`translate`] maps those names onto [`Event`], so the
//! executor only ever sees the five kinds it has rules for.

use crate::core::{Event, EventKind, Point};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdapterError {
    #[error("unknown event name \"{0}\"")]
    UnknownEvent(String),

    #[error("pointer position ({x}, {y}) is not finite")]
    InvalidPosition { x: f64, y: f64 },
}

/// Notification names accepted for each kind, compared case-insensitively.
const NAMES: &[(&str, EventKind)] = &[
    ("mouseenter", EventKind::PointerEnter),
    ("pointerenter", EventKind::PointerEnter),
    ("mouseover", EventKind::PointerEnter),
    ("mousemove", EventKind::PointerMove),
    ("pointermove", EventKind::PointerMove),
    ("mouseleave", EventKind::PointerLeave),
    ("pointerleave", EventKind::PointerLeave),
    ("mouseout", EventKind::PointerLeave),
    ("timeout", EventKind::Timeout),
    ("timetick", EventKind::Tick),
    ("tick", EventKind::Tick),
];

impl FromStr for EventKind {
    type Err = AdapterError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        NAMES
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
            .map(|(_, kind)| *kind)
            .ok_or_else(|| AdapterError::UnknownEvent(name.to_string()))
    }
}

/// Build the event for a raw notification.
///
/// The position is only kept for pointer notifications; timer notifications
/// ignore it.
///
/// # Example
///
/// ```rust
/// use fadetip::adapter::translate;
/// use fadetip::core::{Event, Point};
///
/// assert_eq!(
///     translate("mouseover", 4.0, 2.0).unwrap(),
///     Event::PointerEnter(Point::new(4.0, 2.0))
/// );
/// assert_eq!(translate("timetick", 0.0, 0.0).unwrap(), Event::Tick);
/// assert!(translate("click", 0.0, 0.0).is_err());
/// ```
pub fn translate(name: &str, x: f64, y: f64) -> Result<Event, AdapterError> {
    let kind: EventKind = name.parse()?;
    match kind {
        EventKind::Timeout => Ok(Event::Timeout),
        EventKind::Tick => Ok(Event::Tick),
        _ => {
            if !(x.is_finite() && y.is_finite()) {
                return Err(AdapterError::InvalidPosition { x, y });
            }
            Event::pointer(kind, Point::new(x, y))
                .ok_or_else(|| AdapterError::UnknownEvent(name.to_string()))
        }
    }
}
