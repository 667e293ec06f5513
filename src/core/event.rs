//! Events consumed by the tooltip state machine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A pointer position in surface coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by an offset.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// The event vocabulary of the state machine, without payload.
///
/// Transition tables are keyed by `(Phase, EventKind)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    PointerEnter,
    PointerMove,
    PointerLeave,
    /// The one-shot timer fired.
    Timeout,
    /// The repeating animation ticker fired.
    Tick,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::PointerEnter,
        EventKind::PointerMove,
        EventKind::PointerLeave,
        EventKind::Timeout,
        EventKind::Tick,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::PointerEnter => "PointerEnter",
            Self::PointerMove => "PointerMove",
            Self::PointerLeave => "PointerLeave",
            Self::Timeout => "Timeout",
            Self::Tick => "Tick",
        }
    }

    pub fn is_pointer(&self) -> bool {
        matches!(
            self,
            Self::PointerEnter | Self::PointerMove | Self::PointerLeave
        )
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An event delivered to [`Tooltip::handle`](crate::effects::Tooltip::handle).
///
/// Pointer events always carry the pointer position; timer events never do.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    PointerEnter(Point),
    PointerMove(Point),
    PointerLeave(Point),
    Timeout,
    Tick,
}

impl Event {
    pub fn pointer_enter(x: f64, y: f64) -> Self {
        Self::PointerEnter(Point::new(x, y))
    }

    pub fn pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove(Point::new(x, y))
    }

    pub fn pointer_leave(x: f64, y: f64) -> Self {
        Self::PointerLeave(Point::new(x, y))
    }

    /// Build a pointer event of the given kind. Returns `None` for timer kinds.
    pub fn pointer(kind: EventKind, at: Point) -> Option<Self> {
        match kind {
            EventKind::PointerEnter => Some(Self::PointerEnter(at)),
            EventKind::PointerMove => Some(Self::PointerMove(at)),
            EventKind::PointerLeave => Some(Self::PointerLeave(at)),
            EventKind::Timeout | EventKind::Tick => None,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Self::PointerEnter(_) => EventKind::PointerEnter,
            Self::PointerMove(_) => EventKind::PointerMove,
            Self::PointerLeave(_) => EventKind::PointerLeave,
            Self::Timeout => EventKind::Timeout,
            Self::Tick => EventKind::Tick,
        }
    }

    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerEnter(at) | Self::PointerMove(at) | Self::PointerLeave(at) => Some(*at),
            Self::Timeout | Self::Tick => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_events_carry_position() {
        let event = Event::pointer_move(3.0, 4.5);
        assert_eq!(event.kind(), EventKind::PointerMove);
        assert_eq!(event.position(), Some(Point::new(3.0, 4.5)));
    }

    #[test]
    fn timer_events_have_no_position() {
        assert_eq!(Event::Timeout.position(), None);
        assert_eq!(Event::Tick.position(), None);
        assert!(!Event::Tick.kind().is_pointer());
    }

    #[test]
    fn pointer_constructor_rejects_timer_kinds() {
        let at = Point::new(1.0, 1.0);
        assert_eq!(
            Event::pointer(EventKind::PointerLeave, at),
            Some(Event::PointerLeave(at))
        );
        assert_eq!(Event::pointer(EventKind::Timeout, at), None);
    }

    #[test]
    fn every_kind_has_a_distinct_name() {
        let mut names: Vec<_> = EventKind::ALL.iter().map(|k| k.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), EventKind::ALL.len());
    }

    #[test]
    fn point_offset_translates() {
        assert_eq!(Point::new(10.0, 20.0).offset(5.0, -2.0), Point::new(15.0, 18.0));
    }
}
