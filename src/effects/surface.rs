//! Render surface the tooltip box is drawn on.
//!
//! Node creation, styling and measuring belong to the host; the executor
//! only drives a [`RenderSurface`] through create/opacity/move/destroy.

use crate::core::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Displayable payload of a tooltip.
///
/// The executor never inspects the payload; it hands it to the surface when
/// the box is created.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Content {
    /// Plain text.
    Text(String),
    /// Markup interpreted by the surface.
    Markup(String),
    /// An element the host already owns, referenced by id.
    Element(String),
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn markup(markup: impl Into<String>) -> Self {
        Self::Markup(markup.into())
    }

    pub fn element(id: impl Into<String>) -> Self {
        Self::Element(id.into())
    }
}

impl Default for Content {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) | Self::Markup(text) => f.write_str(text),
            Self::Element(id) => write!(f, "#{id}"),
        }
    }
}

/// Host-side drawing collaborator.
///
/// The executor is the only caller of `create` and `destroy`, and holds at
/// most one live handle at a time.
pub trait RenderSurface {
    /// Live box owned by the executor between `create` and `destroy`.
    type Handle;

    /// Create a box showing `content` at the given initial opacity.
    fn create(&mut self, content: &Content, opacity: f64) -> Self::Handle;

    fn set_opacity(&mut self, handle: &Self::Handle, opacity: f64);

    /// Place the box's top-left corner.
    fn move_to(&mut self, handle: &Self::Handle, at: Point);

    fn destroy(&mut self, handle: Self::Handle);

    /// Measured size of a created box.
    fn box_size(&self, handle: &Self::Handle) -> Size;

    /// Bounding rectangle of the surface the tooltip is attached to.
    fn anchor(&self) -> Rect;

    /// Visible area anchored boxes are clamped into.
    fn viewport(&self) -> Size;
}

/// One call made on a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SurfaceOp {
    Create { id: u64, content: Content, opacity: f64 },
    SetOpacity { id: u64, opacity: f64 },
    MoveTo { id: u64, at: Point },
    Destroy { id: u64 },
}

/// Headless surface that records every call.
///
/// Useful for tests and for hosts that render elsewhere and replay the
/// operation log.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    anchor: Rect,
    viewport: Size,
    box_size: Size,
    next_id: u64,
    live: Option<u64>,
    ops: Vec<SurfaceOp>,
}

/// Handle issued by [`RecordingSurface`].
#[derive(Debug, PartialEq, Eq)]
pub struct RecordedBox(u64);

impl RecordedBox {
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(
            Rect::new(100.0, 100.0, 120.0, 24.0),
            Size::new(1024.0, 768.0),
            Size::new(200.0, 40.0),
        )
    }
}

impl RecordingSurface {
    pub fn new(anchor: Rect, viewport: Size, box_size: Size) -> Self {
        Self {
            anchor,
            viewport,
            box_size,
            next_id: 1,
            live: None,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Id of the box currently shown, if any.
    pub fn live_box(&self) -> Option<u64> {
        self.live
    }

    /// Number of boxes created so far.
    pub fn created(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::Create { .. }))
            .count()
    }

    /// Last position the live box was moved to.
    pub fn position(&self) -> Option<Point> {
        let live = self.live?;
        self.ops.iter().rev().find_map(|op| match op {
            SurfaceOp::MoveTo { id, at } if *id == live => Some(*at),
            _ => None,
        })
    }

    /// Last opacity the live box was given.
    pub fn opacity(&self) -> Option<f64> {
        let live = self.live?;
        self.ops.iter().rev().find_map(|op| match op {
            SurfaceOp::SetOpacity { id, opacity } | SurfaceOp::Create { id, opacity, .. }
                if *id == live =>
            {
                Some(*opacity)
            }
            _ => None,
        })
    }
}

impl RenderSurface for RecordingSurface {
    type Handle = RecordedBox;

    fn create(&mut self, content: &Content, opacity: f64) -> RecordedBox {
        let id = self.next_id;
        self.next_id += 1;
        self.live = Some(id);
        self.ops.push(SurfaceOp::Create {
            id,
            content: content.clone(),
            opacity,
        });
        RecordedBox(id)
    }

    fn set_opacity(&mut self, handle: &RecordedBox, opacity: f64) {
        self.ops.push(SurfaceOp::SetOpacity {
            id: handle.0,
            opacity,
        });
    }

    fn move_to(&mut self, handle: &RecordedBox, at: Point) {
        self.ops.push(SurfaceOp::MoveTo { id: handle.0, at });
    }

    fn destroy(&mut self, handle: RecordedBox) {
        if self.live == Some(handle.0) {
            self.live = None;
        }
        self.ops.push(SurfaceOp::Destroy { id: handle.0 });
    }

    fn box_size(&self, _handle: &RecordedBox) -> Size {
        self.box_size
    }

    fn anchor(&self) -> Rect {
        self.anchor
    }

    fn viewport(&self) -> Size {
        self.viewport
    }
}
