//! Where a tooltip box goes when it is created.
//!
//! [`compute_position`] is pure: the render surface supplies the anchor
//! rectangle, the measured box size and the viewport, and receives the
//! top-left corner back.

use super::event::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placement policy for the tooltip box.
///
/// `Hover` follows the pointer; the other modes anchor the box to the
/// surface's bounding rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    #[default]
    Hover,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Placement {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hover => "hover",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
        }
    }

    pub fn follows_pointer(&self) -> bool {
        matches!(self, Self::Hover)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Width and height in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle in surface coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Pixel distance between the pointer or anchor and the box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

/// Compute the top-left corner of the box.
///
/// `Hover` returns the pointer plus the offset and is not clamped. Anchored
/// modes position the box around `anchor` and clamp it into `viewport`.
/// Coordinates are rounded to two decimals.
pub fn compute_position(
    placement: Placement,
    pointer: Point,
    anchor: Rect,
    size: Size,
    offset: Offset,
    viewport: Size,
) -> Point {
    let centered_x = anchor.left + (anchor.width - size.width) / 2.0;
    let centered_y = anchor.top + (anchor.height - size.height) / 2.0;
    let before_x = anchor.left - size.width - offset.x;
    let after_x = anchor.right() + offset.x;
    let above = anchor.top - size.height - offset.y;
    let below = anchor.bottom() + offset.y;

    let (left, top) = match placement {
        Placement::Hover => {
            return Point::new(
                round_px(pointer.x + offset.x),
                round_px(pointer.y + offset.y),
            );
        }
        Placement::Top => (centered_x, above),
        Placement::Bottom => (centered_x, below),
        Placement::Left => (before_x, centered_y),
        Placement::Right => (after_x, centered_y),
        Placement::TopLeft => (before_x, above),
        Placement::TopRight => (after_x, above),
        Placement::BottomLeft => (before_x, below),
        Placement::BottomRight => (after_x, below),
    };

    let left = left.min(viewport.width - size.width).max(0.0);
    let top = top.min(viewport.height - size.height).max(0.0);
    Point::new(round_px(left), round_px(top))
}

fn round_px(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(800.0, 600.0);
    const BOX: Size = Size::new(100.0, 40.0);
    const ANCHOR: Rect = Rect::new(300.0, 200.0, 60.0, 20.0);

    fn place(placement: Placement) -> Point {
        compute_position(
            placement,
            Point::new(310.0, 205.0),
            ANCHOR,
            BOX,
            Offset { x: 5.0, y: 8.0 },
            VIEWPORT,
        )
    }

    #[test]
    fn hover_follows_pointer_with_offset() {
        assert_eq!(place(Placement::Hover), Point::new(315.0, 213.0));
    }

    #[test]
    fn hover_is_not_clamped() {
        let at = compute_position(
            Placement::Hover,
            Point::new(790.0, 590.0),
            ANCHOR,
            BOX,
            Offset::default(),
            VIEWPORT,
        );
        assert_eq!(at, Point::new(790.0, 590.0));
    }

    #[test]
    fn top_and_bottom_center_horizontally() {
        assert_eq!(place(Placement::Top), Point::new(280.0, 152.0));
        assert_eq!(place(Placement::Bottom), Point::new(280.0, 228.0));
    }

    #[test]
    fn left_and_right_center_vertically() {
        assert_eq!(place(Placement::Left), Point::new(195.0, 190.0));
        assert_eq!(place(Placement::Right), Point::new(365.0, 190.0));
    }

    #[test]
    fn corner_modes_combine_edges() {
        assert_eq!(place(Placement::TopLeft), Point::new(195.0, 152.0));
        assert_eq!(place(Placement::TopRight), Point::new(365.0, 152.0));
        assert_eq!(place(Placement::BottomLeft), Point::new(195.0, 228.0));
        assert_eq!(place(Placement::BottomRight), Point::new(365.0, 228.0));
    }

    #[test]
    fn anchored_modes_clamp_into_viewport() {
        let anchor = Rect::new(0.0, 0.0, 30.0, 30.0);
        let at = compute_position(
            Placement::TopLeft,
            Point::default(),
            anchor,
            BOX,
            Offset::default(),
            VIEWPORT,
        );
        assert_eq!(at, Point::new(0.0, 0.0));

        let anchor = Rect::new(780.0, 580.0, 20.0, 20.0);
        let at = compute_position(
            Placement::BottomRight,
            Point::default(),
            anchor,
            BOX,
            Offset::default(),
            VIEWPORT,
        );
        assert_eq!(at, Point::new(700.0, 560.0));
    }

    #[test]
    fn placement_names_are_kebab_case() {
        let json = serde_json::to_string(&Placement::BottomLeft).unwrap();
        assert_eq!(json, "\"bottom-left\"");
        assert_eq!(Placement::TopRight.to_string(), "top-right");
        let parsed: Placement = serde_json::from_str("\"top-left\"").unwrap();
        assert_eq!(parsed, Placement::TopLeft);
    }
}
