#![forbid(unsafe_code)]

//! Edge collision codes and sticky clamping.
//!
//! A candidate box is compared against its container's edges and the result
//! packed into four bits, most significant first: top, right, bottom, left.
//! Each axis is then resolved independently:
//!
//! | Violated on axis | Coordinate | Anchor |
//! |------------------|------------|--------|
//! | nothing | candidate | advances to the pointer |
//! | low edge (top/left) | `0` | held |
//! | high edge (bottom/right) | `container - element - 1` (never below 0) | held |
//! | both (element larger than container) | `0` | held |
//!
//! Holding the anchor is what makes the clamp sticky: while the pointer is
//! past an edge the computed delta keeps pointing outside, and free movement
//! resumes only after the pointer comes back across the bound.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use sortrow_core::geometry::{Point, Rect, Size};

bitflags! {
    /// Which container edges a candidate box violates.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClampCode: u8 {
        /// Above the top edge.
        const TOP    = 0b1000;
        /// Past the right edge.
        const RIGHT  = 0b0100;
        /// Below the bottom edge.
        const BOTTOM = 0b0010;
        /// Before the left edge.
        const LEFT   = 0b0001;
        /// Either horizontal edge.
        const HORIZONTAL = Self::LEFT.bits() | Self::RIGHT.bits();
        /// Either vertical edge.
        const VERTICAL = Self::TOP.bits() | Self::BOTTOM.bits();
    }
}

impl Default for ClampCode {
    fn default() -> Self {
        Self::empty()
    }
}

/// Result of resolving a candidate position against a [`ClampCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClampResolution {
    /// Position to apply.
    pub position: Point,
    /// Whether the anchor may follow the pointer horizontally.
    pub advance_x: bool,
    /// Whether the anchor may follow the pointer vertically.
    pub advance_y: bool,
}

impl ClampResolution {
    /// Unclamped resolution: the candidate is applied and the anchor follows.
    #[must_use]
    pub const fn free(position: Point) -> Self {
        Self {
            position,
            advance_x: true,
            advance_y: true,
        }
    }
}

impl ClampCode {
    /// Compare a container-local candidate origin against the container.
    #[must_use]
    pub fn detect(candidate: Point, element: Size, container: Size) -> Self {
        let mut code = Self::empty();
        code.set(Self::TOP, candidate.y < 0);
        code.set(
            Self::RIGHT,
            candidate.x > container.width.saturating_sub(element.width),
        );
        code.set(
            Self::BOTTOM,
            candidate.y > container.height.saturating_sub(element.height),
        );
        code.set(Self::LEFT, candidate.x < 0);
        code
    }

    /// Collision code of a box at rest, both rectangles in screen space.
    #[must_use]
    pub fn detect_screen(element: Rect, container: Rect) -> Self {
        let (x, y) = element.origin().delta_from(container.origin());
        Self::detect(Point::new(x, y), element.size(), container.size())
    }

    /// Resolve `candidate` into the position to apply and per-axis anchor
    /// advancement.
    #[must_use]
    pub fn resolve(self, candidate: Point, element: Size, container: Size) -> ClampResolution {
        let (x, advance_x) = resolve_axis(
            candidate.x,
            self.contains(Self::LEFT),
            self.contains(Self::RIGHT),
            container.width,
            element.width,
        );
        let (y, advance_y) = resolve_axis(
            candidate.y,
            self.contains(Self::TOP),
            self.contains(Self::BOTTOM),
            container.height,
            element.height,
        );
        ClampResolution {
            position: Point::new(x, y),
            advance_x,
            advance_y,
        }
    }

    /// Bits as the raw 4-bit code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self.bits()
    }
}

fn resolve_axis(
    candidate: i32,
    low: bool,
    high: bool,
    container_extent: i32,
    element_extent: i32,
) -> (i32, bool) {
    match (low, high) {
        (false, false) => (candidate, true),
        (false, true) => {
            let edge = container_extent
                .saturating_sub(element_extent)
                .saturating_sub(1)
                .max(0);
            (edge, false)
        }
        (true, _) => (0, false),
    }
}
