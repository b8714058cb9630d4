#![forbid(unsafe_code)]

//! The thing being dragged.
//!
//! A [`DragSurface`] is whatever the host draws and moves: a row, a card,
//! a floating panel. The controller only needs its container-local bounds,
//! a way to move it, and its "dragged" marker.

use std::fmt;

use serde::{Deserialize, Serialize};
use sortrow_core::geometry::{Point, Rect, Size};
use sortrow_core::input::ListenerId;

/// Identity of a draggable surface. Zero is reserved for "no surface".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SurfaceId(u64);

impl SurfaceId {
    /// The reserved null id.
    pub const NONE: Self = Self(0);

    /// Wrap a raw id.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Whether this id names a real surface.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }

    /// Listener identity used when subscribing to global input.
    #[must_use]
    pub const fn listener(self) -> ListenerId {
        ListenerId(self.0)
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

/// A draggable element, positioned relative to its container.
pub trait DragSurface {
    /// Current container-local position and size.
    fn bounds(&self) -> Rect;

    /// Move the surface to a container-local position.
    fn set_position(&mut self, position: Point);

    /// Whether a drag session currently holds this surface.
    fn is_dragged(&self) -> bool;

    /// Set or clear the dragged marker.
    fn set_dragged(&mut self, dragged: bool);
}

/// Minimal [`DragSurface`]: a box with a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlainSurface {
    bounds: Rect,
    dragged: bool,
}

impl PlainSurface {
    /// A surface at `position` with `size`.
    #[must_use]
    pub const fn new(position: Point, size: Size) -> Self {
        Self {
            bounds: Rect::from_parts(position, size),
            dragged: false,
        }
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> Point {
        self.bounds.origin()
    }
}

impl DragSurface for PlainSurface {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_position(&mut self, position: Point) {
        self.bounds = self.bounds.with_origin(position);
    }

    fn is_dragged(&self) -> bool {
        self.dragged
    }

    fn set_dragged(&mut self, dragged: bool) {
        self.dragged = dragged;
    }
}
