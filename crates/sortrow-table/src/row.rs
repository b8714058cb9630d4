#![forbid(unsafe_code)]

//! Rows: a rank, a drawable surface, cells, and an optional drag controller.
//!
//! The surface and the controller are separate fields so the table can hand
//! the controller a `&mut` to the surface it drives without aliasing.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sortrow_core::geometry::{Point, Rect, Size};
use sortrow_core::transition::OffsetTransition;
use sortrow_drag::{DragController, DragSurface};

use crate::cell::Cell;
use crate::ledger::{RankedRow, ReflowStyle};

/// Identity of a row within its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowId(pub u32);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row#{}", self.0)
    }
}

/// Table-local box of a row, plus the glide toward its reflowed offset.
///
/// `bounds` is the logical position: a reflow sets it to the target at once
/// and the transition only affects [`visual_top`](Self::visual_top).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowSurface {
    bounds: Rect,
    dragged: bool,
    transition: Option<OffsetTransition>,
}

impl RowSurface {
    #[must_use]
    pub const fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            dragged: false,
            transition: None,
        }
    }

    /// Move vertically to `top`, animating from the currently drawn offset.
    pub fn glide_to(&mut self, top: i32, style: ReflowStyle) {
        let from = self.visual_top();
        self.bounds = self.bounds.with_origin(Point::new(0, top));
        self.transition = match self.transition {
            Some(mut running) => {
                running.retarget(top);
                Some(running)
            }
            None if from != top => Some(OffsetTransition::new(
                from,
                top,
                style.duration,
                style.easing,
            )),
            None => None,
        };
    }

    /// Jump to `position` with no animation.
    pub fn snap_to(&mut self, position: Point) {
        self.transition = None;
        self.bounds = self.bounds.with_origin(position);
    }

    /// Logical table-local position.
    #[must_use]
    pub const fn position(&self) -> Point {
        self.bounds.origin()
    }

    /// Top offset to draw this frame.
    #[must_use]
    pub fn visual_top(&self) -> i32 {
        self.transition
            .as_ref()
            .map_or(self.bounds.y, OffsetTransition::value)
    }

    /// Whether a reflow glide is still running.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Advance the glide; returns whether it is still running.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if let Some(transition) = self.transition.as_mut() {
            transition.tick(dt);
            if transition.is_complete() {
                self.transition = None;
            }
        }
        self.transition.is_some()
    }
}

impl DragSurface for RowSurface {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_position(&mut self, position: Point) {
        self.snap_to(position);
    }

    fn is_dragged(&self) -> bool {
        self.dragged
    }

    fn set_dragged(&mut self, dragged: bool) {
        self.dragged = dragged;
    }
}

/// One content row.
#[derive(Debug)]
pub struct Row {
    pub(crate) id: RowId,
    pub(crate) rank: u32,
    pub(crate) surface: RowSurface,
    pub(crate) cells: Vec<Cell>,
    pub(crate) drag: Option<DragController>,
}

impl Row {
    #[must_use]
    pub const fn id(&self) -> RowId {
        self.id
    }

    #[must_use]
    pub const fn rank(&self) -> u32 {
        self.rank
    }

    /// Logical table-local position.
    #[must_use]
    pub const fn position(&self) -> Point {
        self.surface.position()
    }

    #[must_use]
    pub fn visual_top(&self) -> i32 {
        self.surface.visual_top()
    }

    #[must_use]
    pub const fn size(&self) -> Size {
        self.surface.bounds.size()
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[must_use]
    pub const fn surface(&self) -> &RowSurface {
        &self.surface
    }

    /// Whether the row has a drag controller.
    #[must_use]
    pub const fn is_draggable(&self) -> bool {
        self.drag.is_some()
    }

    /// Whether a drag session currently holds the row.
    #[must_use]
    pub const fn is_dragged(&self) -> bool {
        self.surface.dragged
    }

    #[must_use]
    pub const fn controller(&self) -> Option<&DragController> {
        self.drag.as_ref()
    }
}

impl RankedRow for Row {
    fn rank(&self) -> u32 {
        self.rank
    }

    fn is_dragged(&self) -> bool {
        self.surface.dragged
    }

    fn reflow(&mut self, rank: u32, offset: i32, style: ReflowStyle) {
        self.rank = rank;
        self.surface.glide_to(offset, style);
    }
}
