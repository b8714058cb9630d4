#![forbid(unsafe_code)]

//! Canonical pointer event types.
//!
//! Hosts translate whatever their platform delivers (DOM mouse/touch events,
//! winit cursor events, terminal mouse reports) into [`PointerEvent`] values.
//! Positions are in screen space; only differences between positions matter
//! to the drag machinery, so any consistent origin works.
//!
//! # Design Notes
//!
//! - `buttons` mirrors the "currently held" bitmask, not the button that
//!   changed, so a primary-only press is `PointerButtons::PRIMARY` exactly.
//! - Touch events carry the number of active contacts; only the first
//!   contact's position is reported.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Which device produced the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    /// Mouse, pen, or trackpad cursor.
    #[default]
    Mouse,
    /// Finger on a touch surface.
    Touch,
}

/// Lifecycle phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPhase {
    /// Button pressed or touch started.
    Down,
    /// Pointer moved.
    Move,
    /// Button released or touch ended.
    Up,
}

bitflags! {
    /// Buttons held while the event was generated.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PointerButtons: u8 {
        /// No buttons.
        const NONE      = 0b000;
        /// Primary (usually left) button.
        const PRIMARY   = 0b001;
        /// Secondary (usually right) button.
        const SECONDARY = 0b010;
        /// Auxiliary (usually middle) button.
        const AUXILIARY = 0b100;
    }
}

impl Default for PointerButtons {
    fn default() -> Self {
        Self::NONE
    }
}

/// A pointer event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Lifecycle phase.
    pub phase: PointerPhase,
    /// Device that produced the event.
    pub kind: PointerKind,
    /// Screen position (first contact for touch).
    pub position: Point,
    /// Buttons currently held (always `NONE` for touch).
    #[serde(with = "buttons_bits")]
    pub buttons: PointerButtons,
    /// Active touch contacts (0 for mouse).
    pub contacts: u8,
}

impl PointerEvent {
    /// Create a mouse event.
    #[must_use]
    pub const fn mouse(phase: PointerPhase, position: Point, buttons: PointerButtons) -> Self {
        Self {
            phase,
            kind: PointerKind::Mouse,
            position,
            buttons,
            contacts: 0,
        }
    }

    /// Create a touch event with `contacts` fingers on the surface.
    #[must_use]
    pub const fn touch(phase: PointerPhase, position: Point, contacts: u8) -> Self {
        Self {
            phase,
            kind: PointerKind::Touch,
            position,
            buttons: PointerButtons::NONE,
            contacts,
        }
    }

    /// Primary-button mouse press at `(x, y)`.
    #[must_use]
    pub const fn primary_down(x: i32, y: i32) -> Self {
        Self::mouse(PointerPhase::Down, Point::new(x, y), PointerButtons::PRIMARY)
    }

    /// Mouse move at `(x, y)` with the primary button held.
    #[must_use]
    pub const fn primary_move(x: i32, y: i32) -> Self {
        Self::mouse(PointerPhase::Move, Point::new(x, y), PointerButtons::PRIMARY)
    }

    /// Mouse release at `(x, y)`.
    #[must_use]
    pub const fn primary_up(x: i32, y: i32) -> Self {
        Self::mouse(PointerPhase::Up, Point::new(x, y), PointerButtons::NONE)
    }

    /// Whether this event may start a drag: a press with exactly the primary
    /// button held, or a touch start with exactly one contact.
    #[must_use]
    pub fn is_primary_activation(&self) -> bool {
        if self.phase != PointerPhase::Down {
            return false;
        }
        match self.kind {
            PointerKind::Mouse => self.buttons == PointerButtons::PRIMARY,
            PointerKind::Touch => self.contacts == 1,
        }
    }
}

/// Buttons travel as the raw bitmask hosts already have (DOM `buttons`).
mod buttons_bits {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::PointerButtons;

    pub(super) fn serialize<S: Serializer>(
        buttons: &PointerButtons,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(buttons.bits())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<PointerButtons, D::Error> {
        u8::deserialize(deserializer).map(PointerButtons::from_bits_truncate)
    }
}
