#![forbid(unsafe_code)]

//! Drag controller: one interactive drag session per draggable surface.
//!
//! # Role in sortrow
//! `sortrow-drag` turns raw [`PointerEvent`](sortrow_core::event::PointerEvent)
//! values into clamped positions for a [`DragSurface`], independent of what
//! the surface represents. It knows nothing about rows or ranks; owners
//! layer discrete behavior on top through [`hooks`].
//!
//! # Primary responsibilities
//! - **[`DragController`]**: the `Idle -> Dragging -> Idle` lifecycle, with
//!   move/end listeners scoped to the session.
//! - **[`ClampCode`]**: 4-bit edge collision codes and the sticky clamp that
//!   pins a surface to its container.
//! - **[`HookRegistry`]**: ordered, typed lifecycle subscribers that may
//!   suppress the controller's default effect.

pub mod clamp;
pub mod controller;
pub mod hooks;
pub mod surface;

pub use clamp::{ClampCode, ClampResolution};
pub use controller::{
    DragConfig, DragController, DragControllerError, DragDispatch, DragIgnoredReason,
    DragOutcome, DragSession, DragState,
};
pub use hooks::{DragHookPayload, HookEvent, HookEventParseError, HookId, HookRegistry, HookVerdict};
pub use surface::{DragSurface, PlainSurface, SurfaceId};
