#![forbid(unsafe_code)]

//! Core: geometry, pointer input, input sources, and eased offset transitions.
//!
//! # Role in sortrow
//! `sortrow-core` is the vocabulary layer. It has no notion of rows or ranks;
//! it only describes where things are ([`geometry`]), what the pointer did
//! ([`event`]), who is listening for global pointer traffic ([`input`]), and
//! how a visual offset glides toward a new value ([`transition`]).
//!
//! # How it fits in the system
//! `sortrow-drag` turns [`event::PointerEvent`] values into clamped surface
//! positions, and `sortrow-table` maps those positions onto discrete ranks.
//! Both depend on this crate and nothing in here depends on them.

pub mod event;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod transition;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, trace, trace_span, warn};
