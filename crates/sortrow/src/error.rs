#![forbid(unsafe_code)]

//! sortrow error model.
//!
//! # Design Principles
//!
//! 1. **Result everywhere**: no panics on any pointer path.
//! 2. **Domain-specific errors**: each crate keeps its own typed error, and
//!    [`Error`] wraps them so `?` works across crate boundaries.
//! 3. **Remedies**: every variant maps to a [`Remedy`] telling the host
//!    whether to drop the offending event or fix its setup.

use std::fmt;

use sortrow_drag::{DragControllerError, HookEventParseError};
use sortrow_table::{AlignmentError, TableError};

// ── Unified Error ───────────────────────────────────────────────────────

/// Top-level error type for sortrow hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Drag controller construction or configuration failure.
    Drag(DragControllerError),
    /// Table construction, configuration, or lookup failure.
    Table(TableError),
    /// Unrecognized column alignment keyword.
    Alignment(AlignmentError),
    /// Unrecognized hook event name.
    HookEvent(HookEventParseError),
}

/// Standard result type for sortrow APIs.
pub type Result<T> = std::result::Result<T, Error>;

// ── Remedies ────────────────────────────────────────────────────────────

/// What the host should do about an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remedy {
    /// The event named something that no longer exists; drop it and go on.
    DropEvent,
    /// The setup is wrong and retrying will not help.
    FixConfiguration,
}

impl Error {
    /// Remedy for this error.
    pub fn remedy(&self) -> Remedy {
        match self {
            Self::Table(TableError::UnknownRow(_) | TableError::NotDraggable(_)) => {
                Remedy::DropEvent
            }
            Self::Table(_) | Self::Drag(_) | Self::Alignment(_) | Self::HookEvent(_) => {
                Remedy::FixConfiguration
            }
        }
    }

    /// Error type label for tracing.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Drag(_) => "drag",
            Self::Table(_) => "table",
            Self::Alignment(_) => "alignment",
            Self::HookEvent(_) => "hook_event",
        }
    }

    /// Whether the host can keep going by dropping the event.
    pub fn is_recoverable(&self) -> bool {
        matches!(self.remedy(), Remedy::DropEvent)
    }
}

// ── Display ─────────────────────────────────────────────────────────────

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Drag(err) => write!(f, "drag: {err}"),
            Self::Table(err) => write!(f, "table: {err}"),
            Self::Alignment(err) => write!(f, "{err}"),
            Self::HookEvent(err) => write!(f, "{err}"),
        }
    }
}

// ── std::error::Error ───────────────────────────────────────────────────

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Drag(err) => Some(err),
            Self::Table(err) => Some(err),
            Self::Alignment(err) => Some(err),
            Self::HookEvent(err) => Some(err),
        }
    }
}

// ── From conversions ────────────────────────────────────────────────────

impl From<DragControllerError> for Error {
    fn from(err: DragControllerError) -> Self {
        Self::Drag(err)
    }
}

impl From<TableError> for Error {
    fn from(err: TableError) -> Self {
        match err {
            TableError::Drag(err) => Self::Drag(err),
            TableError::Alignment(err) => Self::Alignment(err),
            other => Self::Table(other),
        }
    }
}

impl From<AlignmentError> for Error {
    fn from(err: AlignmentError) -> Self {
        Self::Alignment(err)
    }
}

impl From<HookEventParseError> for Error {
    fn from(err: HookEventParseError) -> Self {
        Self::HookEvent(err)
    }
}
