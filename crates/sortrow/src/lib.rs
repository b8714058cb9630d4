#![forbid(unsafe_code)]

//! sortrow public facade crate.
//!
//! Re-exports the types hosts need from the internal crates and offers a
//! prelude for day-to-day usage. A host typically:
//!
//! 1. builds a [`Table`] from a [`TableConfig`],
//! 2. forwards pointer-down on a row to [`Table::pointer_down`],
//! 3. forwards global move/up events to [`Table::pointer_move`] and
//!    [`Table::pointer_up`] while [`InputRouter`] reports a subscription,
//! 4. calls [`Table::tick`] from its frame loop and draws
//!    [`Table::rows_by_rank`] at each row's `visual_top`.

pub mod error;

// --- Core re-exports -------------------------------------------------------

pub use sortrow_core::event::{PointerButtons, PointerEvent, PointerKind, PointerPhase};
pub use sortrow_core::geometry::{Point, Rect, Size};
pub use sortrow_core::input::{InputChannels, InputRouter, InputSource, ListenerId, SubscriptionId};
pub use sortrow_core::transition::{Easing, OffsetTransition};

// --- Drag re-exports -------------------------------------------------------

pub use sortrow_drag::{
    ClampCode, ClampResolution, DragConfig, DragController, DragControllerError, DragDispatch,
    DragHookPayload, DragIgnoredReason, DragOutcome, DragSession, DragState, DragSurface,
    HookEvent, HookEventParseError, HookId, HookVerdict, PlainSurface, SurfaceId,
};

// --- Table re-exports ------------------------------------------------------

pub use sortrow_table::{
    Alignment, AlignmentError, Cell, Header, RankLedger, RankedRow, ReflowStyle, Row, RowId,
    RowSurface, Table, TableConfig, TableDispatch, TableError, TableOutcome,
};

// --- Errors ---------------------------------------------------------------

pub use error::{Error, Remedy, Result};

// --- Logging --------------------------------------------------------------

#[cfg(feature = "tracing-json")]
pub use sortrow_core::logging::init_json_subscriber;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Alignment, DragOutcome, Easing, Error, HookEvent, HookVerdict, InputRouter, Point,
        PointerEvent, Rect, Result, RowId, Table, TableConfig, TableOutcome,
    };

    pub use crate::{core, drag, table};
}

pub use sortrow_core as core;
pub use sortrow_drag as drag;
pub use sortrow_table as table;
