#![forbid(unsafe_code)]

//! A ranked table whose rows can be dragged to a new rank.
//!
//! The table owns the rows, a [`RankLedger`], and the session registry.
//! Pointer input flows controller first, ledger second:
//!
//! 1. `pointer_down` starts the row controller's session and records the row
//!    as active.
//! 2. `pointer_move` lets the controller compute the clamped position, maps
//!    the row's midpoint to a tentative rank, reflows siblings when it
//!    changed, then runs post-move hooks with the rank.
//! 3. `pointer_up` ends the session and snaps the row onto its rank slot.
//!
//! # Invariants
//!
//! 1. At most one row is in the session registry at a time.
//! 2. Outside a drag, row ranks are exactly `first_rank .. first_rank + len`.
//! 3. The container handed to every controller always equals
//!    [`Table::container`].

use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

use sortrow_core::event::PointerEvent;
use sortrow_core::geometry::{Point, Rect};
use sortrow_core::input::InputSource;
use sortrow_drag::{
    DragConfig, DragController, DragControllerError, DragDispatch, DragHookPayload, DragOutcome,
    DragSurface, HookEvent, HookId, HookVerdict, SurfaceId,
};

use crate::cell::{Alignment, AlignmentError, Cell};
use crate::config::TableConfig;
use crate::ledger::RankLedger;
use crate::row::{Row, RowId, RowSurface};

/// The non-draggable header row, which holds rank 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    cells: Vec<Cell>,
    height: u32,
}

impl Header {
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Alignment of column `index`, if it exists.
    #[must_use]
    pub fn alignment(&self, index: usize) -> Option<Alignment> {
        self.cells.get(index).map(|cell| cell.align)
    }
}

/// What a table-level pointer event did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TableOutcome {
    /// The controller handled the event without a rank change.
    Drag(DragDispatch),
    /// The dragged row crossed into a new rank and `shifted` siblings moved.
    Reranked {
        drag: DragDispatch,
        from: u32,
        to: u32,
        shifted: usize,
    },
    /// The session ended and the row snapped onto `rank` at `offset`.
    Dropped {
        drag: DragDispatch,
        rank: u32,
        offset: i32,
    },
    /// Another row is being dragged.
    Busy { active: RowId },
    /// The row has no drag controller.
    NotDraggable,
    /// Move or release with no active session.
    NoActiveDrag,
}

/// Result of one table-level pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableDispatch {
    pub row: Option<RowId>,
    pub outcome: TableOutcome,
}

/// A drag-to-reorder table.
#[derive(Debug)]
pub struct Table {
    config: TableConfig,
    ledger: RankLedger,
    header: Option<Header>,
    rows: Vec<Row>,
    dragging: BTreeSet<RowId>,
    next_id: u32,
}

impl Table {
    /// Create an empty table.
    pub fn new(config: TableConfig) -> Result<Self, TableError> {
        config.validate()?;
        Ok(Self {
            ledger: RankLedger::new(config.row_height)?,
            config,
            header: None,
            rows: Vec::new(),
            dragging: BTreeSet::new(),
            next_id: 0,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &TableConfig {
        &self.config
    }

    #[must_use]
    pub const fn ledger(&self) -> &RankLedger {
        &self.ledger
    }

    #[must_use]
    pub const fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    /// Number of content rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total height: header plus one row height per row.
    #[must_use]
    pub fn height(&self) -> u32 {
        let rows = u32::try_from(self.rows.len()).unwrap_or(u32::MAX);
        self.header
            .as_ref()
            .map_or(0, Header::height)
            .saturating_add(rows.saturating_mul(self.config.row_height))
    }

    /// Table-local container every row is clamped to.
    #[must_use]
    pub fn container(&self) -> Rect {
        Rect::from_size(to_extent(self.config.width), to_extent(self.height()))
    }

    #[must_use]
    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.iter().find(|row| row.id == id)
    }

    /// Rows in rank order, for rendering.
    #[must_use]
    pub fn rows_by_rank(&self) -> Vec<&Row> {
        let mut rows: Vec<&Row> = self.rows.iter().collect();
        rows.sort_by_key(|row| row.rank);
        rows
    }

    /// Row currently being dragged.
    #[must_use]
    pub fn active_drag(&self) -> Option<RowId> {
        self.dragging.first().copied()
    }

    /// Append a column. The first column creates the header at rank 0 and
    /// pushes existing rows down by one rank.
    pub fn add_column(
        &mut self,
        title: impl Into<String>,
        align: Alignment,
    ) -> Result<(), TableError> {
        if self.header.is_none() {
            let height = self.config.effective_header_height();
            self.ledger.set_header_height(Some(height))?;
            self.header = Some(Header {
                cells: Vec::new(),
                height,
            });
            for row in &mut self.rows {
                row.rank += 1;
                if !row.surface.is_dragged() {
                    row.surface
                        .snap_to(Point::new(0, self.ledger.offset_from_rank(row.rank)));
                }
            }
            self.sync_containers()?;

            #[cfg(feature = "tracing")]
            sortrow_core::debug!(message = "table.header", height, rows = self.rows.len());
        }
        let columns = match self.header.as_mut() {
            Some(header) => {
                header.cells.push(Cell::new(title, align));
                header.cells.len()
            }
            None => 0,
        };
        for row in &mut self.rows {
            if row.cells.len() < columns {
                row.cells.resize(columns, Cell::new("", align));
            }
        }
        Ok(())
    }

    /// Append a row using the table's `rows_draggable` setting.
    pub fn add_row<I, S>(&mut self, contents: I) -> Result<RowId, TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_row(contents, self.config.rows_draggable)
    }

    /// Append a row that can never be dragged.
    pub fn add_static_row<I, S>(&mut self, contents: I) -> Result<RowId, TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_row(contents, false)
    }

    /// Route a pointer-down on `row`.
    pub fn pointer_down<I>(
        &mut self,
        row: RowId,
        event: &PointerEvent,
        input: &mut I,
    ) -> Result<TableDispatch, TableError>
    where
        I: InputSource + ?Sized,
    {
        let index = self.index_of(row)?;
        if let Some(active) = self.active_drag().filter(|active| *active != row) {
            return Ok(dispatch(Some(row), TableOutcome::Busy { active }));
        }
        let Row { surface, drag, .. } = &mut self.rows[index];
        let Some(controller) = drag.as_mut() else {
            return Ok(dispatch(Some(row), TableOutcome::NotDraggable));
        };

        let drag = controller.pointer_down(surface, event, input);
        if matches!(drag.outcome, DragOutcome::Started { .. }) {
            self.dragging.insert(row);
        }
        Ok(dispatch(Some(row), TableOutcome::Drag(drag)))
    }

    /// Route a global pointer-move to the active row.
    pub fn pointer_move(&mut self, event: &PointerEvent) -> TableDispatch {
        let Some((row, index)) = self.active_index() else {
            return dispatch(None, TableOutcome::NoActiveDrag);
        };
        let Row { surface, drag, .. } = &mut self.rows[index];
        let Some(controller) = drag.as_mut() else {
            return dispatch(Some(row), TableOutcome::NotDraggable);
        };

        let drag = controller.pointer_move(surface, event);
        let DragOutcome::Moved {
            position,
            applied: true,
            ..
        } = drag.outcome
        else {
            return dispatch(Some(row), TableOutcome::Drag(drag));
        };

        let from = self.rows[index].rank;
        let to = self.tentative_rank(position.y);
        let mut shifted = 0;
        if to != from {
            shifted = self
                .ledger
                .shift(&mut self.rows, from, to, self.config.reflow());
            self.rows[index].rank = to;

            #[cfg(feature = "tracing")]
            sortrow_core::debug!(message = "table.rerank", row = row.0, from, to, shifted);
        }

        if let Some(controller) = self.rows[index].drag.as_mut() {
            controller.settle_move(event.position, position, Some(to));
        }

        let outcome = if to == from {
            TableOutcome::Drag(drag)
        } else {
            TableOutcome::Reranked {
                drag,
                from,
                to,
                shifted,
            }
        };
        dispatch(Some(row), outcome)
    }

    /// Route a global pointer-up to the active row.
    pub fn pointer_up<I>(&mut self, event: &PointerEvent, input: &mut I) -> TableDispatch
    where
        I: InputSource + ?Sized,
    {
        let Some((row, index)) = self.active_index() else {
            return dispatch(None, TableOutcome::NoActiveDrag);
        };
        let Row { surface, drag, .. } = &mut self.rows[index];
        let Some(controller) = drag.as_mut() else {
            return dispatch(Some(row), TableOutcome::NotDraggable);
        };

        let drag = controller.pointer_up(surface, event, input);
        if !matches!(drag.outcome, DragOutcome::Ended { .. }) {
            return dispatch(Some(row), TableOutcome::Drag(drag));
        }
        self.dragging.remove(&row);
        let (rank, offset) = self.snap(index);

        #[cfg(feature = "tracing")]
        sortrow_core::debug!(message = "table.drop", row = row.0, rank, offset);

        dispatch(Some(row), TableOutcome::Dropped { drag, rank, offset })
    }

    /// Register a lifecycle hook on `row`'s controller.
    pub fn add_hook<F>(&mut self, row: RowId, event: HookEvent, callback: F) -> Result<HookId, TableError>
    where
        F: FnMut(&DragHookPayload) -> HookVerdict + 'static,
    {
        Ok(self.controller_mut(row)?.add_hook(event, callback))
    }

    /// Deregister a lifecycle hook on `row`'s controller.
    pub fn remove_hook(&mut self, row: RowId, event: HookEvent, id: HookId) -> Result<bool, TableError> {
        Ok(self.controller_mut(row)?.remove_hook(event, id))
    }

    /// Tear down `row`'s controller. An in-flight session is closed without
    /// end hooks and the row snaps onto its rank. Returns whether a session
    /// was terminated.
    pub fn detach_drag<I>(&mut self, row: RowId, input: &mut I) -> Result<bool, TableError>
    where
        I: InputSource + ?Sized,
    {
        let index = self.index_of(row)?;
        let Row { surface, drag, .. } = &mut self.rows[index];
        let controller = drag.as_mut().ok_or(TableError::NotDraggable(row))?;
        let terminated = controller.remove(surface, input, false).is_some();
        if terminated {
            self.dragging.remove(&row);
            self.snap(index);
        }
        Ok(terminated)
    }

    /// Re-enable `row`'s controller after [`detach_drag`](Self::detach_drag).
    pub fn attach_drag(&mut self, row: RowId) -> Result<(), TableError> {
        self.controller_mut(row)?.reattach();
        Ok(())
    }

    /// Advance reflow glides; returns whether any row is still animating.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.rows
            .iter_mut()
            .fold(false, |animating, row| row.surface.tick(dt) | animating)
    }

    fn push_row<I, S>(&mut self, contents: I, draggable: bool) -> Result<RowId, TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut contents: Vec<String> = contents.into_iter().map(Into::into).collect();
        let columns = self.header.as_ref().map_or(0, |header| header.cells.len());
        if contents.len() < columns {
            contents.resize(columns, String::new());
        }
        let cells = contents
            .into_iter()
            .enumerate()
            .map(|(index, content)| {
                let align = self
                    .header
                    .as_ref()
                    .and_then(|header| header.alignment(index))
                    .unwrap_or_default();
                Cell::new(content, align)
            })
            .collect();

        let id = RowId(self.next_id);
        let rank = self.ledger.first_rank() + u32::try_from(self.rows.len()).unwrap_or(u32::MAX);
        let bounds = Rect::new(
            0,
            self.ledger.offset_from_rank(rank),
            to_extent(self.config.width),
            to_extent(self.config.row_height),
        );
        let drag = if draggable {
            let config = DragConfig {
                container: None,
                allow_touch: self.config.allow_touch,
            };
            Some(DragController::new(
                SurfaceId::new(u64::from(id.0) + 1),
                config,
            )?)
        } else {
            None
        };

        self.next_id += 1;
        self.rows.push(Row {
            id,
            rank,
            surface: RowSurface::new(bounds),
            cells,
            drag,
        });
        self.sync_containers()?;

        #[cfg(feature = "tracing")]
        sortrow_core::debug!(message = "table.add_row", row = id.0, rank, draggable);

        Ok(id)
    }

    fn sync_containers(&mut self) -> Result<(), TableError> {
        let container = self.container();
        for row in &mut self.rows {
            if let Some(controller) = row.drag.as_mut() {
                controller.set_container(Some(container))?;
            }
        }
        Ok(())
    }

    fn tentative_rank(&self, top: i32) -> u32 {
        let first = i64::from(self.ledger.first_rank());
        let last = first + i64::try_from(self.rows.len()).unwrap_or(i64::MAX) - 1;
        let probe = i64::from(self.ledger.rank_at_probe(top)).clamp(first, last.max(first));
        u32::try_from(probe).unwrap_or(u32::MAX)
    }

    fn snap(&mut self, index: usize) -> (u32, i32) {
        let row = &mut self.rows[index];
        let offset = self.ledger.offset_from_rank(row.rank);
        row.surface.snap_to(Point::new(0, offset));
        (row.rank, offset)
    }

    fn active_index(&self) -> Option<(RowId, usize)> {
        let row = self.active_drag()?;
        let index = self.rows.iter().position(|candidate| candidate.id == row)?;
        Some((row, index))
    }

    fn index_of(&self, row: RowId) -> Result<usize, TableError> {
        self.rows
            .iter()
            .position(|candidate| candidate.id == row)
            .ok_or(TableError::UnknownRow(row))
    }

    fn controller_mut(&mut self, row: RowId) -> Result<&mut DragController, TableError> {
        let index = self.index_of(row)?;
        self.rows[index]
            .drag
            .as_mut()
            .ok_or(TableError::NotDraggable(row))
    }
}

const fn dispatch(row: Option<RowId>, outcome: TableOutcome) -> TableDispatch {
    TableDispatch { row, outcome }
}

fn to_extent(pixels: u32) -> i32 {
    i32::try_from(pixels).unwrap_or(i32::MAX)
}

/// Table construction and lookup errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// Row height is zero or does not fit pixel coordinates.
    InvalidRowHeight { row_height: u32 },
    /// Width is zero or does not fit pixel coordinates.
    InvalidWidth { width: u32 },
    /// Header height is zero or does not fit pixel coordinates.
    InvalidHeaderHeight { height: u32 },
    /// No row with this id.
    UnknownRow(RowId),
    /// The row has no drag controller.
    NotDraggable(RowId),
    /// A column alignment keyword was not recognized.
    Alignment(AlignmentError),
    /// A row controller rejected its configuration.
    Drag(DragControllerError),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRowHeight { row_height } => {
                write!(f, "row height must be positive (got {row_height})")
            }
            Self::InvalidWidth { width } => write!(f, "table width must be positive (got {width})"),
            Self::InvalidHeaderHeight { height } => {
                write!(f, "header height must be positive (got {height})")
            }
            Self::UnknownRow(row) => write!(f, "unknown {row}"),
            Self::NotDraggable(row) => write!(f, "{row} is not draggable"),
            Self::Alignment(err) => write!(f, "{err}"),
            Self::Drag(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Alignment(err) => Some(err),
            Self::Drag(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AlignmentError> for TableError {
    fn from(err: AlignmentError) -> Self {
        Self::Alignment(err)
    }
}

impl From<DragControllerError> for TableError {
    fn from(err: DragControllerError) -> Self {
        Self::Drag(err)
    }
}
