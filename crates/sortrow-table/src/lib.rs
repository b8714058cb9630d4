#![forbid(unsafe_code)]

//! Drag-to-reorder tables: ranked rows over a uniform row grid.
//!
//! # Role in sortrow
//! `sortrow-table` owns the discrete side of reordering. The
//! [`RankLedger`] maps pixel offsets to ranks and back and reflows sibling
//! rows when a dragged row crosses a rank boundary; [`Table`] owns the rows,
//! gives each one a [`DragController`](sortrow_drag::DragController), and
//! routes pointer input through controller and ledger in order.
//!
//! # Ranks
//! Ranks are dense and unique among rows that are not being dragged. With a
//! header, rank 0 belongs to the header and content ranks start at 1.

pub mod cell;
pub mod config;
pub mod ledger;
pub mod row;
pub mod table;

pub use cell::{Alignment, AlignmentError, Cell};
pub use config::TableConfig;
pub use ledger::{RankLedger, RankedRow, ReflowStyle};
pub use row::{Row, RowId, RowSurface};
pub use table::{Header, Table, TableDispatch, TableError, TableOutcome};
