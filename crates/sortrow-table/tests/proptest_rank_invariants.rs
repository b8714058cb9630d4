//! Property-based invariant tests for ranks and reflow.
//!
//! 1. `rank_from_offset(offset_from_rank(r)) == r` for every content rank,
//!    with and without a header.
//! 2. After any shift, non-dragged ranks are dense except for the dragged
//!    row's new rank, with no duplicates.
//! 3. Shift never mutates a dragged row.
//! 4. Any down/move*/up sequence on a table leaves ranks as a permutation
//!    of the content range, every row on its slot, and no listeners.

use std::collections::BTreeSet;
use std::time::Duration;

use proptest::prelude::*;
use sortrow_core::event::PointerEvent;
use sortrow_core::input::InputRouter;
use sortrow_core::transition::Easing;
use sortrow_table::{Alignment, RankLedger, RankedRow, ReflowStyle, RowId, Table, TableConfig};

const STYLE: ReflowStyle = ReflowStyle {
    duration: Duration::from_millis(150),
    easing: Easing::EaseOut,
};

#[derive(Debug, Clone, PartialEq)]
struct StubRow {
    rank: u32,
    offset: i32,
    dragged: bool,
}

impl RankedRow for StubRow {
    fn rank(&self) -> u32 {
        self.rank
    }

    fn is_dragged(&self) -> bool {
        self.dragged
    }

    fn reflow(&mut self, rank: u32, offset: i32, _style: ReflowStyle) {
        self.rank = rank;
        self.offset = offset;
    }
}

// ── Strategies ──────────────────────────────────────────────────────────

fn ledger_strategy() -> impl Strategy<Value = RankLedger> {
    (1u32..200, prop::option::of(1u32..200)).prop_map(|(row_height, header)| match header {
        Some(header) => RankLedger::with_header(row_height, header).expect("valid ledger"),
        None => RankLedger::new(row_height).expect("valid ledger"),
    })
}

/// Row count, index of the dragged row, and its target slot index.
fn shift_strategy() -> impl Strategy<Value = (usize, usize, usize)> {
    (1usize..40).prop_flat_map(|len| (Just(len), 0..len, 0..len))
}

fn drag_path() -> impl Strategy<Value = Vec<(i32, i32)>> {
    prop::collection::vec((-400i32..400, -400i32..400), 0..30)
}

fn ranked_rows(ledger: &RankLedger, len: usize) -> Vec<StubRow> {
    (0..len as u32)
        .map(|i| {
            let rank = ledger.first_rank() + i;
            StubRow {
                rank,
                offset: ledger.offset_from_rank(rank),
                dragged: false,
            }
        })
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Round trip
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rank_offset_round_trip(ledger in ledger_strategy(), step in 0u32..5_000) {
        let rank = ledger.first_rank() + step;
        let offset = ledger.offset_from_rank(rank);
        prop_assert_eq!(ledger.rank_from_offset(offset), rank as i32);
        // Anywhere inside the slot maps back to the same rank.
        let inside = offset + ledger.row_height() as i32 - 1;
        prop_assert_eq!(ledger.rank_from_offset(inside), rank as i32);
    }

    #[test]
    fn header_never_yields_rank_zero(
        row_height in 1u32..200,
        header in 1u32..200,
        offset in -10_000i32..10_000,
    ) {
        let ledger = RankLedger::with_header(row_height, header).expect("valid ledger");
        prop_assert!(ledger.rank_from_offset(offset) >= 1);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2-3. Shift density and dragged-row isolation
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn shift_keeps_ranks_dense_and_unique(
        ledger in ledger_strategy(),
        (len, dragged, target) in shift_strategy(),
    ) {
        let mut rows = ranked_rows(&ledger, len);
        rows[dragged].dragged = true;
        let from = rows[dragged].rank;
        let to = ledger.first_rank() + target as u32;
        let before = rows[dragged].clone();

        let shifted = ledger.shift(&mut rows, from, to, STYLE);

        prop_assert_eq!(&rows[dragged], &before);
        prop_assert_eq!(shifted, from.abs_diff(to) as usize);

        let others: Vec<u32> = rows
            .iter()
            .filter(|row| !row.dragged)
            .map(|row| row.rank)
            .collect();
        let unique: BTreeSet<u32> = others.iter().copied().collect();
        prop_assert_eq!(unique.len(), others.len(), "duplicate ranks: {:?}", others);

        let expected: BTreeSet<u32> = (ledger.first_rank()..ledger.first_rank() + len as u32)
            .filter(|rank| *rank != to)
            .collect();
        prop_assert_eq!(unique, expected);

        for row in rows.iter().filter(|row| !row.dragged) {
            prop_assert_eq!(row.offset, ledger.offset_from_rank(row.rank));
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Whole-table drag sequences
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn table_drags_preserve_a_rank_permutation(
        len in 1usize..12,
        header in prop::option::of(1u32..60),
        pick in any::<prop::sample::Index>(),
        path in drag_path(),
    ) {
        let mut config = TableConfig::default();
        if let Some(height) = header {
            config = config.with_header_height(height);
        }
        let mut table = Table::new(config).expect("valid table");
        if header.is_some() {
            table.add_column("Name", Alignment::Left).expect("column");
        }
        let ids: Vec<RowId> = (0..len)
            .map(|i| table.add_row([format!("row {i}")]).expect("row"))
            .collect();
        let mut input = InputRouter::new();
        let row = ids[pick.index(len)];

        table
            .pointer_down(row, &PointerEvent::primary_down(0, 0), &mut input)
            .expect("known row");
        for (x, y) in path {
            table.pointer_move(&PointerEvent::primary_move(x, y));
        }
        table.pointer_up(&PointerEvent::primary_up(0, 0), &mut input);

        let first = table.ledger().first_rank();
        let ranks: BTreeSet<u32> = ids
            .iter()
            .map(|id| table.row(*id).expect("row").rank())
            .collect();
        prop_assert_eq!(ranks, (first..first + len as u32).collect::<BTreeSet<u32>>());

        for id in &ids {
            let row = table.row(*id).expect("row");
            prop_assert_eq!(row.position().y, table.ledger().offset_from_rank(row.rank()));
            prop_assert_eq!(row.position().x, 0);
        }
        prop_assert!(input.is_empty());
        prop_assert_eq!(table.active_drag(), None);
    }
}
