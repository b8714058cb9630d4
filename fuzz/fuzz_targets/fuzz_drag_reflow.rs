#![no_main]

use std::collections::BTreeSet;
use std::time::Duration;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sortrow_core::event::{PointerEvent, PointerPhase};
use sortrow_core::geometry::Point;
use sortrow_core::input::InputRouter;
use sortrow_table::{Alignment, RowId, Table, TableConfig};

#[derive(Debug, Arbitrary)]
enum Op {
    Down { row: u8, x: i16, y: i16, touch: bool },
    Move { x: i16, y: i16 },
    Up { x: i16, y: i16 },
    AddRow,
    AddColumn,
    Detach { row: u8 },
    Attach { row: u8 },
    Tick { ms: u8 },
}

#[derive(Debug, Arbitrary)]
struct Script {
    row_height: u8,
    header_height: Option<u8>,
    rows: u8,
    ops: Vec<Op>,
}

fuzz_target!(|script: Script| {
    let mut config = TableConfig::default().with_row_height(u32::from(script.row_height.max(1)));
    if let Some(height) = script.header_height {
        config = config.with_header_height(u32::from(height.max(1)));
    }
    let Ok(mut table) = Table::new(config) else {
        return;
    };
    let mut ids: Vec<RowId> = Vec::new();
    for i in 0..(script.rows % 32) {
        ids.push(table.add_row([format!("{i}")]).expect("row accepted"));
    }
    let mut router = InputRouter::new();

    for op in script.ops.into_iter().take(256) {
        match op {
            Op::Down { row, x, y, touch } => {
                let Some(id) = pick(&ids, row) else { continue };
                let position = Point::new(i32::from(x), i32::from(y));
                let event = if touch {
                    PointerEvent::touch(PointerPhase::Down, position, 1)
                } else {
                    PointerEvent::primary_down(position.x, position.y)
                };
                let _ = table.pointer_down(id, &event, &mut router);
            }
            Op::Move { x, y } => {
                let _ = table.pointer_move(&PointerEvent::primary_move(i32::from(x), i32::from(y)));
            }
            Op::Up { x, y } => {
                let event = PointerEvent::primary_up(i32::from(x), i32::from(y));
                let _ = table.pointer_up(&event, &mut router);
            }
            Op::AddRow => {
                ids.push(table.add_row(["+"]).expect("row accepted"));
            }
            Op::AddColumn => {
                table.add_column("col", Alignment::Center).expect("column accepted");
            }
            Op::Detach { row } => {
                if let Some(id) = pick(&ids, row) {
                    let _ = table.detach_drag(id, &mut router);
                }
            }
            Op::Attach { row } => {
                if let Some(id) = pick(&ids, row) {
                    let _ = table.attach_drag(id);
                }
            }
            Op::Tick { ms } => {
                table.tick(Duration::from_millis(u64::from(ms)));
            }
        }

        // Listeners exist exactly while a row is being dragged.
        assert_eq!(router.is_empty(), table.active_drag().is_none());

        let mut seen = BTreeSet::new();
        for row in table.rows_by_rank() {
            if !row.is_dragged() {
                assert!(seen.insert(row.rank()), "duplicate rank {}", row.rank());
            }
        }
    }

    let _ = table.pointer_up(&PointerEvent::primary_up(0, 0), &mut router);
    let first = table.ledger().first_rank();
    let ranks: BTreeSet<u32> = table.rows_by_rank().iter().map(|row| row.rank()).collect();
    let expected: BTreeSet<u32> = (first..first + ids.len() as u32).collect();
    assert_eq!(ranks, expected);
    assert!(router.is_empty());
});

fn pick(ids: &[RowId], raw: u8) -> Option<RowId> {
    if ids.is_empty() {
        None
    } else {
        Some(ids[usize::from(raw) % ids.len()])
    }
}
