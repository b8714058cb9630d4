//! End-to-end reorder scenarios through the public facade, with a host loop
//! that only forwards global move/up events while someone is subscribed.

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use sortrow::prelude::*;
use sortrow::{
    ClampCode, DragConfig, DragController, DragIgnoredReason, DragSurface, PlainSurface,
    PointerPhase, Size, SurfaceId,
};

/// Forward a window-level event the way a host event loop would.
fn route(table: &mut Table, input: &mut InputRouter, event: &PointerEvent) -> Option<TableOutcome> {
    if input.listeners_for_phase(event.phase).is_empty() {
        return None;
    }
    let dispatch = match event.phase {
        PointerPhase::Move => table.pointer_move(event),
        PointerPhase::Up => table.pointer_up(event, input),
        PointerPhase::Down => return None,
    };
    Some(dispatch.outcome)
}

fn names(table: &Table) -> Vec<String> {
    table
        .rows_by_rank()
        .iter()
        .map(|row| row.cells()[0].content.clone())
        .collect()
}

fn fruit_table(config: TableConfig) -> (Table, Vec<RowId>) {
    let mut table = Table::new(config).expect("valid config");
    table.add_column("Fruit", Alignment::Left).expect("column");
    table.add_column("Qty", Alignment::Right).expect("column");
    let ids = ["apple", "banana", "cherry", "date", "elder"]
        .iter()
        .map(|name| table.add_row([*name, "1"]).expect("row"))
        .collect();
    (table, ids)
}

#[test]
fn touch_drag_moves_last_row_to_top() {
    let config: TableConfig =
        serde_json::from_str(r#"{"row_height": 24, "header_height": 32, "width": 400}"#)
            .expect("valid json");
    let (mut table, ids) = fruit_table(config);
    let mut input = InputRouter::new();
    assert_eq!(table.height(), 32 + 5 * 24);

    // Nothing is subscribed yet, so the host drops stray moves.
    assert_eq!(
        route(&mut table, &mut input, &PointerEvent::touch(PointerPhase::Move, Point::new(0, 0), 1)),
        None
    );

    let down = table
        .pointer_down(
            ids[4],
            &PointerEvent::touch(PointerPhase::Down, Point::new(10, 300), 1),
            &mut input,
        )
        .expect("known row");
    assert!(matches!(
        down.outcome,
        TableOutcome::Drag(sortrow::DragDispatch {
            outcome: DragOutcome::Started { .. },
            ..
        })
    ));
    assert_eq!(input.len(), 1);

    let moved = route(
        &mut table,
        &mut input,
        &PointerEvent::touch(PointerPhase::Move, Point::new(10, 200), 1),
    );
    assert!(matches!(
        moved,
        Some(TableOutcome::Reranked {
            from: 5,
            to: 1,
            shifted: 4,
            ..
        })
    ));

    let dropped = route(
        &mut table,
        &mut input,
        &PointerEvent::touch(PointerPhase::Up, Point::new(10, 200), 0),
    );
    assert!(matches!(
        dropped,
        Some(TableOutcome::Dropped {
            rank: 1,
            offset: 32,
            ..
        })
    ));
    assert!(input.is_empty());
    assert_eq!(names(&table), vec!["elder", "apple", "banana", "cherry", "date"]);

    // Siblings glide into place; the host keeps ticking until settled.
    let mut frames = 0;
    while table.tick(std::time::Duration::from_millis(16)) {
        frames += 1;
    }
    assert!(frames > 0);
    for row in table.rows_by_rank() {
        assert_eq!(row.visual_top(), table.ledger().offset_from_rank(row.rank()));
    }
}

#[test]
fn drag_down_then_back_restores_order() {
    let (mut table, ids) = fruit_table(TableConfig::default());
    let mut input = InputRouter::new();
    table
        .pointer_down(ids[0], &PointerEvent::primary_down(0, 0), &mut input)
        .expect("known row");

    for y in (0..=60).step_by(5) {
        route(&mut table, &mut input, &PointerEvent::primary_move(0, y));
    }
    assert_eq!(table.row(ids[0]).expect("row").rank(), 4);
    for y in (0..=60).rev().step_by(5) {
        route(&mut table, &mut input, &PointerEvent::primary_move(0, y));
    }
    route(&mut table, &mut input, &PointerEvent::primary_up(0, 0));

    assert_eq!(names(&table), vec!["apple", "banana", "cherry", "date", "elder"]);
}

#[test]
fn sticky_clamp_holds_until_pointer_returns() {
    let container = Rect::from_size(200, 100);
    let mut controller =
        DragController::new(SurfaceId::new(9), DragConfig::default().with_container(container))
            .expect("valid controller");
    let mut surface = PlainSurface::new(Point::new(140, 0), Size::new(50, 20));
    let mut input = InputRouter::new();

    controller.pointer_down(&mut surface, &PointerEvent::primary_down(500, 300), &mut input);

    let past = controller.pointer_move(&mut surface, &PointerEvent::primary_move(515, 300));
    assert!(matches!(
        past.outcome,
        DragOutcome::Moved { clamp, .. } if clamp == ClampCode::RIGHT
    ));
    assert_eq!(surface.position(), Point::new(149, 0));
    assert_eq!(controller.session().map(|s| s.anchor().x), Some(500));

    controller.pointer_move(&mut surface, &PointerEvent::primary_move(510, 300));
    assert_eq!(surface.position().x, 149);
    assert_eq!(controller.session().map(|s| s.anchor().x), Some(500));

    controller.pointer_move(&mut surface, &PointerEvent::primary_move(501, 300));
    assert_eq!(surface.position().x, 150);
    assert_eq!(controller.session().map(|s| s.anchor().x), Some(501));

    controller.pointer_move(&mut surface, &PointerEvent::primary_move(490, 300));
    assert_eq!(surface.position().x, 139);

    controller.pointer_up(&mut surface, &PointerEvent::primary_up(490, 300), &mut input);
    assert!(!surface.is_dragged());
    assert!(input.is_empty());
}

#[test]
fn touch_policy_is_enforced() {
    let mut config = TableConfig::default();
    config.allow_touch = false;
    let (mut table, ids) = fruit_table(config);
    let mut input = InputRouter::new();

    let down = table
        .pointer_down(
            ids[0],
            &PointerEvent::touch(PointerPhase::Down, Point::new(0, 0), 1),
            &mut input,
        )
        .expect("known row");
    assert!(matches!(
        down.outcome,
        TableOutcome::Drag(d) if d.ignored_reason() == Some(DragIgnoredReason::TouchDisabled)
    ));

    let (mut table, ids) = fruit_table(TableConfig::default());
    let pinch = table
        .pointer_down(
            ids[0],
            &PointerEvent::touch(PointerPhase::Down, Point::new(0, 0), 2),
            &mut input,
        )
        .expect("known row");
    assert!(matches!(
        pinch.outcome,
        TableOutcome::Drag(d) if d.ignored_reason() == Some(DragIgnoredReason::NotPrimaryActivation)
    ));
    assert!(input.is_empty());
}

#[test]
fn hooks_registered_by_legacy_name_can_veto() {
    let (mut table, ids) = fruit_table(TableConfig::default());
    let event: HookEvent = "mousedown".parse().expect("known alias");
    let starts = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&starts);
    table
        .add_hook(ids[1], event, move |_| {
            *counter.borrow_mut() += 1;
            HookVerdict::Suppress
        })
        .expect("draggable row");

    let mut input = InputRouter::new();
    let down = table
        .pointer_down(ids[1], &PointerEvent::primary_down(0, 0), &mut input)
        .expect("known row");

    assert_eq!(*starts.borrow(), 1);
    assert!(matches!(
        down.outcome,
        TableOutcome::Drag(d) if d.ignored_reason() == Some(DragIgnoredReason::StartSuppressed)
    ));
    assert_eq!(table.active_drag(), None);
    assert!(input.is_empty());
}

#[test]
fn errors_flow_through_the_facade() {
    fn build(align: &str) -> sortrow::Result<Table> {
        let mut table = Table::new(TableConfig::default())?;
        table.add_column("Name", align.parse()?)?;
        Ok(table)
    }

    assert!(build("center").is_ok());
    let err = build("middle").expect_err("unknown keyword");
    assert_eq!(err.error_type(), "alignment");
    assert!(!err.is_recoverable());

    let mut input = InputRouter::new();
    let (mut table, _) = fruit_table(TableConfig::default());
    let err: Error = table
        .pointer_down(RowId(42), &PointerEvent::primary_down(0, 0), &mut input)
        .expect_err("unknown row")
        .into();
    assert!(err.is_recoverable());
}
