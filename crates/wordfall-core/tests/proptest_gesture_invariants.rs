//! Property-based invariant tests for the gesture recognizer.
//!
//! 1. A single press/move*/release session is either a drag or a click,
//!    never both.
//! 2. A session that never exceeds the threshold yields exactly one click
//!    once the double-click window has elapsed.
//! 3. Drag sequences are well-formed: one DragStart, one DragEnd, and the
//!    DragMove deltas sum to the displacement since the drag started.
//! 4. Arbitrary interleavings of pointers never panic and leave no sessions
//!    behind once every pointer has been released.

use proptest::prelude::*;
use web_time::{Duration, Instant};
use wordfall_core::geometry::Point;
use wordfall_core::gesture::{GestureEvent, GestureRecognizer, ItemId, PressTarget};
use wordfall_core::pointer::PointerEvent;

// ── Strategies ──────────────────────────────────────────────────────────

fn offsets() -> impl Strategy<Value = Vec<(f32, f32)>> {
    prop::collection::vec((-40.0f32..40.0, -40.0f32..40.0), 0..12)
}

#[derive(Debug, Clone)]
enum Op {
    Down(u32, u64),
    Move(u32, f32, f32),
    Up(u32),
    Cancel(u32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u32..4, 0u64..4).prop_map(|(p, i)| Op::Down(p, i)),
        (0u32..4, 0.0f32..300.0, 0.0f32..300.0).prop_map(|(p, x, y)| Op::Move(p, x, y)),
        (0u32..4).prop_map(Op::Up),
        (0u32..4).prop_map(Op::Cancel),
    ]
}

fn run_session(
    gr: &mut GestureRecognizer,
    start: Point,
    moves: &[(f32, f32)],
    reorderable: bool,
    t: Instant,
) -> Vec<GestureEvent> {
    let mut events = Vec::new();
    let target = Some(PressTarget::new(ItemId(1), reorderable));
    events.extend(gr.process(&PointerEvent::down(1, start.x, start.y).unwrap(), target, t));
    let mut last = start;
    for (i, (dx, dy)) in moves.iter().enumerate() {
        last = Point::new(start.x + dx, start.y + dy);
        let at = t + Duration::from_millis(i as u64 + 1);
        events.extend(gr.process(&PointerEvent::moved(1, last.x, last.y).unwrap(), None, at));
    }
    events.extend(gr.process(
        &PointerEvent::up(1, last.x, last.y).unwrap(),
        None,
        t + Duration::from_millis(50),
    ));
    events.extend(gr.poll(t + Duration::from_secs(5)));
    events
}

// ═══════════════════════════════════════════════════════════════════════
// 1-2. Drag and click are exclusive
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn drag_and_click_are_exclusive(moves in offsets(), reorderable in any::<bool>()) {
        let mut gr = GestureRecognizer::default();
        let start = Point::new(200.0, 200.0);
        let events = run_session(&mut gr, start, &moves, reorderable, Instant::now());

        let threshold = gr.config().drag_threshold;
        let exceeded = moves
            .iter()
            .any(|(dx, dy)| dx.abs() > threshold || dy.abs() > threshold);

        let clicks = events.iter().filter(|e| matches!(e, GestureEvent::Click { .. })).count();
        let doubles = events.iter().filter(|e| matches!(e, GestureEvent::DoubleClick { .. })).count();
        let ends = events.iter().filter(|e| matches!(e, GestureEvent::DragEnd { .. })).count();

        prop_assert_eq!(doubles, 0);
        if exceeded {
            prop_assert_eq!(clicks, 0);
            prop_assert_eq!(ends, 1);
        } else {
            prop_assert_eq!(clicks, 1);
            prop_assert_eq!(ends, 0);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Well-formed drag sequences
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn drag_sequence_is_well_formed(moves in offsets()) {
        let mut gr = GestureRecognizer::default();
        let start = Point::new(200.0, 200.0);
        let events = run_session(&mut gr, start, &moves, true, Instant::now());

        let starts: Vec<usize> = events
            .iter()
            .enumerate()
            .filter(|(_, e)| matches!(e, GestureEvent::DragStart { .. }))
            .map(|(i, _)| i)
            .collect();
        prop_assert!(starts.len() <= 1);

        if let Some(&first) = starts.first() {
            prop_assert!(matches!(events.last(), Some(GestureEvent::DragEnd { .. })), "last event should be DragEnd");
            let mut sum = (0.0f32, 0.0f32);
            let mut first_move = None;
            let mut mode_seen = None;
            for e in &events[first..] {
                if let GestureEvent::DragMove { delta, current, mode, .. } = e {
                    if first_move.is_none() {
                        first_move = Some(Point::new(current.x - delta.0, current.y - delta.1));
                    }
                    if let Some(m) = mode_seen {
                        prop_assert_eq!(m, *mode);
                    }
                    mode_seen = Some(*mode);
                    sum.0 += delta.0;
                    sum.1 += delta.1;
                }
            }
            if let (Some(from), Some(GestureEvent::DragEnd { end, .. })) = (first_move, events.last()) {
                prop_assert!((from.x + sum.0 - end.x).abs() < 1e-2);
                prop_assert!((from.y + sum.1 - end.y).abs() < 1e-2);
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Arbitrary multi-pointer interleavings
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn interleavings_never_leak_sessions(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut gr = GestureRecognizer::default();
        let t = Instant::now();
        for (i, op) in ops.iter().enumerate() {
            let at = t + Duration::from_millis(i as u64 * 10);
            match *op {
                Op::Down(p, item) => {
                    gr.process(
                        &PointerEvent::down(p, 10.0, 10.0).unwrap(),
                        Some(PressTarget::new(ItemId(item), item % 2 == 0)),
                        at,
                    );
                }
                Op::Move(p, x, y) => {
                    gr.process(&PointerEvent::moved(p, x, y).unwrap(), None, at);
                }
                Op::Up(p) => {
                    gr.process(&PointerEvent::up(p, 10.0, 10.0).unwrap(), None, at);
                }
                Op::Cancel(p) => {
                    gr.process(&PointerEvent::cancel(p, 10.0, 10.0).unwrap(), None, at);
                }
            }
            gr.poll(at);
        }
        let end = t + Duration::from_secs(60);
        for p in 0..4 {
            gr.process(&PointerEvent::up(p, 0.0, 0.0).unwrap(), None, end);
        }
        gr.poll(end + Duration::from_secs(1));
        prop_assert_eq!(gr.active_sessions(), 0);
        prop_assert!(gr.next_deadline().is_none());
    }
}
