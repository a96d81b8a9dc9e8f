#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use web_time::{Duration, Instant};
use wordfall_core::geometry::Size;
use wordfall_core::pointer::{PointerEvent, PointerId, PointerPhase};
use wordfall_layout::ViewMode;
use wordfall_runtime::{EngineConfig, NoCapture, Session};

#[derive(Debug, Arbitrary)]
enum Step {
    Pointer { id: u8, phase: u8, x: u16, y: u16 },
    Tick { advance_ms: u16 },
    Search { word: u8 },
    ToggleView,
    Reanalyze { top_n: u8 },
}

const TEXT: &str = "apple banana apple cherry banana apple damson elder fig grape apple";
const WORDS: [&str; 4] = ["apple", "kiwi", "the", "fig"];

fuzz_target!(|steps: Vec<Step>| {
    let config = EngineConfig {
        seed: Some(0),
        ..EngineConfig::default()
    };
    let Ok(mut session) = Session::new(config, Size::new(800.0, 500.0)) else {
        return;
    };
    if session.analyze(TEXT, 10, true).is_err() {
        return;
    }

    let mut now = Instant::now();
    for step in steps.into_iter().take(256) {
        match step {
            Step::Pointer { id, phase, x, y } => {
                let phase = match phase % 4 {
                    0 => PointerPhase::Down,
                    1 => PointerPhase::Move,
                    2 => PointerPhase::Up,
                    _ => PointerPhase::Cancel,
                };
                let Ok(event) =
                    PointerEvent::new(PointerId(u32::from(id % 4)), f32::from(x % 900), f32::from(y % 600), phase)
                else {
                    continue;
                };
                session.handle_pointer(&event, now, &mut NoCapture);
            }
            Step::Tick { advance_ms } => {
                now += Duration::from_millis(u64::from(advance_ms % 1000));
                session.tick(now);
            }
            Step::Search { word } => {
                session.search(WORDS[usize::from(word) % WORDS.len()]);
            }
            Step::ToggleView => {
                let next = match session.stage().mode() {
                    ViewMode::Cloud => ViewMode::Histogram,
                    ViewMode::Histogram => ViewMode::Cloud,
                };
                session.set_view_mode(next);
            }
            Step::Reanalyze { top_n } => {
                let _ = session.analyze(TEXT, i64::from(top_n), top_n % 2 == 0);
            }
        }

        // One live item per label, whatever happened.
        let mut labels: Vec<&str> = session
            .items()
            .iter()
            .filter(|item| !item.is_deleting())
            .map(|item| item.label.as_str())
            .collect();
        let total = labels.len();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), total);
    }
});
