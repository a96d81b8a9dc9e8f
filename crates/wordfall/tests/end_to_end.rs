//! End-to-end scenarios through the public facade.

use web_time::{Duration, Instant};
use wordfall::prelude::*;
use wordfall::{ItemState, SearchPlacement};

const SPEECH: &str = "We choose to go to the Moon in this decade and do the other things, \
    not because they are easy, but because they are hard; because that goal will serve to \
    organize and measure the best of our energies and skills, because that challenge is one \
    that we are willing to accept, one we are unwilling to postpone, and one we intend to win.";

fn session(mode: ViewMode) -> Session {
    let config = EngineConfig {
        seed: Some(1962),
        ..EngineConfig::default()
    };
    let mut session = Session::new(config, Size::new(1280.0, 720.0)).unwrap();
    session.set_view_mode(mode);
    session
}

fn press(session: &mut Session, pointer: u32, at: Point, t: Instant) -> Vec<InteractionEffect> {
    let mut out = session.handle_pointer(&PointerEvent::down(pointer, at.x, at.y).unwrap(), t, &mut NoCapture);
    out.extend(session.handle_pointer(
        &PointerEvent::up(pointer, at.x, at.y).unwrap(),
        t + Duration::from_millis(30),
        &mut NoCapture,
    ));
    out
}

fn center(item: &DisplayItem) -> Point {
    Point::new(item.x() + item.width() / 2.0, item.y() + item.height() / 2.0)
}

#[test]
fn cloud_analysis_ranks_content_words() {
    let mut s = session(ViewMode::Cloud);
    let analysis = s.analyze(SPEECH, 5, true).unwrap();
    let words: Vec<(&str, usize)> = analysis
        .entries
        .iter()
        .map(|e| (e.word.as_str(), e.count))
        .collect();
    assert_eq!(words[0], ("one", 3));
    assert!(words.iter().all(|(w, _)| !wordfall::is_stopword(w)));
    assert_eq!(s.items().len(), 5);
    for (i, a) in s.items().iter().enumerate() {
        for b in &s.items()[i + 1..] {
            assert!(!a.rect.intersects(&b.rect));
        }
    }
}

#[test]
fn histogram_delete_then_search_back() {
    let mut s = session(ViewMode::Histogram);
    s.analyze(SPEECH, 4, true).unwrap();
    let first = s.items()[0].clone();
    let t = Instant::now();

    press(&mut s, 1, center(&first), t);
    let effects = press(&mut s, 1, center(&first), t + Duration::from_millis(120));
    assert!(matches!(effects[..], [InteractionEffect::DeleteArmed { .. }]));
    assert_eq!(s.stage().get(first.id).unwrap().state, ItemState::Deleting);

    let due = s.next_deadline().unwrap();
    assert_eq!(s.tick(due), vec![InteractionEffect::Removed { item: first.id }]);
    assert_eq!(s.items().len(), 3);

    // The word is gone from the stage but still in the text.
    let report = s.search(&first.label);
    assert!(report.outcome.is_found());
    assert!(matches!(report.placement, Some(SearchPlacement::Inserted(id)) if id != first.id));
    assert_eq!(s.items()[0].label, first.label);
}

#[test]
fn stopwords_are_searchable_even_when_excluded() {
    let mut s = session(ViewMode::Histogram);
    s.analyze(SPEECH, 10, true).unwrap();
    let report = s.search("The");
    assert_eq!(report.outcome.message(), "\"the\" shows up 3 times in the text");
    let report = s.search("Mars");
    assert_eq!(report.outcome, SearchOutcome::NotFound(wordfall::SearchHit {
        query: "mars".into(),
        count: 0,
    }));
}

#[test]
fn export_snapshot_is_independent() {
    let mut s = session(ViewMode::Cloud);
    s.analyze(SPEECH, 3, true).unwrap();
    let snapshot = s.snapshot();
    s.clear();
    assert_eq!(snapshot.len(), 3);
    assert!(s.items().is_empty());
}
