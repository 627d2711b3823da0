//! Property-based invariant tests for traversal and chord handling.
//!
//! Verifies:
//! 1.  Wrap traversal always yields an in-range index for non-empty
//!     sequences, including synthetic anchors of -1 and len
//! 2.  Wrap traversal from an in-range anchor moves whenever len > 1
//! 3.  len forward steps under wrap form a cycle back to the start
//! 4.  Clamp traversal yields an in-range index or None, never panics
//! 5.  Clamp traversal is idempotent at the boundary: once None, forward
//!     stays None
//! 6.  Clamp traversal moves by exactly one from in-range anchors
//! 7.  The chord interpreter is total over arbitrary event streams and its
//!     pending state always mirrors the last consumed direction key
//! 8.  Completed chords always name a registered category
//! 9.  Driving a navigator with arbitrary key/tick streams never leaves
//!     more than one element staged or more than one element pinged
//! 10. A reported staged element always carries the stage marker

use std::time::{Duration, Instant};

use keyleap_core::category::{BoundaryPolicy, Category};
use keyleap_core::event::{KeyCode, KeyEvent, KeyEventKind, Modifiers};
use keyleap_core::page::Marker;
use keyleap_engine::chord::{ChordFeed, ChordInterpreter};
use keyleap_engine::traversal::{Direction, next_index};
use keyleap_engine::Navigator;
use keyleap_harness::{NodeSpec, ScriptedPage};
use proptest::prelude::*;

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Forward), Just(Direction::Backward)]
}

fn arb_len_and_anchor() -> impl Strategy<Value = (usize, isize)> {
    (1usize..32).prop_flat_map(|len| (Just(len), -1isize..=len as isize))
}

fn arb_char() -> impl Strategy<Value = char> {
    // Direction keys, category keys, and noise in roughly equal measure.
    prop::sample::select(vec![
        '[', ']', 'h', 'p', 'b', 'l', 'i', 'c', 't', 'n', 'm', 's', 'f', 'a', 'T', 'L', 'd', 'q',
        'x', 'Z', '?', ' ',
    ])
}

fn arb_modifiers() -> impl Strategy<Value = Modifiers> {
    prop_oneof![
        Just(Modifiers::NONE),
        Just(Modifiers::SHIFT),
        Just(Modifiers::CTRL),
        Just(Modifiers::ALT),
        Just(Modifiers::SUPER),
    ]
}

fn arb_kind() -> impl Strategy<Value = KeyEventKind> {
    prop_oneof![
        Just(KeyEventKind::Press),
        Just(KeyEventKind::Repeat),
        Just(KeyEventKind::Release),
    ]
}

fn arb_key_event() -> impl Strategy<Value = KeyEvent> {
    (
        prop_oneof![
            arb_char().prop_map(KeyCode::Char),
            Just(KeyCode::Enter),
            Just(KeyCode::Escape),
            Just(KeyCode::Tab),
        ],
        arb_modifiers(),
        arb_kind(),
    )
        .prop_map(|(code, modifiers, kind)| KeyEvent {
            code,
            modifiers,
            kind,
        })
}

fn is_plain_press(ev: &KeyEvent) -> bool {
    ev.kind == KeyEventKind::Press
        && !ev
            .modifiers
            .intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::SUPER)
}

// ── Traversal invariants ──────────────────────────────────────────────

proptest! {
    #[test]
    fn wrap_stays_in_range(
        (len, anchor) in arb_len_and_anchor(),
        dir in arb_direction(),
    ) {
        let idx = next_index(anchor, dir, len, BoundaryPolicy::Wrap);
        prop_assert!(idx.is_some());
        prop_assert!(idx.unwrap() < len);
    }

    #[test]
    fn wrap_moves_from_member_anchors(
        (len, anchor) in arb_len_and_anchor(),
        dir in arb_direction(),
    ) {
        prop_assume!(len > 1);
        prop_assume!(anchor >= 0 && anchor < len as isize);
        let idx = next_index(anchor, dir, len, BoundaryPolicy::Wrap).unwrap();
        prop_assert_ne!(idx as isize, anchor);
    }

    #[test]
    fn wrap_forward_cycles(len in 1usize..32, start in 0usize..32) {
        prop_assume!(start < len);
        let mut idx = start as isize;
        for _ in 0..len {
            idx = next_index(idx, Direction::Forward, len, BoundaryPolicy::Wrap).unwrap() as isize;
        }
        prop_assert_eq!(idx as usize, start);
    }

    #[test]
    fn clamp_is_in_range_or_none(
        (len, anchor) in arb_len_and_anchor(),
        dir in arb_direction(),
    ) {
        if let Some(idx) = next_index(anchor, dir, len, BoundaryPolicy::Clamp) {
            prop_assert!(idx < len);
        }
    }

    #[test]
    fn clamp_is_idempotent_at_the_boundary(len in 1usize..32) {
        let last = len as isize - 1;
        prop_assert_eq!(next_index(last, Direction::Forward, len, BoundaryPolicy::Clamp), None);
        prop_assert_eq!(next_index(0, Direction::Backward, len, BoundaryPolicy::Clamp), None);
    }

    #[test]
    fn clamp_moves_by_one_from_member_anchors(
        (len, anchor) in arb_len_and_anchor(),
        dir in arb_direction(),
    ) {
        prop_assume!(anchor >= 0 && anchor < len as isize);
        if let Some(idx) = next_index(anchor, dir, len, BoundaryPolicy::Clamp) {
            prop_assert_eq!((idx as isize - anchor).abs(), 1);
        }
    }
}

// ── Chord interpreter invariants ──────────────────────────────────────

proptest! {
    #[test]
    fn chord_state_mirrors_consumed_direction_keys(
        stream in prop::collection::vec(arb_key_event(), 0..64),
    ) {
        let mut interp = ChordInterpreter::with_defaults();
        let t = Instant::now();
        let mut expected: Option<Direction> = None;

        for ev in &stream {
            match interp.feed(ev, t) {
                ChordFeed::Armed(dir) => {
                    prop_assert!(is_plain_press(ev));
                    match ev.code {
                        KeyCode::Char(']') => prop_assert_eq!(dir, Direction::Forward),
                        KeyCode::Char('[') => prop_assert_eq!(dir, Direction::Backward),
                        other => prop_assert!(false, "armed by {:?}", other),
                    }
                    expected = Some(dir);
                }
                ChordFeed::Complete { direction, category } => {
                    prop_assert!(is_plain_press(ev));
                    prop_assert_eq!(Some(direction), expected);
                    prop_assert!(Category::lookup(category).is_some());
                    expected = None;
                }
                ChordFeed::Ignored => {}
            }
            prop_assert_eq!(interp.pending_direction(), expected);
        }
    }
}

// ── Navigator invariants ──────────────────────────────────────────────

fn build_page() -> ScriptedPage {
    let mut page = ScriptedPage::new();
    page.insert(NodeSpec::heading());
    page.insert(NodeSpec::button());
    page.insert(NodeSpec::text_input());
    page.insert(NodeSpec::link());
    page.insert(NodeSpec::heading());
    page.insert(NodeSpec::button().hidden());
    page.insert(NodeSpec::text_input());
    page.insert(NodeSpec::checkbox());
    page
}

proptest! {
    #[test]
    fn navigator_never_marks_two_elements(
        stream in prop::collection::vec(arb_key_event(), 0..96),
    ) {
        let mut page = build_page();
        let mut nav = Navigator::with_defaults();
        let mut now = Instant::now();

        for ev in &stream {
            nav.handle_key(&mut page, ev, now);
            now += Duration::from_millis(7);
            nav.tick(&mut page, now);

            prop_assert!(page.marked(Marker::Stage).len() <= 1);
            prop_assert!(page.marked(Marker::Ping).len() <= 1);
            if let Some(staged) = nav.staged() {
                prop_assert!(page.has_marker(staged, Marker::Stage));
            }
        }
    }
}
