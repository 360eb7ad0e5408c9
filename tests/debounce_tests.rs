//! Integration tests for DebounceFilter and ButtonState

mod common;
use common::*;

use edge_blink::{
    ButtonState, DebounceDecision, DebounceFilter, EdgeDetector, LogicalLevel, Millis,
    SharedButtonState,
};

#[test]
fn spaced_edges_always_alternate() {
    let filter = DebounceFilter::default();
    let mut state = ButtonState::<Millis>::unknown();
    let mut previous: Option<bool> = None;

    for i in 0..20u32 {
        let level = i % 2 == 0;
        let now = Millis(i * 75 + (i % 3) * 7);

        match filter.step(level, now, &mut state) {
            DebounceDecision::Transition(new_level) => {
                assert_eq!(new_level, level);
                assert_ne!(Some(new_level), previous);
                previous = Some(new_level);
            }
            DebounceDecision::NoChange => panic!("edge {} at {:?} was rejected", i, now),
        }
    }
}

#[test]
fn bounces_inside_window_leave_state_identical() {
    let filter = DebounceFilter::default();
    let mut state = ButtonState::<Millis>::unknown();
    filter.step(true, Millis(1_000), &mut state);
    let accepted = state;

    for gap in 0..50u32 {
        let level = gap % 2 == 1;
        let decision = filter.step(level, Millis(1_000 + gap), &mut state);

        assert_eq!(decision, DebounceDecision::NoChange);
        assert_eq!(state, accepted);
    }
    assert_eq!(state.last_transition_time(), Some(Millis(1_000)));
}

#[test]
fn first_edge_at_time_zero_transitions() {
    let filter = DebounceFilter::default();
    let prior = ButtonState::<Millis>::unknown();

    assert_eq!(prior.last_transition_time(), None);
    assert_eq!(
        filter.evaluate(true, Millis(0), &prior),
        DebounceDecision::Transition(true)
    );
}

#[test]
fn accepted_edges_follow_the_window() {
    // Edges at t = 0, 10, 60, 200 ms with levels 1, 0, 1, 0.
    let timer = MockTimeSource::new();
    let shared = SharedButtonState::<Millis>::new();
    let detector = EdgeDetector::new(MockInputPin::new(), &timer, &shared, DebounceFilter::new(50));

    let edges = [(0, true), (10, false), (60, true), (200, false)];
    let mut accepted = heapless::Vec::<u32, 4>::new();

    for (t, level) in edges {
        if let DebounceDecision::Transition(_) = detector.on_edge(level, Millis(t)) {
            accepted.push(t).unwrap();
        }
    }

    // t=60 repeats the level accepted at t=0 once the bounce at t=10 is
    // discarded, so it is not a new transition.
    assert_eq!(accepted.as_slice(), &[0, 200]);
    assert_eq!(shared.logical_state(), LogicalLevel::Low);
    assert_eq!(shared.snapshot().last_transition_time(), Some(Millis(200)));
    assert_eq!(shared.bounce_count(), 1);
}

#[test]
fn accepted_edges_with_a_release_between() {
    // Same timeline, but the release at t=10 is replaced by one past the window.
    let timer = MockTimeSource::new();
    let shared = SharedButtonState::<Millis>::new();
    let detector = EdgeDetector::new(MockInputPin::new(), &timer, &shared, DebounceFilter::new(50));

    let edges = [(0, true), (10, false), (55, false), (110, true), (200, false)];
    let mut accepted = heapless::Vec::<u32, 5>::new();

    for (t, level) in edges {
        if let DebounceDecision::Transition(_) = detector.on_edge(level, Millis(t)) {
            accepted.push(t).unwrap();
        }
    }

    assert_eq!(accepted.as_slice(), &[0, 55, 110, 200]);
}

#[test]
fn custom_window_is_respected() {
    let filter = DebounceFilter::new(5);
    let mut state = ButtonState::<Millis>::unknown();
    filter.step(false, Millis(0), &mut state);

    assert_eq!(filter.step(true, Millis(4), &mut state), DebounceDecision::NoChange);
    assert_eq!(
        filter.step(true, Millis(5), &mut state),
        DebounceDecision::Transition(true)
    );
    assert_eq!(filter.window_ms(), 5);
}

#[test]
fn window_measured_across_clock_rollover() {
    let filter = DebounceFilter::default();
    let mut state = ButtonState::<Millis>::unknown();
    filter.step(true, Millis(u32::MAX - 20), &mut state);

    assert_eq!(filter.step(false, Millis(10), &mut state), DebounceDecision::NoChange);
    assert_eq!(
        filter.step(false, Millis(29), &mut state),
        DebounceDecision::Transition(false)
    );
}
