//! Cross-context cell holding the debounced button state.
//!
//! Written from the edge interrupt, read from cooperative context. Every
//! access copies or replaces the whole [`ButtonState`] inside one critical
//! section, so a reader never sees a new level paired with an old timestamp.
//! A discarded edge leaves the state untouched; only the bounce counter and
//! the last-sample level move.

use core::cell::Cell;
use critical_section::Mutex;

use crate::debounce::{ButtonState, DebounceDecision, DebounceFilter, LogicalLevel};
use crate::time::TimeInstant;

struct Slot<I> {
    state: Cell<ButtonState<I>>,
    last_sample: Cell<bool>,
    bounced: Cell<u32>,
}

/// Interrupt-safe home of a [`ButtonState`].
///
/// Construct it as a `static` before interrupts are enabled:
///
/// ```ignore
/// static BUTTON: SharedButtonState<Millis> = SharedButtonState::new();
/// ```
pub struct SharedButtonState<I> {
    slot: Mutex<Slot<I>>,
}

impl<I: TimeInstant> SharedButtonState<I> {
    /// Creates a cell holding the startup (unknown) state.
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(Slot {
                state: Cell::new(ButtonState::unknown()),
                last_sample: Cell::new(false),
                bounced: Cell::new(0),
            }),
        }
    }

    /// Copies the whole state out in one critical section.
    pub fn snapshot(&self) -> ButtonState<I> {
        critical_section::with(|cs| self.slot.borrow(cs).state.get())
    }

    /// Debounced level.
    pub fn logical_state(&self) -> LogicalLevel {
        self.snapshot().logical_state()
    }

    /// Level read by the most recent edge, accepted or not.
    pub fn last_sample(&self) -> bool {
        critical_section::with(|cs| self.slot.borrow(cs).last_sample.get())
    }

    /// Number of edges discarded as contact bounce.
    pub fn bounce_count(&self) -> u32 {
        critical_section::with(|cs| self.slot.borrow(cs).bounced.get())
    }

    /// Resets to the startup state.
    pub fn reset(&self) {
        critical_section::with(|cs| {
            let slot = self.slot.borrow(cs);
            slot.state.set(ButtonState::unknown());
            slot.last_sample.set(false);
            slot.bounced.set(0);
        });
    }

    /// Records one sampled edge and commits the filter's decision.
    ///
    /// Read, decision and write happen inside the same critical section.
    pub(crate) fn commit_edge(
        &self,
        filter: &DebounceFilter,
        level: bool,
        now: I,
    ) -> DebounceDecision {
        critical_section::with(|cs| {
            let slot = self.slot.borrow(cs);
            let mut state = slot.state.get();
            slot.last_sample.set(level);

            let decision = filter.step(level, now, &mut state);
            match decision {
                DebounceDecision::Transition(_) => slot.state.set(state),
                // Repeating the current level is not a bounce.
                DebounceDecision::NoChange if state.logical_state() != LogicalLevel::from(level) => {
                    slot.bounced.set(slot.bounced.get().wrapping_add(1));
                }
                DebounceDecision::NoChange => {}
            }
            decision
        })
    }
}

impl<I: TimeInstant> Default for SharedButtonState<I> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Millis;

    #[test]
    fn starts_unknown() {
        let shared = SharedButtonState::<Millis>::new();
        assert_eq!(shared.logical_state(), LogicalLevel::Unknown);
        assert_eq!(shared.snapshot().last_transition_time(), None);
    }

    #[test]
    fn commit_updates_level_and_timestamp_together() {
        let shared = SharedButtonState::<Millis>::new();
        let filter = DebounceFilter::default();

        shared.commit_edge(&filter, true, Millis(7));

        let state = shared.snapshot();
        assert_eq!(state.logical_state(), LogicalLevel::High);
        assert_eq!(state.last_transition_time(), Some(Millis(7)));
    }

    #[test]
    fn bounce_keeps_logical_pair_and_counts() {
        let shared = SharedButtonState::<Millis>::new();
        let filter = DebounceFilter::default();
        shared.commit_edge(&filter, true, Millis(0));

        let before = shared.snapshot();

        let decision = shared.commit_edge(&filter, false, Millis(10));

        assert_eq!(decision, DebounceDecision::NoChange);
        assert_eq!(shared.snapshot(), before);
        assert!(!shared.last_sample());
        assert_eq!(shared.bounce_count(), 1);
    }

    #[test]
    fn reset_returns_to_startup_state() {
        let shared = SharedButtonState::<Millis>::new();
        let filter = DebounceFilter::default();
        shared.commit_edge(&filter, true, Millis(0));
        shared.commit_edge(&filter, false, Millis(1));

        shared.reset();

        assert_eq!(shared.snapshot(), ButtonState::unknown());
        assert_eq!(shared.bounce_count(), 0);
    }
}
