//! Time-window debounce decisions.
//!
//! [`DebounceFilter::evaluate`] is a pure function of the sampled level, the
//! current time and the prior [`ButtonState`]. It never touches the state;
//! callers commit a [`DebounceDecision::Transition`] with
//! [`ButtonState::apply`], which writes the level and timestamp together.

use crate::time::{TimeDuration, TimeInstant};

/// Default minimum time between accepted transitions.
pub const DEFAULT_DEBOUNCE_WINDOW_MS: u32 = 50;

/// Debounced logical level of an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LogicalLevel {
    /// No transition accepted since startup.
    Unknown,
    Low,
    High,
}

impl LogicalLevel {
    /// Returns `Some(level)` once a transition has been accepted.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            LogicalLevel::Unknown => None,
            LogicalLevel::Low => Some(false),
            LogicalLevel::High => Some(true),
        }
    }
}

impl From<bool> for LogicalLevel {
    fn from(level: bool) -> Self {
        if level {
            LogicalLevel::High
        } else {
            LogicalLevel::Low
        }
    }
}

/// Outcome of one debounce evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebounceDecision {
    /// Same level as before, or a bounce inside the window. Discarded.
    NoChange,
    /// Accepted transition to the contained level.
    Transition(bool),
}

/// Debounced state of one digital input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonState<I> {
    raw_level: bool,
    logical_state: LogicalLevel,
    last_transition_time: Option<I>,
}

impl<I: TimeInstant> ButtonState<I> {
    /// Startup state: logical level unknown, no transition recorded.
    pub const fn unknown() -> Self {
        Self {
            raw_level: false,
            logical_state: LogicalLevel::Unknown,
            last_transition_time: None,
        }
    }

    /// Pin level sampled at the last accepted transition.
    pub fn raw_level(&self) -> bool {
        self.raw_level
    }

    /// Debounced level.
    pub fn logical_state(&self) -> LogicalLevel {
        self.logical_state
    }

    /// Time of the last accepted transition.
    pub fn last_transition_time(&self) -> Option<I> {
        self.last_transition_time
    }

    /// Commits an accepted transition.
    pub fn apply(&mut self, level: bool, now: I) {
        self.raw_level = level;
        self.logical_state = LogicalLevel::from(level);
        self.last_transition_time = Some(now);
    }
}

impl<I: TimeInstant> Default for ButtonState<I> {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Fixed-window debounce filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebounceFilter {
    window_ms: u32,
}

impl DebounceFilter {
    /// Creates a filter with the given window in milliseconds.
    pub const fn new(window_ms: u32) -> Self {
        Self { window_ms }
    }

    /// Window in milliseconds.
    pub fn window_ms(&self) -> u32 {
        self.window_ms
    }

    /// Decides whether `candidate` sampled at `now` is a real transition.
    ///
    /// The first edge after startup always transitions; there is no earlier
    /// timestamp to measure the window against.
    pub fn evaluate<I: TimeInstant>(
        &self,
        candidate: bool,
        now: I,
        prior: &ButtonState<I>,
    ) -> DebounceDecision {
        if prior.logical_state == LogicalLevel::from(candidate) {
            return DebounceDecision::NoChange;
        }

        let Some(last) = prior.last_transition_time else {
            return DebounceDecision::Transition(candidate);
        };
        if prior.logical_state == LogicalLevel::Unknown {
            return DebounceDecision::Transition(candidate);
        }

        if now.duration_since(last).as_millis() < u64::from(self.window_ms) {
            DebounceDecision::NoChange
        } else {
            DebounceDecision::Transition(candidate)
        }
    }

    /// Evaluates and, on a transition, applies it to `state`.
    pub fn step<I: TimeInstant>(
        &self,
        candidate: bool,
        now: I,
        state: &mut ButtonState<I>,
    ) -> DebounceDecision {
        let decision = self.evaluate(candidate, now, state);
        if let DebounceDecision::Transition(level) = decision {
            state.apply(level, now);
        }
        decision
    }
}

impl Default for DebounceFilter {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_WINDOW_MS)
    }
}
