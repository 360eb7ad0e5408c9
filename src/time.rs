//! Time abstraction traits for platform-agnostic timing.
//!
//! The debounce logic only needs a monotonic clock with millisecond
//! resolution. Implement these for your HAL's instant type, or use
//! [`crate::clock::TickClock`] when a SysTick counter is all you have.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    ///
    /// Implementations backed by a wrapping counter should use wrapping
    /// subtraction so the result stays correct across a rollover.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}
