//! Millisecond tick clock for boards without a HAL time driver.
//!
//! A [`TickClock`] is a wrapping `u32` millisecond counter advanced from the
//! SysTick handler and read from any context under a critical section. It
//! wraps after ~49.7 days; [`Millis::duration_since`] uses wrapping
//! subtraction so debounce comparisons stay correct across the rollover.
//!
//! ```ignore
//! static CLOCK: TickClock = TickClock::new();
//!
//! #[cortex_m_rt::exception]
//! fn SysTick() {
//!     CLOCK.tick();
//! }
//! ```

use core::cell::Cell;
use critical_section::Mutex;

use crate::time::{TimeDuration, TimeInstant, TimeSource};

/// Duration in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MillisDuration(pub u64);

impl TimeDuration for MillisDuration {
    fn as_millis(&self) -> u64 {
        self.0
    }
}

/// Point in time, in milliseconds since the clock started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Millis(pub u32);

impl TimeInstant for Millis {
    type Duration = MillisDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        MillisDuration(self.0.wrapping_sub(earlier.0) as u64)
    }
}

/// Wrapping millisecond counter shared between the tick interrupt and readers.
pub struct TickClock {
    millis: Mutex<Cell<u32>>,
}

impl TickClock {
    /// Creates a clock starting at zero. Usable in a `static`.
    pub const fn new() -> Self {
        Self {
            millis: Mutex::new(Cell::new(0)),
        }
    }

    /// Advances the clock by one millisecond. Call from the 1 ms tick handler.
    pub fn tick(&self) {
        self.advance(1);
    }

    /// Advances the clock by `millis`, wrapping on overflow.
    pub fn advance(&self, millis: u32) {
        critical_section::with(|cs| {
            let counter = self.millis.borrow(cs);
            counter.set(counter.get().wrapping_add(millis));
        });
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource<Millis> for TickClock {
    fn now(&self) -> Millis {
        critical_section::with(|cs| Millis(self.millis.borrow(cs).get()))
    }
}
