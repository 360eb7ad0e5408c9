//! Interrupt-context edge handling.
//!
//! [`EdgeDetector::handle_interrupt`] is what the pin's interrupt handler
//! calls: one pin read, one clock read, one critical section. It never
//! blocks or allocates. [`EdgeDetector::on_edge`] is the same logic without
//! the hardware read, for event sources that already carry the level.

use embedded_hal::digital::InputPin;

use crate::debounce::{DebounceDecision, DebounceFilter};
use crate::gpio::{self, EdgeBinding, EdgeTrigger, PinMode, SetupError};
use crate::shared::SharedButtonState;
use crate::time::{TimeInstant, TimeSource};

/// Samples the button pin on every edge and feeds the debounce filter.
///
/// # Type Parameters
/// * `'a` - Lifetime of the clock and shared-state references
/// * `P` - Input pin type
/// * `T` - Time source type
/// * `I` - Time instant type
pub struct EdgeDetector<'a, P, T, I> {
    pin: P,
    clock: &'a T,
    state: &'a SharedButtonState<I>,
    filter: DebounceFilter,
}

impl<'a, P, T, I> EdgeDetector<'a, P, T, I>
where
    P: InputPin,
    T: TimeSource<I>,
    I: TimeInstant,
{
    /// Creates a detector. The pin is not configured until [`Self::bind`].
    pub fn new(
        pin: P,
        clock: &'a T,
        state: &'a SharedButtonState<I>,
        filter: DebounceFilter,
    ) -> Self {
        Self {
            pin,
            clock,
            state,
            filter,
        }
    }

    /// Handles one edge interrupt: samples the pin and commits the decision.
    ///
    /// A failed pin read is logged and treated as [`DebounceDecision::NoChange`].
    pub fn handle_interrupt(&mut self) -> DebounceDecision {
        let level = match self.pin.is_high() {
            Ok(level) => level,
            Err(_) => {
                warn!("edge: pin read failed, edge dropped");
                return DebounceDecision::NoChange;
            }
        };
        let now = self.clock.now();
        self.on_edge(level, now)
    }

    /// Feeds an edge that occurred at `now` with pin `level`.
    pub fn on_edge(&self, level: bool, now: I) -> DebounceDecision {
        let decision = self.state.commit_edge(&self.filter, level, now);
        match decision {
            DebounceDecision::Transition(level) => {
                debug!("edge: accepted transition, level={}", level);
            }
            DebounceDecision::NoChange => {
                trace!("edge: discarded, level={}", level);
            }
        }
        decision
    }

    /// Shared state this detector writes.
    pub fn state(&self) -> &'a SharedButtonState<I> {
        self.state
    }

    /// Debounce filter in use.
    pub fn filter(&self) -> &DebounceFilter {
        &self.filter
    }

    /// Borrows the pin, e.g. to clear its interrupt-pending flag.
    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }

    /// Releases the pin.
    pub fn release(self) -> P {
        self.pin
    }
}

impl<'a, P, T, I> EdgeDetector<'a, P, T, I>
where
    P: InputPin + EdgeBinding,
    T: TimeSource<I>,
    I: TimeInstant,
{
    /// Checks the port, configures the pin as input and arms the
    /// both-edges interrupt.
    ///
    /// Stops at the first failing step; the interrupt stays disarmed. The
    /// error is returned unlogged for the caller to report.
    pub fn bind(&mut self) -> Result<(), SetupError> {
        gpio::ensure_ready(&self.pin)?;

        let pin = self.pin.pin();
        gpio::config_step(pin, "configure input", self.pin.configure(PinMode::Input))?;
        gpio::config_step(
            pin,
            "enable interrupt",
            self.pin.enable_interrupt(EdgeTrigger::BothEdges),
        )?;

        info!("edge: bound to {} pin {}", self.pin.port_name(), pin);
        Ok(())
    }
}
