//! Indicator LED driver.
//!
//! An [`IndicatorDriver`] only exists once its pin has passed the readiness
//! check and been configured as an output, so a write can never precede
//! configuration. All mutation happens from cooperative context; the driver
//! is never touched from an interrupt handler.

use embedded_hal::digital::OutputPin;

use crate::gpio::{self, PinMode, PinPort, SetupError};

/// Electrical level that lights the LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Pin high = LED on.
    #[default]
    ActiveHigh,
    /// Pin low = LED on.
    ActiveLow,
}

/// Owns the LED pin and tracks what was last written to it.
pub struct IndicatorDriver<P> {
    pin: P,
    polarity: Polarity,
    is_on: bool,
    toggle_count: u32,
}

impl<P> IndicatorDriver<P>
where
    P: OutputPin + PinPort,
{
    /// Checks the port and configures the pin as an output.
    ///
    /// A port that is not ready aborts before the pin is configured or
    /// written. The LED is assumed off after configuration. Failures are
    /// returned, not logged; the caller reports them.
    pub fn configure(mut pin: P, polarity: Polarity) -> Result<Self, SetupError> {
        gpio::ensure_ready(&pin)?;

        let number = pin.pin();
        gpio::config_step(number, "configure output", pin.configure(PinMode::Output))?;

        Ok(Self {
            pin,
            polarity,
            is_on: false,
            toggle_count: 0,
        })
    }

    /// Drives the LED on or off.
    ///
    /// On a failed write the tracked state is left as it was.
    pub fn set(&mut self, on: bool) -> Result<(), P::Error> {
        let high = match self.polarity {
            Polarity::ActiveHigh => on,
            Polarity::ActiveLow => !on,
        };
        if high {
            self.pin.set_high()?;
        } else {
            self.pin.set_low()?;
        }

        self.is_on = on;
        self.toggle_count = self.toggle_count.wrapping_add(1);
        Ok(())
    }

    /// Inverts the LED.
    pub fn toggle(&mut self) -> Result<(), P::Error> {
        self.set(!self.is_on)
    }
}

impl<P> IndicatorDriver<P> {
    /// Whether the LED is currently lit.
    pub fn is_on(&self) -> bool {
        self.is_on
    }

    /// Number of successful writes since configuration.
    pub fn toggle_count(&self) -> u32 {
        self.toggle_count
    }

    /// Configured polarity.
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Borrows the underlying pin.
    pub fn pin(&self) -> &P {
        &self.pin
    }

    /// Releases the underlying pin.
    pub fn release(self) -> P {
        self.pin
    }
}
