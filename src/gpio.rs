//! Pin capabilities consumed from the board layer.
//!
//! Level reads and writes go through `embedded-hal`'s digital traits. What
//! `embedded-hal` does not cover (readiness of the port, mode configuration
//! with a status code, interrupt registration) is expressed by [`PinPort`]
//! and [`EdgeBinding`] here. Configuration calls report failures as a raw
//! status code (negative errno style), which setup code turns into a
//! [`SetupError`].

/// Direction a pin is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    Input,
    Output,
}

/// Which electrical edges raise the pin interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeTrigger {
    Rising,
    Falling,
    BothEdges,
}

/// A pin on a GPIO port that must be checked and configured before use.
pub trait PinPort {
    /// Name of the owning port device, for diagnostics.
    fn port_name(&self) -> &'static str;

    /// Pin number within the port.
    fn pin(&self) -> u8;

    /// Whether the port device finished its own initialization.
    fn is_ready(&self) -> bool;

    /// Configures pin direction. `Err` carries the platform status code.
    fn configure(&mut self, mode: PinMode) -> Result<(), i32>;
}

/// Capability of a pin to deliver edge interrupts to a registered handler.
///
/// Registration of the handler itself is platform glue (an `#[interrupt]`
/// function calling [`crate::edge::EdgeDetector::handle_interrupt`]); this
/// only arms the trigger.
pub trait EdgeBinding: PinPort {
    /// Arms the pin interrupt. `Err` carries the platform status code.
    fn enable_interrupt(&mut self, trigger: EdgeTrigger) -> Result<(), i32>;
}

/// Setup failures. Each disables the hardware path that raised it and
/// nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetupError {
    /// The port device failed its readiness check.
    DeviceNotReady {
        /// Name of the port device.
        port: &'static str,
    },
    /// A configuration call returned a nonzero status.
    ConfigFailed {
        /// Status code returned by the platform.
        code: i32,
        /// Pin number within the port.
        pin: u8,
        /// Operation that failed, e.g. "configure output".
        op: &'static str,
    },
}

impl core::fmt::Display for SetupError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SetupError::DeviceNotReady { port } => {
                write!(f, "{} device is not ready", port)
            }
            SetupError::ConfigFailed { code, pin, op } => {
                write!(f, "error {}: failed to {} on pin {}", code, op, pin)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SetupError {}

/// Readiness check shared by every setup path.
pub(crate) fn ensure_ready<P: PinPort>(pin: &P) -> Result<(), SetupError> {
    if pin.is_ready() {
        Ok(())
    } else {
        Err(SetupError::DeviceNotReady {
            port: pin.port_name(),
        })
    }
}

/// Runs a configuration call and tags a failure with pin and operation.
pub(crate) fn config_step(
    pin: u8,
    op: &'static str,
    result: Result<(), i32>,
) -> Result<(), SetupError> {
    result.map_err(|code| SetupError::ConfigFailed { code, pin, op })
}
