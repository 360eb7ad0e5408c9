//! Board bring-up.
//!
//! [`App`] is the context object that owns the button path and the LED
//! path. Each path is set up independently: a failure is logged here, once,
//! with its status code and failing step, that path stays disabled and the
//! other path carries on. Nothing here retries.
//!
//! ```ignore
//! static CLOCK: TickClock = TickClock::new();
//! static BUTTON: SharedButtonState<Millis> = SharedButtonState::new();
//!
//! let mut app = App::bring_up(button, led, NoPacing, &CLOCK, &BUTTON, AppConfig::default());
//! let mut queue = WorkQueue::<4>::new();
//! app.seed(&mut queue)?;
//! loop {
//!     queue.dispatch_next();
//! }
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::blink::BlinkWork;
use crate::debounce::{ButtonState, DEFAULT_DEBOUNCE_WINDOW_MS, DebounceFilter};
use crate::edge::EdgeDetector;
use crate::gpio::{EdgeBinding, PinPort, SetupError};
use crate::indicator::{IndicatorDriver, Polarity};
use crate::shared::SharedButtonState;
use crate::time::{TimeInstant, TimeSource};
use crate::workqueue::{QueueError, WorkHandle, WorkQueue};

/// Bring-up configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AppConfig {
    /// Debounce window in milliseconds.
    pub debounce_window_ms: u32,
    /// LED polarity.
    pub polarity: Polarity,
    /// Sleep between toggle and resubmit; `0` resubmits immediately.
    pub blink_period_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            debounce_window_ms: DEFAULT_DEBOUNCE_WINDOW_MS,
            polarity: Polarity::ActiveHigh,
            blink_period_ms: 0,
        }
    }
}

/// Button and LED paths of the controller.
///
/// The two paths do not interact: the blink cycle runs regardless of the
/// button state.
pub struct App<'a, B, L, T, I, D> {
    edge: Option<EdgeDetector<'a, B, T, I>>,
    blink: Option<BlinkWork<L, D>>,
    state: &'a SharedButtonState<I>,
    button_fault: Option<SetupError>,
    led_fault: Option<SetupError>,
}

impl<'a, B, L, T, I, D> App<'a, B, L, T, I, D>
where
    B: InputPin + EdgeBinding,
    L: OutputPin + PinPort,
    T: TimeSource<I>,
    I: TimeInstant,
    D: DelayNs,
{
    /// Sets up both paths. Call before interrupts are enabled.
    pub fn bring_up(
        button: B,
        led: L,
        delay: D,
        clock: &'a T,
        state: &'a SharedButtonState<I>,
        config: AppConfig,
    ) -> Self {
        let filter = DebounceFilter::new(config.debounce_window_ms);
        let mut detector = EdgeDetector::new(button, clock, state, filter);
        let (edge, button_fault) = match detector.bind() {
            Ok(()) => (Some(detector), None),
            Err(e) => {
                error!("app: button path disabled: {}", e);
                (None, Some(e))
            }
        };

        let (blink, led_fault) = match IndicatorDriver::configure(led, config.polarity) {
            Ok(indicator) => (
                Some(BlinkWork::with_period(indicator, delay, config.blink_period_ms)),
                None,
            ),
            Err(e) => {
                error!("app: LED path disabled: {}", e);
                (None, Some(e))
            }
        };

        Self {
            edge,
            blink,
            state,
            button_fault,
            led_fault,
        }
    }
}

impl<'a, B, L, T, I, D> App<'a, B, L, T, I, D>
where
    I: TimeInstant,
{
    /// Registers the blink work and submits it once.
    ///
    /// Returns `Ok(None)` when the LED path is disabled. After this the work
    /// keeps itself queued for as long as the queue is serviced.
    pub fn seed<'q, const N: usize>(
        &'q mut self,
        queue: &mut WorkQueue<'q, N>,
    ) -> Result<Option<WorkHandle>, QueueError>
    where
        L: OutputPin + PinPort + 'q,
        D: DelayNs + 'q,
    {
        let Some(blink) = self.blink.as_mut() else {
            return Ok(None);
        };

        let handle = queue.register(blink)?;
        queue.submit(handle)?;
        info!("app: blink work seeded");
        Ok(Some(handle))
    }

    /// Whether the edge interrupt is armed.
    pub fn button_enabled(&self) -> bool {
        self.edge.is_some()
    }

    /// Whether the LED path is configured.
    pub fn led_enabled(&self) -> bool {
        self.blink.is_some()
    }

    /// Why the button path is disabled, if it is.
    pub fn button_fault(&self) -> Option<SetupError> {
        self.button_fault
    }

    /// Why the LED path is disabled, if it is.
    pub fn led_fault(&self) -> Option<SetupError> {
        self.led_fault
    }

    /// Hands the edge detector to the interrupt handler.
    pub fn take_edge_detector(&mut self) -> Option<EdgeDetector<'a, B, T, I>> {
        self.edge.take()
    }

    /// Edge detector, while still owned by the app.
    pub fn edge_detector_mut(&mut self) -> Option<&mut EdgeDetector<'a, B, T, I>> {
        self.edge.as_mut()
    }

    /// The blink work, if the LED path is live.
    pub fn blink(&self) -> Option<&BlinkWork<L, D>> {
        self.blink.as_ref()
    }

    /// Debounced button state, read from cooperative context.
    pub fn button_state(&self) -> ButtonState<I> {
        self.state.snapshot()
    }
}
