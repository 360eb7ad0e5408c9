//! Self-resubmitting blink work.
//!
//! Every dispatch toggles the LED once and hands itself back to the queue.
//! Without a period the blink rate is whatever the queue's service rate
//! is; with [`BlinkWork::with_period`] each run sleeps for a bounded time
//! between the toggle and the resubmit.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::gpio::PinPort;
use crate::indicator::IndicatorDriver;
use crate::workqueue::{Work, WorkOutcome};

/// Blink period of the original board firmware.
pub const ORIGINAL_BLINK_PERIOD_MS: u32 = 200;

/// Delay that returns immediately. Used when no blink period is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

impl DelayNs for NoPacing {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Work item that toggles an [`IndicatorDriver`] and resubmits itself.
pub struct BlinkWork<P, D = NoPacing> {
    indicator: IndicatorDriver<P>,
    delay: D,
    period_ms: u32,
    failed_writes: u32,
}

impl<P> BlinkWork<P, NoPacing> {
    /// Toggles on every dispatch with no delay.
    pub fn new(indicator: IndicatorDriver<P>) -> Self {
        Self {
            indicator,
            delay: NoPacing,
            period_ms: 0,
            failed_writes: 0,
        }
    }
}

impl<P, D: DelayNs> BlinkWork<P, D> {
    /// Sleeps `period_ms` on `delay` after each toggle.
    pub fn with_period(indicator: IndicatorDriver<P>, delay: D, period_ms: u32) -> Self {
        Self {
            indicator,
            delay,
            period_ms,
            failed_writes: 0,
        }
    }

    /// The driven indicator.
    pub fn indicator(&self) -> &IndicatorDriver<P> {
        &self.indicator
    }

    /// Delay between toggle and resubmit, in milliseconds.
    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Number of toggles whose pin write failed.
    pub fn failed_writes(&self) -> u32 {
        self.failed_writes
    }

    /// Releases the indicator.
    pub fn into_indicator(self) -> IndicatorDriver<P> {
        self.indicator
    }
}

impl<P, D> Work for BlinkWork<P, D>
where
    P: OutputPin + PinPort,
    D: DelayNs,
{
    fn run(&mut self) -> WorkOutcome {
        if self.indicator.toggle().is_err() {
            self.failed_writes = self.failed_writes.wrapping_add(1);
            warn!("blink: pin write failed");
        }

        if self.period_ms > 0 {
            self.delay.delay_ms(self.period_ms);
        }

        // A failed write is not fatal; the next run tries again.
        WorkOutcome::Resubmit
    }
}
