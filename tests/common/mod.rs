//! Shared test infrastructure for edge-blink integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;

use edge_blink::{EdgeBinding, EdgeTrigger, Millis, PinMode, PinPort, TimeSource};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};

// ============================================================================
// Mock Pin Error
// ============================================================================

/// Error returned by mock pins when a read or write is set to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockPinError;

impl embedded_hal::digital::Error for MockPinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

// ============================================================================
// Mock Output Pin (LED)
// ============================================================================

/// Mock LED pin that records every level written to it
pub struct MockOutputPin {
    pub ready: bool,
    pub configure_result: Result<(), i32>,
    pub fail_writes: bool,
    pub mode: Option<PinMode>,
    pub level: bool,
    pub writes: u32,
    history: heapless::Vec<bool, 32>,
}

impl MockOutputPin {
    pub fn new() -> Self {
        Self {
            ready: true,
            configure_result: Ok(()),
            fail_writes: false,
            mode: None,
            level: false,
            writes: 0,
            history: heapless::Vec::new(),
        }
    }

    pub fn not_ready() -> Self {
        Self {
            ready: false,
            ..Self::new()
        }
    }

    /// First 32 levels written
    pub fn history(&self) -> &[bool] {
        &self.history
    }

    fn write(&mut self, level: bool) -> Result<(), MockPinError> {
        if self.fail_writes {
            return Err(MockPinError);
        }
        self.level = level;
        self.writes += 1;
        let _ = self.history.push(level);
        Ok(())
    }
}

impl ErrorType for MockOutputPin {
    type Error = MockPinError;
}

impl OutputPin for MockOutputPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }
}

impl PinPort for MockOutputPin {
    fn port_name(&self) -> &'static str {
        "gpioa"
    }

    fn pin(&self) -> u8 {
        5
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn configure(&mut self, mode: PinMode) -> Result<(), i32> {
        self.configure_result?;
        self.mode = Some(mode);
        Ok(())
    }
}

// ============================================================================
// Mock Input Pin (button)
// ============================================================================

/// Mock button pin with a settable level and configurable setup results
pub struct MockInputPin {
    pub ready: bool,
    pub configure_result: Result<(), i32>,
    pub interrupt_result: Result<(), i32>,
    pub fail_reads: bool,
    pub level: bool,
    pub mode: Option<PinMode>,
    pub trigger: Option<EdgeTrigger>,
    pub reads: u32,
}

impl MockInputPin {
    pub fn new() -> Self {
        Self {
            ready: true,
            configure_result: Ok(()),
            interrupt_result: Ok(()),
            fail_reads: false,
            level: false,
            mode: None,
            trigger: None,
            reads: 0,
        }
    }
}

impl ErrorType for MockInputPin {
    type Error = MockPinError;
}

impl InputPin for MockInputPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        if self.fail_reads {
            return Err(MockPinError);
        }
        self.reads += 1;
        Ok(self.level)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|level| !level)
    }
}

impl PinPort for MockInputPin {
    fn port_name(&self) -> &'static str {
        "gpioc"
    }

    fn pin(&self) -> u8 {
        13
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn configure(&mut self, mode: PinMode) -> Result<(), i32> {
        self.configure_result?;
        self.mode = Some(mode);
        Ok(())
    }
}

impl EdgeBinding for MockInputPin {
    fn enable_interrupt(&mut self, trigger: EdgeTrigger) -> Result<(), i32> {
        self.interrupt_result?;
        self.trigger = Some(trigger);
        Ok(())
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<Millis>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(Millis(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u32) {
        let current = self.current_time.get();
        self.current_time.set(Millis(current.0 + millis));
    }

    pub fn set_time(&self, time: Millis) {
        self.current_time.set(time);
    }
}

impl TimeSource<Millis> for MockTimeSource {
    fn now(&self) -> Millis {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Delay
// ============================================================================

/// Delay that records how long it was asked to sleep instead of sleeping
#[derive(Default)]
pub struct MockDelay {
    pub total_ns: u64,
    pub calls: u32,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
        self.calls += 1;
    }
}
