#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`DebounceFilter`**: Pure time-window decision turning a sampled level into `NoChange` or `Transition`
//! - **`ButtonState`**: Debounced level, last accepted timestamp and the level sampled at that transition
//! - **`SharedButtonState`**: Critical-section cell carrying `ButtonState` from the edge interrupt to task context
//! - **`EdgeDetector`**: Interrupt-context glue that samples the pin and commits debounce decisions
//! - **`IndicatorDriver`**: Owns the LED pin, tracks `is_on` and `toggle_count`
//! - **`WorkQueue`**: Cooperative run-to-completion queue with idempotent submit
//! - **`BlinkWork`**: Work item that toggles the LED and resubmits itself
//! - **`Shell`**: Minimal console with the `fft` placeholder command
//! - **`App`**: Bring-up context wiring the button and LED paths
//! - **`TimeSource`**: Trait to implement for your timing system

mod fmt;

pub mod time;
pub mod clock;
pub mod gpio;
pub mod debounce;
pub mod shared;
pub mod edge;
pub mod indicator;
pub mod workqueue;
pub mod blink;
pub mod command;
pub mod app;

pub use app::{App, AppConfig};
pub use blink::{BlinkWork, NoPacing, ORIGINAL_BLINK_PERIOD_MS};
pub use clock::{Millis, MillisDuration, TickClock};
pub use command::{Command, Shell, ShellError, fft_command};
pub use debounce::{
    ButtonState, DEFAULT_DEBOUNCE_WINDOW_MS, DebounceDecision, DebounceFilter, LogicalLevel,
};
pub use edge::EdgeDetector;
pub use gpio::{EdgeBinding, EdgeTrigger, PinMode, PinPort, SetupError};
pub use indicator::{IndicatorDriver, Polarity};
pub use shared::SharedButtonState;
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use workqueue::{QueueError, Submit, Work, WorkHandle, WorkOutcome, WorkQueue, WorkState};
