//! Serial Hardware Abstraction
//!
//! The narrow surface the buffered transport needs from a serial
//! peripheral: single-unit data registers, raw status flags, interrupt
//! enables and line-error flags. Clocking, baud rate and frame format set-up
//! stay with the board support code.

mod flags;
mod hardware;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod unit;

pub use flags::{ErrorKind, InterruptSources};
pub use hardware::SerialHardware;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockSerial;
pub use unit::{FrameWidth, Unit};
