//! Peripheral access trait

use crate::flags::{ErrorKind, InterruptSources};
use crate::unit::{FrameWidth, Unit};

/// Register-level access to one serial peripheral.
///
/// Every method is a single non-blocking register access. They take `&self`
/// because the same peripheral is touched from interrupt context and from
/// mainline code; implementations use volatile or atomic access internally.
pub trait SerialHardware {
    /// Element type moved per data register access
    type Unit: Unit;

    /// Hand one unit to the transmitter. Returns `false` if it is not ready.
    fn try_write(&self, unit: Self::Unit) -> bool;

    /// Take one unit from the receiver, if any is waiting.
    fn try_read(&self) -> Option<Self::Unit>;

    /// Raw interrupt flags, regardless of whether the source is enabled.
    fn pending(&self) -> InterruptSources;

    /// Currently enabled interrupt sources.
    fn enabled(&self) -> InterruptSources;

    /// Enable the given interrupt sources, leaving others untouched.
    fn enable(&self, sources: InterruptSources);

    /// Disable the given interrupt sources, leaving others untouched.
    fn disable(&self, sources: InterruptSources);

    /// Raw line-error flags.
    fn error_flags(&self) -> ErrorKind;

    /// Clear every line-error flag and the error interrupt flag.
    fn clear_error_flags(&self);

    /// Character size the peripheral is currently configured for.
    fn frame_width(&self) -> FrameWidth;

    /// Arm the transmit-ready interrupt.
    fn enable_transmit_interrupt(&self) {
        self.enable(InterruptSources::TX_READY);
    }

    /// Disarm the transmit-ready interrupt.
    fn disable_transmit_interrupt(&self) {
        self.disable(InterruptSources::TX_READY);
    }

    /// Arm the receive-ready interrupt.
    fn enable_receive_interrupt(&self) {
        self.enable(InterruptSources::RX_READY);
    }

    /// Disarm the receive-ready interrupt.
    fn disable_receive_interrupt(&self) {
        self.disable(InterruptSources::RX_READY);
    }
}
