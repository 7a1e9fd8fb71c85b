//! Status and error bit sets

use bitflags::bitflags;

bitflags! {
    /// Line errors reported by the receiver.
    ///
    /// Bit positions follow the peripheral STATUS register so a raw read
    /// converts with `from_bits_truncate`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ErrorKind: u8 {
        /// Parity bit mismatch.
        const PARITY   = 1 << 0;
        /// Missing stop bit.
        const FRAMING  = 1 << 1;
        /// Receive holding register overrun.
        const OVERFLOW = 1 << 2;
    }
}

impl ErrorKind {
    /// No error.
    pub const NONE: Self = Self::empty();
}

bitflags! {
    /// Interrupt sources of the peripheral.
    ///
    /// Used both for raw status (`pending`) and for the enable mask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct InterruptSources: u8 {
        /// Transmit data register can take another unit.
        const TX_READY = 1 << 0;
        /// A received unit is waiting in the data register.
        const RX_READY = 1 << 2;
        /// A line error was detected.
        const ERROR    = 1 << 7;
    }
}
