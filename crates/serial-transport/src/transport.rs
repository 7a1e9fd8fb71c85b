//! Buffered serial transport

use crate::config::TransportConfig;
use crate::error::TransportError;
use crate::event::Direction;
use crate::latch::ErrorLatch;
use crate::rx::{ReadCallback, Receiver};
use crate::stats::{Stats, TransportStats};
use crate::tx::{Transmitter, WriteCallback};
use ring_buffer::MIN_CAPACITY;
use serial_hal::{ErrorKind, InterruptSources, SerialHardware, Unit};
use tracing::{debug, info, trace};

/// Interrupt-driven, buffered, full-duplex serial transport.
///
/// One instance is built at start-up and shared by reference between the
/// interrupt entry point ([`on_interrupt`](Self::on_interrupt)) and
/// application code. Every method takes `&self` and none of them blocks.
///
/// Two execution contexts are assumed:
/// - interrupt context calls only `on_interrupt`
/// - a single mainline context calls everything else
///
/// Reads and writes never wait for data or space; they return how many units
/// were actually moved.
pub struct Transport<H: SerialHardware> {
    hardware: H,
    pub(crate) rx: Receiver<H::Unit>,
    pub(crate) tx: Transmitter<H::Unit>,
    pub(crate) errors: ErrorLatch,
    pub(crate) stats: Stats,
}

impl<H: SerialHardware> Transport<H> {
    /// Build a transport over `hardware` and arm error and receive interrupts
    ///
    /// # Arguments
    /// * `hardware` - Peripheral, already clocked and configured
    /// * `config` - Ring storage sizes
    pub fn new(hardware: H, config: TransportConfig) -> Result<Self, TransportError> {
        let expected = <H::Unit as Unit>::WIDTH;
        let actual = hardware.frame_width();
        if actual != expected {
            return Err(TransportError::FrameWidthMismatch { expected, actual });
        }

        let rx_capacity = config.rx_capacity(expected);
        if rx_capacity < MIN_CAPACITY {
            return Err(TransportError::BufferTooSmall {
                direction: Direction::Receive,
                capacity: rx_capacity,
            });
        }
        let tx_capacity = config.tx_capacity(expected);
        if tx_capacity < MIN_CAPACITY {
            return Err(TransportError::BufferTooSmall {
                direction: Direction::Transmit,
                capacity: tx_capacity,
            });
        }

        let transport = Self {
            hardware,
            rx: Receiver::new(rx_capacity),
            tx: Transmitter::new(tx_capacity),
            errors: ErrorLatch::new(),
            stats: Stats::new(),
        };
        transport
            .hardware
            .enable(InterruptSources::ERROR | InterruptSources::RX_READY);

        info!(
            frame_width = ?expected,
            rx_capacity,
            tx_capacity,
            "Serial transport initialized"
        );
        Ok(transport)
    }

    /// Underlying peripheral
    pub fn hardware(&self) -> &H {
        &self.hardware
    }

    /// Counter snapshot
    pub fn stats(&self) -> TransportStats {
        self.stats.snapshot()
    }

    // -- receive ---------------------------------------------------------

    /// Copy up to `out.len()` received units into `out`, returning how many
    /// were copied. Never waits for more data.
    pub fn read(&self, out: &mut [H::Unit]) -> usize {
        self.rx.read(out)
    }

    /// Units waiting to be read
    pub fn read_count(&self) -> usize {
        self.rx.count()
    }

    /// Units the receive ring can still take
    pub fn read_free_count(&self) -> usize {
        self.rx.free_count()
    }

    /// Usable receive ring size
    pub fn read_buffer_size(&self) -> usize {
        self.rx.size()
    }

    /// Configure receive threshold notification.
    ///
    /// Returns the previous enabled state so callers can restore it.
    pub fn read_notification_enable(&self, enabled: bool, persistent: bool) -> bool {
        debug!(enabled, persistent, "read notification updated");
        self.rx.notification().enable(enabled, persistent)
    }

    /// Set the unread-unit count that triggers a read notification.
    /// Zero is ignored.
    pub fn read_threshold_set(&self, threshold: usize) {
        if self.rx.notification().set_threshold(threshold) {
            debug!(threshold, "read threshold set");
        }
    }

    /// Register the receive callback, replacing any previous one
    pub fn read_callback_register(&self, callback: Option<ReadCallback<H::Unit>>, context: usize) {
        self.rx.register(callback, context);
        debug!(registered = self.rx.has_callback(), "read callback updated");
    }

    /// Return the latched line error and clear it
    pub fn error_get(&self) -> ErrorKind {
        self.errors.take()
    }

    // -- transmit --------------------------------------------------------

    /// Queue up to `units.len()` units for transmission, returning how many
    /// were accepted. Arms the transmit interrupt while anything is pending.
    pub fn write(&self, units: &[H::Unit]) -> usize {
        let written = self.tx.enqueue(units);

        if self.tx.count() > 0 {
            trace!(written, pending = self.tx.count(), "arming transmit interrupt");
            self.hardware.enable_transmit_interrupt();
        }
        written
    }

    /// Units queued but not yet handed to the hardware
    pub fn write_count(&self) -> usize {
        self.tx.count()
    }

    /// Units the transmit ring can still take
    pub fn write_free_count(&self) -> usize {
        self.tx.free_count()
    }

    /// Usable transmit ring size
    pub fn write_buffer_size(&self) -> usize {
        self.tx.size()
    }

    /// Configure transmit threshold notification.
    ///
    /// Returns the previous enabled state so callers can restore it.
    pub fn write_notification_enable(&self, enabled: bool, persistent: bool) -> bool {
        debug!(enabled, persistent, "write notification updated");
        self.tx.notification().enable(enabled, persistent)
    }

    /// Set the free-space count that triggers a write notification.
    /// Zero is ignored.
    pub fn write_threshold_set(&self, threshold: usize) {
        if self.tx.notification().set_threshold(threshold) {
            debug!(threshold, "write threshold set");
        }
    }

    /// Register the transmit callback, replacing any previous one
    pub fn write_callback_register(&self, callback: Option<WriteCallback>, context: usize) {
        self.tx.register(callback, context);
        debug!(registered = self.tx.has_callback(), "write callback updated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_hal::{FrameWidth, MockSerial};

    fn transport(rx_bytes: usize, tx_bytes: usize) -> Transport<MockSerial<u8>> {
        let config = TransportConfig {
            rx_storage_bytes: rx_bytes,
            tx_storage_bytes: tx_bytes,
        };
        Transport::new(MockSerial::new(), config).unwrap()
    }

    #[test]
    fn test_new_arms_error_and_receive() {
        let transport = transport(16, 16);
        let serial = transport.hardware();
        assert!(serial.is_enabled(InterruptSources::ERROR | InterruptSources::RX_READY));
        assert!(!serial.is_enabled(InterruptSources::TX_READY));
        assert_eq!(transport.error_get(), ErrorKind::NONE);
    }

    #[test]
    fn test_frame_width_mismatch_is_rejected() {
        let serial = MockSerial::<u8>::with_frame_width(FrameWidth::Wide);
        let err = Transport::new(serial, TransportConfig::default()).err().unwrap();
        assert!(matches!(
            err,
            TransportError::FrameWidthMismatch {
                expected: FrameWidth::Narrow,
                actual: FrameWidth::Wide,
            }
        ));
    }

    #[test]
    fn test_tiny_storage_is_rejected() {
        let config = TransportConfig {
            rx_storage_bytes: 128,
            tx_storage_bytes: 2,
        };
        let err = Transport::new(MockSerial::<u16>::new(), config).err().unwrap();
        assert!(matches!(
            err,
            TransportError::BufferTooSmall {
                direction: Direction::Transmit,
                capacity: 1,
            }
        ));
    }

    #[test]
    fn test_wide_units_halve_sizes() {
        let transport = Transport::new(MockSerial::<u16>::new(), TransportConfig::default()).unwrap();
        assert_eq!(transport.read_buffer_size(), 63);
        assert_eq!(transport.write_buffer_size(), 127);
    }

    #[test]
    fn test_write_arms_transmit_and_short_counts() {
        let transport = transport(16, 4);

        assert_eq!(transport.write(b"ABCDE"), 3);
        assert_eq!(transport.write_count(), 3);
        assert_eq!(transport.write_free_count(), 0);
        assert!(transport.hardware().is_enabled(InterruptSources::TX_READY));
    }

    #[test]
    fn test_empty_write_leaves_transmit_disarmed() {
        let transport = transport(16, 16);
        assert_eq!(transport.write(&[]), 0);
        assert!(!transport.hardware().is_enabled(InterruptSources::TX_READY));
    }

    #[test]
    fn test_counts_add_up() {
        let transport = transport(8, 8);
        assert_eq!(transport.read_count() + transport.read_free_count(), transport.read_buffer_size());
        transport.write(b"xyz");
        assert_eq!(transport.write_count() + transport.write_free_count(), transport.write_buffer_size());
    }

    #[test]
    fn test_notification_enable_returns_previous() {
        let transport = transport(8, 8);
        assert!(!transport.read_notification_enable(true, true));
        assert!(transport.read_notification_enable(false, false));
        assert!(!transport.write_notification_enable(true, false));
        assert!(transport.write_notification_enable(true, false));
    }
}
