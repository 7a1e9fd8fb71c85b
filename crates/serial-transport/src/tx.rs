//! Transmit side: mainline producer, ISR consumer

use crate::callback::{CallbackSlot, FnPointer};
use crate::event::WriteEvent;
use crate::notify::Notification;
use ring_buffer::RingBuffer;
use serial_hal::{SerialHardware, Unit};
use tracing::trace;

/// Transmit-side callback. Runs synchronously in interrupt context and must
/// not call back into the transport.
pub type WriteCallback = fn(event: WriteEvent, context: usize);

impl FnPointer for WriteCallback {
    fn into_raw(self) -> *mut () {
        self as *mut ()
    }

    unsafe fn from_raw(raw: *mut ()) -> Self {
        std::mem::transmute::<*mut (), Self>(raw)
    }
}

/// Outcome of one transmit step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TxStep {
    /// A unit was handed to the hardware
    Sent,
    /// Nothing left to send; the transmit interrupt was disarmed
    Drained,
    /// Hardware refused the unit; it stays queued
    Busy,
}

pub(crate) struct Transmitter<U> {
    ring: RingBuffer<U>,
    notification: Notification,
    callback: CallbackSlot<WriteCallback>,
}

impl<U: Unit> Transmitter<U> {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            ring: RingBuffer::new(capacity),
            notification: Notification::new(),
            callback: CallbackSlot::new(),
        }
    }

    /// Queue as many of `units` as fit. Mainline only.
    pub(crate) fn enqueue(&self, units: &[U]) -> usize {
        let mut written = 0;
        for &unit in units {
            if !self.ring.push(unit) {
                break;
            }
            written += 1;
        }
        written
    }

    /// Move the oldest queued unit to the hardware. Interrupt context only.
    ///
    /// The unit leaves the ring only after the hardware accepted it.
    pub(crate) fn pull_one<H>(&self, hardware: &H) -> TxStep
    where
        H: SerialHardware<Unit = U>,
    {
        let Some(unit) = self.ring.peek() else {
            hardware.disable_transmit_interrupt();
            return TxStep::Drained;
        };

        if !hardware.try_write(unit) {
            return TxStep::Busy;
        }
        self.ring.pop();

        self.notify();
        TxStep::Sent
    }

    fn notify(&self) {
        if !self.notification.should_fire(self.ring.free()) {
            return;
        }
        if let Some((callback, context)) = self.callback.get() {
            trace!(free = self.ring.free(), "write threshold reached");
            callback(WriteEvent::ThresholdReached, context);
        }
    }

    pub(crate) fn count(&self) -> usize {
        self.ring.len()
    }

    pub(crate) fn free_count(&self) -> usize {
        self.ring.free()
    }

    pub(crate) fn size(&self) -> usize {
        self.ring.usable_capacity()
    }

    pub(crate) fn notification(&self) -> &Notification {
        &self.notification
    }

    pub(crate) fn register(&self, callback: Option<WriteCallback>, context: usize) {
        self.callback.register(callback, context);
    }

    pub(crate) fn has_callback(&self) -> bool {
        self.callback.is_registered()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_hal::{InterruptSources, MockSerial};

    #[test]
    fn test_enqueue_short_count_when_full() {
        let tx = Transmitter::<u8>::new(4);
        assert_eq!(tx.enqueue(b"hello"), 3);
        assert_eq!(tx.count(), 3);
        assert_eq!(tx.free_count(), 0);
    }

    #[test]
    fn test_pull_keeps_unit_when_hardware_busy() {
        let tx = Transmitter::<u8>::new(8);
        let serial = MockSerial::<u8>::new();
        serial.set_tx_room(0);
        tx.enqueue(b"ab");

        assert_eq!(tx.pull_one(&serial), TxStep::Busy);
        assert_eq!(tx.count(), 2);

        serial.set_tx_room(1);
        assert_eq!(tx.pull_one(&serial), TxStep::Sent);
        assert_eq!(serial.take_sent(), b"a".to_vec());
        assert_eq!(tx.count(), 1);
    }

    #[test]
    fn test_pull_on_empty_disarms_interrupt() {
        let tx = Transmitter::<u16>::new(8);
        let serial = MockSerial::<u16>::new();
        serial.enable_transmit_interrupt();

        assert_eq!(tx.pull_one(&serial), TxStep::Drained);
        assert!(!serial.is_enabled(InterruptSources::TX_READY));
    }
}
