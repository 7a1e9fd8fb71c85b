//! Interrupt demultiplexing

use crate::transport::Transport;
use crate::tx::TxStep;
use serial_hal::{InterruptSources, SerialHardware};
use tracing::{trace, warn};

impl<H: SerialHardware> Transport<H> {
    /// Service the peripheral interrupt.
    ///
    /// Called from the interrupt vector, never from application code. Error,
    /// transmit-ready and receive-ready are checked in that order; each
    /// handler runs only if its raw flag is set and the source is enabled.
    pub fn on_interrupt(&self) {
        if self.hardware().enabled().is_empty() {
            return;
        }

        if self.is_active(InterruptSources::ERROR) {
            self.handle_error();
        }
        if self.is_active(InterruptSources::TX_READY) {
            self.handle_transmit();
        }
        if self.is_active(InterruptSources::RX_READY) {
            self.handle_receive();
        }
    }

    fn is_active(&self, source: InterruptSources) -> bool {
        let hardware = self.hardware();
        hardware.pending().contains(source) && hardware.enabled().contains(source)
    }

    fn handle_error(&self) {
        let hardware = self.hardware();
        let kind = hardware.error_flags();
        if kind.is_empty() {
            return;
        }

        self.errors.latch(kind);
        self.stats.record_fault();
        warn!(?kind, "serial line error latched");

        hardware.clear_error_flags();

        // Units already in the receiver arrived with the fault
        let mut flushed = 0usize;
        while hardware.pending().contains(InterruptSources::RX_READY) {
            if hardware.try_read().is_none() {
                break;
            }
            flushed += 1;
        }
        if flushed > 0 {
            trace!(flushed, "discarded units received with line error");
        }

        self.rx.notify_error();
    }

    fn handle_receive(&self) {
        let hardware = self.hardware();
        while hardware.pending().contains(InterruptSources::RX_READY) {
            let Some(unit) = hardware.try_read() else {
                break;
            };

            if self.rx.push_one(unit) {
                self.stats.record_received();
            } else {
                self.stats.record_dropped();
                trace!("receive ring full, unit dropped");
                break;
            }
        }
    }

    fn handle_transmit(&self) {
        let hardware = self.hardware();
        while hardware.pending().contains(InterruptSources::TX_READY) {
            match self.tx.pull_one(hardware) {
                TxStep::Sent => self.stats.record_sent(),
                TxStep::Drained => {
                    trace!("transmit ring drained, interrupt disarmed");
                    break;
                }
                TxStep::Busy => break,
            }
        }
    }
}
