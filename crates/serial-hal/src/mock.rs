//! In-memory serial peripheral for host-side testing

use crate::flags::{ErrorKind, InterruptSources};
use crate::hardware::SerialHardware;
use crate::unit::{FrameWidth, Unit};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::trace;

/// Default number of units the mock transmitter accepts before going busy
const DEFAULT_TX_ROOM: usize = usize::MAX;

#[derive(Debug)]
struct MockState<U> {
    rx_fifo: VecDeque<U>,
    sent: Vec<U>,
    tx_room: usize,
    enabled: InterruptSources,
    errors: ErrorKind,
    frame_width: FrameWidth,
}

/// Mock peripheral with a receive FIFO, a transmit sink and an enable mask.
///
/// Tests play the hardware side: [`inject`](Self::inject) units as if they
/// arrived on the wire, [`raise_error`](Self::raise_error) to set line
/// errors, and [`take_sent`](Self::take_sent) to collect what the
/// transmitter shifted out. Status flags are derived from that state the same
/// way real registers behave: RX_READY while the FIFO holds data, TX_READY
/// while the transmitter has room, ERROR while any line error is set.
#[derive(Debug)]
pub struct MockSerial<U> {
    state: Mutex<MockState<U>>,
}

impl<U: Unit> MockSerial<U> {
    /// Create a mock whose frame width matches `U`
    pub fn new() -> Self {
        Self::with_frame_width(U::WIDTH)
    }

    /// Create a mock reporting an explicit frame width
    pub fn with_frame_width(frame_width: FrameWidth) -> Self {
        Self {
            state: Mutex::new(MockState {
                rx_fifo: VecDeque::new(),
                sent: Vec::new(),
                tx_room: DEFAULT_TX_ROOM,
                enabled: InterruptSources::empty(),
                errors: ErrorKind::NONE,
                frame_width,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState<U>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue units in the receive FIFO
    pub fn inject(&self, units: &[U]) {
        trace!(count = units.len(), "mock serial: units arrived");
        self.state().rx_fifo.extend(units.iter().copied());
    }

    /// Set line-error flags, as the receiver would on a bad frame
    pub fn raise_error(&self, errors: ErrorKind) {
        self.state().errors |= errors;
    }

    /// Drain everything the transmitter has shifted out so far
    pub fn take_sent(&self) -> Vec<U> {
        std::mem::take(&mut self.state().sent)
    }

    /// Limit how many more units the transmitter accepts
    pub fn set_tx_room(&self, room: usize) {
        self.state().tx_room = room;
    }

    /// Units still waiting in the receive FIFO
    pub fn rx_fifo_len(&self) -> usize {
        self.state().rx_fifo.len()
    }

    /// Check whether all of `sources` are enabled
    pub fn is_enabled(&self, sources: InterruptSources) -> bool {
        self.state().enabled.contains(sources)
    }
}

impl<U: Unit> Default for MockSerial<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U: Unit> SerialHardware for MockSerial<U> {
    type Unit = U;

    fn try_write(&self, unit: U) -> bool {
        let mut state = self.state();
        if state.tx_room == 0 {
            return false;
        }
        state.tx_room -= 1;
        state.sent.push(unit);
        true
    }

    fn try_read(&self) -> Option<U> {
        self.state().rx_fifo.pop_front()
    }

    fn pending(&self) -> InterruptSources {
        let state = self.state();
        let mut pending = InterruptSources::empty();
        pending.set(InterruptSources::TX_READY, state.tx_room > 0);
        pending.set(InterruptSources::RX_READY, !state.rx_fifo.is_empty());
        pending.set(InterruptSources::ERROR, !state.errors.is_empty());
        pending
    }

    fn enabled(&self) -> InterruptSources {
        self.state().enabled
    }

    fn enable(&self, sources: InterruptSources) {
        self.state().enabled |= sources;
    }

    fn disable(&self, sources: InterruptSources) {
        self.state().enabled &= !sources;
    }

    fn error_flags(&self) -> ErrorKind {
        self.state().errors
    }

    fn clear_error_flags(&self) {
        self.state().errors = ErrorKind::NONE;
    }

    fn frame_width(&self) -> FrameWidth {
        self.state().frame_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_tracks_state() {
        let serial = MockSerial::<u8>::new();
        assert_eq!(serial.pending(), InterruptSources::TX_READY);

        serial.inject(b"hi");
        serial.raise_error(ErrorKind::FRAMING);
        assert!(serial.pending().contains(InterruptSources::RX_READY | InterruptSources::ERROR));

        assert_eq!(serial.try_read(), Some(b'h'));
        serial.clear_error_flags();
        assert_eq!(serial.error_flags(), ErrorKind::NONE);
        assert!(!serial.pending().contains(InterruptSources::ERROR));
    }

    #[test]
    fn test_tx_room_limits_writes() {
        let serial = MockSerial::<u16>::new();
        serial.set_tx_room(1);

        assert!(serial.try_write(0x1FF));
        assert!(!serial.try_write(0x100));
        assert!(!serial.pending().contains(InterruptSources::TX_READY));
        assert_eq!(serial.take_sent(), vec![0x1FF]);
    }

    #[test]
    fn test_enable_mask() {
        let serial = MockSerial::<u8>::new();
        serial.enable(InterruptSources::RX_READY | InterruptSources::ERROR);
        serial.enable_transmit_interrupt();
        serial.disable(InterruptSources::RX_READY);

        assert!(serial.is_enabled(InterruptSources::TX_READY | InterruptSources::ERROR));
        assert!(!serial.is_enabled(InterruptSources::RX_READY));
    }
}
