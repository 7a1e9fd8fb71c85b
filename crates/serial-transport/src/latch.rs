//! Latched line-error status

use serial_hal::ErrorKind;
use std::sync::atomic::{AtomicU8, Ordering};

/// Single-slot error latch.
///
/// Set from interrupt context, consumed from mainline. A fault arriving
/// before the previous one was consumed replaces it; faults are not OR-ed
/// together across detections.
pub(crate) struct ErrorLatch {
    current: AtomicU8,
}

impl ErrorLatch {
    pub(crate) const fn new() -> Self {
        Self {
            current: AtomicU8::new(0),
        }
    }

    pub(crate) fn latch(&self, kind: ErrorKind) {
        self.current.store(kind.bits(), Ordering::Release);
    }

    /// Return the latched error and clear it
    pub(crate) fn take(&self) -> ErrorKind {
        ErrorKind::from_bits_truncate(self.current.swap(0, Ordering::AcqRel))
    }
}
