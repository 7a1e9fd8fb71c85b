//! Transfer statistics

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Point-in-time copy of the transport counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportStats {
    /// Units accepted into the receive ring
    pub rx_received: usize,
    /// Units lost because the receive ring stayed full
    pub rx_dropped: usize,
    /// Units handed to the transmitter
    pub tx_sent: usize,
    /// Line faults latched
    pub line_faults: usize,
}

/// Live counters, bumped from interrupt context only
pub(crate) struct Stats {
    rx_received: AtomicUsize,
    rx_dropped: AtomicUsize,
    tx_sent: AtomicUsize,
    line_faults: AtomicUsize,
}

impl Stats {
    pub(crate) const fn new() -> Self {
        Self {
            rx_received: AtomicUsize::new(0),
            rx_dropped: AtomicUsize::new(0),
            tx_sent: AtomicUsize::new(0),
            line_faults: AtomicUsize::new(0),
        }
    }

    pub(crate) fn record_received(&self) {
        self.rx_received.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_dropped(&self) {
        self.rx_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_sent(&self) {
        self.tx_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_fault(&self) {
        self.line_faults.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> TransportStats {
        TransportStats {
            rx_received: self.rx_received.load(Ordering::Relaxed),
            rx_dropped: self.rx_dropped.load(Ordering::Relaxed),
            tx_sent: self.tx_sent.load(Ordering::Relaxed),
            line_faults: self.line_faults.load(Ordering::Relaxed),
        }
    }
}
