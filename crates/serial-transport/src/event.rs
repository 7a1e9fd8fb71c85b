//! Callback event types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Events delivered to the receive-side callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadEvent {
    /// Unread unit count hit the configured threshold
    ThresholdReached,
    /// A unit arrived while the receive ring was full
    BufferFull,
    /// A line error was latched and the hardware FIFO flushed
    Error,
}

/// Events delivered to the transmit-side callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WriteEvent {
    /// Free transmit space hit the configured threshold
    ThresholdReached,
}

/// Transfer direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Hardware to application
    Receive,
    /// Application to hardware
    Transmit,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Receive => f.write_str("receive"),
            Direction::Transmit => f.write_str("transmit"),
        }
    }
}
