//! Transport Error Types

use crate::event::Direction;
use serial_hal::FrameWidth;
use thiserror::Error;

/// Errors raised while building or configuring a transport.
///
/// Nothing on the data path returns an error: full buffers show up as short
/// counts and line faults are latched for [`error_get`](crate::Transport::error_get).
#[derive(Debug, Error)]
pub enum TransportError {
    /// Configured storage leaves no usable slot
    #[error("{direction} ring needs at least 2 units of storage, got {capacity}")]
    BufferTooSmall {
        direction: Direction,
        capacity: usize,
    },

    /// Peripheral frame width disagrees with the storage unit type
    #[error("Peripheral is configured for {actual:?} frames but storage holds {expected:?} units")]
    FrameWidthMismatch {
        expected: FrameWidth,
        actual: FrameWidth,
    },

    /// Stored configuration blob could not be encoded or decoded
    #[error("Config encoding error: {0}")]
    ConfigEncoding(#[from] postcard::Error),
}
