//! Buffered Serial Transport
//!
//! Interrupt-driven, full-duplex transport over one serial peripheral.
//! Received units are queued by the interrupt handler until the application
//! reads them; written units are queued by the application until the
//! transmitter can take them. Both directions are lock-free SPSC rings with
//! threshold notifications, and line errors are latched until fetched.

mod callback;
mod config;
mod dispatch;
mod error;
mod event;
mod latch;
mod notify;
mod rx;
mod stats;
mod transport;
mod tx;

pub use config::TransportConfig;
pub use error::TransportError;
pub use event::{Direction, ReadEvent, WriteEvent};
pub use rx::{Drain, ReadCallback};
pub use stats::TransportStats;
pub use transport::Transport;
pub use tx::WriteCallback;

pub use serial_hal::{ErrorKind, FrameWidth, InterruptSources, SerialHardware, Unit};
