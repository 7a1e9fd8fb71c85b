//! Lock-Free Ring Buffer
//!
//! Provides a fixed-capacity SPSC ring buffer used for the receive and
//! transmit sides of the serial transport. One side runs in interrupt
//! context, the other in mainline code; neither ever blocks.

mod buffer;

pub use buffer::{RingBuffer, MIN_CAPACITY};
