//! Receive side: ISR producer, mainline consumer

use crate::callback::{CallbackSlot, FnPointer};
use crate::event::ReadEvent;
use crate::notify::Notification;
use ring_buffer::RingBuffer;
use serial_hal::Unit;
use tracing::trace;

/// Receive-side callback.
///
/// Runs synchronously in interrupt context. It must not call back into the
/// transport; the supplied [`Drain`] is the only way it may touch the
/// receive ring, and only to take data out.
pub type ReadCallback<U> = fn(event: ReadEvent, drain: &Drain<'_, U>, context: usize);

impl<U: Unit> FnPointer for ReadCallback<U> {
    fn into_raw(self) -> *mut () {
        self as *mut ()
    }

    unsafe fn from_raw(raw: *mut ()) -> Self {
        std::mem::transmute::<*mut (), Self>(raw)
    }
}

/// Consumer-side view of the receive ring handed to read callbacks.
///
/// Lets a `BufferFull` handler make room before the incoming unit is
/// dropped. It shares the consumer role with [`Transport::read`], so the
/// application must not be inside `read` when the interrupt can fire a
/// callback that drains.
///
/// [`Transport::read`]: crate::Transport::read
pub struct Drain<'a, U> {
    ring: &'a RingBuffer<U>,
}

impl<'a, U: Unit> Drain<'a, U> {
    fn new(ring: &'a RingBuffer<U>) -> Self {
        Self { ring }
    }

    /// Move up to `out.len()` unread units into `out`
    pub fn read(&self, out: &mut [U]) -> usize {
        self.ring.read_into(out)
    }

    /// Unread units in the receive ring
    pub fn count(&self) -> usize {
        self.ring.len()
    }
}

pub(crate) struct Receiver<U> {
    ring: RingBuffer<U>,
    notification: Notification,
    callback: CallbackSlot<ReadCallback<U>>,
}

impl<U: Unit> Receiver<U> {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            ring: RingBuffer::new(capacity),
            notification: Notification::new(),
            callback: CallbackSlot::new(),
        }
    }

    /// Store one unit from the hardware. Interrupt context only.
    ///
    /// On a full ring the callback gets one `BufferFull` chance to drain,
    /// then the push is retried once. Returns `false` if the unit was lost.
    pub(crate) fn push_one(&self, unit: U) -> bool {
        if !self.ring.push(unit) {
            let Some((callback, context)) = self.callback.get() else {
                return false;
            };
            callback(ReadEvent::BufferFull, &Drain::new(&self.ring), context);

            if !self.ring.push(unit) {
                return false;
            }
        }

        self.notify();
        true
    }

    fn notify(&self) {
        if !self.notification.should_fire(self.ring.len()) {
            return;
        }
        if let Some((callback, context)) = self.callback.get() {
            trace!(count = self.ring.len(), "read threshold reached");
            callback(ReadEvent::ThresholdReached, &Drain::new(&self.ring), context);
        }
    }

    /// Tell the application a line error was latched. Interrupt context only.
    pub(crate) fn notify_error(&self) {
        if let Some((callback, context)) = self.callback.get() {
            callback(ReadEvent::Error, &Drain::new(&self.ring), context);
        }
    }

    pub(crate) fn read(&self, out: &mut [U]) -> usize {
        self.ring.read_into(out)
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

    pub(crate) fn register(&self, callback: Option<ReadCallback<U>>, context: usize) {
        self.callback.register(callback, context);
    }

    pub(crate) fn has_callback(&self) -> bool {
        self.callback.is_registered()
    }
}
