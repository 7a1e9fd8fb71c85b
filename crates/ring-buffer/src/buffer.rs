//! Lock-Free Ring Buffer Implementation

use std::cell::UnsafeCell;
use std::mem;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Smallest capacity that still leaves one usable slot
pub const MIN_CAPACITY: usize = 2;

/// Lock-free SPSC ring buffer of fixed-size units
///
/// One slot is always left empty so that `head == tail` means empty and
/// `head + 1 == tail` means full, without a shared counter. The usable
/// capacity is therefore `capacity - 1`.
///
/// Index ownership is split between the two sides:
/// - `head` is only ever stored by the producer ([`push`](Self::push))
/// - `tail` is only ever stored by the consumer ([`pop`](Self::pop),
///   [`read_into`](Self::read_into))
///
/// Each side only loads the other side's index, so a stale snapshot can at
/// worst under-report what is available, never corrupt it.
pub struct RingBuffer<T> {
    /// Pre-allocated storage
    storage: Box<[UnsafeCell<T>]>,
    /// Capacity of the buffer (usable slots + 1)
    capacity: usize,
    /// Head position (write index, producer-owned)
    head: AtomicUsize,
    /// Tail position (read index, consumer-owned)
    tail: AtomicUsize,
}

impl<T: Copy + Default> RingBuffer<T> {
    /// Create a new ring buffer with given capacity
    ///
    /// # Panics
    /// Panics if `capacity` is below [`MIN_CAPACITY`].
    pub fn new(capacity: usize) -> Self {
        assert!(
            capacity >= MIN_CAPACITY,
            "Ring capacity must be at least {MIN_CAPACITY}"
        );
        let storage: Vec<UnsafeCell<T>> =
            (0..capacity).map(|_| UnsafeCell::new(T::default())).collect();
        Self {
            storage: storage.into_boxed_slice(),
            capacity,
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
        }
    }

    /// Create a buffer backed by `bytes` bytes of storage
    ///
    /// Wider units get proportionally fewer slots out of the same byte budget.
    pub fn with_storage_bytes(bytes: usize) -> Self {
        Self::new(Self::capacity_for_bytes(bytes))
    }

    /// Number of `T` slots that fit in `bytes` bytes
    pub const fn capacity_for_bytes(bytes: usize) -> usize {
        bytes / mem::size_of::<T>()
    }

    /// Get the buffer capacity (including the sacrificed slot)
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Maximum number of units the buffer can hold at once
    pub fn usable_capacity(&self) -> usize {
        self.capacity - 1
    }

    /// Get the number of units currently in the buffer
    pub fn len(&self) -> usize {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);
        self.distance(tail, head)
    }

    /// Number of units that can still be pushed
    pub fn free(&self) -> usize {
        self.usable_capacity() - self.len()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if buffer is full
    pub fn is_full(&self) -> bool {
        self.len() == self.usable_capacity()
    }

    /// Push a unit into the buffer. Producer side only.
    ///
    /// Returns `false` without touching the buffer when it is full; unread
    /// data is never overwritten.
    pub fn push(&self, value: T) -> bool {
        let head = self.head.load(Ordering::Relaxed);
        let next_head = self.advance(head);

        if next_head == self.tail.load(Ordering::Acquire) {
            return false;
        }

        // SAFETY: `head` is never inside the readable window [tail, head),
        // so the consumer does not touch this slot until we publish `next_head`.
        unsafe { *self.storage[head].get() = value };

        self.head.store(next_head, Ordering::Release);
        true
    }

    /// Look at the oldest unit without consuming it. Consumer side only.
    pub fn peek(&self) -> Option<T> {
        let tail = self.tail.load(Ordering::Relaxed);
        if tail == self.head.load(Ordering::Acquire) {
            return None;
        }

        // SAFETY: `tail` is inside the readable window, which the producer
        // does not write until we move `tail` past it.
        Some(unsafe { *self.storage[tail].get() })
    }

    /// Remove and return the oldest unit. Consumer side only.
    pub fn pop(&self) -> Option<T> {
        let tail = self.tail.load(Ordering::Relaxed);
        if tail == self.head.load(Ordering::Acquire) {
            return None;
        }

        // SAFETY: see `peek`.
        let value = unsafe { *self.storage[tail].get() };
        self.tail.store(self.advance(tail), Ordering::Release);
        Some(value)
    }

    /// Copy up to `out.len()` units out of the buffer. Consumer side only.
    ///
    /// Both indices are sampled once on entry and the new tail is published
    /// once after the copy, so the producer sees either none or all of the
    /// freed space. Returns the number of units copied.
    pub fn read_into(&self, out: &mut [T]) -> usize {
        let mut tail = self.tail.load(Ordering::Relaxed);
        let head = self.head.load(Ordering::Acquire);

        let mut count = 0;
        while count < out.len() && tail != head {
            // SAFETY: see `peek`.
            out[count] = unsafe { *self.storage[tail].get() };
            tail = self.advance(tail);
            count += 1;
        }

        if count > 0 {
            self.tail.store(tail, Ordering::Release);
        }
        count
    }

    fn advance(&self, index: usize) -> usize {
        let next = index + 1;
        if next >= self.capacity {
            0
        } else {
            next
        }
    }

    fn distance(&self, from: usize, to: usize) -> usize {
        if to >= from {
            to - from
        } else {
            self.capacity - from + to
        }
    }
}

// SAFETY: RingBuffer is designed for SPSC use. Slots are only written by the
// producer outside the readable window and only read by the consumer inside
// it; the window boundaries are published with release/acquire ordering.
unsafe impl<T: Send> Send for RingBuffer<T> {}
unsafe impl<T: Send> Sync for RingBuffer<T> {}
