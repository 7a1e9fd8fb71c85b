//! Lock-free callback registration

use std::marker::PhantomData;
use std::ptr;
use std::sync::atomic::{AtomicPtr, AtomicUsize, Ordering};

/// Plain function pointer types that fit in one `AtomicPtr`
pub(crate) trait FnPointer: Copy {
    fn into_raw(self) -> *mut ();

    /// # Safety
    /// `raw` must have been produced by `into_raw` on the same type.
    unsafe fn from_raw(raw: *mut ()) -> Self;
}

/// One callback + opaque context, readable from interrupt context.
///
/// Registration stores the context first and publishes the function last,
/// so an interrupt that observes the new function also observes its
/// context. Registering while the matching interrupt source is active may
/// pair the old function with the new context for one invocation.
pub(crate) struct CallbackSlot<F> {
    func: AtomicPtr<()>,
    context: AtomicUsize,
    _marker: PhantomData<F>,
}

impl<F: FnPointer> CallbackSlot<F> {
    pub(crate) const fn new() -> Self {
        Self {
            func: AtomicPtr::new(ptr::null_mut()),
            context: AtomicUsize::new(0),
            _marker: PhantomData,
        }
    }

    /// Replace the registration. `None` clears it.
    pub(crate) fn register(&self, callback: Option<F>, context: usize) {
        self.context.store(context, Ordering::Relaxed);
        let raw = callback.map_or(ptr::null_mut(), F::into_raw);
        self.func.store(raw, Ordering::Release);
    }

    pub(crate) fn get(&self) -> Option<(F, usize)> {
        let raw = self.func.load(Ordering::Acquire);
        if raw.is_null() {
            return None;
        }
        let context = self.context.load(Ordering::Relaxed);

        // SAFETY: the only non-null values ever stored come from
        // `F::into_raw` in `register`.
        Some((unsafe { F::from_raw(raw) }, context))
    }

    pub(crate) fn is_registered(&self) -> bool {
        !self.func.load(Ordering::Acquire).is_null()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Hook = fn(usize) -> usize;

    impl FnPointer for Hook {
        fn into_raw(self) -> *mut () {
            self as *mut ()
        }

        unsafe fn from_raw(raw: *mut ()) -> Self {
            std::mem::transmute::<*mut (), Self>(raw)
        }
    }

    fn double(x: usize) -> usize {
        x * 2
    }

    fn negate(x: usize) -> usize {
        usize::MAX - x
    }

    #[test]
    fn test_register_replace_clear() {
        let slot = CallbackSlot::<Hook>::new();
        assert!(slot.get().is_none());

        slot.register(Some(double), 21);
        let (hook, context) = slot.get().unwrap();
        assert_eq!(hook(context), 42);

        slot.register(Some(negate), 0);
        let (hook, context) = slot.get().unwrap();
        assert_eq!(hook(context), usize::MAX);

        slot.register(None, 7);
        assert!(!slot.is_registered());
    }
}
