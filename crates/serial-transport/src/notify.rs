//! Threshold notification state

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Threshold notification settings for one direction.
///
/// Configured from mainline code, evaluated in interrupt context after each
/// unit moved. Two modes:
/// - persistent: fire whenever the observed quantity is `>=` the threshold
/// - edge: fire only when the quantity is exactly the threshold
///
/// Edge mode compares for equality at each observation, so a quantity that
/// steps over the threshold between two observations never fires.
pub(crate) struct Notification {
    enabled: AtomicBool,
    persistent: AtomicBool,
    threshold: AtomicUsize,
}

impl Notification {
    pub(crate) const fn new() -> Self {
        Self {
            enabled: AtomicBool::new(false),
            persistent: AtomicBool::new(false),
            threshold: AtomicUsize::new(0),
        }
    }

    /// Update the mode, returning the previous enabled state
    pub(crate) fn enable(&self, enabled: bool, persistent: bool) -> bool {
        self.persistent.store(persistent, Ordering::Relaxed);
        self.enabled.swap(enabled, Ordering::AcqRel)
    }

    /// Set the threshold. Zero is ignored and keeps the previous value.
    pub(crate) fn set_threshold(&self, threshold: usize) -> bool {
        if threshold == 0 {
            return false;
        }
        self.threshold.store(threshold, Ordering::Relaxed);
        true
    }

    pub(crate) fn threshold(&self) -> usize {
        self.threshold.load(Ordering::Relaxed)
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Decide whether an observation of `quantity` triggers a notification
    pub(crate) fn should_fire(&self, quantity: usize) -> bool {
        if !self.is_enabled() {
            return false;
        }

        let threshold = self.threshold();
        if self.persistent.load(Ordering::Relaxed) {
            quantity >= threshold
        } else {
            quantity == threshold
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_never_fires() {
        let notification = Notification::new();
        notification.set_threshold(1);
        assert!(!notification.should_fire(1));
        assert!(!notification.should_fire(100));
    }

    #[test]
    fn test_edge_fires_on_equality_only() {
        let notification = Notification::new();
        notification.set_threshold(4);
        notification.enable(true, false);

        assert!(!notification.should_fire(3));
        assert!(notification.should_fire(4));
        assert!(!notification.should_fire(5));
    }

    #[test]
    fn test_edge_misses_burst_over_threshold() {
        let notification = Notification::new();
        notification.set_threshold(4);
        notification.enable(true, false);

        // 3 -> 5 in one observation step
        let fired: Vec<bool> = [3, 5].iter().map(|&q| notification.should_fire(q)).collect();
        assert_eq!(fired, vec![false, false]);
    }

    #[test]
    fn test_persistent_fires_at_and_above() {
        let notification = Notification::new();
        notification.set_threshold(4);
        notification.enable(true, true);

        assert!(!notification.should_fire(3));
        assert!(notification.should_fire(4));
        assert!(notification.should_fire(5));
        assert!(notification.should_fire(5));
    }

    #[test]
    fn test_zero_threshold_is_ignored() {
        let notification = Notification::new();
        assert!(notification.set_threshold(6));
        assert!(!notification.set_threshold(0));
        assert_eq!(notification.threshold(), 6);
    }

    #[test]
    fn test_enable_returns_previous_state() {
        let notification = Notification::new();
        assert!(!notification.enable(true, false));
        assert!(notification.enable(false, false));
        assert!(!notification.is_enabled());
    }
}
