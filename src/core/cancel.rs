//! Cooperative cancellation flag.

use std::sync::atomic::{AtomicBool, Ordering};

/// Binary cancellation request, safe to set from any thread.
///
/// Cancellation is cooperative: a running state polls
/// [`is_canceled`](Self::is_canceled) and returns an outcome of its own
/// choosing (typically `"canceled"` or `"preempted"`).
#[derive(Debug, Default)]
pub struct CancellationFlag {
    canceled: AtomicBool,
}

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::SeqCst);
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.canceled.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn starts_clear() {
        assert!(!CancellationFlag::new().is_canceled());
    }

    #[test]
    fn cancel_then_reset() {
        let flag = CancellationFlag::new();
        flag.cancel();
        assert!(flag.is_canceled());
        flag.cancel();
        assert!(flag.is_canceled());
        flag.reset();
        assert!(!flag.is_canceled());
    }

    #[test]
    fn visible_across_threads() {
        let flag = Arc::new(CancellationFlag::new());
        let remote = Arc::clone(&flag);
        thread::spawn(move || remote.cancel()).join().unwrap();
        assert!(flag.is_canceled());
    }
}
