//! Host-polled one-shot timer with an explicit cancellation handle.
//!
//! # Invariants
//! - A timer fires at most once.
//! - A cancelled timer never fires, even when polled past its deadline.
//! - Dropping the `CancelHandle` cancels the timer.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

const PENDING: u8 = 0;
const FIRED: u8 = 1;
const CANCELLED: u8 = 2;

/// Pending deferred callback owned by the component that scheduled it.
#[derive(Debug)]
pub struct OneShot {
    deadline: Instant,
    state: Arc<AtomicU8>,
}

/// Teardown handle returned to the host; cancel on unmount.
#[derive(Debug)]
#[must_use = "dropping the handle cancels the timer"]
pub struct CancelHandle {
    state: Arc<AtomicU8>,
}

impl OneShot {
    /// Schedules a timer due `delay` after `now`.
    pub fn schedule(now: Instant, delay: Duration) -> (Self, CancelHandle) {
        let state = Arc::new(AtomicU8::new(PENDING));
        let timer = Self {
            deadline: now + delay,
            state: Arc::clone(&state),
        };
        (timer, CancelHandle { state })
    }

    /// Returns `true` exactly once, on the first poll at or after the deadline.
    pub fn poll(&self, now: Instant) -> bool {
        if now < self.deadline {
            return false;
        }
        self.state
            .compare_exchange(PENDING, FIRED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn is_pending(&self) -> bool {
        self.state.load(Ordering::Acquire) == PENDING
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub(crate) fn cancel(&self) {
        cancel_state(&self.state);
    }
}

impl CancelHandle {
    pub fn cancel(&self) {
        cancel_state(&self.state);
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.load(Ordering::Acquire) == CANCELLED
    }
}

impl Drop for CancelHandle {
    fn drop(&mut self) {
        cancel_state(&self.state);
    }
}

fn cancel_state(state: &AtomicU8) {
    // Fired timers stay fired.
    let _ = state.compare_exchange(PENDING, CANCELLED, Ordering::AcqRel, Ordering::Acquire);
}

#[cfg(test)]
mod tests {
    use super::OneShot;
    use std::time::{Duration, Instant};

    #[test]
    fn fires_once_after_deadline() {
        let start = Instant::now();
        let (timer, _handle) = OneShot::schedule(start, Duration::from_millis(500));

        assert!(!timer.poll(start + Duration::from_millis(499)));
        assert!(timer.poll(start + Duration::from_millis(500)));
        assert!(!timer.poll(start + Duration::from_millis(900)));
        assert!(!timer.is_pending());
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let start = Instant::now();
        let (timer, handle) = OneShot::schedule(start, Duration::from_millis(10));
        handle.cancel();

        assert!(handle.is_cancelled());
        assert!(!timer.poll(start + Duration::from_secs(1)));
    }

    #[test]
    fn dropping_handle_cancels() {
        let start = Instant::now();
        let (timer, handle) = OneShot::schedule(start, Duration::ZERO);
        drop(handle);

        assert!(!timer.poll(start));
    }
}
