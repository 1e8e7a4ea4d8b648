//! Cancellable delayed trigger.

/// A single pending deadline that re-arming pushes back.
///
/// Every arm gets a fresh timer id, so callers can tell exactly which timer a
/// re-arm cancelled and which one fired.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay_ms: u64,
    pending: Option<Timer>,
    next_id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Timer {
    id: u64,
    deadline_ms: u64,
}

impl Debouncer {
    pub const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
            next_id: 0,
        }
    }

    pub const fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Arm the timer to fire `delay_ms` after `now_ms`.
    ///
    /// Returns the id of the timer this replaced, if one was pending.
    pub fn queue(&mut self, now_ms: u64) -> Option<u64> {
        self.next_id += 1;
        let replaced = self.pending.replace(Timer {
            id: self.next_id,
            deadline_ms: now_ms.saturating_add(self.delay_ms),
        });
        replaced.map(|timer| timer.id)
    }

    /// Fire the pending timer if its deadline has passed.
    ///
    /// Returns the id of the timer that fired. A timer fires at most once.
    pub fn take_ready(&mut self, now_ms: u64) -> Option<u64> {
        let timer = self.pending?;
        if now_ms >= timer.deadline_ms {
            self.pending = None;
            Some(timer.id)
        } else {
            None
        }
    }

    /// Drop the pending timer without firing it.
    pub fn cancel(&mut self) -> Option<u64> {
        self.pending.take().map(|timer| timer.id)
    }

    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.pending.map(|timer| timer.deadline_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_delay() {
        let mut debouncer = Debouncer::new(200);
        assert_eq!(debouncer.queue(0), None);
        assert_eq!(debouncer.take_ready(199), None);
        assert_eq!(debouncer.take_ready(200), Some(1));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_requeue_cancels_exactly_one() {
        let mut debouncer = Debouncer::new(200);
        assert_eq!(debouncer.queue(0), None);
        assert_eq!(debouncer.queue(50), Some(1));
        assert_eq!(debouncer.queue(100), Some(2));
        assert_eq!(debouncer.deadline_ms(), Some(300));
        assert_eq!(debouncer.take_ready(250), None);
        assert_eq!(debouncer.take_ready(300), Some(3));
    }

    #[test]
    fn test_never_fires_twice() {
        let mut debouncer = Debouncer::new(10);
        debouncer.queue(0);
        assert!(debouncer.take_ready(10).is_some());
        assert_eq!(debouncer.take_ready(20), None);
        assert_eq!(debouncer.take_ready(1_000), None);
    }

    #[test]
    fn test_cancel_clears_pending() {
        let mut debouncer = Debouncer::new(10);
        assert_eq!(debouncer.cancel(), None);
        debouncer.queue(0);
        assert_eq!(debouncer.cancel(), Some(1));
        assert_eq!(debouncer.take_ready(100), None);
        assert_eq!(debouncer.deadline_ms(), None);
    }

    #[test]
    fn test_zero_delay_fires_immediately() {
        let mut debouncer = Debouncer::new(0);
        debouncer.queue(5);
        assert_eq!(debouncer.take_ready(5), Some(1));
    }
}
