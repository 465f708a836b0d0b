//! Position persistence policy
//!
//! Decides which sampled positions are worth writing. A sample only becomes
//! a candidate when it differs from the last *persisted* position by more
//! than a threshold, and a candidate is only written after it has stood
//! unchanged for a debounce window. The session task owns the actual timer;
//! this type owns the policy, so it stays testable without a clock.
//!
//! Pause, seek, and track changes bypass the policy entirely with immediate
//! writes: those are the moments a user is most likely to kill the process
//! next.

/// Debounce filter over sampled positions
#[derive(Debug)]
pub struct PositionDebouncer {
    threshold_ms: i64,
    last_persisted_ms: i64,
    pending_ms: Option<i64>,
}

impl PositionDebouncer {
    /// Create a debouncer with the given candidate threshold
    pub fn new(threshold_ms: i64) -> Self {
        Self {
            threshold_ms,
            last_persisted_ms: 0,
            pending_ms: None,
        }
    }

    /// Offer a sampled position
    ///
    /// Returns `true` when the sample became a *new* candidate, which means
    /// the caller must re-arm its debounce timer. Re-offering the value that
    /// is already pending keeps the existing timer running, so a stalled
    /// position flushes once the window elapses instead of re-arming forever.
    pub fn offer(&mut self, position_ms: i64) -> bool {
        if (position_ms - self.last_persisted_ms).abs() <= self.threshold_ms {
            return false;
        }
        if self.pending_ms == Some(position_ms) {
            return false;
        }
        self.pending_ms = Some(position_ms);
        true
    }

    /// Whether a candidate is waiting for its window to elapse
    pub fn has_pending(&self) -> bool {
        self.pending_ms.is_some()
    }

    /// Take the pending candidate for writing
    pub fn take_pending(&mut self) -> Option<i64> {
        self.pending_ms.take()
    }

    /// Record a position as persisted, dropping any pending candidate
    ///
    /// Called for every write path, immediate or debounced. A write that
    /// later fails is still counted here: the next save supersedes it, which
    /// is the recovery path for persistence I/O errors.
    pub fn note_persisted(&mut self, position_ms: i64) {
        self.last_persisted_ms = position_ms;
        self.pending_ms = None;
    }

    /// The last position recorded as persisted
    pub fn last_persisted_ms(&self) -> i64 {
        self.last_persisted_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_within_threshold_are_ignored() {
        let mut debouncer = PositionDebouncer::new(5000);

        assert!(!debouncer.offer(0));
        assert!(!debouncer.offer(3000));
        assert!(!debouncer.offer(5000));
        assert!(!debouncer.has_pending());
    }

    #[test]
    fn sample_beyond_threshold_becomes_candidate() {
        let mut debouncer = PositionDebouncer::new(5000);

        assert!(debouncer.offer(5001));
        assert!(debouncer.has_pending());
        assert_eq!(debouncer.take_pending(), Some(5001));
        assert!(!debouncer.has_pending());
    }

    #[test]
    fn changing_candidate_rearms_stable_candidate_does_not() {
        let mut debouncer = PositionDebouncer::new(5000);

        assert!(debouncer.offer(6000));
        // Same value again: window keeps running.
        assert!(!debouncer.offer(6000));
        // Newer value: window must restart.
        assert!(debouncer.offer(6500));
        assert_eq!(debouncer.take_pending(), Some(6500));
    }

    #[test]
    fn persisting_resets_the_reference_point() {
        let mut debouncer = PositionDebouncer::new(5000);

        assert!(debouncer.offer(10_000));
        debouncer.note_persisted(10_000);
        assert!(!debouncer.has_pending());

        // Distances are now measured from the new reference.
        assert!(!debouncer.offer(12_000));
        assert!(debouncer.offer(15_001));
    }

    #[test]
    fn threshold_is_symmetric_for_backward_seeks() {
        let mut debouncer = PositionDebouncer::new(5000);
        debouncer.note_persisted(60_000);

        assert!(!debouncer.offer(56_000));
        assert!(debouncer.offer(30_000));
    }
}
