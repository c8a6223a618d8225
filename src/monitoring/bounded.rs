//! Bounded collection utilities for metrics

use std::collections::VecDeque;

/// Maximum number of samples retained per ring buffer. Percentiles are
/// always computed over the most recent window of traffic, not all-time
/// history.
pub(super) const MAX_SAMPLE_BUFFER: usize = 1_000;

/// Maximum number of alerts retained, oldest evicted first regardless of
/// resolution state.
pub(super) const MAX_RETAINED_ALERTS: usize = 100;

/// Helper trait for bounded VecDeque operations
pub(super) trait BoundedPush<T> {
    fn push_bounded(&mut self, value: T, max_size: usize);
}

impl<T> BoundedPush<T> for VecDeque<T> {
    /// Push a value while maintaining a maximum size (O(1) amortized)
    #[inline]
    fn push_bounded(&mut self, value: T, max_size: usize) {
        if self.len() >= max_size {
            self.pop_front();
        }
        self.push_back(value);
    }
}
