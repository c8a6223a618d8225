//! Sliding window rate limiting implementation
//!
//! A sliding log keeps every admitted timestamp inside the trailing window,
//! so bursts are penalized proportionally to how many requests landed within
//! it. Once the limit is hit the identifier enters a cooldown which may be
//! longer than the accounting window itself.

use dashmap::DashMap;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use super::clock::{Clock, SystemClock};

/// Sliding-window limiter configuration. Immutable once the limiter is built.
#[derive(Debug, Clone)]
pub struct LimiterConfig {
    /// Maximum admitted requests per window
    pub max_requests: u32,
    /// Window size
    pub window: Duration,
    /// Cooldown imposed when the limit is hit
    pub retry_after: Duration,
}

impl LimiterConfig {
    /// Create a config whose cooldown equals the window
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            retry_after: window,
        }
    }

    /// Override the cooldown, e.g. to impose a longer lockout for auth
    pub fn with_retry_after(mut self, retry_after: Duration) -> Self {
        self.retry_after = retry_after;
        self
    }
}

/// Per-identifier window state
#[derive(Debug, Default)]
struct WindowState {
    /// Admitted request timestamps, oldest first
    timestamps: VecDeque<Instant>,
    /// Cooldown expiry while the identifier is blocked
    blocked_until: Option<Instant>,
}

impl WindowState {
    /// Drop timestamps that have aged out of the window
    fn purge(&mut self, now: Instant, window: Duration) {
        let cutoff = now.checked_sub(window);
        while let Some(&oldest) = self.timestamps.front() {
            match cutoff {
                Some(cutoff) if oldest < cutoff => {
                    self.timestamps.pop_front();
                }
                _ => break,
            }
        }
    }

    fn is_idle(&self, now: Instant) -> bool {
        let block_active = self.blocked_until.is_some_and(|until| until > now);
        self.timestamps.is_empty() && !block_active
    }
}

/// Per-identifier sliding-window limiter
///
/// Each identifier is tracked independently; blocking one never affects
/// another. All state transitions for a given identifier happen under that
/// identifier's map entry lock.
#[derive(Debug)]
pub struct SlidingWindowLimiter {
    config: LimiterConfig,
    clock: Arc<dyn Clock>,
    states: DashMap<String, WindowState>,
}

impl SlidingWindowLimiter {
    /// Create a limiter on the system clock
    pub fn new(config: LimiterConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a limiter on an injected clock
    pub fn with_clock(config: LimiterConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            states: DashMap::new(),
        }
    }

    /// Limiter configuration
    pub fn config(&self) -> &LimiterConfig {
        &self.config
    }

    /// Decide whether a new request for this identifier is admissible now.
    ///
    /// Purges aged-out timestamps, clears an expired cooldown, and when the
    /// retained count has already reached the limit transitions the
    /// identifier into the blocked state. The whole check-and-transition
    /// runs under the identifier's entry lock.
    pub fn can_make_request(&self, id: &str) -> bool {
        let now = self.clock.now();
        let mut entry = self.states.entry(id.to_string()).or_default();
        let state = entry.value_mut();

        state.purge(now, self.config.window);

        if let Some(until) = state.blocked_until {
            if now < until {
                return false;
            }
            state.blocked_until = None;
        }

        if state.timestamps.len() >= self.config.max_requests as usize {
            state.blocked_until = Some(now + self.config.retry_after);
            debug!(
                identifier = id,
                count = state.timestamps.len(),
                cooldown_ms = self.config.retry_after.as_millis() as u64,
                "request limit reached, blocking identifier"
            );
            return false;
        }

        true
    }

    /// Record an admitted request for this identifier.
    ///
    /// Recording without a prior `can_make_request` is legal (the server may
    /// record after the fact); the next `can_make_request` detects the
    /// overflow.
    pub fn record_request(&self, id: &str) {
        let now = self.clock.now();
        let mut entry = self.states.entry(id.to_string()).or_default();
        entry.value_mut().timestamps.push_back(now);
    }

    /// Check and record in one step under a single entry lock.
    ///
    /// Returns `Err(delay)` when the identifier is blocked or just hit the
    /// limit; concurrent callers for the same identifier can never both slip
    /// past the threshold.
    pub fn acquire(&self, id: &str) -> Result<(), Duration> {
        let now = self.clock.now();
        let mut entry = self.states.entry(id.to_string()).or_default();
        let state = entry.value_mut();

        state.purge(now, self.config.window);

        if let Some(until) = state.blocked_until {
            if now < until {
                return Err(until - now);
            }
            state.blocked_until = None;
        }

        if state.timestamps.len() >= self.config.max_requests as usize {
            state.blocked_until = Some(now + self.config.retry_after);
            debug!(
                identifier = id,
                count = state.timestamps.len(),
                cooldown_ms = self.config.retry_after.as_millis() as u64,
                "request limit reached, blocking identifier"
            );
            return Err(self.config.retry_after);
        }

        state.timestamps.push_back(now);
        Ok(())
    }

    /// Requests still admissible in the current window
    pub fn remaining_requests(&self, id: &str) -> u32 {
        let now = self.clock.now();
        match self.states.get_mut(id) {
            Some(mut entry) => {
                let state = entry.value_mut();
                state.purge(now, self.config.window);
                (self.config.max_requests as usize).saturating_sub(state.timestamps.len()) as u32
            }
            None => self.config.max_requests,
        }
    }

    /// Time until the oldest retained timestamp exits the window.
    /// Zero when no timestamps are retained.
    pub fn time_until_reset(&self, id: &str) -> Duration {
        let now = self.clock.now();
        match self.states.get_mut(id) {
            Some(mut entry) => {
                let state = entry.value_mut();
                state.purge(now, self.config.window);
                state
                    .timestamps
                    .front()
                    .map(|&oldest| (oldest + self.config.window).saturating_duration_since(now))
                    .unwrap_or(Duration::ZERO)
            }
            None => Duration::ZERO,
        }
    }

    /// Clear one identifier's state (administrative override)
    pub fn reset(&self, id: &str) {
        self.states.remove(id);
    }

    /// Clear all state
    pub fn reset_all(&self) {
        self.states.clear();
    }

    /// Evict identifiers with no retained timestamps and no active block.
    /// Safe after a window of inactivity; invoked from a background task.
    pub fn cleanup_idle(&self) {
        let now = self.clock.now();
        self.states.retain(|_, state| {
            state.purge(now, self.config.window);
            !state.is_idle(now)
        });
    }

    /// Number of tracked identifiers
    pub fn tracked_identifiers(&self) -> usize {
        self.states.len()
    }
}
