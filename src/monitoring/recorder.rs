//! Request telemetry recorder
//!
//! Aggregates every completed request into counters and bounded ring
//! buffers. The recorder is constructed once at process startup and passed
//! by handle to the HTTP layer; there is no ambient global state.

use parking_lot::RwLock;
use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};
use tracing::debug;

use super::bounded::{BoundedPush, MAX_SAMPLE_BUFFER};
use super::percentile::{average, percentile};
use super::types::{LatencySummary, MetricsSnapshot, RequestSample, RequestTotals};

/// Upper sanity bound for client-reported one-way latency, exclusive.
/// Values outside `[0, 60000)` are discarded, not clamped.
const MAX_PLAUSIBLE_LATENCY_MS: i64 = 60_000;

/// All telemetry storage consolidated behind a single lock
#[derive(Debug, Default)]
struct MetricsStorage {
    total: u64,
    by_method: HashMap<String, u64>,
    by_status: HashMap<u16, u64>,
    errors: u64,
    durations: VecDeque<f64>,
    latencies: VecDeque<f64>,
}

/// Telemetry recorder for completed requests
#[derive(Debug)]
pub struct MetricsRecorder {
    storage: RwLock<MetricsStorage>,
    started_at: Instant,
}

impl MetricsRecorder {
    /// Create a new recorder
    pub fn new() -> Self {
        Self {
            storage: RwLock::new(MetricsStorage::default()),
            started_at: Instant::now(),
        }
    }

    /// Record one completed request.
    ///
    /// Never fails: malformed samples (negative duration) and out-of-range
    /// latency values are silently dropped.
    pub fn record(&self, sample: RequestSample) {
        if sample.duration_ms < 0 {
            debug!(
                method = %sample.method,
                duration_ms = sample.duration_ms,
                "dropping sample with negative duration"
            );
            return;
        }

        let mut storage = self.storage.write();

        storage.total += 1;
        *storage.by_method.entry(sample.method).or_insert(0) += 1;
        *storage.by_status.entry(sample.status).or_insert(0) += 1;
        if sample.status >= 400 {
            storage.errors += 1;
        }

        storage
            .durations
            .push_bounded(sample.duration_ms as f64, MAX_SAMPLE_BUFFER);

        if let Some(latency) = sample.network_latency_ms {
            if (0..MAX_PLAUSIBLE_LATENCY_MS).contains(&latency) {
                storage
                    .latencies
                    .push_bounded(latency as f64, MAX_SAMPLE_BUFFER);
            }
        }
    }

    /// Current error rate: errors / total, zero when nothing was recorded
    pub fn error_rate(&self) -> f64 {
        let storage = self.storage.read();
        if storage.total == 0 {
            0.0
        } else {
            storage.errors as f64 / storage.total as f64
        }
    }

    /// Total recorded requests
    pub fn total_requests(&self) -> u64 {
        self.storage.read().total
    }

    /// Process uptime
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Compute a consistent snapshot over the current buffer contents.
    ///
    /// Percentiles are computed over sorted copies; the live buffers are
    /// never sorted in place while writers may be appending.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let storage = self.storage.read();

        let error_rate = if storage.total == 0 {
            0.0
        } else {
            storage.errors as f64 / storage.total as f64
        };

        MetricsSnapshot {
            timestamp: chrono::Utc::now(),
            uptime_ms: self.started_at.elapsed().as_millis() as u64,
            requests: RequestTotals {
                total: storage.total,
                by_method: storage.by_method.clone(),
                by_status: storage.by_status.clone(),
                errors: storage.errors,
                error_rate,
            },
            response_times: summarize(&storage.durations),
            network_latency: summarize(&storage.latencies),
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

/// Summarize one ring buffer: sort a copy, compute avg and percentiles
fn summarize(buffer: &VecDeque<f64>) -> LatencySummary {
    let mut sorted: Vec<f64> = buffer.iter().filter(|v| v.is_finite()).copied().collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    LatencySummary {
        avg_ms: average(&sorted),
        p50_ms: percentile(&sorted, 0.5),
        p95_ms: percentile(&sorted, 0.95),
        p99_ms: percentile(&sorted, 0.99),
        samples: sorted.len(),
    }
}
