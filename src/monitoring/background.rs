//! Background monitoring tasks

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

use super::alerts::AlertEngine;
use super::system::resource_snapshot;
use super::types::MetricDimension;
use crate::limiter::LimiterRegistry;

/// Poll system resources on an interval and run them through the alert
/// engine. Resource dimensions are edge-evaluated on every poll.
pub fn start_resource_poll(engine: Arc<AlertEngine>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;

            let resources = resource_snapshot();
            debug!(
                cpu = resources.cpu_percent,
                memory = resources.memory_percent,
                disk = resources.disk_percent,
                "resource poll"
            );

            engine.evaluate(MetricDimension::Cpu, resources.cpu_percent);
            engine.evaluate(MetricDimension::Memory, resources.memory_percent);
            engine.evaluate(MetricDimension::Disk, resources.disk_percent);
        }
    })
}

/// Periodically evict idle limiter entries so long-running processes do not
/// accumulate state for one-off callers.
pub fn start_limiter_cleanup(registry: Arc<LimiterRegistry>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            registry.cleanup_idle();
        }
    })
}
