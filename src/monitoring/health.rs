//! Health aggregation
//!
//! Combines a bounded-time database probe, a resource snapshot, and the
//! alert engine's view into a single verdict. Evaluation is read-only with
//! one exception: a failed or timed-out database probe raises a critical
//! alert.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::alerts::AlertEngine;
use super::system::resource_snapshot;
use super::types::{
    AlertSeverity, CheckStatus, HealthChecks, HealthReport, MetricDimension, ResourceSnapshot,
};

/// Database liveness probe
///
/// The gateway does not own the marketplace database; health reporting only
/// needs a bounded-time round trip against it.
#[async_trait]
pub trait DatabaseProbe: Send + Sync {
    /// One liveness round trip. Errors describe the failure.
    async fn ping(&self) -> Result<(), String>;
}

/// Probe that opens a TCP connection to the database endpoint
#[derive(Debug, Clone)]
pub struct TcpProbe {
    addr: String,
}

impl TcpProbe {
    /// Probe the given host:port address
    pub fn new(addr: impl Into<String>) -> Self {
        Self { addr: addr.into() }
    }
}

#[async_trait]
impl DatabaseProbe for TcpProbe {
    async fn ping(&self) -> Result<(), String> {
        tokio::net::TcpStream::connect(&self.addr)
            .await
            .map(|_| ())
            .map_err(|e| format!("connect {}: {}", self.addr, e))
    }
}

/// Read-only rollup of probe, resources, and alert state
pub struct HealthAggregator {
    probe: Arc<dyn DatabaseProbe>,
    engine: Arc<AlertEngine>,
    probe_timeout: Duration,
}

impl HealthAggregator {
    /// Create an aggregator. The probe timeout bounds the database round
    /// trip so a stalled database cannot stall health reporting.
    pub fn new(
        probe: Arc<dyn DatabaseProbe>,
        engine: Arc<AlertEngine>,
        probe_timeout: Duration,
    ) -> Self {
        Self {
            probe,
            engine,
            probe_timeout,
        }
    }

    /// Evaluate current health. Always produces a report; trouble is
    /// signalled through the embedded status, never through an error.
    pub async fn evaluate(&self) -> HealthReport {
        let database = self.probe_database().await;
        self.report_with_resources(database, resource_snapshot())
    }

    /// Evaluate with an explicit resource snapshot (used by tests)
    pub fn report_with_resources(
        &self,
        database: CheckStatus,
        resources: ResourceSnapshot,
    ) -> HealthReport {
        let checks = HealthChecks {
            database,
            disk: self.engine.classify(MetricDimension::Disk, resources.disk_percent),
            memory: self
                .engine
                .classify(MetricDimension::Memory, resources.memory_percent),
            cpu: self.engine.classify(MetricDimension::Cpu, resources.cpu_percent),
        };

        HealthReport {
            status: fold(&checks),
            checks,
            timestamp: chrono::Utc::now(),
            alerts: self.engine.unresolved_messages(),
        }
    }

    /// Run the database probe under the configured timeout
    pub async fn probe_database(&self) -> CheckStatus {
        match tokio::time::timeout(self.probe_timeout, self.probe.ping()).await {
            Ok(Ok(())) => {
                debug!("database probe succeeded");
                CheckStatus::Healthy
            }
            Ok(Err(e)) => {
                warn!("database probe failed: {}", e);
                self.engine.raise(
                    AlertSeverity::Critical,
                    format!("database probe failed: {}", e),
                );
                CheckStatus::Unhealthy
            }
            Err(_) => {
                warn!(
                    "database probe timed out after {:?}",
                    self.probe_timeout
                );
                self.engine.raise(
                    AlertSeverity::Critical,
                    format!("database probe timed out after {:?}", self.probe_timeout),
                );
                CheckStatus::Unhealthy
            }
        }
    }
}

/// Fold per-check classifications into the overall verdict: healthy when
/// everything is healthy, unhealthy when anything is, degraded otherwise.
fn fold(checks: &HealthChecks) -> CheckStatus {
    let all = [checks.database, checks.disk, checks.memory, checks.cpu];
    if all.iter().any(|&c| c == CheckStatus::Unhealthy) {
        CheckStatus::Unhealthy
    } else if all.iter().all(|&c| c == CheckStatus::Healthy) {
        CheckStatus::Healthy
    } else {
        CheckStatus::Degraded
    }
}
