//! Type definitions for monitoring metrics, alerts, and health reporting

use std::collections::HashMap;

/// One completed request, as reported by the HTTP layer exactly once
#[derive(Debug, Clone)]
pub struct RequestSample {
    /// HTTP method
    pub method: String,
    /// Response status code
    pub status: u16,
    /// End-to-end handler duration in milliseconds
    pub duration_ms: i64,
    /// Estimated one-way network latency in milliseconds, when the client
    /// supplied its send time
    pub network_latency_ms: Option<i64>,
    /// Completion timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Point-in-time view of aggregated request telemetry
#[derive(Debug, Clone, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Snapshot timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Process uptime in milliseconds
    pub uptime_ms: u64,
    /// Request counters
    pub requests: RequestTotals,
    /// Handler duration distribution
    pub response_times: LatencySummary,
    /// Client-reported network latency distribution
    pub network_latency: LatencySummary,
}

/// Request counters by method and status
#[derive(Debug, Clone, serde::Serialize)]
pub struct RequestTotals {
    /// Total requests recorded
    pub total: u64,
    /// Requests by HTTP method
    pub by_method: HashMap<String, u64>,
    /// Requests by status code
    pub by_status: HashMap<u16, u64>,
    /// Requests with status >= 400
    pub errors: u64,
    /// errors / total, zero when nothing recorded
    pub error_rate: f64,
}

/// Distribution summary over one ring buffer
#[derive(Debug, Clone, serde::Serialize)]
pub struct LatencySummary {
    pub avg_ms: f64,
    pub p50_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    /// Number of samples the summary was computed over
    pub samples: usize,
}

/// Alert severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Warning,
    Critical,
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertSeverity::Warning => write!(f, "warning"),
            AlertSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Metric dimensions evaluated against threshold bands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricDimension {
    Cpu,
    Memory,
    Disk,
    ResponseTime,
    ErrorRate,
}

impl std::fmt::Display for MetricDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MetricDimension::Cpu => "cpu",
            MetricDimension::Memory => "memory",
            MetricDimension::Disk => "disk",
            MetricDimension::ResponseTime => "response_time",
            MetricDimension::ErrorRate => "error_rate",
        };
        write!(f, "{}", name)
    }
}

/// Alert information
#[derive(Debug, Clone, serde::Serialize)]
pub struct Alert {
    /// Alert ID
    pub id: String,
    /// Alert severity
    pub severity: AlertSeverity,
    /// Human-readable description of the breach
    pub message: String,
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Whether an operator has resolved the alert. Transitions false to
    /// true exactly once, via explicit resolution.
    pub resolved: bool,
}

/// Filter for alert queries
#[derive(Debug, Clone, Copy, Default, serde::Deserialize)]
pub struct AlertFilter {
    /// Match the resolution state
    pub resolved: Option<bool>,
    /// Match the severity
    pub severity: Option<AlertSeverity>,
}

/// System resource usage at a point in time
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct ResourceSnapshot {
    /// Global CPU usage, percent
    pub cpu_percent: f64,
    /// Memory usage, percent of total
    pub memory_percent: f64,
    /// Memory in use, bytes
    pub memory_used_bytes: u64,
    /// Total memory, bytes
    pub memory_total_bytes: u64,
    /// Disk usage, percent of total across mounted disks
    pub disk_percent: f64,
}

/// Classification of one health check
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Per-check classifications
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct HealthChecks {
    pub database: CheckStatus,
    pub disk: CheckStatus,
    pub memory: CheckStatus,
    pub cpu: CheckStatus,
}

/// Health verdict, recomputed on demand and never stored
#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthReport {
    /// Overall status folded from the individual checks
    pub status: CheckStatus,
    /// Individual check classifications
    pub checks: HealthChecks,
    /// Report timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Messages of currently unresolved alerts
    pub alerts: Vec<String>,
}
