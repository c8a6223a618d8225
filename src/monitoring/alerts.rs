//! Threshold alerting engine
//!
//! Evaluates metric values against warning/critical bands, one state machine
//! per dimension. Alerts are edge-triggered per evaluation: a breach creates
//! an alert entry, a recovery creates nothing, and repeated breaches create
//! repeated entries. Resolution is explicit and operator-driven.

use parking_lot::RwLock;
use std::collections::VecDeque;
use tracing::{debug, info, warn};

use super::bounded::{BoundedPush, MAX_RETAINED_ALERTS};
use super::types::{Alert, AlertFilter, AlertSeverity, CheckStatus, MetricDimension};
use crate::config::{AlertThresholds, ThresholdBand};

/// Consolidated alert storage behind a single lock
#[derive(Debug, Default)]
struct AlertStorage {
    /// Retained alerts, oldest first. Capped; older entries are evicted
    /// regardless of resolution state.
    alerts: VecDeque<Alert>,
}

/// Alert engine evaluating metric dimensions against threshold bands
#[derive(Debug)]
pub struct AlertEngine {
    thresholds: AlertThresholds,
    storage: RwLock<AlertStorage>,
}

impl AlertEngine {
    /// Create an engine with the given threshold bands
    pub fn new(thresholds: AlertThresholds) -> Self {
        Self {
            thresholds,
            storage: RwLock::new(AlertStorage::default()),
        }
    }

    /// Configured threshold bands
    pub fn thresholds(&self) -> &AlertThresholds {
        &self.thresholds
    }

    /// Evaluate one value against its dimension's band.
    ///
    /// Emits a critical alert above the critical threshold, a warning alert
    /// above the warning threshold, nothing otherwise. Returns the created
    /// alert, if any.
    pub fn evaluate(&self, dimension: MetricDimension, value: f64) -> Option<Alert> {
        let band = self.band(dimension);

        let severity = if value > band.critical {
            AlertSeverity::Critical
        } else if value > band.warning {
            AlertSeverity::Warning
        } else {
            return None;
        };

        let threshold = match severity {
            AlertSeverity::Critical => band.critical,
            AlertSeverity::Warning => band.warning,
        };

        Some(self.raise(
            severity,
            format!(
                "{} at {:.1}{} exceeds {} threshold {:.1}{}",
                dimension,
                value,
                dimension_unit(dimension),
                severity,
                threshold,
                dimension_unit(dimension),
            ),
        ))
    }

    /// Classify a value against its dimension's band without raising an
    /// alert. Used by health reporting, which is read-only.
    pub fn classify(&self, dimension: MetricDimension, value: f64) -> CheckStatus {
        let band = self.band(dimension);
        if value > band.critical {
            CheckStatus::Unhealthy
        } else if value > band.warning {
            CheckStatus::Degraded
        } else {
            CheckStatus::Healthy
        }
    }

    /// Create and retain an alert
    pub fn raise(&self, severity: AlertSeverity, message: String) -> Alert {
        let alert = Alert {
            id: uuid::Uuid::new_v4().to_string(),
            severity,
            message,
            created_at: chrono::Utc::now(),
            resolved: false,
        };

        match severity {
            AlertSeverity::Critical => warn!(alert = %alert.id, "{}", alert.message),
            AlertSeverity::Warning => info!(alert = %alert.id, "{}", alert.message),
        }

        self.storage
            .write()
            .alerts
            .push_bounded(alert.clone(), MAX_RETAINED_ALERTS);

        alert
    }

    /// Mark an alert resolved. Returns false when the id is unknown,
    /// including when the alert has already been evicted.
    pub fn resolve(&self, id: &str) -> bool {
        let mut storage = self.storage.write();
        match storage.alerts.iter_mut().find(|a| a.id == id) {
            Some(alert) => {
                debug!(alert = id, "alert resolved");
                alert.resolved = true;
                true
            }
            None => false,
        }
    }

    /// List retained alerts matching the filter, newest first
    pub fn alerts(&self, filter: &AlertFilter) -> Vec<Alert> {
        let storage = self.storage.read();
        storage
            .alerts
            .iter()
            .rev()
            .filter(|alert| {
                filter.resolved.is_none_or(|r| alert.resolved == r)
                    && filter.severity.is_none_or(|s| alert.severity == s)
            })
            .cloned()
            .collect()
    }

    /// Messages of currently unresolved alerts, newest first
    pub fn unresolved_messages(&self) -> Vec<String> {
        let storage = self.storage.read();
        storage
            .alerts
            .iter()
            .rev()
            .filter(|alert| !alert.resolved)
            .map(|alert| alert.message.clone())
            .collect()
    }

    /// Number of retained alerts
    pub fn retained(&self) -> usize {
        self.storage.read().alerts.len()
    }

    fn band(&self, dimension: MetricDimension) -> ThresholdBand {
        match dimension {
            MetricDimension::Cpu => self.thresholds.cpu,
            MetricDimension::Memory => self.thresholds.memory,
            MetricDimension::Disk => self.thresholds.disk,
            MetricDimension::ResponseTime => self.thresholds.response_time_ms,
            MetricDimension::ErrorRate => self.thresholds.error_rate_percent,
        }
    }
}

impl Default for AlertEngine {
    fn default() -> Self {
        Self::new(AlertThresholds::default())
    }
}

fn dimension_unit(dimension: MetricDimension) -> &'static str {
    match dimension {
        MetricDimension::Cpu
        | MetricDimension::Memory
        | MetricDimension::Disk
        | MetricDimension::ErrorRate => "%",
        MetricDimension::ResponseTime => "ms",
    }
}
