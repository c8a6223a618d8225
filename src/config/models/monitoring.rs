//! Monitoring configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Monitoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    /// Alert threshold bands
    #[serde(default)]
    pub thresholds: AlertThresholds,
    /// Background resource poll interval in seconds
    #[serde(default = "default_resource_poll_secs")]
    pub resource_poll_secs: u64,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            thresholds: AlertThresholds::default(),
            resource_poll_secs: default_resource_poll_secs(),
        }
    }
}

/// Warning/critical band for one metric dimension
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ThresholdBand {
    /// Value above which a warning alert is raised
    pub warning: f64,
    /// Value above which a critical alert is raised
    pub critical: f64,
}

/// Alert thresholds per metric dimension
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertThresholds {
    /// CPU usage, percent
    #[serde(default = "default_cpu_band")]
    pub cpu: ThresholdBand,
    /// Memory usage, percent
    #[serde(default = "default_memory_band")]
    pub memory: ThresholdBand,
    /// Disk usage, percent
    #[serde(default = "default_disk_band")]
    pub disk: ThresholdBand,
    /// Request duration, milliseconds
    #[serde(default = "default_response_time_band")]
    pub response_time_ms: ThresholdBand,
    /// Error rate, percent of total requests
    #[serde(default = "default_error_rate_band")]
    pub error_rate_percent: ThresholdBand,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            cpu: default_cpu_band(),
            memory: default_memory_band(),
            disk: default_disk_band(),
            response_time_ms: default_response_time_band(),
            error_rate_percent: default_error_rate_band(),
        }
    }
}

fn default_cpu_band() -> ThresholdBand {
    ThresholdBand {
        warning: 80.0,
        critical: 95.0,
    }
}

fn default_memory_band() -> ThresholdBand {
    ThresholdBand {
        warning: 85.0,
        critical: 95.0,
    }
}

fn default_disk_band() -> ThresholdBand {
    ThresholdBand {
        warning: 85.0,
        critical: 95.0,
    }
}

fn default_response_time_band() -> ThresholdBand {
    ThresholdBand {
        warning: 1_000.0,
        critical: 3_000.0,
    }
}

fn default_error_rate_band() -> ThresholdBand {
    ThresholdBand {
        warning: 5.0,
        critical: 10.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_defaults() {
        let thresholds = AlertThresholds::default();
        assert_eq!(thresholds.cpu.warning, 80.0);
        assert_eq!(thresholds.cpu.critical, 95.0);
        assert_eq!(thresholds.memory.warning, 85.0);
        assert_eq!(thresholds.disk.critical, 95.0);
        assert_eq!(thresholds.response_time_ms.warning, 1_000.0);
        assert_eq!(thresholds.error_rate_percent.critical, 10.0);
    }

    #[test]
    fn test_monitoring_config_deserialization() {
        let yaml = r#"
thresholds:
  cpu:
    warning: 70.0
    critical: 90.0
resource_poll_secs: 10
"#;
        let config: MonitoringConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.thresholds.cpu.warning, 70.0);
        assert_eq!(config.thresholds.memory.warning, 85.0);
        assert_eq!(config.resource_poll_secs, 10);
    }
}
