//! Application state shared across HTTP handlers
//!
//! All governance components are constructed here, once, at process startup
//! and handed to the HTTP layer by reference. There is no ambient global
//! state.

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::limiter::LimiterRegistry;
use crate::monitoring::{AlertEngine, DatabaseProbe, HealthAggregator, MetricsRecorder, TcpProbe};

/// HTTP server state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Admission gate, one limiter per endpoint category
    pub limiters: Arc<LimiterRegistry>,
    /// Request telemetry recorder
    pub recorder: Arc<MetricsRecorder>,
    /// Threshold alerting engine
    pub alerts: Arc<AlertEngine>,
    /// Health rollup
    pub health: Arc<HealthAggregator>,
}

impl AppState {
    /// Create state with the default TCP database probe
    pub fn new(config: Config) -> Self {
        let probe = Arc::new(TcpProbe::new(config.database.addr.clone()));
        Self::with_probe(config, probe)
    }

    /// Create state with an injected database probe
    pub fn with_probe(config: Config, probe: Arc<dyn DatabaseProbe>) -> Self {
        let limiters = Arc::new(LimiterRegistry::new(&config.rate_limit));
        let recorder = Arc::new(MetricsRecorder::new());
        let alerts = Arc::new(AlertEngine::new(config.monitoring.thresholds.clone()));
        let health = Arc::new(HealthAggregator::new(
            probe,
            alerts.clone(),
            Duration::from_millis(config.database.probe_timeout_ms),
        ));

        Self {
            config: Arc::new(config),
            limiters,
            recorder,
            alerts,
            health,
        }
    }
}
