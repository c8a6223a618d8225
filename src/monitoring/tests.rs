//! Tests for the monitoring module

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::config::AlertThresholds;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Duration;

    fn sample(method: &str, status: u16, duration_ms: i64) -> RequestSample {
        RequestSample {
            method: method.to_string(),
            status,
            duration_ms,
            network_latency_ms: None,
            timestamp: chrono::Utc::now(),
        }
    }

    fn sample_with_latency(duration_ms: i64, latency_ms: i64) -> RequestSample {
        RequestSample {
            network_latency_ms: Some(latency_ms),
            ..sample("GET", 200, duration_ms)
        }
    }

    // ==================== MetricsRecorder Tests ====================

    #[test]
    fn test_recorder_counters() {
        let recorder = MetricsRecorder::new();
        recorder.record(sample("GET", 200, 12));
        recorder.record(sample("GET", 200, 20));
        recorder.record(sample("POST", 500, 300));

        let snapshot = recorder.snapshot();
        assert_eq!(snapshot.requests.total, 3);
        assert_eq!(snapshot.requests.by_method.get("GET"), Some(&2));
        assert_eq!(snapshot.requests.by_method.get("POST"), Some(&1));
        assert_eq!(snapshot.requests.by_status.get(&200), Some(&2));
        assert_eq!(snapshot.requests.by_status.get(&500), Some(&1));
        assert_eq!(snapshot.requests.errors, 1);
    }

    #[test]
    fn test_recorder_error_rate() {
        let recorder = MetricsRecorder::new();
        assert_eq!(recorder.error_rate(), 0.0);

        for _ in 0..9 {
            recorder.record(sample("GET", 200, 10));
        }
        recorder.record(sample("GET", 404, 10));
        assert!((recorder.error_rate() - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_recorder_empty_snapshot() {
        let snapshot = MetricsRecorder::new().snapshot();
        assert_eq!(snapshot.requests.total, 0);
        assert_eq!(snapshot.requests.error_rate, 0.0);
        assert_eq!(snapshot.response_times.samples, 0);
        assert_eq!(snapshot.response_times.p99_ms, 0.0);
    }

    #[test]
    fn test_recorder_ring_buffer_bound() {
        let recorder = MetricsRecorder::new();
        // 500 slow samples followed by 1000 fast ones; the slow ones must
        // be fully evicted
        for _ in 0..500 {
            recorder.record(sample("GET", 200, 900));
        }
        for _ in 0..1_000 {
            recorder.record(sample("GET", 200, 10));
        }

        let snapshot = recorder.snapshot();
        assert_eq!(snapshot.requests.total, 1_500);
        assert_eq!(snapshot.response_times.samples, 1_000);
        assert_eq!(snapshot.response_times.p99_ms, 10.0);
        assert_eq!(snapshot.response_times.avg_ms, 10.0);
    }

    #[test]
    fn test_recorder_percentiles() {
        let recorder = MetricsRecorder::new();
        for duration in [10, 20, 30, 40, 50] {
            recorder.record(sample("GET", 200, duration));
        }

        let snapshot = recorder.snapshot();
        assert_eq!(snapshot.response_times.p50_ms, 30.0);
        assert_eq!(snapshot.response_times.p95_ms, 50.0);
        assert_eq!(snapshot.response_times.avg_ms, 30.0);
    }

    #[test]
    fn test_recorder_drops_negative_duration() {
        let recorder = MetricsRecorder::new();
        recorder.record(sample("GET", 200, -5));
        assert_eq!(recorder.total_requests(), 0);
    }

    #[test]
    fn test_recorder_latency_sanity_bounds() {
        let recorder = MetricsRecorder::new();
        recorder.record(sample_with_latency(10, -20));
        recorder.record(sample_with_latency(10, 60_000));
        recorder.record(sample_with_latency(10, 59_999));
        recorder.record(sample_with_latency(10, 0));

        let snapshot = recorder.snapshot();
        // All four requests counted, but only the in-range latencies kept
        assert_eq!(snapshot.requests.total, 4);
        assert_eq!(snapshot.network_latency.samples, 2);
    }

    // ==================== AlertEngine Tests ====================

    #[test]
    fn test_alert_edge_triggering() {
        let engine = AlertEngine::default();

        // CPU thresholds: warn 80 / crit 95
        assert!(engine.evaluate(MetricDimension::Cpu, 50.0).is_none());
        let warning = engine.evaluate(MetricDimension::Cpu, 85.0).unwrap();
        assert_eq!(warning.severity, AlertSeverity::Warning);
        let critical = engine.evaluate(MetricDimension::Cpu, 96.0).unwrap();
        assert_eq!(critical.severity, AlertSeverity::Critical);
        // Recovery creates no "resolved" event
        assert!(engine.evaluate(MetricDimension::Cpu, 50.0).is_none());

        let alerts = engine.alerts(&AlertFilter::default());
        assert_eq!(alerts.len(), 2);
        assert!(alerts.iter().all(|a| !a.resolved));
    }

    #[test]
    fn test_alert_repeated_breaches_repeat_entries() {
        let engine = AlertEngine::default();
        engine.evaluate(MetricDimension::Cpu, 90.0);
        engine.evaluate(MetricDimension::Cpu, 90.0);
        engine.evaluate(MetricDimension::Cpu, 90.0);
        assert_eq!(engine.retained(), 3);
    }

    #[test]
    fn test_alert_value_at_threshold_does_not_trigger() {
        let engine = AlertEngine::default();
        // The rule is strictly greater-than
        assert!(engine.evaluate(MetricDimension::Cpu, 80.0).is_none());
        assert!(engine.evaluate(MetricDimension::Cpu, 95.0).is_some());
    }

    #[test]
    fn test_alert_resolution() {
        let engine = AlertEngine::default();
        let alert = engine.evaluate(MetricDimension::Cpu, 99.0).unwrap();

        assert!(engine.resolve(&alert.id));
        let unresolved = engine.alerts(&AlertFilter {
            resolved: Some(false),
            severity: None,
        });
        assert!(unresolved.is_empty());

        // Resolution is idempotent at the query level but unknown ids fail
        assert!(!engine.resolve("no-such-alert"));
    }

    #[test]
    fn test_alert_retention_cap() {
        let engine = AlertEngine::default();
        let first = engine.evaluate(MetricDimension::Cpu, 99.0).unwrap();
        for _ in 0..150 {
            engine.evaluate(MetricDimension::Cpu, 99.0);
        }

        assert_eq!(engine.retained(), 100);
        // The first alert was evicted, resolved or not
        assert!(!engine.resolve(&first.id));
    }

    #[test]
    fn test_alert_severity_filter() {
        let engine = AlertEngine::default();
        engine.evaluate(MetricDimension::Cpu, 85.0);
        engine.evaluate(MetricDimension::Cpu, 99.0);

        let criticals = engine.alerts(&AlertFilter {
            resolved: None,
            severity: Some(AlertSeverity::Critical),
        });
        assert_eq!(criticals.len(), 1);
        assert_eq!(criticals[0].severity, AlertSeverity::Critical);
    }

    #[test]
    fn test_alert_response_time_dimension() {
        let engine = AlertEngine::default();
        assert!(engine
            .evaluate(MetricDimension::ResponseTime, 500.0)
            .is_none());
        let warning = engine
            .evaluate(MetricDimension::ResponseTime, 1_500.0)
            .unwrap();
        assert_eq!(warning.severity, AlertSeverity::Warning);
        let critical = engine
            .evaluate(MetricDimension::ResponseTime, 5_000.0)
            .unwrap();
        assert_eq!(critical.severity, AlertSeverity::Critical);
    }

    #[test]
    fn test_alert_error_rate_dimension() {
        let engine = AlertEngine::default();
        assert!(engine.evaluate(MetricDimension::ErrorRate, 4.0).is_none());
        assert_eq!(
            engine
                .evaluate(MetricDimension::ErrorRate, 7.0)
                .unwrap()
                .severity,
            AlertSeverity::Warning
        );
        assert_eq!(
            engine
                .evaluate(MetricDimension::ErrorRate, 11.0)
                .unwrap()
                .severity,
            AlertSeverity::Critical
        );
    }

    #[test]
    fn test_classify_does_not_raise() {
        let engine = AlertEngine::default();
        assert_eq!(
            engine.classify(MetricDimension::Cpu, 99.0),
            CheckStatus::Unhealthy
        );
        assert_eq!(
            engine.classify(MetricDimension::Cpu, 85.0),
            CheckStatus::Degraded
        );
        assert_eq!(
            engine.classify(MetricDimension::Cpu, 10.0),
            CheckStatus::Healthy
        );
        assert_eq!(engine.retained(), 0);
    }

    // ==================== HealthAggregator Tests ====================

    struct OkProbe;

    #[async_trait]
    impl DatabaseProbe for OkProbe {
        async fn ping(&self) -> Result<(), String> {
            Ok(())
        }
    }

    struct FailingProbe;

    #[async_trait]
    impl DatabaseProbe for FailingProbe {
        async fn ping(&self) -> Result<(), String> {
            Err("connection refused".to_string())
        }
    }

    struct StalledProbe;

    #[async_trait]
    impl DatabaseProbe for StalledProbe {
        async fn ping(&self) -> Result<(), String> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        }
    }

    fn quiet_resources() -> ResourceSnapshot {
        ResourceSnapshot {
            cpu_percent: 10.0,
            memory_percent: 20.0,
            memory_used_bytes: 1024,
            memory_total_bytes: 4096,
            disk_percent: 30.0,
        }
    }

    fn aggregator(probe: Arc<dyn DatabaseProbe>) -> (HealthAggregator, Arc<AlertEngine>) {
        let engine = Arc::new(AlertEngine::new(AlertThresholds::default()));
        (
            HealthAggregator::new(probe, engine.clone(), Duration::from_millis(50)),
            engine,
        )
    }

    #[tokio::test]
    async fn test_health_all_healthy() {
        let (aggregator, engine) = aggregator(Arc::new(OkProbe));
        let database = aggregator.probe_database().await;
        let report = aggregator.report_with_resources(database, quiet_resources());

        assert_eq!(report.status, CheckStatus::Healthy);
        assert_eq!(report.checks.database, CheckStatus::Healthy);
        assert!(report.alerts.is_empty());
        assert_eq!(engine.retained(), 0);
    }

    #[tokio::test]
    async fn test_health_probe_failure_is_unhealthy_and_alerts() {
        let (aggregator, engine) = aggregator(Arc::new(FailingProbe));
        let database = aggregator.probe_database().await;
        let report = aggregator.report_with_resources(database, quiet_resources());

        assert_eq!(report.checks.database, CheckStatus::Unhealthy);
        assert_eq!(report.status, CheckStatus::Unhealthy);
        assert_eq!(engine.retained(), 1);
        assert!(report.alerts[0].contains("database probe failed"));
    }

    #[tokio::test]
    async fn test_health_probe_timeout_is_failure_not_hang() {
        let (aggregator, engine) = aggregator(Arc::new(StalledProbe));

        let started = std::time::Instant::now();
        let database = aggregator.probe_database().await;
        assert!(started.elapsed() < Duration::from_secs(5));

        assert_eq!(database, CheckStatus::Unhealthy);
        assert_eq!(engine.retained(), 1);
        assert!(engine.unresolved_messages()[0].contains("timed out"));
    }

    #[tokio::test]
    async fn test_health_degraded_on_warning_band() {
        let (aggregator, _engine) = aggregator(Arc::new(OkProbe));
        let mut resources = quiet_resources();
        resources.cpu_percent = 85.0;

        let report = aggregator.report_with_resources(CheckStatus::Healthy, resources);
        assert_eq!(report.checks.cpu, CheckStatus::Degraded);
        assert_eq!(report.status, CheckStatus::Degraded);
    }

    #[tokio::test]
    async fn test_health_unhealthy_wins_over_degraded() {
        let (aggregator, _engine) = aggregator(Arc::new(OkProbe));
        let mut resources = quiet_resources();
        resources.cpu_percent = 85.0;
        resources.disk_percent = 99.0;

        let report = aggregator.report_with_resources(CheckStatus::Healthy, resources);
        assert_eq!(report.status, CheckStatus::Unhealthy);
    }

    #[tokio::test]
    async fn test_health_resolved_alerts_not_reported() {
        let (aggregator, engine) = aggregator(Arc::new(OkProbe));
        let alert = engine.raise(AlertSeverity::Warning, "cpu spike".to_string());
        engine.resolve(&alert.id);

        let report = aggregator.report_with_resources(CheckStatus::Healthy, quiet_resources());
        assert!(report.alerts.is_empty());
    }
}
