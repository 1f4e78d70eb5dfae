// Prometheus metrics for store activity and the auth gate

use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

use crate::core::models::RecordKind;

/// Counters exposed on `/metrics`
///
/// Each instance owns its own `Registry`, so tests can build as many as
/// they like without clashing on the global default registry.
pub struct Metrics {
    registry: Registry,
    pub records_created: IntCounterVec,
    pub records_deleted: IntCounterVec,
    pub store_failures: IntCounterVec,
    pub auth_rejections: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let records_created = IntCounterVec::new(
            Opts::new("records_created_total", "Records created, by kind"),
            &["kind"],
        )?;
        let records_deleted = IntCounterVec::new(
            Opts::new("records_deleted_total", "Records deleted, by kind"),
            &["kind"],
        )?;
        let store_failures = IntCounterVec::new(
            Opts::new("store_failures_total", "Rejected store operations, by kind and reason"),
            &["kind", "reason"],
        )?;
        let auth_rejections = IntCounter::new(
            "auth_rejections_total",
            "Requests rejected by the bearer-token gate",
        )?;

        registry.register(Box::new(records_created.clone()))?;
        registry.register(Box::new(records_deleted.clone()))?;
        registry.register(Box::new(store_failures.clone()))?;
        registry.register(Box::new(auth_rejections.clone()))?;

        Ok(Self {
            registry,
            records_created,
            records_deleted,
            store_failures,
            auth_rejections,
        })
    }

    pub fn record_created(&self, kind: RecordKind) {
        self.records_created.with_label_values(&[kind.as_str()]).inc();
    }

    pub fn record_deleted(&self, kind: RecordKind) {
        self.records_deleted.with_label_values(&[kind.as_str()]).inc();
    }

    /// `reason` is `validation` or `not_found`
    pub fn store_failure(&self, kind: RecordKind, reason: &str) {
        self.store_failures
            .with_label_values(&[kind.as_str(), reason])
            .inc();
    }

    /// Render all metrics in the Prometheus text format
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_includes_counters() {
        let metrics = Metrics::new().unwrap();
        metrics.record_created(RecordKind::Card);
        metrics.record_created(RecordKind::Card);
        metrics.record_deleted(RecordKind::List);
        metrics.store_failure(RecordKind::List, "validation");

        let text = metrics.render().unwrap();
        assert!(text.contains(r#"records_created_total{kind="card"} 2"#));
        assert!(text.contains(r#"records_deleted_total{kind="list"} 1"#));
        assert!(text.contains(r#"store_failures_total{kind="list",reason="validation"} 1"#));
        assert!(text.contains("auth_rejections_total 0"));
    }

    #[test]
    fn test_instances_are_independent() {
        let a = Metrics::new().unwrap();
        let b = Metrics::new().unwrap();
        a.auth_rejections.inc();
        assert_eq!(a.auth_rejections.get(), 1);
        assert_eq!(b.auth_rejections.get(), 0);
    }
}
