//! Metrics and audit sinks.
//!
//! Both sinks are optional collaborators. The executor emits metrics when a
//! sink is configured and does nothing otherwise; audit is only reachable by
//! hooks through the execution context.

use std::collections::HashMap;
use std::time::Duration;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

/// Receives per-hook execution metrics.
pub trait MetricsSink: Send + Sync {
    fn record_success(&self, hook_id: &str, latency: Duration);

    fn record_failure(&self, hook_id: &str, latency: Duration, reason: &str);

    fn record_circuit_open(&self, hook_id: &str);
}

/// Receives audit events emitted by hooks.
pub trait AuditSink: Send + Sync {
    fn log_event(&self, event_type: &str, details: &HashMap<String, Value>);
}

/// Metrics sink that emits structured tracing events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingMetricsSink;

impl MetricsSink for TracingMetricsSink {
    fn record_success(&self, hook_id: &str, latency: Duration) {
        info!(
            target: "cogos::metrics",
            hook_id,
            latency_ms = latency.as_millis() as u64,
            "hook succeeded"
        );
    }

    fn record_failure(&self, hook_id: &str, latency: Duration, reason: &str) {
        warn!(
            target: "cogos::metrics",
            hook_id,
            latency_ms = latency.as_millis() as u64,
            reason,
            "hook failed"
        );
    }

    fn record_circuit_open(&self, hook_id: &str) {
        warn!(target: "cogos::metrics", hook_id, "hook circuit open");
    }
}

/// Audit sink that emits structured tracing events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn log_event(&self, event_type: &str, details: &HashMap<String, Value>) {
        info!(target: "cogos::audit", event_type, details = ?details, "audit event");
    }
}

/// Counters collected for one hook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookMetrics {
    pub successes: u64,
    pub failures: u64,
    pub circuit_opens: u64,
    pub total_latency: Duration,
    pub last_failure: Option<String>,
}

/// In-process metrics sink keeping per-hook counters.
#[derive(Debug, Default)]
pub struct InMemoryMetricsSink {
    hooks: DashMap<String, HookMetrics>,
}

impl InMemoryMetricsSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters for one hook, if it has reported anything.
    pub fn get(&self, hook_id: &str) -> Option<HookMetrics> {
        self.hooks.get(hook_id).map(|m| m.clone())
    }

    /// Copy of every hook's counters.
    pub fn snapshot(&self) -> HashMap<String, HookMetrics> {
        self.hooks
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}

impl MetricsSink for InMemoryMetricsSink {
    fn record_success(&self, hook_id: &str, latency: Duration) {
        let mut metrics = self.hooks.entry(hook_id.to_string()).or_default();
        metrics.successes += 1;
        metrics.total_latency += latency;
    }

    fn record_failure(&self, hook_id: &str, latency: Duration, reason: &str) {
        let mut metrics = self.hooks.entry(hook_id.to_string()).or_default();
        metrics.failures += 1;
        metrics.total_latency += latency;
        metrics.last_failure = Some(reason.to_string());
    }

    fn record_circuit_open(&self, hook_id: &str) {
        self.hooks.entry(hook_id.to_string()).or_default().circuit_opens += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_sink_counts() {
        let sink = InMemoryMetricsSink::new();

        sink.record_success("a", Duration::from_millis(10));
        sink.record_failure("a", Duration::from_millis(5), "boom");
        sink.record_circuit_open("a");
        sink.record_success("b", Duration::from_millis(1));

        let a = sink.get("a").unwrap();
        assert_eq!(a.successes, 1);
        assert_eq!(a.failures, 1);
        assert_eq!(a.circuit_opens, 1);
        assert_eq!(a.total_latency, Duration::from_millis(15));
        assert_eq!(a.last_failure.as_deref(), Some("boom"));

        assert_eq!(sink.snapshot().len(), 2);
        assert!(sink.get("missing").is_none());
    }
}
