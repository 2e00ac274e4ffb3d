//! Per-hook circuit breaker state.
//!
//! One slot per hook id, each behind its own lock, so unrelated hooks never
//! contend. Slots are created on first use and live as long as the table.
//!
//! Transitions:
//! - Closed: calls proceed; failures accumulate below the threshold
//! - Open: reached the threshold; calls are rejected until the open interval
//!   has elapsed
//! - Half-open: implicit. Once the interval has elapsed the next call is let
//!   through; success closes the circuit, failure re-opens it with a fresh
//!   `opened_at`

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

/// Externally visible phase of a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CircuitPhase {
    /// Circuit is closed, calls flow normally.
    Closed,

    /// Circuit is open, calls are short-circuited.
    Open,

    /// Open interval elapsed; the next call probes the hook.
    HalfOpen,
}

impl std::fmt::Display for CircuitPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CircuitPhase::Closed => write!(f, "closed"),
            CircuitPhase::Open => write!(f, "open"),
            CircuitPhase::HalfOpen => write!(f, "half-open"),
        }
    }
}

/// Read-only copy of a circuit for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitSnapshot {
    pub hook_id: String,
    pub phase: CircuitPhase,
    pub failure_count: u32,
    pub opened_at: Option<DateTime<Utc>>,
}

/// Whether a call may proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Admission {
    Closed,
    Probe,
    Rejected,
}

#[derive(Debug, Default)]
struct CircuitState {
    failure_count: u32,
    open: bool,
    opened_at: Option<Instant>,
    opened_at_wall: Option<DateTime<Utc>>,
}

impl CircuitState {
    fn interval_elapsed(&self, open_interval: Duration) -> bool {
        match self.opened_at {
            Some(opened_at) => Instant::now() >= opened_at + open_interval,
            None => true,
        }
    }
}

/// Circuit for a single hook id.
#[derive(Debug, Default)]
pub(crate) struct Circuit {
    state: Mutex<CircuitState>,
}

impl Circuit {
    fn lock(&self) -> MutexGuard<'_, CircuitState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn admit(&self, open_interval: Duration) -> Admission {
        let state = self.lock();
        if !state.open {
            Admission::Closed
        } else if state.interval_elapsed(open_interval) {
            Admission::Probe
        } else {
            Admission::Rejected
        }
    }

    /// Reset to closed. Returns true if the circuit was open.
    pub(crate) fn on_success(&self) -> bool {
        let mut state = self.lock();
        let was_open = state.open;
        *state = CircuitState::default();
        was_open
    }

    /// Count a failure, opening (or re-opening) the circuit at the
    /// threshold. Returns the new count and whether it opened now.
    pub(crate) fn on_failure(&self, failure_threshold: u32) -> (u32, bool) {
        let mut state = self.lock();
        state.failure_count = state.failure_count.saturating_add(1);

        if state.failure_count >= failure_threshold {
            state.open = true;
            state.opened_at = Some(Instant::now());
            state.opened_at_wall = Some(Utc::now());
            (state.failure_count, true)
        } else {
            (state.failure_count, false)
        }
    }

    fn snapshot(&self, hook_id: &str, open_interval: Duration) -> CircuitSnapshot {
        let state = self.lock();
        let phase = if !state.open {
            CircuitPhase::Closed
        } else if state.interval_elapsed(open_interval) {
            CircuitPhase::HalfOpen
        } else {
            CircuitPhase::Open
        };

        CircuitSnapshot {
            hook_id: hook_id.to_string(),
            phase,
            failure_count: state.failure_count,
            opened_at: state.opened_at_wall,
        }
    }
}

/// Table of circuits keyed by hook id.
#[derive(Debug, Default)]
pub(crate) struct CircuitTable {
    circuits: DashMap<String, Arc<Circuit>>,
}

impl CircuitTable {
    /// Get or lazily create the circuit for a hook.
    pub(crate) fn circuit(&self, hook_id: &str) -> Arc<Circuit> {
        if let Some(existing) = self.circuits.get(hook_id) {
            return Arc::clone(existing.value());
        }
        self.circuits
            .entry(hook_id.to_string())
            .or_default()
            .clone()
    }

    pub(crate) fn snapshot(&self, hook_id: &str, open_interval: Duration) -> Option<CircuitSnapshot> {
        self.circuits
            .get(hook_id)
            .map(|c| c.snapshot(hook_id, open_interval))
    }

    pub(crate) fn reset(&self, hook_id: &str) -> bool {
        match self.circuits.get(hook_id) {
            Some(circuit) => circuit.on_success(),
            None => false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.circuits.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_secs(10);

    #[tokio::test(start_paused = true)]
    async fn test_opens_at_threshold() {
        let circuit = Circuit::default();

        assert_eq!(circuit.on_failure(3), (1, false));
        assert_eq!(circuit.on_failure(3), (2, false));
        assert_eq!(circuit.admit(INTERVAL), Admission::Closed);

        assert_eq!(circuit.on_failure(3), (3, true));
        assert_eq!(circuit.admit(INTERVAL), Admission::Rejected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_resets_count() {
        let circuit = Circuit::default();
        circuit.on_failure(3);
        circuit.on_failure(3);

        assert!(!circuit.on_success());
        assert_eq!(circuit.on_failure(3), (1, false));
    }

    #[tokio::test(start_paused = true)]
    async fn test_probe_after_interval() {
        let circuit = Circuit::default();
        circuit.on_failure(1);

        tokio::time::advance(INTERVAL - Duration::from_millis(1)).await;
        assert_eq!(circuit.admit(INTERVAL), Admission::Rejected);

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(circuit.admit(INTERVAL), Admission::Probe);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_probe_reopens_with_fresh_timestamp() {
        let circuit = Circuit::default();
        circuit.on_failure(1);

        tokio::time::advance(INTERVAL).await;
        assert_eq!(circuit.admit(INTERVAL), Admission::Probe);

        let (_, opened) = circuit.on_failure(1);
        assert!(opened);
        assert_eq!(circuit.admit(INTERVAL), Admission::Rejected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_snapshot_phases() {
        let table = CircuitTable::default();
        assert!(table.snapshot("h", INTERVAL).is_none());

        let circuit = table.circuit("h");
        assert_eq!(table.snapshot("h", INTERVAL).unwrap().phase, CircuitPhase::Closed);

        circuit.on_failure(1);
        let snapshot = table.snapshot("h", INTERVAL).unwrap();
        assert_eq!(snapshot.phase, CircuitPhase::Open);
        assert_eq!(snapshot.failure_count, 1);
        assert!(snapshot.opened_at.is_some());

        tokio::time::advance(INTERVAL).await;
        assert_eq!(table.snapshot("h", INTERVAL).unwrap().phase, CircuitPhase::HalfOpen);

        assert!(table.reset("h"));
        assert_eq!(table.snapshot("h", INTERVAL).unwrap().phase, CircuitPhase::Closed);
    }

    #[test]
    fn test_table_shares_circuit_per_id() {
        let table = CircuitTable::default();
        let a = table.circuit("a");
        let again = table.circuit("a");
        table.circuit("b");

        assert!(Arc::ptr_eq(&a, &again));
        assert_eq!(table.len(), 2);
    }
}
