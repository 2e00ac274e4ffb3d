//! Policy engine
//!
//! The engine is the single entry point the orchestrator calls. It runs the
//! configured gate chain and guarantees a decision: gate errors and panics
//! both become denials carrying an explanatory reason.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use cogos_types::{ExecutionContext, Hook, HookRequest};
use tracing::{debug, warn};

use crate::decision::PolicyDecision;
use crate::gate::{ComposedPolicyGate, PolicyGate};
use crate::policies::BaselineHookPolicy;

const ENGINE_POLICY_ID: &str = "policy-engine";

/// Stateless admission check over a chain of gates
#[derive(Debug)]
pub struct PolicyEngine {
    gates: ComposedPolicyGate,
    emit_audit_events: bool,
}

impl PolicyEngine {
    /// Engine enforcing only the baseline rules
    pub fn new() -> Self {
        Self::with_gates(vec![Arc::new(BaselineHookPolicy)])
    }

    /// Engine over a custom gate list
    pub fn with_gates(gates: Vec<Arc<dyn PolicyGate>>) -> Self {
        let gates = gates
            .into_iter()
            .fold(ComposedPolicyGate::new(), |composed, gate| composed.add_gate(gate));

        Self {
            gates,
            emit_audit_events: true,
        }
    }

    /// Add an extension gate (tenant throttling, regional routing, ...)
    pub fn with_gate(mut self, gate: Arc<dyn PolicyGate>) -> Self {
        self.gates = self.gates.add_gate(gate);
        self
    }

    /// Set whether to log each decision
    pub fn with_emit_audit_events(mut self, emit: bool) -> Self {
        self.emit_audit_events = emit;
        self
    }

    pub fn gate_ids(&self) -> Vec<&str> {
        self.gates.gate_ids()
    }

    /// Decide whether `hook` may run. Never fails.
    pub fn evaluate(
        &self,
        hook: &dyn Hook,
        request: &HookRequest,
        ctx: &ExecutionContext,
    ) -> PolicyDecision {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.gates.evaluate(hook, request, ctx)
        }));

        let decision = match outcome {
            Ok(Ok(decision)) => decision,
            Ok(Err(err)) => PolicyDecision::deny(err.to_string(), ENGINE_POLICY_ID),
            Err(_) => PolicyDecision::deny(
                "policy evaluation failed: gate panicked",
                ENGINE_POLICY_ID,
            ),
        };

        if self.emit_audit_events {
            self.log_decision(hook, request, &decision);
        }

        decision
    }

    fn log_decision(&self, hook: &dyn Hook, request: &HookRequest, decision: &PolicyDecision) {
        if decision.is_allowed() {
            debug!(
                request_id = %request.request_id(),
                hook_id = %hook.id(),
                category = %hook.category(),
                "Policy allowed hook"
            );
        } else {
            warn!(
                request_id = %request.request_id(),
                hook_id = %hook.id(),
                category = %hook.category(),
                policy = decision.policy_id().unwrap_or("unknown"),
                reason = %decision.reason(),
                "Policy denied hook"
            );
        }
    }
}

impl Default for PolicyEngine {
    fn default() -> Self {
        Self::new()
    }
}
