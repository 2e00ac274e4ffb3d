//! Policy gate trait and composition
//!
//! A gate inspects one hook for one request and decides whether it may run.
//! Gates can be chained with [`ComposedPolicyGate`]; the first denial wins.

use std::sync::Arc;

use cogos_types::{ExecutionContext, Hook, HookRequest};

use crate::decision::PolicyDecision;
use crate::error::Result;

/// Admission check for a hook.
///
/// Implementations must be pure functions of their inputs.
pub trait PolicyGate: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this gate
    fn id(&self) -> &str;

    /// Evaluate whether `hook` may run for `request`
    fn evaluate(
        &self,
        hook: &dyn Hook,
        request: &HookRequest,
        ctx: &ExecutionContext,
    ) -> Result<PolicyDecision>;

    /// Priority of this gate (higher = evaluated first)
    fn priority(&self) -> u32 {
        100
    }
}

/// Chain of gates evaluated in priority order
#[derive(Debug, Default)]
pub struct ComposedPolicyGate {
    gates: Vec<Arc<dyn PolicyGate>>,
}

impl ComposedPolicyGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a gate, keeping the chain sorted by priority
    pub fn add_gate(mut self, gate: Arc<dyn PolicyGate>) -> Self {
        self.gates.push(gate);
        // Stable sort keeps insertion order among equal priorities
        self.gates.sort_by(|a, b| b.priority().cmp(&a.priority()));
        self
    }

    pub fn gate_ids(&self) -> Vec<&str> {
        self.gates.iter().map(|g| g.id()).collect()
    }
}

impl PolicyGate for ComposedPolicyGate {
    fn id(&self) -> &str {
        "composed"
    }

    fn evaluate(
        &self,
        hook: &dyn Hook,
        request: &HookRequest,
        ctx: &ExecutionContext,
    ) -> Result<PolicyDecision> {
        for gate in &self.gates {
            let decision = gate.evaluate(hook, request, ctx)?;
            if !decision.is_allowed() {
                return Ok(decision);
            }
        }
        Ok(PolicyDecision::allow())
    }
}
