//! # Cogos Policy - Hook Admission Control
//!
//! Decides, per hook and per request, whether the hook may run for the
//! caller's security posture.
//!
//! ## Key Components
//!
//! - [`PolicyGate`]: trait for a single admission rule set
//! - [`ComposedPolicyGate`]: priority-ordered chain, first denial wins
//! - [`BaselineHookPolicy`]: the minimum rules every deployment enforces
//! - [`PolicyEngine`]: infallible entry point used by the orchestrator
//!
//! Tenant throttling, monetization gating and regional routing are expected
//! to arrive as additional gates added with [`PolicyEngine::with_gate`].

pub mod decision;
pub mod engine;
pub mod error;
pub mod gate;
pub mod policies;

pub use decision::PolicyDecision;
pub use engine::PolicyEngine;
pub use error::{PolicyError, Result};
pub use gate::{ComposedPolicyGate, PolicyGate};
pub use policies::{BaselineHookPolicy, ENTERPRISE_SCOPE, SKIP_SAFEGUARDS_SCOPE};
