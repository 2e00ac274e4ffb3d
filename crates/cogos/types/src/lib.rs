//! # Cogos Types - Shared Data Model for Cognitive Hooks
//!
//! Value types, the hook capability contract and the collaborator traits
//! used by every other crate in the hook core.
//!
//! ## Key Components
//!
//! - [`Hook`] / [`HookDescriptor`]: the capability contract hooks implement
//! - [`HookRequest`], [`HookResult`], [`HookResponse`]: pipeline values
//! - [`ExecutionContext`] and [`SecurityPosture`]: per-request collaborators
//! - [`SynthesisClient`], [`MetricsSink`], [`AuditSink`]: external interfaces
//!
//! Requests and results are immutable once built. Hooks receive shared
//! references only.

pub mod category;
pub mod context;
pub mod error;
pub mod hook;
pub mod request;
pub mod result;
pub mod security;
pub mod synthesis;
pub mod telemetry;

pub use category::{HookCategory, HookStatus};
pub use context::{ExecutionContext, ResourceHandle};
pub use error::{ContextError, HookError, TypesResult, ValidationError};
pub use hook::{Hook, HookDescriptor};
pub use request::HookRequest;
pub use result::{HookResponse, HookResult, HookResultBuilder};
pub use security::SecurityPosture;
pub use synthesis::SynthesisClient;
pub use telemetry::{
    AuditSink, HookMetrics, InMemoryMetricsSink, MetricsSink, TracingAuditSink,
    TracingMetricsSink,
};
