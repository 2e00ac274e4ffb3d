//! # Cogos Orchestrator - Hook Pipeline
//!
//! Sequences hooks into two phases and hands the aggregate to synthesis.
//!
//! ## Pipeline
//!
//! 1. **Safeguards**: every safeguard hook, in registry order
//! 2. **Capabilities**: reasoning, enterprise, then multimodal by default
//! 3. **Synthesis**: prompt plus one line per hook result, sent in a
//!    single call to the [`cogos_types::SynthesisClient`]
//!
//! Denied or unsupported hooks are recorded as skipped. Synthesis failure
//! yields a degraded `final_content`; the full result trace is always
//! returned.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use cogos_orchestrator::HookOrchestrator;
//! use cogos_policy::PolicyEngine;
//! use cogos_registry::HookRegistry;
//! use cogos_resilience::{ExecutorConfig, ResilientExecutor};
//! use cogos_types::{ExecutionContext, HookRequest, SecurityPosture, SynthesisClient};
//!
//! # async fn example(llm: Arc<dyn SynthesisClient>) {
//! let orchestrator = HookOrchestrator::new(
//!     Arc::new(HookRegistry::new()),
//!     Arc::new(ResilientExecutor::new(ExecutorConfig::default()).unwrap()),
//!     Arc::new(PolicyEngine::new()),
//!     llm,
//! );
//!
//! let request = HookRequest::new("req-1", "alice", "Summarize this").unwrap();
//! let ctx = ExecutionContext::new(SecurityPosture::anonymous("alice"));
//! let response = orchestrator.handle(&request, &ctx).await;
//! println!("{}", response.final_content());
//! # }
//! ```

pub mod config;
pub mod error;
mod orchestrator;

pub use config::OrchestratorConfig;
pub use error::{OrchestratorError, Result};
pub use orchestrator::{build_synthesis_prompt, HookOrchestrator};
