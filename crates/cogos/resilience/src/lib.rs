//! # Cogos Resilience - Resilient Hook Execution
//!
//! Runs a single hook invocation under:
//!
//! - **Bounded retries** with linear, capped backoff
//! - **Per-hook circuit breaker** shared by every request using the hook
//! - **Metrics** via an optional [`cogos_types::MetricsSink`]
//! - **Fault containment**: hook errors, deadlines and panics all become
//!   a [`cogos_types::HookResult`]
//!
//! ## Example
//!
//! ```rust,no_run
//! use cogos_resilience::{ExecutorConfig, ResilientExecutor};
//! use std::time::Duration;
//!
//! let executor = ResilientExecutor::new(
//!     ExecutorConfig::default()
//!         .with_max_retries(2)
//!         .with_failure_threshold(3)
//!         .with_open_interval(Duration::from_secs(10)),
//! )
//! .expect("valid config");
//! ```

mod circuit;
pub mod config;
pub mod error;
mod executor;

pub use circuit::{CircuitPhase, CircuitSnapshot};
pub use config::ExecutorConfig;
pub use error::{ResilienceError, ResilienceResult};
pub use executor::ResilientExecutor;
