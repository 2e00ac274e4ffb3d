//! Resilient hook executor.
//!
//! Wraps one hook invocation with bounded retries, linear capped backoff, a
//! per-hook circuit breaker and metrics. Whatever the hook does, the caller
//! receives a [`HookResult`]; errors and panics never escape.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use cogos_types::{
    ExecutionContext, Hook, HookError, HookRequest, HookResult, HookStatus, MetricsSink,
};
use futures::FutureExt;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::circuit::{Admission, CircuitSnapshot, CircuitTable};
use crate::config::ExecutorConfig;
use crate::error::ResilienceResult;

/// Why a single invocation did not produce a result.
enum InvocationFailure {
    /// Recoverable error reported by the hook.
    Reported(HookError),
    /// The hook panicked.
    Panicked(String),
}

/// Executes hooks under retry and circuit breaker control.
///
/// Circuit state is shared by every request that runs the same hook id
/// through this executor.
pub struct ResilientExecutor {
    config: ExecutorConfig,
    circuits: CircuitTable,
    metrics: Option<Arc<dyn MetricsSink>>,
}

impl ResilientExecutor {
    /// Create an executor, validating the configuration up front.
    pub fn new(config: ExecutorConfig) -> ResilienceResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            circuits: CircuitTable::default(),
            metrics: None,
        })
    }

    /// Report metrics to `sink` instead of the per-request context sink.
    pub fn with_metrics(mut self, sink: Arc<dyn MetricsSink>) -> Self {
        self.metrics = Some(sink);
        self
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Read-only view of a hook's circuit, if the hook has ever run.
    pub fn circuit_snapshot(&self, hook_id: &str) -> Option<CircuitSnapshot> {
        self.circuits.snapshot(hook_id, self.config.open_interval())
    }

    /// Force a hook's circuit closed. Returns true if it was open.
    pub fn reset_circuit(&self, hook_id: &str) -> bool {
        let was_open = self.circuits.reset(hook_id);
        if was_open {
            info!(hook_id, "Circuit manually reset");
        }
        was_open
    }

    /// Number of hook ids with circuit state.
    pub fn tracked_hooks(&self) -> usize {
        self.circuits.len()
    }

    /// Run `hook` for `request`.
    #[instrument(
        skip_all,
        fields(hook_id = %hook.id(), request_id = %request.request_id())
    )]
    pub async fn execute(
        &self,
        hook: &dyn Hook,
        request: &HookRequest,
        ctx: &ExecutionContext,
    ) -> HookResult {
        let hook_id = hook.id();
        let metrics = self.metrics.as_ref().or(ctx.metrics());
        let circuit = self.circuits.circuit(hook_id);

        match circuit.admit(self.config.open_interval()) {
            Admission::Rejected => {
                debug!("Circuit open, skipping hook");
                if let Some(sink) = metrics {
                    sink.record_circuit_open(hook_id);
                }
                return self.terminal(
                    hook,
                    HookStatus::CircuitOpen,
                    "Circuit open for hook; skipping execution",
                    0,
                    Duration::ZERO,
                );
            }
            Admission::Probe => {
                info!("Open interval elapsed, probing hook");
            }
            Admission::Closed => {}
        }

        let start = Instant::now();
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;

            let failure = match self.invoke(hook, request, ctx).await {
                Ok(result) => {
                    let latency = start.elapsed();
                    if circuit.on_success() {
                        info!(attempt, "Circuit closed after successful probe");
                    }
                    if let Some(sink) = metrics {
                        sink.record_success(hook_id, latency);
                    }
                    return result
                        .into_builder()
                        .latency_if_unset(latency)
                        .diagnostic("attempts", attempt)
                        .build();
                }
                Err(failure) => failure,
            };

            let latency = start.elapsed();
            let (failure_count, opened) = circuit.on_failure(self.config.failure_threshold);

            let reason = match &failure {
                InvocationFailure::Reported(err) => err.to_string(),
                InvocationFailure::Panicked(msg) => format!("hook panicked: {}", msg),
            };

            if let Some(sink) = metrics {
                sink.record_failure(hook_id, latency, &reason);
            }
            if opened {
                warn!(failure_count, reason = %reason, "Circuit opened for hook");
            }

            if let InvocationFailure::Panicked(_) = failure {
                warn!(attempt, reason = %reason, "Hook panicked, not retrying");
                return self.terminal(
                    hook,
                    HookStatus::Failed,
                    format!("Hook failed after {} attempts: {}", attempt, reason),
                    attempt,
                    latency,
                );
            }

            if attempt > self.config.max_retries {
                warn!(attempt, reason = %reason, "Hook failed, retries exhausted");
                return self.terminal(
                    hook,
                    HookStatus::Failed,
                    format!("Hook failed after {} attempts: {}", attempt, reason),
                    attempt,
                    latency,
                );
            }

            if opened {
                return self.terminal(
                    hook,
                    HookStatus::CircuitOpen,
                    format!("Hook circuit opened after repeated failures: {}", reason),
                    attempt,
                    latency,
                );
            }

            let delay = self.config.backoff_delay(attempt);
            debug!(
                attempt,
                delay_ms = delay.as_millis() as u64,
                reason = %reason,
                "Hook failed, backing off before retry"
            );

            tokio::select! {
                biased;
                _ = ctx.cancellation().cancelled() => {
                    warn!(attempt, "Backoff interrupted, abandoning retries");
                    return self.terminal(
                        hook,
                        HookStatus::Failed,
                        "Hook execution interrupted during backoff",
                        attempt,
                        start.elapsed(),
                    );
                }
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }

    /// One guarded call into the hook body.
    async fn invoke(
        &self,
        hook: &dyn Hook,
        request: &HookRequest,
        ctx: &ExecutionContext,
    ) -> Result<HookResult, InvocationFailure> {
        let call = AssertUnwindSafe(hook.execute(request, ctx)).catch_unwind();

        let outcome = match self.config.hook_timeout() {
            Some(timeout) => match tokio::time::timeout(timeout, call).await {
                Ok(outcome) => outcome,
                Err(_) => return Err(InvocationFailure::Reported(HookError::Timeout { timeout })),
            },
            None => call.await,
        };

        match outcome {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(err)) => Err(InvocationFailure::Reported(err)),
            Err(payload) => Err(InvocationFailure::Panicked(panic_message(payload.as_ref()))),
        }
    }

    fn terminal(
        &self,
        hook: &dyn Hook,
        status: HookStatus,
        message: impl Into<String>,
        attempts: u32,
        latency: Duration,
    ) -> HookResult {
        HookResult::builder(hook.id(), hook.category(), status)
            .message(message)
            .latency(latency)
            .diagnostic("attempts", attempts)
            .build()
    }
}

impl std::fmt::Debug for ResilientExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResilientExecutor")
            .field("config", &self.config)
            .field("circuits", &self.circuits.len())
            .field("has_metrics", &self.metrics.is_some())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
