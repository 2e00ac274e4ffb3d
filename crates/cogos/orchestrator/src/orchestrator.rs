//! Two-phase hook pipeline.
//!
//! Phase 1 runs every safeguard hook. Phase 2 runs the capability categories
//! in configured order. Each hook passes through policy, then its own
//! `supports` check, then the resilient executor. The collected results are
//! folded into one synthesis prompt.
//!
//! A failing safeguard does not stop the pipeline. Callers that need
//! fail-closed safeguards must express that as a policy gate.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use cogos_policy::PolicyEngine;
use cogos_registry::HookRegistry;
use cogos_resilience::ResilientExecutor;
use cogos_types::{
    ExecutionContext, Hook, HookCategory, HookRequest, HookResponse, HookResult, HookStatus,
    SynthesisClient,
};
use futures::FutureExt;
use tracing::{debug, info, instrument, warn};

use crate::config::OrchestratorConfig;
use crate::error::Result;

const UNSUPPORTED_MESSAGE: &str = "Hook does not support this request";
const VANISHED_MESSAGE: &str = "Hook not found: unregistered before execution";

/// Routes a request through the registered hooks and the synthesis step.
pub struct HookOrchestrator {
    registry: Arc<HookRegistry>,
    executor: Arc<ResilientExecutor>,
    policy: Arc<PolicyEngine>,
    synthesis: Arc<dyn SynthesisClient>,
    config: OrchestratorConfig,
}

impl HookOrchestrator {
    pub fn new(
        registry: Arc<HookRegistry>,
        executor: Arc<ResilientExecutor>,
        policy: Arc<PolicyEngine>,
        synthesis: Arc<dyn SynthesisClient>,
    ) -> Self {
        Self {
            registry,
            executor,
            policy,
            synthesis,
            config: OrchestratorConfig::default(),
        }
    }

    /// Replace the pipeline configuration after validating it.
    pub fn with_config(mut self, config: OrchestratorConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<HookRegistry> {
        &self.registry
    }

    pub fn executor(&self) -> &Arc<ResilientExecutor> {
        &self.executor
    }

    /// Run the full pipeline for one request. Always returns a response.
    #[instrument(skip_all, fields(request_id = %request.request_id()))]
    pub async fn handle(&self, request: &HookRequest, ctx: &ExecutionContext) -> HookResponse {
        let mut results = Vec::new();

        for hook in self.registry.list_by_category(HookCategory::Safeguard) {
            let result = self.run_hook(hook.as_ref(), request, ctx).await;
            if matches!(result.status(), HookStatus::Failed | HookStatus::CircuitOpen) {
                warn!(
                    hook_id = %result.hook_id(),
                    status = %result.status(),
                    "Safeguard hook did not complete, continuing pipeline"
                );
            }
            results.push(result);
        }

        for category in &self.config.capability_phases {
            for hook in self.registry.list_by_category(*category) {
                results.push(self.run_hook(hook.as_ref(), request, ctx).await);
            }
        }

        let final_content = self.synthesize(request, &results).await;

        info!(
            hooks = results.len(),
            succeeded = results.iter().filter(|r| r.is_success()).count(),
            "Request orchestrated"
        );

        HookResponse::new(request.request_id(), final_content, results)
    }

    /// Policy check, applicability check, then guarded execution.
    async fn run_hook(
        &self,
        hook: &dyn Hook,
        request: &HookRequest,
        ctx: &ExecutionContext,
    ) -> HookResult {
        let decision = self.policy.evaluate(hook, request, ctx);
        if !decision.is_allowed() {
            return skipped(hook, format!("Denied by policy: {}", decision.reason()));
        }

        let supported = panic::catch_unwind(AssertUnwindSafe(|| hook.supports(request, ctx)))
            .unwrap_or_else(|_| {
                warn!(hook_id = %hook.id(), "Hook supports check panicked, treating as unsupported");
                false
            });
        if !supported {
            debug!(hook_id = %hook.id(), "Hook does not support request");
            return skipped(hook, UNSUPPORTED_MESSAGE);
        }

        if !self.registry.contains(hook.id()) {
            debug!(hook_id = %hook.id(), "Hook unregistered mid-pass");
            return skipped(hook, VANISHED_MESSAGE);
        }

        self.executor.execute(hook, request, ctx).await
    }

    /// Ask the synthesis client for the final text, degrading on failure.
    async fn synthesize(&self, request: &HookRequest, results: &[HookResult]) -> String {
        let prompt = build_synthesis_prompt(
            request.prompt(),
            &self.config.synthesis_preamble,
            results,
        );

        let outcome = AssertUnwindSafe(self.synthesis.complete(&prompt, None))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(content)) => content,
            Ok(Err(err)) => {
                warn!(error = %err, "Synthesis failed, returning degraded content");
                format!("Failed to synthesize final content via LLM: {}", err)
            }
            Err(_) => {
                warn!("Synthesis client panicked, returning degraded content");
                "Failed to synthesize final content via LLM: synthesis client panicked"
                    .to_string()
            }
        }
    }
}

impl std::fmt::Debug for HookOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookOrchestrator")
            .field("registry", &self.registry)
            .field("executor", &self.executor)
            .field("policy", &self.policy)
            .field("config", &self.config)
            .finish()
    }
}

/// Original prompt, a blank line, the preamble, then one line per result.
pub fn build_synthesis_prompt(prompt: &str, preamble: &str, results: &[HookResult]) -> String {
    let mut text = String::with_capacity(prompt.len() + preamble.len() + results.len() * 64);
    text.push_str(prompt);
    text.push_str("\n\n");
    text.push_str(preamble);
    text.push('\n');

    for result in results {
        text.push_str(&format!(
            "- Hook {} [{}]: {}\n",
            result.hook_id(),
            result.status(),
            result.message()
        ));
    }
    text
}

fn skipped(hook: &dyn Hook, message: impl Into<String>) -> HookResult {
    HookResult::builder(hook.id(), hook.category(), HookStatus::Skipped)
        .message(message)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesis_prompt_format() {
        let results = vec![
            HookResult::builder("bias-filter", HookCategory::Safeguard, HookStatus::Success)
                .message("No banned patterns detected")
                .build(),
            HookResult::builder("db", HookCategory::Enterprise, HookStatus::Skipped)
                .message("Denied by policy: Missing scope 'enterprise:hooks'")
                .build(),
        ];

        let text = build_synthesis_prompt("What is 2+2?", "Use these:", &results);

        assert_eq!(
            text,
            "What is 2+2?\n\nUse these:\n\
             - Hook bias-filter [SUCCESS]: No banned patterns detected\n\
             - Hook db [SKIPPED]: Denied by policy: Missing scope 'enterprise:hooks'\n"
        );
    }

    #[test]
    fn test_synthesis_prompt_without_results() {
        let text = build_synthesis_prompt("hi", "Use these:", &[]);
        assert_eq!(text, "hi\n\nUse these:\n");
    }
}
