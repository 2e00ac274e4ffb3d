//! Pattern-based content safeguard

use std::collections::HashMap;
use std::time::Instant;

use async_trait::async_trait;
use cogos_types::{
    ExecutionContext, Hook, HookCategory, HookDescriptor, HookError, HookRequest, HookResult,
    HookStatus,
};
use regex::Regex;
use serde_json::{json, Value};

const BANNED_PATTERNS: [&str; 2] = [r"(?i)\bkill\b", r"(?i)\bgenocide\b"];

/// Flags prompts matching a small banned-word list. Never blocks.
#[derive(Debug)]
pub struct BiasFilterHook {
    descriptor: HookDescriptor,
    patterns: Vec<Regex>,
}

impl BiasFilterHook {
    pub fn new() -> Result<Self, regex::Error> {
        let patterns = BANNED_PATTERNS
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            descriptor: HookDescriptor::new(
                "bias-filter-hook",
                HookCategory::Safeguard,
                ["bias-filter", "safety"],
            ),
            patterns,
        })
    }
}

#[async_trait]
impl Hook for BiasFilterHook {
    fn descriptor(&self) -> &HookDescriptor {
        &self.descriptor
    }

    fn supports(&self, _request: &HookRequest, _ctx: &ExecutionContext) -> bool {
        true
    }

    async fn execute(
        &self,
        request: &HookRequest,
        ctx: &ExecutionContext,
    ) -> Result<HookResult, HookError> {
        let start = Instant::now();

        let flagged: Vec<&str> = self
            .patterns
            .iter()
            .filter(|p| p.is_match(request.prompt()))
            .map(|p| p.as_str())
            .collect();
        let safe = flagged.is_empty();

        if !safe {
            if let Some(audit) = ctx.audit() {
                let details = HashMap::from([
                    ("requestId".to_string(), Value::from(request.request_id())),
                    ("flaggedPatterns".to_string(), json!(flagged)),
                ]);
                audit.log_event("bias_filter.flagged", &details);
            }
        }

        let message = if safe {
            "No banned patterns detected"
        } else {
            "Potentially unsafe content detected"
        };

        Ok(
            HookResult::builder(self.id(), self.category(), HookStatus::Success)
                .message(message)
                .data(json!({ "flaggedPatterns": flagged, "safe": safe }))
                .latency(start.elapsed())
                .build(),
        )
    }
}
