//! Fact-check reasoning hook backed by the context's LLM client

use std::time::Instant;

use async_trait::async_trait;
use cogos_types::{
    ExecutionContext, Hook, HookCategory, HookDescriptor, HookError, HookRequest, HookResult,
    HookStatus,
};

const FACT_CHECK_INSTRUCTIONS: &str = "You are a strict fact-checking agent. \
Given the following user query, identify claims that are likely incorrect \
or require citations. Respond in JSON with fields 'risky_claims' and 'notes'.";

#[derive(Debug)]
pub struct FactCheckHook {
    descriptor: HookDescriptor,
}

impl FactCheckHook {
    pub fn new() -> Self {
        Self {
            descriptor: HookDescriptor::new(
                "fact-check-hook",
                HookCategory::Reasoning,
                ["fact-check", "augmented-reasoning"],
            ),
        }
    }
}

impl Default for FactCheckHook {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Hook for FactCheckHook {
    fn descriptor(&self) -> &HookDescriptor {
        &self.descriptor
    }

    fn supports(&self, request: &HookRequest, _ctx: &ExecutionContext) -> bool {
        !request.prompt().trim().is_empty()
    }

    async fn execute(
        &self,
        request: &HookRequest,
        ctx: &ExecutionContext,
    ) -> Result<HookResult, HookError> {
        let start = Instant::now();
        let llm = ctx
            .llm()
            .ok_or_else(|| HookError::Unavailable("No LLM client configured for fact-check".into()))?;

        let prompt = format!(
            "{}\n\nUSER QUERY:\n{}",
            FACT_CHECK_INSTRUCTIONS,
            request.prompt()
        );
        let response = llm.complete(&prompt, None).await?;

        Ok(
            HookResult::builder(self.id(), self.category(), HookStatus::Success)
                .message("Fact check completed")
                .data(response)
                .latency(start.elapsed())
                .build(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::test_support::{ctx, request};
    use crate::llm::EchoLlmClient;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_requires_llm() {
        let err = FactCheckHook::new()
            .execute(&request("Is the moon made of cheese?"), &ctx())
            .await
            .unwrap_err();
        assert!(matches!(err, HookError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_forwards_query_to_llm() {
        let ctx = ctx().with_llm(Arc::new(EchoLlmClient));
        let result = FactCheckHook::new()
            .execute(&request("Is the moon made of cheese?"), &ctx)
            .await
            .unwrap();

        let data = result.data().unwrap().as_str().unwrap();
        assert!(data.contains("USER QUERY:\nIs the moon made of cheese?"));
        assert_eq!(result.message(), "Fact check completed");
    }
}
