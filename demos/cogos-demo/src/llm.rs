//! Echo synthesis client

use std::collections::HashMap;

use async_trait::async_trait;
use cogos_types::{HookError, SynthesisClient};
use serde_json::Value;

/// Echoes the prompt back. Stands in for a real model endpoint.
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoLlmClient;

#[async_trait]
impl SynthesisClient for EchoLlmClient {
    async fn complete(
        &self,
        prompt: &str,
        context: Option<&HashMap<String, Value>>,
    ) -> Result<String, HookError> {
        let mut out = format!("ECHO-LLM OUTPUT:\nPrompt:\n{}\n", prompt);
        if let Some(context) = context.filter(|c| !c.is_empty()) {
            out.push_str(&format!("Context:\n{:?}\n", context));
        }
        Ok(out)
    }
}
