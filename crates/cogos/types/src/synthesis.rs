//! Synthesis collaborator contract.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

use crate::error::HookError;

/// Language-model style client used for the final synthesis step and by
/// hooks that need completions.
///
/// The core treats it as plain text in, plain text out.
#[async_trait]
pub trait SynthesisClient: Send + Sync {
    async fn complete(
        &self,
        prompt: &str,
        context: Option<&HashMap<String, Value>>,
    ) -> Result<String, HookError>;
}
