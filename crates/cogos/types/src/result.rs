//! Per-hook results and the aggregate response.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::category::{HookCategory, HookStatus};

/// Outcome of one hook for one request.
///
/// Built through [`HookResult::builder`]; fields are read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookResult {
    hook_id: String,
    category: HookCategory,
    status: HookStatus,
    message: String,
    data: Option<Value>,
    latency: Duration,
    diagnostics: HashMap<String, Value>,
}

impl HookResult {
    /// Start building a result. Id, category and status are mandatory.
    pub fn builder(
        hook_id: impl Into<String>,
        category: HookCategory,
        status: HookStatus,
    ) -> HookResultBuilder {
        HookResultBuilder {
            hook_id: hook_id.into(),
            category,
            status,
            message: String::new(),
            data: None,
            latency: Duration::ZERO,
            diagnostics: HashMap::new(),
        }
    }

    pub fn hook_id(&self) -> &str {
        &self.hook_id
    }

    pub fn category(&self) -> HookCategory {
        self.category
    }

    pub fn status(&self) -> HookStatus {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    pub fn diagnostics(&self) -> &HashMap<String, Value> {
        &self.diagnostics
    }

    pub fn is_success(&self) -> bool {
        self.status == HookStatus::Success
    }

    /// Reopen this result as a builder, keeping every field.
    pub fn into_builder(self) -> HookResultBuilder {
        HookResultBuilder {
            hook_id: self.hook_id,
            category: self.category,
            status: self.status,
            message: self.message,
            data: self.data,
            latency: self.latency,
            diagnostics: self.diagnostics,
        }
    }
}

/// Builder for [`HookResult`].
#[derive(Debug, Clone)]
pub struct HookResultBuilder {
    hook_id: String,
    category: HookCategory,
    status: HookStatus,
    message: String,
    data: Option<Value>,
    latency: Duration,
    diagnostics: HashMap<String, Value>,
}

impl HookResultBuilder {
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn data(mut self, data: impl Into<Value>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Set latency only if none was recorded yet.
    pub fn latency_if_unset(mut self, latency: Duration) -> Self {
        if self.latency.is_zero() {
            self.latency = latency;
        }
        self
    }

    pub fn diagnostic(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.diagnostics.insert(key.into(), value.into());
        self
    }

    pub fn diagnostics(mut self, diagnostics: HashMap<String, Value>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn build(self) -> HookResult {
        HookResult {
            hook_id: self.hook_id,
            category: self.category,
            status: self.status,
            message: self.message,
            data: self.data,
            latency: self.latency,
            diagnostics: self.diagnostics,
        }
    }
}

/// Aggregate response for one orchestrated request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookResponse {
    request_id: String,
    final_content: String,
    results: Vec<HookResult>,
}

impl HookResponse {
    pub fn new(
        request_id: impl Into<String>,
        final_content: impl Into<String>,
        results: Vec<HookResult>,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            final_content: final_content.into(),
            results,
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn final_content(&self) -> &str {
        &self.final_content
    }

    /// Results in the order the hooks were attempted.
    pub fn results(&self) -> &[HookResult] {
        &self.results
    }

    pub fn results_with_status(&self, status: HookStatus) -> impl Iterator<Item = &HookResult> {
        self.results.iter().filter(move |r| r.status() == status)
    }

    /// Number of hooks that completed successfully.
    pub fn succeeded(&self) -> usize {
        self.results_with_status(HookStatus::Success).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_defaults() {
        let result = HookResult::builder("bias-filter", HookCategory::Safeguard, HookStatus::Success)
            .build();

        assert_eq!(result.hook_id(), "bias-filter");
        assert_eq!(result.category(), HookCategory::Safeguard);
        assert!(result.is_success());
        assert_eq!(result.message(), "");
        assert!(result.data().is_none());
        assert_eq!(result.latency(), Duration::ZERO);
        assert!(result.diagnostics().is_empty());
    }

    #[test]
    fn test_latency_if_unset() {
        let result = HookResult::builder("h", HookCategory::Custom, HookStatus::Success)
            .latency(Duration::from_millis(5))
            .latency_if_unset(Duration::from_millis(50))
            .build();
        assert_eq!(result.latency(), Duration::from_millis(5));

        let result = result
            .into_builder()
            .latency(Duration::ZERO)
            .latency_if_unset(Duration::from_millis(50))
            .diagnostic("attempts", 2)
            .build();
        assert_eq!(result.latency(), Duration::from_millis(50));
        assert_eq!(result.diagnostics()["attempts"], json!(2));
    }

    #[test]
    fn test_response_status_helpers() {
        let response = HookResponse::new(
            "req-1",
            "done",
            vec![
                HookResult::builder("a", HookCategory::Safeguard, HookStatus::Success).build(),
                HookResult::builder("b", HookCategory::Reasoning, HookStatus::Failed).build(),
                HookResult::builder("c", HookCategory::Enterprise, HookStatus::Skipped).build(),
            ],
        );

        assert_eq!(response.succeeded(), 1);
        let failed: Vec<_> = response
            .results_with_status(HookStatus::Failed)
            .map(|r| r.hook_id())
            .collect();
        assert_eq!(failed, vec!["b"]);
    }
}
