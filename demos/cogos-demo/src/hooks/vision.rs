//! Multimodal image analysis stub

use std::time::Instant;

use async_trait::async_trait;
use cogos_types::{
    ExecutionContext, Hook, HookCategory, HookDescriptor, HookError, HookRequest, HookResult,
    HookStatus,
};
use serde_json::{json, Value};

/// Returns a fixed analysis for the `imageUri` in the payload.
#[derive(Debug)]
pub struct VisionAnalysisHook {
    descriptor: HookDescriptor,
}

impl VisionAnalysisHook {
    pub fn new() -> Self {
        Self {
            descriptor: HookDescriptor::new(
                "vision-analysis-hook",
                HookCategory::Multimodal,
                ["vision", "image-analysis", "multimodal"],
            ),
        }
    }
}

impl Default for VisionAnalysisHook {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Hook for VisionAnalysisHook {
    fn descriptor(&self) -> &HookDescriptor {
        &self.descriptor
    }

    fn supports(&self, request: &HookRequest, _ctx: &ExecutionContext) -> bool {
        request.payload_value("imageUri").is_some()
    }

    async fn execute(
        &self,
        request: &HookRequest,
        _ctx: &ExecutionContext,
    ) -> Result<HookResult, HookError> {
        let start = Instant::now();
        let image_uri = request
            .payload_value("imageUri")
            .and_then(Value::as_str)
            .ok_or_else(|| HookError::InvalidInput("payload 'imageUri' must be a string".into()))?;

        Ok(
            HookResult::builder(self.id(), self.category(), HookStatus::Success)
                .message("Vision analysis completed (demo)")
                .data(json!({
                    "imageUri": image_uri,
                    "detectedObjects": ["screen", "keyboard"],
                    "dominantColors": ["dark-gray", "blue"],
                    "safetyFlags": ["safe"],
                }))
                .latency(start.elapsed())
                .build(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::test_support::{ctx, request};

    #[tokio::test]
    async fn test_analysis_echoes_uri() {
        let req = request("analyze").with_payload("imageUri", "file:///tmp/a.png");
        let hook = VisionAnalysisHook::new();
        assert!(hook.supports(&req, &ctx()));

        let result = hook.execute(&req, &ctx()).await.unwrap();
        assert_eq!(result.data().unwrap()["imageUri"], "file:///tmp/a.png");
    }

    #[tokio::test]
    async fn test_non_string_uri_is_invalid() {
        let req = request("analyze").with_payload("imageUri", 42);
        let err = VisionAnalysisHook::new()
            .execute(&req, &ctx())
            .await
            .unwrap_err();
        assert!(matches!(err, HookError::InvalidInput(_)));
    }
}
