//! The hook capability contract.

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::category::HookCategory;
use crate::context::ExecutionContext;
use crate::error::HookError;
use crate::request::HookRequest;
use crate::result::HookResult;

/// Identity of a registrable hook. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookDescriptor {
    id: String,
    category: HookCategory,
    tags: BTreeSet<String>,
}

impl HookDescriptor {
    pub fn new<T>(id: impl Into<String>, category: HookCategory, tags: T) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            id: id.into(),
            category,
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn category(&self) -> HookCategory {
        self.category
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

/// A pluggable unit of behavior invoked by the orchestrator.
///
/// Implementations report every recoverable problem through
/// `Err(HookError)`. Panics are treated as bugs: the executor catches them
/// and turns them into a failed result.
#[async_trait]
pub trait Hook: Send + Sync {
    /// Static identity of this hook.
    fn descriptor(&self) -> &HookDescriptor;

    fn id(&self) -> &str {
        self.descriptor().id()
    }

    fn category(&self) -> HookCategory {
        self.descriptor().category()
    }

    fn tags(&self) -> &BTreeSet<String> {
        self.descriptor().tags()
    }

    /// Fast, side-effect-free applicability check.
    fn supports(&self, request: &HookRequest, ctx: &ExecutionContext) -> bool;

    async fn execute(
        &self,
        request: &HookRequest,
        ctx: &ExecutionContext,
    ) -> Result<HookResult, HookError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_tags_are_a_set() {
        let descriptor = HookDescriptor::new(
            "vision-analysis",
            HookCategory::Multimodal,
            ["vision", "multimodal", "vision"],
        );

        assert_eq!(descriptor.id(), "vision-analysis");
        assert_eq!(descriptor.category(), HookCategory::Multimodal);
        assert_eq!(descriptor.tags().len(), 2);
        assert!(descriptor.has_tag("vision"));
        assert!(!descriptor.has_tag("audio"));
    }
}
