//! In-memory hook registry backed by a concurrent map.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use cogos_types::{Hook, HookCategory};
use dashmap::DashMap;
use tracing::debug;

use crate::error::{RegistryError, Result};

struct RegistryEntry {
    /// Position assigned at first registration; replacements keep it.
    seq: u64,
    hook: Arc<dyn Hook>,
}

/// Thread-safe registry of hooks.
///
/// All operations are individually atomic. No cross-operation transaction is
/// offered: a hook listed by one caller may be unregistered by another before
/// it runs.
pub struct HookRegistry {
    hooks: DashMap<String, RegistryEntry>,
    next_seq: AtomicU64,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self {
            hooks: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Insert or replace the hook keyed by its id. Last write wins.
    pub fn register(&self, hook: Arc<dyn Hook>) {
        let id = hook.id().to_string();
        let category = hook.category();

        match self.hooks.entry(id.clone()) {
            dashmap::mapref::entry::Entry::Occupied(mut occupied) => {
                occupied.get_mut().hook = hook;
                debug!(hook_id = %id, %category, "Replaced hook");
            }
            dashmap::mapref::entry::Entry::Vacant(vacant) => {
                let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
                vacant.insert(RegistryEntry { seq, hook });
                debug!(hook_id = %id, %category, "Registered hook");
            }
        }
    }

    /// Remove the hook if present. Unknown ids are ignored.
    pub fn unregister(&self, hook_id: &str) {
        if self.hooks.remove(hook_id).is_some() {
            debug!(hook_id, "Unregistered hook");
        }
    }

    /// Fetch a handle to the hook registered under `hook_id`.
    pub fn get(&self, hook_id: &str) -> Result<Arc<dyn Hook>> {
        self.hooks
            .get(hook_id)
            .map(|entry| Arc::clone(&entry.hook))
            .ok_or_else(|| RegistryError::HookNotFound(hook_id.to_string()))
    }

    pub fn contains(&self, hook_id: &str) -> bool {
        self.hooks.contains_key(hook_id)
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub fn list_all(&self) -> Vec<Arc<dyn Hook>> {
        self.snapshot(|_| true)
    }

    pub fn list_by_category(&self, category: HookCategory) -> Vec<Arc<dyn Hook>> {
        self.snapshot(|hook| hook.category() == category)
    }

    pub fn list_by_tag(&self, tag: &str) -> Vec<Arc<dyn Hook>> {
        self.snapshot(|hook| hook.tags().contains(tag))
    }

    fn snapshot<F>(&self, filter: F) -> Vec<Arc<dyn Hook>>
    where
        F: Fn(&dyn Hook) -> bool,
    {
        let mut matching: Vec<(u64, Arc<dyn Hook>)> = self
            .hooks
            .iter()
            .filter(|entry| filter(entry.hook.as_ref()))
            .map(|entry| (entry.seq, Arc::clone(&entry.hook)))
            .collect();

        matching.sort_by_key(|(seq, _)| *seq);
        matching.into_iter().map(|(_, hook)| hook).collect()
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cogos_types::{
        ExecutionContext, HookDescriptor, HookError, HookRequest, HookResult, HookStatus,
    };
    use std::collections::HashSet;

    struct StaticHook {
        descriptor: HookDescriptor,
        label: &'static str,
    }

    impl StaticHook {
        fn new(id: &str, category: HookCategory, tags: &[&str]) -> Arc<dyn Hook> {
            Self::labelled(id, category, tags, "v1")
        }

        fn labelled(
            id: &str,
            category: HookCategory,
            tags: &[&str],
            label: &'static str,
        ) -> Arc<dyn Hook> {
            Arc::new(Self {
                descriptor: HookDescriptor::new(id, category, tags.iter().copied()),
                label,
            })
        }
    }

    #[async_trait]
    impl Hook for StaticHook {
        fn descriptor(&self) -> &HookDescriptor {
            &self.descriptor
        }

        fn supports(&self, _request: &HookRequest, _ctx: &ExecutionContext) -> bool {
            true
        }

        async fn execute(
            &self,
            _request: &HookRequest,
            _ctx: &ExecutionContext,
        ) -> std::result::Result<HookResult, HookError> {
            Ok(
                HookResult::builder(self.id(), self.category(), HookStatus::Success)
                    .message(self.label)
                    .build(),
            )
        }
    }

    fn ids(hooks: &[Arc<dyn Hook>]) -> Vec<String> {
        hooks.iter().map(|h| h.id().to_string()).collect()
    }

    #[test]
    fn test_register_then_get() {
        let registry = HookRegistry::new();
        registry.register(StaticHook::new("bias-filter", HookCategory::Safeguard, &[]));

        let hook = registry.get("bias-filter").unwrap();
        assert_eq!(hook.id(), "bias-filter");
        assert!(registry.contains("bias-filter"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unregister_then_get_is_not_found() {
        let registry = HookRegistry::new();
        registry.register(StaticHook::new("fact-check", HookCategory::Reasoning, &[]));
        registry.unregister("fact-check");

        assert_eq!(
            registry.get("fact-check").err().unwrap(),
            RegistryError::HookNotFound("fact-check".into())
        );
        assert!(registry.is_empty());

        // Unknown ids are a no-op
        registry.unregister("never-registered");
    }

    #[tokio::test]
    async fn test_register_same_id_last_write_wins() {
        let registry = HookRegistry::new();
        registry.register(StaticHook::labelled("sim", HookCategory::Reasoning, &[], "v1"));
        registry.register(StaticHook::new("other", HookCategory::Reasoning, &[]));
        registry.register(StaticHook::labelled("sim", HookCategory::Reasoning, &[], "v2"));

        assert_eq!(registry.len(), 2);

        let ctx = ExecutionContext::new(cogos_types::SecurityPosture::anonymous("u"));
        let request = HookRequest::new("r", "u", "p").unwrap();
        let result = registry
            .get("sim")
            .unwrap()
            .execute(&request, &ctx)
            .await
            .unwrap();
        assert_eq!(result.message(), "v2");

        // Replacement keeps the original listing position
        assert_eq!(ids(&registry.list_all()), vec!["sim", "other"]);
    }

    #[test]
    fn test_list_by_category_is_exact() {
        let registry = HookRegistry::new();
        registry.register(StaticHook::new("r1", HookCategory::Reasoning, &[]));
        registry.register(StaticHook::new("s1", HookCategory::Safeguard, &[]));
        registry.register(StaticHook::new("r2", HookCategory::Reasoning, &[]));
        registry.register(StaticHook::new("e1", HookCategory::Enterprise, &[]));

        let reasoning: HashSet<String> = ids(&registry.list_by_category(HookCategory::Reasoning))
            .into_iter()
            .collect();
        assert_eq!(reasoning, HashSet::from(["r1".to_string(), "r2".to_string()]));

        assert!(registry.list_by_category(HookCategory::Custom).is_empty());
        assert_eq!(registry.list_all().len(), 4);
    }

    #[test]
    fn test_list_by_tag() {
        let registry = HookRegistry::new();
        registry.register(StaticHook::new("v", HookCategory::Multimodal, &["vision", "multimodal"]));
        registry.register(StaticHook::new("d", HookCategory::Enterprise, &["db-query"]));

        assert_eq!(ids(&registry.list_by_tag("vision")), vec!["v"]);
        assert!(registry.list_by_tag("audio").is_empty());
    }

    #[test]
    fn test_snapshot_survives_concurrent_mutation() {
        let registry = HookRegistry::new();
        registry.register(StaticHook::new("a", HookCategory::Reasoning, &[]));
        registry.register(StaticHook::new("b", HookCategory::Reasoning, &[]));

        let snapshot = registry.list_by_category(HookCategory::Reasoning);
        registry.unregister("a");
        registry.register(StaticHook::new("c", HookCategory::Reasoning, &[]));

        assert_eq!(ids(&snapshot), vec!["a", "b"]);
        assert_eq!(
            ids(&registry.list_by_category(HookCategory::Reasoning)),
            vec!["b", "c"]
        );
    }

    #[test]
    fn test_concurrent_registration() {
        let registry = Arc::new(HookRegistry::new());

        let writers: Vec<_> = (0..4)
            .map(|t| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    for i in 0..25 {
                        let id = format!("hook-{}-{}", t, i);
                        registry.register(StaticHook::new(&id, HookCategory::Custom, &[]));
                        let _ = registry.list_all();
                    }
                })
            })
            .collect();

        for writer in writers {
            writer.join().unwrap();
        }

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.list_all().len())
            })
            .collect();

        for reader in readers {
            assert_eq!(reader.join().unwrap(), 100);
        }
    }
}
