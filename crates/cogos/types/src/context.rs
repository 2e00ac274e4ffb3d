//! Per-request execution context handed to hooks.
//!
//! The context is assembled once per request. Hooks only ever see `&ExecutionContext`,
//! so they can call through the collaborators but cannot swap them out.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::error::ContextError;
use crate::security::SecurityPosture;
use crate::synthesis::SynthesisClient;
use crate::telemetry::{AuditSink, MetricsSink};

/// Shared handle to an external resource such as a database pool.
pub type ResourceHandle = Arc<dyn Any + Send + Sync>;

/// Collaborators and configuration available to hooks for one request.
#[derive(Clone)]
pub struct ExecutionContext {
    llm: Option<Arc<dyn SynthesisClient>>,
    security: SecurityPosture,
    metrics: Option<Arc<dyn MetricsSink>>,
    audit: Option<Arc<dyn AuditSink>>,
    resource: Option<ResourceHandle>,
    config: HashMap<String, Value>,
    cancellation: CancellationToken,
}

impl ExecutionContext {
    /// Context with only the mandatory security posture.
    pub fn new(security: SecurityPosture) -> Self {
        Self {
            llm: None,
            security,
            metrics: None,
            audit: None,
            resource: None,
            config: HashMap::new(),
            cancellation: CancellationToken::new(),
        }
    }

    pub fn with_llm(mut self, llm: Arc<dyn SynthesisClient>) -> Self {
        self.llm = Some(llm);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsSink>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn with_audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = Some(audit);
        self
    }

    pub fn with_resource(mut self, resource: ResourceHandle) -> Self {
        self.resource = Some(resource);
        self
    }

    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    pub fn with_config_map(mut self, config: HashMap<String, Value>) -> Self {
        self.config = config;
        self
    }

    /// Use a caller-owned token to cancel backoff waits for this request.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn llm(&self) -> Option<&Arc<dyn SynthesisClient>> {
        self.llm.as_ref()
    }

    pub fn security(&self) -> &SecurityPosture {
        &self.security
    }

    pub fn metrics(&self) -> Option<&Arc<dyn MetricsSink>> {
        self.metrics.as_ref()
    }

    pub fn audit(&self) -> Option<&Arc<dyn AuditSink>> {
        self.audit.as_ref()
    }

    /// Downcast the external resource handle to a concrete type.
    pub fn resource<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.resource.as_ref().and_then(|r| r.downcast_ref::<T>())
    }

    pub fn has_resource(&self) -> bool {
        self.resource.is_some()
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Read a config value as `T`.
    ///
    /// Returns `Ok(None)` when the key is absent and
    /// [`ContextError::ConfigTypeMismatch`] when the stored value does not
    /// deserialize into `T`.
    pub fn config_value<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ContextError> {
        let Some(value) = self.config.get(key) else {
            return Ok(None);
        };

        serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|_| ContextError::ConfigTypeMismatch {
                key: key.to_string(),
                expected: std::any::type_name::<T>(),
            })
    }
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("security", &self.security)
            .field("has_llm", &self.llm.is_some())
            .field("has_metrics", &self.metrics.is_some())
            .field("has_audit", &self.audit.is_some())
            .field("has_resource", &self.resource.is_some())
            .field("config", &self.config)
            .finish()
    }
}
