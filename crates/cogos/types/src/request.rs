//! Inbound request value.
//!
//! A request is built once by the caller and then only read: every
//! component in the pipeline receives `&HookRequest`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{TypesResult, ValidationError};

/// Immutable request flowing through the orchestration pipeline.
///
/// Deserialization goes through [`HookRequest::new`], so the non-empty
/// checks hold for requests read off the wire too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHookRequest")]
pub struct HookRequest {
    request_id: String,
    user_id: String,
    prompt: String,
    payload: HashMap<String, Value>,
    timestamp: DateTime<Utc>,
}

/// Wire shape of a request before validation.
#[derive(Deserialize)]
struct RawHookRequest {
    request_id: String,
    user_id: String,
    prompt: String,
    #[serde(default)]
    payload: HashMap<String, Value>,
    #[serde(default = "Utc::now")]
    timestamp: DateTime<Utc>,
}

impl TryFrom<RawHookRequest> for HookRequest {
    type Error = ValidationError;

    fn try_from(raw: RawHookRequest) -> Result<Self, Self::Error> {
        Ok(HookRequest::new(raw.request_id, raw.user_id, raw.prompt)?
            .with_payload_map(raw.payload)
            .with_timestamp(raw.timestamp))
    }
}

impl HookRequest {
    /// Create a request, rejecting empty identifiers or prompt.
    ///
    /// The payload starts empty and the timestamp defaults to now.
    pub fn new(
        request_id: impl Into<String>,
        user_id: impl Into<String>,
        prompt: impl Into<String>,
    ) -> TypesResult<Self> {
        let request_id = request_id.into();
        let user_id = user_id.into();
        let prompt = prompt.into();

        if request_id.trim().is_empty() {
            return Err(ValidationError::EmptyField("request_id"));
        }
        if user_id.trim().is_empty() {
            return Err(ValidationError::EmptyField("user_id"));
        }
        if prompt.trim().is_empty() {
            return Err(ValidationError::EmptyField("prompt"));
        }

        Ok(Self {
            request_id,
            user_id,
            prompt,
            payload: HashMap::new(),
            timestamp: Utc::now(),
        })
    }

    /// Add a payload entry.
    pub fn with_payload(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// Replace the whole payload.
    pub fn with_payload_map(mut self, payload: HashMap<String, Value>) -> Self {
        self.payload = payload;
        self
    }

    /// Override the creation timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn payload(&self) -> &HashMap<String, Value> {
        &self.payload
    }

    /// Look up a single payload value.
    pub fn payload_value(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
