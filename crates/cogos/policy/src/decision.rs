//! Policy decision type

use serde::{Deserialize, Serialize};

/// Outcome of an admission check.
///
/// `reason` is always populated; allowed decisions carry `"allowed"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDecision {
    allowed: bool,
    reason: String,
    policy_id: Option<String>,
}

impl PolicyDecision {
    /// Create an allow decision
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: "allowed".to_string(),
            policy_id: None,
        }
    }

    /// Create a deny decision attributed to a policy
    pub fn deny(reason: impl Into<String>, policy_id: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: reason.into(),
            policy_id: Some(policy_id.into()),
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Policy that denied, if any
    pub fn policy_id(&self) -> Option<&str> {
        self.policy_id.as_deref()
    }
}
