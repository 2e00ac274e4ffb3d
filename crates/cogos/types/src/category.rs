//! Hook classification and outcome enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed classification of a hook.
///
/// The category controls which orchestration phase a hook runs in and
/// which baseline policy rules apply to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookCategory {
    Language,
    Reasoning,
    Multimodal,
    Enterprise,
    Safeguard,
    Custom,
}

impl HookCategory {
    /// All categories, in declaration order.
    pub const ALL: [HookCategory; 6] = [
        HookCategory::Language,
        HookCategory::Reasoning,
        HookCategory::Multimodal,
        HookCategory::Enterprise,
        HookCategory::Safeguard,
        HookCategory::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HookCategory::Language => "language",
            HookCategory::Reasoning => "reasoning",
            HookCategory::Multimodal => "multimodal",
            HookCategory::Enterprise => "enterprise",
            HookCategory::Safeguard => "safeguard",
            HookCategory::Custom => "custom",
        }
    }
}

impl fmt::Display for HookCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single hook attempt as seen by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HookStatus {
    Success,
    Failed,
    RetryableFailure,
    CircuitOpen,
    Skipped,
}

impl HookStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HookStatus::Success => "SUCCESS",
            HookStatus::Failed => "FAILED",
            HookStatus::RetryableFailure => "RETRYABLE_FAILURE",
            HookStatus::CircuitOpen => "CIRCUIT_OPEN",
            HookStatus::Skipped => "SKIPPED",
        }
    }
}

impl fmt::Display for HookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serde_names() {
        let json = serde_json::to_string(&HookCategory::Safeguard).unwrap();
        assert_eq!(json, "\"safeguard\"");

        let parsed: HookCategory = serde_json::from_str("\"enterprise\"").unwrap();
        assert_eq!(parsed, HookCategory::Enterprise);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(HookStatus::CircuitOpen.to_string(), "CIRCUIT_OPEN");
        assert_eq!(HookStatus::Success.to_string(), "SUCCESS");
    }
}
