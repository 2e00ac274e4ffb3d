//! Orchestrator configuration

use std::collections::HashSet;

use cogos_types::HookCategory;
use serde::{Deserialize, Serialize};

use crate::error::{OrchestratorError, Result};

/// Pipeline shape and synthesis framing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Categories run after the safeguard phase, in order. The order decides
    /// where each hook's output lands in the synthesis text.
    #[serde(default = "default_capability_phases")]
    pub capability_phases: Vec<HookCategory>,

    /// Line placed between the prompt and the per-hook output lines
    #[serde(default = "default_synthesis_preamble")]
    pub synthesis_preamble: String,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            capability_phases: default_capability_phases(),
            synthesis_preamble: default_synthesis_preamble(),
        }
    }
}

impl OrchestratorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.capability_phases.contains(&HookCategory::Safeguard) {
            return Err(OrchestratorError::InvalidConfig(
                "safeguard hooks always run in the first phase".into(),
            ));
        }

        let mut seen = HashSet::new();
        for category in &self.capability_phases {
            if !seen.insert(category) {
                return Err(OrchestratorError::InvalidConfig(format!(
                    "category '{}' listed twice in capability_phases",
                    category
                )));
            }
        }
        Ok(())
    }
}

fn default_capability_phases() -> Vec<HookCategory> {
    vec![
        HookCategory::Reasoning,
        HookCategory::Enterprise,
        HookCategory::Multimodal,
    ]
}

fn default_synthesis_preamble() -> String {
    "You are a modular cognitive OS. Use the following hook outputs:".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_phase_order() {
        let config = OrchestratorConfig::default();
        assert_eq!(
            config.capability_phases,
            vec![
                HookCategory::Reasoning,
                HookCategory::Enterprise,
                HookCategory::Multimodal
            ]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_safeguard_phase() {
        let config = OrchestratorConfig {
            capability_phases: vec![HookCategory::Safeguard],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_duplicate_phase() {
        let config = OrchestratorConfig {
            capability_phases: vec![HookCategory::Reasoning, HookCategory::Reasoning],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
