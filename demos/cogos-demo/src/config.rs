//! Configuration for the demo binary

use std::collections::HashMap;

use cogos_orchestrator::OrchestratorConfig;
use cogos_resilience::ExecutorConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Demo configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Retry and circuit settings
    #[serde(default = "default_executor")]
    pub executor: ExecutorConfig,

    /// Pipeline shape
    #[serde(default)]
    pub orchestrator: OrchestratorConfig,

    /// Values copied into every execution context
    #[serde(default = "default_context")]
    pub context: HashMap<String, Value>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            executor: default_executor(),
            orchestrator: OrchestratorConfig::default(),
            context: default_context(),
        }
    }
}

impl DemoConfig {
    /// Layer defaults, an optional file, then `COGOS_` environment overrides.
    ///
    /// Nested keys use a double underscore, e.g.
    /// `COGOS_EXECUTOR__MAX_RETRIES=4`.
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&DemoConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("COGOS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}

// Short open interval so a demo run can watch a circuit recover
fn default_executor() -> ExecutorConfig {
    ExecutorConfig::default()
        .with_max_retries(2)
        .with_failure_threshold(3)
        .with_open_interval(std::time::Duration::from_secs(10))
}

fn default_context() -> HashMap<String, Value> {
    HashMap::from([("environment".to_string(), Value::from("demo"))])
}
