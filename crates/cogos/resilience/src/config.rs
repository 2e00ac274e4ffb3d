//! Executor configuration.
//!
//! Durations are kept in milliseconds so the struct loads cleanly from files
//! and environment variables.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ResilienceError, ResilienceResult};

/// Retry and circuit breaker settings shared by all hooks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// Retries after the first attempt (total attempts = max_retries + 1).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Consecutive failures that open a hook's circuit.
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: u32,

    /// How long an open circuit rejects calls before allowing a probe.
    #[serde(default = "default_open_interval_ms")]
    pub open_interval_ms: u64,

    /// Backoff step; the n-th retry waits `base_delay * n`.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Upper bound for a single backoff wait.
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Optional deadline per hook invocation. Elapsing counts as a failure.
    #[serde(default)]
    pub hook_timeout_ms: Option<u64>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            failure_threshold: default_failure_threshold(),
            open_interval_ms: default_open_interval_ms(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            hook_timeout_ms: None,
        }
    }
}

impl ExecutorConfig {
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_failure_threshold(mut self, failure_threshold: u32) -> Self {
        self.failure_threshold = failure_threshold;
        self
    }

    pub fn with_open_interval(mut self, interval: Duration) -> Self {
        self.open_interval_ms = ceil_millis(interval);
        self
    }

    pub fn with_backoff(mut self, base_delay: Duration, max_delay: Duration) -> Self {
        self.base_delay_ms = ceil_millis(base_delay);
        self.max_delay_ms = ceil_millis(max_delay);
        self
    }

    pub fn with_hook_timeout(mut self, timeout: Duration) -> Self {
        self.hook_timeout_ms = Some(ceil_millis(timeout));
        self
    }

    pub fn open_interval(&self) -> Duration {
        Duration::from_millis(self.open_interval_ms)
    }

    pub fn hook_timeout(&self) -> Option<Duration> {
        self.hook_timeout_ms.map(Duration::from_millis)
    }

    /// Backoff before the retry that follows `attempt`.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let delay = self.base_delay_ms.saturating_mul(u64::from(attempt));
        Duration::from_millis(delay.min(self.max_delay_ms))
    }

    /// Reject settings the executor cannot honour.
    pub fn validate(&self) -> ResilienceResult<()> {
        if self.failure_threshold == 0 {
            return Err(ResilienceError::InvalidConfig(
                "failure_threshold must be > 0".into(),
            ));
        }
        if self.open_interval_ms == 0 {
            return Err(ResilienceError::InvalidConfig(
                "open_interval_ms must be > 0".into(),
            ));
        }
        if self.base_delay_ms > self.max_delay_ms {
            return Err(ResilienceError::InvalidConfig(format!(
                "base_delay_ms ({}) must not exceed max_delay_ms ({})",
                self.base_delay_ms, self.max_delay_ms
            )));
        }
        if self.hook_timeout_ms == Some(0) {
            return Err(ResilienceError::InvalidConfig(
                "hook_timeout_ms must be > 0 when set".into(),
            ));
        }
        Ok(())
    }
}

// Settings are stored in whole milliseconds; a non-zero duration never
// collapses to zero.
fn ceil_millis(duration: Duration) -> u64 {
    let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
    if duration.subsec_nanos() % 1_000_000 != 0 {
        millis.saturating_add(1)
    } else {
        millis
    }
}

fn default_max_retries() -> u32 {
    2
}

fn default_failure_threshold() -> u32 {
    3
}

fn default_open_interval_ms() -> u64 {
    30_000
}

fn default_base_delay_ms() -> u64 {
    200
}

fn default_max_delay_ms() -> u64 {
    1_000
}
