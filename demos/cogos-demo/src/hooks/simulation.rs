//! Random-walk simulation hook

use std::time::Instant;

use async_trait::async_trait;
use cogos_types::{
    ExecutionContext, Hook, HookCategory, HookDescriptor, HookError, HookRequest, HookResult,
    HookStatus,
};
use rand::Rng;
use serde_json::json;

const DEFAULT_STEPS: usize = 20;
const MAX_STEPS: usize = 1000;

/// Runs a +/-1 random walk. Step count comes from `simulationSteps` in the
/// payload when it is within 1..=1000.
#[derive(Debug)]
pub struct SimulationHook {
    descriptor: HookDescriptor,
}

impl SimulationHook {
    pub fn new() -> Self {
        Self {
            descriptor: HookDescriptor::new(
                "simulation-hook",
                HookCategory::Reasoning,
                ["simulation", "run-simulation"],
            ),
        }
    }

    fn steps(request: &HookRequest) -> usize {
        request
            .payload_value("simulationSteps")
            .and_then(|v| v.as_u64())
            .map(|v| v as usize)
            .filter(|v| (1..=MAX_STEPS).contains(v))
            .unwrap_or(DEFAULT_STEPS)
    }
}

impl Default for SimulationHook {
    fn default() -> Self {
        Self::new()
    }
}

fn random_walk(steps: usize) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    let mut position = 0.0;
    (0..steps)
        .map(|_| {
            position += if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
            position
        })
        .collect()
}

#[async_trait]
impl Hook for SimulationHook {
    fn descriptor(&self) -> &HookDescriptor {
        &self.descriptor
    }

    fn supports(&self, request: &HookRequest, _ctx: &ExecutionContext) -> bool {
        let prompt = request.prompt().to_lowercase();
        prompt.contains("simulate") || prompt.contains("simulation")
    }

    async fn execute(
        &self,
        request: &HookRequest,
        _ctx: &ExecutionContext,
    ) -> Result<HookResult, HookError> {
        let start = Instant::now();
        let steps = Self::steps(request);
        let positions = random_walk(steps);
        let final_position = positions.last().copied().unwrap_or(0.0);

        Ok(
            HookResult::builder(self.id(), self.category(), HookStatus::Success)
                .message("Simulation completed")
                .data(json!({
                    "type": "random-walk",
                    "steps": steps,
                    "finalPosition": final_position,
                    "positions": positions,
                }))
                .latency(start.elapsed())
                .build(),
        )
    }
}
