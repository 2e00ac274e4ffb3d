//! Baseline admission rules every deployment enforces.

use cogos_types::{ExecutionContext, Hook, HookCategory, HookRequest};

use crate::decision::PolicyDecision;
use crate::error::Result;
use crate::gate::PolicyGate;

/// Scope required to run enterprise hooks.
pub const ENTERPRISE_SCOPE: &str = "enterprise:hooks";

/// Scope that opts a caller out of safeguard hooks.
pub const SKIP_SAFEGUARDS_SCOPE: &str = "skip:safeguards";

const POLICY_ID: &str = "baseline";

/// Minimum rule set:
/// - enterprise hooks need the `enterprise:hooks` scope
/// - safeguard hooks are denied when the caller holds `skip:safeguards`
#[derive(Debug, Default, Clone, Copy)]
pub struct BaselineHookPolicy;

impl PolicyGate for BaselineHookPolicy {
    fn id(&self) -> &str {
        POLICY_ID
    }

    fn evaluate(
        &self,
        hook: &dyn Hook,
        _request: &HookRequest,
        ctx: &ExecutionContext,
    ) -> Result<PolicyDecision> {
        let posture = ctx.security();

        match hook.category() {
            HookCategory::Enterprise if !posture.has_scope(ENTERPRISE_SCOPE) => {
                Ok(PolicyDecision::deny(
                    format!("Missing scope '{}'", ENTERPRISE_SCOPE),
                    POLICY_ID,
                ))
            }
            HookCategory::Safeguard if posture.has_scope(SKIP_SAFEGUARDS_SCOPE) => {
                Ok(PolicyDecision::deny(
                    format!(
                        "User scope {} prevents safeguard execution",
                        SKIP_SAFEGUARDS_SCOPE
                    ),
                    POLICY_ID,
                ))
            }
            _ => Ok(PolicyDecision::allow()),
        }
    }

    fn priority(&self) -> u32 {
        1000
    }
}
