//! Built-in policy gates

mod baseline;

pub use baseline::{BaselineHookPolicy, ENTERPRISE_SCOPE, SKIP_SAFEGUARDS_SCOPE};
