//! Caller security posture.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Identity, roles and scopes of the caller a request runs on behalf of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityPosture {
    user_id: String,
    roles: HashSet<String>,
    scopes: HashSet<String>,
}

impl SecurityPosture {
    pub fn new<R, S>(user_id: impl Into<String>, roles: R, scopes: S) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            user_id: user_id.into(),
            roles: roles.into_iter().map(Into::into).collect(),
            scopes: scopes.into_iter().map(Into::into).collect(),
        }
    }

    /// Posture with no roles and no scopes.
    pub fn anonymous(user_id: impl Into<String>) -> Self {
        Self::new(user_id, Vec::<String>::new(), Vec::<String>::new())
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn roles(&self) -> &HashSet<String> {
        &self.roles
    }

    pub fn scopes(&self) -> &HashSet<String> {
        &self.scopes
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.contains(scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posture_queries() {
        let posture = SecurityPosture::new("alice", ["user"], ["enterprise:hooks"]);

        assert_eq!(posture.user_id(), "alice");
        assert!(posture.has_role("user"));
        assert!(!posture.has_role("admin"));
        assert!(posture.has_scope("enterprise:hooks"));
        assert!(!posture.has_scope("skip:safeguards"));
    }

    #[test]
    fn test_anonymous_posture() {
        let posture = SecurityPosture::anonymous("bob");
        assert!(posture.roles().is_empty());
        assert!(posture.scopes().is_empty());
    }
}
