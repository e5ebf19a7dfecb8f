//! Validated principal types.
//!
//! An [`Identity`] is whatever the validator returned for a token: minimally
//! a user id, plus the roles and attributes downstream authorization may
//! consult. The credential cache stores identities behind `Arc` so a hit
//! clones a pointer, not the structure.

use std::collections::HashMap;

/// The validated principal associated with a bearer token.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    /// The user's unique identifier.
    pub user_id: String,

    /// Username for display and logging.
    pub username: String,

    /// The user's assigned roles.
    ///
    /// A cached identity serves these roles until the entry expires or is
    /// invalidated; role changes do not propagate into live cache entries.
    pub roles: Vec<String>,

    /// Additional attributes for downstream authorization decisions.
    pub attributes: HashMap<String, serde_json::Value>,
}

impl Identity {
    /// Creates an identity with no roles or attributes.
    #[must_use]
    pub fn new(user_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            roles: Vec::new(),
            attributes: HashMap::new(),
        }
    }

    /// Adds roles to the identity.
    #[must_use]
    pub fn with_roles(mut self, roles: Vec<String>) -> Self {
        self.roles = roles;
        self
    }

    /// Returns `true` if the identity has a specific role.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Returns `true` if the identity has any of the specified roles.
    #[must_use]
    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|role| self.has_role(role))
    }

    /// Gets an attribute value by key.
    #[must_use]
    pub fn get_attribute(&self, key: &str) -> Option<&serde_json::Value> {
        self.attributes.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_checks() {
        let identity = Identity::new("user-1", "alice")
            .with_roles(vec!["owner".to_string(), "vet".to_string()]);

        assert!(identity.has_role("vet"));
        assert!(!identity.has_role("admin"));
        assert!(identity.has_any_role(&["admin", "owner"]));
        assert!(!identity.has_any_role(&["admin", "billing"]));
    }

    #[test]
    fn test_attributes() {
        let mut identity = Identity::new("user-2", "bob");
        identity
            .attributes
            .insert("clinic".to_string(), json!("downtown"));

        assert_eq!(identity.get_attribute("clinic").unwrap(), "downtown");
        assert!(identity.get_attribute("missing").is_none());
    }
}
