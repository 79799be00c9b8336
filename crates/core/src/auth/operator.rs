//! Privileged-operator check for catalog-mutating commands.

use super::AuthError;

/// Allows exactly one requester id to run privileged commands.
#[derive(Debug, Clone)]
pub struct OperatorPolicy {
    operator_id: String,
}

impl OperatorPolicy {
    pub fn new(operator_id: impl Into<String>) -> Self {
        Self {
            operator_id: operator_id.into(),
        }
    }

    pub fn operator_id(&self) -> &str {
        &self.operator_id
    }

    pub fn is_operator(&self, user_id: &str) -> bool {
        !self.operator_id.is_empty() && self.operator_id == user_id
    }

    /// `action` completes the refusal message ("Only the operator may ...").
    pub fn authorize(&self, user_id: &str, action: &str) -> Result<(), AuthError> {
        if self.is_operator(user_id) {
            Ok(())
        } else {
            tracing::warn!(user_id, action, "Rejected privileged command from non-operator");
            Err(AuthError::Forbidden {
                user_id: user_id.to_string(),
                action: action.to_string(),
            })
        }
    }
}
