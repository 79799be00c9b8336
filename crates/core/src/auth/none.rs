use async_trait::async_trait;

use super::{AuthError, AuthRequest, Authenticator, Identity};

/// Authenticator that trusts whatever requester id the caller forwards.
/// Must be explicitly configured - the system won't default to this
pub struct NoneAuthenticator;

impl NoneAuthenticator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoneAuthenticator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Authenticator for NoneAuthenticator {
    async fn authenticate(&self, request: &AuthRequest) -> Result<Identity, AuthError> {
        Ok(match request.requester_id() {
            Some(user_id) => Identity {
                user_id: user_id.to_string(),
                method: "none".to_string(),
            },
            None => Identity::anonymous(),
        })
    }

    fn method_name(&self) -> &'static str {
        "none"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::REQUESTER_HEADER;
    use std::collections::HashMap;
    use std::net::IpAddr;

    #[tokio::test]
    async fn test_none_authenticator_returns_anonymous() {
        let auth = NoneAuthenticator::new();
        let request = AuthRequest {
            headers: HashMap::new(),
            source_ip: "127.0.0.1".parse::<IpAddr>().unwrap(),
        };

        let identity = auth.authenticate(&request).await.unwrap();

        assert_eq!(identity.user_id, "anonymous");
        assert_eq!(identity.method, "none");
    }

    #[tokio::test]
    async fn test_none_authenticator_uses_forwarded_requester() {
        let auth = NoneAuthenticator::new();
        let request = AuthRequest {
            headers: HashMap::from([(REQUESTER_HEADER.to_string(), "777".to_string())]),
            source_ip: "127.0.0.1".parse::<IpAddr>().unwrap(),
        };

        let identity = auth.authenticate(&request).await.unwrap();
        assert_eq!(identity.user_id, "777");
    }

    #[test]
    fn test_none_authenticator_method_name() {
        assert_eq!(NoneAuthenticator::default().method_name(), "none");
    }
}
