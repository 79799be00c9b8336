use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::IpAddr;

/// Header the chat gateway uses to forward the id of the user behind a request.
pub const REQUESTER_HEADER: &str = "x-requester-id";

/// Request information for authentication
#[derive(Debug, Clone)]
pub struct AuthRequest {
    /// Header names are lowercase.
    pub headers: HashMap<String, String>,
    pub source_ip: IpAddr,
}

impl AuthRequest {
    /// Requester id forwarded by the gateway, if any.
    pub fn requester_id(&self) -> Option<&str> {
        self.headers
            .get(REQUESTER_HEADER)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// Authenticated identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub method: String,
}

impl Identity {
    pub fn anonymous() -> Self {
        Self {
            user_id: "anonymous".to_string(),
            method: "none".to_string(),
        }
    }
}
