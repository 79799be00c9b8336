//! Stateless pagination tokens.
//!
//! Layout: `pg|<query>|<index>|<requester>|<check>`. Query and requester are
//! percent-encoded so the `|` delimiter never appears inside a field, and
//! `<check>` is the first 8 hex digits of the SHA-256 of everything before
//! it.

use sha2::{Digest, Sha256};
use thiserror::Error;

const PREFIX: &str = "pg";
const DELIMITER: char = '|';
const CHECK_LEN: usize = 8;
const FIELD_COUNT: usize = 5;

/// Errors from decoding a token. Callers ignore the interaction on any of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Not a pagination token")]
    WrongPrefix,

    #[error("Expected 5 fields, found {0}")]
    FieldCount(usize),

    #[error("Checksum mismatch")]
    ChecksumMismatch,

    #[error("Invalid index: {0}")]
    InvalidIndex(String),

    #[error("Invalid field encoding: {0}")]
    InvalidEncoding(String),
}

/// One position in the result list of a query, bound to the requester who
/// asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageToken {
    pub query: String,
    pub index: usize,
    pub requester_id: String,
}

impl PageToken {
    pub fn new(query: impl Into<String>, index: usize, requester_id: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            index,
            requester_id: requester_id.into(),
        }
    }

    pub fn encode(&self) -> String {
        let body = format!(
            "{PREFIX}{DELIMITER}{}{DELIMITER}{}{DELIMITER}{}",
            urlencoding::encode(&self.query),
            self.index,
            urlencoding::encode(&self.requester_id),
        );
        let check = checksum(&body);
        format!("{body}{DELIMITER}{check}")
    }

    pub fn decode(token: &str) -> Result<Self, TokenError> {
        let fields: Vec<&str> = token.split(DELIMITER).collect();
        if fields[0] != PREFIX {
            return Err(TokenError::WrongPrefix);
        }
        if fields.len() != FIELD_COUNT {
            return Err(TokenError::FieldCount(fields.len()));
        }

        let (body, check) = token
            .rsplit_once(DELIMITER)
            .ok_or(TokenError::FieldCount(fields.len()))?;
        if check != checksum(body) {
            return Err(TokenError::ChecksumMismatch);
        }

        let index = fields[2]
            .parse::<usize>()
            .map_err(|_| TokenError::InvalidIndex(fields[2].to_string()))?;

        Ok(Self {
            query: decode_field(fields[1])?,
            index,
            requester_id: decode_field(fields[3])?,
        })
    }
}

fn checksum(body: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(body.as_bytes()));
    digest[..CHECK_LEN].to_string()
}

fn decode_field(field: &str) -> Result<String, TokenError> {
    urlencoding::decode(field)
        .map(|s| s.into_owned())
        .map_err(|e| TokenError::InvalidEncoding(e.to_string()))
}
