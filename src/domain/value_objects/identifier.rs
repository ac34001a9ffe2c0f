//! Content-derived identifiers for persisted records
//!
//! An identifier is the hex encoding of a truncated SHA-256 digest over a
//! random UUID and the creation instant. Uniqueness is probabilistic; the
//! entity store backs it with a UNIQUE constraint.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Number of digest bytes kept in an identifier
const IDENTIFIER_BYTES: usize = 20;

/// Length of the hex form of an identifier
pub const IDENTIFIER_LEN: usize = IDENTIFIER_BYTES * 2;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid identifier '{0}': expected {len} lowercase hex characters", len = IDENTIFIER_LEN)]
pub struct InvalidIdentifier(pub String);

/// External key of a Character or Player
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Derive a fresh identifier for a record created at `now`
    pub fn generate(now: DateTime<Utc>) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(Uuid::new_v4().as_bytes());
        hasher.update(now.timestamp_nanos_opt().unwrap_or_default().to_le_bytes());
        let digest = hasher.finalize();
        Self(hex::encode(&digest[..IDENTIFIER_BYTES]))
    }

    /// Parse an identifier received from outside (path segment, database row)
    pub fn parse(value: &str) -> Result<Self, InvalidIdentifier> {
        let well_formed = value.len() == IDENTIFIER_LEN
            && value
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if well_formed {
            Ok(Self(value.to_string()))
        } else {
            Err(InvalidIdentifier(value.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
