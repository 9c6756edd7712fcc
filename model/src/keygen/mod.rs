use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::{self, Deserialize, Serialize};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

pub const DEFAULT_KEY_BITS: u32 = 2048;
pub const DEFAULT_RESULT_TTL_SECONDS: i64 = 86400;

/// Supported SSH key algorithms. Anything else is rejected, never silently
/// substituted.
#[derive(Deserialize, Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    Rsa,
    Ed25519,
}

impl KeyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::Rsa => "rsa",
            KeyType::Ed25519 => "ed25519",
        }
    }
}

impl Display for KeyType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for KeyType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rsa" => Ok(KeyType::Rsa),
            "ed25519" => Ok(KeyType::Ed25519),
            other => Err(anyhow!("Not supported KeyType variant: {other}")),
        }
    }
}

/// Queue message sent by the submitter and consumed by the worker. Immutable
/// once enqueued; may be delivered more than once.
#[derive(Deserialize, Debug, Serialize, Clone)]
pub struct KeyGenRequest {
    pub correlation_id: String,
    pub key_type: KeyType,
    #[serde(default = "default_key_bits")]
    pub key_bits: u32,
}

fn default_key_bits() -> u32 {
    DEFAULT_KEY_BITS
}

#[derive(Deserialize, Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Complete,
}

/// Completed keypair record, written exactly once per successful worker
/// execution (last write wins under redelivery) and never mutated. Key
/// material is the base64 of the text encodings.
#[derive(Deserialize, Debug, Serialize, Clone)]
pub struct KeyGenResult {
    pub correlation_id: String,
    pub status: ResultStatus,
    pub key_type: KeyType,
    pub public_key_b64: String,
    pub private_key_b64: String,
    pub created_at: DateTime<Utc>,
    /// Expiry as epoch seconds; doubles as the DynamoDB TTL attribute.
    pub ttl: i64,
}

impl KeyGenResult {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.ttl <= now.timestamp()
    }
}
