//! Account identities.
//!
//! Format: `acct_` + base58 of the raw 32-byte Ed25519 verifying key.
//! Unlike a hashed id the key is recoverable, so the issuer named in an
//! activation token is all that is needed to check its signature.

use std::str::FromStr;

use ed25519_dalek::VerifyingKey;
use serde::{Deserialize, Serialize};

use crate::error::{ImportError, Result};

const ACCOUNT_PREFIX: &str = "acct_";

/// Public identity of an account or of a delegated signing key.
///
/// The default value is the empty identity, used for "no account".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub String);

impl AccountId {
    /// Compute the identity for a verifying key.
    pub fn from_verifying_key(key: &VerifyingKey) -> Self {
        let encoded = bs58::encode(key.as_bytes()).into_string();
        Self(format!("{ACCOUNT_PREFIX}{encoded}"))
    }

    /// Parse and check an identity string.
    pub fn parse(s: &str) -> Result<Self> {
        let id = Self(s.trim().to_string());
        id.verifying_key()?;
        Ok(id)
    }

    /// Recover the verifying key this identity names.
    pub fn verifying_key(&self) -> Result<VerifyingKey> {
        let encoded = self.0.strip_prefix(ACCOUNT_PREFIX).ok_or_else(|| {
            ImportError::InvalidAccountId(format!("missing `{ACCOUNT_PREFIX}` prefix"))
        })?;
        let raw = bs58::decode(encoded)
            .into_vec()
            .map_err(|e| ImportError::InvalidAccountId(format!("invalid base58: {e}")))?;
        let bytes: [u8; 32] = raw
            .try_into()
            .map_err(|_| ImportError::InvalidAccountId("key must be 32 bytes".into()))?;
        VerifyingKey::from_bytes(&bytes)
            .map_err(|e| ImportError::InvalidAccountId(format!("invalid verifying key: {e}")))
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountId {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
