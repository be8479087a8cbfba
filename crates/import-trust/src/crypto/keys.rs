//! Ed25519 account key pairs.
//!
//! An account key pair signs activation tokens. It is either the
//! account's own identity key or a delegated signing key acting on the
//! account's behalf; both look the same here.

use ed25519_dalek::{SigningKey, VerifyingKey};
use zeroize::Zeroize;

use crate::account::AccountId;
use crate::error::{ImportError, Result};

/// An Ed25519 key pair for an account or a delegated signing key.
///
/// The seed is zeroized on drop by `SigningKey` itself.
pub struct AccountKeyPair {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
}

impl AccountKeyPair {
    /// Generate a new random key pair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut rand::thread_rng());
        let verifying_key = signing_key.verifying_key();
        Self {
            signing_key,
            verifying_key,
        }
    }

    /// Reconstruct a key pair from its 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        let verifying_key = signing_key.verifying_key();
        Self {
            signing_key,
            verifying_key,
        }
    }

    /// Reconstruct a key pair from a seed slice, checking its length.
    pub fn from_seed_slice(seed: &[u8]) -> Result<Self> {
        let mut bytes: [u8; 32] = seed
            .try_into()
            .map_err(|_| ImportError::InvalidKey("seed must be 32 bytes".into()))?;
        let kp = Self::from_seed(&bytes);
        bytes.zeroize();
        Ok(kp)
    }

    /// The public account identity of this key.
    pub fn account_id(&self) -> AccountId {
        AccountId::from_verifying_key(&self.verifying_key)
    }

    /// Return a reference to the signing key.
    pub fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }

    /// Return the verifying (public) key.
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// Return the seed bytes. Caller must zeroize after use.
    pub fn seed_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }
}

impl std::fmt::Debug for AccountKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountKeyPair")
            .field("account", &self.account_id())
            .finish_non_exhaustive()
    }
}
