//! `.akey` file format — encrypted account key storage.
//!
//! The account seed is sealed under a passphrase (see
//! [`crate::crypto::seal`]); the account identity is stored in plaintext
//! so it can be read without the passphrase.
//!
//! File format (JSON):
//! ```json
//! {
//!     "version": 1,
//!     "format": "akey-v1",
//!     "account": "acct_...",
//!     "encryption": {
//!         "algorithm": "chacha20-poly1305",
//!         "kdf": "argon2id+hkdf-sha256",
//!         "salt": "<base64-16-bytes>",
//!         "nonce": "<base64-12-bytes>"
//!     },
//!     "encrypted_seed": "<base64-ciphertext>"
//! }
//! ```

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::account::AccountId;
use crate::crypto::seal::{self, SealedSeed};
use crate::crypto::AccountKeyPair;
use crate::error::{ImportError, Result};

// ── File format constants ─────────────────────────────────────────────────────

const AKEY_VERSION: u32 = 1;
const AKEY_FORMAT: &str = "akey-v1";
const AKEY_ALGORITHM: &str = "chacha20-poly1305";
const AKEY_KDF: &str = "argon2id+hkdf-sha256";

// ── On-disk structures ────────────────────────────────────────────────────────

/// Top-level structure written to disk as an `.akey` file.
#[derive(Debug, Serialize, Deserialize)]
pub struct AkeyFile {
    pub version: u32,
    pub format: String,
    /// Public identity of the stored key.
    pub account: AccountId,
    pub encryption: EncryptionMetadata,
    /// Base64-encoded ciphertext of the seed.
    pub encrypted_seed: String,
}

/// Encryption parameters stored alongside the ciphertext.
#[derive(Debug, Serialize, Deserialize)]
pub struct EncryptionMetadata {
    pub algorithm: String,
    pub kdf: String,
    pub salt: String,
    pub nonce: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Save an account key to an `.akey` file, sealing the seed with `passphrase`.
///
/// The file is written to a temporary sibling and renamed into place.
pub fn save_account_key(key: &AccountKeyPair, path: &Path, passphrase: &str) -> Result<()> {
    let mut seed = key.seed_bytes();
    let sealed = seal::seal_seed(passphrase.as_bytes(), &seed);
    seed.zeroize();
    let sealed = sealed?;

    let file = AkeyFile {
        version: AKEY_VERSION,
        format: AKEY_FORMAT.to_string(),
        account: key.account_id(),
        encryption: EncryptionMetadata {
            algorithm: AKEY_ALGORITHM.to_string(),
            kdf: AKEY_KDF.to_string(),
            salt: STANDARD.encode(sealed.salt),
            nonce: STANDARD.encode(sealed.nonce),
        },
        encrypted_seed: STANDARD.encode(&sealed.ciphertext),
    };

    let json = serde_json::to_string_pretty(&file)
        .map_err(|e| ImportError::SerializationError(e.to_string()))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let tmp = path.with_extension("akey.tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;
    log::debug!("saved account key {} to {}", file.account, path.display());
    Ok(())
}

/// Load and unseal an account key.
///
/// Fails with `DecryptionFailed` on a wrong passphrase, and with
/// `InvalidFileFormat` if the unsealed key does not match the stored
/// account identity.
pub fn load_account_key(path: &Path, passphrase: &str) -> Result<AccountKeyPair> {
    let file = read_akey_file(path)?;

    let salt: [u8; 16] = decode_field(&file.encryption.salt, "salt")?
        .try_into()
        .map_err(|_| ImportError::InvalidFileFormat("salt must be 16 bytes".into()))?;
    let nonce: [u8; 12] = decode_field(&file.encryption.nonce, "nonce")?
        .try_into()
        .map_err(|_| ImportError::InvalidFileFormat("nonce must be 12 bytes".into()))?;
    let sealed = SealedSeed {
        salt,
        nonce,
        ciphertext: decode_field(&file.encrypted_seed, "encrypted_seed")?,
    };

    let mut seed = seal::open_seed(passphrase.as_bytes(), &sealed)?;
    let key = AccountKeyPair::from_seed(&seed);
    seed.zeroize();

    if key.account_id() != file.account {
        return Err(ImportError::InvalidFileFormat(
            "stored account does not match the sealed key".into(),
        ));
    }
    Ok(key)
}

/// Read the account identity from an `.akey` file without the passphrase.
pub fn read_account_id(path: &Path) -> Result<AccountId> {
    Ok(read_akey_file(path)?.account)
}

fn read_akey_file(path: &Path) -> Result<AkeyFile> {
    let raw = std::fs::read_to_string(path)?;
    let file: AkeyFile = serde_json::from_str(&raw)
        .map_err(|e| ImportError::InvalidFileFormat(format!("JSON parse error: {e}")))?;

    if file.version != AKEY_VERSION {
        return Err(ImportError::InvalidFileFormat(format!(
            "unsupported version {}",
            file.version
        )));
    }
    if file.format != AKEY_FORMAT {
        return Err(ImportError::InvalidFileFormat(format!(
            "unsupported format {:?}",
            file.format
        )));
    }
    Ok(file)
}

fn decode_field(value: &str, field: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(value)
        .map_err(|e| ImportError::InvalidFileFormat(format!("invalid base64 {field}: {e}")))
}
