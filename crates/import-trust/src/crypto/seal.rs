//! Passphrase sealing for account seeds.
//!
//! passphrase → Argon2id(passphrase, salt) → master key
//! HKDF-SHA256(master key, [`SEED_SEAL_CONTEXT`]) → sealing key
//! ChaCha20-Poly1305(sealing key, nonce) over the 32-byte seed.

use argon2::{Algorithm, Argon2, Params, Version};
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use hkdf::Hkdf;
use rand::RngCore;
use sha2::Sha256;
use zeroize::Zeroize;

use crate::error::{ImportError, Result};

const ARGON2_M_COST: u32 = 65536; // 64 MiB
const ARGON2_T_COST: u32 = 3;
const ARGON2_P_COST: u32 = 4;

/// HKDF info string for the seed sealing key. Must remain stable across versions.
pub const SEED_SEAL_CONTEXT: &str = "import-trust/account-seed";

/// A sealed seed plus everything except the passphrase needed to open it.
#[derive(Debug, Clone)]
pub struct SealedSeed {
    pub salt: [u8; 16],
    pub nonce: [u8; 12],
    pub ciphertext: Vec<u8>,
}

fn random_bytes<const N: usize>() -> [u8; N] {
    let mut buf = [0u8; N];
    rand::thread_rng().fill_bytes(&mut buf);
    buf
}

/// Derive the 32-byte sealing key for `passphrase` and `salt`.
pub fn derive_sealing_key(passphrase: &[u8], salt: &[u8; 16]) -> Result<[u8; 32]> {
    let params = Params::new(ARGON2_M_COST, ARGON2_T_COST, ARGON2_P_COST, Some(32))
        .map_err(|e| ImportError::DerivationFailed(format!("Argon2 params: {e}")))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut master = [0u8; 32];
    argon2
        .hash_password_into(passphrase, salt, &mut master)
        .map_err(|e| ImportError::DerivationFailed(format!("Argon2 hash: {e}")))?;

    let hk = Hkdf::<Sha256>::new(None, &master);
    master.zeroize();
    let mut key = [0u8; 32];
    hk.expand(SEED_SEAL_CONTEXT.as_bytes(), &mut key)
        .map_err(|e| ImportError::DerivationFailed(format!("HKDF expand failed: {e}")))?;
    Ok(key)
}

/// Seal a seed under a passphrase with a fresh salt and nonce.
pub fn seal_seed(passphrase: &[u8], seed: &[u8; 32]) -> Result<SealedSeed> {
    let salt = random_bytes::<16>();
    let nonce = random_bytes::<12>();
    let mut key = derive_sealing_key(passphrase, &salt)?;

    let cipher = ChaCha20Poly1305::new_from_slice(&key)
        .map_err(|e| ImportError::EncryptionFailed(format!("cipher init: {e}")));
    key.zeroize();
    let ciphertext = cipher?
        .encrypt(Nonce::from_slice(&nonce), seed.as_slice())
        .map_err(|e| ImportError::EncryptionFailed(format!("encrypt: {e}")))?;

    Ok(SealedSeed {
        salt,
        nonce,
        ciphertext,
    })
}

/// Open a sealed seed. A wrong passphrase and a tampered file look the same.
pub fn open_seed(passphrase: &[u8], sealed: &SealedSeed) -> Result<[u8; 32]> {
    let mut key = derive_sealing_key(passphrase, &sealed.salt)?;
    let cipher = ChaCha20Poly1305::new_from_slice(&key)
        .map_err(|e| ImportError::DecryptionFailed(format!("cipher init: {e}")));
    key.zeroize();

    let mut plaintext = cipher?
        .decrypt(Nonce::from_slice(&sealed.nonce), sealed.ciphertext.as_slice())
        .map_err(|_| {
            ImportError::DecryptionFailed("wrong passphrase or corrupted key file".into())
        })?;

    let seed: std::result::Result<[u8; 32], _> = plaintext.as_slice().try_into();
    plaintext.zeroize();
    seed.map_err(|_| ImportError::DecryptionFailed("sealed seed is not 32 bytes".into()))
}
