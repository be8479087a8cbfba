//! Cryptographic primitives for import-trust.
//!
//! This module provides:
//! - Ed25519 account key pairs
//! - Detached Ed25519 signatures over token bytes (base64url encoded)
//! - Passphrase sealing of account seeds (Argon2id, HKDF-SHA256,
//!   ChaCha20-Poly1305) for key files at rest

pub mod keys;
pub mod seal;
pub mod signing;

pub use keys::AccountKeyPair;
