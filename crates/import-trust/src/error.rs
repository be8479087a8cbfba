//! Error types for import-trust.
//!
//! Validation itself never fails: problems found while checking imports
//! are recorded as issues. These errors cover the fallible plumbing
//! around it (keys, token codec, fetching, key files). Private key
//! material is never included in error messages.

/// Error type for key handling, activation tokens, fetching and storage.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid account identity: {0}")]
    InvalidAccountId(String),

    #[error("Signature verification failed")]
    SignatureInvalid,

    #[error("Malformed activation token: {0}")]
    MalformedToken(String),

    #[error("Token fetch failed: {0}")]
    FetchFailed(String),

    #[error("Token endpoint returned status {0}")]
    HttpStatus(u16),

    #[error("Token body exceeds {limit} bytes")]
    TokenTooLarge { limit: usize },

    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, ImportError>;
