//! Ed25519 signing and verification over token bytes.
//!
//! Signatures travel inside activation tokens as unpadded URL-safe
//! base64, so they can sit between `.` separators untouched.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};

use crate::error::{ImportError, Result};

/// Sign a message and return the signature as unpadded base64url.
pub fn sign_to_base64url(signing_key: &SigningKey, message: &[u8]) -> String {
    let sig = signing_key.sign(message);
    URL_SAFE_NO_PAD.encode(sig.to_bytes())
}

/// Verify an unpadded base64url signature over `message`.
pub fn verify_from_base64url(
    verifying_key: &VerifyingKey,
    message: &[u8],
    signature_b64: &str,
) -> Result<()> {
    let sig_bytes = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|e| ImportError::MalformedToken(format!("invalid signature encoding: {e}")))?;

    let sig_array: [u8; 64] = sig_bytes
        .try_into()
        .map_err(|_| ImportError::MalformedToken("signature must be 64 bytes".into()))?;

    let signature = Signature::from_bytes(&sig_array);
    verifying_key
        .verify(message, &signature)
        .map_err(|_| ImportError::SignatureInvalid)
}
