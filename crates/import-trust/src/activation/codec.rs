//! Activation token codec.
//!
//! Token text is three unpadded base64url segments joined by `.`:
//!
//! ```text
//! base64url(header) . base64url(claims) . base64url(signature)
//! ```
//!
//! The header is `{"typ":"activation","alg":"ed25519"}`. The signature is
//! Ed25519 over the ASCII bytes of `header.claims`, made by the key named
//! in the claims' `iss` field.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::crypto::signing;
use crate::crypto::AccountKeyPair;
use crate::error::{ImportError, Result};

use super::claims::ActivationClaims;

pub const TOKEN_TYPE: &str = "activation";
pub const TOKEN_ALGORITHM: &str = "ed25519";

#[derive(Debug, Serialize, Deserialize)]
struct TokenHeader {
    typ: String,
    alg: String,
}

fn encode_segment<T: Serialize>(value: &T) -> Result<String> {
    let bytes =
        serde_json::to_vec(value).map_err(|e| ImportError::SerializationError(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

fn decode_segment<T: for<'de> Deserialize<'de>>(segment: &str, what: &str) -> Result<T> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| ImportError::MalformedToken(format!("invalid {what} encoding: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| ImportError::MalformedToken(format!("invalid {what}: {e}")))
}

/// Encode and sign `claims` with `key`.
///
/// The key must be the one the claims name as issuer.
pub fn encode_activation(claims: &ActivationClaims, key: &AccountKeyPair) -> Result<String> {
    if claims.issuer != key.account_id() {
        return Err(ImportError::InvalidKey(
            "signing key does not match the claims issuer".into(),
        ));
    }

    let header = TokenHeader {
        typ: TOKEN_TYPE.to_string(),
        alg: TOKEN_ALGORITHM.to_string(),
    };
    let signing_input = format!("{}.{}", encode_segment(&header)?, encode_segment(claims)?);
    let signature = signing::sign_to_base64url(key.signing_key(), signing_input.as_bytes());
    Ok(format!("{signing_input}.{signature}"))
}

/// Decode an activation token and verify its signature against its issuer.
pub fn decode_activation(token: &str) -> Result<ActivationClaims> {
    let token = token.trim();
    let segments: Vec<&str> = token.split('.').collect();
    let [header, claims, signature] = segments.as_slice() else {
        return Err(ImportError::MalformedToken(format!(
            "expected 3 segments, found {}",
            segments.len()
        )));
    };

    let header: TokenHeader = decode_segment(header, "header")?;
    if header.typ != TOKEN_TYPE || header.alg != TOKEN_ALGORITHM {
        return Err(ImportError::MalformedToken(format!(
            "unsupported token {}/{}",
            header.typ, header.alg
        )));
    }

    let decoded: ActivationClaims = decode_segment(claims, "claims")?;
    let issuer_key = decoded.issuer.verifying_key()?;

    let signing_input = &token[..token.len() - signature.len() - 1];
    signing::verify_from_base64url(&issuer_key, signing_input.as_bytes(), signature)?;

    Ok(decoded)
}
