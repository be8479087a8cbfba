//! Activation claims — what an exporting account grants to a recipient.
//!
//! An activation says "account X (or a signing key acting for X) lets
//! account Y import `{subject}` as a `{type}`".

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::account::AccountId;
use crate::crypto::AccountKeyPair;
use crate::error::{ImportError, Result};
use crate::import::ImportType;
use crate::subject::Subject;

use super::codec;

/// The decoded payload of an activation token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationClaims {
    /// Content hash of the claims (hex SHA-256, computed with an empty id).
    #[serde(rename = "jti", default)]
    pub id: String,
    /// Issue time (Unix seconds).
    #[serde(rename = "iat")]
    pub issued_at: i64,
    /// Expiry (Unix seconds). Carried for callers; import validation ignores it.
    #[serde(rename = "exp", default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    /// Identity of the key that signed the token.
    #[serde(rename = "iss")]
    pub issuer: AccountId,
    /// Account allowed to use the grant.
    #[serde(rename = "sub")]
    pub recipient: AccountId,
    /// Account a delegated signing key acted for, if `issuer` is not the account itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer_account: Option<AccountId>,
    /// Optional label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Granted subject pattern.
    pub import_subject: Subject,
    /// Granted import type.
    pub import_type: ImportType,
}

impl ActivationClaims {
    /// The account on whose behalf this activation was issued.
    pub fn exporting_account(&self) -> &AccountId {
        self.issuer_account.as_ref().unwrap_or(&self.issuer)
    }

    /// Whether the token was signed by a delegated key rather than the account key.
    pub fn is_delegated(&self) -> bool {
        self.issuer_account
            .as_ref()
            .is_some_and(|account| *account != self.issuer)
    }

    /// Whether `expires_at` lies at or before `now` (Unix seconds).
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }

    /// Hash of all claim fields with the id cleared.
    pub fn compute_id(&self) -> Result<String> {
        let mut unsigned = self.clone();
        unsigned.id.clear();
        let bytes = serde_json::to_vec(&unsigned)
            .map_err(|e| ImportError::SerializationError(e.to_string()))?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }
}

/// Builder for signed activation tokens.
pub struct ActivationBuilder {
    recipient: AccountId,
    import_subject: Subject,
    import_type: ImportType,
    expires_at: Option<i64>,
    issuer_account: Option<AccountId>,
    name: Option<String>,
}

impl ActivationBuilder {
    /// Start building an activation for `recipient`.
    pub fn new(recipient: AccountId) -> Self {
        Self {
            recipient,
            import_subject: Subject::default(),
            import_type: ImportType::Unknown,
            expires_at: None,
            issuer_account: None,
            name: None,
        }
    }

    /// Set the granted subject pattern.
    pub fn subject(mut self, subject: impl Into<Subject>) -> Self {
        self.import_subject = subject.into();
        self
    }

    /// Set the granted import type.
    pub fn import_type(mut self, import_type: ImportType) -> Self {
        self.import_type = import_type;
        self
    }

    /// Expire at an absolute time (Unix seconds).
    pub fn expires_at(mut self, secs: i64) -> Self {
        self.expires_at = Some(secs);
        self
    }

    /// Expire `secs` seconds from now.
    pub fn expires_in(mut self, secs: i64) -> Self {
        self.expires_at = Some(crate::time::now_secs() + secs);
        self
    }

    /// Sign with a delegated key acting for `account`.
    pub fn issuer_account(mut self, account: AccountId) -> Self {
        self.issuer_account = Some(account);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Build the claims without signing, issued by `issuer`.
    pub fn build(self, issuer: AccountId) -> Result<ActivationClaims> {
        if self.import_subject.is_empty() {
            return Err(ImportError::MalformedToken(
                "no import subject specified".into(),
            ));
        }
        if self.import_type == ImportType::Unknown {
            return Err(ImportError::MalformedToken(
                "import type must be stream or service".into(),
            ));
        }

        let mut claims = ActivationClaims {
            id: String::new(),
            issued_at: crate::time::now_secs(),
            expires_at: self.expires_at,
            issuer,
            recipient: self.recipient,
            issuer_account: self.issuer_account,
            name: self.name,
            import_subject: self.import_subject,
            import_type: self.import_type,
        };
        claims.id = claims.compute_id()?;
        Ok(claims)
    }

    /// Sign and encode the activation token.
    pub fn sign(self, key: &AccountKeyPair) -> Result<String> {
        let claims = self.build(key.account_id())?;
        codec::encode_activation(&claims, key)
    }
}
