//! Account claims — the owner of an import set.
//!
//! Only the parts of an account that import validation needs are
//! modelled: its identity and its imports.

use serde::{Deserialize, Serialize};

use crate::import::Imports;
use crate::token::TokenResolver;
use crate::validation::ValidationResults;

use super::id::AccountId;

/// An account and the imports it declares.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountClaims {
    pub account: AccountId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub imports: Imports,
}

impl AccountClaims {
    pub fn new(account: AccountId) -> Self {
        Self {
            account,
            ..Self::default()
        }
    }

    /// Validate the account and its imports with the default resolver.
    pub fn validate(&self, vr: &mut ValidationResults) {
        self.validate_with(&TokenResolver::default(), vr);
    }

    /// Validate using `resolver` for import tokens.
    ///
    /// Activations on the imports must name this account as recipient.
    pub fn validate_with(&self, resolver: &TokenResolver, vr: &mut ValidationResults) {
        if let Err(e) = self.account.verifying_key() {
            vr.add_blocking(format!("account \"{}\": {e}", self.account));
        }
        self.imports.validate_with(Some(&self.account), resolver, vr);
    }
}
