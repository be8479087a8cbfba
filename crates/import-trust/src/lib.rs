//! import-trust — validation of cross-account imports and their activations.
//!
//! An account that wants another account's subjects declares an import.
//! The import is authoritative once it carries an activation token signed
//! by the exporting account (or a signing key acting for it) that names
//! the importer as recipient and grants a covering subject pattern.
//!
//! Validation never fails outright: every problem is collected as a
//! warning or blocking issue in [`ValidationResults`].

pub mod account;
pub mod activation;
pub mod crypto;
pub mod error;
pub mod import;
pub mod storage;
pub mod subject;
pub mod time;
pub mod token;
pub mod validation;

// Re-export primary types
pub use account::{AccountClaims, AccountId};
pub use activation::{decode_activation, ActivationBuilder, ActivationClaims};
pub use crypto::AccountKeyPair;
pub use error::{ImportError, Result};
pub use import::{Import, ImportType, Imports};
pub use subject::{subject_covers, Subject};
pub use token::{HttpFetcher, Resolution, TokenFetcher, TokenRef, TokenResolver};
pub use validation::{Severity, ValidationIssue, ValidationResults};
