//! Accounts: public identities and the account claims that own imports.

pub mod claims;
pub mod id;

pub use claims::AccountClaims;
pub use id::AccountId;
