//! Activations — signed grants from an exporting account to an importer.
//!
//! The activation module provides:
//! - The decoded claim set carried by an activation token
//! - A builder that signs new activation tokens
//! - The token codec (encode, and decode with signature verification)

pub mod claims;
pub mod codec;

pub use claims::{ActivationBuilder, ActivationClaims};
pub use codec::{decode_activation, encode_activation};
