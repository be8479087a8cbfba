//! Token references: empty, inline activation, or a URL to fetch one from.
//!
//! - [`TokenRef`] classifies the raw `token` field of an import
//! - [`TokenResolver`] turns it into activation token text
//! - [`TokenFetcher`] is the network seam, implemented by [`HttpFetcher`]

pub mod fetch;
pub mod resolver;

pub use fetch::{HttpFetcher, TokenFetcher, DEFAULT_FETCH_TIMEOUT, MAX_TOKEN_BYTES};
pub use resolver::{Resolution, TokenRef, TokenResolver};
