//! Classifying and resolving an import's token reference.

use std::sync::Arc;

use url::Url;

use super::fetch::{HttpFetcher, TokenFetcher};

/// What an import's `token` field refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenRef {
    /// No token; the import is unverified but structurally fine.
    Empty,
    /// Activation token text carried inline.
    Inline(String),
    /// An `http`/`https` URL serving the token.
    Remote(Url),
    /// Looks like a URL but cannot be fetched.
    Malformed(String),
}

impl TokenRef {
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        if token.is_empty() {
            return Self::Empty;
        }
        // Token text is base64url and `.` only, so a scheme separator means URL.
        if !token.contains("://") {
            return Self::Inline(token.to_string());
        }
        match Url::parse(token) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Remote(url),
            Ok(url) => Self::Malformed(format!("unsupported URL scheme `{}`", url.scheme())),
            Err(e) => Self::Malformed(format!("invalid URL: {e}")),
        }
    }
}

/// Outcome of resolving a token reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    NoToken,
    /// Token text ready to decode.
    Resolved(String),
    /// The reference could not be turned into token text.
    Failed(String),
}

/// Resolves token references, fetching remote ones.
#[derive(Clone)]
pub struct TokenResolver {
    fetcher: Arc<dyn TokenFetcher>,
}

impl TokenResolver {
    pub fn new(fetcher: impl TokenFetcher + 'static) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
        }
    }

    pub fn resolve(&self, token: &str) -> Resolution {
        match TokenRef::parse(token) {
            TokenRef::Empty => Resolution::NoToken,
            TokenRef::Inline(text) => Resolution::Resolved(text),
            TokenRef::Remote(url) => match self.fetcher.fetch(&url) {
                Ok(body) => Resolution::Resolved(body.trim().to_string()),
                Err(e) => {
                    log::warn!("activation token fetch from {url} failed: {e}");
                    Resolution::Failed(e.to_string())
                }
            },
            TokenRef::Malformed(reason) => Resolution::Failed(reason),
        }
    }
}

impl Default for TokenResolver {
    fn default() -> Self {
        Self::new(HttpFetcher::default())
    }
}

impl std::fmt::Debug for TokenResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResolver").finish_non_exhaustive()
    }
}
