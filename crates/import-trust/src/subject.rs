//! Hierarchical subjects and wildcard containment.
//!
//! Subjects are `.`-separated tokens with two wildcards:
//!   - `*`: exactly one token (`orders.*` matches `orders.eu`)
//!   - `>`: one or more trailing tokens (`orders.>` matches `orders.eu.paid`)
//!
//! A grant *covers* a requested pattern when every concrete subject the
//! requested pattern matches is also matched by the grant.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Single-token wildcard.
pub const SINGLE_WILDCARD: &str = "*";
/// Trailing multi-token wildcard.
pub const FULL_WILDCARD: &str = ">";

/// A subject or subject pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Subject(pub String);

impl Subject {
    pub fn new(subject: impl Into<String>) -> Self {
        Self(subject.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Split into `.`-separated tokens.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Whether any token is `*` or `>`.
    pub fn has_wildcards(&self) -> bool {
        self.tokens()
            .any(|t| t == SINGLE_WILDCARD || t == FULL_WILDCARD)
    }

    /// Check whether this pattern, as a grant, covers `requested`.
    pub fn covers(&self, requested: &Subject) -> bool {
        subject_covers(&self.0, &requested.0)
    }

    /// Check whether this pattern is covered by `grant`.
    pub fn is_contained_in(&self, grant: &Subject) -> bool {
        subject_covers(&grant.0, &self.0)
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Subject {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Subject {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// Canonical order is plain lexicographic order of the raw string.
impl PartialOrd for Subject {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Subject {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

/// Check whether a granted subject pattern covers a requested one.
///
/// This is the core containment logic used when checking what an
/// activation grants against what an import asks for.
pub fn subject_covers(grant: &str, requested: &str) -> bool {
    if grant.is_empty() || requested.is_empty() {
        return false;
    }
    let grant: Vec<&str> = grant.split('.').collect();

    let mut matched = 0;
    for (i, req) in requested.split('.').enumerate() {
        let Some(&granted) = grant.get(i) else {
            // Grant ran out before the request did.
            return false;
        };
        match granted {
            // Covers this token and everything after it, requested `>` included.
            FULL_WILDCARD => return true,
            SINGLE_WILDCARD => {
                if req == FULL_WILDCARD {
                    return false;
                }
            }
            literal => {
                if req != literal {
                    return false;
                }
            }
        }
        matched = i + 1;
    }

    // Leftover grant tokens (even a trailing `>`) need at least one more
    // requested token, so they leave part of the grant unmatched.
    matched == grant.len()
}
