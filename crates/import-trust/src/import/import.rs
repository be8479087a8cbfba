//! A single import declaration.

use serde::{Deserialize, Serialize};

use crate::account::AccountId;
use crate::subject::Subject;
use crate::token::TokenResolver;
use crate::validation::ValidationResults;

/// Whether an import carries a message stream or a request/reply service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportType {
    Stream,
    Service,
    /// Anything else; `#[serde(other)]` must stay on the last variant.
    #[default]
    #[serde(other)]
    Unknown,
}

impl ImportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Stream => "stream",
            Self::Service => "service",
        }
    }

    /// Parse a type name; anything unrecognised is `Unknown`.
    pub fn from_name(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "stream" => Self::Stream,
            "service" => Self::Service,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for ImportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared request to import another account's subject space.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    /// Optional label.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Subject (pattern) being imported.
    pub subject: Subject,
    /// Exporting account; empty when not yet known.
    #[serde(default, skip_serializing_if = "AccountId::is_empty")]
    pub account: AccountId,
    /// Local subject the import is mounted at.
    #[serde(default, skip_serializing_if = "Subject::is_empty")]
    pub to: Subject,
    #[serde(rename = "type", default)]
    pub kind: ImportType,
    /// Inline activation token, a URL serving one, or empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token: String,
    /// Share requester information with the exporter (services only).
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub share: bool,
}

impl Import {
    pub fn new(kind: ImportType, subject: impl Into<Subject>, account: AccountId) -> Self {
        Self {
            subject: subject.into(),
            account,
            kind,
            ..Self::default()
        }
    }

    pub fn stream(subject: impl Into<Subject>, account: AccountId) -> Self {
        Self::new(ImportType::Stream, subject, account)
    }

    pub fn service(subject: impl Into<Subject>, account: AccountId) -> Self {
        Self::new(ImportType::Service, subject, account)
    }

    pub fn with_to(mut self, to: impl Into<Subject>) -> Self {
        self.to = to.into();
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    pub fn with_share(mut self, share: bool) -> Self {
        self.share = share;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn is_stream(&self) -> bool {
        self.kind == ImportType::Stream
    }

    pub fn is_service(&self) -> bool {
        self.kind == ImportType::Service
    }

    /// The local subject this import occupies: `to`, or `subject` when unset.
    pub fn local_subject(&self) -> &Subject {
        if self.to.is_empty() {
            &self.subject
        } else {
            &self.to
        }
    }

    /// Validate with the default HTTP token resolver.
    ///
    /// `recipient` is the account this import belongs to. `None` limits
    /// the checks to structure and token decoding.
    pub fn validate(&self, recipient: Option<&AccountId>, vr: &mut ValidationResults) {
        self.validate_with(recipient, &TokenResolver::default(), vr);
    }

    /// Validate using `resolver` for token references.
    pub fn validate_with(
        &self,
        recipient: Option<&AccountId>,
        resolver: &TokenResolver,
        vr: &mut ValidationResults,
    ) {
        super::validate::validate_import(self, recipient, resolver, vr);
    }
}
