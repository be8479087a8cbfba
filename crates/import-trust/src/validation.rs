//! Validation results: an ordered sink of severity-tagged issues.
//!
//! Validators never abort on bad input. Every problem they find is
//! appended here and the caller decides afterwards with
//! [`ValidationResults::is_empty`] and [`ValidationResults::is_blocking`].

use serde::{Deserialize, Serialize};

/// How serious an issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Advisory: the credential is absent, unreachable or undecodable.
    Warning,
    /// Structural or security violation; must prevent acceptance.
    Blocking,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Blocking => "blocking",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single problem found during validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub description: String,
    pub severity: Severity,
}

impl ValidationIssue {
    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::Blocking
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.severity, self.description)
    }
}

/// Append-only, ordered collection of issues for one validation call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResults {
    issues: Vec<ValidationIssue>,
}

impl ValidationResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an issue.
    pub fn add_issue(&mut self, description: impl Into<String>, severity: Severity) {
        let issue = ValidationIssue {
            description: description.into(),
            severity,
        };
        log::debug!("validation issue: {issue}");
        self.issues.push(issue);
    }

    pub fn add_warning(&mut self, description: impl Into<String>) {
        self.add_issue(description, Severity::Warning);
    }

    pub fn add_blocking(&mut self, description: impl Into<String>) {
        self.add_issue(description, Severity::Blocking);
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Whether any recorded issue must block acceptance.
    ///
    /// Only blocking-severity issues count. `strict` is reserved for
    /// finer severity tiers and never promotes warnings.
    pub fn is_blocking(&self, _strict: bool) -> bool {
        self.issues.iter().any(ValidationIssue::is_blocking)
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    pub fn blocking(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.is_blocking())
    }

    /// Append all issues of `other`, keeping their order.
    pub fn merge(&mut self, other: ValidationResults) {
        self.issues.extend(other.issues);
    }
}

impl std::fmt::Display for ValidationResults {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for issue in &self.issues {
            writeln!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ValidationResults {
    type Item = &'a ValidationIssue;
    type IntoIter = std::slice::Iter<'a, ValidationIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}
