//! The ordered import collection owned by an account.

use serde::{Deserialize, Serialize};

use crate::account::AccountId;
use crate::token::TokenResolver;
use crate::validation::ValidationResults;

use super::import::Import;

/// Imports in insertion order until [`Imports::sort`] is called.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Imports(Vec<Import>);

impl Imports {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, import: Import) {
        self.0.push(import);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Import> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Import> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Import] {
        &self.0
    }

    /// Canonical order: stable sort by subject.
    pub fn sort(&mut self) {
        self.0.sort_by(|a, b| a.subject.cmp(&b.subject));
    }

    /// Validate every import and the set-wide invariants.
    pub fn validate(&self, recipient: Option<&AccountId>, vr: &mut ValidationResults) {
        self.validate_with(recipient, &TokenResolver::default(), vr);
    }

    pub fn validate_with(
        &self,
        recipient: Option<&AccountId>,
        resolver: &TokenResolver,
        vr: &mut ValidationResults,
    ) {
        super::validate::validate_imports(self, recipient, resolver, vr);
    }
}

impl From<Vec<Import>> for Imports {
    fn from(imports: Vec<Import>) -> Self {
        Self(imports)
    }
}

impl FromIterator<Import> for Imports {
    fn from_iter<I: IntoIterator<Item = Import>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Import> for Imports {
    fn extend<I: IntoIterator<Item = Import>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl std::ops::Index<usize> for Imports {
    type Output = Import;

    fn index(&self, index: usize) -> &Import {
        &self.0[index]
    }
}

impl IntoIterator for Imports {
    type Item = Import;
    type IntoIter = std::vec::IntoIter<Import>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Imports {
    type Item = &'a Import;
    type IntoIter = std::slice::Iter<'a, Import>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
