//! Findings collection, threaded through every analysis pass.

use serde::Serialize;

use super::finding::{Finding, Severity};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Findings(Vec<Finding>);

impl Findings {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, finding: Finding) {
        self.0.push(finding);
    }

    /// Consuming push, for passes that thread the accumulator by value.
    pub fn with(mut self, finding: Finding) -> Self {
        self.push(finding);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Finding> {
        self.0.iter()
    }

    pub fn has_errors(&self) -> bool {
        self.0.iter().any(|f| f.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.0.iter().any(|f| f.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.0.iter().filter(|f| f.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.0.iter().filter(|f| f.is_warning()).count()
    }

    pub fn filter_by_severity(&self, severity: Severity) -> Vec<&Finding> {
        self.0.iter().filter(|f| f.severity == severity).collect()
    }

    pub fn as_slice(&self) -> &[Finding] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Finding> {
        self.0
    }
}

impl IntoIterator for Findings {
    type Item = Finding;
    type IntoIter = std::vec::IntoIter<Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Findings {
    type Item = &'a Finding;
    type IntoIter = std::slice::Iter<'a, Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Finding> for Findings {
    fn from_iter<T: IntoIterator<Item = Finding>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
