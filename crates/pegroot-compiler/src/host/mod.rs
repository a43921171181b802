//! Host-language front-end: the capability the analyzer uses to check action code.
//!
//! The analyzer only needs well-formedness, so the host grammar is opaque here.
//! [`RustFrontEnd`] is the default; tests plug in a fake.

mod comments;
mod location;
mod rust;

#[cfg(test)]
mod rust_tests;

use std::collections::BTreeSet;

use pegroot_core::{Comment, HostForm, Position};

use crate::diagnostics::Finding;

pub use comments::scan_comments;
pub use location::{end_position, position_at};
pub use rust::RustFrontEnd;

/// Implicit parameter bound to the matched value.
pub const MATCHED_TEXT_PARAM: &str = "node";
/// Implicit parameter bound to the match's start offset.
pub const START_OFFSET_PARAM: &str = "idx";

pub trait HostFrontEnd {
    /// Tokenize and parse `source` as a list of host forms.
    ///
    /// `start` is where `source` begins in the grammar file; every reported
    /// position is relative to the grammar file, not to `source`.
    fn tokenize_and_parse(&self, source: &str, start: Position) -> Result<ParsedCode, HostError>;

    /// Comments inside `source`, in order. Independent of parsing.
    fn scan_comments(&self, source: &str, start: Position) -> Vec<Comment>;
}

/// Successful front-end output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCode {
    /// Flattened token stream, delimiters included.
    pub tokens: Vec<HostToken>,
    pub forms: Vec<HostForm>,
    pub end: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostToken {
    pub kind: HostTokenKind,
    pub text: String,
    pub position: Position,
}

impl HostToken {
    pub fn new(kind: HostTokenKind, text: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostTokenKind {
    Ident,
    Punct,
    Literal,
    Delimiter,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The code does not tokenize.
    #[error("{info}")]
    Syntax { info: String, location: Position },

    /// The code tokenizes but is not a valid list of forms.
    #[error("{reason}")]
    Parse { reason: String, location: Position },
}

impl HostError {
    pub fn location(&self) -> Position {
        match self {
            Self::Syntax { location, .. } | Self::Parse { location, .. } => *location,
        }
    }

    pub fn into_finding(self) -> Finding {
        match self {
            Self::Syntax { info, location } => Finding::host_syntax_error(info, location),
            Self::Parse { reason, location } => Finding::host_parse_error(reason, location),
        }
    }
}

/// Names action code may use without declaring them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImplicitParams(BTreeSet<String>);

impl ImplicitParams {
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Implicit parameters referenced by identifier tokens.
    pub fn used_in(&self, tokens: &[HostToken]) -> BTreeSet<String> {
        tokens
            .iter()
            .filter(|t| t.kind == HostTokenKind::Ident && self.contains(&t.text))
            .map(|t| t.text.clone())
            .collect()
    }
}

impl Default for ImplicitParams {
    fn default() -> Self {
        Self::new([MATCHED_TEXT_PARAM, START_OFFSET_PARAM])
    }
}
