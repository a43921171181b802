//! Symbol table produced by grammar analysis.

use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::grammar::{CodeBlock, Modifier, TerminalKind};
use crate::position::Position;

/// Nonterminal name to every position it is referenced at.
pub type NonterminalIndex = IndexMap<String, Vec<Position>>;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SymbolTable {
    /// One entry per declaration. Sorted by index once normalized;
    /// the first rule is the entry point.
    pub rules: Vec<Rule>,
    /// Keyed by referenced names only, declared-but-unreferenced rules are absent.
    pub nts: NonterminalIndex,
    pub combinators: BTreeSet<Combinator>,
}

impl SymbolTable {
    pub fn entry_point(&self) -> Option<&Rule> {
        self.rules.first()
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name == name)
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.rule(name).is_some()
    }

    pub fn references(&self, name: &str) -> &[Position] {
        self.nts.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_referenced(&self, name: &str) -> bool {
        self.nts.contains_key(name)
    }

    pub fn uses(&self, combinator: Combinator) -> bool {
        self.combinators.contains(&combinator)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    pub index: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeBlock>,
}

impl Rule {
    pub fn new(name: impl Into<String>, index: Position, code: Option<CodeBlock>) -> Self {
        Self {
            name: name.into(),
            index,
            code,
        }
    }
}

/// Grammar construct whose runtime support code generation must emit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Combinator {
    Choice,
    Sequence,
    Optional,
    ZeroOrMore,
    OneOrMore,
    Assert,
    Not,
    Regexp,
    String,
    #[serde(rename = "charclass")]
    CharClass,
    Anything,
}

impl Combinator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Choice => "choice",
            Self::Sequence => "sequence",
            Self::Optional => "optional",
            Self::ZeroOrMore => "zero_or_more",
            Self::OneOrMore => "one_or_more",
            Self::Assert => "assert",
            Self::Not => "not",
            Self::Regexp => "regexp",
            Self::String => "string",
            Self::CharClass => "charclass",
            Self::Anything => "anything",
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Modifier> for Combinator {
    fn from(modifier: Modifier) -> Self {
        match modifier {
            Modifier::Optional => Self::Optional,
            Modifier::ZeroOrMore => Self::ZeroOrMore,
            Modifier::OneOrMore => Self::OneOrMore,
            Modifier::Assert => Self::Assert,
            Modifier::Not => Self::Not,
        }
    }
}

impl From<TerminalKind> for Combinator {
    fn from(kind: TerminalKind) -> Self {
        match kind {
            TerminalKind::Regexp => Self::Regexp,
            TerminalKind::String => Self::String,
            TerminalKind::CharClass => Self::CharClass,
            TerminalKind::Anything => Self::Anything,
        }
    }
}
