//! Grammar tree as handed over by the surface parser.
//!
//! The tree is structurally read-only during analysis. Only code blocks gain
//! annotations, and only the grammar's `analysis` slot is filled in.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::position::Position;
use crate::symbols::SymbolTable;

/// A whole grammar: ordered declarations plus an optional header code block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Grammar {
    pub declarations: Vec<Declaration>,
    /// Host code emitted once at module scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeBlock>,
    /// Filled by analysis on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<SymbolTable>,
}

impl Grammar {
    pub fn new(declarations: Vec<Declaration>) -> Self {
        Self {
            declarations,
            code: None,
            analysis: None,
        }
    }

    pub fn with_code(mut self, code: CodeBlock) -> Self {
        self.code = Some(code);
        self
    }
}

/// `name <- expr code` rule declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    pub index: Position,
    pub expr: Expr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeBlock>,
}

impl Declaration {
    pub fn new(name: impl Into<String>, index: impl Into<Position>, expr: Expr) -> Self {
        Self {
            name: name.into(),
            index: index.into(),
            expr,
            code: None,
        }
    }

    pub fn with_code(mut self, code: CodeBlock) -> Self {
        self.code = Some(code);
        self
    }
}

/// Rule body expression.
///
/// The variant set is closed on purpose: every traversal matches exhaustively,
/// so a new grammar feature shows up as a compile error at each pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expr {
    /// Ordered choice, first matching alternative wins.
    Choice { alternatives: Vec<Expr> },
    Sequence { items: Vec<Expr> },
    Primary {
        expr: Box<Expr>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        modifier: Option<Modifier>,
    },
    /// Reference to a rule. `index` is where the reference occurs.
    Nonterminal { name: String, index: Position },
    Terminal { kind: TerminalKind, text: String },
}

impl Expr {
    pub fn choice(alternatives: impl IntoIterator<Item = Expr>) -> Self {
        Self::Choice {
            alternatives: alternatives.into_iter().collect(),
        }
    }

    pub fn sequence(items: impl IntoIterator<Item = Expr>) -> Self {
        Self::Sequence {
            items: items.into_iter().collect(),
        }
    }

    pub fn primary(expr: Expr) -> Self {
        Self::Primary {
            expr: Box::new(expr),
            modifier: None,
        }
    }

    pub fn modified(expr: Expr, modifier: Modifier) -> Self {
        Self::Primary {
            expr: Box::new(expr),
            modifier: Some(modifier),
        }
    }

    pub fn nonterminal(name: impl Into<String>, index: impl Into<Position>) -> Self {
        Self::Nonterminal {
            name: name.into(),
            index: index.into(),
        }
    }

    pub fn terminal(kind: TerminalKind, text: impl Into<String>) -> Self {
        Self::Terminal {
            kind,
            text: text.into(),
        }
    }

    pub fn string(text: impl Into<String>) -> Self {
        Self::terminal(TerminalKind::String, text)
    }

    pub fn anything() -> Self {
        Self::terminal(TerminalKind::Anything, ".")
    }
}

/// Suffix/prefix operator on a primary.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    /// `e?`
    Optional,
    /// `e*`
    ZeroOrMore,
    /// `e+`
    OneOrMore,
    /// `&e`
    Assert,
    /// `!e`
    Not,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TerminalKind {
    Regexp,
    String,
    #[serde(rename = "charclass")]
    CharClass,
    Anything,
}

/// Host-language action code attached to a rule or to the grammar header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub code: String,
    pub index: Position,
    /// No user code: the default pass-through action. Never validated.
    #[serde(default)]
    pub identity: bool,
    /// Present only once the block has been validated successfully.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<CodeAnnotations>,
}

impl CodeBlock {
    pub fn new(code: impl Into<String>, index: impl Into<Position>) -> Self {
        Self {
            code: code.into(),
            index: index.into(),
            identity: false,
            annotations: None,
        }
    }

    pub fn identity(index: impl Into<Position>) -> Self {
        Self {
            code: String::new(),
            index: index.into(),
            identity: true,
            annotations: None,
        }
    }

    pub fn is_annotated(&self) -> bool {
        self.annotations.is_some()
    }

    pub fn with_annotations(mut self, annotations: CodeAnnotations) -> Self {
        self.annotations = Some(annotations);
        self
    }
}

/// Facts derived from a successfully validated code block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CodeAnnotations {
    pub parsed: Vec<HostForm>,
    pub comments: Vec<Comment>,
    /// Implicit parameters the code refers to.
    pub used_args: BTreeSet<String>,
}

impl CodeAnnotations {
    pub fn uses(&self, arg: &str) -> bool {
        self.used_args.contains(arg)
    }
}

/// One top-level form of host code, in normalized token text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostForm {
    pub kind: FormKind,
    pub text: String,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    Local,
    Item,
    Expr,
    Macro,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub kind: CommentKind,
    /// Full comment text including delimiters.
    pub text: String,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentKind {
    Line,
    Block,
}
