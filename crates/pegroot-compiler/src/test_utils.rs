//! Test doubles and fixtures.

use std::collections::HashMap;

use pegroot_core::{
    CodeBlock, Comment, CommentKind, Declaration, Expr, FormKind, Grammar, HostForm, Position,
};

use crate::analyze::Analyzer;
use crate::host::{
    HostError, HostFrontEnd, HostToken, HostTokenKind, ParsedCode, end_position, position_at,
};

/// Front-end that accepts any code except strings registered as rejected.
///
/// Tokens are the runs of identifier chars; the whole trimmed text is one
/// expression form; `#` starts a comment running to the end of the line.
#[derive(Debug, Clone, Default)]
pub struct FakeFrontEnd {
    rejected: HashMap<String, Rejection>,
}

#[derive(Debug, Clone)]
enum Rejection {
    Syntax(String),
    Parse(String),
}

impl FakeFrontEnd {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject_syntax(mut self, code: &str, info: &str) -> Self {
        self.rejected
            .insert(code.to_string(), Rejection::Syntax(info.to_string()));
        self
    }

    pub fn reject_parse(mut self, code: &str, reason: &str) -> Self {
        self.rejected
            .insert(code.to_string(), Rejection::Parse(reason.to_string()));
        self
    }
}

impl HostFrontEnd for FakeFrontEnd {
    fn tokenize_and_parse(&self, source: &str, start: Position) -> Result<ParsedCode, HostError> {
        match self.rejected.get(source) {
            Some(Rejection::Syntax(info)) => {
                return Err(HostError::Syntax {
                    info: info.clone(),
                    location: start,
                });
            }
            Some(Rejection::Parse(reason)) => {
                return Err(HostError::Parse {
                    reason: reason.clone(),
                    location: start,
                });
            }
            None => {}
        }

        let code = source.split('#').next().unwrap_or_default();
        let mut tokens = Vec::new();
        let mut word_start = None;
        for (i, c) in code.char_indices().chain([(code.len(), ' ')]) {
            let is_word = c.is_alphanumeric() || c == '_';
            match (word_start, is_word) {
                (None, true) => word_start = Some(i),
                (Some(s), false) => {
                    tokens.push(HostToken::new(
                        HostTokenKind::Ident,
                        &code[s..i],
                        position_at(source, s, start),
                    ));
                    word_start = None;
                }
                _ => {}
            }
        }

        let forms = if code.trim().is_empty() {
            Vec::new()
        } else {
            vec![HostForm {
                kind: FormKind::Expr,
                text: code.trim().to_string(),
                position: start,
            }]
        };

        Ok(ParsedCode {
            tokens,
            forms,
            end: end_position(source, start),
        })
    }

    fn scan_comments(&self, source: &str, start: Position) -> Vec<Comment> {
        source
            .match_indices('#')
            .map(|(i, _)| {
                let end = source[i..].find('\n').map_or(source.len(), |n| i + n);
                Comment {
                    kind: CommentKind::Line,
                    text: source[i..end].to_string(),
                    position: position_at(source, i, start),
                }
            })
            .collect()
    }
}

pub fn fake_analyzer() -> Analyzer {
    Analyzer::new(FakeFrontEnd::new())
}

/// `name <- expr` declared at column 1 of `line`.
pub fn rule(name: &str, line: u32, expr: Expr) -> Declaration {
    Declaration::new(name, (line, 1), expr)
}

/// `name <- expr { code }`, the code block starting at column 20.
pub fn rule_with_code(name: &str, line: u32, expr: Expr, code: &str) -> Declaration {
    rule(name, line, expr).with_code(CodeBlock::new(code, (line, 20)))
}

pub fn nt(name: &str, line: u32, column: u32) -> Expr {
    Expr::nonterminal(name, (line, column))
}

pub fn grammar(declarations: impl IntoIterator<Item = Declaration>) -> Grammar {
    Grammar::new(declarations.into_iter().collect())
}
