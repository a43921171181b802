//! Rust as the host language for action code.
//!
//! Tokenizing goes through `proc-macro2` (with span locations), parsing
//! through `syn` as the statement list of a block body. A synthetic `;` is
//! appended before parsing so a lone trailing expression, or a trailing
//! `let` without its semicolon, is accepted as a complete unit.

use std::str::FromStr;

use pegroot_core::{Comment, FormKind, HostForm, Position};
use proc_macro2::{Delimiter, Punct, Spacing, Span, TokenStream, TokenTree};
use quote::ToTokens;
use syn::parse::Parser;
use syn::{Block, Stmt};

use super::location::end_position;
use super::{HostError, HostFrontEnd, HostToken, HostTokenKind, ParsedCode, comments};

#[derive(Debug, Clone, Copy, Default)]
pub struct RustFrontEnd;

impl HostFrontEnd for RustFrontEnd {
    fn tokenize_and_parse(&self, source: &str, start: Position) -> Result<ParsedCode, HostError> {
        let stream = TokenStream::from_str(source).map_err(|err| HostError::Syntax {
            info: err.to_string(),
            location: locate(err.span(), start),
        })?;

        let mut tokens = Vec::new();
        flatten(stream.clone(), start, &mut tokens);

        let terminated_by_user = matches!(
            stream.clone().into_iter().last(),
            Some(TokenTree::Punct(p)) if p.as_char() == ';'
        );

        let mut terminated = stream;
        terminated.extend([TokenTree::Punct(Punct::new(';', Spacing::Alone))]);

        let mut stmts = Block::parse_within
            .parse2(terminated)
            .map_err(|err| HostError::Parse {
                reason: err.to_string(),
                location: locate(err.span(), start),
            })?;

        if !terminated_by_user {
            if let Some(last) = stmts.last_mut() {
                strip_terminator(last);
            }
        }

        let forms = stmts.iter().filter_map(|stmt| form(stmt, start)).collect();

        Ok(ParsedCode {
            tokens,
            forms,
            end: end_position(source, start),
        })
    }

    fn scan_comments(&self, source: &str, start: Position) -> Vec<Comment> {
        comments::scan_comments(source, start)
    }
}

/// Spans from `proc-macro2` are relative to the parsed string: 1-based line,
/// 0-based column. Call-site spans (synthetic tokens) report line 0 or 1
/// column 0 and land on the block start.
fn locate(span: Span, start: Position) -> Position {
    let lc = span.start();
    if lc.line == 0 {
        return start;
    }
    start.offset_by(lc.line as u32, lc.column as u32)
}

fn flatten(stream: TokenStream, start: Position, out: &mut Vec<HostToken>) {
    for tree in stream {
        match tree {
            TokenTree::Group(group) => {
                let delimiters = match group.delimiter() {
                    Delimiter::Parenthesis => Some(("(", ")")),
                    Delimiter::Brace => Some(("{", "}")),
                    Delimiter::Bracket => Some(("[", "]")),
                    Delimiter::None => None,
                };
                if let Some((open, _)) = delimiters {
                    out.push(HostToken::new(
                        HostTokenKind::Delimiter,
                        open,
                        locate(group.span_open(), start),
                    ));
                }
                flatten(group.stream(), start, out);
                if let Some((_, close)) = delimiters {
                    out.push(HostToken::new(
                        HostTokenKind::Delimiter,
                        close,
                        locate(group.span_close(), start),
                    ));
                }
            }
            TokenTree::Ident(ident) => out.push(HostToken::new(
                HostTokenKind::Ident,
                ident.to_string(),
                locate(ident.span(), start),
            )),
            TokenTree::Punct(punct) => out.push(HostToken::new(
                HostTokenKind::Punct,
                punct.as_char().to_string(),
                locate(punct.span(), start),
            )),
            TokenTree::Literal(lit) => out.push(HostToken::new(
                HostTokenKind::Literal,
                lit.to_string(),
                locate(lit.span(), start),
            )),
        }
    }
}

/// Drop the synthetic `;` from the last statement.
fn strip_terminator(stmt: &mut Stmt) {
    match stmt {
        Stmt::Expr(_, semi) => *semi = None,
        Stmt::Macro(mac) => mac.semi_token = None,
        Stmt::Local(_) | Stmt::Item(_) => {}
    }
}

fn form(stmt: &Stmt, start: Position) -> Option<HostForm> {
    let kind = match stmt {
        // Bare `;` between statements, including the synthetic one
        Stmt::Expr(syn::Expr::Verbatim(tokens), _) if tokens.is_empty() => return None,
        Stmt::Expr(..) => FormKind::Expr,
        Stmt::Local(_) => FormKind::Local,
        Stmt::Item(_) => FormKind::Item,
        Stmt::Macro(_) => FormKind::Macro,
    };

    let tokens = stmt.to_token_stream();
    let position = tokens
        .clone()
        .into_iter()
        .next()
        .map_or(start, |tree| locate(tree.span(), start));

    Some(HostForm {
        kind,
        text: tokens.to_string(),
        position,
    })
}
