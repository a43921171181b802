//! Comment scanner for Rust action code.
//!
//! `proc-macro2` drops comments, so they are recovered from the raw text.
//! String, raw string, and char literals are lexed only so that comment
//! markers inside them are not mistaken for comments.

use logos::{Lexer, Logos};
use pegroot_core::{Comment, CommentKind, Position};

use super::location::position_at;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Lexeme {
    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    #[regex(r#"b?"([^"\\]|\\(.|\n))*""#)]
    Str,

    #[regex(r##"b?r#*""##, raw_string)]
    RawStr,

    #[regex(r"b?'([^'\\\n]|\\[^\n][^'\n]*)'")]
    Char,

    #[regex(r"'[A-Za-z_][A-Za-z0-9_]*")]
    Lifetime,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Word,

    #[token("/")]
    Slash,

    #[regex(r#"[^A-Za-z_'"/]+"#)]
    Other,
}

/// Block comments nest in Rust.
fn block_comment(lex: &mut Lexer<Lexeme>) -> bool {
    let rest = lex.remainder().as_bytes();
    let mut depth = 1usize;
    let mut i = 0;

    while i < rest.len() {
        if rest[i..].starts_with(b"/*") {
            depth += 1;
            i += 2;
        } else if rest[i..].starts_with(b"*/") {
            depth -= 1;
            i += 2;
            if depth == 0 {
                lex.bump(i);
                return true;
            }
        } else {
            i += 1;
        }
    }

    false
}

fn raw_string(lex: &mut Lexer<Lexeme>) -> bool {
    let hashes = lex.slice().chars().filter(|&c| c == '#').count();
    let closing = format!("\"{}", "#".repeat(hashes));

    match lex.remainder().find(&closing) {
        Some(n) => {
            lex.bump(n + closing.len());
            true
        }
        None => false,
    }
}

/// Comments in `source`, where `source` starts at `start` in the grammar file.
///
/// Unlexable input (an unterminated literal or comment) is skipped; such code
/// never tokenizes anyway.
pub fn scan_comments(source: &str, start: Position) -> Vec<Comment> {
    let mut lexer = Lexeme::lexer(source);
    let mut comments = Vec::new();

    while let Some(result) = lexer.next() {
        let kind = match result {
            Ok(Lexeme::LineComment) => CommentKind::Line,
            Ok(Lexeme::BlockComment) => CommentKind::Block,
            _ => continue,
        };

        comments.push(Comment {
            kind,
            text: lexer.slice().trim_end_matches('\r').to_string(),
            position: position_at(source, lexer.span().start, start),
        });
    }

    comments
}
