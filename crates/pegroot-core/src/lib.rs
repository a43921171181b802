#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for pegroot grammars.
//!
//! Two layers:
//! - **Grammar tree**: declarations and expressions as produced by the surface parser
//! - **Symbol table**: rules, nonterminal references, and combinators collected by analysis
//!
//! Everything is `serde`-serializable so the tree can cross process boundaries
//! between the surface parser, the analyzer, and code generation.

mod grammar;
mod position;
mod symbols;


pub use grammar::{
    CodeAnnotations, CodeBlock, Comment, CommentKind, Declaration, Expr, FormKind, Grammar,
    HostForm, Modifier, TerminalKind,
};
pub use position::Position;
pub use symbols::{Combinator, NonterminalIndex, Rule, SymbolTable};
