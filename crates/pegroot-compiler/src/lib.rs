//! pegroot compiler: semantic analysis of PEG grammars.
//!
//! This crate proves a grammar self-consistent before code generation:
//! - `analyze` - symbol table, reference checks, action code validation
//! - `host` - host-language front-end used to check action code
//! - `diagnostics` - findings and their rendering
//!
//! ```
//! use pegroot_compiler::analyze;
//! use pegroot_core::{CodeBlock, Declaration, Expr, Grammar, Modifier};
//!
//! let grammar = Grammar::new(vec![
//!     Declaration::new("digits", (1, 1), Expr::modified(Expr::nonterminal("digit", (1, 11)), Modifier::OneOrMore))
//!         .with_code(CodeBlock::new("node.len()", (1, 19))),
//!     Declaration::new("digit", (2, 1), Expr::terminal(pegroot_core::TerminalKind::CharClass, "[0-9]")),
//! ]);
//!
//! let grammar = analyze(grammar).expect("grammar is consistent");
//! assert!(grammar.analysis.is_some());
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod analyze;
pub mod diagnostics;
pub mod host;

#[cfg(test)]
pub mod test_utils;

/// Result type for passes that produce both output and findings.
///
/// Each pass returns its typed output alongside any findings it collected.
/// Fatal errors (like recursion exhaustion) use the outer `Result`.
pub type PassResult<T> = std::result::Result<(T, Findings), Error>;

pub use analyze::{Analyzer, analyze};
pub use diagnostics::{Finding, FindingKind, Findings, FindingsPrinter, Severity};
pub use host::{HostError, HostFrontEnd, ImplicitParams, RustFrontEnd};

/// Errors that can occur during grammar analysis.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Recursion fuel exhausted (expression tree nested too deeply).
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    #[error(
        "grammar analysis failed with {} errors and {} warnings",
        .0.error_count(),
        .0.warning_count()
    )]
    AnalysisFailed(Findings),
}

impl Error {
    /// Findings of a failed analysis.
    pub fn findings(&self) -> Option<&Findings> {
        match self {
            Self::AnalysisFailed(findings) => Some(findings),
            Self::RecursionLimitExceeded => None,
        }
    }
}

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, Error>;
