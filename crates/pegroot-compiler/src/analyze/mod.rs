//! Semantic analysis of a grammar tree.
//!
//! Stages: header code → collect → normalize → no-reduction → unused-rule → rule code.
//! Every stage appends to one findings accumulator. Analysis succeeds only
//! when that accumulator ends up empty, warnings included.

mod checks;
mod code;
mod dump;
mod normalize;
mod symbol_table;

#[cfg(test)]
mod normalize_tests;

use pegroot_core::{Grammar, SymbolTable};

use crate::host::{HostFrontEnd, ImplicitParams, RustFrontEnd};
use crate::{Error, PassResult, Result};

pub use checks::{check_code, check_header, check_no_reductions, check_unused_rules};
pub use code::{CodeValidator, Outcome};
pub use dump::dump_symbol_table;
pub use normalize::normalize;
pub use symbol_table::collect;

const DEFAULT_RECURSION_FUEL: u32 = 4096;

/// Grammar analyzer.
///
/// Create with [`new`](Self::new) (or [`default`](Self::default) for Rust
/// action code), optionally configure, then call [`analyze`](Self::analyze).
pub struct Analyzer {
    front_end: Box<dyn HostFrontEnd>,
    implicit_params: ImplicitParams,
    recursion_fuel: Option<u32>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(RustFrontEnd)
    }
}

impl Analyzer {
    pub fn new(front_end: impl HostFrontEnd + 'static) -> Self {
        Self {
            front_end: Box::new(front_end),
            implicit_params: ImplicitParams::default(),
            recursion_fuel: Some(DEFAULT_RECURSION_FUEL),
        }
    }

    /// Replace the implicit parameter names detected in action code.
    pub fn with_implicit_params<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Self {
        self.implicit_params = ImplicitParams::new(names);
        self
    }

    /// Set the expression nesting limit. None = infinite.
    ///
    /// Returns [`Error::RecursionLimitExceeded`] from analysis when exhausted.
    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.recursion_fuel = limit;
        self
    }

    pub fn implicit_params(&self) -> &ImplicitParams {
        &self.implicit_params
    }

    /// Collected and normalized table, without any checks.
    pub fn symbol_table(&self, grammar: &Grammar) -> Result<SymbolTable> {
        let table = collect(&grammar.declarations, self.recursion_fuel)?;
        Ok(normalize(table))
    }

    /// Run every pass and return the grammar alongside all findings.
    ///
    /// The grammar carries whatever could be annotated; blocks that failed
    /// validation are left as they were.
    pub fn run(&self, grammar: Grammar) -> PassResult<Grammar> {
        let validator = CodeValidator::new(self.front_end.as_ref(), &self.implicit_params);

        let (header, findings) = check_header(&validator, grammar.code.clone());

        let table = self.symbol_table(&grammar)?;
        tracing::debug!(
            rules = table.rules.len(),
            nonterminals = table.nts.len(),
            combinators = table.combinators.len(),
            "symbol table collected"
        );

        let (table, findings) = check_no_reductions(table, findings);
        let (table, findings) = check_unused_rules(table, findings);
        let (table, findings) = check_code(&validator, table, findings);

        tracing::debug!(
            errors = findings.error_count(),
            warnings = findings.warning_count(),
            "analysis finished"
        );

        let grammar = Grammar {
            code: header,
            analysis: Some(table),
            ..grammar
        };
        Ok((grammar, findings))
    }

    /// Analyze a grammar.
    ///
    /// Any finding, warning or error, fails the analysis with
    /// [`Error::AnalysisFailed`]; the caller decides per severity what is fatal.
    pub fn analyze(&self, grammar: Grammar) -> Result<Grammar> {
        let (grammar, findings) = self.run(grammar)?;
        if !findings.is_empty() {
            return Err(Error::AnalysisFailed(findings));
        }
        Ok(grammar)
    }
}

/// Analyze with Rust action code and default settings.
pub fn analyze(grammar: Grammar) -> Result<Grammar> {
    Analyzer::default().analyze(grammar)
}
