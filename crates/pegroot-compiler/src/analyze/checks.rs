//! Checker passes over the normalized table.
//!
//! Each pass takes and returns `(table, findings)`; findings only ever grow.

use std::collections::HashSet;

use pegroot_core::{CodeBlock, SymbolTable};

use super::code::{CodeValidator, Outcome};
use crate::diagnostics::{Finding, Findings};

pub type Checked = (SymbolTable, Findings);

/// Every referenced name must have a rule. One finding per name.
pub fn check_no_reductions(table: SymbolTable, mut findings: Findings) -> Checked {
    let declared: HashSet<&str> = table.rules.iter().map(|r| r.name.as_str()).collect();

    for (name, occurrences) in &table.nts {
        if !declared.contains(name.as_str()) {
            findings.push(Finding::no_reduction(name.clone(), occurrences.clone()));
        }
    }

    (table, findings)
}

/// Every rule but the entry point must be referenced somewhere.
pub fn check_unused_rules(table: SymbolTable, mut findings: Findings) -> Checked {
    for rule in table.rules.iter().skip(1) {
        if !table.is_referenced(&rule.name) {
            findings.push(Finding::unused_rule(rule.name.clone(), rule.index));
        }
    }

    (table, findings)
}

/// Validate each rule's action code, annotating the valid ones in place.
///
/// Failures are appended after the findings passed in, in rule order.
pub fn check_code(
    validator: &CodeValidator<'_>,
    mut table: SymbolTable,
    mut findings: Findings,
) -> Checked {
    for rule in &mut table.rules {
        match validator.validate(rule.code.as_ref()) {
            Outcome::Unchanged => {}
            Outcome::Annotated(code) => rule.code = Some(code),
            Outcome::Failed(finding) => findings.push(finding),
        }
    }

    (table, findings)
}

/// Validate the grammar header code. Invalid code is returned unchanged.
pub fn check_header(
    validator: &CodeValidator<'_>,
    code: Option<CodeBlock>,
) -> (Option<CodeBlock>, Findings) {
    match validator.validate(code.as_ref()) {
        Outcome::Unchanged => (code, Findings::new()),
        Outcome::Annotated(annotated) => (Some(annotated), Findings::new()),
        Outcome::Failed(finding) => (code, Findings::new().with(finding)),
    }
}
