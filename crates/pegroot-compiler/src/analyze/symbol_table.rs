//! Symbol table collection: one fold over the declarations.
//!
//! Pure data collection, nothing is reported here. The table is threaded by
//! value through the recursion and returned from every call.

use pegroot_core::{Combinator, Declaration, Expr, Rule, SymbolTable};

use crate::{Error, Result};

/// Collect rules, nonterminal references, and combinators, in traversal order.
///
/// `recursion_fuel` bounds expression nesting depth; `None` is unbounded.
pub fn collect(declarations: &[Declaration], recursion_fuel: Option<u32>) -> Result<SymbolTable> {
    declarations
        .iter()
        .try_fold(SymbolTable::default(), |table, decl| {
            let mut table = collect_expr(&decl.expr, table, recursion_fuel)?;
            table
                .rules
                .push(Rule::new(decl.name.clone(), decl.index, decl.code.clone()));
            Ok(table)
        })
}

fn collect_expr(expr: &Expr, table: SymbolTable, fuel: Option<u32>) -> Result<SymbolTable> {
    let fuel = match fuel {
        Some(0) => return Err(Error::RecursionLimitExceeded),
        Some(n) => Some(n - 1),
        None => None,
    };

    match expr {
        Expr::Choice { alternatives } => {
            let mut table = collect_all(alternatives, table, fuel)?;
            table.combinators.insert(Combinator::Choice);
            Ok(table)
        }
        Expr::Sequence { items } => {
            let mut table = collect_all(items, table, fuel)?;
            table.combinators.insert(Combinator::Sequence);
            Ok(table)
        }
        Expr::Primary { expr, modifier } => {
            let mut table = collect_expr(expr, table, fuel)?;
            if let Some(modifier) = modifier {
                table.combinators.insert((*modifier).into());
            }
            Ok(table)
        }
        Expr::Nonterminal { name, index } => {
            let mut table = table;
            table.nts.entry(name.clone()).or_default().push(*index);
            Ok(table)
        }
        Expr::Terminal { kind, .. } => {
            let mut table = table;
            table.combinators.insert((*kind).into());
            Ok(table)
        }
    }
}

fn collect_all(exprs: &[Expr], table: SymbolTable, fuel: Option<u32>) -> Result<SymbolTable> {
    exprs
        .iter()
        .try_fold(table, |table, expr| collect_expr(expr, table, fuel))
}
