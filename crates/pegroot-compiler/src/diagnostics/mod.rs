//! Findings produced by grammar analysis.
//!
//! Analysis never stops at the first problem: every pass appends to one
//! [`Findings`] accumulator and the caller gets the whole list at the end.

mod collection;
mod finding;
mod printer;


pub use collection::Findings;
pub use finding::{Finding, FindingKind, Severity};
pub use printer::FindingsPrinter;
