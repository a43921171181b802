//! Deterministic ordering for the collected table.

use pegroot_core::SymbolTable;

/// Sort rules by declaration position and each reference list by occurrence.
///
/// Reference groups themselves are ordered by their first occurrence. All
/// sorts are stable, so rules sharing a position keep declaration order.
pub fn normalize(mut table: SymbolTable) -> SymbolTable {
    table.rules.sort_by_key(|rule| rule.index);
    for occurrences in table.nts.values_mut() {
        occurrences.sort();
    }
    table.nts.sort_by(|_, a, _, b| a.first().cmp(&b.first()));
    table
}
