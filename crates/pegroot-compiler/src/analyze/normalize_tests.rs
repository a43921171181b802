use indexmap::IndexMap;
use pegroot_core::{Position, Rule, SymbolTable};

use super::{dump_symbol_table, normalize};

fn pos(line: u32, column: u32) -> Position {
    Position::new(line, column)
}

#[test]
fn sorts_rules_by_index() {
    let table = SymbolTable {
        rules: vec![
            Rule::new("c", pos(3, 1), None),
            Rule::new("a", pos(1, 1), None),
            Rule::new("b", pos(2, 1), None),
        ],
        ..Default::default()
    };

    let table = normalize(table);

    let names: Vec<_> = table.rules.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert_eq!(table.entry_point().map(|r| r.name.as_str()), Some("a"));
}

#[test]
fn sorts_occurrences_and_groups() {
    let mut nts = IndexMap::new();
    nts.insert("y".to_string(), vec![pos(4, 2), pos(2, 8)]);
    nts.insert("x".to_string(), vec![pos(7, 1), pos(1, 5), pos(3, 3)]);
    let table = SymbolTable {
        nts,
        ..Default::default()
    };

    let table = normalize(table);

    insta::assert_snapshot!(dump_symbol_table(&table), @r"
    rules
    references
      x 1:5 3:3 7:1
      y 2:8 4:2
    combinators
    ");
}

#[test]
fn is_idempotent() {
    let table = SymbolTable {
        rules: vec![
            Rule::new("b", pos(2, 1), None),
            Rule::new("a", pos(1, 1), None),
        ],
        nts: [("b".to_string(), vec![pos(1, 9), pos(1, 6)])]
            .into_iter()
            .collect(),
        ..Default::default()
    };

    let once = normalize(table);
    let twice = normalize(once.clone());

    assert_eq!(once, twice);
    assert_eq!(dump_symbol_table(&once), dump_symbol_table(&twice));
}
