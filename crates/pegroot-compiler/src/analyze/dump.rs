//! Text dump of a symbol table, for tests and debugging.

use std::fmt::Write;

use pegroot_core::{CodeBlock, SymbolTable};

pub fn dump_symbol_table(table: &SymbolTable) -> String {
    let mut out = String::new();
    format_symbol_table(table, &mut out).expect("String write never fails");
    out
}

fn format_symbol_table(table: &SymbolTable, w: &mut impl Write) -> std::fmt::Result {
    writeln!(w, "rules")?;
    for rule in &table.rules {
        write!(w, "  {} {}", rule.name, rule.index)?;
        if let Some(code) = &rule.code {
            format_code(code, w)?;
        }
        writeln!(w)?;
    }

    writeln!(w, "references")?;
    for (name, occurrences) in &table.nts {
        write!(w, "  {name}")?;
        for pos in occurrences {
            write!(w, " {pos}")?;
        }
        writeln!(w)?;
    }

    write!(w, "combinators")?;
    for combinator in &table.combinators {
        write!(w, " {combinator}")?;
    }
    Ok(())
}

fn format_code(code: &CodeBlock, w: &mut impl Write) -> std::fmt::Result {
    if code.identity {
        return write!(w, " (identity)");
    }

    write!(w, " {{ {} }}", code.code.trim())?;

    let Some(annotations) = &code.annotations else {
        return Ok(());
    };
    let args: Vec<_> = annotations.used_args.iter().map(String::as_str).collect();
    write!(w, " uses=[{}]", args.join(","))?;
    if !annotations.comments.is_empty() {
        write!(w, " comments={}", annotations.comments.len())?;
    }
    Ok(())
}
