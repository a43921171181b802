use indoc::indoc;
use pegroot_core::{FormKind, Position};

use super::{HostError, HostFrontEnd, HostTokenKind, ImplicitParams, RustFrontEnd};

fn parse(source: &str, start: Position) -> super::ParsedCode {
    RustFrontEnd
        .tokenize_and_parse(source, start)
        .unwrap_or_else(|err| panic!("expected `{source}` to parse: {err}"))
}

#[test]
fn single_expression() {
    let parsed = parse("node", Position::new(3, 12));

    assert_eq!(parsed.tokens.len(), 1);
    assert_eq!(parsed.tokens[0].kind, HostTokenKind::Ident);
    assert_eq!(parsed.tokens[0].text, "node");
    assert_eq!(parsed.tokens[0].position, Position::new(3, 12));

    assert_eq!(parsed.forms.len(), 1);
    assert_eq!(parsed.forms[0].kind, FormKind::Expr);
    assert_eq!(parsed.forms[0].text, "node");
    assert_eq!(parsed.forms[0].position, Position::new(3, 12));

    assert_eq!(parsed.end, Position::new(3, 16));
}

#[test]
fn token_positions_shift_on_first_line_only() {
    let parsed = parse("node\n  + idx", Position::new(7, 30));

    let positions: Vec<_> = parsed.tokens.iter().map(|t| t.position).collect();
    assert_eq!(
        positions,
        vec![
            Position::new(7, 30),
            Position::new(8, 3),
            Position::new(8, 5),
        ]
    );
}

#[test]
fn statement_list() {
    let source = indoc! {"
        let text = node.to_string();
        text.len()
    "};
    let parsed = parse(source, Position::new(5, 20));

    let kinds: Vec<_> = parsed.forms.iter().map(|f| f.kind).collect();
    assert_eq!(kinds, vec![FormKind::Local, FormKind::Expr]);
    assert_eq!(parsed.forms[0].position, Position::new(5, 20));
    assert_eq!(parsed.forms[1].position, Position::new(6, 1));
    assert!(parsed.forms[1].text.contains("len"));
    assert!(!parsed.forms[1].text.ends_with(';'));
}

#[test]
fn user_terminator_is_kept() {
    let parsed = parse("node;", Position::new(1, 1));

    assert_eq!(parsed.forms.len(), 1);
    assert!(parsed.forms[0].text.ends_with(';'));
}

#[test]
fn block_like_tail_expression() {
    let parsed = parse("if idx > 0 { node } else { None }", Position::new(1, 1));

    assert_eq!(parsed.forms.len(), 1);
    assert_eq!(parsed.forms[0].kind, FormKind::Expr);
}

#[test]
fn macro_form() {
    let parsed = parse(r#"format!("{}@{}", node, idx)"#, Position::new(2, 8));

    assert_eq!(parsed.forms.len(), 1);
    assert_eq!(parsed.forms[0].kind, FormKind::Macro);
}

#[test]
fn item_form() {
    let parsed = parse("fn helper(x: u32) -> u32 { x + 1 }", Position::new(1, 1));

    assert_eq!(parsed.forms.len(), 1);
    assert_eq!(parsed.forms[0].kind, FormKind::Item);
}

#[test]
fn empty_code_has_no_forms() {
    let parsed = parse("", Position::new(1, 1));
    assert!(parsed.tokens.is_empty());
    assert!(parsed.forms.is_empty());
}

#[test]
fn group_delimiters_are_tokens() {
    let parsed = parse("(node, [idx])", Position::new(1, 1));

    let texts: Vec<_> = parsed.tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["(", "node", ",", "[", "idx", "]", ")"]);
    assert_eq!(parsed.tokens[0].kind, HostTokenKind::Delimiter);
}

#[test]
fn unterminated_string_is_syntax_error() {
    let err = RustFrontEnd
        .tokenize_and_parse(r#"node + "open"#, Position::new(4, 10))
        .unwrap_err();

    assert!(matches!(err, HostError::Syntax { .. }), "{err:?}");
    assert_eq!(err.location().line, 4);
}

#[test]
fn unbalanced_delimiter_is_syntax_error() {
    let err = RustFrontEnd
        .tokenize_and_parse("(node", Position::new(2, 1))
        .unwrap_err();

    assert!(matches!(err, HostError::Syntax { .. }), "{err:?}");
}

#[test]
fn malformed_statement_is_parse_error() {
    let err = RustFrontEnd
        .tokenize_and_parse("let = node", Position::new(9, 4))
        .unwrap_err();

    assert!(matches!(err, HostError::Parse { .. }), "{err:?}");
    assert_eq!(err.location().line, 9);
}

#[test]
fn missing_separator_is_parse_error() {
    let err = RustFrontEnd
        .tokenize_and_parse("node idx", Position::new(1, 1))
        .unwrap_err();

    assert!(matches!(err, HostError::Parse { .. }), "{err:?}");
}

#[test]
fn implicit_params_from_tokens() {
    let params = ImplicitParams::default();
    assert_eq!(params.iter().collect::<Vec<_>>(), vec!["idx", "node"]);

    let parsed = parse("node.len()", Position::new(1, 1));
    let used: Vec<_> = params.used_in(&parsed.tokens).into_iter().collect();
    assert_eq!(used, vec!["node"]);

    let parsed = parse("(idx, node, node)", Position::new(1, 1));
    let used: Vec<_> = params.used_in(&parsed.tokens).into_iter().collect();
    assert_eq!(used, vec!["idx", "node"]);

    let parsed = parse(r#""node idx""#, Position::new(1, 1));
    assert!(params.used_in(&parsed.tokens).is_empty());
}

#[test]
fn comments_come_from_scanner() {
    let comments = RustFrontEnd.scan_comments("node // keep", Position::new(2, 5));

    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].text, "// keep");
    assert_eq!(comments[0].position, Position::new(2, 10));
}

#[test]
fn string_with_line_continuation_has_no_comments() {
    let source = "\"abc\\\n/* inside */\"";

    let parsed = RustFrontEnd
        .tokenize_and_parse(source, Position::new(1, 1))
        .unwrap();

    assert_eq!(parsed.forms.len(), 1);
    assert_eq!(parsed.forms[0].kind, FormKind::Expr);
    assert!(RustFrontEnd.scan_comments(source, Position::new(1, 1)).is_empty());
}
