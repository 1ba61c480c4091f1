//! Integration tests for the grammar, driven straight against the
//! generated parsers.

use presburger_automata::ast::{Formula, Term};
use presburger_automata::parser;

#[test]
fn test_numlit() {
    let cases = vec!["222", "(222)", "((((222))))"];
    for c in cases {
        assert!(parser::parse_term(c).is_ok(), "case: {}", c);
    }
    assert!(parser::parse_term("((22)").is_err());
}

#[test]
fn test_var() {
    let cases = vec!["x", "(x)", "((((y))))", "2 * z", "2z"];
    for c in cases {
        assert!(parser::parse_term(c).is_ok(), "case: {}", c);
    }
    // negative tests:
    assert!(parser::parse_term("x z").is_err()); // non-linear
}

#[test]
fn test_sum() {
    let cases = vec!["x+1", "(x) + 1", "y + x + 1", "3 * x", "(-1) * x + -2", "x + -5 * y + z"];
    for c in cases {
        assert!(parser::parse_term(c).is_ok(), "case: {}", c);
    }
}

#[test]
fn test_good_atoms() {
    let cases = vec![
        "0 <= 1",
        "x+1 = y",
        "x <= y + 1",
        "y + x + 1 + z <= 0",
        "2 * x + 3 * y <= 0",
        "(-1) * x = 0",
        "x >= y",
        "x > y",
        "x < y",
    ];
    for c in cases {
        assert!(parser::parse(c).is_ok(), "case: {}", c);
    }
}

#[test]
fn test_bad_atoms() {
    let cases = vec![
        "x+1 ? y",     // ? is not a relation
        "(x + 1) * y", // non-linear
    ];
    for c in cases {
        assert!(parser::parse(c).is_err(), "case: {}", c);
    }
}

#[test]
fn test_pred() {
    let cases = vec![
        "NOT x <= y",
        "x <= y OR y <= x",
        "P -> Q",
        "x <= y OR NOT x <= y", // law of excluded middle
        "NOT (x <= y OR x <= z) <-> NOT x <= y AND NOT x <= z", // De Morgan
        "((x <= y -> x <= z) -> x <= y) -> x <= y",             // Peirce's law
        "A y . E x . x = y OR x <= y",
        "A y . x <= y -> x <= y + 1",
        "(E x . 1 <= x) AND (A y . 0 <= y AND 0 = y)",
    ];
    for c in cases {
        assert!(parser::parse(c).is_ok(), "case: {}", c);
    }
    // negative test: a bare numeral is not a formula
    assert!(parser::parse("5 -> x").is_err());
}

#[test]
fn parse_large_literal() {
    let t = parser::parse_term("9223372036854775").expect("should parse");
    assert_eq!(t, Term::Const(9223372036854775));
}

#[test]
fn overflowing_literal_reports_error() {
    // larger than i64::MAX
    let err = parser::parse_term("99999999999999999999999999999");
    assert!(err.is_err());
}

#[test]
fn quantifier_synonyms_parse_identically() {
    let a = parser::parse("E x . x <= y").unwrap();
    let b = parser::parse("EX x . x <= y").unwrap();
    assert_eq!(a, b);
    let c = parser::parse("A x . x <= y").unwrap();
    let d = parser::parse("ALL x . x <= y").unwrap();
    assert_eq!(c, d);
}

#[test]
fn display_roundtrips_through_reparse_structurally() {
    let f = Formula::exists("x", Formula::le(Term::var("x"), Term::Const(3)));
    assert_eq!(parser::parse(&format!("E x . {}", f)).is_ok(), true);
}
