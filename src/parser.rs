//! Wraps the lalrpop-generated grammar (`grammer.lalrpop`) with
//! caret-annotated error reporting, for a location-pointer style a
//! collaborating HTTP façade can render directly.

use lalrpop_util::lalrpop_mod;
use lalrpop_util::ParseError as LalrpopError;

use crate::ast::{Formula, Term};
use crate::error::PresburgerError;

lalrpop_mod!(
    #[allow(clippy::all)]
    pub grammer
);

/// Errors raised from inside a grammar action, as opposed to a syntax
/// error the generated parser detects on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// An integer literal didn't fit in [`crate::types::Coeff`].
    IntegerOverflow(String),
}

impl std::fmt::Display for GrammarError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            GrammarError::IntegerOverflow(s) => {
                write!(f, "integer literal '{}' does not fit in a 64-bit coefficient", s)
            }
        }
    }
}

/// Parse formula text into a [`Formula`] tree.
pub fn parse(text: &str) -> Result<Formula, PresburgerError> {
    grammer::FormulaParser::new()
        .parse(text)
        .map_err(|e| to_presburger_error(text, e))
}

/// Parse a bare term. Exists so callers (and tests) can exercise the term
/// grammar in isolation, directly from `tests/test_parser.rs`.
pub fn parse_term(text: &str) -> Result<Term, PresburgerError> {
    grammer::SumParser::new()
        .parse(text)
        .map_err(|e| to_presburger_error(text, e))
}

fn to_presburger_error<T: std::fmt::Debug>(
    text: &str,
    e: LalrpopError<usize, T, GrammarError>,
) -> PresburgerError {
    match e {
        LalrpopError::InvalidToken { location } => located(text, location, "invalid token"),
        LalrpopError::UnrecognizedEOF { location, expected } => located(
            text,
            location,
            &format!("unexpected end of input, expected one of: {}", expected.join(", ")),
        ),
        LalrpopError::UnrecognizedToken {
            token: (l, tok, _),
            expected,
        } => located(
            text,
            l,
            &format!(
                "unexpected token {:?}, expected one of: {}",
                tok,
                expected.join(", ")
            ),
        ),
        LalrpopError::ExtraToken { token: (l, tok, _) } => {
            located(text, l, &format!("unexpected extra token {:?}", tok))
        }
        LalrpopError::User { error } => located(text, text.len(), &error.to_string()),
    }
}

/// Build a [`PresburgerError::Parse`] with a 1-indexed line/column and a
/// caret pointing at `offset` within `text`.
fn located(text: &str, offset: usize, message: &str) -> PresburgerError {
    let offset = offset.min(text.len());
    let mut line = 1;
    let mut col: usize = 1;
    let mut line_start = 0;
    for (i, ch) in text.char_indices() {
        if i >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
            line_start = i + 1;
        } else {
            col += 1;
        }
    }
    let line_text = text[line_start..].lines().next().unwrap_or("");
    let caret = format!("{}^", " ".repeat(col.saturating_sub(1)));
    let context = format!("{}\n{}\n{}", message, line_text, caret);
    PresburgerError::Parse {
        line,
        column: col,
        context,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_atomic_inequality() {
        let f = parse("x <= y + 1").expect("should parse");
        assert_eq!(f, Formula::le(Term::var("x"), Term::add(Term::var("y"), Term::One)));
    }

    #[test]
    fn parses_quantifiers_and_synonyms() {
        assert!(parse("E x . x <= y").is_ok());
        assert!(parse("EX x . x <= y").is_ok());
        assert!(parse("A x . x <= y").is_ok());
        assert!(parse("ALL x . x <= y").is_ok());
    }

    #[test]
    fn juxtaposed_coefficient() {
        let t = parse_term("3x").expect("should parse");
        assert_eq!(t, Term::mult(3, "x"));
    }

    #[test]
    fn unary_minus_on_constant() {
        let t = parse_term("-3").expect("should parse");
        assert_eq!(t, Term::sub(Term::Zero, Term::Const(3)));
    }

    #[test]
    fn precedence_not_and_or() {
        // NOT binds tighter than AND, which binds tighter than OR.
        let f = parse("NOT x <= y AND y <= z OR z <= x").expect("should parse");
        let expected = Formula::or(
            Formula::and(
                Formula::not(Formula::le(Term::var("x"), Term::var("y"))),
                Formula::le(Term::var("y"), Term::var("z")),
            ),
            Formula::le(Term::var("z"), Term::var("x")),
        );
        assert_eq!(f, expected);
    }

    #[test]
    fn reports_location_on_failure() {
        let err = parse("x <= ").unwrap_err();
        match err {
            PresburgerError::Parse { line, .. } => assert_eq!(line, 1),
            other => panic!("expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_nonlinear_term() {
        // "x y" juxtaposes two identifiers, not number-then-variable; not a
        // valid term under this grammar.
        assert!(parse_term("x y").is_err());
    }
}
