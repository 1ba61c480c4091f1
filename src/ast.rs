//! AST module
//!
//! Defines the syntax tree produced by the parser (`grammer.lalrpop`):
//! terms built from `Zero`/`One`/`Const`/`Var`/`Mult`/`Add`/`Sub`, and
//! formulas over the comparisons, connectives, and quantifiers of
//! Presburger arithmetic. The normalizer (`crate::normalize`) rewrites a
//! `Formula` down to the canonical subset `LessEqual`/`Not`/`Or`/`Exists`.
//!
//! For example,
//!
//! 1) `A y . y < y + 1`
//! 2) `0 <= x AND x <= 10`
//! 3) `A y . (E x . x <= y -> x + 1 <= y)`
//! 4) `((P -> Q) -> P) -> Q`

use crate::types::{Coeff, VarName};
use std::fmt;

/// A base numerical term.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Term {
    /// The constant `0`.
    Zero,
    /// The constant `1`.
    One,
    /// An arbitrary integer literal.
    Const(Coeff),
    /// A bare variable occurrence (implicit coefficient 1).
    Var(VarName),
    /// `n * var`
    Mult(Coeff, VarName),
    /// `t1 + t2`
    Add(Box<Term>, Box<Term>),
    /// `t1 - t2`
    Sub(Box<Term>, Box<Term>),
}

impl Term {
    pub fn var(name: &str) -> Self {
        Term::Var(name.to_string())
    }

    pub fn mult(n: Coeff, name: &str) -> Self {
        Term::Mult(n, name.to_string())
    }

    pub fn add(t1: Self, t2: Self) -> Self {
        Term::Add(Box::new(t1), Box::new(t2))
    }

    pub fn sub(t1: Self, t2: Self) -> Self {
        Term::Sub(Box::new(t1), Box::new(t2))
    }

    /// Negation, expressed the way the grammar desugars unary minus:
    /// `-t` parses as `0 - t`.
    pub fn neg(t: Self) -> Self {
        Term::Sub(Box::new(Term::Zero), Box::new(t))
    }

    /// An integer literal, normalized to `Zero`/`One`/`Const`.
    pub fn lit(n: Coeff) -> Self {
        match n {
            0 => Term::Zero,
            1 => Term::One,
            _ => Term::Const(n),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Term::Zero => write!(f, "0"),
            Term::One => write!(f, "1"),
            Term::Const(c) => write!(f, "{}", c),
            Term::Var(v) => write!(f, "{}", v),
            Term::Mult(n, v) => write!(f, "{}{}", n, v),
            Term::Add(l, r) => write!(f, "({} + {})", l, r),
            Term::Sub(l, r) => write!(f, "({} - {})", l, r),
        }
    }
}

/// A Presburger formula, prior to normalization.
///
/// `Eq`, `Less`, `Greater`, `GreaterEqual`, `And`, `Implies`, `Iff`, and
/// `ForAll` are all shorthand eliminated by `crate::normalize::normalize`;
/// only `LessEqual`, `Not`, `Or`, and `Exists` survive normalization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Formula {
    LessEqual(Box<Term>, Box<Term>),
    Eq(Box<Term>, Box<Term>),
    Less(Box<Term>, Box<Term>),
    Greater(Box<Term>, Box<Term>),
    GreaterEqual(Box<Term>, Box<Term>),
    Not(Box<Formula>),
    And(Box<Formula>, Box<Formula>),
    Or(Box<Formula>, Box<Formula>),
    Implies(Box<Formula>, Box<Formula>),
    Iff(Box<Formula>, Box<Formula>),
    Exists(VarName, Box<Formula>),
    Forall(VarName, Box<Formula>),
}

impl Formula {
    pub fn le(t1: Term, t2: Term) -> Self {
        Formula::LessEqual(Box::new(t1), Box::new(t2))
    }

    pub fn eq(t1: Term, t2: Term) -> Self {
        Formula::Eq(Box::new(t1), Box::new(t2))
    }

    pub fn less(t1: Term, t2: Term) -> Self {
        Formula::Less(Box::new(t1), Box::new(t2))
    }

    pub fn greater(t1: Term, t2: Term) -> Self {
        Formula::Greater(Box::new(t1), Box::new(t2))
    }

    pub fn ge(t1: Term, t2: Term) -> Self {
        Formula::GreaterEqual(Box::new(t1), Box::new(t2))
    }

    pub fn not(p: Self) -> Self {
        Formula::Not(Box::new(p))
    }

    pub fn and(p: Self, q: Self) -> Self {
        Formula::And(Box::new(p), Box::new(q))
    }

    pub fn or(p: Self, q: Self) -> Self {
        Formula::Or(Box::new(p), Box::new(q))
    }

    pub fn implies(p: Self, q: Self) -> Self {
        Formula::Implies(Box::new(p), Box::new(q))
    }

    pub fn iff(p: Self, q: Self) -> Self {
        Formula::Iff(Box::new(p), Box::new(q))
    }

    pub fn exists(v: &str, p: Self) -> Self {
        Formula::Exists(v.to_string(), Box::new(p))
    }

    pub fn forall(v: &str, p: Self) -> Self {
        Formula::Forall(v.to_string(), Box::new(p))
    }

    /// The set of free variables occurring in the formula.
    ///
    /// Used by the macro preprocessor to check that a macro's right-hand
    /// side mentions exactly its declared parameters, and by the
    /// normalizer to drop `Exists(v, ..)` quantifiers over a `v` that does
    /// not occur free in the body.
    pub fn free_vars(&self) -> std::collections::BTreeSet<VarName> {
        fn go(f: &Formula, out: &mut std::collections::BTreeSet<VarName>) {
            match f {
                Formula::LessEqual(l, r)
                | Formula::Eq(l, r)
                | Formula::Less(l, r)
                | Formula::Greater(l, r)
                | Formula::GreaterEqual(l, r) => {
                    term_free_vars(l, out);
                    term_free_vars(r, out);
                }
                Formula::Not(p) => go(p, out),
                Formula::And(p, q)
                | Formula::Or(p, q)
                | Formula::Implies(p, q)
                | Formula::Iff(p, q) => {
                    go(p, out);
                    go(q, out);
                }
                Formula::Exists(v, p) | Formula::Forall(v, p) => {
                    let mut inner = std::collections::BTreeSet::new();
                    go(p, &mut inner);
                    inner.remove(v);
                    out.extend(inner);
                }
            }
        }
        let mut out = std::collections::BTreeSet::new();
        go(self, &mut out);
        out
    }
}

/// Collect the variables occurring in a term into `out`. Shared by
/// [`Formula::free_vars`] and [`CoreFormula::free_vars`].
fn term_free_vars(t: &Term, out: &mut std::collections::BTreeSet<VarName>) {
    match t {
        Term::Zero | Term::One | Term::Const(_) => {}
        Term::Var(v) => {
            out.insert(v.clone());
        }
        Term::Mult(_, v) => {
            out.insert(v.clone());
        }
        Term::Add(l, r) | Term::Sub(l, r) => {
            term_free_vars(l, out);
            term_free_vars(r, out);
        }
    }
}

/// The canonical form normalization rewrites every [`Formula`] into:
/// only `LessEqual`, `Not`, `Or`, and `Exists` survive.
/// Kept as its own closed tagged-variant — rather than a `Formula` value
/// that merely happens to avoid certain variants — so the automaton
/// builder's match arms are exhaustive over exactly the node set it needs
/// to handle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CoreFormula {
    LessEqual(Box<Term>, Box<Term>),
    Not(Box<CoreFormula>),
    Or(Box<CoreFormula>, Box<CoreFormula>),
    Exists(VarName, Box<CoreFormula>),
}

impl CoreFormula {
    pub fn le(t1: Term, t2: Term) -> Self {
        CoreFormula::LessEqual(Box::new(t1), Box::new(t2))
    }

    pub fn not(p: Self) -> Self {
        CoreFormula::Not(Box::new(p))
    }

    pub fn or(p: Self, q: Self) -> Self {
        CoreFormula::Or(Box::new(p), Box::new(q))
    }

    pub fn exists(v: &str, p: Self) -> Self {
        CoreFormula::Exists(v.to_string(), Box::new(p))
    }

    /// `And` is not a node of the canonical form; it is always expressed
    /// as `Not(Or(Not(p), Not(q)))`.
    pub fn and(p: Self, q: Self) -> Self {
        Self::not(Self::or(Self::not(p), Self::not(q)))
    }

    pub fn free_vars(&self) -> std::collections::BTreeSet<VarName> {
        fn go(f: &CoreFormula, out: &mut std::collections::BTreeSet<VarName>) {
            match f {
                CoreFormula::LessEqual(l, r) => {
                    term_free_vars(l, out);
                    term_free_vars(r, out);
                }
                CoreFormula::Not(p) => go(p, out),
                CoreFormula::Or(p, q) => {
                    go(p, out);
                    go(q, out);
                }
                CoreFormula::Exists(v, p) => {
                    let mut inner = std::collections::BTreeSet::new();
                    go(p, &mut inner);
                    inner.remove(v);
                    out.extend(inner);
                }
            }
        }
        let mut out = std::collections::BTreeSet::new();
        go(self, &mut out);
        out
    }
}

impl fmt::Display for CoreFormula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CoreFormula::LessEqual(l, r) => write!(f, "({} <= {})", l, r),
            CoreFormula::Not(p) => write!(f, "(NOT {})", p),
            CoreFormula::Or(p, q) => write!(f, "({} OR {})", p, q),
            CoreFormula::Exists(v, p) => write!(f, "(E {} . {})", v, p),
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Formula::LessEqual(l, r) => write!(f, "({} <= {})", l, r),
            Formula::Eq(l, r) => write!(f, "({} = {})", l, r),
            Formula::Less(l, r) => write!(f, "({} < {})", l, r),
            Formula::Greater(l, r) => write!(f, "({} > {})", l, r),
            Formula::GreaterEqual(l, r) => write!(f, "({} >= {})", l, r),
            Formula::Not(p) => write!(f, "(NOT {})", p),
            Formula::And(p, q) => write!(f, "({} AND {})", p, q),
            Formula::Or(p, q) => write!(f, "({} OR {})", p, q),
            Formula::Implies(p, q) => write!(f, "({} -> {})", p, q),
            Formula::Iff(p, q) => write!(f, "({} <-> {})", p, q),
            Formula::Exists(v, p) => write!(f, "(E {} . {})", v, p),
            Formula::Forall(v, p) => write!(f, "(A {} . {})", v, p),
        }
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn term_display() {
        let t = Term::add(Term::mult(3, "x"), Term::Const(-2));
        assert_eq!(t.to_string(), "(3x + -2)");
    }

    #[test]
    fn free_vars_basic() {
        let f = Formula::exists("x", Formula::eq(Term::var("x"), Term::var("y")));
        let fv = f.free_vars();
        assert!(fv.contains("y"));
        assert!(!fv.contains("x"));
    }

    #[test]
    fn free_vars_shared_var_in_two_branches() {
        let f = Formula::and(
            Formula::le(Term::var("x"), Term::var("y")),
            Formula::le(Term::var("y"), Term::var("z")),
        );
        let fv = f.free_vars();
        assert_eq!(fv.len(), 3);
    }

    #[test]
    fn formula_eq_structural() {
        let a = Formula::le(Term::var("x"), Term::Const(3));
        let b = Formula::le(Term::var("x"), Term::Const(3));
        let c = Formula::le(Term::var("x"), Term::Const(4));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
