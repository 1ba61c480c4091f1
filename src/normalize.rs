//! Normalizer: rewrites a [`Formula`] into a [`CoreFormula`]
//! using only `LessEqual`, `Not`, `Or`, `Exists`, applying the fixpoint
//! simplifications afterward (double-negation elimination, dropping
//! existentials over variables with no free occurrence, pushing
//! existentials through disjunction).

use crate::ast::{CoreFormula, Formula};
use std::collections::BTreeSet;

/// Normalize `formula` into canonical form.
pub fn normalize(formula: &Formula) -> CoreFormula {
    let mut core = to_core(formula);
    loop {
        let next = simplify_once(&core);
        if next == core {
            log::trace!("normalized tree: {:?}", next);
            return next;
        }
        core = next;
    }
}

fn to_core(f: &Formula) -> CoreFormula {
    match f {
        Formula::LessEqual(l, r) => CoreFormula::le((**l).clone(), (**r).clone()),
        Formula::Eq(l, r) => CoreFormula::and(
            CoreFormula::le((**l).clone(), (**r).clone()),
            CoreFormula::le((**r).clone(), (**l).clone()),
        ),
        Formula::Less(l, r) => CoreFormula::and(
            CoreFormula::le((**l).clone(), (**r).clone()),
            CoreFormula::not(CoreFormula::le((**r).clone(), (**l).clone())),
        ),
        Formula::Greater(l, r) => to_core(&Formula::less((**r).clone(), (**l).clone())),
        Formula::GreaterEqual(l, r) => CoreFormula::le((**r).clone(), (**l).clone()),
        Formula::Not(p) => CoreFormula::not(to_core(p)),
        Formula::And(p, q) => CoreFormula::and(to_core(p), to_core(q)),
        Formula::Or(p, q) => CoreFormula::or(to_core(p), to_core(q)),
        Formula::Implies(p, q) => CoreFormula::or(CoreFormula::not(to_core(p)), to_core(q)),
        Formula::Iff(p, q) => {
            let pc = to_core(p);
            let qc = to_core(q);
            CoreFormula::and(
                CoreFormula::or(CoreFormula::not(pc.clone()), qc.clone()),
                CoreFormula::or(CoreFormula::not(qc), pc),
            )
        }
        Formula::Exists(v, p) => CoreFormula::exists(v, to_core(p)),
        Formula::Forall(v, p) => {
            CoreFormula::not(CoreFormula::exists(v, CoreFormula::not(to_core(p))))
        }
    }
}

fn simplify_once(f: &CoreFormula) -> CoreFormula {
    let f = eliminate_double_negation(f);
    let f = drop_unused_exists(&f);
    let f = push_exists_inward(&f);
    let f = drop_unused_exists(&f);
    eliminate_double_negation(&f)
}

fn eliminate_double_negation(f: &CoreFormula) -> CoreFormula {
    match f {
        CoreFormula::Not(p) => {
            let inner = eliminate_double_negation(p);
            match inner {
                CoreFormula::Not(pp) => *pp,
                other => CoreFormula::not(other),
            }
        }
        CoreFormula::Or(p, q) => {
            CoreFormula::or(eliminate_double_negation(p), eliminate_double_negation(q))
        }
        CoreFormula::Exists(v, p) => CoreFormula::exists(v, eliminate_double_negation(p)),
        CoreFormula::LessEqual(_, _) => f.clone(),
    }
}

/// Drop `Exists(v, phi)` when `v` does not occur free in `phi`. Never
/// eliminates a quantifier whose variable does occur free — that is a
/// simplification, not a meaning-changing elimination.
fn drop_unused_exists(f: &CoreFormula) -> CoreFormula {
    match f {
        CoreFormula::Exists(v, p) => {
            let inner = drop_unused_exists(p);
            if free_vars_contains(&inner, v) {
                CoreFormula::exists(v, inner)
            } else {
                inner
            }
        }
        CoreFormula::Or(p, q) => CoreFormula::or(drop_unused_exists(p), drop_unused_exists(q)),
        CoreFormula::Not(p) => CoreFormula::not(drop_unused_exists(p)),
        CoreFormula::LessEqual(_, _) => f.clone(),
    }
}

fn free_vars_contains(f: &CoreFormula, v: &str) -> bool {
    let fv: BTreeSet<String> = f.free_vars();
    fv.contains(v)
}

/// Push a chain of existentials through the first disjunction each
/// reaches. Never pushed through `Not`.
fn push_exists_inward(f: &CoreFormula) -> CoreFormula {
    match f {
        CoreFormula::Exists(v, p) => {
            let mut chain = vec![v.clone()];
            let mut body = (**p).clone();
            while let CoreFormula::Exists(v2, p2) = body {
                chain.push(v2);
                body = *p2;
            }
            let mut result = push_exists_inward(&body);
            for v in chain.into_iter().rev() {
                result = distribute_exists(&v, result);
            }
            result
        }
        CoreFormula::Or(p, q) => CoreFormula::or(push_exists_inward(p), push_exists_inward(q)),
        CoreFormula::Not(p) => CoreFormula::not(push_exists_inward(p)),
        CoreFormula::LessEqual(_, _) => f.clone(),
    }
}

/// `Exists(v, Or(a, b)) -> Or(Exists(v, a), Exists(v, b))`.
fn distribute_exists(v: &str, f: CoreFormula) -> CoreFormula {
    match f {
        CoreFormula::Or(l, r) => CoreFormula::or(
            CoreFormula::exists(v, distribute_exists(v, *l)),
            CoreFormula::exists(v, distribute_exists(v, *r)),
        ),
        other => CoreFormula::exists(v, other),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ast::Term;

    #[test]
    fn eq_becomes_double_inequality() {
        let f = Formula::eq(Term::var("x"), Term::Const(3));
        let core = normalize(&f);
        // Not(Or(Not(x<=3), Not(3<=x)))
        assert_eq!(
            core,
            CoreFormula::and(
                CoreFormula::le(Term::var("x"), Term::Const(3)),
                CoreFormula::le(Term::Const(3), Term::var("x")),
            )
        );
    }

    #[test]
    fn forall_becomes_not_exists_not() {
        let f = Formula::forall("x", Formula::le(Term::Zero, Term::var("x")));
        let core = normalize(&f);
        assert!(matches!(core, CoreFormula::Not(_)));
    }

    #[test]
    fn unused_existential_is_dropped() {
        let f = Formula::exists("z", Formula::le(Term::var("x"), Term::var("y")));
        let core = normalize(&f);
        assert_eq!(core, CoreFormula::le(Term::var("x"), Term::var("y")));
    }

    #[test]
    fn exists_pushed_through_or() {
        let f = Formula::exists(
            "x",
            Formula::or(
                Formula::le(Term::var("x"), Term::var("y")),
                Formula::le(Term::var("y"), Term::var("x")),
            ),
        );
        let core = normalize(&f);
        assert_eq!(
            core,
            CoreFormula::or(
                CoreFormula::exists("x", CoreFormula::le(Term::var("x"), Term::var("y"))),
                CoreFormula::exists("x", CoreFormula::le(Term::var("y"), Term::var("x"))),
            )
        );
    }

    #[test]
    fn never_pushed_through_not() {
        let f = Formula::exists(
            "x",
            Formula::not(Formula::or(
                Formula::le(Term::var("x"), Term::var("y")),
                Formula::le(Term::var("y"), Term::var("x")),
            )),
        );
        let core = normalize(&f);
        assert!(matches!(core, CoreFormula::Exists(_, _)));
    }
}
