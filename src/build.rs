//! Pipeline glue: walks a [`CoreFormula`] bottom-up,
//! building an atomic automaton at each `LessEqual` leaf and combining
//! with union/complement/projection at each connective, producing one
//! automaton whose accepted language is exactly the formula's solutions.
//!
//! The automaton's `variable_order` is fixed up front from the formula's
//! free variables so every atomic automaton and every combination step
//! shares one alphabet from the start; `automaton::align` only has to
//! widen when a sub-formula's own free variables are a strict subset.

use crate::ast::CoreFormula;
use crate::automaton::boolean::{complement, union};
use crate::automaton::determinize::minimize;
use crate::automaton::project::project;
use crate::automaton::{align, atomic, Automaton};
use crate::linear::linearize;
use crate::types::VarName;

/// Compile a normalized `formula` into an automaton over its free
/// variables (sorted), returning the automaton and the variable order it
/// was built against. The text-taking entry point callers outside this
/// crate use is [`crate::build_automaton`]; this one operates on an
/// already-parsed, already-normalized tree for pipeline stages and tests
/// that have one in hand.
pub fn build_core_automaton(formula: &CoreFormula) -> (Automaton, Vec<VarName>) {
    let order: Vec<VarName> = formula.free_vars().into_iter().collect();
    let automaton = build(formula, &order);
    log::debug!("built automaton: {} states, {} vars", automaton.states.len(), order.len());
    (automaton, order)
}

fn build(formula: &CoreFormula, order: &[VarName]) -> Automaton {
    match formula {
        CoreFormula::LessEqual(l, r) => {
            let lf = linearize(l, r);
            let mut atom_order = lf.variables();
            atom_order.sort();
            let atom = atomic::build_atomic(&lf, atom_order);
            widen(&atom, order)
        }
        CoreFormula::Not(p) => {
            let inner = build(p, order);
            complement(&inner)
        }
        CoreFormula::Or(p, q) => {
            let a = build(p, order);
            let b = build(q, order);
            minimize(&union(&a, &b))
        }
        CoreFormula::Exists(v, p) => {
            let mut inner_order: Vec<VarName> = order.to_vec();
            if !inner_order.contains(v) {
                inner_order.push(v.clone());
                inner_order.sort();
            }
            let inner = build(p, &inner_order);
            let index = inner_order.iter().position(|x| x == v).expect("pushed above if absent");
            let projected = project(&inner, index);
            widen(&projected, order)
        }
    }
}

/// Re-express `automaton` over `target_order`, which must be a superset of
/// `automaton.variable_order`.
fn widen(automaton: &Automaton, target_order: &[VarName]) -> Automaton {
    if automaton.variable_order.as_slice() == target_order {
        return automaton.clone();
    }
    let mapping = align::mapping_by_name(&automaton.variable_order, target_order);
    align::expand(automaton, target_order.to_vec(), &mapping)
}

/// Decide whether `formula` is satisfiable: its automaton accepts some
/// word.
pub fn is_satisfiable(formula: &CoreFormula) -> bool {
    let (automaton, _) = build_core_automaton(formula);
    !automaton.finals.is_empty()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ast::Term;
    use crate::normalize::normalize;
    use crate::parser::parse;

    fn compile(src: &str) -> (Automaton, Vec<VarName>) {
        let formula = parse(src).expect("should parse");
        let core = normalize(&formula);
        build_core_automaton(&core)
    }

    #[test]
    fn zero_le_x_is_satisfiable() {
        let (a, _) = compile("0 <= x");
        assert!(!a.finals.is_empty());
    }

    #[test]
    fn unsatisfiable_formula_has_no_final_states() {
        // x < y AND y <= x is unsatisfiable over the naturals.
        let core = normalize(&crate::ast::Formula::and(
            crate::ast::Formula::less(Term::var("x"), Term::var("y")),
            crate::ast::Formula::le(Term::var("y"), Term::var("x")),
        ));
        assert!(!is_satisfiable(&core));
    }

    #[test]
    fn existential_projection_preserves_satisfiability() {
        let (a, order) = compile("E y . x <= y");
        assert!(!a.finals.is_empty());
        assert_eq!(order, vec!["x".to_string()]);
    }

    #[test]
    fn tautology_over_all_naturals_is_satisfiable() {
        let (a, _) = compile("A x . x <= x + 1");
        assert!(!a.finals.is_empty());
    }
}
