//! Boolean combinators over automata: union, completion, and
//! complement. `intersect`/`and` are never built directly — the
//! normalizer always expresses conjunction as `Not(Or(Not(p), Not(q)))`
//! and the builder combines automata the same way.

use super::align::{expand, mapping_by_name};
use super::determinize::determinize;
use super::{Automaton, StateId, Transition};
use crate::types::VarName;
use std::collections::BTreeSet;

/// `A ∪ B`, aligned onto the union of their variable orders. State spaces
/// are kept disjoint by shifting every state of `b` past the top of `a`'s.
pub fn union(a: &Automaton, b: &Automaton) -> Automaton {
    let mut merged_order: Vec<VarName> = a.variable_order.clone();
    for v in &b.variable_order {
        if !merged_order.contains(v) {
            merged_order.push(v.clone());
        }
    }

    let map_a = mapping_by_name(&a.variable_order, &merged_order);
    let map_b = mapping_by_name(&b.variable_order, &merged_order);
    let aligned_a = expand(a, merged_order.clone(), &map_a);
    let aligned_b = expand(b, merged_order.clone(), &map_b);

    let offset: StateId = aligned_a.states.iter().cloned().max().map_or(0, |m| m + 1);

    let mut states = aligned_a.states.clone();
    let mut initial = aligned_a.initial.clone();
    let mut finals = aligned_a.finals.clone();
    let mut transitions = aligned_a.transitions.clone();

    for &s in &aligned_b.states {
        states.insert(s + offset);
    }
    for &s in &aligned_b.initial {
        initial.insert(s + offset);
    }
    for &s in &aligned_b.finals {
        finals.insert(s + offset);
    }
    for t in &aligned_b.transitions {
        transitions.push(Transition { src: t.src + offset, symbol: t.symbol, dst: t.dst + offset });
    }

    Automaton { states, initial, finals, transitions, variable_order: merged_order }.restore_invariant()
}

/// Add a sink state and wire every missing `(state, symbol)` pair to it,
/// so every state has exactly one outgoing transition per symbol.
pub fn complete(a: &Automaton) -> Automaton {
    let alphabet = a.alphabet_size();
    let mut missing: Vec<(StateId, u32)> = Vec::new();
    for &s in &a.states {
        let present: BTreeSet<u32> = a.transitions_from(s).map(|t| t.symbol).collect();
        for sym in 0..alphabet {
            if !present.contains(&sym) {
                missing.push((s, sym));
            }
        }
    }
    if missing.is_empty() {
        return a.clone();
    }

    let sink = a.states.iter().cloned().max().map_or(0, |m| m + 1);
    let mut states = a.states.clone();
    states.insert(sink);
    let mut transitions = a.transitions.clone();
    for (s, sym) in missing {
        transitions.push(Transition { src: s, symbol: sym, dst: sink });
    }
    for sym in 0..alphabet {
        transitions.push(Transition { src: sink, symbol: sym, dst: sink });
    }

    Automaton {
        states,
        initial: a.initial.clone(),
        finals: a.finals.clone(),
        transitions,
        variable_order: a.variable_order.clone(),
    }
}

/// `¬A`: determinize (if needed), complete, then flip final/non-final.
pub fn complement(a: &Automaton) -> Automaton {
    let dfa = if a.is_deterministic() { a.clone() } else { determinize(a) };
    let completed = complete(&dfa);
    let reachable = completed.reachable_states();
    let finals: BTreeSet<StateId> = reachable.difference(&completed.finals).cloned().collect();
    Automaton { finals, ..completed }.restore_invariant()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::automaton::atomic::build_atomic;
    use crate::linear::LinearForm;
    use std::collections::BTreeMap;

    fn atom(var: &str, coeff: i64, b: i64) -> Automaton {
        let mut coeffs = BTreeMap::new();
        coeffs.insert(var.to_string(), coeff);
        build_atomic(&LinearForm { b, coeffs }, vec![var.to_string()])
    }

    #[test]
    fn complete_gives_every_state_full_out_degree() {
        let a = atom("x", -1, 0); // 0 <= x
        let completed = complete(&a);
        let alphabet = completed.alphabet_size();
        for &s in &completed.states {
            assert_eq!(completed.transitions_from(s).count() as u32, alphabet);
        }
    }

    #[test]
    fn complement_flips_initial_acceptance() {
        let a = atom("x", -1, 0); // 0 <= x, initial residue 0 is accepting
        let comp = complement(&a);
        let start = *comp.initial.iter().next().unwrap();
        assert!(!comp.finals.contains(&start));
    }

    #[test]
    fn union_merges_variable_orders() {
        let a = atom("x", -1, 0);
        let b = atom("y", -1, 0);
        let u = union(&a, &b);
        assert_eq!(u.variable_order, vec!["x".to_string(), "y".to_string()]);
    }
}
