//! Existential projection: `∃v.A` drops `v`'s bit from every
//! transition symbol, then grows the final set along the zero-symbol
//! co-reachability closure. Without that closure, a witness that needed
//! extra leading-zero digits of `v` past `A`'s own final state would be
//! lost.

use super::{Automaton, StateId, Transition};
use std::collections::{BTreeSet, HashMap};

/// Eliminate `automaton.variable_order[index]` by existential projection.
pub fn project(automaton: &Automaton, index: usize) -> Automaton {
    let mut new_order = automaton.variable_order.clone();
    new_order.remove(index);

    let transitions: Vec<Transition> = automaton
        .transitions
        .iter()
        .map(|t| Transition { src: t.src, symbol: remove_bit(t.symbol, index), dst: t.dst })
        .collect();

    let mut finals = automaton.finals.clone();
    let mut zero_preds: HashMap<StateId, Vec<StateId>> = HashMap::new();
    for t in &transitions {
        if t.symbol == 0 {
            zero_preds.entry(t.dst).or_default().push(t.src);
        }
    }
    let mut frontier: Vec<StateId> = finals.iter().cloned().collect();
    while let Some(s) = frontier.pop() {
        if let Some(preds) = zero_preds.get(&s) {
            for &p in preds {
                if finals.insert(p) {
                    frontier.push(p);
                }
            }
        }
    }

    let result = Automaton {
        states: automaton.states.clone(),
        initial: automaton.initial.clone(),
        finals,
        transitions,
        variable_order: new_order,
    }
    .restore_invariant();

    log::trace!("post-projection: {} states", result.states.len());
    result
}

/// Remove bit `index` from `symbol`, shifting higher bits down by one.
fn remove_bit(symbol: u32, index: usize) -> u32 {
    let low = symbol & ((1u32 << index) - 1);
    let high = (symbol >> (index + 1)) << index;
    low | high
}
