//! Alphabet alignment: re-interpret an automaton's
//! transitions over a wider variable order, wildcarding every new digit
//! position the automaton didn't previously track (both truth values of
//! that digit lead to the same destination, since the automaton's
//! language never depended on it).

use super::{Automaton, Transition};
use crate::types::VarName;
use std::collections::HashMap;

/// `mapping[i] = Some(j)` when new position `i` holds the automaton's old
/// tracked variable at position `j`; `None` when position `i` is a
/// variable the automaton never tracked.
pub fn mapping_by_name(old_order: &[VarName], new_order: &[VarName]) -> Vec<Option<usize>> {
    let index_of: HashMap<&str, usize> =
        old_order.iter().enumerate().map(|(i, v)| (v.as_str(), i)).collect();
    new_order.iter().map(|v| index_of.get(v.as_str()).copied()).collect()
}

/// Re-express `automaton` over `new_order` per `mapping`. Every transition
/// fans out over all combinations of the wildcarded positions.
pub fn expand(automaton: &Automaton, new_order: Vec<VarName>, mapping: &[Option<usize>]) -> Automaton {
    let old_width = automaton.variable_order.len();
    let new_width = new_order.len();
    debug_assert_eq!(mapping.len(), new_width);

    let wildcard_positions: Vec<usize> =
        (0..new_width).filter(|&i| mapping[i].is_none()).collect();

    let mut new_transitions = Vec::new();
    for t in &automaton.transitions {
        let old_bits: Vec<u32> = (0..old_width).map(|i| (t.symbol >> i) & 1).collect();
        let mut template = vec![0u32; new_width];
        for i in 0..new_width {
            if let Some(old_idx) = mapping[i] {
                template[i] = old_bits[old_idx];
            }
        }
        for combo in 0..(1u32 << wildcard_positions.len()) {
            for (k, &pos) in wildcard_positions.iter().enumerate() {
                template[pos] = (combo >> k) & 1;
            }
            let new_symbol: u32 = (0..new_width).map(|i| template[i] << i).sum();
            new_transitions.push(Transition { src: t.src, symbol: new_symbol, dst: t.dst });
        }
    }

    Automaton {
        states: automaton.states.clone(),
        initial: automaton.initial.clone(),
        finals: automaton.finals.clone(),
        transitions: new_transitions,
        variable_order: new_order,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn widening_with_no_new_variables_is_identity_on_symbols() {
        let a = Automaton {
            states: BTreeSet::from([0, 1]),
            initial: BTreeSet::from([0]),
            finals: BTreeSet::from([1]),
            transitions: vec![Transition { src: 0, symbol: 1, dst: 1 }],
            variable_order: vec!["x".to_string()],
        };
        let mapping = mapping_by_name(&a.variable_order, &a.variable_order.clone());
        let widened = expand(&a, a.variable_order.clone(), &mapping);
        assert_eq!(widened.transitions, a.transitions);
    }

    #[test]
    fn widening_with_one_new_variable_doubles_each_transition() {
        let a = Automaton {
            states: BTreeSet::from([0, 1]),
            initial: BTreeSet::from([0]),
            finals: BTreeSet::from([1]),
            transitions: vec![Transition { src: 0, symbol: 1, dst: 1 }],
            variable_order: vec!["x".to_string()],
        };
        let new_order = vec!["x".to_string(), "y".to_string()];
        let mapping = mapping_by_name(&a.variable_order, &new_order);
        let widened = expand(&a, new_order, &mapping);
        assert_eq!(widened.transitions.len(), 2);
        // x's bit (position 0) must be preserved as 1 in both fan-outs.
        assert!(widened.transitions.iter().all(|t| t.symbol & 1 == 1));
    }
}
