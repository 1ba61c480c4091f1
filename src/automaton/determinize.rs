//! Subset construction and DFA minimization. Only the interface is fixed
//! (an automaton that accepts the same language, with no unreachable
//! states and no more states than necessary); the algorithm is ours to
//! pick, so this is a straightforward textbook subset construction
//! followed by Moore-style partition refinement.

use super::{Automaton, StateId, Transition};
use std::collections::{BTreeSet, HashMap, VecDeque};

fn assign_id(
    id_of: &mut HashMap<BTreeSet<StateId>, StateId>,
    next_id: &mut StateId,
    set: &BTreeSet<StateId>,
) -> StateId {
    if let Some(&id) = id_of.get(set) {
        id
    } else {
        let id = *next_id;
        *next_id += 1;
        id_of.insert(set.clone(), id);
        id
    }
}

/// Subset construction: each DFA state is a set of NFA states.
pub fn determinize(a: &Automaton) -> Automaton {
    let alphabet = a.alphabet_size();
    let mut delta: HashMap<(StateId, u32), Vec<StateId>> = HashMap::new();
    for t in &a.transitions {
        delta.entry((t.src, t.symbol)).or_default().push(t.dst);
    }

    let start_set: BTreeSet<StateId> = a.initial.clone();
    let mut id_of: HashMap<BTreeSet<StateId>, StateId> = HashMap::new();
    let mut next_id: StateId = 0;
    let start_id = assign_id(&mut id_of, &mut next_id, &start_set);

    let mut states: BTreeSet<StateId> = BTreeSet::from([start_id]);
    let mut finals: BTreeSet<StateId> = BTreeSet::new();
    if start_set.iter().any(|s| a.finals.contains(s)) {
        finals.insert(start_id);
    }

    let mut worklist: VecDeque<BTreeSet<StateId>> = VecDeque::from([start_set.clone()]);
    let mut visited: BTreeSet<BTreeSet<StateId>> = BTreeSet::from([start_set]);
    let mut transitions = Vec::new();

    while let Some(set) = worklist.pop_front() {
        let src_id = assign_id(&mut id_of, &mut next_id, &set);
        for symbol in 0..alphabet {
            let mut dst_set: BTreeSet<StateId> = BTreeSet::new();
            for &s in &set {
                if let Some(dsts) = delta.get(&(s, symbol)) {
                    dst_set.extend(dsts.iter().cloned());
                }
            }
            if dst_set.is_empty() {
                continue;
            }
            let dst_id = assign_id(&mut id_of, &mut next_id, &dst_set);
            states.insert(dst_id);
            if dst_set.iter().any(|s| a.finals.contains(s)) {
                finals.insert(dst_id);
            }
            transitions.push(Transition { src: src_id, symbol, dst: dst_id });
            if visited.insert(dst_set.clone()) {
                worklist.push_back(dst_set);
            }
        }
    }

    Automaton {
        states,
        initial: BTreeSet::from([start_id]),
        finals,
        transitions,
        variable_order: a.variable_order.clone(),
    }
}

/// Partition states by accept/reject, then refine by per-symbol
/// destination-class signature until the partition is stable, and quotient
/// by the resulting classes.
pub fn minimize(a: &Automaton) -> Automaton {
    let dfa = if a.is_deterministic() { a.clone() } else { determinize(a) };
    let reachable = dfa.reachable_states();
    let alphabet = dfa.alphabet_size();

    let mut delta: HashMap<(StateId, u32), StateId> = HashMap::new();
    for t in &dfa.transitions {
        if reachable.contains(&t.src) {
            delta.insert((t.src, t.symbol), t.dst);
        }
    }

    let mut class_of: HashMap<StateId, usize> = reachable
        .iter()
        .map(|&s| (s, if dfa.finals.contains(&s) { 1 } else { 0 }))
        .collect();

    loop {
        let mut signature_to_class: HashMap<Vec<usize>, usize> = HashMap::new();
        let mut new_class_of: HashMap<StateId, usize> = HashMap::new();
        for &s in &reachable {
            let mut signature = vec![class_of[&s]];
            for sym in 0..alphabet {
                let target = delta.get(&(s, sym)).map(|d| class_of[d]);
                signature.push(target.map_or(usize::MAX, |c| c));
            }
            let next_id = signature_to_class.len();
            let class = *signature_to_class.entry(signature).or_insert(next_id);
            new_class_of.insert(s, class);
        }
        if new_class_of == class_of {
            break;
        }
        class_of = new_class_of;
    }

    let mut transitions = Vec::new();
    let mut seen: BTreeSet<(StateId, u32)> = BTreeSet::new();
    for &s in &reachable {
        let src = class_of[&s] as StateId;
        for sym in 0..alphabet {
            if let Some(&d) = delta.get(&(s, sym)) {
                let dst = class_of[&d] as StateId;
                if seen.insert((src, sym)) {
                    transitions.push(Transition { src, symbol: sym, dst });
                }
            }
        }
    }

    let initial: BTreeSet<StateId> =
        dfa.initial.iter().filter(|s| reachable.contains(s)).map(|s| class_of[s] as StateId).collect();
    let finals: BTreeSet<StateId> = reachable
        .iter()
        .filter(|s| dfa.finals.contains(s))
        .map(|s| class_of[s] as StateId)
        .collect();
    let states: BTreeSet<StateId> = reachable.iter().map(|s| class_of[s] as StateId).collect();

    Automaton { states, initial, finals, transitions, variable_order: dfa.variable_order.clone() }
}
