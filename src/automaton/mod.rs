//! Automaton representation shared by every stage of the automaton
//! pipeline: atomic construction, alphabet alignment,
//! Boolean combination, projection, determinization and minimization.
//!
//! States are opaque `u32` ids. A symbol is a bitmask over
//! `variable_order`: bit `i` is the value of `variable_order[i]` in that
//! transition's digit of the LSBF encoding.

pub mod align;
pub mod atomic;
pub mod boolean;
pub mod determinize;
pub mod project;

use crate::types::VarName;
use std::collections::{BTreeSet, HashMap};

pub type StateId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Transition {
    pub src: StateId,
    pub symbol: u32,
    pub dst: StateId,
}

/// An NFA (or DFA, when `is_deterministic()` holds) over tuples of
/// variables in `variable_order`.
#[derive(Debug, Clone)]
pub struct Automaton {
    pub states: BTreeSet<StateId>,
    pub initial: BTreeSet<StateId>,
    pub finals: BTreeSet<StateId>,
    pub transitions: Vec<Transition>,
    pub variable_order: Vec<VarName>,
}

impl Automaton {
    pub fn alphabet_size(&self) -> u32 {
        1u32 << self.variable_order.len()
    }

    pub fn transitions_from(&self, state: StateId) -> impl Iterator<Item = &Transition> {
        self.transitions.iter().filter(move |t| t.src == state)
    }

    /// States reachable from `initial` by following transitions forward.
    pub fn reachable_states(&self) -> BTreeSet<StateId> {
        let mut adjacency: HashMap<StateId, Vec<StateId>> = HashMap::new();
        for t in &self.transitions {
            adjacency.entry(t.src).or_default().push(t.dst);
        }
        let mut seen: BTreeSet<StateId> = self.initial.clone();
        let mut stack: Vec<StateId> = self.initial.iter().cloned().collect();
        while let Some(s) = stack.pop() {
            if let Some(next) = adjacency.get(&s) {
                for &d in next {
                    if seen.insert(d) {
                        stack.push(d);
                    }
                }
            }
        }
        seen
    }

    /// Drop every state, transition and final marking not reachable from
    /// `initial`. Every combinator in this module calls this before
    /// returning so the invariant "every state is reachable" holds
    /// everywhere downstream.
    pub fn restore_invariant(mut self) -> Self {
        let reachable = self.reachable_states();
        self.states = self.states.intersection(&reachable).cloned().collect();
        self.finals = self.finals.intersection(&reachable).cloned().collect();
        self.transitions
            .retain(|t| reachable.contains(&t.src) && reachable.contains(&t.dst));
        self
    }

    /// True when there is at most one initial state and no state has two
    /// outgoing transitions on the same symbol.
    pub fn is_deterministic(&self) -> bool {
        if self.initial.len() > 1 {
            return false;
        }
        let mut seen: BTreeSet<(StateId, u32)> = BTreeSet::new();
        for t in &self.transitions {
            if !seen.insert((t.src, t.symbol)) {
                return false;
            }
        }
        true
    }
}
