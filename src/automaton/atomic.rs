//! Atomic automaton construction: compiles a single
//! `Σ coeffs[v]·v <= b` inequality into an automaton over LSBF-encoded
//! tuples by BFS over the integer residues that `b` can step to.
//!
//! State id <-> residue conversion follows the same `2k` / `-2k+1`
//! encoding the reference implementation uses so that even and odd ids
//! partition non-negative and negative residues respectively.

use super::{Automaton, StateId, Transition};
use crate::linear::LinearForm;
use crate::types::{Coeff, VarName};
use std::collections::{BTreeSet, HashSet, VecDeque};

/// `encode(k) = 2k` for `k >= 0`, `-2k+1` for `k < 0`.
pub fn encode(k: i64) -> StateId {
    if k >= 0 {
        (2 * k) as StateId
    } else {
        ((-2 * k) + 1) as StateId
    }
}

/// Inverse of [`encode`].
pub fn decode(id: StateId) -> i64 {
    let id = id as i64;
    if id % 2 == 0 {
        id / 2
    } else {
        -(id - 1) / 2
    }
}

/// Build the automaton deciding `Σ coeffs[v]·v <= b` over `variable_order`
/// (which must list at least every variable `lf` mentions).
///
/// Residue `k` steps to `k' = floor((k - a·ζ)/2)` on digit `ζ`, and `k` is
/// accepting iff `k >= 0`.
pub fn build_atomic(lf: &LinearForm, variable_order: Vec<VarName>) -> Automaton {
    let n = variable_order.len();
    let coeffs: Vec<Coeff> = variable_order.iter().map(|v| lf.coeff(v)).collect();
    let b = lf.b;

    let start_id = encode(b);
    let mut states: BTreeSet<StateId> = BTreeSet::from([start_id]);
    let mut finals: BTreeSet<StateId> = BTreeSet::new();
    if b >= 0 {
        finals.insert(start_id);
    }
    let mut transitions = Vec::new();

    let mut seen_residues: HashSet<i64> = HashSet::from([b]);
    let mut worklist: VecDeque<i64> = VecDeque::from([b]);

    while let Some(k) = worklist.pop_front() {
        let src = encode(k);
        for symbol in 0..(1u32 << n) {
            let dot: i64 = (0..n)
                .filter(|i| (symbol >> i) & 1 == 1)
                .map(|i| coeffs[i])
                .sum();
            let kp = (k - dot).div_euclid(2);
            let dst = encode(kp);
            if seen_residues.insert(kp) {
                states.insert(dst);
                if kp >= 0 {
                    finals.insert(dst);
                }
                worklist.push_back(kp);
            }
            transitions.push(Transition { src, symbol, dst });
        }
    }

    log::trace!("atomic automaton: {} states over {} variables", states.len(), n);

    Automaton {
        states,
        initial: BTreeSet::from([start_id]),
        finals,
        transitions,
        variable_order,
    }
}
