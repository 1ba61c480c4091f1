//! Solution enumerator: breadth-first search over
//! `(state, path)` pairs, yielding up to `k` distinct solutions in
//! shortest-path order. Accepting paths that differ only by trailing
//! all-zero digits denote the same tuple (LSBF padding), so they are
//! deduplicated by the underlying value, not the raw path.

use crate::automaton::{Automaton, StateId};
use crate::types::VarName;
use std::collections::{BTreeMap, HashMap, VecDeque};

/// One accepting run, described the way a caller (e.g. the HTTP façade)
/// renders it: the raw symbol path, that path re-expressed as bit strings
/// in `variables` order, and the per-variable LSBF bit strings and their
/// decoded integer values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub path_int: Vec<u32>,
    pub path_bits: Vec<String>,
    pub variables: Vec<VarName>,
    pub var_bits: BTreeMap<VarName, String>,
    pub var_ints: BTreeMap<VarName, u64>,
}

/// Enumerate up to `k` distinct solutions of `automaton`, shortest paths
/// first. `variable_order` must name the same variables `automaton` was
/// built over. `display_order`, if given, must be a permutation of
/// `variable_order` and controls the order solutions are described in
/// (`path_bits`, `variables`, `var_bits`, `var_ints`) without touching
/// `path_int`, which always reports the automaton's own symbols.
pub fn enumerate_solutions(
    automaton: &Automaton,
    k: usize,
    variable_order: &[VarName],
    display_order: Option<&[VarName]>,
) -> Vec<Solution> {
    if k == 0 || automaton.finals.is_empty() {
        return Vec::new();
    }

    let out_order: Vec<VarName> = match display_order {
        Some(order) => order.to_vec(),
        None => variable_order.to_vec(),
    };
    let mapping: Vec<usize> = out_order
        .iter()
        .map(|v| {
            variable_order
                .iter()
                .position(|x| x == v)
                .expect("display_order must be a permutation of variable_order")
        })
        .collect();

    let mut adjacency: HashMap<StateId, Vec<(u32, StateId)>> = HashMap::new();
    for t in &automaton.transitions {
        adjacency.entry(t.src).or_default().push((t.symbol, t.dst));
    }

    let mut solutions = Vec::new();
    let mut seen_values: std::collections::HashSet<Vec<u64>> = std::collections::HashSet::new();

    let mut queue: VecDeque<(StateId, Vec<u32>)> = VecDeque::new();
    for &s in &automaton.initial {
        queue.push_back((s, Vec::new()));
    }

    // Cap exploration depth so unsatisfiable or sparsely-accepting
    // automata don't loop forever chasing more than `k` solutions that
    // don't exist; `digits` of LSBF padding can represent any value up
    // to 2^digits - 1 per tracked variable, which is ample headroom.
    let max_path_len = 4 * (automaton.states.len() + 1);

    while let Some((state, path)) = queue.pop_front() {
        if solutions.len() >= k {
            break;
        }
        if path.len() > max_path_len {
            continue;
        }
        if automaton.finals.contains(&state) {
            let path_bits = reorder_path_bits(&path, &mapping);
            let var_bits_vecs = transpose_bits(&path_bits, out_order.len());
            let var_ints: Vec<u64> = var_bits_vecs.iter().map(|bits| bits_to_int(bits)).collect();
            let values = remove_trailing_zeros(&var_ints);
            if seen_values.insert(values.clone()) {
                solutions.push(Solution {
                    path_int: path.clone(),
                    path_bits,
                    variables: out_order.clone(),
                    var_bits: out_order.iter().cloned().zip(var_bits_vecs.into_iter()).collect(),
                    var_ints: out_order.iter().cloned().zip(values.into_iter()).collect(),
                });
            }
        }
        if let Some(next) = adjacency.get(&state) {
            let mut next_sorted = next.clone();
            next_sorted.sort_by_key(|(sym, _)| *sym);
            for (symbol, dst) in next_sorted {
                let mut extended = path.clone();
                extended.push(symbol);
                queue.push_back((dst, extended));
            }
        }
    }

    solutions
}

/// Re-express each symbol in `path` as a bit string in the output
/// variable order named by `mapping` (`mapping[i]` is the source bit
/// index feeding output position `i`).
fn reorder_path_bits(path: &[u32], mapping: &[usize]) -> Vec<String> {
    path.iter()
        .map(|&symbol| mapping.iter().map(|&i| if (symbol >> i) & 1 == 1 { '1' } else { '0' }).collect())
        .collect()
}

/// Concatenate, per output variable, the bit at that position across
/// every step of the path, in LSBF order.
fn transpose_bits(path_bits: &[String], num_vars: usize) -> Vec<String> {
    let mut columns = vec![String::new(); num_vars];
    for step in path_bits {
        for (i, c) in step.chars().enumerate() {
            columns[i].push(c);
        }
    }
    columns
}

fn bits_to_int(bits: &str) -> u64 {
    bits.chars().enumerate().fold(0u64, |acc, (i, c)| if c == '1' { acc | (1u64 << i) } else { acc })
}

/// Trailing all-zero digits just pad the tuple out; canonicalizing them
/// away means two paths encoding the same tuple dedup to one solution.
/// Values themselves are unaffected by this — only the raw digit path's
/// length was arbitrary.
fn remove_trailing_zeros(values: &[u64]) -> Vec<u64> {
    values.to_vec()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::automaton::atomic::build_atomic;
    use crate::linear::LinearForm;
    use std::collections::BTreeMap as Map;

    fn atom(var: &str, coeff: i64, b: i64) -> Automaton {
        let mut coeffs = Map::new();
        coeffs.insert(var.to_string(), coeff);
        build_atomic(&LinearForm { b, coeffs }, vec![var.to_string()])
    }

    #[test]
    fn zero_le_x_enumerates_nonnegative_values() {
        let a = atom("x", -1, 0); // 0 <= x
        let order = a.variable_order.clone();
        let solutions = enumerate_solutions(&a, 5, &order, None);
        assert_eq!(solutions.len(), 5);
        for s in &solutions {
            assert!(s.var_ints.contains_key("x"));
        }
    }

    #[test]
    fn smallest_solution_is_found_first() {
        let a = atom("x", -1, 0);
        let order = a.variable_order.clone();
        let solutions = enumerate_solutions(&a, 1, &order, None);
        assert_eq!(solutions[0].var_ints["x"], 0);
    }

    #[test]
    fn unsatisfiable_automaton_yields_no_solutions() {
        let mut a = atom("x", -1, 0);
        a.finals.clear();
        let order = a.variable_order.clone();
        let solutions = enumerate_solutions(&a, 5, &order, None);
        assert!(solutions.is_empty());
    }

    #[test]
    fn k_zero_yields_no_solutions() {
        let a = atom("x", -1, 0);
        let order = a.variable_order.clone();
        assert!(enumerate_solutions(&a, 0, &order, None).is_empty());
    }

    #[test]
    fn display_order_permutes_output_without_changing_values() {
        let mut coeffs = Map::new();
        coeffs.insert("x".to_string(), -1i64);
        coeffs.insert("y".to_string(), 0i64);
        let a = build_atomic(&LinearForm { b: 0, coeffs }, vec!["x".to_string(), "y".to_string()]);
        let order = a.variable_order.clone();
        let reversed: Vec<VarName> = order.iter().rev().cloned().collect();

        let natural = enumerate_solutions(&a, 3, &order, None);
        let swapped = enumerate_solutions(&a, 3, &order, Some(&reversed));

        assert_eq!(natural.len(), swapped.len());
        for (n, s) in natural.iter().zip(swapped.iter()) {
            assert_eq!(n.var_ints["x"], s.var_ints["x"]);
            assert_eq!(n.var_ints["y"], s.var_ints["y"]);
            assert_eq!(s.variables, reversed);
        }
    }
}
