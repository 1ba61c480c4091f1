//! DOT visualization, in the style of the original's
//! `processing.py` (`combine_parallel_edges`, `prettify_dot`) and
//! `visual_cleanup.py` (`relabel_and_aggregate`): merge transitions that
//! share a `(src, dst)` pair into one edge, then fold labels differing in
//! exactly one bit position into a `*` wildcard digit.

use crate::automaton::Automaton;
use crate::types::VarName;
use std::collections::HashMap;

/// Render `automaton` as a DOT digraph, one merged/wildcarded edge per
/// `(src, dst)` pair. `variable_order` must name the same variables
/// `automaton` was built over; `display_order`, if given, must be a
/// permutation of it and controls the digit order edge labels are shown
/// in. Every initial state is fed from one shared source point, even when
/// the automaton has more than one initial state.
pub fn to_dot(automaton: &Automaton, variable_order: &[VarName], display_order: Option<&[VarName]>) -> String {
    let out_order: Vec<VarName> = display_order.map(|d| d.to_vec()).unwrap_or_else(|| variable_order.to_vec());
    let mapping: Vec<usize> = out_order
        .iter()
        .map(|v| {
            variable_order
                .iter()
                .position(|x| x == v)
                .expect("display_order must be a permutation of variable_order")
        })
        .collect();

    let direction = layout_direction(automaton);
    let mut out = String::new();
    out.push_str("digraph automaton {\n");
    out.push_str(&format!("    rankdir={};\n", direction));
    out.push_str("    node [shape=circle];\n");

    for &f in &automaton.finals {
        out.push_str(&format!("    {} [shape=doublecircle];\n", f));
    }
    if !automaton.initial.is_empty() {
        out.push_str("    __start [shape=point];\n");
        for &i in &automaton.initial {
            out.push_str(&format!("    __start -> {};\n", i));
        }
    }

    let mut by_edge: HashMap<(u32, u32), Vec<u32>> = HashMap::new();
    for t in &automaton.transitions {
        by_edge.entry((t.src, t.dst)).or_default().push(t.symbol);
    }

    for ((src, dst), mut symbols) in by_edge {
        symbols.sort_unstable();
        let labels = compress_labels(&symbols, &mapping);
        for label in labels {
            out.push_str(&format!("    {} -> {} [label=\"{}\"];\n", src, dst, label));
        }
    }

    out.push_str("}\n");
    out
}

/// Pick `LR` for wide/shallow automata, `TB` for deep/narrow ones, per the
/// depth-vs-breadth heuristic: compare state count to longest shortest
/// path to any final state.
fn layout_direction(automaton: &Automaton) -> &'static str {
    let depth = longest_shortest_accepting_path(automaton);
    if depth <= automaton.states.len() {
        "LR"
    } else {
        "TB"
    }
}

fn longest_shortest_accepting_path(automaton: &Automaton) -> usize {
    use std::collections::{HashMap as Map, VecDeque};
    let mut adjacency: Map<u32, Vec<u32>> = Map::new();
    for t in &automaton.transitions {
        adjacency.entry(t.src).or_default().push(t.dst);
    }
    let mut dist: Map<u32, usize> = Map::new();
    let mut queue = VecDeque::new();
    for &s in &automaton.initial {
        dist.insert(s, 0);
        queue.push_back(s);
    }
    let mut max_final_dist = 0;
    while let Some(s) = queue.pop_front() {
        let d = dist[&s];
        if automaton.finals.contains(&s) {
            max_final_dist = max_final_dist.max(d);
        }
        if let Some(next) = adjacency.get(&s) {
            for &n in next {
                if !dist.contains_key(&n) {
                    dist.insert(n, d + 1);
                    queue.push_back(n);
                }
            }
        }
    }
    max_final_dist
}

/// Fold a sorted list of bitmask symbols into wildcard-compressed labels:
/// repeatedly merge any two labels that differ in exactly one digit
/// position (one `0`/`1`, the rest identical or already `*`) into one
/// label with that digit replaced by `*`, until no more merges apply.
/// `mapping[i]` is the source bit feeding output digit `i`, so labels are
/// rendered in the caller's chosen display order.
fn compress_labels(symbols: &[u32], mapping: &[usize]) -> Vec<String> {
    let mut labels: Vec<Vec<char>> = symbols.iter().map(|&s| to_bits(s, mapping)).collect();
    loop {
        let mut merged = false;
        'outer: for i in 0..labels.len() {
            for j in (i + 1)..labels.len() {
                if let Some(combined) = merge_one_bit(&labels[i], &labels[j]) {
                    labels[i] = combined;
                    labels.remove(j);
                    merged = true;
                    break 'outer;
                }
            }
        }
        if !merged {
            break;
        }
    }
    labels.into_iter().map(|bits| bits.into_iter().collect()).collect()
}

fn to_bits(symbol: u32, mapping: &[usize]) -> Vec<char> {
    mapping.iter().map(|&i| if (symbol >> i) & 1 == 1 { '1' } else { '0' }).collect()
}

/// Merge two equal-length labels if they differ in exactly one position.
fn merge_one_bit(a: &[char], b: &[char]) -> Option<Vec<char>> {
    if a.len() != b.len() {
        return None;
    }
    let mut diff_at = None;
    let mut result = a.to_vec();
    for i in 0..a.len() {
        if a[i] != b[i] {
            if diff_at.is_some() {
                return None;
            }
            diff_at = Some(i);
            result[i] = '*';
        }
    }
    diff_at.map(|_| result)
}
