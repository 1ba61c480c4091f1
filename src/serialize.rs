//! Line-based automaton serialization, matching the original's
//! plain line-oriented automaton dump:
//!
//! ```text
//! @NFA-explicit
//! %Initial 0
//! %Final 1 3
//! 0 2 1
//! 1 1 2
//! ```
//!
//! The header line is followed by one `%Initial`/`%Final` line each
//! (space-separated state ids) and then one line per transition:
//! `src symbol dst`, with `symbol` written as a plain decimal integer —
//! the original's own `nfa_to_mata` defaults `symbol_to_str` to `str` and
//! carries no variable names in the dump at all. Variable order is
//! likewise not part of this wire format; a caller (the HTTP façade's
//! `/automaton/update`, which takes a serialized automaton *and* a
//! variable order change as separate fields) supplies it out of band
//! when reconstructing an [`Automaton`].

use crate::automaton::{Automaton, StateId, Transition};
use crate::error::PresburgerError;
use crate::types::VarName;
use std::collections::BTreeSet;

const HEADER: &str = "@NFA-explicit";

/// Serialize `automaton` to the `@NFA-explicit` text format. Variable
/// names are not part of the wire format; see the module docs.
pub fn serialize(automaton: &Automaton) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');
    out.push_str(&format!("%Initial {}\n", join_ids(&automaton.initial)));
    out.push_str(&format!("%Final {}\n", join_ids(&automaton.finals)));
    for t in &automaton.transitions {
        out.push_str(&format!("{} {} {}\n", t.src, t.symbol, t.dst));
    }
    out
}

fn join_ids(ids: &BTreeSet<StateId>) -> String {
    ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(" ")
}

/// Parse the `@NFA-explicit` text format back into an automaton, tagging
/// it with `variable_order` (supplied by the caller, since the format
/// carries no variable names of its own).
pub fn deserialize(text: &str, variable_order: Vec<VarName>) -> Result<Automaton, PresburgerError> {
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

    let header = lines.next().ok_or_else(|| malformed("empty input"))?;
    if header != HEADER {
        return Err(malformed(&format!("expected header '{}', found '{}'", HEADER, header)));
    }

    let initial_line = lines.next().ok_or_else(|| malformed("missing %Initial line"))?;
    let initial: BTreeSet<StateId> = parse_ids(parse_prefixed(initial_line, "%Initial")?)?;

    let final_line = lines.next().ok_or_else(|| malformed("missing %Final line"))?;
    let finals: BTreeSet<StateId> = parse_ids(parse_prefixed(final_line, "%Final")?)?;

    let mut transitions = Vec::new();
    let mut states: BTreeSet<StateId> = BTreeSet::new();
    states.extend(&initial);
    states.extend(&finals);
    for line in lines {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [src, symbol, dst] = fields.as_slice() else {
            return Err(malformed(&format!("transition line must have 3 fields: '{}'", line)));
        };
        let src: StateId = src.parse().map_err(|_| malformed(&format!("bad state id '{}'", src)))?;
        let dst: StateId = dst.parse().map_err(|_| malformed(&format!("bad state id '{}'", dst)))?;
        let symbol: u32 = symbol.parse().map_err(|_| malformed(&format!("bad symbol '{}'", symbol)))?;
        states.insert(src);
        states.insert(dst);
        transitions.push(Transition { src, symbol, dst });
    }

    Ok(Automaton { states, initial, finals, transitions, variable_order })
}

fn parse_prefixed<'a>(line: &'a str, prefix: &str) -> Result<Vec<&'a str>, PresburgerError> {
    let rest = line
        .strip_prefix(prefix)
        .ok_or_else(|| malformed(&format!("expected '{}' line, found '{}'", prefix, line)))?;
    Ok(rest.split_whitespace().collect())
}

fn parse_ids(fields: Vec<&str>) -> Result<BTreeSet<StateId>, PresburgerError> {
    fields
        .into_iter()
        .map(|f| f.parse::<StateId>().map_err(|_| malformed(&format!("bad state id '{}'", f))))
        .collect()
}

fn malformed(detail: &str) -> PresburgerError {
    PresburgerError::Semantic(format!("malformed @NFA-explicit input: {}", detail))
}
