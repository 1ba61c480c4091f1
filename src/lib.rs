//! Compiles Presburger arithmetic formulas to finite automata over
//! LSBF-encoded tuples of naturals, and decides, enumerates, serializes
//! and visualizes the result.
//!
//! Pipeline: [`parser`] -> [`macros`] -> [`normalize`] -> [`linear`] ->
//! [`build`] (automaton construction over [`automaton`]) -> [`solve`] /
//! [`serialize`] / [`dot`].

pub mod ast;
pub mod automaton;
pub mod build;
pub mod dot;
pub mod error;
pub mod linear;
pub mod macros;
pub mod normalize;
pub mod parser;
pub mod serialize;
pub mod solve;
pub mod types;

#[cfg(test)]
pub mod ast_strategy;

pub use build::is_satisfiable;
pub use error::{PresburgerError, Result};
pub use solve::{enumerate_solutions, Solution};

/// Run the full pipeline from formula text (with a leading macro-header
/// block, if any) through to a compiled automaton over its free
/// variables.
pub fn build_automaton(formula_text: &str) -> Result<(automaton::Automaton, Vec<types::VarName>)> {
    let expanded = macros::process_macros(formula_text)?;
    let formula = parser::parse(&expanded)?;
    let core = normalize::normalize(&formula);
    Ok(build::build_core_automaton(&core))
}
