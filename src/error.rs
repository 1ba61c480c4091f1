//! Crate-wide error taxonomy.
//!
//! A plain enum with a derived `Display`/`Error` impl, collecting every
//! failure mode the pipeline can surface into one type so call sites
//! compose with `?` across module boundaries.

use thiserror::Error;

/// Failure modes the pipeline can report to a caller.
///
/// `ResourceError` (timeout / memory cap) is deliberately absent: it is the
/// concern of the external worker that wraps a pipeline invocation, never
/// raised by the pipeline itself.
#[derive(Debug, Error)]
pub enum PresburgerError {
    /// Ill-formed input text. Carries enough context to render a
    /// caret-style pointer at the offending location.
    #[error("parse error at line {line}, column {column}:\n{context}")]
    Parse {
        line: usize,
        column: usize,
        context: String,
    },

    /// Bad macro header, parameter/argument mismatch, invocation cycle, or
    /// a macro name colliding with a reserved connective/quantifier.
    #[error("macro error: {0}")]
    Macro(String),

    /// Linearization failure (non-linear term) or a variable-order
    /// mismatch between an automaton and a requested display order.
    #[error("semantic error: {0}")]
    Semantic(String),

    /// An internal invariant was violated. Indicates a bug in this crate
    /// rather than bad input; fatal.
    #[error("internal error (invariant violated): {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, PresburgerError>;
