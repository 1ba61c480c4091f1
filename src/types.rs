//! Basic scalar types shared across the pipeline.
//!
//! The decided domain is the naturals (see spec Non-goals), so a single
//! signed machine integer is enough to hold any coefficient or constant
//! that shows up while linearizing a formula; naturals are the values a
//! solution assigns to variables, not the type coefficients are stored in.

/// Coefficient / constant type used throughout terms and linear forms.
pub type Coeff = i64;

/// Variable name. Kept as an owned `String` rather than an interned symbol:
/// formulas are small and short-lived, so interning would add bookkeeping
/// for no measurable benefit.
pub type VarName = String;
