//! Text substitution
//!
//! Pure string transformations with no I/O.

pub mod engine;

pub use engine::{
    apply_occurrences, find_occurrences, substitute_cyclic, substitute_literal,
    LiteralSubstitution, Occurrence, SubstituteError, Substitution,
};
