//! Completely reusable garbled circuits and a time-lock puzzle built on them.
//!
//! The [`garble`] module rewrites a circuit's truth tables so that an
//! evaluator holding the obfuscated input learns the intended outputs and
//! nothing about the generator's cleartext input. The [`tlp`] module unrolls
//! a sequential function into a circuit, garbles it once, and derives
//! puzzles whose solution requires the full sequential evaluation.

pub mod garble;
pub mod leakage;
pub mod tlp;

pub use garble::*;
pub use leakage::*;
pub use tlp::*;
