//! Time-lock puzzles over a reusable garbled circuit.

pub mod builder;
pub mod errors;
pub mod puzzle;

pub use builder::*;
pub use errors::*;
pub use puzzle::*;
