//! The garbling pipeline.
//!
//! A circuit is garbled in place in four passes: obfuscate input A and flip
//! the truth tables against it, identify the gates an evaluator could fix
//! from A' alone (repairing table integrity on the way), find which of
//! those still feed the outputs, and overwrite the rest with random tables.
//! The result computes the original function on the original inputs while
//! every intermediate wire shows the evaluator an unrelated bit.

pub mod errors;
pub mod fixed;
pub mod flip;
pub mod intermediary;
pub mod regenerate;

pub use errors::*;
pub use fixed::*;
pub use flip::*;
pub use intermediary::*;
pub use regenerate::*;

use circuit::Circuit;
use rand::{CryptoRng, Rng};

/// Garble `circuit` in place for the generator input `input_a`, returning
/// the obfuscated input A' the evaluator must be handed instead.
///
/// Evaluating the garbled circuit on (A', B) equals evaluating the original
/// circuit on (A, B) for every B.
pub fn garble<R: Rng + CryptoRng>(
    circuit: &mut Circuit,
    input_a: &[bool],
    rng: &mut R,
) -> Result<Vec<bool>, GarbleError> {
    let details = circuit.details;
    if input_a.len() != details.input_a_bits {
        return Err(GarbleError::InputLengthMismatch {
            expected: details.input_a_bits,
            actual: input_a.len(),
        });
    }

    let parents = wire_parents(circuit);
    let (a_prime, mut flipped) = obfuscate_input(input_a, details.num_wires, rng)?;
    sample_gate_flips(circuit, &mut flipped, rng)?;
    flip_circuit(circuit, &mut flipped);

    let fixed = identify_fixed_gates(circuit, &a_prime);
    let reachable = output_reachable(&details, &fixed.known, &parents);

    let output_start = details.output_wire_start();
    let input_wires = details.input_wires();
    let leakage: Vec<bool> = (0..details.num_wires)
        .map(|w| fixed.known[w] && !reachable[w] && w >= input_wires && w < output_start)
        .collect();
    regenerate_gates(circuit, &leakage, rng)?;

    Ok(a_prime)
}
