//! Input obfuscation and truth-table flipping.

use crate::garble::errors::GarbleError;
use circuit::Circuit;
use crypto_core::random_bits;
use rand::{CryptoRng, Rng};

/// Sample a random replacement A' for input A and record, per input-A wire,
/// whether the observed bit differs from the real one. The returned flip
/// vector spans all wires; entries outside the input-A range are false.
pub fn obfuscate_input<R: Rng + CryptoRng>(
    input_a: &[bool],
    num_wires: usize,
    rng: &mut R,
) -> Result<(Vec<bool>, Vec<bool>), GarbleError> {
    let a_prime = random_bits(rng, input_a.len())?;
    let mut flipped = vec![false; num_wires];
    let bits = input_a.len();
    for i in 0..bits {
        // Input bit sequences land on wires in reverse.
        flipped[bits - 1 - i] = a_prime[i] != input_a[i];
    }
    Ok((a_prime, flipped))
}

/// Draw an independent fair coin into `flipped` for every gate output that
/// is not a circuit output wire.
pub fn sample_gate_flips<R: Rng + CryptoRng>(
    circuit: &Circuit,
    flipped: &mut [bool],
    rng: &mut R,
) -> Result<(), GarbleError> {
    let coins = random_bits(rng, circuit.gates.len())?;
    let output_start = circuit.details.output_wire_start();
    for (gate, coin) in circuit.gates.iter().zip(coins) {
        if gate.output < output_start {
            flipped[gate.output] = coin;
        }
    }
    Ok(())
}

/// Rewrite every truth table against the flip vector: swap rows or columns
/// where a parent wire is flipped, then negate the table where the output
/// wire is flipped. Circuit output wires are never flipped; their entries
/// are cleared so the vector stays consistent with the produced circuit.
///
/// Afterwards, evaluating on the flipped inputs yields the same output bits
/// as the original circuit on the real inputs.
pub fn flip_circuit(circuit: &mut Circuit, flipped: &mut [bool]) {
    let output_start = circuit.details.output_wire_start();
    for gate in circuit.gates.iter_mut() {
        if flipped[gate.left_parent] {
            gate.table.swap_rows();
        }
        if flipped[gate.right_parent] {
            gate.table.swap_cols();
        }
        if gate.output >= output_start {
            flipped[gate.output] = false;
        } else if flipped[gate.output] {
            gate.table.negate();
        }
    }
}
