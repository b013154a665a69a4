//! The time-lock puzzle algorithms: PSetup, PGen, PSolve.
//!
//! PSetup garbles the unrolled circuit once. Each puzzle afterwards only
//! re-encodes fresh inputs against the stored flip pattern, so generation
//! is cheap while solving pays for the full T-fold sequential evaluation.

use crate::garble::flip_circuit;
use crate::tlp::builder::{build_unrolled_circuit, SequentialCircuit};
use crate::tlp::errors::TlpError;
use circuit::Circuit;
use crypto_core::{inner_product, random_bits};
use rand::{CryptoRng, Rng};

/// Public parameters: the garbled circuit and the per-wire flip pattern.
/// The flip pattern is an encoding key, not a cryptographic public key: its
/// input-A entries tell PGen which bundle bits to negate.
#[derive(Debug, Clone)]
pub struct PublicParams {
    pub circuit: Circuit,
    pub encoding_key: Vec<bool>,
    pub lambda: usize,
    pub steps: usize,
}

/// A puzzle Z = (x̃, r, c): the encoded input bundle, the λ-bit mask and
/// the masked secret bit.
#[derive(Debug, Clone)]
pub struct Puzzle {
    pub input_a: Vec<bool>,
    pub input_b: Vec<bool>,
    pub mask: Vec<bool>,
    pub masked_secret: bool,
}

/// Build and garble C_T. The base flip vector is sampled over every wire
/// except input-B wires (PGen hands B over in the clear, so a flip there
/// would desynchronize the evaluator) and circuit output wires (which are
/// never flipped).
pub fn psetup<R: Rng + CryptoRng>(
    lambda: usize,
    steps: usize,
    f: &SequentialCircuit,
    rng: &mut R,
) -> Result<PublicParams, TlpError> {
    let mut circuit = build_unrolled_circuit(lambda, steps, f)?;
    let details = circuit.details;

    let coins = random_bits(rng, details.num_wires)?;
    let output_start = details.output_wire_start();
    let mut encoding_key = vec![false; details.num_wires];
    for wire in 0..details.num_wires {
        let in_b = wire >= details.input_a_bits && wire < details.input_wires();
        if !in_b && wire < output_start {
            encoding_key[wire] = coins[wire];
        }
    }
    flip_circuit(&mut circuit, &mut encoding_key);

    Ok(PublicParams {
        circuit,
        encoding_key,
        lambda,
        steps,
    })
}

/// Create a puzzle hiding `secret`. Samples fresh λ-bit x, m and r, encodes
/// the A-side bundle (b = 0, x) under the encoding key and masks the secret
/// with the Goldreich-Levin bit ⟨r, m⟩.
pub fn pgen<R: Rng + CryptoRng>(
    pp: &PublicParams,
    secret: bool,
    rng: &mut R,
) -> Result<Puzzle, TlpError> {
    let lambda = pp.lambda;
    let x = random_bits(rng, lambda)?;
    let m = random_bits(rng, lambda)?;
    let r = random_bits(rng, lambda)?;

    let input_a_bits = pp.circuit.details.input_a_bits;
    let mut bundle = Vec::with_capacity(input_a_bits);
    bundle.push(false); // b = 0: the solver's output is m
    bundle.extend_from_slice(&x);
    let input_a: Vec<bool> = bundle
        .iter()
        .enumerate()
        .map(|(i, bit)| bit ^ pp.encoding_key[input_a_bits - 1 - i])
        .collect();

    let mut input_b = m.clone();
    input_b.extend(std::iter::repeat(false).take(lambda)); // z = 0^λ

    let masked_secret = inner_product(&r, &m) ^ secret;
    Ok(Puzzle {
        input_a,
        input_b,
        mask: r,
        masked_secret,
    })
}

/// Solve a puzzle: evaluate the garbled circuit on the encoded inputs and
/// unmask. With b = 0 the circuit outputs m after the T sequential steps,
/// so c ⊕ ⟨y, r⟩ = s.
pub fn psolve(pp: &PublicParams, puzzle: &Puzzle) -> Result<bool, TlpError> {
    let details = &pp.circuit.details;
    if puzzle.input_a.len() != details.input_a_bits
        || puzzle.input_b.len() != details.input_b_bits
        || puzzle.mask.len() != pp.lambda
    {
        return Err(TlpError::PuzzleMismatch);
    }
    let y = pp.circuit.evaluate(&puzzle.input_a, &puzzle.input_b)?;
    Ok(puzzle.masked_secret ^ inner_product(&y, &puzzle.mask))
}

#[cfg(test)]
mod tests {
    use super::*;
    use circuit::Circuit;
    use rand::{rngs::StdRng, SeedableRng};
    use std::path::Path;
    use std::time::Instant;

    #[test]
    fn xor_mixing_round_trip_with_timing() {
        let mut rng = StdRng::seed_from_u64(41);
        let pp = psetup(256, 2, &SequentialCircuit::XorMixing, &mut rng).unwrap();

        let gen_start = Instant::now();
        let mut puzzles = Vec::new();
        for _ in 0..10 {
            puzzles.push(pgen(&pp, true, &mut rng).unwrap());
        }
        let gen_time = gen_start.elapsed();

        let solve_start = Instant::now();
        for puzzle in &puzzles {
            assert!(psolve(&pp, puzzle).unwrap());
        }
        let solve_time = solve_start.elapsed();

        assert!(
            solve_time > gen_time,
            "solving ({:?}) should dominate generation ({:?})",
            solve_time,
            gen_time
        );
    }

    #[test]
    fn both_secrets_recover_over_many_puzzles() {
        let mut rng = StdRng::seed_from_u64(99);
        let pp = psetup(64, 4, &SequentialCircuit::XorMixing, &mut rng).unwrap();
        for round in 0..25 {
            for secret in [false, true] {
                let puzzle = pgen(&pp, secret, &mut rng).unwrap();
                assert_eq!(psolve(&pp, &puzzle).unwrap(), secret, "round {}", round);
            }
        }
    }

    #[test]
    fn identity_function_round_trip() {
        let mut rng = StdRng::seed_from_u64(8);
        let pp = psetup(8, 3, &SequentialCircuit::Identity, &mut rng).unwrap();
        for secret in [false, true] {
            for _ in 0..20 {
                let puzzle = pgen(&pp, secret, &mut rng).unwrap();
                assert_eq!(psolve(&pp, &puzzle).unwrap(), secret);
            }
        }
    }

    #[test]
    fn bristol_function_round_trip() {
        // 4-bit rotate-XOR written as a Bristol file equivalent.
        let text = "4 12\n2 4 0\n1 4\n\n\
                    2 1 0 1 8 XOR\n2 1 1 2 9 XOR\n2 1 2 3 10 XOR\n2 1 3 0 11 XOR\n";
        let f = Circuit::parse_bristol(std::io::Cursor::new(text)).unwrap();
        let mut rng = StdRng::seed_from_u64(12);
        let pp = psetup(4, 2, &SequentialCircuit::Bristol(f), &mut rng).unwrap();
        for secret in [false, true] {
            for _ in 0..15 {
                let puzzle = pgen(&pp, secret, &mut rng).unwrap();
                assert_eq!(psolve(&pp, &puzzle).unwrap(), secret);
            }
        }
    }

    #[test]
    fn sha256_function_round_trip_when_available() {
        // The hash circuit is an external input. Drop a 256-bit, single
        // input Bristol SHA-256 next to the other fixtures to enable this.
        let path = "../circuit/circuit_files/bristol/sha256_compress256.txt";
        if !Path::new(path).exists() {
            return;
        }
        let f = Circuit::load(path).unwrap();
        let mut rng = StdRng::seed_from_u64(56);
        let pp = psetup(256, 1, &SequentialCircuit::Bristol(f), &mut rng).unwrap();
        let puzzle = pgen(&pp, false, &mut rng).unwrap();
        assert!(!psolve(&pp, &puzzle).unwrap());
    }

    #[test]
    fn psolve_rejects_mismatched_puzzle() {
        let mut rng = StdRng::seed_from_u64(3);
        let pp = psetup(16, 1, &SequentialCircuit::XorMixing, &mut rng).unwrap();
        let other = psetup(32, 1, &SequentialCircuit::XorMixing, &mut rng).unwrap();
        let puzzle = pgen(&other, true, &mut rng).unwrap();
        assert!(matches!(psolve(&pp, &puzzle), Err(TlpError::PuzzleMismatch)));
    }

    #[test]
    fn encoding_follows_the_key() {
        // The b bit of the bundle sits on wire lambda; undoing the key
        // there must give back the cleartext b = 0.
        let mut rng = StdRng::seed_from_u64(77);
        let pp = psetup(64, 1, &SequentialCircuit::XorMixing, &mut rng).unwrap();
        let puzzle = pgen(&pp, true, &mut rng).unwrap();
        let b_encoded = puzzle.input_a[0];
        assert_eq!(b_encoded ^ pp.encoding_key[pp.lambda], false);
    }
}
