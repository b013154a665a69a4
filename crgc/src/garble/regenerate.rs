//! Regeneration of leaked gate tables.

use crate::garble::errors::GarbleError;
use circuit::{Circuit, TruthTable};
use crypto_core::random_bool;
use rand::{CryptoRng, Rng};

/// Overwrite the truth table of every gate whose output wire is flagged as
/// leakage. Gates fed directly by an input wire get a balanced XOR-shaped
/// table; deeper gates get a uniform table that is neither all-0 nor all-1.
///
/// The produced output bits do not change: after the integrity repair no
/// output-relevant gate reads a leakage wire.
pub fn regenerate_gates<R: Rng + CryptoRng>(
    circuit: &mut Circuit,
    leakage: &[bool],
    rng: &mut R,
) -> Result<(), GarbleError> {
    let input_wires = circuit.details.input_wires();
    for gate in circuit.gates.iter_mut() {
        if !leakage[gate.output] {
            continue;
        }
        if gate.left_parent < input_wires || gate.right_parent < input_wires {
            let bit = random_bool(rng)?;
            gate.table = TruthTable([[bit, !bit], [!bit, bit]]);
        } else {
            gate.table = random_nonconstant_table(rng)?;
        }
    }
    Ok(())
}

fn random_nonconstant_table<R: Rng + CryptoRng>(
    rng: &mut R,
) -> Result<TruthTable, GarbleError> {
    loop {
        let mut byte = [0u8; 1];
        rng.try_fill_bytes(&mut byte)?;
        let cells = byte[0] & 0x0F;
        if cells == 0x0 || cells == 0xF {
            continue;
        }
        return Ok(TruthTable([
            [cells & 1 != 0, cells & 2 != 0],
            [cells & 4 != 0, cells & 8 != 0],
        ]));
    }
}
