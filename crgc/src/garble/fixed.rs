//! Fixed-gate identification and integrity repair.

use circuit::{Circuit, TruthTable};

/// Wires whose observed value is determined by the obfuscated input A'
/// alone, together with that value.
pub struct FixedWires {
    pub known: Vec<bool>,
    pub value: Vec<bool>,
}

/// Walk the gates once, marking every wire whose value follows from A'
/// regardless of input B, and repairing tables so that no surviving gate
/// reads a known wire.
///
/// The repair re-broadcasts the observed row or column over the unobserved
/// one. It must also fire for gates writing circuit output wires (which can
/// never be marked known): their known parents are exactly the wires whose
/// producing gates the regeneration step will later overwrite, so any
/// remaining read of them would corrupt the output.
pub fn identify_fixed_gates(circuit: &mut Circuit, a_prime: &[bool]) -> FixedWires {
    let details = circuit.details;
    let mut known = vec![false; details.num_wires];
    let mut value = vec![false; details.num_wires];
    for i in 0..details.input_a_bits {
        value[i] = a_prime[details.input_a_bits - 1 - i];
        known[i] = true;
    }
    let output_start = details.output_wire_start();

    for gate in circuit.gates.iter_mut() {
        let table = &mut gate.table;
        if known[gate.left_parent] && known[gate.right_parent] {
            let result = table.value(value[gate.left_parent], value[gate.right_parent]);
            if gate.output < output_start {
                value[gate.output] = result;
                known[gate.output] = true;
            } else {
                *table = TruthTable([[result; 2]; 2]);
            }
        } else if known[gate.left_parent] {
            let v = value[gate.left_parent] as usize;
            if table.0[v][0] == table.0[v][1] && gate.output < output_start {
                value[gate.output] = table.0[v][0];
                known[gate.output] = true;
            } else {
                table.0[1 - v][0] = table.0[v][0];
                table.0[1 - v][1] = table.0[v][1];
            }
        } else if known[gate.right_parent] {
            let v = value[gate.right_parent] as usize;
            if table.0[0][v] == table.0[1][v] && gate.output < output_start {
                value[gate.output] = table.0[0][v];
                known[gate.output] = true;
            } else {
                table.0[0][1 - v] = table.0[0][v];
                table.0[1][1 - v] = table.0[1][v];
            }
        }
    }

    FixedWires { known, value }
}
