//! Structural leakage prediction.
//!
//! An input-independent analog of the fixed-gate analysis: instead of a
//! concrete obfuscated input it assumes input A takes the all-zero observed
//! value and asks which gates an evaluator could pin down from circuit
//! topology alone. Runs before garbling, mutates nothing.

use crate::garble::{output_reachable, wire_parents};
use circuit::Circuit;

/// Result of [`predict_leakage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeakageReport {
    /// Bit width of input A, for interpreting `leaked_inputs`.
    pub input_a_bits: usize,
    /// Gate wires whose observed value would be hidden after garbling.
    pub hidden_wires: usize,
    /// Indices into the input-A bit sequence (MSB first) that a
    /// topology-aware evaluator could infer.
    pub leaked_inputs: Vec<usize>,
}

impl LeakageReport {
    /// Whether input-A bit `index` (MSB first) is inferable.
    pub fn is_input_leaked(&self, index: usize) -> bool {
        self.leaked_inputs.binary_search(&index).is_ok()
    }
}

/// Predict which gates stay hidden and which input-A bits leak, purely from
/// the circuit structure.
pub fn predict_leakage(circuit: &Circuit) -> LeakageReport {
    let details = circuit.details;
    let mut hidden = vec![false; details.num_wires];
    let mut value = vec![false; details.num_wires];
    for wire in 0..details.input_a_bits {
        hidden[wire] = true;
    }
    let output_start = details.output_wire_start();

    // Forward pass: a gate output is potentially hidden when both parents
    // are, or when one is and the table fixes the output given its value.
    for gate in circuit.gates.iter() {
        let t = &gate.table;
        if hidden[gate.left_parent] && hidden[gate.right_parent] {
            if gate.output < output_start {
                hidden[gate.output] = true;
                value[gate.output] = t.value(value[gate.left_parent], value[gate.right_parent]);
            }
        } else if hidden[gate.left_parent] {
            let v = value[gate.left_parent] as usize;
            if t.0[v][0] == t.0[v][1] && gate.output < output_start {
                hidden[gate.output] = true;
                value[gate.output] = t.0[v][0];
            }
        } else if hidden[gate.right_parent] {
            let v = value[gate.right_parent] as usize;
            if t.0[0][v] == t.0[1][v] && gate.output < output_start {
                hidden[gate.output] = true;
                value[gate.output] = t.0[0][v];
            }
        }
    }

    // Backward pass: gate wires unreachable from the outputs stay hidden too.
    let parents = wire_parents(circuit);
    let reachable = output_reachable(&details, &hidden, &parents);
    for wire in details.input_wires()..output_start {
        hidden[wire] = !reachable[wire];
    }

    let hidden_wires = hidden[details.input_wires()..]
        .iter()
        .filter(|h| **h)
        .count();

    // An input-A bit read by a gate the evaluator can observe is leaked.
    let mut leaked = vec![false; details.input_a_bits];
    for gate in circuit.gates.iter() {
        if hidden[gate.output] {
            continue;
        }
        for parent in [gate.left_parent, gate.right_parent] {
            if parent < details.input_a_bits {
                leaked[details.input_a_bits - 1 - parent] = true;
            }
        }
    }
    let leaked_inputs = leaked
        .iter()
        .enumerate()
        .filter_map(|(i, l)| l.then(|| i))
        .collect();

    LeakageReport {
        input_a_bits: details.input_a_bits,
        hidden_wires,
        leaked_inputs,
    }
}
