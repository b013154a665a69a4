//! Backward reachability from the circuit outputs.

use circuit::{Circuit, CircuitDetails};
use std::collections::VecDeque;

/// Parent pair of each gate-output wire, `None` for input wires and wires
/// no surviving gate writes.
pub fn wire_parents(circuit: &Circuit) -> Vec<Option<[usize; 2]>> {
    let mut parents = vec![None; circuit.details.num_wires];
    for gate in circuit.gates.iter() {
        parents[gate.output] = Some([gate.left_parent, gate.right_parent]);
    }
    parents
}

/// BFS from every circuit output wire backwards through `parents`,
/// traversing only gate wires that are not known. A wire left unreached
/// carries no semantic information into the outputs.
pub fn output_reachable(
    details: &CircuitDetails,
    known: &[bool],
    parents: &[Option<[usize; 2]>],
) -> Vec<bool> {
    let mut reachable = vec![false; details.num_wires];
    let mut queued = vec![false; details.num_wires];
    let mut queue = VecDeque::new();

    for word in 0..details.num_outputs {
        for j in 0..details.output_bits {
            let wire = details.num_wires - 1 - j - details.output_bits * word;
            queue.push_back(wire);
            queued[wire] = true;
        }
    }

    let input_wires = details.input_wires();
    while let Some(wire) = queue.pop_front() {
        reachable[wire] = true;
        if let Some(pair) = parents[wire] {
            for parent in pair {
                if parent >= input_wires && !known[parent] && !queued[parent] {
                    queue.push_back(parent);
                    queued[parent] = true;
                }
            }
        }
    }
    reachable
}
