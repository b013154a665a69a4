//! Define the structure of gates and circuits over 2x2 truth tables.

use crate::errors::CircuitEvalError;

/// Circuit metadata. Wire ids are assigned as `[0, input_a_bits)` for the
/// generator input A, `[input_a_bits, input_a_bits + input_b_bits)` for the
/// evaluator input B, and the remaining ids for gate outputs, with the last
/// `num_outputs * output_bits` wires carrying the circuit outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircuitDetails {
    /// Number of wires.
    pub num_wires: usize,
    /// Number of gates.
    pub num_gates: usize,
    /// Number of output words.
    pub num_outputs: usize,
    /// Bit width of the generator input.
    pub input_a_bits: usize,
    /// Bit width of the evaluator input.
    pub input_b_bits: usize,
    /// Bit width of a single output word.
    pub output_bits: usize,
}

impl CircuitDetails {
    /// Total number of input wires.
    pub fn input_wires(&self) -> usize {
        self.input_a_bits + self.input_b_bits
    }

    /// First wire id of the circuit output range.
    pub fn output_wire_start(&self) -> usize {
        self.num_wires - self.num_outputs * self.output_bits
    }
}

/// A 2x2 boolean truth table indexed `table[left_bit][right_bit]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruthTable(pub [[bool; 2]; 2]);

impl TruthTable {
    pub const AND: TruthTable = TruthTable([[false, false], [false, true]]);
    pub const XOR: TruthTable = TruthTable([[false, true], [true, false]]);
    pub const OR: TruthTable = TruthTable([[false, true], [true, true]]);
    pub const NAND: TruthTable = TruthTable([[true, true], [true, false]]);
    /// `table[l][r] = !r`. Read with both parents on the same wire this
    /// inverts that wire, which is how eliminated NOT gates on circuit
    /// output wires are kept physical.
    pub const INV_RIGHT: TruthTable = TruthTable([[true, false], [true, false]]);

    pub fn value(&self, left: bool, right: bool) -> bool {
        self.0[left as usize][right as usize]
    }

    /// Swap the two rows, absorbing a negation of the left parent.
    pub fn swap_rows(&mut self) {
        self.0.swap(0, 1);
    }

    /// Swap the two columns, absorbing a negation of the right parent.
    pub fn swap_cols(&mut self) {
        self.0[0].swap(0, 1);
        self.0[1].swap(0, 1);
    }

    /// Negate every entry, flipping the produced wire.
    pub fn negate(&mut self) {
        for row in self.0.iter_mut() {
            for cell in row.iter_mut() {
                *cell = !*cell;
            }
        }
    }

    pub fn is_constant(&self) -> bool {
        let [[a, b], [c, d]] = self.0;
        a == b && b == c && c == d
    }

    /// Render as the RGC `t00 t01 t10 t11` character field.
    pub fn render(&self) -> String {
        let mut s = String::with_capacity(4);
        for row in self.0.iter() {
            for cell in row.iter() {
                s.push(if *cell { '1' } else { '0' });
            }
        }
        s
    }

    /// Parse the RGC character field.
    pub fn parse(s: &str) -> Option<Self> {
        let mut cells = [false; 4];
        if s.len() != 4 {
            return None;
        }
        for (i, c) in s.chars().enumerate() {
            cells[i] = match c {
                '0' => false,
                '1' => true,
                _ => return None,
            };
        }
        Some(TruthTable([[cells[0], cells[1]], [cells[2], cells[3]]]))
    }
}

/// A gate reading two parent wires and writing one output wire.
/// `output` is strictly greater than both parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gate {
    pub left_parent: usize,
    pub right_parent: usize,
    pub output: usize,
    pub table: TruthTable,
}

/// A circuit as a topologically ordered gate list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Circuit {
    pub details: CircuitDetails,
    pub gates: Vec<Gate>,
}

impl Circuit {
    /// Evaluate the circuit on the given inputs.
    ///
    /// Input bit sequences are MSB first and written into wires in reverse,
    /// so wire 0 holds the least significant bit of A. Outputs are read from
    /// the highest wire id downward, MSB first per output word. Callers and
    /// circuit files depend on this contract.
    pub fn evaluate(
        &self,
        input_a: &[bool],
        input_b: &[bool],
    ) -> Result<Vec<bool>, CircuitEvalError> {
        let d = &self.details;
        if input_a.len() != d.input_a_bits {
            return Err(CircuitEvalError::InputLengthMismatch {
                name: "A",
                expected: d.input_a_bits,
                actual: input_a.len(),
            });
        }
        if input_b.len() != d.input_b_bits {
            return Err(CircuitEvalError::InputLengthMismatch {
                name: "B",
                expected: d.input_b_bits,
                actual: input_b.len(),
            });
        }

        let mut values = vec![false; d.num_wires];
        for i in 0..d.input_a_bits {
            values[i] = input_a[d.input_a_bits - 1 - i];
        }
        for i in 0..d.input_b_bits {
            values[d.input_a_bits + i] = input_b[d.input_b_bits - 1 - i];
        }

        for gate in self.gates.iter() {
            if gate.left_parent >= gate.output || gate.right_parent >= gate.output {
                return Err(CircuitEvalError::TopologyViolation {
                    output: gate.output,
                });
            }
            values[gate.output] = gate
                .table
                .value(values[gate.left_parent], values[gate.right_parent]);
        }

        let mut output = Vec::with_capacity(d.num_outputs * d.output_bits);
        for word in 0..d.num_outputs {
            for j in 0..d.output_bits {
                output.push(values[d.num_wires - 1 - j - d.output_bits * word]);
            }
        }
        Ok(output)
    }
}
