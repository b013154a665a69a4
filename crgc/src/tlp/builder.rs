//! Gate-level construction of the unrolled time-lock circuit C_T.

use crate::tlp::errors::TlpError;
use circuit::{Circuit, CircuitDetails, Gate, TruthTable};

/// Emits gates onto fresh wires in allocation order, which keeps the gate
/// list topologically sorted.
pub struct CircuitBuilder {
    gates: Vec<Gate>,
    next_wire: usize,
}

impl CircuitBuilder {
    pub fn new(first_free_wire: usize) -> Self {
        Self {
            gates: Vec::new(),
            next_wire: first_free_wire,
        }
    }

    pub fn emit(&mut self, left: usize, right: usize, table: TruthTable) -> usize {
        let output = self.next_wire;
        self.next_wire += 1;
        self.gates.push(Gate {
            left_parent: left,
            right_parent: right,
            output,
            table,
        });
        output
    }

    /// NOT as a repeated-parent NAND.
    pub fn not_gate(&mut self, wire: usize) -> usize {
        self.emit(wire, wire, TruthTable::NAND)
    }

    pub fn and_gate(&mut self, left: usize, right: usize) -> usize {
        self.emit(left, right, TruthTable::AND)
    }

    pub fn or_gate(&mut self, left: usize, right: usize) -> usize {
        self.emit(left, right, TruthTable::OR)
    }

    pub fn xor_gate(&mut self, left: usize, right: usize) -> usize {
        self.emit(left, right, TruthTable::XOR)
    }
}

/// One application of the sequential function f, spliced into a builder.
#[derive(Debug, Clone)]
pub enum SequentialCircuit {
    /// f(x) = x as buffer gates. Test use only.
    Identity,
    /// f(x) rotate-XORs the register: bit i becomes x[i] ^ x[i+1 mod λ].
    XorMixing,
    /// An externally supplied Bristol circuit with a λ-bit input A, no
    /// input B, and a single λ-bit output word.
    Bristol(Circuit),
}

impl SequentialCircuit {
    fn validate(&self, lambda: usize) -> Result<(), TlpError> {
        if let SequentialCircuit::Bristol(f) = self {
            let d = &f.details;
            if d.input_a_bits != lambda
                || d.input_b_bits != 0
                || d.num_outputs != 1
                || d.output_bits != lambda
            {
                return Err(TlpError::SequentialCircuitMismatch { lambda });
            }
        }
        Ok(())
    }

    /// Append one copy of f reading the register `x` (wire per bit, LSB
    /// first) and return the wires carrying f(x).
    fn splice(&self, builder: &mut CircuitBuilder, x: &[usize]) -> Vec<usize> {
        match self {
            SequentialCircuit::Identity => {
                x.iter().map(|&w| builder.and_gate(w, w)).collect()
            }
            SequentialCircuit::XorMixing => {
                let n = x.len();
                (0..n)
                    .map(|i| builder.xor_gate(x[i], x[(i + 1) % n]))
                    .collect()
            }
            SequentialCircuit::Bristol(f) => {
                // f's wire i holds input bit i (LSB first), matching the
                // register layout, and its output bit j sits on wire
                // num_wires - lambda + j.
                let lambda = x.len();
                let mut mapping = vec![None; f.details.num_wires];
                for (i, &wire) in x.iter().enumerate() {
                    mapping[i] = Some(wire);
                }
                for gate in f.gates.iter() {
                    let left = mapping[gate.left_parent].unwrap();
                    let right = mapping[gate.right_parent].unwrap();
                    mapping[gate.output] = Some(builder.emit(left, right, gate.table));
                }
                (0..lambda)
                    .map(|j| mapping[f.details.num_wires - lambda + j].unwrap())
                    .collect()
            }
        }
    }
}

/// Build C_T: `steps` serial copies of f on the x register, then a λ-bit
/// multiplexer emitting m when b = 0 and f^T(x) ^ z when b = 1.
///
/// Input A is the bundle (b, x): wire λ carries b, wires [0, λ) carry x
/// LSB first. Input B is the bundle (m, z): wires [λ+1, 2λ+1) carry z and
/// wires [2λ+1, 3λ+1) carry m. The closing OR of each multiplexer bit is
/// emitted last, in register order, so the output word lands on the top λ
/// wires.
pub fn build_unrolled_circuit(
    lambda: usize,
    steps: usize,
    f: &SequentialCircuit,
) -> Result<Circuit, TlpError> {
    f.validate(lambda)?;

    let input_a_bits = lambda + 1;
    let input_b_bits = 2 * lambda;
    let mut builder = CircuitBuilder::new(input_a_bits + input_b_bits);

    let mut x: Vec<usize> = (0..lambda).collect();
    let b = lambda;
    let z: Vec<usize> = (0..lambda).map(|j| input_a_bits + j).collect();
    let m: Vec<usize> = (0..lambda).map(|j| input_a_bits + lambda + j).collect();

    for _ in 0..steps {
        x = f.splice(&mut builder, &x);
    }

    let not_b = builder.not_gate(b);
    let mut keep_m = Vec::with_capacity(lambda);
    let mut keep_x = Vec::with_capacity(lambda);
    for j in 0..lambda {
        let xz = builder.xor_gate(x[j], z[j]);
        keep_m.push(builder.and_gate(not_b, m[j]));
        keep_x.push(builder.and_gate(b, xz));
    }
    for j in 0..lambda {
        builder.or_gate(keep_m[j], keep_x[j]);
    }

    let details = CircuitDetails {
        num_wires: builder.next_wire,
        num_gates: builder.gates.len(),
        num_outputs: 1,
        input_a_bits,
        input_b_bits,
        output_bits: lambda,
    };
    Ok(Circuit {
        details,
        gates: builder.gates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crypto_core::random_bits;
    use rand::{rngs::StdRng, SeedableRng};

    /// Rotate-XOR on an MSB-first bit sequence, mirroring what the spliced
    /// XorMixing gates compute on the wire register.
    fn xor_mix(seq: &[bool]) -> Vec<bool> {
        let n = seq.len();
        let reg: Vec<bool> = (0..n).map(|j| seq[n - 1 - j]).collect();
        let mixed: Vec<bool> = (0..n).map(|j| reg[j] ^ reg[(j + 1) % n]).collect();
        (0..n).map(|k| mixed[n - 1 - k]).collect()
    }

    #[test]
    fn selector_returns_m_when_b_is_zero() {
        let circ = build_unrolled_circuit(16, 3, &SequentialCircuit::XorMixing).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..20 {
            let x = random_bits(&mut rng, 16).unwrap();
            let m = random_bits(&mut rng, 16).unwrap();
            let z = random_bits(&mut rng, 16).unwrap();
            let mut input_a = vec![false];
            input_a.extend_from_slice(&x);
            let input_b = [m.clone(), z].concat();
            assert_eq!(circ.evaluate(&input_a, &input_b).unwrap(), m);
        }
    }

    #[test]
    fn selector_returns_iterated_x_when_b_is_one() {
        let steps = 3;
        let circ = build_unrolled_circuit(16, steps, &SequentialCircuit::XorMixing).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..20 {
            let x = random_bits(&mut rng, 16).unwrap();
            let m = random_bits(&mut rng, 16).unwrap();
            let z = random_bits(&mut rng, 16).unwrap();
            let mut input_a = vec![true];
            input_a.extend_from_slice(&x);
            let input_b = [m, z.clone()].concat();

            let mut fx = x;
            for _ in 0..steps {
                fx = xor_mix(&fx);
            }
            let want: Vec<bool> = fx.iter().zip(z.iter()).map(|(a, b)| a ^ b).collect();
            assert_eq!(circ.evaluate(&input_a, &input_b).unwrap(), want);
        }
    }

    #[test]
    fn identity_function_passes_x_through() {
        let circ = build_unrolled_circuit(8, 4, &SequentialCircuit::Identity).unwrap();
        let mut rng = StdRng::seed_from_u64(6);
        let x = random_bits(&mut rng, 8).unwrap();
        let z = random_bits(&mut rng, 8).unwrap();
        let mut input_a = vec![true];
        input_a.extend_from_slice(&x);
        let input_b = [vec![false; 8], z.clone()].concat();
        let want: Vec<bool> = x.iter().zip(z.iter()).map(|(a, b)| a ^ b).collect();
        assert_eq!(circ.evaluate(&input_a, &input_b).unwrap(), want);
    }

    #[test]
    fn bristol_function_must_match_lambda() {
        let f = Circuit::load("../circuit/circuit_files/bristol/adder64.txt").unwrap();
        let res = build_unrolled_circuit(64, 1, &SequentialCircuit::Bristol(f));
        assert!(matches!(
            res,
            Err(TlpError::SequentialCircuitMismatch { lambda: 64 })
        ));
    }

    #[test]
    fn output_wires_are_the_top_lambda() {
        let circ = build_unrolled_circuit(8, 2, &SequentialCircuit::XorMixing).unwrap();
        let d = &circ.details;
        assert_eq!(d.num_outputs * d.output_bits, 8);
        let mut top: Vec<usize> = circ.gates[circ.gates.len() - 8..]
            .iter()
            .map(|g| g.output)
            .collect();
        top.sort_unstable();
        assert_eq!(top, (d.num_wires - 8..d.num_wires).collect::<Vec<_>>());
    }
}
