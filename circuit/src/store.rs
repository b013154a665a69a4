//! Store circuits as RGC artifacts or back in Bristol Fashion format.

use crate::errors::CircuitStoreError;
use crate::gate::{Circuit, TruthTable};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

impl Circuit {
    /// Write the RGC artifact triple next to `base`:
    /// `<base>_rgc_details.txt` (three Bristol-shaped header lines),
    /// `<base>_rgc.txt` (one `left right out tttt` line per gate) and
    /// `<base>_rgc_inputA.txt` (the obfuscated input A as '0'/'1'
    /// characters, in the original input bit order).
    pub fn write_rgc<P: AsRef<Path>>(
        &self,
        base: P,
        input_a: &[bool],
    ) -> Result<(), CircuitStoreError> {
        if input_a.len() != self.details.input_a_bits {
            return Err(CircuitStoreError::InputLengthMismatch {
                expected: self.details.input_a_bits,
                actual: input_a.len(),
            });
        }
        let base = base.as_ref();

        let mut f = BufWriter::new(File::create(sibling(base, "_rgc_details.txt"))?);
        writeln!(f, "{} {}", self.details.num_gates, self.details.num_wires)?;
        writeln!(
            f,
            "2 {} {}",
            self.details.input_a_bits, self.details.input_b_bits
        )?;
        writeln!(f, "{} {}", self.details.num_outputs, self.details.output_bits)?;

        let mut f = BufWriter::new(File::create(sibling(base, "_rgc.txt"))?);
        for gate in self.gates.iter() {
            writeln!(
                f,
                "{} {} {} {}",
                gate.left_parent,
                gate.right_parent,
                gate.output,
                gate.table.render()
            )?;
        }

        let mut f = BufWriter::new(File::create(sibling(base, "_rgc_inputA.txt"))?);
        let line: String = input_a.iter().map(|b| if *b { '1' } else { '0' }).collect();
        writeln!(f, "{}", line)?;
        Ok(())
    }

    /// Write the circuit in Bristol Fashion format.
    ///
    /// Only gates whose tables are canonical AND/XOR/OR, or repeated-parent
    /// inverters, have a Bristol spelling; anything else (a garbled table)
    /// must go through the RGC format instead.
    pub fn write_bristol<W: Write>(&self, mut writer: W) -> Result<(), CircuitStoreError> {
        writeln!(
            writer,
            "{} {}",
            self.details.num_gates, self.details.num_wires
        )?;
        writeln!(
            writer,
            "2 {} {}",
            self.details.input_a_bits, self.details.input_b_bits
        )?;
        writeln!(
            writer,
            "{} {}",
            self.details.num_outputs, self.details.output_bits
        )?;
        writeln!(writer)?;
        for gate in self.gates.iter() {
            let op = match gate.table {
                TruthTable::AND => "AND",
                TruthTable::XOR => "XOR",
                TruthTable::OR => "OR",
                TruthTable::INV_RIGHT | TruthTable::NAND
                    if gate.left_parent == gate.right_parent =>
                {
                    writeln!(writer, "1 1 {} {} INV", gate.left_parent, gate.output)?;
                    continue;
                }
                _ => {
                    return Err(CircuitStoreError::UnsupportedGate {
                        output: gate.output,
                    })
                }
            };
            writeln!(
                writer,
                "2 1 {} {} {} {}",
                gate.left_parent, gate.right_parent, gate.output, op
            )?;
        }
        Ok(())
    }
}

fn sibling(base: &Path, suffix: &str) -> std::path::PathBuf {
    let mut name = base
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.push_str(suffix);
    base.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::{CircuitDetails, Gate};
    use crypto_core::{bits_to_u64, u64_to_bits};
    use std::io::Cursor;

    fn temp_base(tag: &str) -> std::path::PathBuf {
        let mut dir = std::env::temp_dir();
        dir.push(format!("rgc_store_test_{}_{}", tag, std::process::id()));
        dir
    }

    fn remove_rgc(base: &Path) {
        for suffix in ["_rgc_details.txt", "_rgc.txt", "_rgc_inputA.txt"] {
            let _ = std::fs::remove_file(sibling(base, suffix));
        }
    }

    #[test]
    fn rgc_round_trip_is_bit_identical() {
        let circ = Circuit::load("circuit_files/bristol/adder64.txt").unwrap();
        let input_a = u64_to_bits(0xDEAD_BEEF, 64);

        let base = temp_base("adder");
        circ.write_rgc(&base, &input_a).unwrap();
        let (loaded, loaded_a) = Circuit::load_rgc(&base).unwrap();
        remove_rgc(&base);

        assert_eq!(loaded, circ);
        assert_eq!(loaded_a, input_a);
    }

    #[test]
    fn rgc_rejects_wrong_input_width() {
        let circ = Circuit::load("circuit_files/bristol/adder64.txt").unwrap();
        let res = circ.write_rgc(temp_base("short"), &[true; 8]);
        assert!(matches!(
            res,
            Err(CircuitStoreError::InputLengthMismatch {
                expected: 64,
                actual: 8
            })
        ));
    }

    #[test]
    fn bristol_round_trip_preserves_gates() {
        let circ = Circuit::load("circuit_files/bristol/adder64.txt").unwrap();
        let mut text = Vec::new();
        circ.write_bristol(&mut text).unwrap();
        let reparsed = Circuit::parse_bristol(Cursor::new(text)).unwrap();
        assert_eq!(reparsed, circ);

        let a = u64_to_bits(42, 64);
        let b = u64_to_bits(17, 64);
        assert_eq!(bits_to_u64(&reparsed.evaluate(&a, &b).unwrap()), 59);
    }

    #[test]
    fn bristol_writer_rejects_garbled_tables() {
        let circ = Circuit {
            details: CircuitDetails {
                num_wires: 3,
                num_gates: 1,
                num_outputs: 1,
                input_a_bits: 1,
                input_b_bits: 1,
                output_bits: 1,
            },
            gates: vec![Gate {
                left_parent: 0,
                right_parent: 1,
                output: 2,
                table: TruthTable([[true, false], [false, false]]),
            }],
        };
        let res = circ.write_bristol(Vec::new());
        assert!(matches!(
            res,
            Err(CircuitStoreError::UnsupportedGate { output: 2 })
        ));
    }
}
