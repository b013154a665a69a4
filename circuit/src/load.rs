//! Load circuits in Bristol Fashion format and in the RGC artifact format.
//!
//! Bristol NOT gates are folded away while loading: a NOT whose output is an
//! ordinary wire becomes an alias entry plus a pending negation, absorbed
//! into the consuming gates' truth tables by swapping the matching axis. A
//! NOT whose output is a circuit output wire must stay physical and is
//! emitted as a repeated-parent gate whose table inverts that wire.

use crate::errors::CircuitLoadError;
use crate::gate::{Circuit, CircuitDetails, Gate, TruthTable};
use anyhow::{anyhow, Context};
use regex::Regex;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

/// Parse captures into a Vec
fn parse_to_vec<'a>(re: &Regex, line: &'a str) -> Vec<&'a str> {
    re.captures_iter(line)
        .map(|cap| cap.get(1).unwrap().as_str())
        .collect()
}

fn parse_wire(token: &str) -> Result<usize, CircuitLoadError> {
    Ok(token
        .parse()
        .with_context(|| format!("Failed to parse wire id: {}", token))?)
}

/// Running validation state shared by the Bristol and RGC gate readers.
struct WireCheck {
    written: Vec<bool>,
    details: CircuitDetails,
}

impl WireCheck {
    fn new(details: CircuitDetails) -> Self {
        Self {
            written: vec![false; details.num_wires],
            details,
        }
    }

    fn claim(&mut self, output: usize, parents: [usize; 2]) -> Result<(), CircuitLoadError> {
        if output >= self.details.num_wires {
            return Err(CircuitLoadError::ParsingError(anyhow!(
                "wire id {} exceeds declared wire count {}",
                output,
                self.details.num_wires
            )));
        }
        if output < self.details.input_wires() {
            return Err(CircuitLoadError::ParsingError(anyhow!(
                "gate writes input wire {}",
                output
            )));
        }
        for parent in parents {
            if parent >= output {
                return Err(CircuitLoadError::NonTopological { output, parent });
            }
        }
        if self.written[output] {
            return Err(CircuitLoadError::DuplicateOutputWire(output));
        }
        self.written[output] = true;
        Ok(())
    }

    /// Every circuit output wire must be produced by a surviving gate.
    fn check_outputs(&self, gates: &[Gate]) -> Result<(), CircuitLoadError> {
        let mut produced = vec![false; self.details.num_wires];
        for gate in gates {
            produced[gate.output] = true;
        }
        for wire in self.details.output_wire_start()..self.details.num_wires {
            if !produced[wire] {
                return Err(CircuitLoadError::UnwrittenOutputWire(wire));
            }
        }
        Ok(())
    }
}

impl Circuit {
    /// Load and parse a circuit file in Bristol Fashion format as specified
    /// here: `https://homes.esat.kuleuven.be/~nsmart/MPC/`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CircuitLoadError> {
        let f = File::open(&path).with_context(|| {
            format!("Failed to read circuit from {}", path.as_ref().display())
        })?;
        Self::parse_bristol(BufReader::new(f))
    }

    /// Parse a Bristol Fashion circuit, eliminating NOT gates.
    pub fn parse_bristol<R: BufRead>(reader: R) -> Result<Self, CircuitLoadError> {
        let mut lines = Vec::new();
        for line in reader.lines() {
            let line = line.context("Failed to read line")?;
            if !line.trim().is_empty() {
                lines.push(line);
            }
        }
        if lines.len() < 3 {
            return Err(CircuitLoadError::ParsingError(anyhow!(
                "circuit header must have 3 lines"
            )));
        }

        let re = Regex::new(r"(\d+)\s*").context("Failed to compile regex")?;

        // Line 1: ngates nwires
        let line_1 = parse_to_vec(&re, &lines[0]);
        if line_1.len() != 2 {
            return Err(CircuitLoadError::ParsingError(anyhow!(
                "Expecting line to be ngates, nwires: {}",
                lines[0]
            )));
        }
        let declared_gates: usize = line_1[0]
            .parse()
            .with_context(|| format!("Failed to parse ngates: {}", line_1[0]))?;
        let num_wires: usize = line_1[1]
            .parse()
            .with_context(|| format!("Failed to parse nwires: {}", line_1[1]))?;

        // Line 2: ninputs input_a_bits input_b_bits
        let line_2 = parse_to_vec(&re, &lines[1]);
        if line_2.len() != 3 || line_2[0] != "2" {
            return Err(CircuitLoadError::ParsingError(anyhow!(
                "Expecting line to be 2, input A bits, input B bits: {}",
                lines[1]
            )));
        }
        let input_a_bits: usize = line_2[1]
            .parse()
            .with_context(|| format!("Failed to parse input A bits: {}", line_2[1]))?;
        let input_b_bits: usize = line_2[2]
            .parse()
            .with_context(|| format!("Failed to parse input B bits: {}", line_2[2]))?;

        // Line 3: noutputs output_bits
        let line_3 = parse_to_vec(&re, &lines[2]);
        if line_3.len() != 2 {
            return Err(CircuitLoadError::ParsingError(anyhow!(
                "Expecting line to be noutputs, output bits: {}",
                lines[2]
            )));
        }
        let num_outputs: usize = line_3[0]
            .parse()
            .with_context(|| format!("Failed to parse noutputs: {}", line_3[0]))?;
        let output_bits: usize = line_3[1]
            .parse()
            .with_context(|| format!("Failed to parse output bits: {}", line_3[1]))?;

        let details = CircuitDetails {
            num_wires,
            num_gates: declared_gates,
            num_outputs,
            input_a_bits,
            input_b_bits,
            output_bits,
        };
        if details.input_wires() + num_outputs * output_bits > num_wires {
            return Err(CircuitLoadError::ParsingError(anyhow!(
                "{} wires cannot hold {} input and {} output bits",
                num_wires,
                details.input_wires(),
                num_outputs * output_bits
            )));
        }

        let re = Regex::new(r"(\d+|\S+)\s*").context("Failed to compile regex")?;
        let output_start = details.output_wire_start();

        // NOT elimination side tables: `alias[w]` carries the wire that holds
        // w's value, `flipped[w]` whether that value must be negated.
        let mut alias: Vec<usize> = (0..num_wires).collect();
        let mut flipped = vec![false; num_wires];
        let mut check = WireCheck::new(details);
        let mut gates: Vec<Gate> = Vec::with_capacity(declared_gates);
        let mut line_count = 0;

        for line in &lines[3..] {
            line_count += 1;
            let tokens = parse_to_vec(&re, line);
            match tokens.first().copied() {
                Some("1") => {
                    if tokens.len() != 5 || tokens[1] != "1" {
                        return Err(CircuitLoadError::ArityMismatch(line.clone()));
                    }
                    if tokens[4] != "INV" && tokens[4] != "NOT" {
                        return Err(CircuitLoadError::UnknownOperator(tokens[4].to_string()));
                    }
                    let parent = parse_wire(tokens[2])?;
                    let output = parse_wire(tokens[3])?;
                    check.claim(output, [parent, parent])?;
                    if output >= output_start {
                        let mut table = TruthTable::INV_RIGHT;
                        if flipped[parent] {
                            table.swap_cols();
                        }
                        gates.push(Gate {
                            left_parent: alias[parent],
                            right_parent: alias[parent],
                            output,
                            table,
                        });
                    } else {
                        alias[output] = alias[parent];
                        flipped[output] = !flipped[parent];
                    }
                }
                Some("2") => {
                    if tokens.len() != 6 || tokens[1] != "1" {
                        return Err(CircuitLoadError::ArityMismatch(line.clone()));
                    }
                    let mut table = match tokens[5] {
                        "AND" => TruthTable::AND,
                        "XOR" => TruthTable::XOR,
                        "OR" => TruthTable::OR,
                        op => return Err(CircuitLoadError::UnknownOperator(op.to_string())),
                    };
                    let left = parse_wire(tokens[2])?;
                    let right = parse_wire(tokens[3])?;
                    let output = parse_wire(tokens[4])?;
                    check.claim(output, [left, right])?;
                    if flipped[left] {
                        table.swap_rows();
                    }
                    if flipped[right] {
                        table.swap_cols();
                    }
                    gates.push(Gate {
                        left_parent: alias[left],
                        right_parent: alias[right],
                        output,
                        table,
                    });
                }
                _ => return Err(CircuitLoadError::ArityMismatch(line.clone())),
            }
        }

        if line_count != declared_gates {
            return Err(CircuitLoadError::GateCountMismatch {
                declared: declared_gates,
                found: line_count,
            });
        }
        check.check_outputs(&gates)?;

        let mut details = details;
        details.num_gates = gates.len();
        Ok(Circuit { details, gates })
    }

    /// Load an RGC artifact triple written by [`Circuit::write_rgc`]:
    /// `<base>_rgc_details.txt`, `<base>_rgc.txt` and `<base>_rgc_inputA.txt`.
    /// Returns the garbled circuit and the obfuscated input A.
    pub fn load_rgc<P: AsRef<Path>>(base: P) -> Result<(Self, Vec<bool>), CircuitLoadError> {
        let base = base.as_ref();
        let details = read_rgc_details(&sibling(base, "_rgc_details.txt"))?;
        let circuit = read_rgc_gates(&sibling(base, "_rgc.txt"), details)?;
        let input_a = read_rgc_input(&sibling(base, "_rgc_inputA.txt"), details.input_a_bits)?;
        Ok((circuit, input_a))
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

fn read_rgc_details(path: &Path) -> Result<CircuitDetails, CircuitLoadError> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read circuit from {}", path.display()))?;
    let re = Regex::new(r"(\d+)\s*").context("Failed to compile regex")?;
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.len() != 3 {
        return Err(CircuitLoadError::ParsingError(anyhow!(
            "RGC details must have 3 lines"
        )));
    }
    let line_1 = parse_to_vec(&re, lines[0]);
    let line_2 = parse_to_vec(&re, lines[1]);
    let line_3 = parse_to_vec(&re, lines[2]);
    if line_1.len() != 2 || line_2.len() != 3 || line_2[0] != "2" || line_3.len() != 2 {
        return Err(CircuitLoadError::ParsingError(anyhow!(
            "malformed RGC details header"
        )));
    }
    let details = CircuitDetails {
        num_gates: parse_wire(line_1[0])?,
        num_wires: parse_wire(line_1[1])?,
        input_a_bits: parse_wire(line_2[1])?,
        input_b_bits: parse_wire(line_2[2])?,
        num_outputs: parse_wire(line_3[0])?,
        output_bits: parse_wire(line_3[1])?,
    };
    if details.input_wires() + details.num_outputs * details.output_bits > details.num_wires {
        return Err(CircuitLoadError::ParsingError(anyhow!(
            "malformed RGC details header"
        )));
    }
    Ok(details)
}

fn read_rgc_gates(path: &Path, details: CircuitDetails) -> Result<Circuit, CircuitLoadError> {
    let f = File::open(path)
        .with_context(|| format!("Failed to read circuit from {}", path.display()))?;
    let re = Regex::new(r"(\S+)\s*").context("Failed to compile regex")?;
    let mut check = WireCheck::new(details);
    let mut gates = Vec::with_capacity(details.num_gates);
    for line in BufReader::new(f).lines() {
        let line = line.context("Failed to read line")?;
        if line.trim().is_empty() {
            continue;
        }
        let tokens = parse_to_vec(&re, &line);
        if tokens.len() != 4 {
            return Err(CircuitLoadError::ArityMismatch(line.clone()));
        }
        let left_parent = parse_wire(tokens[0])?;
        let right_parent = parse_wire(tokens[1])?;
        let output = parse_wire(tokens[2])?;
        let table = TruthTable::parse(tokens[3])
            .ok_or_else(|| CircuitLoadError::ArityMismatch(line.clone()))?;
        check.claim(output, [left_parent, right_parent])?;
        gates.push(Gate {
            left_parent,
            right_parent,
            output,
            table,
        });
    }
    if gates.len() != details.num_gates {
        return Err(CircuitLoadError::GateCountMismatch {
            declared: details.num_gates,
            found: gates.len(),
        });
    }
    check.check_outputs(&gates)?;
    Ok(Circuit { details, gates })
}

fn read_rgc_input(path: &Path, bits: usize) -> Result<Vec<bool>, CircuitLoadError> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read circuit from {}", path.display()))?;
    let text = text.trim();
    if text.len() != bits {
        return Err(CircuitLoadError::ParsingError(anyhow!(
            "input file has {} bits, expected {}",
            text.len(),
            bits
        )));
    }
    text.chars()
        .map(|c| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            _ => Err(CircuitLoadError::ParsingError(anyhow!(
                "invalid input character `{}`",
                c
            ))),
        })
        .collect()
}
