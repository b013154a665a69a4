//! Transform a Bristol circuit into a reusable garbled circuit on disk.
//!
//! ```text
//! cargo run --example generator -- --circuit ../circuit/circuit_files/bristol/adder64.txt \
//!     --out adder64 --input-a 42 --input-b 17
//! ```

use circuit::Circuit;
use crgc::{garble, predict_leakage};
use crypto_core::{bits_to_u64, random_bits, u64_to_bits};
use rand::rngs::OsRng;
use std::time::Instant;
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(name = "generator", about = "CRGC generator")]
struct Opt {
    /// Bristol circuit file to transform.
    #[structopt(long)]
    circuit: String,

    /// Base path for the RGC artifact files.
    #[structopt(long)]
    out: String,

    /// Generator input: "r" for random or a decimal integer.
    #[structopt(long, default_value = "r")]
    input_a: String,

    /// Evaluator input used for the verification run.
    #[structopt(long, default_value = "r")]
    input_b: String,
}

fn parse_input(spec: &str, bits: usize) -> Vec<bool> {
    if spec == "r" {
        random_bits(&mut OsRng, bits).expect("secure randomness unavailable")
    } else {
        let value: u64 = spec.parse().expect("input must be `r` or an integer");
        u64_to_bits(value, bits)
    }
}

fn main() {
    let opt = Opt::from_args();

    let start = Instant::now();
    let mut circ = Circuit::load(&opt.circuit).expect("failed to load circuit");
    println!(
        "loaded {} gates, {} wires in {:?}",
        circ.details.num_gates,
        circ.details.num_wires,
        start.elapsed()
    );

    let report = predict_leakage(&circ);
    println!(
        "{} hidden gate wires, {} leaked input bits: {:?}",
        report.hidden_wires,
        report.leaked_inputs.len(),
        report.leaked_inputs
    );

    let input_a = parse_input(&opt.input_a, circ.details.input_a_bits);
    let input_b = parse_input(&opt.input_b, circ.details.input_b_bits);
    let original = circ.evaluate(&input_a, &input_b).expect("evaluation failed");

    let start = Instant::now();
    let a_prime = garble(&mut circ, &input_a, &mut OsRng).expect("garbling failed");
    println!("garbled in {:?}", start.elapsed());

    let garbled_out = circ.evaluate(&a_prime, &input_b).expect("evaluation failed");
    assert_eq!(
        garbled_out, original,
        "garbled circuit disagrees with the original"
    );
    if circ.details.output_bits <= 64 && circ.details.num_outputs == 1 {
        println!("verified: output {}", bits_to_u64(&original));
    } else {
        println!("verified: outputs match");
    }

    circ.write_rgc(&opt.out, &a_prime).expect("failed to write RGC files");
    println!("wrote {}_rgc_details.txt, {}_rgc.txt, {}_rgc_inputA.txt", opt.out, opt.out, opt.out);
}
