//! Evaluate a reusable garbled circuit stored as RGC artifact files.
//!
//! ```text
//! cargo run --example evaluator -- --rgc adder64 --input-b 17
//! ```

use circuit::Circuit;
use crypto_core::{bits_to_u64, random_bits, u64_to_bits};
use rand::rngs::OsRng;
use std::time::Instant;
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(name = "evaluator", about = "CRGC evaluator")]
struct Opt {
    /// Base path of the RGC artifact files.
    #[structopt(long)]
    rgc: String,

    /// Evaluator input: "r" for random or a decimal integer.
    #[structopt(long, default_value = "r")]
    input_b: String,
}

fn main() {
    let opt = Opt::from_args();

    let start = Instant::now();
    let (circ, input_a) = Circuit::load_rgc(&opt.rgc).expect("failed to load RGC files");
    println!(
        "loaded {} gates, {} wires in {:?}",
        circ.details.num_gates,
        circ.details.num_wires,
        start.elapsed()
    );

    let input_b = if opt.input_b == "r" {
        random_bits(&mut OsRng, circ.details.input_b_bits).expect("secure randomness unavailable")
    } else {
        let value: u64 = opt.input_b.parse().expect("input must be `r` or an integer");
        u64_to_bits(value, circ.details.input_b_bits)
    };

    let start = Instant::now();
    let output = circ.evaluate(&input_a, &input_b).expect("evaluation failed");
    println!("evaluated in {:?}", start.elapsed());

    if circ.details.output_bits <= 64 && circ.details.num_outputs == 1 {
        println!("output: {}", bits_to_u64(&output));
    } else {
        let line: String = output.iter().map(|b| if *b { '1' } else { '0' }).collect();
        println!("output: {}", line);
    }
}
