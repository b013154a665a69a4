use circuit::Circuit;
use criterion::{criterion_group, criterion_main, Criterion};
use crypto_core::u64_to_bits;
use std::time::Duration;

fn bench_adder64_circuit_eval(c: &mut Criterion) {
    c.bench_function("adder64_circuit_eval", |b| {
        let circ = Circuit::load("circuit_files/bristol/adder64.txt").unwrap();
        let input_a = u64_to_bits(u64::MAX, 64);
        let input_b = u64_to_bits(1, 64);
        b.iter(|| {
            let res = circ.evaluate(&input_a, &input_b).unwrap();
            criterion::black_box(res);
        });
    });
}

fn bench_sub64_circuit_eval(c: &mut Criterion) {
    c.bench_function("sub64_circuit_eval", |b| {
        let circ = Circuit::load("circuit_files/bristol/sub64.txt").unwrap();
        let input_a = u64_to_bits(100, 64);
        let input_b = u64_to_bits(50, 64);
        b.iter(|| {
            let res = circ.evaluate(&input_a, &input_b).unwrap();
            criterion::black_box(res);
        });
    });
}

criterion_group! {
    name = circuit_eval;
    config = Criterion::default().warm_up_time(Duration::from_millis(100));
    targets = bench_adder64_circuit_eval, bench_sub64_circuit_eval
}
criterion_main!(circuit_eval);
