use crgc::tlp::{pgen, psetup, psolve, SequentialCircuit};
use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::OsRng;
use std::time::Duration;

fn bench_psetup(c: &mut Criterion) {
    c.bench_function("tlp_psetup_xor_mixing_t8", |b| {
        b.iter(|| {
            let pp = psetup(256, 8, &SequentialCircuit::XorMixing, &mut OsRng).unwrap();
            criterion::black_box(pp);
        });
    });
}

fn bench_pgen(c: &mut Criterion) {
    c.bench_function("tlp_pgen_xor_mixing_t8", |b| {
        let pp = psetup(256, 8, &SequentialCircuit::XorMixing, &mut OsRng).unwrap();
        b.iter(|| {
            let puzzle = pgen(&pp, true, &mut OsRng).unwrap();
            criterion::black_box(puzzle);
        });
    });
}

fn bench_psolve(c: &mut Criterion) {
    c.bench_function("tlp_psolve_xor_mixing_t8", |b| {
        let pp = psetup(256, 8, &SequentialCircuit::XorMixing, &mut OsRng).unwrap();
        let puzzle = pgen(&pp, true, &mut OsRng).unwrap();
        b.iter(|| {
            let secret = psolve(&pp, &puzzle).unwrap();
            criterion::black_box(secret);
        });
    });
}

criterion_group! {
    name = tlp;
    config = Criterion::default().warm_up_time(Duration::from_millis(100));
    targets = bench_psetup, bench_pgen, bench_psolve
}
criterion_main!(tlp);
