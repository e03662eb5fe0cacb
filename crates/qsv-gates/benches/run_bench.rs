//! Benchmarks for circuit construction and state-vector runs
//!
//! Run with: cargo bench -p qsv-gates

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qsv_gates::circuit;
use qsv_ir::{Circuit, GateArgs, SimulatorConfig};
use std::f64::consts::PI;

/// H on every qubit followed by a CX ladder.
fn ghz_like(n: usize) -> Circuit {
    let mut c = circuit().with_config(SimulatorConfig::new().with_seed(0));
    c.gate("h").unwrap().bind(0..n).unwrap();
    for q in 0..n.saturating_sub(1) {
        c.gate("cx").unwrap().bind((q, q + 1)).unwrap();
    }
    c
}

/// Benchmark binding gates onto a circuit
fn bench_binding(c: &mut Criterion) {
    let mut group = c.benchmark_group("binding");

    group.bench_function("h_gate", |b| {
        let mut circuit = circuit();
        b.iter(|| {
            circuit.gate("h").unwrap().bind(black_box(0)).unwrap();
        });
    });

    group.bench_function("rz_gate", |b| {
        let mut circuit = circuit();
        b.iter(|| {
            circuit
                .gate("rz")
                .unwrap()
                .with_args(GateArgs::new().arg(black_box(PI / 4.0)))
                .bind(black_box(0))
                .unwrap();
        });
    });

    group.bench_function("cx_gate", |b| {
        let mut circuit = circuit();
        b.iter(|| {
            circuit.gate("cx").unwrap().bind(black_box((0, 1))).unwrap();
        });
    });

    group.finish();
}

/// Benchmark full runs for increasing register sizes
fn bench_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("run");

    for n in [2_usize, 6, 10, 14] {
        group.bench_with_input(BenchmarkId::new("ghz", n), &n, |b, &n| {
            let mut circuit = ghz_like(n);
            b.iter(|| black_box(circuit.run().unwrap()));
        });
    }

    group.finish();
}

/// Benchmark sampling with measurement
fn bench_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample");

    for n in [2_usize, 8] {
        group.bench_with_input(BenchmarkId::new("ghz_100_shots", n), &n, |b, &n| {
            b.iter(|| {
                let mut circuit = ghz_like(n);
                circuit.gate("m").unwrap().bind(..).unwrap();
                black_box(circuit.sample(100).unwrap())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_binding, bench_run, bench_sample);
criterion_main!(benches);
