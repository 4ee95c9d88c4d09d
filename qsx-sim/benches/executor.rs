use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qsx_core::generators::ghz;
use qsx_sim::{Backend, Executor};

fn bench_ghz_state_vector(c: &mut Criterion) {
    let mut group = c.benchmark_group("ghz_state_vector");
    for num_qubits in [8usize, 12, 16] {
        let circuit = ghz(num_qubits).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(num_qubits),
            &circuit,
            |b, circuit| {
                let executor = Executor::default();
                b.iter(|| executor.run(black_box(circuit), 42).unwrap());
            },
        );
    }
    group.finish();
}

fn bench_ghz_density(c: &mut Criterion) {
    let mut group = c.benchmark_group("ghz_density");
    for num_qubits in [4usize, 6, 8] {
        let circuit = ghz(num_qubits).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(num_qubits),
            &circuit,
            |b, circuit| {
                let executor = Executor::with_backend(Backend::DensityMatrix);
                b.iter(|| executor.run(black_box(circuit), 42).unwrap());
            },
        );
    }
    group.finish();
}

fn bench_shot_loop(c: &mut Criterion) {
    let circuit = ghz(10).unwrap();
    c.bench_function("ghz10_100_shots", |b| {
        let executor = Executor::default();
        b.iter(|| executor.sample(black_box(&circuit), 7, 100).unwrap());
    });
}

criterion_group!(benches, bench_ghz_state_vector, bench_ghz_density, bench_shot_loop);
criterion_main!(benches);
