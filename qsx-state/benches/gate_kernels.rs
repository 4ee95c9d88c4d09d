use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qsx_gates::{rotation_z, HADAMARD};
use qsx_state::StateVector;

fn bench_single_qubit(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_qubit_gate");
    for num_qubits in [10usize, 14, 18] {
        group.bench_with_input(
            BenchmarkId::from_parameter(num_qubits),
            &num_qubits,
            |b, &n| {
                let mut sv = StateVector::new(n).unwrap();
                b.iter(|| {
                    sv.apply_single_qubit(black_box(&HADAMARD), black_box(n / 2))
                        .unwrap();
                });
            },
        );
    }
    group.finish();
}

fn bench_cnot(c: &mut Criterion) {
    let mut group = c.benchmark_group("cnot");
    for num_qubits in [10usize, 14, 18] {
        group.bench_with_input(
            BenchmarkId::from_parameter(num_qubits),
            &num_qubits,
            |b, &n| {
                let mut sv = StateVector::new(n).unwrap();
                b.iter(|| {
                    sv.apply_cnot(black_box(0), black_box(n - 1)).unwrap();
                });
            },
        );
    }
    group.finish();
}

fn bench_layered_rotations(c: &mut Criterion) {
    c.bench_function("rotation_layer_12q", |b| {
        let mut sv = StateVector::new(12).unwrap();
        b.iter(|| {
            for q in 0..12 {
                sv.apply_single_qubit(&rotation_z(0.01 * q as f64), q).unwrap();
            }
        });
    });
}

criterion_group!(benches, bench_single_qubit, bench_cnot, bench_layered_rotations);
criterion_main!(benches);
