//! End-to-end scenarios: canonical circuits with known distributions.

use approx::assert_abs_diff_eq;
use qsx_compiler::{map_to_line, optimize};
use qsx_core::generators::{bernstein_vazirani, ghz};
use qsx_core::{parse_circuit, Circuit, Op, OpKind};
use qsx_sim::{Backend, Executor};

#[test]
fn bell_pair_distribution_and_outcomes() {
    let circuit = parse_circuit("H 0\nCNOT 0 1\nMEASURE ALL\n").unwrap();
    let executor = Executor::default();
    for seed in 0..32 {
        let result = executor.run(&circuit, seed).unwrap();
        assert_abs_diff_eq!(result.probabilities[0], 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(result.probabilities[1], 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.probabilities[2], 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.probabilities[3], 0.5, epsilon = 1e-9);
        let bits = result.bitstring();
        assert!(bits == "00" || bits == "11", "unexpected outcome {}", bits);
    }
}

#[test]
fn ghz_three_qubits() {
    let circuit = ghz(3).unwrap();
    let executor = Executor::default();
    for seed in 0..32 {
        let result = executor.run(&circuit, seed).unwrap();
        assert_abs_diff_eq!(result.probabilities[0], 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(result.probabilities[7], 0.5, epsilon = 1e-9);
        for i in 1..7 {
            assert_abs_diff_eq!(result.probabilities[i], 0.0, epsilon = 1e-9);
        }
        let bits = result.bitstring();
        assert!(bits == "000" || bits == "111", "unexpected outcome {}", bits);
    }
}

#[test]
fn hadamard_pair_optimizes_to_nothing() {
    let circuit = parse_circuit("H 0\nH 0\n").unwrap();
    let optimized = optimize(&circuit).unwrap();
    assert!(optimized.is_empty());
}

#[test]
fn line_mapping_of_a_distant_cnot() {
    let circuit = parse_circuit("H 0\nCNOT 0 2\n").unwrap();
    let mapped = map_to_line(&circuit).unwrap();
    assert!(mapped.len() >= circuit.len());
    let last_cnot = mapped
        .iter()
        .filter(|op| op.kind == OpKind::Cnot)
        .last()
        .expect("mapped circuit keeps a CNOT");
    assert_eq!(last_cnot.qubits[0].abs_diff(last_cnot.qubits[1]), 1);
}

#[test]
fn zero_probability_dephasing_matches_the_clean_circuit() {
    let noisy = parse_circuit("H 0\nDEPHASE 0 0.0\nMEASURE ALL\n").unwrap();
    let clean = parse_circuit("H 0\nMEASURE ALL\n").unwrap();
    let executor = Executor::default();

    let mut noisy_ones = 0usize;
    let mut clean_ones = 0usize;
    let shots: u64 = 2000;
    for seed in 0..shots {
        let nr = executor.run(&noisy, seed).unwrap();
        assert_abs_diff_eq!(nr.probabilities[0], 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(nr.probabilities[1], 0.5, epsilon = 1e-9);
        noisy_ones += nr.outcome[0] as usize;
        clean_ones += executor.run(&clean, seed).unwrap().outcome[0] as usize;
    }
    // Same Bernoulli(1/2) distribution for both circuits.
    let noisy_freq = noisy_ones as f64 / shots as f64;
    let clean_freq = clean_ones as f64 / shots as f64;
    assert!((noisy_freq - 0.5).abs() < 0.05, "freq {}", noisy_freq);
    assert!((clean_freq - 0.5).abs() < 0.05, "freq {}", clean_freq);
}

#[test]
fn bernstein_vazirani_recovers_the_mask() {
    let mask = [true, false, true, true];
    let circuit = bernstein_vazirani(&mask).unwrap();
    let result = Executor::default().run(&circuit, 99).unwrap();
    for (q, &bit) in mask.iter().enumerate() {
        assert_eq!(result.outcome[q] == 1, bit, "qubit {}", q);
    }
}

#[test]
fn density_backend_models_amplitude_damping() {
    let mut circuit = Circuit::new(1).unwrap();
    circuit.push(Op::x(0)).unwrap();
    circuit.push(Op::amplitude_damping(0, 0.3)).unwrap();
    circuit.push(Op::measure()).unwrap();
    let result = Executor::with_backend(Backend::DensityMatrix)
        .run(&circuit, 5)
        .unwrap();
    assert_abs_diff_eq!(result.probabilities[0], 0.3, epsilon = 1e-9);
    assert_abs_diff_eq!(result.probabilities[1], 0.7, epsilon = 1e-9);
}

#[test]
fn heavy_dephasing_splits_the_density_outcomes() {
    // |+⟩ fully dephased is the maximally mixed qubit.
    let mut circuit = Circuit::new(1).unwrap();
    circuit.push(Op::h(0)).unwrap();
    circuit.push(Op::dephase(0, 0.5)).unwrap();
    circuit.push(Op::measure()).unwrap();
    let result = Executor::with_backend(Backend::DensityMatrix)
        .run(&circuit, 2)
        .unwrap();
    assert_abs_diff_eq!(result.probabilities[0], 0.5, epsilon = 1e-9);
    assert_abs_diff_eq!(result.probabilities[1], 0.5, epsilon = 1e-9);
}
