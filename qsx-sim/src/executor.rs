//! Circuit execution on the state-vector and density-matrix backends
//!
//! A run creates a fresh engine for the circuit's qubit count, walks the
//! operation list once, exports the probability vector, and samples a single
//! outcome from it. Noise channels behave differently per backend: the
//! density matrix applies the Kraus map exactly, while the state vector
//! draws a trajectory: with probability p one of the channel's non-identity
//! Pauli operators is applied. Amplitude damping has no trajectory analogue
//! here and is rejected on the state-vector backend.

use crate::error::SimulatorError;
use crate::result::RunResult;
use crate::Result;
use qsx_compiler::optimize;
use qsx_core::circuit::{Circuit, OpKind};
use qsx_core::ShotRng;
use qsx_gates::{single_qubit_matrix, PAULI_X, PAULI_Y, PAULI_Z};
use qsx_state::{DensityMatrix, StateVector};

/// Simulation backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Pure-state amplitudes, O(2^n) memory, stochastic noise
    StateVector,
    /// Density matrix, O(4^n) memory, exact noise
    DensityMatrix,
}

/// Executor configuration
#[derive(Debug, Clone, Copy)]
pub struct ExecutorConfig {
    /// Which engine runs the circuit
    pub backend: Backend,
    /// Collapse the state-vector after sampling the outcome
    pub collapse: bool,
    /// Run the peephole optimizer before executing
    pub optimize: bool,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            backend: Backend::StateVector,
            collapse: true,
            optimize: false,
        }
    }
}

/// Walks circuits on a configured backend
///
/// See the crate-level example for typical use.
#[derive(Debug, Clone, Default)]
pub struct Executor {
    config: ExecutorConfig,
}

impl Executor {
    /// Create an executor with an explicit configuration
    pub fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }

    /// Create an executor for the given backend with default settings
    pub fn with_backend(backend: Backend) -> Self {
        Self {
            config: ExecutorConfig {
                backend,
                ..Default::default()
            },
        }
    }

    /// The active configuration
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Execute a circuit once with the given seed
    ///
    /// For a fixed circuit and seed the result is bit-for-bit reproducible.
    /// With `optimize` set in the configuration the peephole optimizer runs
    /// first; it preserves probabilities on every seed.
    ///
    /// # Errors
    /// - [`SimulatorError::InvalidCircuit`] if the circuit fails validation
    /// - [`SimulatorError::BackendUnsupported`] for amplitude damping on the
    ///   state-vector backend
    /// - engine failures propagated as [`SimulatorError::State`]
    pub fn run(&self, circuit: &Circuit, seed: u64) -> Result<RunResult> {
        circuit.validate()?;
        let compiled;
        let circuit = if self.config.optimize {
            compiled = optimize(circuit)?;
            &compiled
        } else {
            circuit
        };
        match self.config.backend {
            Backend::StateVector => self.run_state_vector(circuit, seed),
            Backend::DensityMatrix => self.run_density(circuit, seed),
        }
    }

    fn run_state_vector(&self, circuit: &Circuit, seed: u64) -> Result<RunResult> {
        let num_qubits = circuit.num_qubits();
        let mut state = StateVector::new(num_qubits)?;
        let mut rng = ShotRng::from_seed(seed);

        for op in circuit.iter() {
            match op.kind {
                OpKind::Cnot => state.apply_cnot(op.qubits[0], op.qubits[1])?,
                OpKind::Measure => {}
                OpKind::Dephase => {
                    if rng.uniform() < op.param {
                        state.apply_single_qubit(&PAULI_Z, op.qubits[0])?;
                    }
                }
                OpKind::Depolarize => {
                    if rng.uniform() < op.param {
                        let which = rng.uniform();
                        let pauli = if which < 1.0 / 3.0 {
                            &PAULI_X
                        } else if which < 2.0 / 3.0 {
                            &PAULI_Y
                        } else {
                            &PAULI_Z
                        };
                        state.apply_single_qubit(pauli, op.qubits[0])?;
                    }
                }
                OpKind::AmplitudeDamping => {
                    return Err(SimulatorError::BackendUnsupported {
                        op: op.kind.name(),
                        backend: "state-vector",
                    });
                }
                kind => {
                    let matrix = single_qubit_matrix(kind, op.param).ok_or(
                        SimulatorError::BackendUnsupported {
                            op: kind.name(),
                            backend: "state-vector",
                        },
                    )?;
                    state.apply_single_qubit(&matrix, op.qubits[0])?;
                }
            }
        }

        let probabilities = state.probabilities();
        let outcome = state.measure_all(&mut rng, self.config.collapse);
        Ok(RunResult {
            num_qubits,
            probabilities,
            outcome,
        })
    }

    fn run_density(&self, circuit: &Circuit, seed: u64) -> Result<RunResult> {
        let num_qubits = circuit.num_qubits();
        let mut rho = DensityMatrix::new(num_qubits)?;
        let mut rng = ShotRng::from_seed(seed);

        for op in circuit.iter() {
            match op.kind {
                OpKind::Cnot => rho.apply_cnot(op.qubits[0], op.qubits[1])?,
                OpKind::Measure => {}
                OpKind::Dephase => rho.dephase(op.qubits[0], op.param)?,
                OpKind::Depolarize => rho.depolarize(op.qubits[0], op.param)?,
                OpKind::AmplitudeDamping => rho.amplitude_damp(op.qubits[0], op.param)?,
                kind => {
                    let matrix = single_qubit_matrix(kind, op.param).ok_or(
                        SimulatorError::BackendUnsupported {
                            op: kind.name(),
                            backend: "density-matrix",
                        },
                    )?;
                    rho.apply_single_qubit(&matrix, op.qubits[0])?;
                }
            }
        }

        let probabilities = rho.diagonal();
        // One outcome per run; the density matrix is never collapsed.
        let outcome_index = sample_index(&probabilities, rng.uniform());
        let outcome = (0..num_qubits)
            .map(|q| ((outcome_index >> q) & 1) as u8)
            .collect();
        Ok(RunResult {
            num_qubits,
            probabilities,
            outcome,
        })
    }
}

/// Inverse-CDF sampling with clamping: a draw that rounding pushes past the
/// accumulated mass selects the last basis state.
fn sample_index(probabilities: &[f64], u: f64) -> usize {
    let mut acc = 0.0;
    for (i, &p) in probabilities.iter().enumerate() {
        acc += p;
        if u <= acc {
            return i;
        }
    }
    probabilities.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use qsx_core::circuit::Op;

    fn bell() -> Circuit {
        let mut c = Circuit::new(2).unwrap();
        c.push(Op::h(0)).unwrap();
        c.push(Op::cnot(0, 1)).unwrap();
        c.push(Op::measure()).unwrap();
        c
    }

    #[test]
    fn bell_probabilities_on_both_backends() {
        for backend in [Backend::StateVector, Backend::DensityMatrix] {
            let result = Executor::with_backend(backend).run(&bell(), 1).unwrap();
            assert_abs_diff_eq!(result.probabilities[0], 0.5, epsilon = 1e-9);
            assert_abs_diff_eq!(result.probabilities[1], 0.0, epsilon = 1e-9);
            assert_abs_diff_eq!(result.probabilities[2], 0.0, epsilon = 1e-9);
            assert_abs_diff_eq!(result.probabilities[3], 0.5, epsilon = 1e-9);
        }
    }

    #[test]
    fn bell_outcomes_are_correlated() {
        let executor = Executor::default();
        for seed in 0..64 {
            let result = executor.run(&bell(), seed).unwrap();
            assert_eq!(result.outcome[0], result.outcome[1]);
        }
    }

    #[test]
    fn runs_are_reproducible() {
        let executor = Executor::default();
        let a = executor.run(&bell(), 1234).unwrap();
        let b = executor.run(&bell(), 1234).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn amplitude_damping_is_rejected_on_state_vector() {
        let mut c = Circuit::new(1).unwrap();
        c.push(Op::amplitude_damping(0, 0.5)).unwrap();
        let err = Executor::default().run(&c, 0).unwrap_err();
        assert!(matches!(
            err,
            SimulatorError::BackendUnsupported { op: "AMPDAMP", .. }
        ));
    }

    #[test]
    fn amplitude_damping_runs_on_density() {
        let mut c = Circuit::new(1).unwrap();
        c.push(Op::x(0)).unwrap();
        c.push(Op::amplitude_damping(0, 1.0)).unwrap();
        c.push(Op::measure()).unwrap();
        let result = Executor::with_backend(Backend::DensityMatrix)
            .run(&c, 0)
            .unwrap();
        assert_abs_diff_eq!(result.probabilities[0], 1.0, epsilon = 1e-9);
        assert_eq!(result.outcome, vec![0]);
    }

    #[test]
    fn zero_probability_noise_is_identity_on_state_vector() {
        let mut with_noise = Circuit::new(1).unwrap();
        with_noise.push(Op::h(0)).unwrap();
        with_noise.push(Op::dephase(0, 0.0)).unwrap();
        with_noise.push(Op::measure()).unwrap();

        let result = Executor::default().run(&with_noise, 7).unwrap();
        assert_abs_diff_eq!(result.probabilities[0], 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(result.probabilities[1], 0.5, epsilon = 1e-9);
    }

    #[test]
    fn certain_dephasing_flips_phase_not_probabilities() {
        let mut c = Circuit::new(1).unwrap();
        c.push(Op::h(0)).unwrap();
        c.push(Op::dephase(0, 1.0)).unwrap();
        c.push(Op::measure()).unwrap();
        let result = Executor::default().run(&c, 3).unwrap();
        assert_abs_diff_eq!(result.probabilities[0], 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(result.probabilities[1], 0.5, epsilon = 1e-9);
    }

    #[test]
    fn pre_run_optimization_preserves_probabilities() {
        let mut c = Circuit::new(2).unwrap();
        c.push(Op::h(0)).unwrap();
        c.push(Op::rz(0, 0.3)).unwrap();
        c.push(Op::rz(0, 0.4)).unwrap();
        c.push(Op::cnot(0, 1)).unwrap();
        c.push(Op::measure()).unwrap();

        let plain = Executor::default().run(&c, 9).unwrap();
        let optimizing = Executor::new(ExecutorConfig {
            optimize: true,
            ..Default::default()
        })
        .run(&c, 9)
        .unwrap();
        for (&a, &b) in plain.probabilities.iter().zip(optimizing.probabilities.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn sample_index_clamps_to_last_state() {
        let probs = vec![0.5, 0.5 - 1e-12];
        assert_eq!(sample_index(&probs, 0.999999999999999), 1);
        assert_eq!(sample_index(&probs, 0.25), 0);
    }

    #[test]
    fn invalid_circuits_are_refused() {
        let mut c = Circuit::new(2).unwrap();
        c.push(Op::h(0)).unwrap();
        // Bypass push validation by mutating in place.
        c.op_mut(0).unwrap().qubits[0] = 7;
        assert!(matches!(
            Executor::default().run(&c, 0),
            Err(SimulatorError::InvalidCircuit(_))
        ));
    }
}
