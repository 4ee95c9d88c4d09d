//! Parameter-shift gradients
//!
//! For rotation gates the derivative of an expectation value is exact:
//! ∂⟨Z_q⟩/∂θ = ½ (⟨Z_q⟩_{θ+π/2} − ⟨Z_q⟩_{θ−π/2}). Both shifted circuits run
//! on the state-vector backend with the *same* seed and without collapse, so
//! trajectory noise cancels between the two evaluations and the probability
//! vectors come straight from the amplitudes.

use crate::error::SimulatorError;
use crate::executor::{Backend, Executor, ExecutorConfig};
use crate::observable::z_expectations;
use crate::Result;
use qsx_core::circuit::Circuit;
use rayon::prelude::*;
use std::f64::consts::FRAC_PI_2;

/// Gradient of every per-qubit ⟨Z⟩ with respect to selected rotation angles
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GradientResult {
    /// Circuit indices of the differentiated rotations
    pub param_op_indices: Vec<usize>,
    /// `grads[k][q]` = ∂⟨Z_q⟩ / ∂θ at `param_op_indices[k]`
    pub grads: Vec<Vec<f64>>,
}

/// Evaluate parameter-shift gradients of ⟨Z_q⟩ for all qubits q
///
/// With an empty `wrt` slice every RX/RY/RZ in the circuit is
/// differentiated; otherwise only the listed operation indices are, in the
/// order given.
///
/// # Errors
/// Returns [`SimulatorError::NotParameterized`] if a requested index does
/// not refer to a rotation.
///
/// # Example
/// ```
/// use qsx_core::{Circuit, Op};
/// use qsx_sim::parameter_shift;
///
/// let mut c = Circuit::new(1).unwrap();
/// c.push(Op::ry(0, std::f64::consts::FRAC_PI_3)).unwrap();
/// let g = parameter_shift(&c, &[], 1).unwrap();
/// let expected = -(std::f64::consts::FRAC_PI_3).sin();
/// assert!((g.grads[0][0] - expected).abs() < 1e-9);
/// ```
pub fn parameter_shift(circuit: &Circuit, wrt: &[usize], seed: u64) -> Result<GradientResult> {
    let param_op_indices = if wrt.is_empty() {
        circuit.parameterized_indices()
    } else {
        for &index in wrt {
            let is_rotation = circuit
                .ops()
                .get(index)
                .is_some_and(|op| op.kind.is_rotation());
            if !is_rotation {
                return Err(SimulatorError::NotParameterized { index });
            }
        }
        wrt.to_vec()
    };

    let grads = param_op_indices
        .par_iter()
        .map(|&index| {
            let plus = shifted_z_expectations(circuit, index, FRAC_PI_2, seed)?;
            let minus = shifted_z_expectations(circuit, index, -FRAC_PI_2, seed)?;
            Ok(plus
                .iter()
                .zip(minus.iter())
                .map(|(p, m)| 0.5 * (p - m))
                .collect())
        })
        .collect::<Result<Vec<Vec<f64>>>>()?;

    Ok(GradientResult {
        param_op_indices,
        grads,
    })
}

/// ⟨Z⟩ vector of the circuit with one rotation angle shifted by `delta`
fn shifted_z_expectations(
    circuit: &Circuit,
    index: usize,
    delta: f64,
    seed: u64,
) -> Result<Vec<f64>> {
    let mut shifted = circuit.clone();
    if let Some(op) = shifted.op_mut(index) {
        op.param += delta;
    }
    let executor = Executor::new(ExecutorConfig {
        backend: Backend::StateVector,
        collapse: false,
        ..Default::default()
    });
    let result = executor.run(&shifted, seed)?;
    Ok(z_expectations(&result.probabilities, result.num_qubits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use qsx_core::circuit::Op;

    #[test]
    fn single_ry_gradient_is_minus_sine() {
        let theta = std::f64::consts::PI / 3.0;
        let mut c = Circuit::new(1).unwrap();
        c.push(Op::ry(0, theta)).unwrap();
        let g = parameter_shift(&c, &[], 0).unwrap();
        assert_eq!(g.param_op_indices, vec![0]);
        assert_abs_diff_eq!(g.grads[0][0], -theta.sin(), epsilon = 1e-9);
    }

    #[test]
    fn all_rotations_are_differentiated_by_default() {
        let mut c = Circuit::new(2).unwrap();
        c.push(Op::h(0)).unwrap();
        c.push(Op::rx(0, 0.4)).unwrap();
        c.push(Op::cnot(0, 1)).unwrap();
        c.push(Op::rz(1, 0.9)).unwrap();
        let g = parameter_shift(&c, &[], 3).unwrap();
        assert_eq!(g.param_op_indices, vec![1, 3]);
        assert_eq!(g.grads.len(), 2);
        assert_eq!(g.grads[0].len(), 2);
    }

    #[test]
    fn explicit_subset_is_respected() {
        let mut c = Circuit::new(1).unwrap();
        c.push(Op::rx(0, 0.2)).unwrap();
        c.push(Op::ry(0, 0.3)).unwrap();
        let g = parameter_shift(&c, &[1], 0).unwrap();
        assert_eq!(g.param_op_indices, vec![1]);
        assert_eq!(g.grads.len(), 1);
    }

    #[test]
    fn non_rotation_index_is_rejected() {
        let mut c = Circuit::new(1).unwrap();
        c.push(Op::h(0)).unwrap();
        assert!(matches!(
            parameter_shift(&c, &[0], 0),
            Err(SimulatorError::NotParameterized { index: 0 })
        ));
        assert!(matches!(
            parameter_shift(&c, &[9], 0),
            Err(SimulatorError::NotParameterized { index: 9 })
        ));
    }

    #[test]
    fn rz_after_hadamard_has_flat_z_gradient() {
        // ⟨Z⟩ of H|0⟩ is insensitive to a Z rotation.
        let mut c = Circuit::new(1).unwrap();
        c.push(Op::h(0)).unwrap();
        c.push(Op::rz(0, 0.7)).unwrap();
        let g = parameter_shift(&c, &[], 0).unwrap();
        assert_abs_diff_eq!(g.grads[0][0], 0.0, epsilon = 1e-9);
    }
}
