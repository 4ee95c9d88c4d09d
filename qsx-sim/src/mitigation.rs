//! Readout-error mitigation
//!
//! Readout error is modeled per qubit by a 2×2 assignment matrix
//! M = [[1−p01, p10], [p01, 1−p10]], where p01 is the probability of
//! reporting 1 for a true 0 and p10 the reverse. The full-register model is
//! M⊗…⊗M, so applying M⁻¹ along each qubit axis in turn (a radix-2
//! butterfly over the probability vector) inverts it exactly. Numerical
//! noise can leave slightly negative entries; those are clipped and the
//! vector renormalized.

use crate::error::SimulatorError;
use crate::Result;

/// Per-qubit readout assignment matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssignmentMatrix {
    p01: f64,
    p10: f64,
}

impl AssignmentMatrix {
    /// Create an assignment matrix from the two flip probabilities
    ///
    /// # Errors
    /// Returns [`SimulatorError::ProbabilityOutOfRange`] if either
    /// probability is outside [0, 1].
    pub fn new(p01: f64, p10: f64) -> Result<Self> {
        for p in [p01, p10] {
            if !(0.0..=1.0).contains(&p) {
                return Err(SimulatorError::ProbabilityOutOfRange(p));
            }
        }
        Ok(Self { p01, p10 })
    }

    /// Pr(report 1 | true 0)
    pub fn p01(&self) -> f64 {
        self.p01
    }

    /// Pr(report 0 | true 1)
    pub fn p10(&self) -> f64 {
        self.p10
    }

    /// det M = (1−p01)(1−p10) − p01·p10
    pub fn determinant(&self) -> f64 {
        (1.0 - self.p01) * (1.0 - self.p10) - self.p01 * self.p10
    }

    /// Row-major entries [[a, b], [c, d]] of M
    fn entries(&self) -> [f64; 4] {
        [1.0 - self.p01, self.p10, self.p01, 1.0 - self.p10]
    }

    /// Row-major entries of M⁻¹
    ///
    /// # Errors
    /// Returns [`SimulatorError::Singular`] when det M = 0.
    fn inverse_entries(&self) -> Result<[f64; 4]> {
        let det = self.determinant();
        if det == 0.0 {
            return Err(SimulatorError::Singular);
        }
        let [a, b, c, d] = self.entries();
        Ok([d / det, -b / det, -c / det, a / det])
    }
}

/// Invert per-qubit readout error on a probability vector
///
/// Applies M⁻¹ along every qubit axis, clips negative entries, and
/// renormalizes to unit sum.
///
/// # Errors
/// - [`SimulatorError::Singular`] when the assignment matrix has no inverse
/// - [`SimulatorError::DimensionMismatch`] when the vector length is not
///   2^num_qubits
///
/// # Example
/// ```
/// use qsx_sim::{apply_readout_error, mitigate_readout, AssignmentMatrix};
///
/// let m = AssignmentMatrix::new(0.02, 0.04).unwrap();
/// let ideal = vec![0.5, 0.0, 0.0, 0.5];
/// let noisy = apply_readout_error(&ideal, 2, &m).unwrap();
/// let recovered = mitigate_readout(&noisy, 2, &m).unwrap();
/// for (r, i) in recovered.iter().zip(ideal.iter()) {
///     assert!((r - i).abs() < 1e-12);
/// }
/// ```
pub fn mitigate_readout(
    probabilities: &[f64],
    num_qubits: usize,
    matrix: &AssignmentMatrix,
) -> Result<Vec<f64>> {
    let entries = matrix.inverse_entries()?;
    let mut out = butterfly(probabilities, num_qubits, &entries)?;
    let mut sum = 0.0;
    for v in &mut out {
        if *v < 0.0 {
            *v = 0.0;
        }
        sum += *v;
    }
    if sum > 0.0 {
        for v in &mut out {
            *v /= sum;
        }
    }
    Ok(out)
}

/// Apply per-qubit readout error to an ideal probability vector
///
/// The forward direction of [`mitigate_readout`]: useful for constructing
/// noisy distributions and for round-trip checks.
///
/// # Errors
/// Returns [`SimulatorError::DimensionMismatch`] when the vector length is
/// not 2^num_qubits.
pub fn apply_readout_error(
    probabilities: &[f64],
    num_qubits: usize,
    matrix: &AssignmentMatrix,
) -> Result<Vec<f64>> {
    butterfly(probabilities, num_qubits, &matrix.entries())
}

/// Apply a 2×2 matrix along every qubit axis of a probability vector
fn butterfly(probabilities: &[f64], num_qubits: usize, m: &[f64; 4]) -> Result<Vec<f64>> {
    let dim = 1usize << num_qubits;
    if probabilities.len() != dim {
        return Err(SimulatorError::DimensionMismatch {
            expected: dim,
            actual: probabilities.len(),
        });
    }
    let [a, b, c, d] = *m;
    let mut out = probabilities.to_vec();
    for q in 0..num_qubits {
        let step = 1usize << q;
        let mut base = 0;
        while base < dim {
            for i in base..base + step {
                let x0 = out[i];
                let x1 = out[i + step];
                out[i] = a * x0 + b * x1;
                out[i + step] = c * x0 + d * x1;
            }
            base += 2 * step;
        }
    }
    Ok(out)
}
