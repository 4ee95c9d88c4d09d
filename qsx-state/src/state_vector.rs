//! Pure-state amplitude vector engine
//!
//! Stores the 2^n complex amplitudes of an n-qubit register contiguously,
//! indexed by basis state. Single-qubit gates update the disjoint pairs
//! (i, i | 1<<q) in place; CNOT swaps amplitudes where the control bit is
//! set. Norm drift from long gate sequences is repaired by a compensated-sum
//! renormalization every [`RENORM_INTERVAL`] gate applications and
//! unconditionally before measurement or probability export.

use crate::error::StateError;
use crate::parallel::for_each_chunk;
use crate::Result;
use qsx_core::types::{Complex, Matrix2, Real};
use qsx_core::ShotRng;

/// Gate applications between periodic renormalizations.
pub const RENORM_INTERVAL: usize = 256;

/// Amplitude vector of a pure n-qubit state
///
/// # Example
/// ```
/// use qsx_state::StateVector;
///
/// let state = StateVector::new(2).unwrap();
/// assert_eq!(state.num_qubits(), 2);
/// assert_eq!(state.dimension(), 4);
/// assert_eq!(state.amplitudes()[0].re, 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct StateVector {
    num_qubits: usize,
    dimension: usize,
    amps: Vec<Complex>,
    gates_since_renorm: usize,
}

impl StateVector {
    /// Create a state vector initialized to |0...0⟩
    ///
    /// # Errors
    /// Returns [`StateError::DimensionOverflow`] if 2^n is not addressable.
    pub fn new(num_qubits: usize) -> Result<Self> {
        let dimension = 1usize
            .checked_shl(num_qubits as u32)
            .ok_or(StateError::DimensionOverflow { num_qubits })?;
        let mut amps = vec![Complex::new(0.0, 0.0); dimension];
        amps[0] = Complex::new(1.0, 0.0);
        Ok(Self {
            num_qubits,
            dimension,
            amps,
            gates_since_renorm: 0,
        })
    }

    /// Create a state vector from raw amplitudes
    ///
    /// The buffer is taken as-is; no normalization is applied.
    ///
    /// # Errors
    /// Returns [`StateError::DimensionMismatch`] if the length is not
    /// 2^num_qubits.
    pub fn from_amplitudes(num_qubits: usize, amplitudes: Vec<Complex>) -> Result<Self> {
        let dimension = 1usize
            .checked_shl(num_qubits as u32)
            .ok_or(StateError::DimensionOverflow { num_qubits })?;
        if amplitudes.len() != dimension {
            return Err(StateError::DimensionMismatch {
                expected: dimension,
                actual: amplitudes.len(),
            });
        }
        Ok(Self {
            num_qubits,
            dimension,
            amps: amplitudes,
            gates_since_renorm: 0,
        })
    }

    /// Number of qubits
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// State dimension (2^num_qubits)
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// The amplitude buffer
    #[inline]
    pub fn amplitudes(&self) -> &[Complex] {
        &self.amps
    }

    /// Apply a 2×2 unitary to `qubit`
    ///
    /// # Errors
    /// Returns [`StateError::InvalidQubitIndex`] if `qubit >= num_qubits`.
    pub fn apply_single_qubit(&mut self, matrix: &Matrix2, qubit: usize) -> Result<()> {
        self.check_qubit(qubit)?;
        let mask = 1usize << qubit;
        let [[m00, m01], [m10, m11]] = *matrix;
        for_each_chunk(&mut self.amps, 2 * mask, move |_, chunk| {
            let (lo, hi) = chunk.split_at_mut(mask);
            for (a0, a1) in lo.iter_mut().zip(hi.iter_mut()) {
                let x0 = *a0;
                let x1 = *a1;
                *a0 = m00 * x0 + m01 * x1;
                *a1 = m10 * x0 + m11 * x1;
            }
        });
        self.count_gate();
        Ok(())
    }

    /// Apply CNOT with the given control and target
    ///
    /// Swaps the amplitude pairs whose control bit is set.
    ///
    /// # Errors
    /// Returns [`StateError::InvalidQubitIndex`] for an out-of-range operand
    /// and [`StateError::ControlEqualsTarget`] if the operands coincide.
    pub fn apply_cnot(&mut self, control: usize, target: usize) -> Result<()> {
        self.check_qubit(control)?;
        self.check_qubit(target)?;
        if control == target {
            return Err(StateError::ControlEqualsTarget(control));
        }
        let cm = 1usize << control;
        let tm = 1usize << target;
        for_each_chunk(&mut self.amps, 2 * tm, move |chunk_idx, chunk| {
            let base = chunk_idx * 2 * tm;
            let (lo, hi) = chunk.split_at_mut(tm);
            for k in 0..tm {
                if (base + k) & cm != 0 {
                    std::mem::swap(&mut lo[k], &mut hi[k]);
                }
            }
        });
        Ok(())
    }

    /// Apply a 2×2 unitary to `target`, conditioned on `control` being 1
    ///
    /// # Errors
    /// Same conditions as [`StateVector::apply_cnot`].
    pub fn apply_controlled_single_qubit(
        &mut self,
        matrix: &Matrix2,
        control: usize,
        target: usize,
    ) -> Result<()> {
        self.check_qubit(control)?;
        self.check_qubit(target)?;
        if control == target {
            return Err(StateError::ControlEqualsTarget(control));
        }
        let cm = 1usize << control;
        let tm = 1usize << target;
        let [[m00, m01], [m10, m11]] = *matrix;
        for_each_chunk(&mut self.amps, 2 * tm, move |chunk_idx, chunk| {
            let base = chunk_idx * 2 * tm;
            let (lo, hi) = chunk.split_at_mut(tm);
            for k in 0..tm {
                if (base + k) & cm != 0 {
                    let x0 = lo[k];
                    let x1 = hi[k];
                    lo[k] = m00 * x0 + m01 * x1;
                    hi[k] = m10 * x0 + m11 * x1;
                }
            }
        });
        self.count_gate();
        Ok(())
    }

    /// Probability of observing basis state `index`
    ///
    /// # Errors
    /// Returns [`StateError::BasisIndexOutOfRange`] if `index >= 2^n`.
    pub fn probability_of(&self, index: usize) -> Result<f64> {
        let amp = self
            .amps
            .get(index)
            .ok_or(StateError::BasisIndexOutOfRange {
                index,
                dimension: self.dimension,
            })?;
        Ok(amp.norm_sqr() as f64)
    }

    /// The full probability vector over basis states
    ///
    /// Renormalizes before exporting, so the result sums to 1 up to
    /// floating-point error.
    pub fn probabilities(&mut self) -> Vec<f64> {
        self.renormalize();
        self.amps.iter().map(|a| a.norm_sqr() as f64).collect()
    }

    /// Measure all qubits in the computational basis
    ///
    /// Draws one outcome by inverse-CDF sampling against a single uniform
    /// variate; a draw that lands marginally above the accumulated mass
    /// selects the last basis state. Bit `q` of the returned vector is the
    /// measured value of qubit `q`. With `collapse`, the state jumps to the
    /// observed basis state.
    pub fn measure_all(&mut self, rng: &mut ShotRng, collapse: bool) -> Vec<u8> {
        self.renormalize();
        let u = rng.uniform();
        let mut acc = 0.0f64;
        let mut outcome = self.dimension - 1;
        for (i, amp) in self.amps.iter().enumerate() {
            acc += amp.norm_sqr() as f64;
            if u <= acc {
                outcome = i;
                break;
            }
        }
        let bits = (0..self.num_qubits)
            .map(|q| ((outcome >> q) & 1) as u8)
            .collect();
        if collapse {
            self.amps.fill(Complex::new(0.0, 0.0));
            self.amps[outcome] = Complex::new(1.0, 0.0);
            self.gates_since_renorm = 0;
        }
        bits
    }

    /// Rescale the amplitudes to unit norm
    ///
    /// The squared norm is accumulated with compensated summation so the
    /// correction itself does not introduce drift on large registers.
    pub fn renormalize(&mut self) {
        let mut norm2 = 0.0f64;
        let mut comp = 0.0f64;
        for amp in &self.amps {
            let y = amp.norm_sqr() as f64 - comp;
            let t = norm2 + y;
            comp = (t - norm2) - y;
            norm2 = t;
        }
        if norm2 == 0.0 {
            return;
        }
        let inv = (1.0 / norm2.sqrt()) as Real;
        for amp in &mut self.amps {
            *amp = *amp * inv;
        }
        self.gates_since_renorm = 0;
    }

    fn count_gate(&mut self) {
        self.gates_since_renorm += 1;
        if self.gates_since_renorm >= RENORM_INTERVAL {
            self.renormalize();
        }
    }

    fn check_qubit(&self, qubit: usize) -> Result<()> {
        if qubit >= self.num_qubits {
            return Err(StateError::InvalidQubitIndex {
                index: qubit,
                num_qubits: self.num_qubits,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use qsx_gates::{HADAMARD, PAULI_X, PAULI_Z};

    #[test]
    fn initial_state_is_all_zeros() {
        let sv = StateVector::new(3).unwrap();
        assert_eq!(sv.probability_of(0).unwrap(), 1.0);
        for i in 1..8 {
            assert_eq!(sv.probability_of(i).unwrap(), 0.0);
        }
    }

    #[test]
    fn hadamard_splits_amplitude() {
        let mut sv = StateVector::new(1).unwrap();
        sv.apply_single_qubit(&HADAMARD, 0).unwrap();
        let p = sv.probabilities();
        assert_abs_diff_eq!(p[0], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(p[1], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn pauli_x_flips_the_target_bit() {
        let mut sv = StateVector::new(2).unwrap();
        sv.apply_single_qubit(&PAULI_X, 1).unwrap();
        assert_abs_diff_eq!(sv.probability_of(0b10).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn cnot_builds_a_bell_pair() {
        let mut sv = StateVector::new(2).unwrap();
        sv.apply_single_qubit(&HADAMARD, 0).unwrap();
        sv.apply_cnot(0, 1).unwrap();
        let p = sv.probabilities();
        assert_abs_diff_eq!(p[0b00], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(p[0b01], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p[0b10], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p[0b11], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn controlled_x_equals_cnot() {
        let mut a = StateVector::new(2).unwrap();
        a.apply_single_qubit(&HADAMARD, 0).unwrap();
        a.apply_cnot(0, 1).unwrap();

        let mut b = StateVector::new(2).unwrap();
        b.apply_single_qubit(&HADAMARD, 0).unwrap();
        b.apply_controlled_single_qubit(&PAULI_X, 0, 1).unwrap();

        for (x, y) in a.amplitudes().iter().zip(b.amplitudes().iter()) {
            assert_abs_diff_eq!(x.re as f64, y.re as f64, epsilon = 1e-12);
            assert_abs_diff_eq!(x.im as f64, y.im as f64, epsilon = 1e-12);
        }
    }

    #[test]
    fn high_qubit_kernels_use_chunk_bases() {
        // CNOT with control above target exercises the chunk-index path.
        let mut sv = StateVector::new(3).unwrap();
        sv.apply_single_qubit(&PAULI_X, 2).unwrap(); // |100⟩
        sv.apply_cnot(2, 0).unwrap(); // -> |101⟩
        assert_abs_diff_eq!(sv.probability_of(0b101).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn phase_gates_leave_probabilities_fixed() {
        let mut sv = StateVector::new(1).unwrap();
        sv.apply_single_qubit(&HADAMARD, 0).unwrap();
        sv.apply_single_qubit(&PAULI_Z, 0).unwrap();
        let p = sv.probabilities();
        assert_abs_diff_eq!(p[0], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(p[1], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn measurement_collapses_to_a_basis_state() {
        let mut sv = StateVector::new(2).unwrap();
        sv.apply_single_qubit(&HADAMARD, 0).unwrap();
        sv.apply_cnot(0, 1).unwrap();
        let mut rng = ShotRng::from_seed(11);
        let bits = sv.measure_all(&mut rng, true);
        // Bell pair: both bits agree.
        assert_eq!(bits[0], bits[1]);
        let outcome = bits
            .iter()
            .enumerate()
            .fold(0usize, |acc, (q, &b)| acc | ((b as usize) << q));
        assert_abs_diff_eq!(sv.probability_of(outcome).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn measurement_without_collapse_preserves_state() {
        let mut sv = StateVector::new(1).unwrap();
        sv.apply_single_qubit(&HADAMARD, 0).unwrap();
        let before = sv.amplitudes().to_vec();
        let mut rng = ShotRng::from_seed(5);
        let _ = sv.measure_all(&mut rng, false);
        assert_eq!(before, sv.amplitudes().to_vec());
    }

    #[test]
    fn measurement_is_deterministic_for_a_seed() {
        let run = || {
            let mut sv = StateVector::new(4).unwrap();
            for q in 0..4 {
                sv.apply_single_qubit(&HADAMARD, q).unwrap();
            }
            let mut rng = ShotRng::from_seed(99);
            sv.measure_all(&mut rng, false)
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn renormalization_restores_unit_norm() {
        let amps = vec![Complex::new(2.0, 0.0), Complex::new(0.0, 2.0)];
        let mut sv = StateVector::from_amplitudes(1, amps).unwrap();
        sv.renormalize();
        let p = sv.probabilities();
        assert_abs_diff_eq!(p[0] + p[1], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p[0], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn probability_index_is_guarded() {
        let sv = StateVector::new(2).unwrap();
        assert!(matches!(
            sv.probability_of(4),
            Err(StateError::BasisIndexOutOfRange { index: 4, .. })
        ));
    }

    #[test]
    fn cnot_rejects_equal_operands() {
        let mut sv = StateVector::new(2).unwrap();
        assert!(matches!(
            sv.apply_cnot(1, 1),
            Err(StateError::ControlEqualsTarget(1))
        ));
    }
}
