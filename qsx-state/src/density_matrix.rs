//! Mixed-state density matrix engine
//!
//! Stores ρ as a row-major 2^n × 2^n buffer. Unitaries are applied as two
//! in-place sweeps, U on the target-indexed row pairs and then U† on the
//! column pairs; CNOT permutes rows and columns by XORing the target
//! bit wherever the control bit is set. The three single-qubit Kraus
//! channels are evaluated in closed form per entry, followed by a trace
//! renormalization that keeps drift bounded.

use crate::error::StateError;
use crate::parallel::{for_each_chunk, PARALLEL_THRESHOLD};
use crate::Result;
use qsx_core::types::{Complex, Matrix2, Real};
use rayon::prelude::*;

/// Density matrix of a possibly mixed n-qubit state
///
/// Memory usage is 4^n complex scalars; the practical qubit range is
/// correspondingly smaller than the state-vector engine's.
///
/// # Example
/// ```
/// use qsx_state::DensityMatrix;
///
/// let rho = DensityMatrix::new(2).unwrap();
/// assert_eq!(rho.dimension(), 4);
/// assert_eq!(rho.get(0, 0).re, 1.0); // |00⟩⟨00|
/// ```
#[derive(Debug, Clone)]
pub struct DensityMatrix {
    num_qubits: usize,
    dimension: usize,
    rho: Vec<Complex>,
}

impl DensityMatrix {
    /// Create a density matrix initialized to |0...0⟩⟨0...0|
    ///
    /// # Errors
    /// Returns [`StateError::DimensionOverflow`] if 4^n is not addressable.
    pub fn new(num_qubits: usize) -> Result<Self> {
        let dimension = 1usize
            .checked_shl(num_qubits as u32)
            .ok_or(StateError::DimensionOverflow { num_qubits })?;
        let size = dimension
            .checked_mul(dimension)
            .ok_or(StateError::DimensionOverflow { num_qubits })?;
        let mut rho = vec![Complex::new(0.0, 0.0); size];
        rho[0] = Complex::new(1.0, 0.0);
        Ok(Self {
            num_qubits,
            dimension,
            rho,
        })
    }

    /// Number of qubits
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Matrix dimension (2^num_qubits)
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Entry ρ(row, col)
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex {
        self.rho[row * self.dimension + col]
    }

    /// The full row-major buffer
    #[inline]
    pub fn matrix(&self) -> &[Complex] {
        &self.rho
    }

    /// Apply a single-qubit unitary: ρ → U ρ U†
    ///
    /// # Errors
    /// Returns [`StateError::InvalidQubitIndex`] if `qubit >= num_qubits`.
    pub fn apply_single_qubit(&mut self, matrix: &Matrix2, qubit: usize) -> Result<()> {
        self.check_qubit(qubit)?;
        let dim = self.dimension;
        let mask = 1usize << qubit;
        let [[m00, m01], [m10, m11]] = *matrix;

        // Row sweep: U on row pairs (r, r | mask), all columns at once.
        for_each_chunk(&mut self.rho, 2 * mask * dim, move |_, chunk| {
            let (lo, hi) = chunk.split_at_mut(mask * dim);
            for (a, b) in lo.iter_mut().zip(hi.iter_mut()) {
                let x0 = *a;
                let x1 = *b;
                *a = m00 * x0 + m01 * x1;
                *b = m10 * x0 + m11 * x1;
            }
        });

        // Column sweep: U† from the right on column pairs within each row.
        let c00 = m00.conj();
        let c01 = m01.conj();
        let c10 = m10.conj();
        let c11 = m11.conj();
        for_each_chunk(&mut self.rho, dim, move |_, row| {
            for pair in row.chunks_mut(2 * mask) {
                let (lo, hi) = pair.split_at_mut(mask);
                for (a, b) in lo.iter_mut().zip(hi.iter_mut()) {
                    let x0 = *a;
                    let x1 = *b;
                    *a = x0 * c00 + x1 * c01;
                    *b = x0 * c10 + x1 * c11;
                }
            }
        });
        Ok(())
    }

    /// Apply CNOT: basis permutation on rows and columns
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
        let dim = self.dimension;
        let cm = 1usize << control;
        let tm = 1usize << target;

        // Swap row r with r ^ tm where the control bit of r is set.
        for_each_chunk(&mut self.rho, 2 * tm * dim, move |chunk_idx, chunk| {
            let row_base = chunk_idx * 2 * tm;
            let (lo, hi) = chunk.split_at_mut(tm * dim);
            for k in 0..tm {
                if (row_base + k) & cm != 0 {
                    lo[k * dim..(k + 1) * dim].swap_with_slice(&mut hi[k * dim..(k + 1) * dim]);
                }
            }
        });

        // Same permutation on columns.
        for_each_chunk(&mut self.rho, dim, move |_, row| {
            for (pair_idx, pair) in row.chunks_mut(2 * tm).enumerate() {
                let col_base = pair_idx * 2 * tm;
                let (lo, hi) = pair.split_at_mut(tm);
                for k in 0..tm {
                    if (col_base + k) & cm != 0 {
                        std::mem::swap(&mut lo[k], &mut hi[k]);
                    }
                }
            }
        });
        Ok(())
    }

    /// Dephasing channel: ρ → (1−p) ρ + p Z ρ Z
    ///
    /// Z ρ Z negates exactly the entries where the target bit of the row and
    /// column indices differ, so the channel scales those entries by 1 − 2p.
    ///
    /// # Errors
    /// Returns [`StateError::ProbabilityOutOfRange`] for p outside [0, 1].
    pub fn dephase(&mut self, qubit: usize, p: f64) -> Result<()> {
        self.check_channel(qubit, p)?;
        let dim = self.dimension;
        let mask = 1usize << qubit;
        let factor = (1.0 - 2.0 * p) as Real;
        for_each_chunk(&mut self.rho, dim, move |row_idx, row| {
            let row_bit = row_idx & mask != 0;
            for (col, v) in row.iter_mut().enumerate() {
                if (col & mask != 0) != row_bit {
                    *v = *v * factor;
                }
            }
        });
        self.renormalize();
        Ok(())
    }

    /// Depolarizing channel: ρ → (1−p) ρ + p/3 (X ρ X + Y ρ Y + Z ρ Z)
    ///
    /// # Errors
    /// Returns [`StateError::ProbabilityOutOfRange`] for p outside [0, 1].
    pub fn depolarize(&mut self, qubit: usize, p: f64) -> Result<()> {
        self.check_channel(qubit, p)?;
        let dim = self.dimension;
        let mask = 1usize << qubit;
        let keep = (1.0 - p) as Real;
        let third = (p / 3.0) as Real;

        // Per entry: X ρ X pulls the bit-flipped entry; Y ρ Y does the same
        // with a sign when the target bits differ; Z ρ Z flips that sign on
        // the entry itself. Gathering from the old buffer keeps every write
        // independent.
        let old = std::mem::take(&mut self.rho);
        let mut out = vec![Complex::new(0.0, 0.0); old.len()];
        let fill = |row_idx: usize, row: &mut [Complex]| {
            let flipped_row = row_idx ^ mask;
            let row_bit = row_idx & mask != 0;
            for (col, v) in row.iter_mut().enumerate() {
                let differ = (col & mask != 0) != row_bit;
                let here = old[row_idx * dim + col];
                let swapped = old[flipped_row * dim + (col ^ mask)];
                let z_term = if differ { -here } else { here };
                let xy_term = if differ {
                    Complex::new(0.0, 0.0)
                } else {
                    swapped + swapped
                };
                *v = here * keep + (z_term + xy_term) * third;
            }
        };
        if out.len() >= PARALLEL_THRESHOLD {
            out.par_chunks_mut(dim)
                .enumerate()
                .for_each(|(r, row)| fill(r, row));
        } else {
            for (r, row) in out.chunks_mut(dim).enumerate() {
                fill(r, row);
            }
        }
        self.rho = out;
        self.renormalize();
        Ok(())
    }

    /// Amplitude-damping channel with Kraus operators
    /// K₀ = diag(1, √(1−p)) and K₁ = √p |0⟩⟨1| on the target qubit
    ///
    /// # Errors
    /// Returns [`StateError::ProbabilityOutOfRange`] for p outside [0, 1].
    pub fn amplitude_damp(&mut self, qubit: usize, p: f64) -> Result<()> {
        self.check_channel(qubit, p)?;
        let dim = self.dimension;
        let mask = 1usize << qubit;
        let damp = (1.0 - p).sqrt() as Real;
        let keep = (1.0 - p) as Real;
        let pump = p as Real;

        let old = std::mem::take(&mut self.rho);
        let mut out = vec![Complex::new(0.0, 0.0); old.len()];
        let fill = |row_idx: usize, row: &mut [Complex]| {
            let row_bit = row_idx & mask != 0;
            for (col, v) in row.iter_mut().enumerate() {
                let col_bit = col & mask != 0;
                let here = old[row_idx * dim + col];
                *v = match (row_bit, col_bit) {
                    // Population flows from |1⟩⟨1| blocks into |0⟩⟨0|.
                    (false, false) => here + old[(row_idx | mask) * dim + (col | mask)] * pump,
                    (true, true) => here * keep,
                    _ => here * damp,
                };
            }
        };
        if out.len() >= PARALLEL_THRESHOLD {
            out.par_chunks_mut(dim)
                .enumerate()
                .for_each(|(r, row)| fill(r, row));
        } else {
            for (r, row) in out.chunks_mut(dim).enumerate() {
                fill(r, row);
            }
        }
        self.rho = out;
        self.renormalize();
        Ok(())
    }

    /// The real diagonal of ρ: basis-state probabilities
    pub fn diagonal(&self) -> Vec<f64> {
        (0..self.dimension)
            .map(|i| self.rho[i * self.dimension + i].re as f64)
            .collect()
    }

    /// Divide every entry by Re tr(ρ) to restore unit trace
    pub fn renormalize(&mut self) {
        let trace: f64 = (0..self.dimension)
            .map(|i| self.rho[i * self.dimension + i].re as f64)
            .sum();
        if trace == 0.0 {
            return;
        }
        let inv = (1.0 / trace) as Real;
        for v in &mut self.rho {
            *v = *v * inv;
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

    fn check_channel(&self, qubit: usize, p: f64) -> Result<()> {
        self.check_qubit(qubit)?;
        if !(0.0..=1.0).contains(&p) {
            return Err(StateError::ProbabilityOutOfRange(p));
        }
        Ok(())
    }
}
