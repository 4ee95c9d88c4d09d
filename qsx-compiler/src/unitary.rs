//! Full-circuit unitary synthesis
//!
//! Materializes the 2^n × 2^n matrix of a purely unitary circuit, for
//! export and for cross-checking the state-vector engine. Single-qubit
//! gates are lifted to the full register by two sweeps of Kronecker
//! products; CNOT becomes a basis permutation. Index conventions follow the
//! engines: bit q of a basis index (LSB first) is qubit q.

use crate::error::CompilerError;
use crate::Result;
use qsx_core::circuit::{Circuit, OpKind};
use qsx_core::types::{Complex, Matrix2};
use qsx_gates::single_qubit_matrix;
use rayon::prelude::*;

const ZERO: Complex = Complex::new(0.0, 0.0);
const ONE: Complex = Complex::new(1.0, 0.0);

/// Matrices above this dimension multiply on the rayon pool.
const PARALLEL_DIM: usize = 64;

/// Build the full unitary of a circuit containing only gates
///
/// Returns the row-major 2^n × 2^n matrix U with U|i⟩ giving the circuit's
/// action on basis state i.
///
/// # Errors
/// Returns [`CompilerError::NonUnitaryOp`] if the circuit contains a
/// measurement or a noise channel.
///
/// # Example
/// ```
/// use qsx_core::{Circuit, Op};
/// use qsx_compiler::build_unitary;
///
/// let mut c = Circuit::new(1).unwrap();
/// c.push(Op::x(0)).unwrap();
/// let u = build_unitary(&c).unwrap();
/// assert_eq!(u[1].re, 1.0); // U[0][1] = 1: X maps |1⟩ to |0⟩
/// ```
pub fn build_unitary(circuit: &Circuit) -> Result<Vec<Complex>> {
    let n = circuit.num_qubits();
    let dim = 1usize << n;
    let mut unitary = identity(dim);

    for op in circuit.iter() {
        let op_matrix = match op.kind {
            OpKind::Cnot => cnot_permutation(n, op.qubits[0], op.qubits[1]),
            kind if kind.is_unitary() => {
                let gate = single_qubit_matrix(kind, op.param)
                    .ok_or(CompilerError::NonUnitaryOp(kind.name()))?;
                lift_single_qubit(&gate, n, op.qubits[0])
            }
            kind => return Err(CompilerError::NonUnitaryOp(kind.name())),
        };
        unitary = matmul(&op_matrix, &unitary, dim);
    }
    Ok(unitary)
}

fn identity(dim: usize) -> Vec<Complex> {
    let mut m = vec![ZERO; dim * dim];
    for i in 0..dim {
        m[i * dim + i] = ONE;
    }
    m
}

/// Lift a 2×2 gate to the full register: I ⊗ … ⊗ g ⊗ … ⊗ I
///
/// One Kronecker sweep pads the low-order qubits below the target, the
/// second pads the high-order qubits above it.
fn lift_single_qubit(gate: &Matrix2, num_qubits: usize, target: usize) -> Vec<Complex> {
    let mut m: Vec<Complex> = vec![gate[0][0], gate[0][1], gate[1][0], gate[1][1]];
    let mut rows = 2usize;
    for _ in 0..target {
        m = kron(&m, rows, &IDENTITY_2, 2);
        rows *= 2;
    }
    for _ in 0..num_qubits - target - 1 {
        m = kron(&IDENTITY_2, 2, &m, rows);
        rows *= 2;
    }
    m
}

const IDENTITY_2: [Complex; 4] = [ONE, ZERO, ZERO, ONE];

/// Kronecker product of square row-major matrices; `b` occupies the low
/// index bits of the result
fn kron(a: &[Complex], a_dim: usize, b: &[Complex], b_dim: usize) -> Vec<Complex> {
    let dim = a_dim * b_dim;
    let mut out = vec![ZERO; dim * dim];
    for i in 0..a_dim {
        for j in 0..a_dim {
            let a_ij = a[i * a_dim + j];
            for r in 0..b_dim {
                for s in 0..b_dim {
                    out[(i * b_dim + r) * dim + (j * b_dim + s)] = a_ij * b[r * b_dim + s];
                }
            }
        }
    }
    out
}

/// Permutation matrix of CNOT: |i⟩ → |i ⊕ ((i≫c)&1)·2^t⟩
fn cnot_permutation(num_qubits: usize, control: usize, target: usize) -> Vec<Complex> {
    let dim = 1usize << num_qubits;
    let mut m = vec![ZERO; dim * dim];
    for i in 0..dim {
        let j = if (i >> control) & 1 == 1 {
            i ^ (1 << target)
        } else {
            i
        };
        m[j * dim + i] = ONE;
    }
    m
}

/// C = A · B for square row-major matrices
fn matmul(a: &[Complex], b: &[Complex], dim: usize) -> Vec<Complex> {
    let mut out = vec![ZERO; dim * dim];
    let fill = |i: usize, row: &mut [Complex]| {
        for k in 0..dim {
            let a_ik = a[i * dim + k];
            if a_ik == ZERO {
                continue;
            }
            let b_row = &b[k * dim..(k + 1) * dim];
            for (out_v, b_v) in row.iter_mut().zip(b_row.iter()) {
                *out_v += a_ik * *b_v;
            }
        }
    };
    if dim >= PARALLEL_DIM {
        out.par_chunks_mut(dim)
            .enumerate()
            .for_each(|(i, row)| fill(i, row));
    } else {
        for (i, row) in out.chunks_mut(dim).enumerate() {
            fill(i, row);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use qsx_core::circuit::Op;

    fn assert_entry(u: &[Complex], dim: usize, row: usize, col: usize, re: f64, im: f64) {
        let v = u[row * dim + col];
        assert_abs_diff_eq!(v.re as f64, re, epsilon = 1e-12);
        assert_abs_diff_eq!(v.im as f64, im, epsilon = 1e-12);
    }

    #[test]
    fn empty_circuit_gives_identity() {
        let c = Circuit::new(2).unwrap();
        let u = build_unitary(&c).unwrap();
        for r in 0..4 {
            for col in 0..4 {
                assert_entry(&u, 4, r, col, if r == col { 1.0 } else { 0.0 }, 0.0);
            }
        }
    }

    #[test]
    fn single_hadamard_matches_the_gate_table() {
        let mut c = Circuit::new(1).unwrap();
        c.push(Op::h(0)).unwrap();
        let u = build_unitary(&c).unwrap();
        let s = std::f64::consts::FRAC_1_SQRT_2;
        assert_entry(&u, 2, 0, 0, s, 0.0);
        assert_entry(&u, 2, 0, 1, s, 0.0);
        assert_entry(&u, 2, 1, 0, s, 0.0);
        assert_entry(&u, 2, 1, 1, -s, 0.0);
    }

    #[test]
    fn lift_places_the_gate_on_the_indexed_qubit() {
        // X on qubit 1 of 2 maps |00⟩ (index 0) to |10⟩ (index 2).
        let mut c = Circuit::new(2).unwrap();
        c.push(Op::x(1)).unwrap();
        let u = build_unitary(&c).unwrap();
        assert_entry(&u, 4, 2, 0, 1.0, 0.0);
        assert_entry(&u, 4, 0, 2, 1.0, 0.0);
        assert_entry(&u, 4, 1, 3, 1.0, 0.0);
        assert_entry(&u, 4, 3, 1, 1.0, 0.0);
    }

    #[test]
    fn bell_circuit_first_column() {
        let mut c = Circuit::new(2).unwrap();
        c.push(Op::h(0)).unwrap();
        c.push(Op::cnot(0, 1)).unwrap();
        let u = build_unitary(&c).unwrap();
        let s = std::f64::consts::FRAC_1_SQRT_2;
        assert_entry(&u, 4, 0, 0, s, 0.0);
        assert_entry(&u, 4, 1, 0, 0.0, 0.0);
        assert_entry(&u, 4, 2, 0, 0.0, 0.0);
        assert_entry(&u, 4, 3, 0, s, 0.0);
    }

    #[test]
    fn synthesized_matrix_is_unitary() {
        let mut c = Circuit::new(3).unwrap();
        c.push(Op::h(0)).unwrap();
        c.push(Op::ry(1, 0.7)).unwrap();
        c.push(Op::cnot(0, 2)).unwrap();
        c.push(Op::rz(2, -1.2)).unwrap();
        c.push(Op::s(1)).unwrap();
        let u = build_unitary(&c).unwrap();
        let dim = 8;
        // U U† = I
        for r in 0..dim {
            for c2 in 0..dim {
                let mut acc = Complex::new(0.0, 0.0);
                for k in 0..dim {
                    acc += u[r * dim + k] * u[c2 * dim + k].conj();
                }
                let expected = if r == c2 { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(acc.re as f64, expected, epsilon = 1e-10);
                assert_abs_diff_eq!(acc.im as f64, 0.0, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn measurement_is_rejected() {
        let mut c = Circuit::new(1).unwrap();
        c.push(Op::h(0)).unwrap();
        c.push(Op::measure()).unwrap();
        assert!(matches!(
            build_unitary(&c),
            Err(CompilerError::NonUnitaryOp("MEASURE"))
        ));
    }

    #[test]
    fn noise_is_rejected() {
        let mut c = Circuit::new(1).unwrap();
        c.push(Op::depolarize(0, 0.5)).unwrap();
        assert!(matches!(
            build_unitary(&c),
            Err(CompilerError::NonUnitaryOp("DEPOL"))
        ));
    }
}
