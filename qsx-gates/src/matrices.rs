//! Single-qubit gate matrices
//!
//! Constant matrices for the fixed gates and generator functions for the
//! parameterized rotations.

use qsx_core::circuit::OpKind;
use qsx_core::types::{Complex, Matrix2, Real};

const ZERO: Complex = Complex::new(0.0, 0.0);
const ONE: Complex = Complex::new(1.0, 0.0);
const I: Complex = Complex::new(0.0, 1.0);
const NEG_I: Complex = Complex::new(0.0, -1.0);
const NEG_ONE: Complex = Complex::new(-1.0, 0.0);

const INV_SQRT2: Real = std::f64::consts::FRAC_1_SQRT_2 as Real;

/// Hadamard gate matrix
/// H = 1/√2 * [[1,  1],
///             [1, -1]]
pub const HADAMARD: Matrix2 = [
    [
        Complex::new(INV_SQRT2, 0.0),
        Complex::new(INV_SQRT2, 0.0),
    ],
    [
        Complex::new(INV_SQRT2, 0.0),
        Complex::new(-INV_SQRT2, 0.0),
    ],
];

/// Pauli-X gate matrix (NOT gate)
/// X = [[0, 1],
///      [1, 0]]
pub const PAULI_X: Matrix2 = [[ZERO, ONE], [ONE, ZERO]];

/// Pauli-Y gate matrix
/// Y = [[0, -i],
///      [i,  0]]
pub const PAULI_Y: Matrix2 = [[ZERO, NEG_I], [I, ZERO]];

/// Pauli-Z gate matrix
/// Z = [[1,  0],
///      [0, -1]]
pub const PAULI_Z: Matrix2 = [[ONE, ZERO], [ZERO, NEG_ONE]];

/// Identity gate matrix
pub const IDENTITY: Matrix2 = [[ONE, ZERO], [ZERO, ONE]];

/// S gate matrix (phase gate, √Z)
/// S = [[1, 0],
///      [0, i]]
pub const S_GATE: Matrix2 = [[ONE, ZERO], [ZERO, I]];

/// Rotation about the X axis
/// RX(θ) = [[cos(θ/2),    -i·sin(θ/2)],
///          [-i·sin(θ/2),  cos(θ/2)]]
#[inline]
pub fn rotation_x(theta: f64) -> Matrix2 {
    let half = theta / 2.0;
    let c = half.cos() as Real;
    let s = half.sin() as Real;
    [
        [Complex::new(c, 0.0), Complex::new(0.0, -s)],
        [Complex::new(0.0, -s), Complex::new(c, 0.0)],
    ]
}

/// Rotation about the Y axis
/// RY(θ) = [[cos(θ/2),  -sin(θ/2)],
///          [sin(θ/2),   cos(θ/2)]]
#[inline]
pub fn rotation_y(theta: f64) -> Matrix2 {
    let half = theta / 2.0;
    let c = half.cos() as Real;
    let s = half.sin() as Real;
    [
        [Complex::new(c, 0.0), Complex::new(-s, 0.0)],
        [Complex::new(s, 0.0), Complex::new(c, 0.0)],
    ]
}

/// Rotation about the Z axis
/// RZ(θ) = diag(e^{-iθ/2}, e^{iθ/2})
#[inline]
pub fn rotation_z(theta: f64) -> Matrix2 {
    let half = theta / 2.0;
    let c = half.cos() as Real;
    let s = half.sin() as Real;
    [
        [Complex::new(c, -s), ZERO],
        [ZERO, Complex::new(c, s)],
    ]
}

/// Look up the 2×2 matrix of a single-qubit unitary
///
/// `param` is the rotation angle for RX/RY/RZ and ignored otherwise.
/// Returns `None` for kinds that are not single-qubit unitaries (CNOT,
/// measurement, noise channels).
pub fn single_qubit_matrix(kind: OpKind, param: f64) -> Option<Matrix2> {
    match kind {
        OpKind::H => Some(HADAMARD),
        OpKind::X => Some(PAULI_X),
        OpKind::Y => Some(PAULI_Y),
        OpKind::Z => Some(PAULI_Z),
        OpKind::S => Some(S_GATE),
        OpKind::Rx => Some(rotation_x(param)),
        OpKind::Ry => Some(rotation_y(param)),
        OpKind::Rz => Some(rotation_z(param)),
        _ => None,
    }
}
