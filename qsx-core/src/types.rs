//! Scalar type aliases shared across the workspace
//!
//! Amplitudes and gate entries are double precision by default; enabling the
//! `f32` cargo feature switches the whole simulator to single precision.
//! Probabilities stay `f64` in either mode so that cumulative sums over
//! exponential-size vectors do not lose mass.

/// Real scalar backing all complex arithmetic.
#[cfg(not(feature = "f32"))]
pub type Real = f64;

/// Real scalar backing all complex arithmetic.
#[cfg(feature = "f32")]
pub type Real = f32;

/// Complex scalar used for amplitudes and matrix entries.
pub type Complex = num_complex::Complex<Real>;

/// 2×2 complex matrix in row-major order (single-qubit gate).
pub type Matrix2 = [[Complex; 2]; 2];
