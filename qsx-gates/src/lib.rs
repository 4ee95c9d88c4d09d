//! Gate coefficient tables for the QSX simulator
//!
//! Every supported single-qubit gate is exposed as the four complex entries
//! of its 2×2 matrix: fixed gates as constants, rotations as pure functions
//! of the angle. The engines never inspect gate *objects*: they receive a
//! matrix and route it through the appropriate kernel, which keeps the
//! dispatch in the executor a plain `match` over [`OpKind`].

pub mod matrices;

pub use matrices::{
    rotation_x, rotation_y, rotation_z, single_qubit_matrix, HADAMARD, IDENTITY, PAULI_X, PAULI_Y,
    PAULI_Z, S_GATE,
};

pub use qsx_core::circuit::OpKind;
