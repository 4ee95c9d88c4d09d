//! Core types for the QSX quantum circuit simulator
//!
//! This crate provides the foundations shared by every QSX backend: the
//! circuit intermediate representation, its validation rules, the textual
//! circuit readers, circuit generators, and the seedable random number
//! generator that makes runs reproducible.
//!
//! # Core Components
//!
//! - **Circuit IR**: a flat, tagged operation list ([`Op`] / [`OpKind`]) with
//!   a qubit count; no trait objects, no dynamic dispatch
//! - **Validation**: every operation is checked on insertion, so downstream
//!   engines consume only well-formed circuits
//! - **Readers**: the line-based circuit format and an OpenQASM 2.0 subset
//! - **RNG**: an explicit, seed-threaded PCG-32 stream ([`ShotRng`])
//!
//! # Quick Start
//!
//! ```
//! use qsx_core::{Circuit, Op};
//!
//! let mut circuit = Circuit::new(2).unwrap();
//! circuit.push(Op::h(0)).unwrap();
//! circuit.push(Op::cnot(0, 1)).unwrap();
//! circuit.push(Op::measure()).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.len(), 3);
//! ```

pub mod circuit;
pub mod error;
pub mod generators;
pub mod parse;
pub mod qasm;
pub mod rng;
pub mod types;

// Re-exports for convenience
pub use circuit::{Circuit, Op, OpKind, QubitList};
pub use error::CoreError;
pub use parse::{parse_circuit, parse_circuit_file};
pub use qasm::{parse_qasm, parse_qasm_file};
pub use rng::ShotRng;
pub use types::{Complex, Matrix2, Real};

/// Type alias for results in qsx-core
pub type Result<T> = std::result::Result<T, CoreError>;
