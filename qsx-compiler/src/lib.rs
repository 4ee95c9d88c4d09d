//! Circuit transformations for the QSX simulator
//!
//! Rewrites that must preserve run semantics bit-for-bit:
//!
//! - [`optimize`]: peephole gate reduction (rotation merging, involutory
//!   cancellation, S·S → Z, zero-rotation elision, CNOT-pair cancellation)
//! - [`map_to_line`] / [`map_to_topology`]: SWAP insertion so every CNOT
//!   acts on physically adjacent qubits of a line or an arbitrary graph
//! - [`build_unitary`]: materialization of the full 2^n × 2^n circuit
//!   unitary for export and cross-checking

pub mod error;
pub mod optimize;
pub mod routing;
pub mod topology;
pub mod unitary;

pub use error::CompilerError;
pub use optimize::{optimize, optimize_with, OptimizeOptions};
pub use routing::{map_to_line, map_to_topology};
pub use topology::Topology;
pub use unitary::build_unitary;

/// Type alias for results in qsx-compiler
pub type Result<T> = std::result::Result<T, CompilerError>;
