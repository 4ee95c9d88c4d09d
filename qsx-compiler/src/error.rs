//! Error types for circuit transformations

use thiserror::Error;

/// Errors that can occur during compilation passes
#[derive(Debug, Error)]
pub enum CompilerError {
    /// Unitary synthesis invoked on a circuit with measurement or noise
    #[error("cannot synthesize a unitary: circuit contains non-unitary op '{0}'")]
    NonUnitaryOp(&'static str),

    /// Topology edge references a qubit outside the device
    #[error("topology edge ({0}, {1}) exceeds {2} qubits")]
    EdgeOutOfRange(usize, usize, usize),

    /// Topology edge connects a qubit to itself
    #[error("topology edge ({0}, {0}) is a self-loop")]
    SelfLoop(usize),

    /// No route between two physical qubits
    #[error("no path between physical qubits {from} and {to}")]
    NoPath { from: usize, to: usize },

    /// Circuit uses more qubits than the topology provides
    #[error("circuit requires {required} qubits, topology has {available}")]
    TooFewNodes { required: usize, available: usize },

    /// Rewrite produced an operation the circuit rejected
    #[error("rewrite produced an invalid circuit: {0}")]
    InvalidRewrite(#[from] qsx_core::CoreError),

    /// Ill-formed topology file
    #[error("topology parse error at line {line}: {message}")]
    TopologyParse { line: usize, message: String },

    /// Underlying I/O failure while reading a topology file
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
}
