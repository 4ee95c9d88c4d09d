//! Error types for qsx-core

use thiserror::Error;

/// Errors that can occur while building or reading circuits
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid qubit index used
    #[error("invalid qubit index {0}: circuit has only {1} qubits")]
    InvalidQubit(usize, usize),

    /// Operation applied to the wrong number of qubits
    #[error("operation '{op}' takes {expected} qubit(s), but {actual} were provided")]
    InvalidQubitCount {
        op: &'static str,
        expected: usize,
        actual: usize,
    },

    /// CNOT with identical control and target
    #[error("CNOT control and target are both qubit {0}")]
    ControlEqualsTarget(usize),

    /// Rotation angle is NaN or infinite
    #[error("rotation angle must be finite, got {0}")]
    NonFiniteAngle(f64),

    /// Channel probability outside [0, 1]
    #[error("channel probability must be in [0, 1], got {0}")]
    ProbabilityOutOfRange(f64),

    /// Operation appended after a measurement
    #[error("measurement must be the last operation in a circuit")]
    OperationAfterMeasure,

    /// Circuit has no qubits
    #[error("circuit must have at least one qubit")]
    EmptyCircuit,

    /// Circuit text contained no operations
    #[error("no operations found in circuit text")]
    NoOperations,

    /// Ill-formed textual input
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Underlying I/O failure while reading a circuit file
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Create a parse error for the given 1-based line number
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
