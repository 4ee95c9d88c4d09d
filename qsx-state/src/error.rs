//! Error types for state engine operations

use thiserror::Error;

/// Errors that can occur inside the state engines
#[derive(Debug, Error)]
pub enum StateError {
    /// Invalid qubit index
    #[error("invalid qubit index {index} for {num_qubits}-qubit state")]
    InvalidQubitIndex { index: usize, num_qubits: usize },

    /// Basis-state index outside [0, 2^n)
    #[error("basis index {index} out of range for dimension {dimension}")]
    BasisIndexOutOfRange { index: usize, dimension: usize },

    /// Requested qubit count cannot be represented
    #[error("cannot address a {num_qubits}-qubit state on this platform")]
    DimensionOverflow { num_qubits: usize },

    /// Amplitude buffer length is not the expected power of two
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Control and target refer to the same qubit
    #[error("control and target are both qubit {0}")]
    ControlEqualsTarget(usize),

    /// Channel probability outside [0, 1]
    #[error("channel probability must be in [0, 1], got {0}")]
    ProbabilityOutOfRange(f64),

    /// Snapshot header or payload is not a valid state snapshot
    #[error("invalid snapshot format: {0}")]
    InvalidFormat(String),

    /// Underlying I/O failure while reading or writing a snapshot
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
}
