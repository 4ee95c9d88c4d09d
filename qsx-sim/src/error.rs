//! Error types for the executor and its companions

use thiserror::Error;

/// Errors that can occur during simulation
#[derive(Debug, Error)]
pub enum SimulatorError {
    /// Operation has no implementation on the selected backend
    #[error("operation '{op}' is not supported on the {backend} backend")]
    BackendUnsupported {
        op: &'static str,
        backend: &'static str,
    },

    /// Gradient requested for an operation that has no parameter
    #[error("operation at index {index} is not a parameterized rotation")]
    NotParameterized { index: usize },

    /// Readout assignment matrix cannot be inverted
    #[error("assignment matrix is singular")]
    Singular,

    /// Assignment-error probability outside [0, 1]
    #[error("assignment probability must be in [0, 1], got {0}")]
    ProbabilityOutOfRange(f64),

    /// Probability vector length does not match the qubit count
    #[error("probability vector has {actual} entries, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Circuit failed validation
    #[error("invalid circuit: {0}")]
    InvalidCircuit(#[from] qsx_core::CoreError),

    /// Pre-run optimization failed
    #[error("compilation failed: {0}")]
    Compilation(#[from] qsx_compiler::CompilerError),

    /// Failure inside a state engine
    #[error("state engine failure: {0}")]
    State(#[from] qsx_state::StateError),
}
