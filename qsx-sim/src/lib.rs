//! Circuit execution for the QSX quantum circuit simulator
//!
//! The [`Executor`] walks a validated circuit on one of two backends, the
//! pure-state vector or the density matrix, and produces a [`RunResult`]:
//! the probability vector over basis states plus one sampled measurement
//! outcome. On top of a single run this crate provides the shot-sampling
//! loop, ⟨Z⟩ observables, the parameter-shift gradient, and readout-error
//! mitigation.
//!
//! # Quick Start
//!
//! ```
//! use qsx_core::{Circuit, Op};
//! use qsx_sim::Executor;
//!
//! let mut bell = Circuit::new(2).unwrap();
//! bell.push(Op::h(0)).unwrap();
//! bell.push(Op::cnot(0, 1)).unwrap();
//! bell.push(Op::measure()).unwrap();
//!
//! let result = Executor::default().run(&bell, 42).unwrap();
//! assert!((result.probabilities[0] - 0.5).abs() < 1e-9);
//! assert_eq!(result.outcome[0], result.outcome[1]);
//! ```

pub mod error;
pub mod executor;
pub mod gradient;
pub mod mitigation;
pub mod observable;
pub mod result;
pub mod sample;

pub use error::SimulatorError;
pub use executor::{Backend, Executor, ExecutorConfig};
pub use gradient::{parameter_shift, GradientResult};
pub use mitigation::{apply_readout_error, mitigate_readout, AssignmentMatrix};
pub use observable::z_expectations;
pub use result::{OutcomeCounts, RunResult};

/// Type alias for results in qsx-sim
pub type Result<T> = std::result::Result<T, SimulatorError>;
