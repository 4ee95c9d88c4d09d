//! Built-in circuit generators
//!
//! Small parameterized families used for demos, benchmarks, and tests. Each
//! generator produces a measured circuit ready for the executor.

use crate::circuit::{Circuit, Op};
use crate::Result;

/// GHZ state preparation: `H 0` followed by a CNOT fan-out, then measurement
///
/// # Errors
/// Returns [`crate::CoreError::EmptyCircuit`] for `n == 0`.
///
/// # Example
/// ```
/// use qsx_core::generators::ghz;
///
/// let c = ghz(3).unwrap();
/// assert_eq!(c.num_qubits(), 3);
/// assert_eq!(c.len(), 4); // H + 2 CNOTs + measure
/// ```
pub fn ghz(n: usize) -> Result<Circuit> {
    let mut circuit = Circuit::with_capacity(n, n + 1)?;
    circuit.push(Op::h(0))?;
    for q in 1..n {
        circuit.push(Op::cnot(0, q))?;
    }
    circuit.push(Op::measure())?;
    Ok(circuit)
}

/// QFT-style ladder: a Hadamard per qubit followed by successively finer
/// phase rotations π/2^k on the downstream qubits
///
/// The controlled phases of the textbook transform are approximated by
/// unconditional RZ rotations, so this is a fixed-phase sketch rather than
/// the exact QFT.
///
/// # Errors
/// Returns [`crate::CoreError::EmptyCircuit`] for `n == 0`.
pub fn qft(n: usize) -> Result<Circuit> {
    let mut circuit = Circuit::new(n)?;
    for q in 0..n {
        circuit.push(Op::h(q))?;
        for k in 1..n - q {
            let angle = std::f64::consts::PI / (1u64 << k) as f64;
            circuit.push(Op::rz(q + k, angle))?;
        }
    }
    circuit.push(Op::measure())?;
    Ok(circuit)
}

/// Three-qubit teleportation skeleton (qubit 2 carries the message)
pub fn teleport() -> Result<Circuit> {
    let mut circuit = Circuit::with_capacity(3, 5)?;
    circuit.push(Op::h(1))?;
    circuit.push(Op::cnot(1, 0))?;
    circuit.push(Op::cnot(2, 1))?;
    circuit.push(Op::h(2))?;
    circuit.push(Op::measure())?;
    Ok(circuit)
}

/// Bernstein–Vazirani circuit for a secret bit mask
///
/// Uses `mask.len()` data qubits plus one ancilla; the outcome on the data
/// qubits reproduces the mask with certainty. An empty mask degenerates to
/// the lone ancilla.
pub fn bernstein_vazirani(mask: &[bool]) -> Result<Circuit> {
    let n = mask.len();
    let ancilla = n;
    let mut circuit = Circuit::new(n + 1)?;
    for q in 0..n {
        circuit.push(Op::h(q))?;
    }
    circuit.push(Op::x(ancilla))?;
    circuit.push(Op::h(ancilla))?;
    for (q, &bit) in mask.iter().enumerate() {
        if bit {
            circuit.push(Op::cnot(q, ancilla))?;
        }
    }
    for q in 0..n {
        circuit.push(Op::h(q))?;
    }
    circuit.push(Op::h(ancilla))?;
    circuit.push(Op::measure())?;
    Ok(circuit)
}
