//! Reader for the line-based circuit format
//!
//! One operation per line; `#` introduces a comment. Qubit indices are
//! 0-based and the qubit count is inferred as the largest index mentioned
//! plus one.
//!
//! ```text
//! # Bell pair
//! H 0
//! CNOT 0 1
//! MEASURE ALL
//! ```

use crate::circuit::{Circuit, Op};
use crate::error::CoreError;
use crate::Result;
use std::path::Path;

/// Parse a circuit from text
///
/// # Errors
/// Returns [`CoreError::Parse`] with the offending 1-based line number for
/// ill-formed input, and [`CoreError::NoOperations`] when the text contains
/// no operations.
///
/// # Example
/// ```
/// use qsx_core::parse_circuit;
///
/// let circuit = parse_circuit("H 0\nCNOT 0 1\nMEASURE ALL\n").unwrap();
/// assert_eq!(circuit.num_qubits(), 2);
/// assert_eq!(circuit.len(), 3);
/// ```
pub fn parse_circuit(source: &str) -> Result<Circuit> {
    let mut ops: Vec<(Op, usize)> = Vec::new();
    let mut max_qubit: Option<usize> = None;

    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        let text = raw.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let op = match tokens[0] {
            "H" | "X" | "Y" | "Z" | "S" => {
                let q = expect_qubit(&tokens, 1, line)?;
                require_len(&tokens, 2, line)?;
                match tokens[0] {
                    "H" => Op::h(q),
                    "X" => Op::x(q),
                    "Y" => Op::y(q),
                    "Z" => Op::z(q),
                    _ => Op::s(q),
                }
            }
            "RX" | "RY" | "RZ" => {
                let q = expect_qubit(&tokens, 1, line)?;
                let angle = expect_float(&tokens, 2, line, "angle")?;
                require_len(&tokens, 3, line)?;
                match tokens[0] {
                    "RX" => Op::rx(q, angle),
                    "RY" => Op::ry(q, angle),
                    _ => Op::rz(q, angle),
                }
            }
            "DEPHASE" | "DEPOL" | "AMPDAMP" => {
                let q = expect_qubit(&tokens, 1, line)?;
                let p = expect_float(&tokens, 2, line, "probability")?;
                require_len(&tokens, 3, line)?;
                match tokens[0] {
                    "DEPHASE" => Op::dephase(q, p),
                    "DEPOL" => Op::depolarize(q, p),
                    _ => Op::amplitude_damping(q, p),
                }
            }
            "CNOT" => {
                let control = expect_qubit(&tokens, 1, line)?;
                let target = expect_qubit(&tokens, 2, line)?;
                require_len(&tokens, 3, line)?;
                Op::cnot(control, target)
            }
            "MEASURE" => {
                if tokens.get(1).copied() != Some("ALL") {
                    return Err(CoreError::parse(line, "only 'MEASURE ALL' is supported"));
                }
                require_len(&tokens, 2, line)?;
                Op::measure()
            }
            other => {
                return Err(CoreError::parse(line, format!("unknown op '{}'", other)));
            }
        };
        for &q in &op.qubits {
            max_qubit = Some(max_qubit.map_or(q, |m| m.max(q)));
        }
        ops.push((op, line));
    }

    if ops.is_empty() {
        return Err(CoreError::NoOperations);
    }
    let num_qubits = max_qubit.map_or(1, |m| m + 1);

    let mut circuit = Circuit::with_capacity(num_qubits, ops.len())?;
    for (op, line) in ops {
        circuit
            .push(op)
            .map_err(|e| CoreError::parse(line, e.to_string()))?;
    }
    Ok(circuit)
}

/// Parse a circuit from a file on disk
///
/// # Errors
/// Propagates I/O failures as [`CoreError::Io`], otherwise as
/// [`parse_circuit`].
pub fn parse_circuit_file(path: impl AsRef<Path>) -> Result<Circuit> {
    let source = std::fs::read_to_string(path)?;
    parse_circuit(&source)
}

fn require_len(tokens: &[&str], expected: usize, line: usize) -> Result<()> {
    if tokens.len() > expected {
        return Err(CoreError::parse(
            line,
            format!("unexpected token '{}'", tokens[expected]),
        ));
    }
    Ok(())
}

fn expect_qubit(tokens: &[&str], pos: usize, line: usize) -> Result<usize> {
    let tok = tokens
        .get(pos)
        .ok_or_else(|| CoreError::parse(line, "missing qubit index"))?;
    tok.parse::<usize>()
        .map_err(|_| CoreError::parse(line, format!("invalid qubit index '{}'", tok)))
}

fn expect_float(tokens: &[&str], pos: usize, line: usize, what: &str) -> Result<f64> {
    let tok = tokens
        .get(pos)
        .ok_or_else(|| CoreError::parse(line, format!("missing {}", what)))?;
    tok.parse::<f64>()
        .map_err(|_| CoreError::parse(line, format!("invalid {} '{}'", what, tok)))
}
