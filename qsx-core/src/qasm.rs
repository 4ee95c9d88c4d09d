//! Reader for a small OpenQASM 2.0 subset
//!
//! Supports `qreg` declarations, the gates `h x y z s rx ry rz cx`, and
//! `measure` statements (all measures collapse into the single terminal
//! measurement of the IR). `OPENQASM` version headers and `include` lines
//! are ignored, as are `//` comments.

use crate::circuit::{Circuit, Op, OpKind};
use crate::error::CoreError;
use crate::Result;
use std::path::Path;

/// Parse an OpenQASM 2.0 subset program
///
/// The qubit count is the declared `qreg` size, widened if a gate references
/// a larger index.
///
/// # Errors
/// Returns [`CoreError::Parse`] with the offending 1-based line number, and
/// [`CoreError::NoOperations`] when no operations are present.
///
/// # Example
/// ```
/// use qsx_core::parse_qasm;
///
/// let src = "OPENQASM 2.0;\nqreg q[2];\nh q[0];\ncx q[0],q[1];\nmeasure q -> c;\n";
/// let circuit = parse_qasm(src).unwrap();
/// assert_eq!(circuit.num_qubits(), 2);
/// assert_eq!(circuit.len(), 3);
/// ```
pub fn parse_qasm(source: &str) -> Result<Circuit> {
    let mut ops: Vec<(Op, usize)> = Vec::new();
    let mut declared = 0usize;
    let mut max_qubit: Option<usize> = None;

    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        let mut text = raw.trim();
        if text.is_empty() || text.starts_with("//") || text.starts_with('#') {
            continue;
        }
        if text.starts_with("OPENQASM") || text.starts_with("include") {
            continue;
        }
        text = text.trim_end_matches(';').trim_end();

        if let Some(rest) = text.strip_prefix("qreg") {
            declared = bracket_index(rest, line)?;
            continue;
        }
        if text.starts_with("measure") {
            // Per-qubit measure statements all fold into one terminal measure.
            if !matches!(ops.last(), Some((op, _)) if op.kind == OpKind::Measure) {
                ops.push((Op::measure(), line));
            }
            continue;
        }

        let head_end = text
            .find(|c: char| c == '(' || c.is_whitespace())
            .ok_or_else(|| CoreError::parse(line, "missing operand list"))?;
        let name = text[..head_end].to_ascii_lowercase();
        let args = match text.find(char::is_whitespace) {
            Some(pos) => &text[pos + 1..],
            None => return Err(CoreError::parse(line, "missing operand list")),
        };
        let q1 = bracket_index(args, line)?;

        let op = match name.as_str() {
            "h" => Op::h(q1),
            "x" => Op::x(q1),
            "y" => Op::y(q1),
            "z" => Op::z(q1),
            "s" => Op::s(q1),
            "rx" | "ry" | "rz" => {
                let angle = paren_angle(text, line)?;
                match name.as_str() {
                    "rx" => Op::rx(q1, angle),
                    "ry" => Op::ry(q1, angle),
                    _ => Op::rz(q1, angle),
                }
            }
            "cx" => {
                let comma = args
                    .find(',')
                    .ok_or_else(|| CoreError::parse(line, "cx takes two operands"))?;
                let q2 = bracket_index(&args[comma + 1..], line)?;
                Op::cnot(q1, q2)
            }
            other => {
                return Err(CoreError::parse(line, format!("unsupported op '{}'", other)));
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
    let num_qubits = declared.max(max_qubit.map_or(0, |m| m + 1)).max(1);

    let mut circuit = Circuit::with_capacity(num_qubits, ops.len())?;
    for (op, line) in ops {
        circuit
            .push(op)
            .map_err(|e| CoreError::parse(line, e.to_string()))?;
    }
    Ok(circuit)
}

/// Parse an OpenQASM file from disk
pub fn parse_qasm_file(path: impl AsRef<Path>) -> Result<Circuit> {
    let source = std::fs::read_to_string(path)?;
    parse_qasm(&source)
}

/// Extract the integer between the first `[` `]` pair
fn bracket_index(text: &str, line: usize) -> Result<usize> {
    let open = text
        .find('[')
        .ok_or_else(|| CoreError::parse(line, "missing '['"))?;
    let close = text[open..]
        .find(']')
        .map(|off| open + off)
        .ok_or_else(|| CoreError::parse(line, "missing ']'"))?;
    text[open + 1..close]
        .trim()
        .parse::<usize>()
        .map_err(|_| CoreError::parse(line, "invalid qubit index"))
}

/// Extract the angle between the first `(` `)` pair
fn paren_angle(text: &str, line: usize) -> Result<f64> {
    let open = text
        .find('(')
        .ok_or_else(|| CoreError::parse(line, "rotation requires an angle"))?;
    let close = text[open..]
        .find(')')
        .map(|off| open + off)
        .ok_or_else(|| CoreError::parse(line, "missing ')'"))?;
    text[open + 1..close]
        .trim()
        .parse::<f64>()
        .map_err(|_| CoreError::parse(line, "invalid angle"))
}
