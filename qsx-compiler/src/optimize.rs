//! Peephole circuit optimization
//!
//! A two-pass rewrite over the operation list. The first pass walks the
//! sequence once, merging and cancelling adjacent single-qubit gates on the
//! same target; the second drops rotations whose merged angle vanished and
//! cancels adjacent identical CNOT pairs. Noise channels and measurement are
//! copied through verbatim and break every rewrite chain, so the optimized
//! circuit reproduces the original's probabilities exactly, stochastic
//! noise included.
//!
//! Merged rotation angles are summed as-is, without reduction modulo 2π.

use crate::Result;
use qsx_core::circuit::{Circuit, Op, OpKind};

/// Threshold below which a merged rotation counts as the identity.
const ZERO_ANGLE: f64 = 1e-15;

/// Toggles for the individual rewrite rules
///
/// All rules are enabled by default; switching one off is mainly useful for
/// isolating a rewrite when debugging a miscompare.
#[derive(Debug, Clone, Copy)]
pub struct OptimizeOptions {
    /// Sum adjacent same-axis rotations on one qubit
    pub merge_rotations: bool,
    /// Cancel adjacent identical X/H/Z pairs, and fold S·S into Z
    pub cancel_involutory: bool,
    /// Cancel adjacent CNOTs with identical control and target
    pub cancel_cnot_pairs: bool,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            merge_rotations: true,
            cancel_involutory: true,
            cancel_cnot_pairs: true,
        }
    }
}

/// Optimize a circuit with the default rule set
///
/// The result is semantically equivalent to the input and never longer.
///
/// # Example
/// ```
/// use qsx_core::{Circuit, Op};
/// use qsx_compiler::optimize;
///
/// let mut c = Circuit::new(1).unwrap();
/// c.push(Op::h(0)).unwrap();
/// c.push(Op::h(0)).unwrap();
/// assert!(optimize(&c).unwrap().is_empty());
/// ```
pub fn optimize(circuit: &Circuit) -> Result<Circuit> {
    optimize_with(circuit, &OptimizeOptions::default())
}

/// Optimize a circuit with an explicit rule selection
pub fn optimize_with(circuit: &Circuit, opts: &OptimizeOptions) -> Result<Circuit> {
    let merged = merge_pass(circuit, opts);
    cancel_pass(circuit.num_qubits(), &merged, opts)
}

/// Outcome of matching an op against its predecessor in the first pass
enum Rewrite {
    /// Folded into the previous op (merge or S·S → Z)
    Folded,
    /// Previous op and this one annihilate
    Annihilated,
    /// No rule applies; keep the op
    Keep,
}

/// First pass: greedy merge/cancel of adjacent single-qubit gates
fn merge_pass(circuit: &Circuit, opts: &OptimizeOptions) -> Vec<Op> {
    let mut out: Vec<Op> = Vec::with_capacity(circuit.len());
    for op in circuit.iter() {
        // Two-qubit, noise, and measurement ops pass through and act as
        // barriers: they become the previous op the next iteration sees.
        if !op.kind.is_unitary() || op.kind == OpKind::Cnot {
            out.push(op.clone());
            continue;
        }
        let rewrite = match out.last_mut() {
            Some(prev)
                if prev.kind.is_unitary()
                    && prev.is_single_qubit()
                    && prev.qubits == op.qubits =>
            {
                if opts.merge_rotations && prev.kind == op.kind && op.kind.is_rotation() {
                    prev.param += op.param;
                    Rewrite::Folded
                } else if opts.cancel_involutory && prev.kind == op.kind && op.kind.is_involutory()
                {
                    Rewrite::Annihilated
                } else if opts.cancel_involutory
                    && prev.kind == OpKind::S
                    && op.kind == OpKind::S
                {
                    prev.kind = OpKind::Z;
                    prev.param = 0.0;
                    Rewrite::Folded
                } else {
                    Rewrite::Keep
                }
            }
            _ => Rewrite::Keep,
        };
        match rewrite {
            Rewrite::Folded => {}
            Rewrite::Annihilated => {
                out.pop();
            }
            Rewrite::Keep => out.push(op.clone()),
        }
    }
    out
}

/// Second pass: drop vanished rotations, cancel adjacent CNOT pairs
fn cancel_pass(num_qubits: usize, ops: &[Op], opts: &OptimizeOptions) -> Result<Circuit> {
    let mut out = Circuit::with_capacity(num_qubits, ops.len())?;
    let mut i = 0;
    while i < ops.len() {
        let op = &ops[i];
        if op.kind.is_rotation() && op.param.abs() < ZERO_ANGLE {
            i += 1;
            continue;
        }
        if opts.cancel_cnot_pairs && op.kind == OpKind::Cnot {
            if let Some(next) = ops.get(i + 1) {
                if next.kind == OpKind::Cnot && next.qubits == op.qubits {
                    i += 2;
                    continue;
                }
            }
        }
        out.push(op.clone())?;
        i += 1;
    }
    Ok(out)
}
