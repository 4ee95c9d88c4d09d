//! Connectivity mapping by SWAP insertion
//!
//! Rewrites a circuit so that every CNOT acts on physically adjacent qubits
//! of a target topology. A logical→physical permutation is maintained while
//! walking the circuit: single-qubit operations (noise channels included)
//! are re-tagged through it, and each non-adjacent CNOT is preceded by a
//! chain of SWAPs (three CNOTs each) that walks the control endpoint along
//! a shortest path until only the final edge remains.
//!
//! Routing leaves qubits at permuted positions, so before the terminal
//! measurement (or at the end of an unmeasured circuit) a final SWAP stage
//! returns every qubit to its home position. The mapped circuit therefore
//! reproduces the original's probability vector exactly, noise included.

use crate::error::CompilerError;
use crate::topology::Topology;
use crate::Result;
use qsx_core::circuit::{Circuit, Op, OpKind};

/// Map a circuit onto the 1-D line
///
/// Every CNOT in the result acts on neighboring indices (|control − target|
/// = 1); shortest paths on the line are integer intervals. The output is
/// semantically equivalent to the input: probabilities agree on every seed.
///
/// # Example
/// ```
/// use qsx_core::{Circuit, Op, OpKind};
/// use qsx_compiler::map_to_line;
///
/// let mut c = Circuit::new(3).unwrap();
/// c.push(Op::h(0)).unwrap();
/// c.push(Op::cnot(0, 2)).unwrap();
/// let mapped = map_to_line(&c).unwrap();
/// assert!(mapped.len() >= c.len());
/// for op in mapped.iter().filter(|op| op.kind == OpKind::Cnot) {
///     assert_eq!(op.qubits[0].abs_diff(op.qubits[1]), 1);
/// }
/// ```
pub fn map_to_line(circuit: &Circuit) -> Result<Circuit> {
    map_to_topology(circuit, &Topology::line(circuit.num_qubits()))
}

/// Map a circuit onto an arbitrary connectivity graph
///
/// # Errors
/// - [`CompilerError::TooFewNodes`] if the topology has fewer nodes than the
///   circuit has qubits
/// - [`CompilerError::NoPath`] if a CNOT's endpoints are disconnected
pub fn map_to_topology(circuit: &Circuit, topology: &Topology) -> Result<Circuit> {
    if topology.num_qubits() < circuit.num_qubits() {
        return Err(CompilerError::TooFewNodes {
            required: circuit.num_qubits(),
            available: topology.num_qubits(),
        });
    }
    let n = topology.num_qubits();
    let mut phys: Vec<usize> = (0..n).collect();
    let mut out = Circuit::with_capacity(n, circuit.len())?;

    for op in circuit.iter() {
        match op.kind {
            OpKind::Cnot => {
                let pc = phys[op.qubits[0]];
                let pt = phys[op.qubits[1]];
                let path = topology
                    .shortest_path(pc, pt)
                    .ok_or(CompilerError::NoPath { from: pc, to: pt })?;
                // Walk the control occupant along the path, one hop per
                // SWAP, leaving only the final edge for the CNOT itself.
                for hop in path.windows(2).take(path.len().saturating_sub(2)) {
                    emit_swap(&mut out, hop[0], hop[1])?;
                    swap_positions(&mut phys, hop[0], hop[1]);
                }
                out.push(Op::cnot(phys[op.qubits[0]], phys[op.qubits[1]]))?;
            }
            OpKind::Measure => {
                restore_permutation(&mut out, &mut phys, topology)?;
                out.push(op.clone())?;
            }
            _ => {
                let mut mapped = op.clone();
                mapped.qubits[0] = phys[op.qubits[0]];
                out.push(mapped)?;
            }
        }
    }
    restore_permutation(&mut out, &mut phys, topology)?;
    Ok(out)
}

/// SWAP of two adjacent physical qubits, synthesized as three CNOTs
fn emit_swap(out: &mut Circuit, a: usize, b: usize) -> Result<()> {
    out.push(Op::cnot(a, b))?;
    out.push(Op::cnot(b, a))?;
    out.push(Op::cnot(a, b))?;
    Ok(())
}

/// Exchange the logical occupants of physical positions `a` and `b`
fn swap_positions(phys: &mut [usize], a: usize, b: usize) {
    for slot in phys.iter_mut() {
        if *slot == a {
            *slot = b;
        } else if *slot == b {
            *slot = a;
        }
    }
}

/// Emit SWAPs returning every displaced qubit to its home position
///
/// Homes are finalized deepest-first along a BFS tree of each connected
/// component; a node being finalized is a leaf of the remaining tree, so
/// routing a qubit home never crosses an already-finalized position.
fn restore_permutation(out: &mut Circuit, phys: &mut [usize], topology: &Topology) -> Result<()> {
    if phys.iter().enumerate().all(|(q, &p)| q == p) {
        return Ok(());
    }
    let n = phys.len();
    let mut depth: Vec<Option<usize>> = vec![None; n];
    for root in 0..n {
        if depth[root].is_some() {
            continue;
        }
        depth[root] = Some(0);
        let mut queue = std::collections::VecDeque::from([root]);
        while let Some(node) = queue.pop_front() {
            let d = depth[node].unwrap_or(0);
            for &next in topology.neighbors(node) {
                if depth[next].is_none() {
                    depth[next] = Some(d + 1);
                    queue.push_back(next);
                }
            }
        }
    }
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&node| std::cmp::Reverse(depth[node].unwrap_or(0)));

    let mut finalized = vec![false; n];
    for home in order {
        let mut pos = phys[home];
        if pos != home {
            let path = shortest_open_path(topology, &finalized, pos, home).ok_or(
                CompilerError::NoPath {
                    from: pos,
                    to: home,
                },
            )?;
            for hop in path.windows(2) {
                emit_swap(out, hop[0], hop[1])?;
                swap_positions(phys, hop[0], hop[1]);
                pos = hop[1];
            }
        }
        finalized[pos] = true;
    }
    Ok(())
}

/// BFS path restricted to non-finalized nodes
fn shortest_open_path(
    topology: &Topology,
    finalized: &[bool],
    from: usize,
    to: usize,
) -> Option<Vec<usize>> {
    let mut prev: Vec<Option<usize>> = vec![None; finalized.len()];
    prev[from] = Some(from);
    let mut queue = std::collections::VecDeque::from([from]);
    'search: while let Some(node) = queue.pop_front() {
        for &next in topology.neighbors(node) {
            if prev[next].is_none() && !finalized[next] {
                prev[next] = Some(node);
                if next == to {
                    break 'search;
                }
                queue.push_back(next);
            }
        }
    }
    prev[to]?;
    let mut path = vec![to];
    while *path.last()? != from {
        let last = *path.last()?;
        path.push(prev[last]?);
    }
    path.reverse();
    Some(path)
}
