//! Device connectivity graphs
//!
//! An undirected graph over physical qubits, either the 1-D line or an
//! arbitrary edge list read from a text file (one `u v` pair per line,
//! 0-based, deduplicated). Shortest paths come from breadth-first search
//! with neighbors visited in adjacency order, so routing is deterministic
//! for a given edge list.

use crate::error::CompilerError;
use crate::Result;
use ahash::AHashSet;
use std::collections::VecDeque;
use std::path::Path;

/// Undirected connectivity graph over physical qubits
#[derive(Debug, Clone)]
pub struct Topology {
    adjacency: Vec<Vec<usize>>,
}

impl Topology {
    /// The 1-D line: qubit q is adjacent to q−1 and q+1
    ///
    /// # Example
    /// ```
    /// use qsx_compiler::Topology;
    ///
    /// let line = Topology::line(4);
    /// assert!(line.are_adjacent(1, 2));
    /// assert!(!line.are_adjacent(0, 2));
    /// ```
    pub fn line(num_qubits: usize) -> Self {
        let adjacency = (0..num_qubits)
            .map(|q| {
                let mut neighbors = Vec::with_capacity(2);
                if q > 0 {
                    neighbors.push(q - 1);
                }
                if q + 1 < num_qubits {
                    neighbors.push(q + 1);
                }
                neighbors
            })
            .collect();
        Self { adjacency }
    }

    /// Build a graph from an explicit edge list
    ///
    /// Edges are undirected; duplicates (in either orientation) are dropped.
    ///
    /// # Errors
    /// Returns [`CompilerError::EdgeOutOfRange`] for endpoints `>= num_qubits`
    /// and [`CompilerError::SelfLoop`] for an edge from a qubit to itself.
    pub fn from_edges(num_qubits: usize, edges: &[(usize, usize)]) -> Result<Self> {
        let mut adjacency = vec![Vec::new(); num_qubits];
        let mut seen: AHashSet<(usize, usize)> = AHashSet::new();
        for &(u, v) in edges {
            if u >= num_qubits || v >= num_qubits {
                return Err(CompilerError::EdgeOutOfRange(u, v, num_qubits));
            }
            if u == v {
                return Err(CompilerError::SelfLoop(u));
            }
            if !seen.insert((u.min(v), u.max(v))) {
                continue;
            }
            adjacency[u].push(v);
            adjacency[v].push(u);
        }
        Ok(Self { adjacency })
    }

    /// Read a graph from a text file with one `u v` edge per line
    ///
    /// Blank lines and `#` comments are skipped.
    ///
    /// # Errors
    /// Returns [`CompilerError::TopologyParse`] for malformed lines and the
    /// same edge validation errors as [`Topology::from_edges`].
    pub fn from_file(path: impl AsRef<Path>, num_qubits: usize) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        let mut edges = Vec::new();
        for (idx, raw) in source.lines().enumerate() {
            let line = idx + 1;
            let text = raw.split('#').next().unwrap_or("").trim();
            if text.is_empty() {
                continue;
            }
            let mut fields = text.split_whitespace();
            let u = parse_endpoint(fields.next(), line)?;
            let v = parse_endpoint(fields.next(), line)?;
            if let Some(extra) = fields.next() {
                return Err(CompilerError::TopologyParse {
                    line,
                    message: format!("unexpected token '{}'", extra),
                });
            }
            edges.push((u, v));
        }
        Self::from_edges(num_qubits, &edges)
    }

    /// Number of physical qubits
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.adjacency.len()
    }

    /// Neighbors of `qubit`, in insertion order
    #[inline]
    pub fn neighbors(&self, qubit: usize) -> &[usize] {
        &self.adjacency[qubit]
    }

    /// Whether two physical qubits share an edge
    pub fn are_adjacent(&self, a: usize, b: usize) -> bool {
        self.adjacency.get(a).is_some_and(|n| n.contains(&b))
    }

    /// Shortest path from `from` to `to`, inclusive of both endpoints
    ///
    /// Breadth-first search; among equal-length paths the first one found in
    /// adjacency order wins. Returns `None` when the nodes are disconnected.
    pub fn shortest_path(&self, from: usize, to: usize) -> Option<Vec<usize>> {
        if from == to {
            return Some(vec![from]);
        }
        let mut prev: Vec<Option<usize>> = vec![None; self.adjacency.len()];
        prev[from] = Some(from);
        let mut queue = VecDeque::new();
        queue.push_back(from);
        'search: while let Some(node) = queue.pop_front() {
            for &next in &self.adjacency[node] {
                if prev[next].is_none() {
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
}

fn parse_endpoint(token: Option<&str>, line: usize) -> Result<usize> {
    let token = token.ok_or(CompilerError::TopologyParse {
        line,
        message: "expected two qubit indices".into(),
    })?;
    token.parse::<usize>().map_err(|_| CompilerError::TopologyParse {
        line,
        message: format!("invalid qubit index '{}'", token),
    })
}
