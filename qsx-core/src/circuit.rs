//! Quantum circuit intermediate representation
//!
//! A circuit is a qubit count plus a flat, ordered list of tagged operation
//! records. Keeping the IR a plain sum type (no trait objects) lets the
//! executor walk it in a single cache-friendly loop and lets the optimizer
//! and mapper rewrite it with ordinary slice manipulation.

use crate::error::CoreError;
use crate::Result;
use smallvec::{smallvec, SmallVec};
use std::fmt;

/// Qubit operand list of an operation (at most two entries, stored inline)
pub type QubitList = SmallVec<[usize; 2]>;

/// The kind of a circuit operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OpKind {
    /// Hadamard
    H,
    /// Pauli-X
    X,
    /// Pauli-Y
    Y,
    /// Pauli-Z
    Z,
    /// Phase gate (√Z)
    S,
    /// X-axis rotation by an angle in radians
    Rx,
    /// Y-axis rotation by an angle in radians
    Ry,
    /// Z-axis rotation by an angle in radians
    Rz,
    /// Controlled-NOT on (control, target)
    Cnot,
    /// Terminal measurement of all qubits
    Measure,
    /// Single-qubit dephasing channel with probability p
    Dephase,
    /// Single-qubit depolarizing channel with probability p
    Depolarize,
    /// Single-qubit amplitude-damping channel with probability p
    AmplitudeDamping,
}

impl OpKind {
    /// Whether this kind is a parameterized rotation (RX/RY/RZ)
    #[inline]
    pub fn is_rotation(self) -> bool {
        matches!(self, OpKind::Rx | OpKind::Ry | OpKind::Rz)
    }

    /// Whether this kind is a noise channel
    #[inline]
    pub fn is_noise(self) -> bool {
        matches!(
            self,
            OpKind::Dephase | OpKind::Depolarize | OpKind::AmplitudeDamping
        )
    }

    /// Whether this kind is a unitary gate
    #[inline]
    pub fn is_unitary(self) -> bool {
        !self.is_noise() && self != OpKind::Measure
    }

    /// Whether applying this gate twice is the identity (X² = H² = Z² = I)
    #[inline]
    pub fn is_involutory(self) -> bool {
        matches!(self, OpKind::X | OpKind::H | OpKind::Z)
    }

    /// Number of qubit operands this kind takes
    #[inline]
    pub fn arity(self) -> usize {
        match self {
            OpKind::Measure => 0,
            OpKind::Cnot => 2,
            _ => 1,
        }
    }

    /// Textual mnemonic, as used by the circuit file format
    pub fn name(self) -> &'static str {
        match self {
            OpKind::H => "H",
            OpKind::X => "X",
            OpKind::Y => "Y",
            OpKind::Z => "Z",
            OpKind::S => "S",
            OpKind::Rx => "RX",
            OpKind::Ry => "RY",
            OpKind::Rz => "RZ",
            OpKind::Cnot => "CNOT",
            OpKind::Measure => "MEASURE",
            OpKind::Dephase => "DEPHASE",
            OpKind::Depolarize => "DEPOL",
            OpKind::AmplitudeDamping => "AMPDAMP",
        }
    }
}

/// A single circuit operation
///
/// `param` carries the rotation angle (radians) for RX/RY/RZ and the channel
/// probability for noise kinds; it is zero for everything else.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Op {
    pub kind: OpKind,
    pub qubits: QubitList,
    pub param: f64,
}

impl Op {
    /// Hadamard on `qubit`
    pub fn h(qubit: usize) -> Self {
        Self::single(OpKind::H, qubit)
    }

    /// Pauli-X on `qubit`
    pub fn x(qubit: usize) -> Self {
        Self::single(OpKind::X, qubit)
    }

    /// Pauli-Y on `qubit`
    pub fn y(qubit: usize) -> Self {
        Self::single(OpKind::Y, qubit)
    }

    /// Pauli-Z on `qubit`
    pub fn z(qubit: usize) -> Self {
        Self::single(OpKind::Z, qubit)
    }

    /// Phase gate on `qubit`
    pub fn s(qubit: usize) -> Self {
        Self::single(OpKind::S, qubit)
    }

    /// X rotation by `theta` radians on `qubit`
    pub fn rx(qubit: usize, theta: f64) -> Self {
        Self {
            kind: OpKind::Rx,
            qubits: smallvec![qubit],
            param: theta,
        }
    }

    /// Y rotation by `theta` radians on `qubit`
    pub fn ry(qubit: usize, theta: f64) -> Self {
        Self {
            kind: OpKind::Ry,
            qubits: smallvec![qubit],
            param: theta,
        }
    }

    /// Z rotation by `theta` radians on `qubit`
    pub fn rz(qubit: usize, theta: f64) -> Self {
        Self {
            kind: OpKind::Rz,
            qubits: smallvec![qubit],
            param: theta,
        }
    }

    /// Controlled-NOT with the given control and target
    pub fn cnot(control: usize, target: usize) -> Self {
        Self {
            kind: OpKind::Cnot,
            qubits: smallvec![control, target],
            param: 0.0,
        }
    }

    /// Terminal measurement of all qubits
    pub fn measure() -> Self {
        Self {
            kind: OpKind::Measure,
            qubits: QubitList::new(),
            param: 0.0,
        }
    }

    /// Dephasing channel with probability `p` on `qubit`
    pub fn dephase(qubit: usize, p: f64) -> Self {
        Self {
            kind: OpKind::Dephase,
            qubits: smallvec![qubit],
            param: p,
        }
    }

    /// Depolarizing channel with probability `p` on `qubit`
    pub fn depolarize(qubit: usize, p: f64) -> Self {
        Self {
            kind: OpKind::Depolarize,
            qubits: smallvec![qubit],
            param: p,
        }
    }

    /// Amplitude-damping channel with probability `p` on `qubit`
    pub fn amplitude_damping(qubit: usize, p: f64) -> Self {
        Self {
            kind: OpKind::AmplitudeDamping,
            qubits: smallvec![qubit],
            param: p,
        }
    }

    fn single(kind: OpKind, qubit: usize) -> Self {
        Self {
            kind,
            qubits: smallvec![qubit],
            param: 0.0,
        }
    }

    /// The sole operand of a single-qubit operation, if this is one
    #[inline]
    pub fn target(&self) -> Option<usize> {
        if self.qubits.len() == 1 {
            Some(self.qubits[0])
        } else {
            None
        }
    }

    /// Whether this operation acts on exactly one qubit
    #[inline]
    pub fn is_single_qubit(&self) -> bool {
        self.qubits.len() == 1
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            OpKind::Measure => write!(f, "MEASURE ALL"),
            OpKind::Cnot => write!(f, "CNOT {} {}", self.qubits[0], self.qubits[1]),
            kind if kind.is_rotation() || kind.is_noise() => {
                write!(f, "{} {} {}", kind.name(), self.qubits[0], self.param)
            }
            kind => write!(f, "{} {}", kind.name(), self.qubits[0]),
        }
    }
}

/// A quantum circuit: qubit count plus ordered operation list
///
/// Operations are validated on insertion, so every consumer of a `Circuit`
/// may assume well-formed operands.
///
/// # Example
/// ```
/// use qsx_core::{Circuit, Op};
///
/// let mut bell = Circuit::new(2).unwrap();
/// bell.push(Op::h(0)).unwrap();
/// bell.push(Op::cnot(0, 1)).unwrap();
/// bell.push(Op::measure()).unwrap();
/// assert_eq!(bell.to_string().lines().count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Circuit {
    num_qubits: usize,
    ops: Vec<Op>,
}

impl Circuit {
    /// Create an empty circuit over `num_qubits` qubits
    ///
    /// # Errors
    /// Returns [`CoreError::EmptyCircuit`] if `num_qubits` is 0.
    pub fn new(num_qubits: usize) -> Result<Self> {
        if num_qubits == 0 {
            return Err(CoreError::EmptyCircuit);
        }
        Ok(Self {
            num_qubits,
            ops: Vec::new(),
        })
    }

    /// Create a circuit with pre-allocated operation capacity
    ///
    /// # Errors
    /// Returns [`CoreError::EmptyCircuit`] if `num_qubits` is 0.
    pub fn with_capacity(num_qubits: usize, capacity: usize) -> Result<Self> {
        if num_qubits == 0 {
            return Err(CoreError::EmptyCircuit);
        }
        Ok(Self {
            num_qubits,
            ops: Vec::with_capacity(capacity),
        })
    }

    /// Build a circuit from an operation sequence, validating every entry
    ///
    /// # Errors
    /// Returns the first validation failure encountered.
    pub fn from_ops(num_qubits: usize, ops: impl IntoIterator<Item = Op>) -> Result<Self> {
        let iter = ops.into_iter();
        let mut circuit = Self::with_capacity(num_qubits, iter.size_hint().0)?;
        for op in iter {
            circuit.push(op)?;
        }
        Ok(circuit)
    }

    /// Number of qubits
    #[inline]
    pub const fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of operations
    #[inline]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether the circuit has no operations
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The operation sequence
    #[inline]
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Mutable access to a single operation (e.g. to shift a rotation angle)
    pub fn op_mut(&mut self, index: usize) -> Option<&mut Op> {
        self.ops.get_mut(index)
    }

    /// Iterate over the operations
    pub fn iter(&self) -> impl Iterator<Item = &Op> {
        self.ops.iter()
    }

    /// Indices of all parameterized rotations (RX/RY/RZ), in circuit order
    pub fn parameterized_indices(&self) -> Vec<usize> {
        self.ops
            .iter()
            .enumerate()
            .filter(|(_, op)| op.kind.is_rotation())
            .map(|(i, _)| i)
            .collect()
    }

    /// Whether the circuit contains any noise channel or measurement
    pub fn is_unitary(&self) -> bool {
        self.ops.iter().all(|op| op.kind.is_unitary())
    }

    /// Append an operation
    ///
    /// # Errors
    /// - [`CoreError::InvalidQubitCount`] if the operand count does not match
    ///   the operation kind
    /// - [`CoreError::InvalidQubit`] if any operand is `>= num_qubits`
    /// - [`CoreError::ControlEqualsTarget`] for a CNOT on a single qubit
    /// - [`CoreError::NonFiniteAngle`] for a NaN or infinite rotation angle
    /// - [`CoreError::ProbabilityOutOfRange`] for a channel probability
    ///   outside [0, 1]
    /// - [`CoreError::OperationAfterMeasure`] if a measurement has already
    ///   been appended
    pub fn push(&mut self, op: Op) -> Result<()> {
        self.check(&op)?;
        self.ops.push(op);
        Ok(())
    }

    /// Re-validate every operation against the circuit invariants
    ///
    /// Circuits built through [`Circuit::push`] are always valid; this is a
    /// guard for operation lists produced by hand or mutated in place.
    pub fn validate(&self) -> Result<()> {
        let mut measured = false;
        for op in &self.ops {
            if measured {
                return Err(CoreError::OperationAfterMeasure);
            }
            self.check_operands(op)?;
            measured = op.kind == OpKind::Measure;
        }
        Ok(())
    }

    fn check(&self, op: &Op) -> Result<()> {
        if matches!(self.ops.last(), Some(last) if last.kind == OpKind::Measure) {
            return Err(CoreError::OperationAfterMeasure);
        }
        self.check_operands(op)
    }

    fn check_operands(&self, op: &Op) -> Result<()> {
        let expected = op.kind.arity();
        if op.qubits.len() != expected {
            return Err(CoreError::InvalidQubitCount {
                op: op.kind.name(),
                expected,
                actual: op.qubits.len(),
            });
        }
        for &q in &op.qubits {
            if q >= self.num_qubits {
                return Err(CoreError::InvalidQubit(q, self.num_qubits));
            }
        }
        if op.kind == OpKind::Cnot && op.qubits[0] == op.qubits[1] {
            return Err(CoreError::ControlEqualsTarget(op.qubits[0]));
        }
        if op.kind.is_rotation() && !op.param.is_finite() {
            return Err(CoreError::NonFiniteAngle(op.param));
        }
        if op.kind.is_noise() && !(0.0..=1.0).contains(&op.param) {
            return Err(CoreError::ProbabilityOutOfRange(op.param));
        }
        Ok(())
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in &self.ops {
            writeln!(f, "{}", op)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_qubit_circuits_are_rejected() {
        assert!(matches!(Circuit::new(0), Err(CoreError::EmptyCircuit)));
        assert!(matches!(
            Circuit::with_capacity(0, 8),
            Err(CoreError::EmptyCircuit)
        ));
        assert!(matches!(
            Circuit::from_ops(0, [Op::measure()]),
            Err(CoreError::EmptyCircuit)
        ));
    }

    #[test]
    fn push_validates_qubit_range() {
        let mut c = Circuit::new(2).unwrap();
        assert!(c.push(Op::h(1)).is_ok());
        assert!(matches!(
            c.push(Op::h(2)),
            Err(CoreError::InvalidQubit(2, 2))
        ));
    }

    #[test]
    fn cnot_rejects_equal_endpoints() {
        let mut c = Circuit::new(2).unwrap();
        assert!(matches!(
            c.push(Op::cnot(1, 1)),
            Err(CoreError::ControlEqualsTarget(1))
        ));
    }

    #[test]
    fn rotation_angle_must_be_finite() {
        let mut c = Circuit::new(1).unwrap();
        assert!(c.push(Op::rx(0, 1.25)).is_ok());
        assert!(matches!(
            c.push(Op::ry(0, f64::NAN)),
            Err(CoreError::NonFiniteAngle(_))
        ));
    }

    #[test]
    fn channel_probability_range() {
        let mut c = Circuit::new(1).unwrap();
        assert!(c.push(Op::dephase(0, 0.0)).is_ok());
        assert!(c.push(Op::depolarize(0, 1.0)).is_ok());
        assert!(matches!(
            c.push(Op::amplitude_damping(0, 1.5)),
            Err(CoreError::ProbabilityOutOfRange(_))
        ));
    }

    #[test]
    fn nothing_after_measure() {
        let mut c = Circuit::new(1).unwrap();
        c.push(Op::h(0)).unwrap();
        c.push(Op::measure()).unwrap();
        assert!(matches!(
            c.push(Op::x(0)),
            Err(CoreError::OperationAfterMeasure)
        ));
    }

    #[test]
    fn parameterized_indices_are_rotations_only() {
        let mut c = Circuit::new(2).unwrap();
        c.push(Op::h(0)).unwrap();
        c.push(Op::rx(0, 0.5)).unwrap();
        c.push(Op::cnot(0, 1)).unwrap();
        c.push(Op::rz(1, -0.25)).unwrap();
        assert_eq!(c.parameterized_indices(), vec![1, 3]);
    }

    #[test]
    fn display_round_trips_through_mnemonics() {
        let mut c = Circuit::new(3).unwrap();
        c.push(Op::h(0)).unwrap();
        c.push(Op::rz(1, 0.5)).unwrap();
        c.push(Op::cnot(0, 2)).unwrap();
        c.push(Op::dephase(1, 0.1)).unwrap();
        c.push(Op::measure()).unwrap();
        let text = c.to_string();
        assert!(text.contains("H 0"));
        assert!(text.contains("RZ 1 0.5"));
        assert!(text.contains("CNOT 0 2"));
        assert!(text.contains("DEPHASE 1 0.1"));
        assert!(text.contains("MEASURE ALL"));
    }

    #[test]
    fn unitary_predicate() {
        let mut c = Circuit::new(1).unwrap();
        c.push(Op::h(0)).unwrap();
        assert!(c.is_unitary());
        c.push(Op::dephase(0, 0.2)).unwrap();
        assert!(!c.is_unitary());
    }
}
