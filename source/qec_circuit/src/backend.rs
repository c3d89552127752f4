// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.


use crate::Error;
use std::fmt::{self, Display, Formatter};

/// A qubit, addressed by its position across all quantum registers of a circuit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Qubit(pub usize);

impl Display for Qubit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// A classical bit, addressed by its position across all classical registers of a circuit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Clbit(pub usize);

impl Display for Clbit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// The result of a measurement in the Z-basis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeasurementResult {
    Zero,
    One,
}

impl From<bool> for MeasurementResult {
    fn from(value: bool) -> Self {
        if value { Self::One } else { Self::Zero }
    }
}

impl From<MeasurementResult> for bool {
    fn from(value: MeasurementResult) -> Self {
        value == MeasurementResult::One
    }
}

/// Handle to a contiguous run of qubits owned by a circuit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuantumRegister {
    start: usize,
    len: usize,
}

impl QuantumRegister {
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The qubit at position `index` of this register.
    #[must_use]
    pub fn qubit(&self, index: usize) -> Qubit {
        assert!(
            index < self.len,
            "qubit {index} out of range for register of {} qubits",
            self.len
        );
        Qubit(self.start + index)
    }

    pub fn qubits(&self) -> impl Iterator<Item = Qubit> + '_ {
        (self.start..self.start + self.len).map(Qubit)
    }
}

/// Handle to a contiguous run of classical bits owned by a circuit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassicalRegister {
    start: usize,
    len: usize,
}

impl ClassicalRegister {
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn clbit(&self, index: usize) -> Clbit {
        assert!(
            index < self.len,
            "bit {index} out of range for register of {} bits",
            self.len
        );
        Clbit(self.start + index)
    }

    pub fn clbits(&self) -> impl Iterator<Item = Clbit> + '_ {
        (self.start..self.start + self.len).map(Clbit)
    }
}

/// Register bookkeeping shared by backend implementations.
/// Registers are appended and never removed, so handles stay valid for the life of a circuit.
#[derive(Clone, Debug, Default)]
pub struct Registers {
    quantum: Vec<QuantumRegister>,
    classical: Vec<ClassicalRegister>,
    num_qubits: usize,
    num_clbits: usize,
}

impl Registers {
    pub fn add_quantum(&mut self, len: usize) -> QuantumRegister {
        let register = QuantumRegister {
            start: self.num_qubits,
            len,
        };
        self.num_qubits += len;
        self.quantum.push(register);
        register
    }

    pub fn add_classical(&mut self, len: usize) -> ClassicalRegister {
        let register = ClassicalRegister {
            start: self.num_clbits,
            len,
        };
        self.num_clbits += len;
        self.classical.push(register);
        register
    }

    #[must_use]
    pub fn quantum(&self) -> &[QuantumRegister] {
        &self.quantum
    }

    #[must_use]
    pub fn classical(&self) -> &[ClassicalRegister] {
        &self.classical
    }

    #[must_use]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    #[must_use]
    pub fn num_clbits(&self) -> usize {
        self.num_clbits
    }
}

/// The trait that must be implemented by a circuit backend. Gate methods are invoked in
/// program order; measurements report their outcome synchronously.
pub trait Backend {
    fn registers(&self) -> &Registers;
    fn add_quantum_register(&mut self, len: usize) -> QuantumRegister;
    fn add_classical_register(&mut self, len: usize) -> ClassicalRegister;

    fn x(&mut self, q: Qubit);
    fn y(&mut self, q: Qubit);
    fn z(&mut self, q: Qubit);
    fn h(&mut self, q: Qubit);
    fn s(&mut self, q: Qubit);
    fn cx(&mut self, ctl: Qubit, q: Qubit);
    fn cz(&mut self, ctl: Qubit, q: Qubit);
    fn reset(&mut self, q: Qubit);
    fn measure(&mut self, q: Qubit, c: Clbit) -> MeasurementResult;
    /// Marks a point that no later operation may be reordered across.
    fn barrier(&mut self);
}

/// Resolves quantum register `index` of the circuit.
pub fn quantum_register(backend: &dyn Backend, index: usize) -> Result<QuantumRegister, Error> {
    backend
        .registers()
        .quantum()
        .get(index)
        .copied()
        .ok_or(Error::MissingRegister {
            kind: "quantum",
            index,
        })
}

/// Resolves classical register `index` of the circuit.
pub fn classical_register(
    backend: &dyn Backend,
    index: usize,
) -> Result<ClassicalRegister, Error> {
    backend
        .registers()
        .classical()
        .get(index)
        .copied()
        .ok_or(Error::MissingRegister {
            kind: "classical",
            index,
        })
}

/// Resolves the data register (quantum register 0) and checks it can hold `n` qubits.
pub fn data_register(backend: &dyn Backend, n: usize) -> Result<QuantumRegister, Error> {
    let register = quantum_register(backend, 0)?;
    if register.len() < n {
        return Err(Error::RegisterTooSmall {
            index: 0,
            expected: n,
            found: register.len(),
        });
    }
    Ok(register)
}
