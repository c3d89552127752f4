// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.


use crate::backend::{
    Backend, ClassicalRegister, Clbit, MeasurementResult, QuantumRegister, Qubit, Registers,
};
use std::fmt::{self, Display, Formatter};

/// An operation emitted to a backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    X { target: Qubit },
    Y { target: Qubit },
    Z { target: Qubit },
    H { target: Qubit },
    S { target: Qubit },
    Cx { control: Qubit, target: Qubit },
    Cz { control: Qubit, target: Qubit },
    Reset { target: Qubit },
    Measure { target: Qubit, result: Clbit },
    Barrier,
}

impl Operation {
    /// Applies this operation to `backend`, returning the outcome of a measurement.
    pub fn apply(&self, backend: &mut dyn Backend) -> Option<MeasurementResult> {
        match *self {
            Operation::X { target } => backend.x(target),
            Operation::Y { target } => backend.y(target),
            Operation::Z { target } => backend.z(target),
            Operation::H { target } => backend.h(target),
            Operation::S { target } => backend.s(target),
            Operation::Cx { control, target } => backend.cx(control, target),
            Operation::Cz { control, target } => backend.cz(control, target),
            Operation::Reset { target } => backend.reset(target),
            Operation::Measure { target, result } => return Some(backend.measure(target, result)),
            Operation::Barrier => backend.barrier(),
        }
        None
    }

    /// The qubits this operation touches.
    #[must_use]
    pub fn qubits(&self) -> Vec<Qubit> {
        match *self {
            Operation::X { target }
            | Operation::Y { target }
            | Operation::Z { target }
            | Operation::H { target }
            | Operation::S { target }
            | Operation::Reset { target }
            | Operation::Measure { target, .. } => vec![target],
            Operation::Cx { control, target } | Operation::Cz { control, target } => {
                vec![control, target]
            }
            Operation::Barrier => Vec::new(),
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Operation::X { target } => write!(f, "x {target}"),
            Operation::Y { target } => write!(f, "y {target}"),
            Operation::Z { target } => write!(f, "z {target}"),
            Operation::H { target } => write!(f, "h {target}"),
            Operation::S { target } => write!(f, "s {target}"),
            Operation::Cx { control, target } => write!(f, "cx {control}, {target}"),
            Operation::Cz { control, target } => write!(f, "cz {control}, {target}"),
            Operation::Reset { target } => write!(f, "reset {target}"),
            Operation::Measure { target, result } => write!(f, "measure {target} -> {result}"),
            Operation::Barrier => write!(f, "barrier"),
        }
    }
}

/// Backend that records every operation it receives, in order, without executing anything.
/// Measurements always report `Zero`; replay the recording onto an executing backend
/// to obtain real outcomes.
#[derive(Clone, Debug, Default)]
pub struct CircuitRecorder {
    registers: Registers,
    operations: Vec<Operation>,
}

impl CircuitRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a recorder holding a data register of `num_qubits` qubits and a classical
    /// register of as many bits.
    #[must_use]
    pub fn with_data_registers(num_qubits: usize) -> Self {
        let mut recorder = Self::new();
        recorder.add_quantum_register(num_qubits);
        recorder.add_classical_register(num_qubits);
        recorder
    }

    #[must_use]
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Counts the recorded operations matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&Operation) -> bool) -> usize {
        self.operations.iter().filter(|&op| predicate(op)).count()
    }

    /// Recreates this recording's registers on `backend` and applies every operation to it.
    /// `backend` is expected to start without registers of its own.
    pub fn replay(&self, backend: &mut dyn Backend) {
        for register in self.registers.quantum() {
            backend.add_quantum_register(register.len());
        }
        for register in self.registers.classical() {
            backend.add_classical_register(register.len());
        }
        for op in &self.operations {
            op.apply(backend);
        }
    }

    fn push(&mut self, op: Operation) {
        log::trace!("emit {op}");
        self.operations.push(op);
    }
}

impl Display for CircuitRecorder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for op in &self.operations {
            writeln!(f, "{op}")?;
        }
        Ok(())
    }
}

impl Backend for CircuitRecorder {
    fn registers(&self) -> &Registers {
        &self.registers
    }

    fn add_quantum_register(&mut self, len: usize) -> QuantumRegister {
        self.registers.add_quantum(len)
    }

    fn add_classical_register(&mut self, len: usize) -> ClassicalRegister {
        self.registers.add_classical(len)
    }

    fn x(&mut self, target: Qubit) {
        self.push(Operation::X { target });
    }

    fn y(&mut self, target: Qubit) {
        self.push(Operation::Y { target });
    }

    fn z(&mut self, target: Qubit) {
        self.push(Operation::Z { target });
    }

    fn h(&mut self, target: Qubit) {
        self.push(Operation::H { target });
    }

    fn s(&mut self, target: Qubit) {
        self.push(Operation::S { target });
    }

    fn cx(&mut self, control: Qubit, target: Qubit) {
        self.push(Operation::Cx { control, target });
    }

    fn cz(&mut self, control: Qubit, target: Qubit) {
        self.push(Operation::Cz { control, target });
    }

    fn reset(&mut self, target: Qubit) {
        self.push(Operation::Reset { target });
    }

    fn measure(&mut self, target: Qubit, result: Clbit) -> MeasurementResult {
        self.push(Operation::Measure { target, result });
        MeasurementResult::Zero
    }

    fn barrier(&mut self) {
        self.push(Operation::Barrier);
    }
}
