// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Ancilla-mediated stabilizer measurement for the five-qubit code.
//!
//! Each round couples the data qubits of one generator into a syndrome ancilla and
//! measures it. With flagging enabled a second ancilla is prepared in `|+〉` and linked to
//! the syndrome ancilla around the middle of the check, so that a fault spreading from the
//! syndrome ancilla back onto the data shows up as a raised flag.

#[cfg(test)]
mod tests;

use crate::{
    Error,
    backend::{
        Backend, MeasurementResult, Qubit, classical_register, data_register, quantum_register,
    },
    permutation::Permutation,
};

/// Logical index reserved for the syndrome ancilla.
pub const SYNDROME_ANCILLA: usize = 6;
/// Logical index reserved for the flag ancilla.
pub const FLAG_ANCILLA: usize = 7;

/// Quantum register holding the two ancillas.
pub const ANCILLA_REGISTER: usize = 1;
/// Classical register receiving the syndrome and flag bits.
pub const SYNDROME_REGISTER: usize = 1;

const FLAG_SLOT: usize = 0;
const SYNDROME_SLOT: usize = 1;

const SYNDROME_BIT: usize = 0;
const FLAG_BIT: usize = 1;

const NUM_DATA_QUBITS: usize = 5;
const NUM_STABILIZERS: usize = 4;

/// Slot in the ancilla register of a reserved logical index.
#[must_use]
pub const fn ancilla_slot(logical: usize) -> Option<usize> {
    match logical {
        SYNDROME_ANCILLA => Some(SYNDROME_SLOT),
        FLAG_ANCILLA => Some(FLAG_SLOT),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pauli {
    X,
    Z,
}

/// One single-qubit factor of a generator, acting on a logical data qubit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PauliTerm {
    pub pauli: Pauli,
    pub qubit: usize,
}

const fn term(pauli: Pauli, qubit: usize) -> PauliTerm {
    PauliTerm { pauli, qubit }
}

/// X Z Z X I
const STABILIZER_0: [PauliTerm; 4] = [
    term(Pauli::X, 1),
    term(Pauli::Z, 2),
    term(Pauli::Z, 3),
    term(Pauli::X, 4),
];

/// The Pauli terms of generator `index`.
pub fn generator(index: usize) -> Result<&'static [PauliTerm], Error> {
    match index {
        0 => Ok(&STABILIZER_0),
        // TODO: wire I X Z Z X, X I X Z Z and Z X I X Z once checked against an encoder.
        1..NUM_STABILIZERS => Err(Error::UnspecifiedStabilizer(index)),
        _ => Err(Error::InvalidStabilizer(index)),
    }
}

/// A stage of one measurement round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Reset,
    PrepareFlag,
    Check(PauliTerm),
    LinkFlag,
    MeasureSyndrome,
    MeasureFlag,
}

/// The ordered stages measuring `terms`. Flag links surround the interior terms.
#[must_use]
pub fn schedule(terms: &[PauliTerm], flagged: bool) -> Vec<Step> {
    let mut steps = vec![Step::Reset];
    if flagged {
        steps.push(Step::PrepareFlag);
    }
    let last = terms.len().saturating_sub(1);
    for (i, &term) in terms.iter().enumerate() {
        if flagged && i == last && last > 0 {
            steps.push(Step::LinkFlag);
        }
        steps.push(Step::Check(term));
        if flagged && i == 0 && last > 0 {
            steps.push(Step::LinkFlag);
        }
    }
    steps.push(Step::MeasureSyndrome);
    if flagged {
        steps.push(Step::MeasureFlag);
    }
    steps
}

/// Outcome of one stabilizer round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyndromeOutcome {
    pub syndrome: MeasurementResult,
    /// `None` when the round ran without a flag qubit.
    pub flag: Option<MeasurementResult>,
}

impl SyndromeOutcome {
    /// A raised flag means a fault hit the check itself; the syndrome should be re-measured.
    #[must_use]
    pub fn is_reliable(&self) -> bool {
        self.flag != Some(MeasurementResult::One)
    }
}

/// Measures five-qubit code stabilizers, locating data qubits through a permutation.
pub struct SyndromeExtractor<'a> {
    permutation: &'a Permutation,
}

impl<'a> SyndromeExtractor<'a> {
    /// `permutation` must cover the five data qubits.
    pub fn new(permutation: &'a Permutation) -> Result<Self, Error> {
        if permutation.len() != NUM_DATA_QUBITS {
            return Err(Error::PermutationLength {
                expected: NUM_DATA_QUBITS,
                found: permutation.len(),
            });
        }
        Ok(Self { permutation })
    }

    /// Runs one round measuring `stabilizer`, with or without a flag qubit.
    pub fn measure(
        &self,
        backend: &mut dyn Backend,
        stabilizer: usize,
        flagged: bool,
    ) -> Result<SyndromeOutcome, Error> {
        let terms = generator(stabilizer)?;
        let data = data_register(backend, NUM_DATA_QUBITS)?;
        let ancillas = quantum_register(backend, ANCILLA_REGISTER)?;
        if ancillas.len() < 2 {
            return Err(Error::RegisterTooSmall {
                index: ANCILLA_REGISTER,
                expected: 2,
                found: ancillas.len(),
            });
        }
        let bits = classical_register(backend, SYNDROME_REGISTER)?;
        if bits.len() < 2 {
            return Err(Error::RegisterTooSmall {
                index: SYNDROME_REGISTER,
                expected: 2,
                found: bits.len(),
            });
        }

        let ancilla = |logical: usize| {
            ancilla_slot(logical)
                .map(|slot| ancillas.qubit(slot))
                .ok_or_else(|| Error::InvalidLogicalIndex {
                    index: logical.to_string(),
                    n: FLAG_ANCILLA,
                })
        };
        let syndrome_qubit = ancilla(SYNDROME_ANCILLA)?;
        let flag_qubit = ancilla(FLAG_ANCILLA)?;

        let mut syndrome = MeasurementResult::Zero;
        let mut flag = None;
        for step in schedule(terms, flagged) {
            log::trace!("stabilizer {stabilizer}: {step:?}");
            match step {
                Step::Reset => {
                    backend.reset(flag_qubit);
                    backend.reset(syndrome_qubit);
                }
                Step::PrepareFlag => backend.h(flag_qubit),
                Step::Check(term) => {
                    let target = data.qubit(self.permutation.physical(term.qubit)?);
                    check(backend, term.pauli, target, syndrome_qubit);
                }
                Step::LinkFlag => backend.cx(flag_qubit, syndrome_qubit),
                Step::MeasureSyndrome => {
                    syndrome = backend.measure(syndrome_qubit, bits.clbit(SYNDROME_BIT));
                }
                Step::MeasureFlag => {
                    backend.h(flag_qubit);
                    flag = Some(backend.measure(flag_qubit, bits.clbit(FLAG_BIT)));
                }
            }
        }

        log::debug!("stabilizer {stabilizer}: syndrome {syndrome:?}, flag {flag:?}");
        Ok(SyndromeOutcome { syndrome, flag })
    }
}

/// Copies the `pauli` parity of `data` onto `ancilla`.
fn check(backend: &mut dyn Backend, pauli: Pauli, data: Qubit, ancilla: Qubit) {
    match pauli {
        Pauli::X => {
            backend.h(data);
            backend.cx(data, ancilla);
            backend.h(data);
        }
        Pauli::Z => backend.cx(data, ancilla),
    }
}
