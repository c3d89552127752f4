// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::*;
use crate::{
    CircuitRecorder, InterpreterConfig, StateVectorSim,
    backend::{ClassicalRegister, Clbit, QuantumRegister, Registers},
    build_circuit,
    encoding::{EncodingScheme, FiveOneThree},
    recorder::Operation,
};
use expect_test::expect;

/// A recorder holding the five data qubits and the syndrome ancillas.
fn prepared_recorder() -> (FiveOneThree, CircuitRecorder) {
    let scheme = FiveOneThree::new();
    let mut recorder = CircuitRecorder::with_data_registers(5);
    scheme
        .prepare_zeros(&mut recorder)
        .expect("ancillas should be allocated");
    (scheme, recorder)
}

fn is_ancilla(q: Qubit) -> bool {
    q.0 >= 5
}

fn couplings(recorder: &CircuitRecorder) -> (usize, usize) {
    let data_to_ancilla = recorder.count(|op| {
        matches!(op, Operation::Cx { control, target } if !is_ancilla(*control) && is_ancilla(*target))
    });
    let ancilla_to_ancilla = recorder.count(|op| {
        matches!(op, Operation::Cx { control, target } if is_ancilla(*control) && is_ancilla(*target))
    });
    (data_to_ancilla, ancilla_to_ancilla)
}

fn measurements(recorder: &CircuitRecorder) -> usize {
    recorder.count(|op| matches!(op, Operation::Measure { .. }))
}

#[test]
fn reserved_indices_map_to_ancilla_slots() {
    assert_eq!(ancilla_slot(SYNDROME_ANCILLA), Some(1));
    assert_eq!(ancilla_slot(FLAG_ANCILLA), Some(0));
    assert_eq!(ancilla_slot(1), None);
}

#[test]
fn flagged_schedule_links_around_interior_terms() {
    let terms = generator(0).expect("stabilizer 0 should be defined");
    let steps = schedule(terms, true);

    assert_eq!(
        steps,
        vec![
            Step::Reset,
            Step::PrepareFlag,
            Step::Check(term(Pauli::X, 1)),
            Step::LinkFlag,
            Step::Check(term(Pauli::Z, 2)),
            Step::Check(term(Pauli::Z, 3)),
            Step::LinkFlag,
            Step::Check(term(Pauli::X, 4)),
            Step::MeasureSyndrome,
            Step::MeasureFlag,
        ]
    );
}

#[test]
fn unflagged_schedule_has_no_flag_steps() {
    let terms = generator(0).expect("stabilizer 0 should be defined");
    let steps = schedule(terms, false);

    assert_eq!(steps.len(), 6);
    assert!(
        !steps
            .iter()
            .any(|step| matches!(step, Step::PrepareFlag | Step::LinkFlag | Step::MeasureFlag))
    );
}

#[test]
fn flagged_round_circuit() {
    let (scheme, mut recorder) = prepared_recorder();
    let extractor = scheme.extractor().expect("permutation should cover the code");
    extractor
        .measure(&mut recorder, 0, true)
        .expect("stabilizer 0 should be measurable");

    expect![[r#"
        reset q5
        reset q6
        reset q5
        reset q6
        h q5
        h q4
        cx q4, q6
        h q4
        cx q5, q6
        cx q3, q6
        cx q2, q6
        cx q5, q6
        h q1
        cx q1, q6
        h q1
        measure q6 -> c5
        h q5
        measure q5 -> c6
    "#]]
    .assert_eq(&recorder.to_string());
}

#[test]
fn flagged_round_counts() {
    let (scheme, mut recorder) = prepared_recorder();
    let outcome = scheme
        .extractor()
        .expect("permutation should cover the code")
        .measure(&mut recorder, 0, true)
        .expect("stabilizer 0 should be measurable");

    assert_eq!(couplings(&recorder), (4, 2));
    assert_eq!(measurements(&recorder), 2);
    assert!(outcome.flag.is_some());
}

#[test]
fn unflagged_round_counts() {
    let (scheme, mut recorder) = prepared_recorder();
    let outcome = scheme
        .extractor()
        .expect("permutation should cover the code")
        .measure(&mut recorder, 0, false)
        .expect("stabilizer 0 should be measurable");

    assert_eq!(couplings(&recorder), (4, 0));
    assert_eq!(measurements(&recorder), 1);
    assert_eq!(outcome.flag, None);
    assert!(outcome.is_reliable());
}

#[test]
fn checks_follow_relabeled_data_qubits() {
    let (scheme, mut recorder) = prepared_recorder();
    let output = build_circuit(
        &mut recorder,
        ["Permute 4 2 3 1 5"],
        scheme.permutation().clone(),
        &InterpreterConfig::default(),
    )
    .expect("build should succeed");
    let extractor = SyndromeExtractor::new(&output.permutation).expect("five data qubits");
    let start = recorder.operations().len();
    extractor
        .measure(&mut recorder, 0, false)
        .expect("stabilizer 0 should be measurable");

    // Logical 1 and 4 swapped places, so the X checks now land on slots 1 and 4.
    let hadamards: Vec<usize> = recorder.operations()[start..]
        .iter()
        .filter_map(|op| match op {
            Operation::H { target } => Some(target.0),
            _ => None,
        })
        .collect();
    assert_eq!(hadamards, vec![1, 1, 4, 4]);
}

#[test]
fn undefined_stabilizers_are_rejected() {
    let (scheme, mut recorder) = prepared_recorder();
    let extractor = scheme.extractor().expect("permutation should cover the code");
    let before = recorder.operations().len();

    for index in 1..4 {
        assert_eq!(
            extractor.measure(&mut recorder, index, false),
            Err(Error::UnspecifiedStabilizer(index))
        );
    }
    assert_eq!(
        extractor.measure(&mut recorder, 4, true),
        Err(Error::InvalidStabilizer(4))
    );
    assert_eq!(recorder.operations().len(), before);
}

#[test]
fn measuring_requires_ancilla_registers() {
    let scheme = FiveOneThree::new();
    let mut recorder = CircuitRecorder::with_data_registers(5);

    assert_eq!(
        scheme
            .extractor()
            .expect("permutation should cover the code")
            .measure(&mut recorder, 0, false),
        Err(Error::MissingRegister {
            kind: "quantum",
            index: ANCILLA_REGISTER
        })
    );
}

#[test]
fn extractor_requires_five_qubit_permutation() {
    for found in [4, 6] {
        let permutation = Permutation::reversed(found);
        assert_eq!(
            SyndromeExtractor::new(&permutation).err(),
            Some(Error::PermutationLength {
                expected: 5,
                found
            })
        );
    }
}

#[test]
fn raised_flag_marks_outcome_unreliable() {
    let outcome = SyndromeOutcome {
        syndrome: MeasurementResult::Zero,
        flag: Some(MeasurementResult::One),
    };
    assert!(!outcome.is_reliable());
}

/// Prepares data qubits on a simulator with `tokens` and measures stabilizer 0 once.
fn simulate(tokens: &[&str], seed: u64) -> SyndromeOutcome {
    let scheme = FiveOneThree::new();
    let mut sim = StateVectorSim::new(seed);
    sim.add_quantum_register(5);
    sim.add_classical_register(5);
    scheme
        .prepare_zeros(&mut sim)
        .expect("ancillas should be allocated");
    let output = build_circuit(
        &mut sim,
        tokens.iter().copied(),
        scheme.permutation().clone(),
        &InterpreterConfig::default(),
    )
    .expect("build should succeed");
    SyndromeExtractor::new(&output.permutation)
        .expect("five data qubits")
        .measure(&mut sim, 0, true)
        .expect("stabilizer 0 should be measurable")
}

#[test]
fn eigenstate_has_trivial_syndrome() {
    // |+> on qubits 1 and 4 and |0> elsewhere is a +1 eigenstate of X Z Z X I.
    for seed in 0..4 {
        let outcome = simulate(&["H 1 4"], seed);
        assert_eq!(outcome.syndrome, MeasurementResult::Zero);
        assert_eq!(outcome.flag, Some(MeasurementResult::Zero));
    }
}

#[test]
fn phase_error_flips_syndrome() {
    for tokens in [&["H 1 4", "Z 1"][..], &["H 1 4", "Z 4"][..], &["H 1 4", "X 2"][..]] {
        let outcome = simulate(tokens, 0);
        assert_eq!(outcome.syndrome, MeasurementResult::One, "tokens {tokens:?}");
        assert!(outcome.is_reliable());
    }
}

#[test]
fn commuting_error_leaves_syndrome_trivial() {
    let outcome = simulate(&["H 1 4", "X 1", "Z 5"], 0);
    assert_eq!(outcome.syndrome, MeasurementResult::Zero);
}

/// Simulator that applies a phase flip to `victim` right after the first `cx` from `control`
/// to `victim`.
struct PhaseFaultSim {
    inner: StateVectorSim,
    control: Qubit,
    victim: Qubit,
    fired: bool,
}

impl Backend for PhaseFaultSim {
    fn registers(&self) -> &Registers {
        self.inner.registers()
    }

    fn add_quantum_register(&mut self, len: usize) -> QuantumRegister {
        self.inner.add_quantum_register(len)
    }

    fn add_classical_register(&mut self, len: usize) -> ClassicalRegister {
        self.inner.add_classical_register(len)
    }

    fn x(&mut self, q: Qubit) {
        self.inner.x(q);
    }

    fn y(&mut self, q: Qubit) {
        self.inner.y(q);
    }

    fn z(&mut self, q: Qubit) {
        self.inner.z(q);
    }

    fn h(&mut self, q: Qubit) {
        self.inner.h(q);
    }

    fn s(&mut self, q: Qubit) {
        self.inner.s(q);
    }

    fn cx(&mut self, ctl: Qubit, q: Qubit) {
        self.inner.cx(ctl, q);
        if !self.fired && ctl == self.control && q == self.victim {
            self.fired = true;
            self.inner.z(q);
        }
    }

    fn cz(&mut self, ctl: Qubit, q: Qubit) {
        self.inner.cz(ctl, q);
    }

    fn reset(&mut self, q: Qubit) {
        self.inner.reset(q);
    }

    fn measure(&mut self, q: Qubit, c: Clbit) -> MeasurementResult {
        self.inner.measure(q, c)
    }

    fn barrier(&mut self) {
        self.inner.barrier();
    }
}

#[test]
fn fault_on_syndrome_ancilla_raises_flag() {
    let scheme = FiveOneThree::new();
    for seed in 0..4 {
        let mut sim = PhaseFaultSim {
            inner: StateVectorSim::new(seed),
            control: Qubit(5),
            victim: Qubit(6),
            fired: false,
        };
        sim.add_quantum_register(5);
        sim.add_classical_register(5);
        scheme
            .prepare_zeros(&mut sim)
            .expect("ancillas should be allocated");
        let output = build_circuit(
            &mut sim,
            ["H 1 4"],
            scheme.permutation().clone(),
            &InterpreterConfig::default(),
        )
        .expect("build should succeed");
        let outcome = SyndromeExtractor::new(&output.permutation)
            .expect("five data qubits")
            .measure(&mut sim, 0, true)
            .expect("stabilizer 0 should be measurable");

        assert!(sim.fired);
        assert_eq!(outcome.syndrome, MeasurementResult::Zero);
        assert_eq!(outcome.flag, Some(MeasurementResult::One));
        assert!(!outcome.is_reliable());
    }
}
