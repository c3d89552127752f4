// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.


use crate::backend::{
    Backend, ClassicalRegister, Clbit, MeasurementResult, QuantumRegister, Qubit, Registers,
};
use num_complex::Complex64;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::f64::consts::FRAC_1_SQRT_2;

/// Dense state-vector backend. Qubit `k` is bit `k` of the amplitude index, so registers
/// added later occupy the high bits and start in the ground state.
pub struct StateVectorSim {
    registers: Registers,
    state: Vec<Complex64>,
    clbits: Vec<bool>,
    rng: StdRng,
}

impl StateVectorSim {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            registers: Registers::default(),
            state: vec![Complex64::new(1.0, 0.0)],
            clbits: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The last value measured into `c`.
    #[must_use]
    pub fn clbit(&self, c: Clbit) -> MeasurementResult {
        self.clbits[c.0].into()
    }

    /// Renders `register` as a bitstring with its highest bit first.
    #[must_use]
    pub fn bitstring(&self, register: &ClassicalRegister) -> String {
        let bits: Vec<Clbit> = register.clbits().collect();
        bits.iter()
            .rev()
            .map(|c| if self.clbits[c.0] { '1' } else { '0' })
            .collect()
    }

    /// Probability that measuring `q` yields `One`.
    #[must_use]
    pub fn probability_of_one(&self, q: Qubit) -> f64 {
        let mask = 1 << q.0;
        self.state
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, amp)| amp.norm_sqr())
            .sum()
    }

    /// Calls `f` on every pair of amplitudes differing only in bit `q`, low index first.
    fn for_each_pair(&mut self, q: Qubit, mut f: impl FnMut(&mut Complex64, &mut Complex64)) {
        let mask = 1 << q.0;
        for i in 0..self.state.len() {
            if i & mask == 0 {
                let (low, high) = self.state.split_at_mut(i | mask);
                f(&mut low[i], &mut high[0]);
            }
        }
    }

    fn collapse(&mut self, q: Qubit, outcome: bool) {
        let mask = 1 << q.0;
        let mut norm = 0.0;
        for (i, amp) in self.state.iter_mut().enumerate() {
            if (i & mask != 0) == outcome {
                norm += amp.norm_sqr();
            } else {
                *amp = Complex64::new(0.0, 0.0);
            }
        }
        let scale = norm.sqrt();
        if scale > 0.0 {
            for amp in &mut self.state {
                *amp /= scale;
            }
        }
    }

    fn sample(&mut self, q: Qubit) -> bool {
        let p_one = self.probability_of_one(q);
        let outcome = self.rng.gen_range(0.0..1.0) < p_one;
        self.collapse(q, outcome);
        outcome
    }
}

impl Backend for StateVectorSim {
    fn registers(&self) -> &Registers {
        &self.registers
    }

    fn add_quantum_register(&mut self, len: usize) -> QuantumRegister {
        let register = self.registers.add_quantum(len);
        self.state
            .resize(1 << self.registers.num_qubits(), Complex64::new(0.0, 0.0));
        register
    }

    fn add_classical_register(&mut self, len: usize) -> ClassicalRegister {
        let register = self.registers.add_classical(len);
        self.clbits.resize(self.registers.num_clbits(), false);
        register
    }

    fn x(&mut self, q: Qubit) {
        self.for_each_pair(q, std::mem::swap);
    }

    fn y(&mut self, q: Qubit) {
        self.for_each_pair(q, |a, b| {
            let (low, high) = (*a, *b);
            *a = -Complex64::i() * high;
            *b = Complex64::i() * low;
        });
    }

    fn z(&mut self, q: Qubit) {
        self.for_each_pair(q, |_, b| *b = -*b);
    }

    fn h(&mut self, q: Qubit) {
        self.for_each_pair(q, |a, b| {
            let (low, high) = (*a, *b);
            *a = (low + high) * FRAC_1_SQRT_2;
            *b = (low - high) * FRAC_1_SQRT_2;
        });
    }

    fn s(&mut self, q: Qubit) {
        self.for_each_pair(q, |_, b| *b *= Complex64::i());
    }

    fn cx(&mut self, ctl: Qubit, q: Qubit) {
        let ctl_mask = 1 << ctl.0;
        let mask = 1 << q.0;
        for i in 0..self.state.len() {
            if i & ctl_mask != 0 && i & mask == 0 {
                self.state.swap(i, i | mask);
            }
        }
    }

    fn cz(&mut self, ctl: Qubit, q: Qubit) {
        let mask = (1 << ctl.0) | (1 << q.0);
        for (i, amp) in self.state.iter_mut().enumerate() {
            if i & mask == mask {
                *amp = -*amp;
            }
        }
    }

    fn reset(&mut self, q: Qubit) {
        if self.sample(q) {
            self.x(q);
        }
    }

    fn measure(&mut self, q: Qubit, c: Clbit) -> MeasurementResult {
        let outcome = self.sample(q);
        self.clbits[c.0] = outcome;
        outcome.into()
    }

    fn barrier(&mut self) {}
}
