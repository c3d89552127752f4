// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Clone, Debug, Diagnostic, Eq, Error, PartialEq)]
pub enum Error {
    #[error("unknown opcode `{0}` was ignored")]
    #[diagnostic(code("Qec.Interpreter.UnknownOpcode"), severity(Warning))]
    UnknownOpcode(String),

    #[error("`{args}` is not a permutation of 1..={n}")]
    #[diagnostic(code("Qec.Permutation.Malformed"))]
    #[diagnostic(help(
        "a relabeling lists every logical index of the register exactly once, in positional order"
    ))]
    MalformedPermutation { args: String, n: usize },

    #[error("`{opcode}` takes {expected} arguments, found {found}")]
    #[diagnostic(code("Qec.Interpreter.InvalidArity"))]
    InvalidArity {
        opcode: String,
        expected: usize,
        found: usize,
    },

    #[error("`{opcode}` cannot use logical qubit {index} as both operands")]
    #[diagnostic(code("Qec.Interpreter.DuplicateOperand"))]
    DuplicateOperand { opcode: String, index: usize },

    #[error("permutation covers {found} qubits where {expected} are required")]
    #[diagnostic(code("Qec.Permutation.LengthMismatch"))]
    PermutationLength { expected: usize, found: usize },

    #[error("logical index `{index}` is outside 1..={n}")]
    #[diagnostic(code("Qec.Interpreter.InvalidLogicalIndex"))]
    InvalidLogicalIndex { index: String, n: usize },

    #[error("input preset {preset} is not defined for the {scheme} scheme")]
    #[diagnostic(code("Qec.Encoding.InvalidInputPreset"))]
    InvalidInputPreset { scheme: &'static str, preset: usize },

    #[error("unknown encoding scheme `{0}`")]
    #[diagnostic(code("Qec.Encoding.UnknownScheme"))]
    #[diagnostic(help(
        "expected one of `uncoded`, `four-two-two`, `five-one-three` or `six-four-two`"
    ))]
    UnknownScheme(String),

    #[error("circuit has no {kind} register at index {index}")]
    #[diagnostic(code("Qec.Backend.MissingRegister"))]
    MissingRegister { kind: &'static str, index: usize },

    #[error("register {index} has {found} entries where {expected} are required")]
    #[diagnostic(code("Qec.Backend.RegisterTooSmall"))]
    RegisterTooSmall {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("stabilizer index {0} is out of range for the five-qubit code")]
    #[diagnostic(code("Qec.Syndrome.InvalidStabilizer"))]
    InvalidStabilizer(usize),

    #[error("wiring for stabilizer {0} has not been specified")]
    #[diagnostic(code("Qec.Syndrome.UnspecifiedStabilizer"))]
    #[diagnostic(help("only stabilizer 0 (X Z Z X I) can currently be measured"))]
    UnspecifiedStabilizer(usize),
}

impl Error {
    /// Whether the error is recorded and skipped rather than aborting a build.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::UnknownOpcode(..))
    }
}
