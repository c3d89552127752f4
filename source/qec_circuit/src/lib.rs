// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Builds gate sequences for small error-correcting codes.
//!
//! Gate tokens such as `CNOT 1 2` name logical qubits. The interpreter translates them to
//! physical register slots through a [`Permutation`] that `Permute` tokens rewrite as the
//! circuit is built, so a sequence can relabel its qubits without moving any state.
//! Encoding schemes prepare and seed the data register, and the five-qubit code can be
//! checked with flagged or unflagged stabilizer rounds.

pub mod backend;
pub mod encoding;
mod error;
pub mod interpreter;
pub mod permutation;
pub mod recorder;
pub mod sim;
pub mod syndrome;

pub use backend::{Backend, MeasurementResult};
pub use encoding::{EncodingScheme, SchemeKind};
pub use error::Error;
pub use interpreter::{
    BuildOutput, InterpreterConfig, UnknownOpcodePolicy, build_circuit, measure_all,
};
pub use permutation::{Permutation, RegisterMap};
pub use recorder::CircuitRecorder;
pub use sim::StateVectorSim;
pub use syndrome::{SyndromeExtractor, SyndromeOutcome};
