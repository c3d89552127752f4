// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.


use crate::{
    Error,
    backend::{Backend, QuantumRegister, classical_register, data_register},
    permutation::{Permutation, RegisterMap, validate_order},
};

/// A gate token parsed against a register of known size. Every index is a validated
/// 1-based logical index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateOp {
    X(Vec<usize>),
    Y(Vec<usize>),
    Z(Vec<usize>),
    H(Vec<usize>),
    /// Phase gate, emitted as `S`.
    P(Vec<usize>),
    Cnot { control: usize, target: usize },
    Cz(usize, usize),
    Permute(Vec<usize>),
}

/// One entry of a token stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    Gate(GateOp),
    /// An opcode outside the known vocabulary, kept so it can be reported.
    Unknown(String),
    /// A token with no opcode.
    Empty,
}

impl Instruction {
    /// Parses a token of the form `OPCODE arg arg ...` for a register of `n` logical qubits.
    pub fn parse(token: &str, n: usize) -> Result<Self, Error> {
        let mut words = token.split_whitespace();
        let Some(opcode) = words.next() else {
            return Ok(Instruction::Empty);
        };
        let args: Vec<&str> = words.collect();

        let op = match opcode {
            "X" => GateOp::X(parse_indices(&args, n)?),
            "Y" => GateOp::Y(parse_indices(&args, n)?),
            "Z" => GateOp::Z(parse_indices(&args, n)?),
            "H" => GateOp::H(parse_indices(&args, n)?),
            "P" => GateOp::P(parse_indices(&args, n)?),
            "CNOT" | "CX" => {
                let (control, target) = parse_pair(opcode, &args, n)?;
                GateOp::Cnot { control, target }
            }
            "CZ" => {
                let (a, b) = parse_pair(opcode, &args, n)?;
                GateOp::Cz(a, b)
            }
            "Permute" => GateOp::Permute(parse_order(&args, n)?),
            _ => return Ok(Instruction::Unknown(opcode.to_string())),
        };
        Ok(Instruction::Gate(op))
    }
}

fn parse_index(arg: &str, n: usize) -> Result<usize, Error> {
    let invalid = || Error::InvalidLogicalIndex {
        index: arg.to_string(),
        n,
    };
    if arg.is_empty() || !arg.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match arg.parse::<usize>() {
        Ok(index) if (1..=n).contains(&index) => Ok(index),
        _ => Err(invalid()),
    }
}

fn parse_indices(args: &[&str], n: usize) -> Result<Vec<usize>, Error> {
    args.iter().map(|arg| parse_index(arg, n)).collect()
}

fn parse_pair(opcode: &str, args: &[&str], n: usize) -> Result<(usize, usize), Error> {
    let &[first, second] = args else {
        return Err(Error::InvalidArity {
            opcode: opcode.to_string(),
            expected: 2,
            found: args.len(),
        });
    };
    let (first, second) = (parse_index(first, n)?, parse_index(second, n)?);
    if first == second {
        return Err(Error::DuplicateOperand {
            opcode: opcode.to_string(),
            index: first,
        });
    }
    Ok((first, second))
}

fn parse_order(args: &[&str], n: usize) -> Result<Vec<usize>, Error> {
    let malformed = || Error::MalformedPermutation {
        args: args.join(" "),
        n,
    };
    let order = args
        .iter()
        .map(|arg| parse_index(arg, n).map_err(|_| malformed()))
        .collect::<Result<Vec<_>, _>>()?;
    validate_order(&order, n).map_err(|_| malformed())?;
    Ok(order)
}

/// How the interpreter treats opcodes outside its vocabulary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnknownOpcodePolicy {
    /// Skip the token and record a warning.
    #[default]
    Warn,
    /// Abort the build.
    Reject,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InterpreterConfig {
    /// Emit a barrier once the whole token stream has been applied.
    pub insert_barrier: bool,
    pub unknown_opcodes: UnknownOpcodePolicy,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            insert_barrier: true,
            unknown_opcodes: UnknownOpcodePolicy::Warn,
        }
    }
}

/// The result of a successful build.
#[derive(Clone, Debug)]
pub struct BuildOutput {
    /// Logical to physical mapping after the last token.
    pub permutation: Permutation,
    /// Measurement wiring recovering the initial qubit order.
    pub register_map: RegisterMap,
    /// Non-fatal diagnostics, in token order.
    pub warnings: Vec<Error>,
}

/// Applies `tokens` in order to quantum register 0 of `backend`, starting from `initial`.
///
/// The whole stream is parsed and validated before any operation is emitted, so a fatal
/// error leaves the backend untouched.
pub fn build_circuit<I, S>(
    backend: &mut dyn Backend,
    tokens: I,
    initial: Permutation,
    config: &InterpreterConfig,
) -> Result<BuildOutput, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let n = initial.len();
    let register = data_register(backend, n)?;

    let mut program = Vec::new();
    let mut warnings = Vec::new();
    for token in tokens {
        match Instruction::parse(token.as_ref(), n)? {
            Instruction::Gate(op) => program.push(op),
            Instruction::Unknown(opcode) => {
                let warning = Error::UnknownOpcode(opcode);
                if config.unknown_opcodes == UnknownOpcodePolicy::Reject {
                    return Err(warning);
                }
                log::warn!("{warning}");
                warnings.push(warning);
            }
            Instruction::Empty => {}
        }
    }

    let mut permutation = initial.clone();
    for op in &program {
        apply(backend, &register, &mut permutation, op)?;
    }
    if config.insert_barrier {
        backend.barrier();
    }

    let register_map = permutation.register_map(&initial)?;
    Ok(BuildOutput {
        permutation,
        register_map,
        warnings,
    })
}

fn apply(
    backend: &mut dyn Backend,
    register: &QuantumRegister,
    permutation: &mut Permutation,
    op: &GateOp,
) -> Result<(), Error> {
    let qubit = |permutation: &Permutation, logical: usize| {
        permutation
            .physical(logical)
            .map(|slot| register.qubit(slot))
    };
    match op {
        GateOp::X(targets) => {
            for &t in targets {
                backend.x(qubit(permutation, t)?);
            }
        }
        GateOp::Y(targets) => {
            for &t in targets {
                backend.y(qubit(permutation, t)?);
            }
        }
        GateOp::Z(targets) => {
            for &t in targets {
                backend.z(qubit(permutation, t)?);
            }
        }
        GateOp::H(targets) => {
            for &t in targets {
                backend.h(qubit(permutation, t)?);
            }
        }
        GateOp::P(targets) => {
            for &t in targets {
                backend.s(qubit(permutation, t)?);
            }
        }
        GateOp::Cnot { control, target } => {
            backend.cx(qubit(permutation, *control)?, qubit(permutation, *target)?);
        }
        GateOp::Cz(a, b) => backend.cz(qubit(permutation, *a)?, qubit(permutation, *b)?),
        GateOp::Permute(order) => permutation.relabel(order)?,
    }
    Ok(())
}

/// Measures physical slot `register_map[k]` of the data register into bit `k` of
/// classical register 0.
pub fn measure_all(backend: &mut dyn Backend, register_map: &RegisterMap) -> Result<(), Error> {
    let qubits = data_register(backend, register_map.len())?;
    let bits = classical_register(backend, 0)?;
    if bits.len() < register_map.len() {
        return Err(Error::RegisterTooSmall {
            index: 0,
            expected: register_map.len(),
            found: bits.len(),
        });
    }
    for (bit, slot) in register_map.iter() {
        backend.measure(qubits.qubit(slot), bits.clbit(bit));
    }
    Ok(())
}
