// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Builds an encoded circuit from gate tokens, replays it on the state-vector simulator and
//! reports which measured bitstrings fall inside the scheme's codeword set.

use clap::Parser;
use miette::{IntoDiagnostic, WrapErr};
use qec_circuit::{
    CircuitRecorder, InterpreterConfig, SchemeKind, StateVectorSim, SyndromeExtractor,
    UnknownOpcodePolicy, backend::classical_register, build_circuit, measure_all,
    syndrome::SYNDROME_REGISTER,
};
use serde::Serialize;
use std::{collections::BTreeMap, path::PathBuf};

#[derive(Parser, Debug)]
#[command(name = "qec-trace")]
#[command(about = "Trace gate tokens through an encoding scheme and sample the result")]
struct Cli {
    /// Encoding scheme: uncoded, four-two-two, five-one-three or six-four-two
    #[arg(long, default_value_t = SchemeKind::FourTwoTwo)]
    scheme: SchemeKind,

    /// Input preset applied after preparing the encoded zero state
    #[arg(long, default_value_t = 0)]
    preset: usize,

    /// File with one gate token per line
    #[arg(long)]
    tokens: Option<PathBuf>,

    /// Gate token, applied after any tokens read from file
    #[arg(long = "gate", value_name = "TOKEN")]
    gates: Vec<String>,

    /// Measure this stabilizer after the gate tokens (five-one-three only)
    #[arg(long)]
    syndrome: Option<usize>,

    /// Use a flag qubit for the stabilizer round
    #[arg(long, requires = "syndrome")]
    flag: bool,

    /// Number of simulated shots
    #[arg(long, default_value_t = 100)]
    shots: u64,

    /// Seed of the first shot; shot `k` uses `seed + k`
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Print the recorded circuit before sampling
    #[arg(long)]
    print_circuit: bool,

    /// Emit the shot report as JSON
    #[arg(long)]
    json: bool,

    /// Fail on unknown opcodes instead of skipping them
    #[arg(long)]
    reject_unknown: bool,
}

#[derive(Serialize)]
struct ShotReport {
    scheme: String,
    preset: usize,
    shots: u64,
    permutation: String,
    warnings: Vec<String>,
    counts: BTreeMap<String, u64>,
    invalid_shots: u64,
    /// Flag and syndrome bits, flag first, when a stabilizer was measured.
    #[serde(skip_serializing_if = "Option::is_none")]
    syndromes: Option<BTreeMap<String, u64>>,
}

fn main() -> miette::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let scheme = cli.scheme.build();
    let tokens = read_tokens(&cli)?;
    let config = InterpreterConfig {
        unknown_opcodes: if cli.reject_unknown {
            UnknownOpcodePolicy::Reject
        } else {
            UnknownOpcodePolicy::Warn
        },
        ..InterpreterConfig::default()
    };

    let mut circuit = CircuitRecorder::with_data_registers(scheme.code_length());
    scheme.prepare_zeros(&mut circuit)?;
    scheme.set_input(&mut circuit, cli.preset)?;
    let output = build_circuit(&mut circuit, &tokens, scheme.permutation().clone(), &config)?;
    if let Some(stabilizer) = cli.syndrome {
        if cli.scheme != SchemeKind::FiveOneThree {
            miette::bail!("syndrome extraction needs the five-one-three scheme");
        }
        SyndromeExtractor::new(&output.permutation)?.measure(&mut circuit, stabilizer, cli.flag)?;
    }
    measure_all(&mut circuit, &output.register_map)?;
    log::info!("recorded {} operations", circuit.operations().len());

    if cli.print_circuit {
        print!("{circuit}");
    }

    let mut counts = BTreeMap::new();
    let mut syndromes = cli.syndrome.map(|_| BTreeMap::new());
    let mut invalid_shots = 0;
    for shot in 0..cli.shots {
        let mut sim = StateVectorSim::new(cli.seed.wrapping_add(shot));
        circuit.replay(&mut sim);

        let bits = sim.bitstring(&classical_register(&sim, 0)?);
        if !scheme.is_codeword(&bits) {
            invalid_shots += 1;
        }
        *counts.entry(bits).or_insert(0) += 1;

        if let Some(syndromes) = &mut syndromes {
            let register = classical_register(&sim, SYNDROME_REGISTER)?;
            *syndromes.entry(sim.bitstring(&register)).or_insert(0) += 1;
        }
    }

    let report = ShotReport {
        scheme: scheme.name().to_string(),
        preset: cli.preset,
        shots: cli.shots,
        permutation: output.permutation.to_string(),
        warnings: output.warnings.iter().map(ToString::to_string).collect(),
        counts,
        invalid_shots,
        syndromes,
    };

    if cli.json {
        let json = serde_json::to_string_pretty(&report).into_diagnostic()?;
        println!("{json}");
    } else {
        print_report(&report);
    }
    Ok(())
}

fn read_tokens(cli: &Cli) -> miette::Result<Vec<String>> {
    let mut tokens = Vec::new();
    if let Some(path) = &cli.tokens {
        let text = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("could not read tokens from {}", path.display()))?;
        tokens.extend(text.lines().map(str::to_string));
    }
    tokens.extend(cli.gates.iter().cloned());
    Ok(tokens)
}

fn print_report(report: &ShotReport) {
    println!("{} preset {}, {} shots", report.scheme, report.preset, report.shots);
    println!("final permutation {}", report.permutation);
    for warning in &report.warnings {
        println!("warning: {warning}");
    }
    for (bits, count) in &report.counts {
        println!("  {bits}  {count}");
    }
    if let Some(syndromes) = &report.syndromes {
        println!("flag/syndrome bits:");
        for (bits, count) in syndromes {
            println!("  {bits}  {count}");
        }
    }
    if report.invalid_shots == 0 {
        println!("all shots are codewords");
    } else {
        println!("{} shots outside the codeword set", report.invalid_shots);
    }
}
