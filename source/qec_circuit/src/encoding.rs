// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.


use crate::{
    Error,
    backend::{Backend, data_register},
    permutation::Permutation,
    syndrome::SyndromeExtractor,
};
use enum_iterator::Sequence;
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// A way of laying out logical information over a register of `code_length` qubits.
///
/// `prepare_zeros` and `set_input` address quantum register 0 by raw physical slot; the
/// scheme's permutation only matters for gate tokens interpreted afterwards.
pub trait EncodingScheme {
    fn name(&self) -> &'static str;

    /// Number of data qubits.
    fn code_length(&self) -> usize;

    /// Measurement bitstrings, highest slot first, accepted as error-free outcomes.
    fn codewords(&self) -> &[&'static str];

    /// The logical to physical mapping gate tokens start from.
    fn permutation(&self) -> &Permutation;

    /// Prepares the encoded all-zeros state, allocating any extra registers the code needs.
    fn prepare_zeros(&self, backend: &mut dyn Backend) -> Result<(), Error>;

    /// Flips the qubits selected by input `preset`.
    fn set_input(&self, backend: &mut dyn Backend, preset: usize) -> Result<(), Error>;

    fn is_codeword(&self, bits: &str) -> bool {
        self.codewords().iter().any(|word| *word == bits)
    }
}

/// The closed set of available schemes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Sequence)]
pub enum SchemeKind {
    Uncoded,
    FourTwoTwo,
    FiveOneThree,
    SixFourTwo,
}

impl SchemeKind {
    #[must_use]
    pub fn build(self) -> Box<dyn EncodingScheme> {
        match self {
            SchemeKind::Uncoded => Box::new(Uncoded::new()),
            SchemeKind::FourTwoTwo => Box::new(FourTwoTwo::new()),
            SchemeKind::FiveOneThree => Box::new(FiveOneThree::new()),
            SchemeKind::SixFourTwo => Box::new(SixFourTwo::new()),
        }
    }
}

impl Display for SchemeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SchemeKind::Uncoded => "uncoded",
            SchemeKind::FourTwoTwo => "four-two-two",
            SchemeKind::FiveOneThree => "five-one-three",
            SchemeKind::SixFourTwo => "six-four-two",
        })
    }
}

impl FromStr for SchemeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uncoded" => Ok(SchemeKind::Uncoded),
            "four-two-two" | "422" => Ok(SchemeKind::FourTwoTwo),
            "five-one-three" | "513" => Ok(SchemeKind::FiveOneThree),
            "six-four-two" | "642" => Ok(SchemeKind::SixFourTwo),
            _ => Err(Error::UnknownScheme(s.to_string())),
        }
    }
}

/// Two bare qubits with no redundancy.
pub struct Uncoded {
    permutation: Permutation,
}

impl Uncoded {
    const N: usize = 2;

    #[must_use]
    pub fn new() -> Self {
        Self {
            permutation: Permutation::reversed(Self::N),
        }
    }
}

impl Default for Uncoded {
    fn default() -> Self {
        Self::new()
    }
}

impl EncodingScheme for Uncoded {
    fn name(&self) -> &'static str {
        "uncoded"
    }

    fn code_length(&self) -> usize {
        Self::N
    }

    fn codewords(&self) -> &[&'static str] {
        &["00", "01", "10", "11"]
    }

    fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    fn prepare_zeros(&self, backend: &mut dyn Backend) -> Result<(), Error> {
        data_register(backend, Self::N)?;
        Ok(())
    }

    fn set_input(&self, backend: &mut dyn Backend, preset: usize) -> Result<(), Error> {
        let qr = data_register(backend, Self::N)?;
        let flips: &[usize] = match preset {
            0 => &[],
            1 => &[1],
            2 => &[0],
            3 => &[0, 1],
            _ => return Err(invalid_preset(self, preset)),
        };
        for &slot in flips {
            backend.x(qr.qubit(slot));
        }
        Ok(())
    }
}

/// The [[4,2,2]] error-detecting code.
pub struct FourTwoTwo {
    permutation: Permutation,
}

impl FourTwoTwo {
    const N: usize = 4;

    #[must_use]
    pub fn new() -> Self {
        Self {
            permutation: Permutation::reversed(Self::N),
        }
    }
}

impl Default for FourTwoTwo {
    fn default() -> Self {
        Self::new()
    }
}

impl EncodingScheme for FourTwoTwo {
    fn name(&self) -> &'static str {
        "four-two-two"
    }

    fn code_length(&self) -> usize {
        Self::N
    }

    fn codewords(&self) -> &[&'static str] {
        &["0000", "1111", "0101", "1010", "0011", "1100", "0110", "1001"]
    }

    fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    fn prepare_zeros(&self, backend: &mut dyn Backend) -> Result<(), Error> {
        prepare_cat_state(backend, Self::N)
    }

    fn set_input(&self, backend: &mut dyn Backend, preset: usize) -> Result<(), Error> {
        flip_pair(self, backend, Self::N, preset)
    }
}

/// The [[5,1,3]] perfect code. Syndrome extraction uses two ancillas allocated by
/// `prepare_zeros`.
pub struct FiveOneThree {
    permutation: Permutation,
}

impl FiveOneThree {
    const N: usize = 5;

    #[must_use]
    pub fn new() -> Self {
        Self {
            permutation: Permutation::reversed(Self::N),
        }
    }

    /// A syndrome extractor over the initial layout. After a build that relabels qubits,
    /// construct the extractor from the build's final permutation instead.
    pub fn extractor(&self) -> Result<SyndromeExtractor<'_>, Error> {
        SyndromeExtractor::new(&self.permutation)
    }
}

impl Default for FiveOneThree {
    fn default() -> Self {
        Self::new()
    }
}

impl EncodingScheme for FiveOneThree {
    fn name(&self) -> &'static str {
        "five-one-three"
    }

    fn code_length(&self) -> usize {
        Self::N
    }

    fn codewords(&self) -> &[&'static str] {
        &[
            "00000", "10010", "01001", "10100", "01010", "11011", "00110", "11000", "11101",
            "00011", "11110", "01111", "10001", "01100", "10111", "00101", "11111", "01101",
            "10110", "01011", "10101", "00100", "11001", "00111", "00010", "11100", "00001",
            "10000", "01110", "10011", "01000", "11010",
        ]
    }

    fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    fn prepare_zeros(&self, backend: &mut dyn Backend) -> Result<(), Error> {
        data_register(backend, Self::N)?;
        let ancillas = backend.add_quantum_register(2);
        backend.add_classical_register(2);
        for q in ancillas.qubits() {
            backend.reset(q);
        }
        log::debug!("allocated syndrome ancillas for {}", self.name());
        Ok(())
    }

    fn set_input(&self, backend: &mut dyn Backend, preset: usize) -> Result<(), Error> {
        let qr = data_register(backend, Self::N)?;
        match preset {
            0 => return Ok(()),
            1 => {
                for slot in 0..Self::N {
                    backend.x(qr.qubit(slot));
                }
            }
            _ => return Err(invalid_preset(self, preset)),
        }
        backend.barrier();
        Ok(())
    }
}

/// Experimental six-qubit layout. Preparation and inputs only touch the first four slots,
/// so its codewords are those of [`FourTwoTwo`] with slots 4 and 5 left at zero.
pub struct SixFourTwo {
    permutation: Permutation,
}

impl SixFourTwo {
    const N: usize = 6;

    #[must_use]
    pub fn new() -> Self {
        Self {
            permutation: Permutation::reversed(Self::N),
        }
    }
}

impl Default for SixFourTwo {
    fn default() -> Self {
        Self::new()
    }
}

impl EncodingScheme for SixFourTwo {
    fn name(&self) -> &'static str {
        "six-four-two"
    }

    fn code_length(&self) -> usize {
        Self::N
    }

    fn codewords(&self) -> &[&'static str] {
        &["000000", "001111", "000101", "001010", "000011", "001100", "000110", "001001"]
    }

    fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    fn prepare_zeros(&self, backend: &mut dyn Backend) -> Result<(), Error> {
        log::warn!("{} preparation is experimental", self.name());
        prepare_cat_state(backend, Self::N)
    }

    fn set_input(&self, backend: &mut dyn Backend, preset: usize) -> Result<(), Error> {
        flip_pair(self, backend, Self::N, preset)
    }
}

/// Spreads slot 1 over slots 0 to 3 with one Hadamard and three CNOTs.
fn prepare_cat_state(backend: &mut dyn Backend, n: usize) -> Result<(), Error> {
    let qr = data_register(backend, n)?;
    backend.h(qr.qubit(1));
    backend.barrier();
    for (control, target) in [(1, 0), (1, 2), (2, 3)] {
        backend.cx(qr.qubit(control), qr.qubit(target));
        backend.barrier();
    }
    Ok(())
}

/// Flips the pair of slots selected by `preset`, then fences the input off. Preset 0 emits
/// nothing, not even the barrier.
fn flip_pair(
    scheme: &dyn EncodingScheme,
    backend: &mut dyn Backend,
    n: usize,
    preset: usize,
) -> Result<(), Error> {
    let qr = data_register(backend, n)?;
    let flips: &[usize] = match preset {
        0 => return Ok(()),
        1 => &[0, 2],
        2 => &[0, 1],
        3 => &[2, 1],
        _ => return Err(invalid_preset(scheme, preset)),
    };
    for &slot in flips {
        backend.x(qr.qubit(slot));
    }
    backend.barrier();
    Ok(())
}

fn invalid_preset(scheme: &dyn EncodingScheme, preset: usize) -> Error {
    Error::InvalidInputPreset {
        scheme: scheme.name(),
        preset,
    }
}
