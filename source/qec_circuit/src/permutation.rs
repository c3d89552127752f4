// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.


use crate::Error;
use rustc_hash::FxHashSet;
use std::fmt::{self, Display, Formatter};

/// Bijective mapping from logical qubit indices (1-based) to physical register slots (0-based).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Permutation {
    /// `slots[i]` is the physical slot of logical qubit `i + 1`.
    slots: Vec<usize>,
}

impl Permutation {
    /// Maps logical qubit `k` to slot `k - 1`.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        Self {
            slots: (0..n).collect(),
        }
    }

    /// Maps logical qubit `k` to slot `n - k`, so qubits numbered 1 to n read left to right
    /// when the register is printed with its highest slot first.
    #[must_use]
    pub fn reversed(n: usize) -> Self {
        Self {
            slots: (0..n).rev().collect(),
        }
    }

    /// Builds a permutation from the physical slot of each logical qubit, in logical order.
    pub fn from_physical(slots: Vec<usize>) -> Result<Self, Error> {
        let n = slots.len();
        let mut seen = FxHashSet::default();
        if slots.iter().all(|&slot| slot < n && seen.insert(slot)) {
            Ok(Self { slots })
        } else {
            Err(Error::MalformedPermutation {
                args: join(&slots),
                n,
            })
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The physical slot currently holding logical qubit `logical`.
    pub fn physical(&self, logical: usize) -> Result<usize, Error> {
        logical
            .checked_sub(1)
            .and_then(|i| self.slots.get(i))
            .copied()
            .ok_or_else(|| Error::InvalidLogicalIndex {
                index: logical.to_string(),
                n: self.len(),
            })
    }

    /// Iterates `(logical, physical)` pairs in logical order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, &physical)| (i + 1, physical))
    }

    /// Relabels the register so that logical slot `i` takes over the physical position held
    /// by logical qubit `order[i - 1]` before the call. Every read uses the pre-call snapshot.
    pub fn relabel(&mut self, order: &[usize]) -> Result<(), Error> {
        validate_order(order, self.len())?;
        let snapshot = self.slots.clone();
        for (slot, &source) in self.slots.iter_mut().zip(order) {
            *slot = snapshot[source - 1];
        }
        log::debug!("permutation is now {self}");
        Ok(())
    }

    /// For each initial physical slot, the physical slot its occupant holds under `self`.
    /// `initial` must cover the same logical qubits as `self`.
    pub fn register_map(&self, initial: &Permutation) -> Result<RegisterMap, Error> {
        if initial.len() != self.len() {
            return Err(Error::PermutationLength {
                expected: self.len(),
                found: initial.len(),
            });
        }
        let mut targets = vec![0; self.len()];
        for ((_, from), (_, to)) in initial.iter().zip(self.iter()) {
            targets[from] = to;
        }
        Ok(RegisterMap { targets })
    }
}

impl Display for Permutation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (logical, physical) in self.iter() {
            if logical > 1 {
                write!(f, ", ")?;
            }
            write!(f, "{logical}: {physical}")?;
        }
        write!(f, "}}")
    }
}

/// Where each initial physical slot ends up after a build. Measuring physical slot
/// `targets[k]` into classical bit `k` reads every qubit back in its original order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterMap {
    targets: Vec<usize>,
}

impl RegisterMap {
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// The physical slot now holding the qubit that started in slot `initial`.
    #[must_use]
    pub fn get(&self, initial: usize) -> Option<usize> {
        self.targets.get(initial).copied()
    }

    /// Iterates `(initial, current)` physical slot pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.targets.iter().copied().enumerate()
    }
}

/// The single relabeling order equivalent to relabeling by `first` and then by `second`.
pub fn compose(first: &[usize], second: &[usize]) -> Result<Vec<usize>, Error> {
    validate_order(first, first.len())?;
    validate_order(second, first.len())?;
    Ok(second.iter().map(|&i| first[i - 1]).collect())
}

/// Checks `order` lists each of `1..=n` exactly once.
pub(crate) fn validate_order(order: &[usize], n: usize) -> Result<(), Error> {
    let mut seen = FxHashSet::default();
    if order.len() == n && order.iter().all(|&i| (1..=n).contains(&i) && seen.insert(i)) {
        Ok(())
    } else {
        Err(Error::MalformedPermutation {
            args: join(order),
            n,
        })
    }
}

fn join(values: &[usize]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
