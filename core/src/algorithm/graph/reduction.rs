//! Path-reduction heuristics
//!
//! Each policy drops one augmenting path from a receiver's path set so the
//! multicast graph can be rebuilt with fewer converging links. The policies
//! do not check that the remaining paths still carry enough flow; the
//! analysis pipeline does that.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt;
use std::str::FromStr;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::data_structures::NodeId;

/// Path-reduction policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReductionPolicy {
    /// Drop the earliest discovered path
    First,
    /// Drop a path with the most hops
    Longest,
    /// Drop a uniformly random path
    Random,
    /// Keep every path; also what unknown policy names map to
    Identity,
}

impl ReductionPolicy {
    /// The policies that actually remove a path
    pub const ALL: [ReductionPolicy; 3] = [Self::First, Self::Longest, Self::Random];

    pub fn name(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Longest => "longest",
            Self::Random => "random",
            Self::Identity => "identity",
        }
    }
}

impl From<&str> for ReductionPolicy {
    fn from(name: &str) -> Self {
        match name {
            "first" => Self::First,
            "longest" => Self::Longest,
            "random" => Self::Random,
            _ => Self::Identity,
        }
    }
}

impl From<String> for ReductionPolicy {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<ReductionPolicy> for String {
    fn from(policy: ReductionPolicy) -> Self {
        policy.name().to_string()
    }
}

impl FromStr for ReductionPolicy {
    type Err = std::convert::Infallible;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(name))
    }
}

impl fmt::Display for ReductionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Remove the path at the head of the list
pub fn delete_first_path<P>(mut paths: Vec<P>) -> Vec<P> {
    if !paths.is_empty() {
        paths.remove(0);
    }
    paths
}

/// Stable sort by hop count and drop the last, i.e. a longest path.
/// Among equally long paths the one discovered last goes.
pub fn delete_longest_path<P: AsRef<[NodeId]>>(mut paths: Vec<P>) -> Vec<P> {
    paths.sort_by_key(|path| path.as_ref().len());
    paths.pop();
    paths
}

/// Remove one path chosen uniformly at random; the rest keep their order
pub fn delete_random_path<P, R: Rng + ?Sized>(mut paths: Vec<P>, rng: &mut R) -> Vec<P> {
    if !paths.is_empty() {
        let index = rng.gen_range(0..paths.len());
        paths.remove(index);
    }
    paths
}

/// Applies reduction policies, owning the random source used by
/// [`ReductionPolicy::Random`]
#[derive(Debug, Clone)]
pub struct PathReducer {
    rng: ChaCha20Rng,
}

impl PathReducer {
    /// Reducer with a reproducible random sequence
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Reducer seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    pub fn new(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::with_seed)
    }

    /// Apply `policy` to `paths`, removing at most one path
    pub fn reduce<P: AsRef<[NodeId]>>(&mut self, paths: Vec<P>, policy: ReductionPolicy) -> Vec<P> {
        match policy {
            ReductionPolicy::First => delete_first_path(paths),
            ReductionPolicy::Longest => delete_longest_path(paths),
            ReductionPolicy::Random => delete_random_path(paths, &mut self.rng),
            ReductionPolicy::Identity => paths,
        }
    }

    /// Look the policy up by name and apply it; unknown names leave the
    /// paths untouched
    pub fn orchestrate<P: AsRef<[NodeId]>>(&mut self, paths: Vec<P>, method: &str) -> Vec<P> {
        self.reduce(paths, ReductionPolicy::from(method))
    }
}

impl Default for PathReducer {
    fn default() -> Self {
        Self::from_entropy()
    }
}
