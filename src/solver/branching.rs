use crate::formula::Variable;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Chooses the variable to branch on next.
///
/// `unassigned` is never empty when the solver calls `pick` and is sorted by variable. The
/// choice affects only how long the search takes, never its answer.
pub trait Brancher {
    fn pick(&mut self, unassigned: &[Variable]) -> Option<Variable>;
}

impl<B: Brancher + ?Sized> Brancher for Box<B> {
    fn pick(&mut self, unassigned: &[Variable]) -> Option<Variable> {
        (**self).pick(unassigned)
    }
}

#[derive(Clone, Copy, Default, Debug)]
pub struct LowestIndex;

impl Brancher for LowestIndex {
    fn pick(&mut self, unassigned: &[Variable]) -> Option<Variable> {
        unassigned.iter().min().copied()
    }
}

/// Branch on a uniformly random unassigned variable drawn from a caller-supplied RNG.
#[derive(Clone, Debug)]
pub struct RandomChoice<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomChoice<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomChoice<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Brancher for RandomChoice<R> {
    fn pick(&mut self, unassigned: &[Variable]) -> Option<Variable> {
        unassigned.choose(&mut self.rng).copied()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BranchingPolicy {
    LowestIndex,
    Random { seed: u64 },
}

impl Default for BranchingPolicy {
    fn default() -> Self {
        BranchingPolicy::LowestIndex
    }
}

impl BranchingPolicy {
    pub fn brancher(self) -> Box<dyn Brancher> {
        match self {
            BranchingPolicy::LowestIndex => Box::new(LowestIndex),
            BranchingPolicy::Random { seed } => Box::new(RandomChoice::seeded(seed)),
        }
    }
}
