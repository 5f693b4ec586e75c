//! Decision-making layer: agent views, reachability, solvers, strategies

pub mod graph;
pub mod solvers;
pub mod view;
pub mod weighted;

pub use graph::{GraphCell, ReachabilityGraph};
pub use solvers::{CenterSolver, CollectBonusSolver, HideSolver, ShootSolver, Solver};
pub use view::AgentView;
pub use weighted::WeightedStrategy;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::error::{GridError, Result};
use crate::core::types::{Direction, Move, StepOffset};

/// Decision-component boundary
///
/// Anything that can turn an agent view into a move can drive a player: the
/// weighted solver strategy in this crate, a scripted bot, or an externally
/// trained policy. An `Err` means the agent contributes no move this turn;
/// it never aborts the turn for anyone else.
pub trait Strategy: Send {
    fn get_next_move(&mut self, view: &AgentView) -> Result<Move>;
}

/// Uniform random choice over the full move vocabulary
///
/// A baseline opponent, and a cheap way to exercise the simulator.
#[derive(Debug, Clone)]
pub struct RandomStrategy {
    rng: ChaCha8Rng,
}

impl RandomStrategy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// The 9 step offsets plus the 4 shot directions
    pub fn possible_moves() -> Vec<Move> {
        StepOffset::ALL
            .iter()
            .map(|&off| Move::Step(off))
            .chain(Direction::ALL.iter().map(|&dir| Move::Shoot(dir)))
            .collect()
    }
}

impl Strategy for RandomStrategy {
    fn get_next_move(&mut self, _view: &AgentView) -> Result<Move> {
        Self::possible_moves()
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| GridError::StrategyFault("empty move vocabulary".into()))
    }
}
