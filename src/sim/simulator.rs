//! Turn orchestration: decide in parallel, resolve in fixed order
//!
//! Every living player proposes at most one move per turn. Decisions run on
//! isolated deep-copied views (rayon fans them out across workers), but the
//! results are bucketed and applied strictly in player-registration order:
//! all shots first, then all direct moves. A mover cannot dodge a shot fired
//! in the same turn.

use rayon::prelude::*;

use crate::core::error::{GridError, Result};
use crate::core::types::{Move, PlayerName};
use crate::sim::history::{SimulationHistory, TurnDescription};
use crate::strategy::view::AgentView;
use crate::strategy::Strategy;
use crate::world::grid::GridWorld;
use crate::world::player::Player;

/// Simulation lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimState {
    Running,
    /// Terminal: the step limit was reached or nobody is left alive
    Endgame,
}

/// Drives the step loop over one world and its strategies
///
/// Strategies are injected explicitly as (player, strategy) pairs; there is
/// no ambient registry. The world is exclusively owned here between decision
/// phases.
pub struct Simulator {
    world: GridWorld,
    strategies: Vec<(PlayerName, Box<dyn Strategy>)>,
    max_steps: u64,
    cur_step: u64,
    history: SimulationHistory,
}

impl Simulator {
    /// Wire a world to its strategies; captures the initial world for replay
    ///
    /// Every strategy must belong to a registered player, and no player may
    /// have two strategies.
    pub fn new(
        world: GridWorld,
        strategies: Vec<(PlayerName, Box<dyn Strategy>)>,
        max_steps: u64,
    ) -> Result<Self> {
        Self::validate_strategies(&world, &strategies)?;
        let history = SimulationHistory::new(world.clone());
        Ok(Self {
            world,
            strategies,
            max_steps,
            cur_step: 0,
            history,
        })
    }

    /// Rebuild a simulator from a recorded history
    ///
    /// The world restarts from the captured initial state; recorded turns
    /// replay verbatim before any strategy is consulted again.
    pub fn resume(
        history: SimulationHistory,
        strategies: Vec<(PlayerName, Box<dyn Strategy>)>,
        max_steps: u64,
    ) -> Result<Self> {
        let world = history.initial_world().clone();
        Self::validate_strategies(&world, &strategies)?;
        Ok(Self {
            world,
            strategies,
            max_steps,
            cur_step: 0,
            history,
        })
    }

    fn validate_strategies(
        world: &GridWorld,
        strategies: &[(PlayerName, Box<dyn Strategy>)],
    ) -> Result<()> {
        for (i, (name, _)) in strategies.iter().enumerate() {
            world.player(name)?;
            if strategies[..i].iter().any(|(n, _)| n == name) {
                return Err(GridError::Configuration(format!(
                    "duplicate strategy for player {name}"
                )));
            }
        }
        Ok(())
    }

    pub fn world(&self) -> &GridWorld {
        &self.world
    }

    pub fn history(&self) -> &SimulationHistory {
        &self.history
    }

    pub fn into_history(self) -> SimulationHistory {
        self.history
    }

    pub fn cur_step(&self) -> u64 {
        self.cur_step
    }

    pub fn state(&self) -> SimState {
        let any_alive = self.world.players().iter().any(Player::is_alive);
        if self.cur_step >= self.max_steps || !any_alive {
            SimState::Endgame
        } else {
            SimState::Running
        }
    }

    pub fn is_endgame(&self) -> bool {
        self.state() == SimState::Endgame
    }

    /// Resolve one turn
    ///
    /// A turn already recorded for this step index replays verbatim with no
    /// strategy queried. Otherwise every living player decides on its own
    /// deep-copied view; faults cost that player its move and nothing else.
    /// All shots land before any movement, then the item stock is topped up.
    pub fn step(&mut self) -> Result<()> {
        if self.is_endgame() {
            return Err(GridError::SimulationEnded);
        }

        let turn = match self.history.turn(self.cur_step as usize) {
            Some(recorded) => recorded.clone(),
            None => {
                let turn = self.collect_moves();
                self.history.record(turn.clone());
                turn
            }
        };

        tracing::debug!(
            "step {}: {} shots, {} direct moves",
            self.cur_step,
            turn.shoots.len(),
            turn.direct_moves.len()
        );

        for (name, direction) in &turn.shoots {
            self.world.handle_shoot(name, *direction)?;
        }
        for (name, step) in &turn.direct_moves {
            self.world.handle_direct_move(name, *step)?;
        }

        self.world.recharge_items()?;
        self.cur_step += 1;
        Ok(())
    }

    /// Drive steps until endgame; returns the number of steps taken
    pub fn run_to_end(&mut self) -> Result<u64> {
        let start = self.cur_step;
        while !self.is_endgame() {
            self.step()?;
        }
        Ok(self.cur_step - start)
    }

    /// Query every living player's strategy on an isolated view
    ///
    /// Decisions run in parallel; bucketing follows the registry order, so
    /// the outcome is independent of which worker finishes first.
    fn collect_moves(&mut self) -> TurnDescription {
        let snapshot = self.world.snapshot();

        let proposals: Vec<Option<(PlayerName, Move)>> = self
            .strategies
            .par_iter_mut()
            .map(|(name, strategy)| {
                let alive = snapshot
                    .players()
                    .iter()
                    .any(|p| &p.name == name && p.is_alive());
                if !alive {
                    return None;
                }
                let view = match AgentView::new(snapshot.clone(), name) {
                    Ok(view) => view,
                    Err(err) => {
                        tracing::warn!("No view for {name}: {err}");
                        return None;
                    }
                };
                match strategy.get_next_move(&view) {
                    Ok(proposal) => Some((name.clone(), proposal)),
                    Err(err) => {
                        tracing::warn!("Strategy fault for {name}, no move this turn: {err}");
                        None
                    }
                }
            })
            .collect();

        let mut turn = TurnDescription::default();
        for player in snapshot.players() {
            let proposal = proposals
                .iter()
                .flatten()
                .find(|(name, _)| name == &player.name);
            match proposal {
                Some((name, Move::Shoot(direction))) => {
                    turn.shoots.push((name.clone(), *direction));
                }
                Some((name, Move::Step(step))) => {
                    turn.direct_moves.push((name.clone(), *step));
                }
                None => {}
            }
        }
        turn
    }
}
