//! Tactic solvers: each one answers a single question well
//!
//! A solver proposes one move for one concern (collect a bonus kind, line up
//! a shot) together with a confidence in that move. The weighted strategy
//! combines the proposals; no solver ever mutates anything.

use crate::core::error::Result;
use crate::core::types::{Direction, Move};
use crate::strategy::graph::ReachabilityGraph;
use crate::strategy::view::AgentView;
use crate::world::cell::{BonusKind, Cell};

/// A pluggable tactic
///
/// `solve` returns the move best serving this tactic and a confidence,
/// conventionally in [0, 1]. An `Err` marks the solver as faulted for this
/// turn: the caller excludes it and carries on with the rest.
pub trait Solver: Send + Sync {
    fn solve(&self, view: &AgentView, graph: &ReachabilityGraph) -> Result<(Move, f32)>;
}

/// Confidence lost per step of distance to a bonus
const BONUS_DISTANCE_FALLOFF: f32 = 0.1;

/// Collects the nearest reachable bonus of one kind
///
/// Confidence falls off with distance; for heal bonuses it additionally
/// scales with how hurt the acting player is, so healing wins when low.
#[derive(Debug, Clone, Copy)]
pub struct CollectBonusSolver {
    kind: BonusKind,
}

impl CollectBonusSolver {
    pub fn new(kind: BonusKind) -> Self {
        Self { kind }
    }
}

impl Solver for CollectBonusSolver {
    fn solve(&self, view: &AgentView, graph: &ReachabilityGraph) -> Result<(Move, f32)> {
        let mut nearest: Option<(i32, i32, u32)> = None;
        for y in 0..view.size_y() {
            for x in 0..view.size_x() {
                let found = matches!(view.cell(x, y), Some(Cell::Bonus(b)) if b.kind == self.kind);
                if found && graph.is_reachable(x, y) {
                    let dist = graph.cell(x, y).dist;
                    if nearest.map_or(true, |(_, _, best)| dist < best) {
                        nearest = Some((x, y, dist));
                    }
                }
            }
        }

        let Some((x, y, dist)) = nearest else {
            return Ok((Move::STAY, 0.0));
        };

        let mut confidence = (1.0 - dist as f32 * BONUS_DISTANCE_FALLOFF).max(0.0);
        if self.kind == BonusKind::Heal {
            let player = view.player();
            confidence *= 1.0 - player.health as f32 / player.max_health as f32;
        }

        Ok((Move::Step(graph.get_direction_to(x, y)), confidence))
    }
}

/// Base confidence when already standing on a firing cell
const SHOOT_DIRECT_BASE: f32 = 0.5;
/// Base confidence when a walk toward a firing cell is still needed
const SHOOT_MOVING_BASE: f32 = 0.1;

/// Shoots at enemies, or walks into firing position first
///
/// For each living enemy, firing cells are the reachable cells on the 4
/// cardinal rays out of the enemy, each ray cut off by a wall or by any
/// player other than the acting agent. Wounded, easy-to-reach enemies score
/// highest.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShootSolver;

impl Solver for ShootSolver {
    fn solve(&self, view: &AgentView, graph: &ReachabilityGraph) -> Result<(Move, f32)> {
        let actor = view.player();
        let mut best: Option<(Move, f32)> = None;

        for enemy in view.other_players().filter(|p| p.is_alive()) {
            // nearest reachable firing cell for this enemy, over all 4 rays
            let mut nearest: Option<(i32, i32, u32, Direction)> = None;
            for ray in Direction::ALL {
                let step = ray.offset();
                let (mut x, mut y) = (enemy.x + step.dx(), enemy.y + step.dy());
                loop {
                    match view.cell(x, y) {
                        None | Some(Cell::Wall) => break,
                        // other players block the shot; the actor itself does not
                        Some(Cell::Player(name)) if *name != actor.name => break,
                        _ => {}
                    }
                    if graph.is_reachable(x, y) {
                        let dist = graph.cell(x, y).dist;
                        if nearest.map_or(true, |(_, _, best, _)| dist < best) {
                            // shooting back along the ray hits the enemy
                            nearest = Some((x, y, dist, ray.opposite()));
                        }
                    }
                    x += step.dx();
                    y += step.dy();
                }
            }

            let Some((x, y, dist, aim)) = nearest else {
                continue;
            };

            let wounded = (1.0 - SHOOT_DIRECT_BASE)
                * (1.0 - enemy.health as f32 / enemy.max_health as f32);
            let (proposal, confidence) = if dist == 0 {
                (Move::Shoot(aim), SHOOT_DIRECT_BASE + wounded)
            } else {
                (
                    Move::Step(graph.get_direction_to(x, y)),
                    SHOOT_MOVING_BASE + wounded,
                )
            };

            if best.map_or(true, |(_, top)| confidence > top) {
                best = Some((proposal, confidence));
            }
        }

        Ok(best.unwrap_or((Move::STAY, 0.0)))
    }
}

/// Retreat-and-survive tactic; not implemented, always abstains
#[derive(Debug, Clone, Copy, Default)]
pub struct HideSolver;

impl Solver for HideSolver {
    fn solve(&self, _view: &AgentView, _graph: &ReachabilityGraph) -> Result<(Move, f32)> {
        Ok((Move::STAY, 0.0))
    }
}

/// Board-center positioning tactic; not implemented, always abstains
#[derive(Debug, Clone, Copy, Default)]
pub struct CenterSolver;

impl Solver for CenterSolver {
    fn solve(&self, _view: &AgentView, _graph: &ReachabilityGraph) -> Result<(Move, f32)> {
        Ok((Move::STAY, 0.0))
    }
}
