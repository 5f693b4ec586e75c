//! Weighted aggregation of tactic solvers into one strategy

use ordered_float::OrderedFloat;

use crate::core::error::{GridError, Result};
use crate::core::types::Move;
use crate::strategy::graph::ReachabilityGraph;
use crate::strategy::solvers::{CenterSolver, CollectBonusSolver, HideSolver, ShootSolver, Solver};
use crate::strategy::view::AgentView;
use crate::strategy::Strategy;
use crate::world::cell::BonusKind;

/// Combines weighted solvers into a single decision
///
/// Every solver proposes a move with a confidence; the final move is the
/// argmax of priority x confidence. Ties go to the solver added first. A
/// faulted solver is excluded from the decision and the rest still compete.
pub struct WeightedStrategy {
    solvers: Vec<(Box<dyn Solver>, f32)>,
}

impl WeightedStrategy {
    pub fn new() -> Self {
        Self {
            solvers: Vec::new(),
        }
    }

    /// Add a solver with its priority weight; insertion order breaks ties
    pub fn with_solver(mut self, solver: impl Solver + 'static, priority: f32) -> Self {
        self.solvers.push((Box::new(solver), priority));
        self
    }

    /// The stock tactic loadout: heal when hurt, otherwise hunt and score
    pub fn standard() -> Self {
        Self::new()
            .with_solver(CollectBonusSolver::new(BonusKind::Score), 1.0)
            .with_solver(CollectBonusSolver::new(BonusKind::Heal), 3.0)
            .with_solver(ShootSolver, 2.0)
            .with_solver(HideSolver, 0.0)
            .with_solver(CenterSolver, 0.0)
    }
}

impl Strategy for WeightedStrategy {
    fn get_next_move(&mut self, view: &AgentView) -> Result<Move> {
        let graph = ReachabilityGraph::new(view);

        let mut best: Option<(Move, OrderedFloat<f32>)> = None;
        for (solver, priority) in &self.solvers {
            let (proposal, confidence) = match solver.solve(view, &graph) {
                Ok(result) => result,
                Err(err) => {
                    tracing::warn!("Solver fault, excluded from this turn: {err}");
                    continue;
                }
            };
            let power = OrderedFloat(priority * confidence);
            if best.map_or(true, |(_, top)| power > top) {
                best = Some((proposal, power));
            }
        }

        best.map(|(proposal, _)| proposal)
            .ok_or_else(|| GridError::StrategyFault("every solver faulted".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::WorldConfig;
    use crate::core::types::{PlayerName, StepOffset};
    use crate::world::grid::GridWorld;

    /// Always proposes the same move with the same confidence
    struct Fixed(Move, f32);

    impl Solver for Fixed {
        fn solve(&self, _view: &AgentView, _graph: &ReachabilityGraph) -> Result<(Move, f32)> {
            Ok((self.0, self.1))
        }
    }

    /// Always faults
    struct Faulty;

    impl Solver for Faulty {
        fn solve(&self, _view: &AgentView, _graph: &ReachabilityGraph) -> Result<(Move, f32)> {
            Err(GridError::StrategyFault("boom".into()))
        }
    }

    fn view() -> AgentView {
        let config = WorldConfig {
            size_x: 6,
            size_y: 6,
            num_items: 0,
            max_health: 3,
            player_names: vec![PlayerName::from("a")],
            seed: 4,
            ..WorldConfig::default()
        };
        let world = GridWorld::new(&config).unwrap();
        AgentView::new(world.snapshot(), &PlayerName::from("a")).unwrap()
    }

    fn step(dx: i32, dy: i32) -> Move {
        Move::Step(StepOffset::new(dx, dy).unwrap())
    }

    #[test]
    fn test_priority_scales_confidence() {
        // 0.9 * 1.0 loses to 0.5 * 2.0
        let mut strategy = WeightedStrategy::new()
            .with_solver(Fixed(step(1, 0), 0.9), 1.0)
            .with_solver(Fixed(step(0, 1), 0.5), 2.0);
        assert_eq!(strategy.get_next_move(&view()).unwrap(), step(0, 1));
    }

    #[test]
    fn test_ties_resolve_to_first_solver() {
        let mut strategy = WeightedStrategy::new()
            .with_solver(Fixed(step(1, 0), 0.5), 1.0)
            .with_solver(Fixed(step(0, 1), 0.5), 1.0);
        assert_eq!(strategy.get_next_move(&view()).unwrap(), step(1, 0));
    }

    #[test]
    fn test_faulted_solver_is_excluded() {
        let mut strategy = WeightedStrategy::new()
            .with_solver(Faulty, 100.0)
            .with_solver(Fixed(step(-1, 0), 0.1), 1.0);
        assert_eq!(strategy.get_next_move(&view()).unwrap(), step(-1, 0));
    }

    #[test]
    fn test_all_solvers_faulting_is_a_strategy_fault() {
        let mut strategy = WeightedStrategy::new().with_solver(Faulty, 1.0);
        assert!(matches!(
            strategy.get_next_move(&view()),
            Err(GridError::StrategyFault(_))
        ));
    }

    #[test]
    fn test_zero_priority_solver_never_wins() {
        let mut strategy = WeightedStrategy::new()
            .with_solver(Fixed(step(1, 1), 1.0), 0.0)
            .with_solver(Fixed(step(0, -1), 0.01), 1.0);
        assert_eq!(strategy.get_next_move(&view()).unwrap(), step(0, -1));
    }

    #[test]
    fn test_standard_loadout_answers_on_an_empty_board() {
        // nothing to collect, nobody to shoot: every tactic abstains and the
        // aggregate falls back to standing still
        let mut strategy = WeightedStrategy::standard();
        assert_eq!(strategy.get_next_move(&view()).unwrap(), Move::STAY);
    }
}
