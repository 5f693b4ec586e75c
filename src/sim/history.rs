//! Replay log: the initial world plus every resolved turn
//!
//! External persistence and rendering layers consume these records; replaying
//! them through a fresh simulator reproduces the run byte for byte, because
//! the initial world clone carries the RNG state along.

use serde::{Deserialize, Serialize};

use crate::core::types::{Direction, PlayerName, StepOffset};
use crate::world::grid::GridWorld;

/// All moves of one turn, bucketed by kind
///
/// Within each bucket the order is the player-iteration order, not the order
/// decisions happened to finish in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnDescription {
    pub shoots: Vec<(PlayerName, Direction)>,
    pub direct_moves: Vec<(PlayerName, StepOffset)>,
}

impl TurnDescription {
    pub fn is_empty(&self) -> bool {
        self.shoots.is_empty() && self.direct_moves.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shoots.len() + self.direct_moves.len()
    }
}

/// Ordered log of turns with the world they started from
#[derive(Debug, Clone)]
pub struct SimulationHistory {
    initial_world: GridWorld,
    turns: Vec<TurnDescription>,
}

impl SimulationHistory {
    /// Capture the starting world; the log grows as turns resolve
    pub fn new(initial_world: GridWorld) -> Self {
        Self {
            initial_world,
            turns: Vec::new(),
        }
    }

    /// The world as it was before the first recorded turn
    pub fn initial_world(&self) -> &GridWorld {
        &self.initial_world
    }

    pub fn record(&mut self, turn: TurnDescription) {
        self.turns.push(turn);
    }

    /// The turn resolved at the given step index, if recorded
    pub fn turn(&self, step: usize) -> Option<&TurnDescription> {
        self.turns.get(step)
    }

    pub fn turns(&self) -> &[TurnDescription] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::WorldConfig;

    fn history() -> SimulationHistory {
        let config = WorldConfig {
            size_x: 6,
            size_y: 6,
            num_items: 0,
            max_health: 3,
            player_names: vec![PlayerName::from("a")],
            ..WorldConfig::default()
        };
        SimulationHistory::new(GridWorld::new(&config).unwrap())
    }

    #[test]
    fn test_turns_are_indexed_by_step() {
        let mut hist = history();
        let turn = TurnDescription {
            shoots: vec![(PlayerName::from("a"), Direction::East)],
            direct_moves: Vec::new(),
        };
        hist.record(turn.clone());

        assert_eq!(hist.len(), 1);
        assert_eq!(hist.turn(0), Some(&turn));
        assert_eq!(hist.turn(1), None);
    }

    #[test]
    fn test_initial_world_is_the_captured_one() {
        let hist = history();
        assert_eq!(hist.initial_world().players().len(), 1);
        assert!(hist.is_empty());
    }

    #[test]
    fn test_turn_description_roundtrips_through_serde() {
        let turn = TurnDescription {
            shoots: vec![(PlayerName::from("a"), Direction::North)],
            direct_moves: vec![(PlayerName::from("b"), StepOffset::new(1, -1).unwrap())],
        };
        let json = serde_json::to_string(&turn).unwrap();
        let back: TurnDescription = serde_json::from_str(&json).unwrap();
        assert_eq!(turn, back);
    }
}
