//! Per-agent read-only projection of a grid snapshot
//!
//! Each view wraps its own deep copy of the grid, taken before any agent's
//! decision call, so solver computations can never observe the authoritative
//! world or each other's in-progress decisions.

use crate::core::error::{GridError, Result};
use crate::core::types::PlayerName;
use crate::world::cell::Cell;
use crate::world::grid::GridSnapshot;
use crate::world::player::Player;

/// Filtered snapshot view for exactly one acting agent
#[derive(Debug, Clone)]
pub struct AgentView {
    snapshot: GridSnapshot,
    player_idx: usize,
}

impl AgentView {
    /// Wrap a snapshot for the named acting player
    pub fn new(snapshot: GridSnapshot, name: &PlayerName) -> Result<Self> {
        let player_idx = snapshot
            .players()
            .iter()
            .position(|p| &p.name == name)
            .ok_or_else(|| GridError::PlayerNotFound(name.clone()))?;
        Ok(Self {
            snapshot,
            player_idx,
        })
    }

    /// The acting player
    pub fn player(&self) -> &Player {
        &self.snapshot.players()[self.player_idx]
    }

    /// Every other player, dead ones included
    ///
    /// Dead players remain visible on the grid; solvers filter them out of
    /// targeting and threat logic themselves.
    pub fn other_players(&self) -> impl Iterator<Item = &Player> {
        let acting = self.player_idx;
        self.snapshot
            .players()
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != acting)
            .map(|(_, p)| p)
    }

    pub fn size_x(&self) -> i32 {
        self.snapshot.size_x
    }

    pub fn size_y(&self) -> i32 {
        self.snapshot.size_y
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.snapshot.in_bounds(x, y)
    }

    /// Cell contents, `None` out of bounds
    pub fn cell(&self, x: i32, y: i32) -> Option<&Cell> {
        self.snapshot.cell(x, y)
    }

    /// True iff a mover could enter the cell (in bounds, no wall, no player)
    pub fn is_passable(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).is_some_and(Cell::is_passable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::WorldConfig;
    use crate::world::grid::GridWorld;

    fn snapshot() -> GridSnapshot {
        let config = WorldConfig {
            size_x: 6,
            size_y: 6,
            num_items: 0,
            max_health: 3,
            player_names: vec![
                PlayerName::from("a"),
                PlayerName::from("b"),
                PlayerName::from("c"),
            ],
            seed: 1,
            ..WorldConfig::default()
        };
        GridWorld::new(&config).unwrap().snapshot()
    }

    #[test]
    fn test_view_splits_acting_player_from_others() {
        let view = AgentView::new(snapshot(), &PlayerName::from("b")).unwrap();
        assert_eq!(view.player().name, PlayerName::from("b"));
        let others: Vec<_> = view.other_players().map(|p| p.name.clone()).collect();
        assert_eq!(others, vec![PlayerName::from("a"), PlayerName::from("c")]);
    }

    #[test]
    fn test_view_for_unknown_player_fails() {
        assert!(matches!(
            AgentView::new(snapshot(), &PlayerName::from("ghost")),
            Err(GridError::PlayerNotFound(_))
        ));
    }

    #[test]
    fn test_dead_players_stay_visible() {
        let config = WorldConfig {
            size_x: 6,
            size_y: 6,
            num_items: 0,
            max_health: 1,
            player_names: vec![PlayerName::from("a"), PlayerName::from("b")],
            seed: 1,
            ..WorldConfig::default()
        };
        let mut world = GridWorld::new(&config).unwrap();
        world.player_mut(&PlayerName::from("b")).unwrap().damage(1);

        let view = AgentView::new(world.snapshot(), &PlayerName::from("a")).unwrap();
        let b = view.other_players().next().unwrap();
        assert!(!b.is_alive());
        assert_eq!(view.cell(b.x, b.y), Some(&Cell::Player(b.name.clone())));
    }

    #[test]
    fn test_out_of_bounds_cell_is_none() {
        let view = AgentView::new(snapshot(), &PlayerName::from("a")).unwrap();
        assert_eq!(view.cell(-1, 0), None);
        assert_eq!(view.cell(0, 6), None);
        assert!(!view.is_passable(-1, 0));
    }
}
