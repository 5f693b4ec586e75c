//! Grid cell contents
//!
//! A cell holds at most one occupant. Walls are a stateless tag, not an
//! allocated object; players are referenced by name and live in the world's
//! registry.

use serde::{Deserialize, Serialize};

use crate::core::types::PlayerName;
use crate::world::player::Player;

/// Kind of a consumable bonus item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusKind {
    Heal,
    Poison,
    Score,
}

/// Consumable grid item, applied exactly once on pickup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bonus {
    pub kind: BonusKind,
    /// Magnitude of the effect, always in 1..=3
    pub value: u8,
}

impl Bonus {
    pub fn new(kind: BonusKind, value: u8) -> Self {
        Self { kind, value }
    }

    /// Apply the pickup effect to the collecting player
    pub fn apply(&self, player: &mut Player) {
        match self.kind {
            BonusKind::Heal => player.heal(u32::from(self.value)),
            BonusKind::Poison => player.damage(u32::from(self.value)),
            BonusKind::Score => player.change_score(i32::from(self.value)),
        }
    }
}

/// A single cell of the grid
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    Bonus(Bonus),
    Player(PlayerName),
}

impl Cell {
    /// A cell a player may step into (or shoot through)
    pub fn is_passable(&self) -> bool {
        matches!(self, Self::Empty | Self::Bonus(_))
    }

    pub fn is_wall(&self) -> bool {
        matches!(self, Self::Wall)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}
