//! Player state and health/score bookkeeping

use serde::{Deserialize, Serialize};

use crate::core::types::PlayerName;

/// One registered agent on the grid
///
/// Created once per name; survives restarts with health and score reset,
/// so identity is preserved for replay and resume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: PlayerName,
    pub x: i32,
    pub y: i32,
    /// Fixed at creation; `health` never exceeds it
    pub max_health: u32,
    pub health: u32,
    pub score: i32,
}

impl Player {
    pub fn new(name: PlayerName, x: i32, y: i32, max_health: u32) -> Self {
        Self {
            name,
            x,
            y,
            max_health,
            health: max_health,
            score: 0,
        }
    }

    /// Alive iff health is above zero
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Restore full health and zero the score
    pub fn reset(&mut self) {
        self.health = self.max_health;
        self.score = 0;
    }

    /// Heal up to `max_health`; no-op on a dead player
    pub fn heal(&mut self, amount: u32) {
        if self.is_alive() {
            self.health = (self.health + amount).min(self.max_health);
        }
    }

    /// Lose health down to zero; no-op on a dead player
    pub fn damage(&mut self, amount: u32) {
        if self.is_alive() {
            self.health = self.health.saturating_sub(amount);
        }
    }

    /// Adjust score (positive or negative); no-op on a dead player
    pub fn change_score(&mut self, diff: i32) {
        if self.is_alive() {
            self.score += diff;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(PlayerName::from("p"), 1, 1, 5)
    }

    #[test]
    fn test_new_player_starts_at_full_health() {
        let p = player();
        assert_eq!(p.health, 5);
        assert_eq!(p.score, 0);
        assert!(p.is_alive());
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let mut p = player();
        p.damage(7);
        assert_eq!(p.health, 0);
        assert!(!p.is_alive());
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut p = player();
        p.damage(1);
        p.heal(10);
        assert_eq!(p.health, 5);
    }

    #[test]
    fn test_dead_player_is_inert() {
        let mut p = player();
        p.damage(5);
        p.heal(3);
        p.change_score(4);
        assert_eq!(p.health, 0);
        assert_eq!(p.score, 0);
    }

    #[test]
    fn test_reset_restores_health_and_score() {
        let mut p = player();
        p.damage(5);
        p.reset();
        p.change_score(2);
        assert_eq!(p.health, 5);
        assert_eq!(p.score, 2);
    }
}
