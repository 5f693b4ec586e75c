//! Simulation configuration with documented construction parameters
//!
//! The config is supplied fully formed by the embedding application (file
//! loading and CLI parsing live outside this crate) and validated once at
//! world construction.

use std::path::PathBuf;

use crate::core::error::{GridError, Result};
use crate::core::types::PlayerName;

/// Construction parameters for a [`GridWorld`](crate::world::GridWorld)
/// and its [`Simulator`](crate::sim::Simulator)
#[derive(Debug, Clone)]
pub struct WorldConfig {
    /// Grid width in cells, including the border
    ///
    /// Superseded by the level map dimensions when `level_map_path` is set
    /// and the map parses.
    pub size_x: i32,

    /// Grid height in cells, including the border
    pub size_y: i32,

    /// Target number of bonus items kept on the grid
    ///
    /// `recharge_items` tops the grid back up to this count at the end of
    /// every turn.
    pub num_items: u32,

    /// Health every player starts (and restarts) with
    pub max_health: u32,

    /// Turn count after which the simulation enters endgame
    pub max_steps: u64,

    /// Registered player identities, in iteration order
    ///
    /// This order fixes the resolution order within each turn bucket.
    pub player_names: Vec<PlayerName>,

    /// Optional level map; `.` = empty, any other glyph = wall
    ///
    /// Read at every restart. A missing or unparsable file falls back to a
    /// procedurally generated bordered rectangle.
    pub level_map_path: Option<PathBuf>,

    /// Seed for the world RNG (placement and item spawns)
    ///
    /// Two worlds built from identical configs evolve identically under
    /// identical move sequences.
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            size_x: 10,
            size_y: 10,
            num_items: 5,
            max_health: 10,
            max_steps: 2000,
            player_names: Vec::new(),
            level_map_path: None,
            seed: 0,
        }
    }
}

impl WorldConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    ///
    /// Failures here are fatal: the world refuses to build.
    pub fn validate(&self) -> Result<()> {
        if self.size_x < 3 || self.size_y < 3 {
            return Err(GridError::Configuration(format!(
                "grid {}x{} leaves no interior inside the border",
                self.size_x, self.size_y
            )));
        }

        if self.max_health == 0 {
            return Err(GridError::Configuration(
                "max_health must be at least 1".into(),
            ));
        }

        for (i, name) in self.player_names.iter().enumerate() {
            if name.as_str().is_empty() {
                return Err(GridError::Configuration("empty player name".into()));
            }
            if self.player_names[..i].contains(name) {
                return Err(GridError::Configuration(format!(
                    "duplicate player name: {name}"
                )));
            }
        }

        // Players and the full item stock must fit in the interior.
        let interior = (self.size_x - 2) as u64 * (self.size_y - 2) as u64;
        let occupants = self.player_names.len() as u64 + u64::from(self.num_items);
        if occupants > interior {
            return Err(GridError::Configuration(format!(
                "{} players + {} items exceed {} interior cells",
                self.player_names.len(),
                self.num_items,
                interior
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(names: &[&str]) -> WorldConfig {
        WorldConfig {
            player_names: names.iter().map(|n| PlayerName::from(*n)).collect(),
            ..WorldConfig::default()
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(WorldConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let config = WorldConfig {
            size_x: 0,
            ..WorldConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_borderless_grid_rejected() {
        let config = WorldConfig {
            size_x: 2,
            size_y: 5,
            ..WorldConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_player_names_rejected() {
        assert!(named(&["a", "b", "a"]).validate().is_err());
        assert!(named(&["a", "b", "c"]).validate().is_ok());
    }

    #[test]
    fn test_overcrowded_interior_rejected() {
        let config = WorldConfig {
            size_x: 4,
            size_y: 4,
            num_items: 4,
            player_names: vec![PlayerName::from("a")],
            ..WorldConfig::default()
        };
        // 2x2 interior cannot hold 1 player + 4 items
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_max_health_rejected() {
        let config = WorldConfig {
            max_health: 0,
            ..WorldConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
