//! Core type definitions used throughout the codebase

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

use crate::core::error::{GridError, Result};

/// Unique player identity
///
/// Registry key in the world and occupant reference in grid cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, From, Serialize, Deserialize)]
pub struct PlayerName(String);

impl PlayerName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerName {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

/// Single-cell displacement with both axes in {-1, 0, 1}
///
/// Construction is the only validation point; a `StepOffset` in hand is
/// always a legal direct-move vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepOffset {
    dx: i32,
    dy: i32,
}

impl StepOffset {
    /// The stationary offset
    pub const ZERO: Self = Self { dx: 0, dy: 0 };

    /// The 8 non-stationary offsets, row-major order
    pub const NEIGHBORS: [Self; 8] = [
        Self::raw(-1, -1),
        Self::raw(0, -1),
        Self::raw(1, -1),
        Self::raw(-1, 0),
        Self::raw(1, 0),
        Self::raw(-1, 1),
        Self::raw(0, 1),
        Self::raw(1, 1),
    ];

    /// All 9 legal offsets, the stationary one first
    pub const ALL: [Self; 9] = [
        Self::ZERO,
        Self::raw(-1, -1),
        Self::raw(0, -1),
        Self::raw(1, -1),
        Self::raw(-1, 0),
        Self::raw(1, 0),
        Self::raw(-1, 1),
        Self::raw(0, 1),
        Self::raw(1, 1),
    ];

    const fn raw(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Create an offset, rejecting components outside {-1, 0, 1}
    pub fn new(dx: i32, dy: i32) -> Result<Self> {
        if !(-1..=1).contains(&dx) || !(-1..=1).contains(&dy) {
            return Err(GridError::InvalidMove(format!(
                "step offset ({dx}, {dy}) out of range"
            )));
        }
        Ok(Self { dx, dy })
    }

    pub fn dx(&self) -> i32 {
        self.dx
    }

    pub fn dy(&self) -> i32 {
        self.dy
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

/// Cardinal shot directions; exactly one axis is nonzero by construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// Unit displacement of this direction (y grows southward)
    pub fn offset(self) -> StepOffset {
        match self {
            Self::North => StepOffset::raw(0, -1),
            Self::South => StepOffset::raw(0, 1),
            Self::East => StepOffset::raw(1, 0),
            Self::West => StepOffset::raw(-1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }
}

/// One agent's proposal for a turn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Move {
    /// Step to one of the 8 neighboring cells, or stay put
    Step(StepOffset),
    /// Fire along a cardinal ray
    Shoot(Direction),
}

impl Move {
    /// The stationary no-op move
    pub const STAY: Self = Self::Step(StepOffset::ZERO);
}
