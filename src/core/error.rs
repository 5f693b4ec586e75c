use thiserror::Error;

use crate::core::types::PlayerName;

#[derive(Error, Debug)]
pub enum GridError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerName),

    #[error("Invalid move: {0}")]
    InvalidMove(String),

    #[error("Level map error: {0}")]
    LevelLoad(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Strategy fault: {0}")]
    StrategyFault(String),

    #[error("Simulation already ended")]
    SimulationEnded,
}

pub type Result<T> = std::result::Result<T, GridError>;
