pub mod history;
pub mod simulator;

pub use history::{SimulationHistory, TurnDescription};
pub use simulator::{SimState, Simulator};
