pub mod errors;
mod constants;
mod simulation_params;
mod engine_config;
mod math_helpers;

pub use errors::SimulationError;
pub use constants::*;
pub use simulation_params::*;
pub use engine_config::*;
pub use math_helpers::*;
