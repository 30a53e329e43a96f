mod update;
mod scheduler;
mod simulation;

pub use update::*;
pub use scheduler::*;
pub use simulation::*;
