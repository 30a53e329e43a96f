mod color;
mod particle;
mod rule;
mod particle_interactions;

pub use color::*;
pub use particle::*;
pub use rule::*;
pub use particle_interactions::*;

#[cfg(test)]
mod particle_tests;
#[cfg(test)]
mod particle_interactions_tests;
