mod grid;
mod spatial_index;
mod generation;

pub use grid::*;
pub use spatial_index::*;
pub use generation::*;

#[cfg(test)]
mod spatial_index_tests;
#[cfg(test)]
mod generation_tests;
