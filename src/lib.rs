//! Particle life: colored point particles attracting and repelling each other under
//! color-keyed rules, advanced one generation at a time over a uniform-grid spatial index
//! by a pool of worker threads.
pub mod utils;
pub mod particles;
pub mod spatial;
pub mod simulation;
pub mod recipes;
#[cfg(feature = "recording")]
pub mod recording;
