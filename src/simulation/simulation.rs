//! The particle life world: rule set, spatial index and worker pool behind one type.
//!
//! # Example
//!
//! ```
//! use particle_life::particles::{Color, Particle, Rule, RuleSet};
//! use particle_life::simulation::Simulation;
//! use particle_life::utils::SimulationParams;
//!
//! let params = SimulationParams::new(Some((200, 200)), Some(0.0), Some(10), Some(2));
//! let rules: RuleSet = vec![Rule::new(Color::Red, Color::Red, 5.0, 15.0, 0.5)].into_iter().collect();
//! let mut sim = Simulation::new(params, rules).expect("valid parameters");
//!
//! sim.add_particle(Particle::at_rest((50.0, 50.0), Color::Red));
//! sim.add_particle(Particle::at_rest((52.0, 50.0), Color::Red));
//! sim.advance().expect("workers alive");
//!
//! assert_eq!(sim.generation(), 1);
//! assert_eq!(sim.particles()[0].velocity, (-1.0, 0.0));
//! ```
use std::sync::Arc;

use log::{debug, info, warn};
use rand::Rng;

use crate::particles::{Color, Particle, Rule, RuleSet};
use crate::recipes::Recipe;
use crate::simulation::UpdateScheduler;
use crate::spatial::{GenerationPair, GridGeometry, SpatialIndex};
use crate::utils::{SimulationError, SimulationParams};

pub struct Simulation {
    params: SimulationParams,
    rules: Arc<RuleSet>,
    generations: GenerationPair,
    scheduler: UpdateScheduler,
    generation: u64,
}

impl Simulation {
    /// Creates an empty world.
    ///
    /// # Errors
    /// Returns `SimulationError::InvalidParameter` if `params` fails validation, or
    /// `SimulationError::Io` if the worker threads cannot be started.
    pub fn new(params: SimulationParams, rules: RuleSet) -> Result<Self, SimulationError> {
        Self::with_particles(params, rules, Vec::new())
    }

    /// Creates a world seeded with `particles`. Particles outside the board are dropped.
    pub fn with_particles(
        params: SimulationParams,
        rules: RuleSet,
        particles: Vec<Particle>,
    ) -> Result<Self, SimulationError> {
        params.validate()?;
        let grid = GridGeometry::new(params.bounds(), params.grid_resolution);
        let index = SpatialIndex::from_particles(grid, particles);
        let scheduler = UpdateScheduler::new(params.workers)?;

        info!(
            "Simulation ready: {}x{} board, {} particles, {} rules, {} workers",
            params.board_size.0,
            params.board_size.1,
            index.len(),
            rules.len(),
            scheduler.worker_count()
        );

        Ok(Simulation {
            params,
            rules: Arc::new(rules),
            generations: GenerationPair::new(index),
            scheduler,
            generation: 0,
        })
    }

    /// Builds a world from a recipe.
    ///
    /// The recipe's `window` and `friction` commands override the matching fields of
    /// `params`; `particles` commands are seeded from `rng` in recipe order.
    pub fn from_recipe<R: Rng>(
        recipe: &Recipe,
        params: SimulationParams,
        rng: &mut R,
    ) -> Result<Self, SimulationError> {
        let mut params = params;
        if let Some(board_size) = recipe.board_size() {
            params.board_size = board_size;
        }
        if let Some(friction) = recipe.friction() {
            params.friction = friction;
        }

        let mut simulation = Simulation::new(params, recipe.rules())?;
        for (color, amount) in recipe.populations() {
            let added = simulation.add_random_particles(amount, color, rng);
            debug!("Seeded {} of {} {} particles", added, amount, color);
        }
        Ok(simulation)
    }

    /// Adds a particle to the current generation.
    ///
    /// Only positions strictly inside the board are accepted; anything else is logged and
    /// ignored. Returns whether the particle was added.
    pub fn add_particle(&mut self, particle: Particle) -> bool {
        let (width, height) = self.params.bounds();
        let (x, y) = particle.position;
        if !(x > 0.0 && x < width && y > 0.0 && y < height) {
            warn!(
                "Ignoring particle at ({}, {}) outside the {}x{} board",
                x, y, self.params.board_size.0, self.params.board_size.1
            );
            return false;
        }
        self.generations.insert(particle)
    }

    /// Scatters `amount` resting particles of `color` uniformly over the board.
    /// Returns how many were added.
    pub fn add_random_particles<R: Rng>(&mut self, amount: usize, color: Color, rng: &mut R) -> usize {
        let (width, height) = self.params.bounds();
        let mut added = 0;
        for _ in 0..amount {
            let position = (rng.random_range(0.0..width), rng.random_range(0.0..height));
            if self.add_particle(Particle::at_rest(position, color)) {
                added += 1;
            }
        }
        added
    }

    /// Appends a rule. Takes effect from the next generation.
    pub fn add_rule(&mut self, rule: Rule) {
        Arc::make_mut(&mut self.rules).add_rule(rule);
    }

    /// Runs one generation on the worker pool.
    ///
    /// # Errors
    /// Returns `SimulationError::WorkerDisconnected` if a worker thread died. The current
    /// generation is unchanged in that case.
    pub fn advance(&mut self) -> Result<(), SimulationError> {
        self.scheduler
            .advance(&mut self.generations, &self.rules, self.params.friction)?;
        self.generation += 1;
        Ok(())
    }

    /// Runs `steps` generations.
    pub fn simulate(&mut self, steps: usize) -> Result<(), SimulationError> {
        for _ in 0..steps {
            self.advance()?;
        }
        Ok(())
    }

    /// Generation N, sorted by cell.
    pub fn particles(&self) -> &[Particle] {
        self.generations.current().particles()
    }

    pub fn index(&self) -> &SpatialIndex {
        self.generations.current()
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn board_size(&self) -> (i32, i32) {
        self.params.board_size
    }

    pub fn friction(&self) -> f32 {
        self.params.friction
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Number of completed generations.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn particle_count(&self) -> usize {
        self.generations.current().len()
    }

    pub fn worker_count(&self) -> usize {
        self.scheduler.worker_count()
    }
}
