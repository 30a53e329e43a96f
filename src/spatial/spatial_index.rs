//! Sorted-array uniform grid.
//!
//! All particles of a generation live in one vector ordered by grid cell, and a separate
//! offset table records where each cell's run begins. A neighbor query over a rectangle
//! touches one contiguous index range per grid row, so it costs a handful of table lookups
//! regardless of how many particles the world holds.
//!
//! # Example
//!
//! ```
//! use particle_life::particles::{Color, Particle};
//! use particle_life::spatial::{GridGeometry, Region, SpatialIndex};
//!
//! let grid = GridGeometry::new((100.0, 100.0), 10);
//! let mut index = SpatialIndex::new(grid);
//! index.insert(Particle::at_rest((55.0, 55.0), Color::Red));
//! index.insert(Particle::at_rest((5.0, 5.0), Color::Blue));
//! index.insert(Particle::at_rest((57.0, 52.0), Color::Green));
//!
//! // The blue particle sits in cell 0 and so comes first.
//! assert_eq!(index.particles()[0].color, Color::Blue);
//!
//! let nearby: Vec<Color> = index
//!     .ranges_intersecting(&Region::around((56.0, 54.0), 3.0))
//!     .flatten()
//!     .map(|i| index.particles()[i].color)
//!     .collect();
//! assert_eq!(nearby, vec![Color::Red, Color::Green]);
//! ```
use std::ops::Range;

use log::warn;
use rayon::prelude::*;

use crate::particles::Particle;
use crate::spatial::{GridGeometry, Region};

/// One generation of particles, bucketed by grid cell.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    grid: GridGeometry,
    particles: Vec<Particle>,
    /// `offsets[c]` is the first slot of cell `c`; the last entry equals `particles.len()`.
    offsets: Vec<usize>,
}

impl SpatialIndex {
    /// Creates an empty index over `grid`.
    pub fn new(grid: GridGeometry) -> Self {
        SpatialIndex {
            grid,
            particles: Vec::new(),
            offsets: vec![0; grid.cell_count() + 1],
        }
    }

    /// Builds an index from an unordered population with a single sort.
    ///
    /// Particles outside the grid bounds are dropped with a warning.
    pub fn from_particles(grid: GridGeometry, particles: Vec<Particle>) -> Self {
        let total = particles.len();
        let particles: Vec<Particle> = particles
            .into_iter()
            .filter(|p| grid.in_bounds(p.position))
            .collect();
        if particles.len() != total {
            warn!(
                "Dropped {} particles outside the {:?} world",
                total - particles.len(),
                grid.bounds()
            );
        }

        let mut index = SpatialIndex {
            grid,
            particles,
            offsets: vec![0; grid.cell_count() + 1],
        };
        index.sort();
        index
    }

    pub fn grid(&self) -> &GridGeometry {
        &self.grid
    }

    /// The particles in cell order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Slots occupied by cell `cell`. Cells past the end of the grid are empty.
    pub fn cell_range(&self, cell: usize) -> Range<usize> {
        if cell >= self.grid.cell_count() {
            return self.particles.len()..self.particles.len();
        }
        self.offsets[cell]..self.offsets[cell + 1]
    }

    /// Inserts a particle at the end of its cell's run, shifting later slots.
    ///
    /// This is linear in the population and meant for seeding; bulk loads should go through
    /// [`SpatialIndex::from_particles`]. Returns `false`, leaving the index untouched, if the
    /// particle lies outside the grid.
    pub fn insert(&mut self, particle: Particle) -> bool {
        let Some(cell) = self.grid.cell_of(particle.position) else {
            warn!("Particle at {:?} is outside the world, not inserted", particle.position);
            return false;
        };

        let slot = self.offsets[cell + 1];
        self.particles.insert(slot, particle);
        for offset in &mut self.offsets[cell + 1..] {
            *offset += 1;
        }
        true
    }

    /// One index range per grid row the region touches.
    ///
    /// Every particle whose cell overlaps `region` is covered; particles in those cells but
    /// outside the region are included too and must be filtered by the caller. Ranges may
    /// be empty.
    pub fn ranges_intersecting(&self, region: &Region) -> impl Iterator<Item = Range<usize>> + '_ {
        let (columns, rows) = self.grid.cell_span(region).unwrap_or((0..0, 0..0));
        let resolution = self.grid.resolution();
        rows.map(move |row| {
            let first = row * resolution + columns.start;
            let last = row * resolution + columns.end;
            self.offsets[first]..self.offsets[last]
        })
    }

    /// Re-sorts the buffer by cell and rebuilds the offset table.
    ///
    /// The sort is stable, so particles sharing a cell keep their relative order.
    pub fn sort(&mut self) {
        let grid = self.grid;
        self.particles.par_sort_by_key(|p| grid.cell_key(p.position));
        self.rebuild_offsets();
    }

    /// Installs `buffer` as this generation's particles and re-sorts.
    ///
    /// The previous particles are handed back through `buffer`, so both allocations are
    /// reused from one generation to the next.
    pub fn exchange(&mut self, buffer: &mut Vec<Particle>) {
        std::mem::swap(&mut self.particles, buffer);
        self.sort();
    }

    /// Single pass over the sorted buffer.
    fn rebuild_offsets(&mut self) {
        let cell_count = self.grid.cell_count();
        self.offsets.resize(cell_count + 1, 0);
        self.offsets[0] = 0;

        let mut cell = 0;
        for (slot, particle) in self.particles.iter().enumerate() {
            let key = self.grid.cell_key(particle.position);
            debug_assert!(key >= cell, "particles must be sorted before rebuilding offsets");
            while cell < key {
                cell += 1;
                self.offsets[cell] = slot;
            }
        }
        while cell < cell_count {
            cell += 1;
            self.offsets[cell] = self.particles.len();
        }
    }
}
