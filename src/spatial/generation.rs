use std::sync::Arc;

use crate::particles::Particle;
use crate::spatial::SpatialIndex;

/// The two generation buffers of a running simulation.
///
/// `current` is the sorted, indexed generation N. It sits behind an `Arc` so workers can
/// share it read-only for the length of a pass. `next` is the scratch buffer generation
/// N+1 is written into, always the same length as `current`. [`GenerationPair::swap`] is the
/// only way the roles change.
#[derive(Debug)]
pub struct GenerationPair {
    current: Arc<SpatialIndex>,
    next: Vec<Particle>,
}

impl GenerationPair {
    pub fn new(index: SpatialIndex) -> Self {
        let next = index.particles().to_vec();
        GenerationPair {
            current: Arc::new(index),
            next,
        }
    }

    pub fn current(&self) -> &SpatialIndex {
        &self.current
    }

    /// A shared handle on generation N for workers. Handles must be dropped before
    /// [`GenerationPair::swap`], otherwise the swap has to clone the index.
    pub fn share_current(&self) -> Arc<SpatialIndex> {
        Arc::clone(&self.current)
    }

    /// The writable generation N+1, slot-aligned with `current().particles()`.
    pub fn next_mut(&mut self) -> &mut [Particle] {
        &mut self.next
    }

    /// Adds a particle to generation N.
    pub fn insert(&mut self, particle: Particle) -> bool {
        let inserted = Arc::make_mut(&mut self.current).insert(particle);
        if inserted {
            self.next.push(particle);
        }
        inserted
    }

    /// Promotes generation N+1 to current, re-sorting it, and recycles the old buffer as the
    /// next scratch buffer.
    ///
    /// Returns the fresh read view and write view.
    ///
    /// # Examples
    ///
    /// ```
    /// use particle_life::particles::{Color, Particle};
    /// use particle_life::spatial::{GenerationPair, GridGeometry, SpatialIndex};
    ///
    /// let grid = GridGeometry::new((100.0, 100.0), 4);
    /// let index = SpatialIndex::from_particles(grid, vec![
    ///     Particle::at_rest((10.0, 10.0), Color::Red),
    ///     Particle::at_rest((90.0, 90.0), Color::Blue),
    /// ]);
    /// let mut pair = GenerationPair::new(index);
    ///
    /// // Move the particles into each other's corners.
    /// pair.next_mut()[0].position = (95.0, 95.0);
    /// pair.next_mut()[1].position = (5.0, 5.0);
    ///
    /// let (current, _next) = pair.swap();
    /// assert_eq!(current.particles()[0].color, Color::Blue);
    /// assert_eq!(current.particles()[1].color, Color::Red);
    /// ```
    pub fn swap(&mut self) -> (&SpatialIndex, &mut [Particle]) {
        Arc::make_mut(&mut self.current).exchange(&mut self.next);
        debug_assert_eq!(self.current.len(), self.next.len());
        (&*self.current, self.next.as_mut_slice())
    }
}
