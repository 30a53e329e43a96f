use crate::particles::Color;
use crate::utils::{length, sanitize_vector};

/// A single point particle.
///
/// Particles have no identity beyond the slot they occupy in a generation buffer; two
/// particles with the same position, velocity and color are equal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position represented as (x, y) in world units.
    pub position: (f32, f32),
    /// Displacement applied to `position` every generation.
    pub velocity: (f32, f32),
    /// Rule-matching key.
    pub color: Color,
}

impl Particle {
    /// Creates a new Particle.
    ///
    /// # Examples
    ///
    /// ```
    /// use particle_life::particles::{Color, Particle};
    ///
    /// let particle = Particle::new((10.0, 20.0), (0.5, 0.0), Color::Red);
    /// assert_eq!(particle.position, (10.0, 20.0));
    /// assert_eq!(particle, Particle::new((10.0, 20.0), (0.5, 0.0), Color::Red));
    /// ```
    pub fn new(position: (f32, f32), velocity: (f32, f32), color: Color) -> Self {
        Particle { position, velocity, color }
    }

    /// Creates a particle with zero velocity, the way recipes seed the world.
    pub fn at_rest(position: (f32, f32), color: Color) -> Self {
        Particle::new(position, (0.0, 0.0), color)
    }

    pub fn speed(&self) -> f32 {
        length(self.velocity)
    }

    /// Zeroes any NaN or infinite component of position or velocity.
    pub fn sanitize(&mut self) {
        self.position = sanitize_vector(self.position);
        self.velocity = sanitize_vector(self.velocity);
    }
}
